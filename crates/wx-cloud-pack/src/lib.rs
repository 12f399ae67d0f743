//! wx-cloud-pack - cloud function packaging for bundled sources
//!
//! Turns independently bundled function modules into a deployable cloud
//! function tree:
//! - a `package.json` per function, listing only the dependencies its entry
//!   chunk actually imports
//! - a typed client module wrapping `wx.cloud.callFunction` for every function
//! - the `functions` list of the deploy config document (`cloudbaserc.json`)

pub mod bundle;
pub mod config;
pub mod deploy;
pub mod emit;
pub mod error;
pub mod json_file;
pub mod naming;
pub mod plugin;
pub mod registry;
pub mod template;

pub use bundle::{OutputBundle, PackageGenerator};
pub use config::PackConfig;
pub use emit::{EmitOutcome, MetaFileEmitter};
pub use error::{PackError, Result};
pub use naming::{canonical_name, cloud_name};
pub use plugin::{BundleOutput, EntryEvent, WxCloudPack};
pub use registry::{FunctionDescriptor, FunctionRegistry};
