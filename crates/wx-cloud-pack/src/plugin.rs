//! Build pipeline
//!
//! [`WxCloudPack`] is driven by the host bundler through a few callbacks:
//!
//! - [`WxCloudPack::on_entry`] for every function module the compiler
//!   integration discovers (may repeat in watch mode)
//! - [`WxCloudPack::output_intro`] when output options are resolved
//! - [`WxCloudPack::generate_bundle`] when a bundle pass is finalized
//!
//! The host never runs these callbacks concurrently for one build graph.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::bundle::{OutputBundle, PackageGenerator};
use crate::config::PackConfig;
use crate::emit::{EmitOutcome, MetaFileEmitter};
use crate::error::Result;
use crate::naming::output_directory;
use crate::registry::FunctionRegistry;
use crate::template::{PackageOptions, DONT_EDIT_TEXT};

/// File name of the emitted package descriptor
pub const PACKAGE_FILE_NAME: &str = "package.json";

/// A function module discovered by the compiler integration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryEvent {
    pub file_path: String,

    #[serde(default)]
    pub params: Vec<String>,

    #[serde(default)]
    pub is_main: bool,
}

/// A generated file to add to the bundle output
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EmittedAsset {
    /// Cloud-qualified name of the function the asset belongs to
    pub function: String,
    pub file_name: String,
    pub source: String,
}

/// Result of finalizing one bundle pass
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BundleOutput {
    /// `package.json` of the function built by this pass, if any
    pub package: Option<EmittedAsset>,
    pub meta: EmitOutcome,
}

pub struct WxCloudPack {
    prefix: String,
    package_options: PackageOptions,
    registry: FunctionRegistry,
    packages: PackageGenerator,
    meta: MetaFileEmitter,
}

impl WxCloudPack {
    pub fn new(config: PackConfig) -> Self {
        let meta = MetaFileEmitter::new(config.emit_options(), config.debounce_window());
        let packages = PackageGenerator::new(config.prefix.clone(), config.all_dependencies);

        Self {
            prefix: config.prefix,
            package_options: config.package_options,
            registry: FunctionRegistry::new(),
            packages,
            meta,
        }
    }

    /// Register a discovered function module
    pub fn on_entry(&mut self, event: EntryEvent) {
        self.registry.upsert(&event.file_path, event.params, event.is_main);
    }

    pub fn registry(&self) -> &FunctionRegistry {
        &self.registry
    }

    /// Intro prepended to every output chunk; an intro set by the user wins
    pub fn output_intro(existing: Option<String>) -> String {
        existing.unwrap_or_else(|| DONT_EDIT_TEXT.to_string())
    }

    /// Finalize a bundle pass
    ///
    /// Resolves the `package.json` of the function this pass built, then
    /// triggers meta file generation. Write failures fail the pass.
    pub async fn generate_bundle(&mut self, bundle: &OutputBundle) -> Result<BundleOutput> {
        let generated = self
            .packages
            .generate_package(bundle, &self.registry, &self.package_options)?;

        let package = match generated {
            Some(generated) => Some(EmittedAsset {
                function: generated.name,
                file_name: PACKAGE_FILE_NAME.to_string(),
                source: generated.source,
            }),
            None => {
                tracing::debug!("Bundle pass built no registered function");
                None
            }
        };

        let meta = self.meta.trigger(self.registry.snapshot()).await?;

        Ok(BundleOutput { package, meta })
    }

    /// Output directory of the function defined at `path`
    pub fn output_directory(&self, base_dir: impl AsRef<Path>, path: &str) -> PathBuf {
        output_directory(base_dir, &self.prefix, path)
    }

    /// Number of meta file generation passes that ran
    pub fn meta_passes(&self) -> u64 {
        self.meta.passes()
    }
}
