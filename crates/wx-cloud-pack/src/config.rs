//! Pack configuration
//!
//! Loaded from an optional JSON file (camelCase keys), then overlaid with
//! environment variables:
//!
//! | Variable                    | Field            |
//! |-----------------------------|------------------|
//! | `WX_CLOUD_PACK_PREFIX`      | `prefix`         |
//! | `WX_CLOUD_PACK_CLIENT_FILE` | `clientFilePath` |
//! | `WX_CLOUD_PACK_CONFIG_FILE` | `configFilePath` |
//! | `WX_CLOUD_PACK_DEBOUNCE_MS` | `debounceMs`     |

use std::env;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::bundle::DependencyManifest;
use crate::deploy::{FunctionDeploy, FunctionDeployMap};
use crate::emit::EmitOptions;
use crate::error::{PackError, Result};
use crate::template::PackageOptions;

const DEFAULT_DEBOUNCE_MS: u64 = 666;

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct PackConfig {
    /// Prefix of deployed function names
    pub prefix: String,

    /// Fields of the generated `package.json`
    pub package_options: PackageOptions,

    /// Every installable dependency, name -> version
    pub all_dependencies: DependencyManifest,

    /// Client module path; no client is generated when unset
    pub client_file_path: Option<PathBuf>,

    /// `cloudbaserc.json` path; `defaultDeploy` and `functionDeploy` only
    /// matter when this is set
    pub config_file_path: Option<PathBuf>,

    /// Deploy settings shared by all functions
    pub default_deploy: FunctionDeploy,

    /// Deploy settings per function name, overriding `defaultDeploy`
    pub function_deploy: FunctionDeployMap,

    /// Quiet window between meta file generation passes
    pub debounce_ms: u64,
}

impl Default for PackConfig {
    fn default() -> Self {
        Self {
            prefix: String::new(),
            package_options: PackageOptions::default(),
            all_dependencies: DependencyManifest::new(),
            client_file_path: None,
            config_file_path: None,
            default_deploy: FunctionDeploy::default(),
            function_deploy: FunctionDeployMap::new(),
            debounce_ms: DEFAULT_DEBOUNCE_MS,
        }
    }
}

impl PackConfig {
    /// Load configuration from a JSON file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path).map_err(|e| PackError::io(path, e))?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Load configuration from environment variables only
    pub fn from_env() -> Self {
        Self::default().with_env()
    }

    /// Overlay environment variables onto this configuration
    pub fn with_env(self) -> Self {
        self.with_vars(|key| env::var(key).ok())
    }

    fn with_vars(mut self, var: impl Fn(&str) -> Option<String>) -> Self {
        if let Some(prefix) = var("WX_CLOUD_PACK_PREFIX") {
            self.prefix = prefix;
        }
        if let Some(path) = var("WX_CLOUD_PACK_CLIENT_FILE") {
            self.client_file_path = Some(PathBuf::from(path));
        }
        if let Some(path) = var("WX_CLOUD_PACK_CONFIG_FILE") {
            self.config_file_path = Some(PathBuf::from(path));
        }
        if let Some(ms) = var("WX_CLOUD_PACK_DEBOUNCE_MS").and_then(|s| s.parse().ok()) {
            self.debounce_ms = ms;
        }
        self
    }

    pub fn debounce_window(&self) -> Duration {
        Duration::from_millis(self.debounce_ms)
    }

    /// Options of the meta file emitter
    pub fn emit_options(&self) -> EmitOptions {
        EmitOptions {
            prefix: self.prefix.clone(),
            client_file_path: self.client_file_path.clone(),
            config_file_path: self.config_file_path.clone(),
            default_deploy: self.default_deploy.clone(),
            function_deploy: self.function_deploy.clone(),
        }
    }
}
