//! Generated meta files
//!
//! After every bundle pass the client module and the deploy config document
//! are regenerated from the registry. A single rebuild may finish several
//! bundle passes in a row, so passes are gated by a leading-edge debounce:
//! the first trigger writes immediately, the rest of the burst is dropped.
//!
//! The two files are written by separate tasks and joined; a failure in
//! either fails the pass.

pub mod debounce;

pub use debounce::{Debounce, DEFAULT_WAIT};

use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;

use serde_json::{Map, Value};

use crate::deploy::{function_entry, FunctionDeploy, FunctionDeployMap};
use crate::error::{PackError, Result};
use crate::json_file::load_json_file;
use crate::registry::FunctionDescriptor;
use crate::template::client_template;

/// What gets generated, and where
#[derive(Debug, Clone, Default)]
pub struct EmitOptions {
    pub prefix: String,

    /// Client module path; no client is generated when unset
    pub client_file_path: Option<PathBuf>,

    /// Config document path; the document is left alone when unset
    pub config_file_path: Option<PathBuf>,

    pub default_deploy: FunctionDeploy,
    pub function_deploy: FunctionDeployMap,
}

/// Result of one trigger
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmitOutcome {
    /// A generation pass ran; flags tell which files were written
    Written { client: bool, config: bool },

    /// Dropped by the debounce gate
    Suppressed,
}

/// Debounced writer of the client module and config document
#[derive(Debug)]
pub struct MetaFileEmitter {
    options: Arc<EmitOptions>,
    debounce: Debounce,
    passes: u64,
}

impl MetaFileEmitter {
    pub fn new(options: EmitOptions, wait: Duration) -> Self {
        Self {
            options: Arc::new(options),
            debounce: Debounce::new(wait),
            passes: 0,
        }
    }

    /// Regenerate both files from `functions`, unless a pass ran recently
    pub async fn trigger(&mut self, functions: &[FunctionDescriptor]) -> Result<EmitOutcome> {
        if !self.debounce.check() {
            tracing::debug!("Meta file generation suppressed");
            return Ok(EmitOutcome::Suppressed);
        }

        let functions: Arc<[FunctionDescriptor]> = Arc::from(functions);

        let client = tokio::spawn(create_client_file(self.options.clone(), functions.clone()));
        let config = tokio::spawn(update_function_config(self.options.clone(), functions));

        let (client, config) = tokio::join!(client, config);
        let client = client??;
        let config = config??;

        self.passes += 1;
        tracing::debug!(pass = self.passes, client, config, "Meta files generated");

        Ok(EmitOutcome::Written { client, config })
    }

    /// Number of generation passes that ran
    pub fn passes(&self) -> u64 {
        self.passes
    }
}

async fn create_client_file(
    options: Arc<EmitOptions>,
    functions: Arc<[FunctionDescriptor]>,
) -> Result<bool> {
    let Some(path) = options.client_file_path.as_ref() else {
        return Ok(false);
    };

    let source = client_template(&options.prefix, &functions);
    tokio::fs::write(path, source)
        .await
        .map_err(|e| PackError::io(path, e))?;

    tracing::info!("Client file written: {:?}", path);
    Ok(true)
}

async fn update_function_config(
    options: Arc<EmitOptions>,
    functions: Arc<[FunctionDescriptor]>,
) -> Result<bool> {
    let Some(path) = options.config_file_path.as_ref() else {
        return Ok(false);
    };

    let config: Value = load_json_file(path, Value::Object(Map::new())).await;
    let document = function_config_document(config, &functions, &options)?;
    let json = serde_json::to_string_pretty(&document)?;

    tokio::fs::write(path, json)
        .await
        .map_err(|e| PackError::io(path, e))?;

    tracing::info!(functions = functions.len(), "Function config written: {:?}", path);
    Ok(true)
}

/// Replace the `functions` list of a config document, keeping its other keys
pub fn function_config_document(
    config: Value,
    functions: &[FunctionDescriptor],
    options: &EmitOptions,
) -> Result<Value> {
    let mut document = match config {
        Value::Object(map) => map,
        other => {
            tracing::warn!("Config document is not an object, starting over: {}", other);
            Map::new()
        }
    };

    let entries = functions
        .iter()
        .map(|f| {
            let overrides = options.function_deploy.get(&f.name);
            function_entry(&f.name, &options.default_deploy, overrides)
        })
        .collect::<serde_json::Result<Vec<_>>>()?;

    document.insert("functions".to_string(), Value::Array(entries));
    Ok(Value::Object(document))
}
