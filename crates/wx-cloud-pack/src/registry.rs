//! Function registry
//!
//! Keeps one descriptor per canonical function name, in the order functions
//! were first discovered. Re-discovering a function (watch mode re-transforms)
//! replaces its descriptor in place.

use serde::{Deserialize, Serialize};

use crate::naming::canonical_name;

/// A discovered cloud function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionDescriptor {
    /// Canonical name derived from the source path
    pub name: String,

    /// Declared parameter names, in order
    #[serde(default)]
    pub params: Vec<String>,

    /// Whether the module exports a `main` entry point
    #[serde(default)]
    pub is_main: bool,
}

impl FunctionDescriptor {
    pub fn new(name: impl Into<String>, params: Vec<String>, is_main: bool) -> Self {
        Self {
            name: name.into(),
            params,
            is_main,
        }
    }
}

/// Ordered registry of discovered functions, unique by name
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: Vec<FunctionDescriptor>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a function, or replace the one with the same canonical name
    pub fn upsert(&mut self, path: &str, params: Vec<String>, is_main: bool) -> &mut Self {
        let descriptor = FunctionDescriptor::new(canonical_name(path), params, is_main);

        match self.position(&descriptor.name) {
            Some(index) => {
                tracing::debug!(function = %descriptor.name, index, "Replacing function");
                self.functions[index] = descriptor;
            }
            None => {
                tracing::debug!(function = %descriptor.name, "Registering function");
                self.functions.push(descriptor);
            }
        }

        self
    }

    /// Find the function a source path belongs to
    pub fn lookup(&self, path: Option<&str>) -> Option<&FunctionDescriptor> {
        let name = canonical_name(path.unwrap_or_default());
        self.functions.iter().find(|f| f.name == name)
    }

    /// All registered functions, in registration order
    pub fn snapshot(&self) -> &[FunctionDescriptor] {
        &self.functions
    }

    pub fn len(&self) -> usize {
        self.functions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.functions.is_empty()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.functions.iter().position(|f| f.name == name)
    }
}

impl From<Vec<FunctionDescriptor>> for FunctionRegistry {
    fn from(functions: Vec<FunctionDescriptor>) -> Self {
        Self { functions }
    }
}
