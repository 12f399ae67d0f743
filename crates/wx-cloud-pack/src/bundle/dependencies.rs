//! Dependency projection
//!
//! Narrows a chunk's imports down to the packages that have an installable
//! version. Runtime-provided modules (`util`, `fs`, ...) never appear in the
//! manifest and are dropped.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

/// Every resolvable package, name -> version requirement
pub type DependencyManifest = BTreeMap<String, String>;

/// A package dependency of a single function
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dependency {
    pub name: String,
    pub version: String,
}

impl Dependency {
    pub fn new(name: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            version: version.into(),
        }
    }
}

/// Keep the imports listed in the manifest, paired with their versions
pub fn project_dependencies(imports: &[String], manifest: &DependencyManifest) -> Vec<Dependency> {
    imports
        .iter()
        .filter_map(|name| {
            manifest
                .get(name)
                .map(|version| Dependency::new(name.clone(), version.clone()))
        })
        .collect()
}
