//! Bundle-finalize processing
//!
//! Turns the output of one bundle pass into the `package.json` of the
//! function it was built from:
//!
//! ```text
//! OutputBundle ──> entry chunk of a registered function ──> its imports
//!              ──> imports present in the dependency manifest ──> package.json
//! ```

pub mod dependencies;
pub mod output;
pub mod resolver;

pub use dependencies::{project_dependencies, Dependency, DependencyManifest};
pub use output::{chunk_views, ChunkView, OutputAsset, OutputBundle, OutputChunk, OutputEntry};
pub use resolver::{resolve_chunk, ResolvedChunk};

use crate::error::Result;
use crate::naming::cloud_name;
use crate::registry::FunctionRegistry;
use crate::template::{package_template, PackageOptions};

/// A function's deployable identity and its installable dependencies
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// Cloud-qualified function name
    pub name: String,
    pub dependencies: Vec<Dependency>,
}

/// Rendered `package.json` of a function
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPackage {
    /// Cloud-qualified function name
    pub name: String,
    pub source: String,
}

/// Builds package descriptors for bundle passes
#[derive(Debug, Clone, Default)]
pub struct PackageGenerator {
    prefix: String,
    all_dependencies: DependencyManifest,
}

impl PackageGenerator {
    pub fn new(prefix: impl Into<String>, all_dependencies: DependencyManifest) -> Self {
        Self {
            prefix: prefix.into(),
            all_dependencies,
        }
    }

    /// Resolve the function built by this pass, if any
    pub fn resolve(
        &self,
        bundle: &OutputBundle,
        registry: &FunctionRegistry,
    ) -> Option<ResolvedPackage> {
        let ResolvedChunk { name, imports } = resolve_chunk(chunk_views(bundle), registry)?;
        let dependencies = project_dependencies(&imports, &self.all_dependencies);

        tracing::debug!(
            function = %name,
            imports = imports.len(),
            dependencies = dependencies.len(),
            "Resolved entry chunk"
        );

        Some(ResolvedPackage {
            name: cloud_name(&self.prefix, &name),
            dependencies,
        })
    }

    /// Render `package.json` for the function built by this pass
    ///
    /// Returns `Ok(None)` when the pass built no registered function.
    pub fn generate_package(
        &self,
        bundle: &OutputBundle,
        registry: &FunctionRegistry,
        options: &PackageOptions,
    ) -> Result<Option<GeneratedPackage>> {
        let Some(package) = self.resolve(bundle, registry) else {
            return Ok(None);
        };
        let source = package_template(&package.name, &package.dependencies, options)?;
        Ok(Some(GeneratedPackage {
            name: package.name,
            source,
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::registry::FunctionDescriptor;
    use serde_json::{json, Value};

    fn all_deps() -> DependencyManifest {
        [
            ("cheerio", "^1.0.0-rc.10"),
            ("got", "^11.8.2"),
            ("iconv-lite", "^0.6.3"),
            ("wx-server-sdk", "^2.5.3"),
            ("comment-json", "^4.1.1"),
            ("esbuild", "^0.13.4"),
            ("eslint", "^7.32.0"),
        ]
        .into_iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect()
    }

    fn package_options() -> PackageOptions {
        PackageOptions {
            version: Some("6.6.6".into()),
            description: Some("some package".into()),
            author: Some("lip8up".into()),
            license: None,
        }
    }

    /// Three chunks, of which only `entry` is marked as an entry chunk
    fn make_bundle(entry: &str) -> OutputBundle {
        let chunks = [
            ("foo", vec!["cheerio", "got"], "some/path/foo.ts"),
            ("bar", vec!["cheerio", "iconv-lite", "wx-server-sdk"], "some/path/bar/index.ts"),
            ("haha", vec!["wx-server-sdk", "comment-json", "util"], "some/path/haha/index.ts"),
        ];

        chunks
            .into_iter()
            .map(|(key, imports, facade)| {
                let chunk = OutputChunk {
                    file_name: format!("{}.js", key),
                    is_entry: key == entry,
                    imports: imports.into_iter().map(String::from).collect(),
                    facade_module_id: Some(facade.to_string()),
                };
                (key.to_string(), OutputEntry::Chunk(chunk))
            })
            .collect()
    }

    fn registry() -> FunctionRegistry {
        FunctionRegistry::from(vec![
            FunctionDescriptor::new("foo", vec![], false),
            FunctionDescriptor::new("bar", vec!["object".into()], false),
            FunctionDescriptor::new("haha", vec!["a".into(), "b".into()], true),
            FunctionDescriptor::new("000000", vec!["a".into(), "b".into()], true),
        ])
    }

    #[test]
    fn test_generate_package() {
        let generator = PackageGenerator::new("", all_deps());
        let registry = registry();

        let expected = [
            ("foo", Some(json!({"cheerio": "^1.0.0-rc.10", "got": "^11.8.2"}))),
            (
                "bar",
                Some(json!({
                    "cheerio": "^1.0.0-rc.10",
                    "iconv-lite": "^0.6.3",
                    "wx-server-sdk": "^2.5.3",
                })),
            ),
            ("haha", Some(json!({"wx-server-sdk": "^2.5.3", "comment-json": "^4.1.1"}))),
            ("000000", None),
        ];

        for (name, deps) in expected {
            let source = generator
                .generate_package(&make_bundle(name), &registry, &package_options())
                .unwrap();

            match deps {
                Some(deps) => {
                    let package: Value = serde_json::from_str(&source.unwrap().source).unwrap();
                    assert_eq!(
                        package,
                        json!({
                            "name": name,
                            "version": "6.6.6",
                            "description": "some package",
                            "author": "lip8up",
                            "license": "MIT",
                            "dependencies": deps,
                        })
                    );
                }
                None => assert_eq!(source, None),
            }
        }
    }

    #[test]
    fn test_resolve_single_function_bundle() {
        let registry = FunctionRegistry::from(vec![FunctionDescriptor::new("foo", vec![], false)]);
        let manifest: DependencyManifest = [("cheerio", "^1.0.0"), ("got", "^11.8.2")]
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();

        let mut bundle = OutputBundle::new();
        bundle.insert(
            "foo.js".into(),
            OutputEntry::Chunk(OutputChunk {
                file_name: "foo.js".into(),
                is_entry: true,
                imports: vec!["cheerio".into(), "got".into()],
                facade_module_id: Some("src/foo.ts".into()),
            }),
        );

        let package = PackageGenerator::new("", manifest).resolve(&bundle, &registry).unwrap();
        assert_eq!(package.name, "foo");
        assert_eq!(
            package.dependencies,
            vec![
                Dependency::new("cheerio", "^1.0.0"),
                Dependency::new("got", "^11.8.2"),
            ]
        );
    }

    #[test]
    fn test_resolve_uses_cloud_name() {
        let generator = PackageGenerator::new("airead", all_deps());
        let package = generator.resolve(&make_bundle("bar"), &registry()).unwrap();
        assert_eq!(package.name, "aireadBar");

        let source = generator
            .generate_package(&make_bundle("bar"), &registry(), &PackageOptions::default())
            .unwrap()
            .unwrap();
        assert_eq!(source.name, "aireadBar");
        assert!(source.source.contains(r#""name": "airead-bar""#));
    }

    #[test]
    fn test_assets_are_ignored() {
        let mut bundle = OutputBundle::new();
        bundle.insert(
            "foo.ts".into(),
            OutputEntry::Asset(OutputAsset {
                file_name: "some/path/foo.ts".into(),
            }),
        );
        let generator = PackageGenerator::new("", all_deps());
        assert_eq!(generator.resolve(&bundle, &registry()), None);
    }
}
