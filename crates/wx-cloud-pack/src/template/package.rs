//! `package.json` template for a single function bundle

use heck::ToKebabCase;
use serde::{Deserialize, Serialize};
use serde_json::{json, Map, Value};

use crate::bundle::Dependency;

/// Package fields supplied by the caller; name and dependencies are derived
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PackageOptions {
    /// Defaults to `0.0.1`
    #[serde(default)]
    pub version: Option<String>,

    #[serde(default)]
    pub description: Option<String>,

    #[serde(default)]
    pub author: Option<String>,

    /// Defaults to `MIT`
    #[serde(default)]
    pub license: Option<String>,
}

/// Render the package descriptor of a function
///
/// `name` is the cloud-qualified function name and gets kebab-cased.
pub fn package_template(
    name: &str,
    dependencies: &[Dependency],
    options: &PackageOptions,
) -> serde_json::Result<String> {
    let dependencies: Map<String, Value> = dependencies
        .iter()
        .map(|dep| (dep.name.clone(), Value::String(dep.version.clone())))
        .collect();

    let package = json!({
        "name": kebab_case(name),
        "version": options.version.as_deref().unwrap_or("0.0.1"),
        "description": options.description.as_deref().unwrap_or_default(),
        "author": options.author.as_deref().unwrap_or_default(),
        "license": options.license.as_deref().unwrap_or("MIT"),
        "dependencies": dependencies,
    });

    serde_json::to_string_pretty(&package)
}

/// Kebab-case a function name, digit runs forming words of their own
fn kebab_case(name: &str) -> String {
    let mut words = String::with_capacity(name.len() + 4);
    let mut prev: Option<char> = None;

    for c in name.chars() {
        if let Some(p) = prev {
            let letter_digit = p.is_alphabetic() && c.is_ascii_digit();
            let digit_letter = p.is_ascii_digit() && c.is_alphabetic();
            if letter_digit || digit_letter {
                words.push(' ');
            }
        }
        words.push(c);
        prev = Some(c);
    }

    words.to_kebab_case()
}
