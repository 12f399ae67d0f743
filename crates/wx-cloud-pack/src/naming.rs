//! Function naming rules
//!
//! A function is identified by the path of its source module:
//! - `some/path/foo.ts` -> `foo`
//! - `some/path/foo/index.ts` -> `foo`
//!
//! The deployed name prefixes the canonical name with a caller-configured
//! prefix, e.g. `airead` + `getOpenId` -> `aireadGetOpenId`.

use std::path::{Path, PathBuf};

/// Entry file stem whose name is taken from the enclosing folder
const INDEX_STEM: &str = "index";

/// Derive the canonical function name from a source file path
pub fn canonical_name(path: &str) -> String {
    let path = Path::new(path);
    let stem = path
        .file_stem()
        .map(|s| s.to_string_lossy())
        .unwrap_or_default();

    if stem == INDEX_STEM {
        return path
            .parent()
            .and_then(Path::file_name)
            .map(|s| s.to_string_lossy().to_string())
            .unwrap_or_default();
    }

    stem.to_string()
}

/// Uppercase the first character, leaving the rest untouched
pub fn upper_first(s: &str) -> String {
    let mut chars = s.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

/// Combine a canonical name with the deploy prefix
pub fn cloud_name(prefix: &str, name: &str) -> String {
    if prefix.is_empty() {
        name.to_string()
    } else {
        format!("{}{}", prefix, upper_first(name))
    }
}

/// Directory a function's bundle is written to: `base_dir/<cloud name>`
pub fn output_directory(base_dir: impl AsRef<Path>, prefix: &str, path: &str) -> PathBuf {
    base_dir
        .as_ref()
        .join(cloud_name(prefix, &canonical_name(path)))
}
