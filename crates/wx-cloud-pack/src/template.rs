//! Source templates for generated files

pub mod client;
pub mod package;

pub use client::client_template;
pub use package::{package_template, PackageOptions};

/// Banner placed at the top of every generated file
pub const DONT_EDIT_TEXT: &str =
    "//~~** This file is auto generated by tools, please DO NOT EDIT it. **~~";

/// Render a parameter list: `[a, b]` -> `(a, b)`
///
/// A single parameter is written bare (`a`) unless `arrow_parens` is set.
pub fn params_literal(params: &[String], arrow_parens: bool) -> String {
    match params {
        [single] if !arrow_parens => single.clone(),
        _ => format!("({})", params.join(", ")),
    }
}

/// Render parameters as a shorthand object: `[a, b]` -> `{ a, b }`
pub fn object_literal(params: &[String]) -> String {
    if params.is_empty() {
        "{}".to_string()
    } else {
        format!("{{ {} }}", params.join(", "))
    }
}
