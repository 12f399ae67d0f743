//! Tolerant JSON file loading

use std::path::Path;

use serde::de::DeserializeOwned;

/// Parse JSON, falling back to `default` when the text is not valid JSON
pub fn try_parse_json<T: DeserializeOwned>(text: &str, default: T) -> T {
    match serde_json::from_str(text) {
        Ok(value) => value,
        Err(e) => {
            tracing::warn!("Ignoring malformed JSON: {}", e);
            default
        }
    }
}

/// Load a JSON file, falling back to `default` when it is missing or malformed
pub async fn load_json_file<T: DeserializeOwned>(path: impl AsRef<Path>, default: T) -> T {
    let path = path.as_ref();
    match tokio::fs::read_to_string(path).await {
        Ok(text) => try_parse_json(&text, default),
        Err(e) => {
            tracing::debug!("Cannot read {:?}, using default: {}", path, e);
            default
        }
    }
}
