//! Bundler output map
//!
//! The host bundler hands over every file produced by one bundle pass, keyed
//! by output file name. Only the fields the resolver needs are kept; anything
//! else the host sends is ignored.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Output map of one bundle pass, in the order the bundler produced it
pub type OutputBundle = IndexMap<String, OutputEntry>;

/// A single bundler output file
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "lowercase")]
pub enum OutputEntry {
    Chunk(OutputChunk),
    Asset(OutputAsset),
}

/// A compiled chunk
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputChunk {
    #[serde(default)]
    pub file_name: String,

    /// Top-level build target, as opposed to a shared chunk
    #[serde(default)]
    pub is_entry: bool,

    /// Direct static imports of this chunk
    #[serde(default)]
    pub imports: Vec<String>,

    /// Source module this chunk was built from
    #[serde(default)]
    pub facade_module_id: Option<String>,
}

/// A non-code output file
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OutputAsset {
    #[serde(default)]
    pub file_name: String,
}

/// Read-only projection of a chunk, valid for one bundle pass
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkView<'a> {
    pub facade_module_id: Option<&'a str>,
    pub imports: &'a [String],
    pub is_entry: bool,
}

impl OutputEntry {
    /// View this entry as a chunk, `None` for assets
    pub fn as_chunk(&self) -> Option<ChunkView<'_>> {
        match self {
            OutputEntry::Chunk(chunk) => Some(ChunkView {
                facade_module_id: chunk.facade_module_id.as_deref(),
                imports: &chunk.imports,
                is_entry: chunk.is_entry,
            }),
            OutputEntry::Asset(_) => None,
        }
    }
}

/// All chunks of a bundle, in bundler order
pub fn chunk_views(bundle: &OutputBundle) -> impl Iterator<Item = ChunkView<'_>> {
    bundle.values().filter_map(OutputEntry::as_chunk)
}
