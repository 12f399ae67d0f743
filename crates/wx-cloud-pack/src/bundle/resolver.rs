//! Chunk-to-function resolution

use super::output::ChunkView;
use crate::registry::FunctionRegistry;

/// The function an entry chunk was built from, with the chunk's imports
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedChunk {
    pub name: String,
    pub imports: Vec<String>,
}

/// Find the first entry chunk that belongs to a registered function
///
/// Non-entry chunks are skipped. When several entry chunks match, the first
/// one in bundler order wins; a pass is expected to build a single function.
pub fn resolve_chunk<'a>(
    chunks: impl IntoIterator<Item = ChunkView<'a>>,
    registry: &FunctionRegistry,
) -> Option<ResolvedChunk> {
    chunks
        .into_iter()
        .filter(|chunk| chunk.is_entry)
        .find_map(|chunk| {
            let path = chunk.facade_module_id.map(str::trim);
            registry.lookup(path).map(|func| ResolvedChunk {
                name: func.name.clone(),
                imports: chunk.imports.to_vec(),
            })
        })
}
