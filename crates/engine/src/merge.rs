//! Last-writer-wins merge of ordered sources.

use profiler_client::Variables;
use tracing::debug;

use crate::sources::Source;

/// Merge `sources` in order; a later source overrides earlier values for the same key.
///
/// Keys keep the position of their first appearance.
pub fn merge_sources(sources: &[Source]) -> Variables {
    let mut merged = Variables::new();
    for source in sources {
        debug!(origin = %source.origin, count = source.variables.len(), "Merging source");
        merged.overlay(&source.variables);
    }
    merged
}
