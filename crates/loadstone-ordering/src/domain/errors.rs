//! Error types for load-order resolution.

use thiserror::Error;

use super::value_objects::ModuleId;

/// All errors the ordering core can return.
///
/// Missing dependencies and ordering violations are not errors; they are
/// data produced by validation. Only sorting and move operations can fail,
/// and always as explicit values.
#[derive(Debug, Error)]
pub enum OrderingError {
    /// One or more entries could not be placed by the topological sort.
    /// The input order is left untouched.
    #[error("dependency cycle detected involving: {}", join_ids(.remaining))]
    CycleDetected { remaining: Vec<ModuleId> },

    /// A move operation was given a position outside the sequence, or a
    /// boundary that makes the move meaningless.
    #[error("index {index} out of bounds for load order of {len} entries")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A version string did not match `<prefix><major>.<minor>.<revision>`
    /// with an optional `.<changeset>`.
    #[error("invalid module version string: {0}")]
    VersionParse(String),
}

fn join_ids(ids: &[ModuleId]) -> String {
    let parts: Vec<&str> = ids.iter().map(ModuleId::as_str).collect();
    parts.join(", ")
}
