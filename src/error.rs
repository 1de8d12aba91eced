//! Error types surfaced by the LSH–MinHash index.

use thiserror::Error;

use crate::cache::DocId;

/// Failures raised by configuration resolution and cache operations.
///
/// Every fallible entry point in this crate returns `Result<_, LshError>`;
/// nothing panics on caller-supplied input.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum LshError {
    /// Inconsistent or insoluble `(b, r, n)`, a prime `n` with no further
    /// specification, or a non-positive / inverted shingle range.
    #[error("invalid configuration: {reason}")]
    ConfigError { reason: String },

    /// `insert` was called with an id already present in the seen-set.
    #[error("document id {id} has already been inserted")]
    DuplicateInsert { id: DocId },

    /// `lookup` was called with neither a non-empty document nor, when
    /// signatures are stored, a known id.
    #[error("lookup requires a non-empty document, or a known id when signatures are stored")]
    InvalidLookup,
}
