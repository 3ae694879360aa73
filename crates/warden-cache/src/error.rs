//! Cache error types for warden-cache.

use thiserror::Error;
use warden_core::CoreError;

/// Errors from cache reads, writes and reconciliation.
#[derive(Debug, Error)]
pub enum CacheError {
    /// A root field exists but holds a different shape than the matching `FieldSpec` expects.
    #[error("Field '{field}' is not a {expected} field")]
    FieldShape {
        field: String,
        expected: &'static str,
    },

    /// The lock guarding shared state was poisoned by a panicking writer.
    #[error("Shared cache state is poisoned")]
    Poisoned,

    /// A snapshot could not be parsed or serialized.
    #[error("Snapshot error: {0}")]
    Snapshot(#[from] serde_json::Error),

    /// Reference-level precondition failures (unresolved detection kinds).
    #[error(transparent)]
    Core(#[from] CoreError),
}
