//! Cross-cutting error types for Warden.
//!
//! Crate-specific errors (`CacheError`, `ClientError`) live in their own
//! crates. The binary converges everything into `anyhow`.

use thiserror::Error;

use crate::reference::EntityRef;

/// Errors that can be raised by any Warden crate.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum CoreError {
    /// A `Detection` reference reached a step that needs the Rule/Policy sub-kind.
    #[error("Detection reference {0} has no resolved sub-kind (rule or policy)")]
    InvalidReferenceKind(EntityRef),

    /// A delete was requested with nothing to delete.
    #[error("Delete request contains no references")]
    EmptyReferenceSet,

    /// One request may only batch references of one mutation family.
    #[error("References span multiple delete mutations: {first} and {second}")]
    MixedMutationFamilies { first: String, second: String },

    /// A kind name did not match any known entity kind.
    #[error("Unknown entity kind: {0}")]
    UnknownKind(String),
}
