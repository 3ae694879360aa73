//! # warden-core
//!
//! Core types shared across all Warden crates:
//! - Entity kinds and the detection analysis-type discriminant
//! - `EntityRef`, the `(kind, id)` identity used by the normalized cache
//! - Entity payloads (rules, policies, data models, saved queries, destinations)
//! - Confirmation and notification copy helpers (pluralization, name joining)
//! - Cross-cutting error types

pub mod copy;
pub mod entities;
pub mod errors;
pub mod kind;
pub mod reference;

pub use entities::{CachedEntity, Detection};
pub use errors::CoreError;
pub use kind::{AnalysisType, EntityKind};
pub use reference::EntityRef;
