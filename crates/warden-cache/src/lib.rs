//! # warden-cache
//!
//! Normalized client cache for detections and auxiliary entities.
//!
//! - [`NormalizedCache`]: entity arena keyed by [`warden_core::EntityRef`] plus
//!   root fields holding references (lists, page-wrapped lists, singletons)
//! - [`reconcile`](reconcile::reconcile): post-delete field rewrites followed by
//!   one reachability sweep ([`gc`])
//! - [`CacheStore`]: confirmed cache plus optimistic layers for in-flight deletes
//! - [`SelectionTracker`]: per-view multi-select state
//! - [`Shared`]: lock-guarded handles passed to the delete controller

pub mod error;
pub mod field;
pub mod gc;
pub mod layers;
pub mod reconcile;
pub mod selection;
pub mod shared;
pub mod store;

#[cfg(test)]
mod test_support;

pub use error::CacheError;
pub use field::{FieldSpec, FieldValue, Paging};
pub use layers::{CacheStore, PendingDeletion, RequestId};
pub use reconcile::ReconcileReport;
pub use selection::SelectionTracker;
pub use shared::{Shared, SharedCache, SharedSelection};
pub use store::{CacheSnapshot, NormalizedCache};
