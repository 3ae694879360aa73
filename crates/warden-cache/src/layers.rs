//! Optimistic layers on top of the confirmed cache.
//!
//! A pending delete registers a layer describing what it will remove. Readers
//! of [`CacheStore::view`] see the base cache with every layer applied; the
//! base itself only changes when a delete is confirmed via
//! [`CacheStore::commit`]. [`CacheStore::rollback`] just drops the layer, which
//! restores the previous view without touching the base.

use std::borrow::Cow;
use std::fmt;
use std::sync::atomic::{AtomicU64, Ordering};

use serde::Serialize;
use warden_core::EntityRef;

use crate::error::CacheError;
use crate::field::FieldSpec;
use crate::reconcile::ReconcileReport;
use crate::store::NormalizedCache;

static NEXT_REQUEST_ID: AtomicU64 = AtomicU64::new(1);

/// Identifier of one delete request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct RequestId(u64);

impl RequestId {
    /// Allocate a process-unique id.
    #[must_use]
    pub fn next() -> Self {
        Self(NEXT_REQUEST_ID.fetch_add(1, Ordering::Relaxed))
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "req-{}", self.0)
    }
}

/// A delete between dispatch and completion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingDeletion {
    pub request_id: RequestId,
    pub references: Vec<EntityRef>,
    pub fields: Vec<FieldSpec>,
}

impl PendingDeletion {
    #[must_use]
    pub fn new(references: Vec<EntityRef>, fields: Vec<FieldSpec>) -> Self {
        Self {
            request_id: RequestId::next(),
            references,
            fields,
        }
    }
}

/// Confirmed cache plus the optimistic layers of in-flight deletes.
#[derive(Debug, Default)]
pub struct CacheStore {
    base: NormalizedCache,
    layers: Vec<PendingDeletion>,
}

impl CacheStore {
    #[must_use]
    pub fn new(base: NormalizedCache) -> Self {
        Self {
            base,
            layers: Vec::new(),
        }
    }

    /// The confirmed cache, without optimistic layers.
    #[must_use]
    pub const fn base(&self) -> &NormalizedCache {
        &self.base
    }

    /// The cache as the UI should render it: base plus all optimistic layers.
    #[must_use]
    pub fn view(&self) -> Cow<'_, NormalizedCache> {
        if self.layers.is_empty() {
            return Cow::Borrowed(&self.base);
        }
        let mut view = self.base.clone();
        for layer in &self.layers {
            if let Err(error) = view.reconcile(&layer.references, &layer.fields) {
                tracing::warn!(request = %layer.request_id, %error, "skipping optimistic layer");
            }
        }
        Cow::Owned(view)
    }

    /// Whether the confirmed cache would accept `pending` on commit.
    pub fn check(&self, pending: &PendingDeletion) -> Result<(), CacheError> {
        self.base.check_deletion(&pending.references, &pending.fields)
    }

    /// Register an optimistic layer. Rejects deletions the base cache could
    /// not reconcile.
    pub fn push_optimistic(&mut self, pending: PendingDeletion) -> Result<(), CacheError> {
        self.check(&pending)?;
        tracing::debug!(
            request = %pending.request_id,
            references = pending.references.len(),
            "applied optimistic delete layer"
        );
        self.layers.push(pending);
        Ok(())
    }

    /// Confirm a delete: reconcile the base cache and drop its layer (if any).
    ///
    /// Layer removal and reconciliation happen in one call, so a reader
    /// holding the store lock never sees one without the other. When the
    /// reconcile is rejected the base is untouched and the layer stays.
    pub fn commit(&mut self, pending: &PendingDeletion) -> Result<ReconcileReport, CacheError> {
        let report = self.base.reconcile(&pending.references, &pending.fields)?;
        self.remove_layer(pending.request_id);
        Ok(report)
    }

    /// Discard a failed delete's layer. Returns whether a layer was removed.
    pub fn rollback(&mut self, request_id: RequestId) -> bool {
        let removed = self.remove_layer(request_id);
        if removed {
            tracing::debug!(request = %request_id, "rolled back optimistic delete layer");
        }
        removed
    }

    #[must_use]
    pub fn pending(&self) -> &[PendingDeletion] {
        &self.layers
    }

    fn remove_layer(&mut self, request_id: RequestId) -> bool {
        let before = self.layers.len();
        self.layers.retain(|layer| layer.request_id != request_id);
        self.layers.len() != before
    }
}
