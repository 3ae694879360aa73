//! Reachability sweep over the normalized cache.
//!
//! Roots are the references held by root fields. An entity survives if it is
//! a root or is reachable from one through relationship fields; every other
//! record is evicted.

use std::collections::HashSet;

use warden_core::EntityRef;

use crate::store::NormalizedCache;

/// Evict unreachable entities. Returns the evicted references in key order.
pub fn collect_garbage(cache: &mut NormalizedCache) -> Vec<EntityRef> {
    let mut reachable: HashSet<EntityRef> = HashSet::new();
    let mut pending: Vec<EntityRef> = cache
        .root()
        .values()
        .flat_map(|field| field.refs().iter().cloned())
        .collect();

    while let Some(reference) = pending.pop() {
        if !reachable.insert(reference.clone()) {
            continue;
        }
        if let Some(entity) = cache.get(&reference) {
            pending.extend(
                entity
                    .relations()
                    .into_iter()
                    .filter(|related| !reachable.contains(related)),
            );
        }
    }

    let evicted: Vec<EntityRef> = cache
        .entity_refs()
        .filter(|reference| !reachable.contains(*reference))
        .cloned()
        .collect();

    let entities = cache.entities_mut();
    for reference in &evicted {
        entities.remove(reference);
    }

    if !evicted.is_empty() {
        tracing::debug!(count = evicted.len(), "evicted unreachable cache entities");
    }
    evicted
}
