//! Post-delete reconciliation of the normalized cache.
//!
//! Three steps, always in this order:
//! 1. filter deleted references out of every matching list or page field,
//!    keeping the order of what remains;
//! 2. clear matching singleton fields that point at a deleted entity of
//!    their kind;
//! 3. one reachability sweep ([`collect_garbage`]).
//!
//! Preconditions are checked before anything is written, so a rejected call
//! leaves the cache untouched.

use std::collections::HashSet;

use serde::Serialize;
use warden_core::EntityRef;

use crate::error::CacheError;
use crate::field::{FieldSpec, FieldValue};
use crate::gc::collect_garbage;
use crate::store::NormalizedCache;

/// What a reconciliation changed.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ReconcileReport {
    /// List entries removed across all matching fields.
    pub removed_entries: usize,
    /// Keys of singleton fields that were cleared.
    pub cleared_singletons: Vec<String>,
    /// Entities evicted by the sweep.
    pub evicted: Vec<EntityRef>,
    /// Deleted references that no matching field held.
    pub not_found: Vec<EntityRef>,
}

impl ReconcileReport {
    /// Whether the call changed nothing.
    #[must_use]
    pub fn is_noop(&self) -> bool {
        self.removed_entries == 0 && self.cleared_singletons.is_empty() && self.evicted.is_empty()
    }
}

/// Remove `deleted` from every field selected by `fields`, then sweep.
///
/// Unknown references are no-ops and applying the same call twice yields the
/// same cache as applying it once.
pub fn reconcile(
    cache: &mut NormalizedCache,
    deleted: &[EntityRef],
    fields: &[FieldSpec],
) -> Result<ReconcileReport, CacheError> {
    check(cache, deleted, fields)?;

    let deleted_set: HashSet<&EntityRef> = deleted.iter().collect();
    let mut found: HashSet<EntityRef> = HashSet::new();
    let mut report = ReconcileReport::default();

    for (key, value) in cache.root_mut().iter_mut() {
        let Some(spec) = fields.iter().find(|spec| spec.matches(key)) else {
            continue;
        };
        match (spec, value) {
            (FieldSpec::List { .. }, FieldValue::List { items } | FieldValue::Page { items, .. }) => {
                let before = items.len();
                items.retain(|item| {
                    if deleted_set.contains(item) {
                        found.insert(item.clone());
                        false
                    } else {
                        true
                    }
                });
                report.removed_entries += before - items.len();
            }
            (FieldSpec::Singleton { kind, .. }, FieldValue::Singleton { item }) => {
                // Only deletions of the singleton's own kind can clear it.
                let clears = item
                    .as_ref()
                    .is_some_and(|current| current.kind == *kind && deleted_set.contains(current));
                if clears {
                    if let Some(current) = item.take() {
                        found.insert(current);
                    }
                    report.cleared_singletons.push(key.clone());
                }
            }
            // Shapes were checked above.
            _ => {}
        }
    }

    report.not_found = deleted
        .iter()
        .filter(|reference| !found.contains(*reference))
        .cloned()
        .collect();
    if !report.not_found.is_empty() {
        tracing::debug!(
            references = ?report.not_found,
            "deleted references not present in any affected field"
        );
    }

    report.evicted = collect_garbage(cache);

    tracing::debug!(
        deleted = deleted.len(),
        removed = report.removed_entries,
        cleared = report.cleared_singletons.len(),
        evicted = report.evicted.len(),
        "reconciled cache after delete"
    );
    Ok(report)
}

/// The preconditions of [`reconcile`], without touching the cache.
///
/// Every deleted reference must be resolved and every root field selected by
/// `fields` must have the shape its spec expects.
pub fn check(
    cache: &NormalizedCache,
    deleted: &[EntityRef],
    fields: &[FieldSpec],
) -> Result<(), CacheError> {
    for reference in deleted {
        reference.ensure_resolved()?;
    }
    for (key, value) in cache.root() {
        if let Some(spec) = fields.iter().find(|spec| spec.matches(key)) {
            if spec.shape() != value.shape() {
                return Err(CacheError::FieldShape {
                    field: key.clone(),
                    expected: spec.shape(),
                });
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::field::Paging;
    use crate::test_support::{data_model, policy, rule};
    use pretty_assertions::assert_eq;
    use warden_core::entities::CachedEntity;
    use warden_core::{CoreError, EntityKind};

    fn detection_fields() -> Vec<FieldSpec> {
        vec![
            FieldSpec::list("detections"),
            FieldSpec::singleton("rule", EntityKind::Rule),
            FieldSpec::singleton("policy", EntityKind::Policy),
        ]
    }

    #[test]
    fn list_removal_preserves_order() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [rule("a"), rule("b"), rule("c"), rule("d")]);

        let report = reconcile(
            &mut cache,
            &[EntityRef::rule("b"), EntityRef::rule("d")],
            &detection_fields(),
        )
        .unwrap();

        assert_eq!(
            cache.list_refs("detections").unwrap(),
            &[EntityRef::rule("a"), EntityRef::rule("c")]
        );
        assert_eq!(report.removed_entries, 2);
        assert_eq!(report.evicted, vec![EntityRef::rule("b"), EntityRef::rule("d")]);
    }

    #[test]
    fn rule_singleton_cleared_only_for_its_id() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [rule("R1"), rule("R2")]);
        cache.write_singleton("rule", Some(rule("R1")));

        reconcile(&mut cache, &[EntityRef::rule("R2")], &detection_fields()).unwrap();
        assert_eq!(cache.singleton("rule"), Some(&EntityRef::rule("R1")));

        let report = reconcile(&mut cache, &[EntityRef::rule("R1")], &detection_fields()).unwrap();
        assert_eq!(cache.singleton("rule"), None);
        assert_eq!(report.cleared_singletons, vec!["rule".to_string()]);
        assert!(!cache.contains(&EntityRef::rule("R1")));
    }

    #[test]
    fn policy_deletion_leaves_rule_singleton_alone() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [CachedEntity::from(rule("X1")), policy("P1").into()]);
        cache.write_singleton("rule", Some(rule("X1")));
        cache.write_singleton("policy", Some(policy("P1")));

        reconcile(&mut cache, &[EntityRef::policy("P1")], &detection_fields()).unwrap();

        assert_eq!(cache.singleton("rule"), Some(&EntityRef::rule("X1")));
        assert_eq!(cache.singleton("policy"), None);
    }

    #[test]
    fn same_id_different_kind_does_not_clear_singleton() {
        let mut cache = NormalizedCache::new();
        cache.write_singleton("rule", Some(rule("shared")));

        reconcile(&mut cache, &[EntityRef::policy("shared")], &detection_fields()).unwrap();
        assert_eq!(cache.singleton("rule"), Some(&EntityRef::rule("shared")));
    }

    #[test]
    fn argument_variants_and_pages_are_all_rewritten() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [rule("R1"), rule("R2")]);
        cache.write_list(r#"detections({"page":2})"#, [rule("R3"), rule("R1")]);
        cache.write_page(
            "listDataModels",
            [data_model("DM1"), data_model("DM2")],
            Some(Paging {
                total_items: 2,
                total_pages: 1,
                this_page: 1,
            }),
        );

        reconcile(&mut cache, &[EntityRef::rule("R1")], &detection_fields()).unwrap();
        assert_eq!(cache.list_refs("detections").unwrap(), &[EntityRef::rule("R2")]);
        assert_eq!(
            cache.list_refs(r#"detections({"page":2})"#).unwrap(),
            &[EntityRef::rule("R3")]
        );

        let dm = EntityRef::new(EntityKind::DataModel, "DM1");
        reconcile(&mut cache, &[dm.clone()], &[FieldSpec::list("listDataModels")]).unwrap();
        assert_eq!(
            cache.list_refs("listDataModels").unwrap(),
            &[EntityRef::new(EntityKind::DataModel, "DM2")]
        );
        assert!(!cache.contains(&dm));
    }

    #[test]
    fn entity_still_listed_elsewhere_is_not_evicted() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [rule("R1")]);
        cache.write_list("ruleSearch", [rule("R1")]);

        reconcile(&mut cache, &[EntityRef::rule("R1")], &[FieldSpec::list("detections")]).unwrap();

        assert!(cache.contains(&EntityRef::rule("R1")));
        assert_eq!(cache.list_refs("ruleSearch").unwrap(), &[EntityRef::rule("R1")]);
    }

    #[test]
    fn unknown_reference_is_a_noop() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [rule("R1")]);
        let before = cache.clone();

        let report = reconcile(&mut cache, &[EntityRef::rule("gone")], &detection_fields()).unwrap();

        assert_eq!(cache, before);
        assert!(report.is_noop());
        assert_eq!(report.not_found, vec![EntityRef::rule("gone")]);
    }

    #[test]
    fn unresolved_detection_is_rejected_before_any_write() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [rule("R1")]);
        let before = cache.clone();

        let err = reconcile(
            &mut cache,
            &[EntityRef::rule("R1"), EntityRef::new(EntityKind::Detection, "R1")],
            &detection_fields(),
        )
        .unwrap_err();

        assert!(matches!(err, CacheError::Core(CoreError::InvalidReferenceKind(_))));
        assert_eq!(cache, before);
    }

    #[test]
    fn shape_mismatch_is_rejected_before_any_write() {
        let mut cache = NormalizedCache::new();
        cache.write_list("detections", [rule("R1")]);
        cache.write_list("rule", [rule("R2")]);
        let before = cache.clone();

        let checked = check(&cache, &[EntityRef::rule("R1")], &detection_fields());
        assert!(matches!(checked, Err(CacheError::FieldShape { .. })));
        let err = reconcile(&mut cache, &[EntityRef::rule("R1")], &detection_fields()).unwrap_err();
        assert!(matches!(err, CacheError::FieldShape { .. }));
        assert_eq!(cache, before);
    }
}
