//! Reconciliation properties exercised through the public API, starting from
//! snapshot documents shaped like query results.

use pretty_assertions::assert_eq;
use warden_cache::{FieldSpec, NormalizedCache};
use warden_core::{EntityKind, EntityRef};

const SNAPSHOT: &str = r#"{
  "entities": [
    { "__typename": "Rule", "id": "R1", "displayName": "Suspicious Login", "enabled": true,
      "severity": "HIGH", "logTypes": ["Okta.SystemLog"], "outputIds": ["slack-sec"] },
    { "__typename": "Rule", "id": "R2", "displayName": "", "enabled": false, "severity": "LOW" },
    { "__typename": "Rule", "id": "R3", "displayName": "Root Console Login", "enabled": true,
      "severity": "CRITICAL", "outputIds": ["slack-sec", "pagerduty"] },
    { "__typename": "Policy", "id": "P1", "displayName": "S3 Encryption", "enabled": true,
      "severity": "MEDIUM", "complianceStatus": "FAIL", "resourceTypes": ["AWS.S3.Bucket"] },
    { "__typename": "Destination", "outputId": "slack-sec", "displayName": "Security Slack",
      "outputType": "slack" },
    { "__typename": "Destination", "outputId": "pagerduty", "displayName": "On-call",
      "outputType": "pagerduty" }
  ],
  "fields": {
    "detections": { "type": "page", "items": [
      { "kind": "Rule", "id": "R1" }, { "kind": "Rule", "id": "R2" },
      { "kind": "Rule", "id": "R3" }, { "kind": "Policy", "id": "P1" }
    ], "paging": { "totalItems": 4, "totalPages": 1, "thisPage": 1 } },
    "rule": { "type": "singleton", "item": { "kind": "Rule", "id": "R3" } },
    "policy": { "type": "singleton", "item": { "kind": "Policy", "id": "P1" } }
  }
}"#;

fn cache() -> NormalizedCache {
    NormalizedCache::from_json(SNAPSHOT).expect("snapshot parses")
}

fn detection_fields() -> Vec<FieldSpec> {
    vec![
        FieldSpec::list("detections"),
        FieldSpec::singleton("rule", EntityKind::Rule),
        FieldSpec::singleton("policy", EntityKind::Policy),
    ]
}

fn destination(id: &str) -> EntityRef {
    EntityRef::new(EntityKind::Destination, id)
}

#[test]
fn reconciling_twice_equals_reconciling_once() {
    let deleted = [EntityRef::rule("R1"), EntityRef::policy("P1")];

    let mut once = cache();
    once.reconcile(&deleted, &detection_fields()).unwrap();

    let mut twice = cache();
    twice.reconcile(&deleted, &detection_fields()).unwrap();
    let second = twice.reconcile(&deleted, &detection_fields()).unwrap();

    assert_eq!(twice, once);
    assert!(second.is_noop());
}

#[test]
fn remaining_entries_keep_their_order() {
    let mut cache = cache();
    cache
        .reconcile(&[EntityRef::rule("R2"), EntityRef::policy("P1")], &detection_fields())
        .unwrap();

    assert_eq!(
        cache.list_refs("detections").unwrap(),
        &[EntityRef::rule("R1"), EntityRef::rule("R3")]
    );
}

#[test]
fn entity_removed_from_every_field_is_collected() {
    let mut cache = cache();
    let report = cache
        .reconcile(&[EntityRef::rule("R3")], &detection_fields())
        .unwrap();

    assert!(!cache.contains(&EntityRef::rule("R3")));
    assert_eq!(cache.singleton("rule"), None);
    assert_eq!(report.cleared_singletons, vec!["rule".to_string()]);
    // pagerduty was only reachable through R3; slack-sec is still held by R1.
    assert_eq!(
        report.evicted,
        vec![EntityRef::rule("R3"), destination("pagerduty")]
    );
    assert!(cache.contains(&destination("slack-sec")));
}

#[test]
fn deleting_other_rule_leaves_singleton_unchanged() {
    let mut cache = cache();
    cache
        .reconcile(&[EntityRef::rule("R1")], &detection_fields())
        .unwrap();

    assert_eq!(cache.singleton("rule"), Some(&EntityRef::rule("R3")));
    assert_eq!(cache.singleton("policy"), Some(&EntityRef::policy("P1")));
}

#[test]
fn last_detection_referencing_destination_frees_it() {
    let mut cache = cache();
    cache
        .reconcile(
            &[EntityRef::rule("R1"), EntityRef::rule("R3")],
            &detection_fields(),
        )
        .unwrap();

    assert!(!cache.contains(&destination("slack-sec")));
    assert!(!cache.contains(&destination("pagerduty")));
    assert_eq!(cache.len(), 2);
}
