//! JsonSchema validation for cached entity payloads as the API returns them.

use schemars::schema_for;
use warden_core::entities::{CachedEntity, Detection};

/// Validate a JSON value against a schemars-generated schema.
fn validate_against_schema(
    schema: &serde_json::Value,
    instance: &serde_json::Value,
) -> Vec<String> {
    let validator = jsonschema::validator_for(schema).expect("schema should be valid");
    validator
        .iter_errors(instance)
        .map(|e| format!("{e}"))
        .collect()
}

#[test]
fn api_rule_payload_matches_detection_schema() {
    let schema = serde_json::to_value(schema_for!(Detection)).unwrap();
    let payload = serde_json::json!({
        "analysisType": "RULE",
        "id": "AWS.CloudTrail.Stopped",
        "displayName": "CloudTrail Stopped",
        "enabled": true,
        "severity": "HIGH",
        "logTypes": ["AWS.CloudTrail"],
        "outputIds": ["slack-sec"],
        "lastModified": "2020-10-06T12:00:00Z"
    });
    let errors = validate_against_schema(&schema, &payload);
    assert!(errors.is_empty(), "schema errors: {errors:?}");
}

#[test]
fn destination_without_output_type_is_rejected() {
    let schema = serde_json::to_value(schema_for!(CachedEntity)).unwrap();
    let payload = serde_json::json!({
        "__typename": "Destination",
        "outputId": "slack-sec",
        "displayName": "Security Slack"
    });
    let errors = validate_against_schema(&schema, &payload);
    assert!(!errors.is_empty());
    assert!(serde_json::from_value::<CachedEntity>(payload).is_err());
}
