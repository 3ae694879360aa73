//! Entity builders shared by unit tests.

use warden_core::entities::{DataModel, Destination, PolicySummary, RuleSummary};
use warden_core::kind::{ComplianceStatus, Severity};

pub fn rule(id: &str) -> RuleSummary {
    RuleSummary {
        id: id.into(),
        display_name: String::new(),
        enabled: true,
        severity: Severity::Medium,
        log_types: vec!["AWS.CloudTrail".into()],
        output_ids: Vec::new(),
        last_modified: None,
    }
}

pub fn rule_with_outputs(id: &str, outputs: &[&str]) -> RuleSummary {
    RuleSummary {
        output_ids: outputs.iter().map(|o| (*o).to_string()).collect(),
        ..rule(id)
    }
}

pub fn policy(id: &str) -> PolicySummary {
    PolicySummary {
        id: id.into(),
        display_name: String::new(),
        enabled: true,
        severity: Severity::High,
        compliance_status: ComplianceStatus::Pass,
        resource_types: vec!["AWS.S3.Bucket".into()],
        output_ids: Vec::new(),
        last_modified: None,
    }
}

pub fn data_model(id: &str) -> DataModel {
    DataModel {
        id: id.into(),
        display_name: String::new(),
        enabled: true,
        log_types: vec!["GSuite.Reports".into()],
        last_modified: None,
    }
}

pub fn destination(id: &str) -> Destination {
    Destination {
        output_id: id.into(),
        display_name: id.into(),
        output_type: "slack".into(),
    }
}
