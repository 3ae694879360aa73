use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kind::{AnalysisType, ComplianceStatus, EntityKind, Severity};
use crate::reference::{EntityRef, Identify};

/// Rule fields rendered by list cards and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct RuleSummary {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub enabled: bool,
    pub severity: Severity,
    #[serde(default)]
    pub log_types: Vec<String>,
    /// Destinations alerts from this rule are delivered to.
    #[serde(default)]
    pub output_ids: Vec<String>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

/// Policy fields rendered by list cards and detail pages.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct PolicySummary {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub enabled: bool,
    pub severity: Severity,
    pub compliance_status: ComplianceStatus,
    #[serde(default)]
    pub resource_types: Vec<String>,
    #[serde(default)]
    pub output_ids: Vec<String>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

/// A rule or a policy, discriminated by `analysisType`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "analysisType")]
pub enum Detection {
    #[serde(rename = "RULE")]
    Rule(RuleSummary),
    #[serde(rename = "POLICY")]
    Policy(PolicySummary),
}

impl Detection {
    #[must_use]
    pub const fn analysis_type(&self) -> AnalysisType {
        match self {
            Self::Rule(_) => AnalysisType::Rule,
            Self::Policy(_) => AnalysisType::Policy,
        }
    }
}

impl Identify for RuleSummary {
    fn reference(&self) -> EntityRef {
        EntityRef::new(EntityKind::Rule, self.id.clone())
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Identify for PolicySummary {
    fn reference(&self) -> EntityRef {
        EntityRef::new(EntityKind::Policy, self.id.clone())
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn entity_id(&self) -> &str {
        &self.id
    }
}

impl Identify for Detection {
    /// The kind comes from `analysisType`, never `Detection`.
    fn reference(&self) -> EntityRef {
        match self {
            Self::Rule(rule) => rule.reference(),
            Self::Policy(policy) => policy.reference(),
        }
    }

    fn display_name(&self) -> &str {
        match self {
            Self::Rule(rule) => &rule.display_name,
            Self::Policy(policy) => &policy.display_name,
        }
    }

    fn entity_id(&self) -> &str {
        match self {
            Self::Rule(rule) => &rule.id,
            Self::Policy(policy) => &policy.id,
        }
    }
}
