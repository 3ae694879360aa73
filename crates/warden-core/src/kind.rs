//! Entity kinds, the detection analysis-type discriminant, and display enums.
//!
//! `EntityKind` serializes to the API typename (`"Rule"`, `"DataModel"`, ...),
//! which is also the prefix of a cache key. The remaining enums use the API's
//! `SCREAMING_SNAKE_CASE` values.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;

// ---------------------------------------------------------------------------
// EntityKind
// ---------------------------------------------------------------------------

/// Kind of a cached entity.
///
/// `Detection` is the umbrella over `Rule` and `Policy`. A reference of kind
/// `Detection` is unresolved and must be narrowed before it reaches the cache.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub enum EntityKind {
    Rule,
    Policy,
    Detection,
    SavedQuery,
    DataModel,
    Destination,
}

impl EntityKind {
    /// Typename used as the cache-key prefix.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "Rule",
            Self::Policy => "Policy",
            Self::Detection => "Detection",
            Self::SavedQuery => "SavedQuery",
            Self::DataModel => "DataModel",
            Self::Destination => "Destination",
        }
    }

    /// Whether a reference of this kind can be stored in the cache as-is.
    #[must_use]
    pub const fn is_resolved(self) -> bool {
        !matches!(self, Self::Detection)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = CoreError;

    /// Accepts the typename as well as `snake_case` / `kebab-case` spellings.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized: String = s
            .chars()
            .filter(|c| *c != '_' && *c != '-')
            .collect::<String>()
            .to_ascii_lowercase();
        match normalized.as_str() {
            "rule" => Ok(Self::Rule),
            "policy" => Ok(Self::Policy),
            "detection" => Ok(Self::Detection),
            "savedquery" => Ok(Self::SavedQuery),
            "datamodel" => Ok(Self::DataModel),
            "destination" => Ok(Self::Destination),
            _ => Err(CoreError::UnknownKind(s.to_string())),
        }
    }
}

// ---------------------------------------------------------------------------
// AnalysisType
// ---------------------------------------------------------------------------

/// Discriminant carried by detection records (`analysisType`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AnalysisType {
    Rule,
    Policy,
}

impl AnalysisType {
    /// The concrete entity kind this discriminant selects.
    #[must_use]
    pub const fn entity_kind(self) -> EntityKind {
        match self {
            Self::Rule => EntityKind::Rule,
            Self::Policy => EntityKind::Policy,
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Rule => "RULE",
            Self::Policy => "POLICY",
        }
    }
}

impl fmt::Display for AnalysisType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// Severity
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Severity {
    Info,
    Low,
    Medium,
    High,
    Critical,
}

impl Severity {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Info => "INFO",
            Self::Low => "LOW",
            Self::Medium => "MEDIUM",
            Self::High => "HIGH",
            Self::Critical => "CRITICAL",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ---------------------------------------------------------------------------
// ComplianceStatus
// ---------------------------------------------------------------------------

/// Last evaluation result of a policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ComplianceStatus {
    Pass,
    Fail,
    Error,
}

impl ComplianceStatus {
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "PASS",
            Self::Fail => "FAIL",
            Self::Error => "ERROR",
        }
    }
}

impl fmt::Display for ComplianceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    macro_rules! test_serde_roundtrip {
        ($name:ident, $ty:ty, $variant:expr, $expected:expr) => {
            #[test]
            fn $name() {
                let val: $ty = $variant;
                let json = serde_json::to_string(&val).unwrap();
                assert_eq!(json, format!("\"{}\"", $expected));
                let back: $ty = serde_json::from_str(&json).unwrap();
                assert_eq!(back, val);
            }
        };
    }

    test_serde_roundtrip!(kind_saved_query, EntityKind, EntityKind::SavedQuery, "SavedQuery");
    test_serde_roundtrip!(kind_data_model, EntityKind, EntityKind::DataModel, "DataModel");
    test_serde_roundtrip!(analysis_policy, AnalysisType, AnalysisType::Policy, "POLICY");
    test_serde_roundtrip!(severity_critical, Severity, Severity::Critical, "CRITICAL");
    test_serde_roundtrip!(compliance_error, ComplianceStatus, ComplianceStatus::Error, "ERROR");

    #[test]
    fn kind_parses_loose_spellings() {
        assert_eq!("rule".parse::<EntityKind>().unwrap(), EntityKind::Rule);
        assert_eq!("data_model".parse::<EntityKind>().unwrap(), EntityKind::DataModel);
        assert_eq!("saved-query".parse::<EntityKind>().unwrap(), EntityKind::SavedQuery);
        assert_eq!("Policy".parse::<EntityKind>().unwrap(), EntityKind::Policy);
    }

    #[test]
    fn kind_rejects_unknown_names() {
        let err = "alert".parse::<EntityKind>().unwrap_err();
        assert_eq!(err, CoreError::UnknownKind("alert".into()));
    }

    #[test]
    fn analysis_type_selects_concrete_kind() {
        assert_eq!(AnalysisType::Rule.entity_kind(), EntityKind::Rule);
        assert_eq!(AnalysisType::Policy.entity_kind(), EntityKind::Policy);
        assert!(!EntityKind::Detection.is_resolved());
    }

    #[test]
    fn display_matches_as_str() {
        assert_eq!(format!("{}", EntityKind::DataModel), "DataModel");
        assert_eq!(format!("{}", AnalysisType::Rule), "RULE");
        assert_eq!(format!("{}", Severity::Medium), "MEDIUM");
        assert_eq!(format!("{}", ComplianceStatus::Pass), "PASS");
    }
}
