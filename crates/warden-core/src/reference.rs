//! Canonical `(kind, id)` identity for cached entities.

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CoreError;
use crate::kind::{AnalysisType, EntityKind};

/// A reference to a cached entity without its data.
///
/// Equality, ordering and hashing are structural over `kind` then `id`.
#[derive(
    Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, JsonSchema,
)]
pub struct EntityRef {
    pub kind: EntityKind,
    pub id: String,
}

impl EntityRef {
    #[must_use]
    pub fn new(kind: EntityKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    #[must_use]
    pub fn rule(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Rule, id)
    }

    #[must_use]
    pub fn policy(id: impl Into<String>) -> Self {
        Self::new(EntityKind::Policy, id)
    }

    /// Cache key in `Kind:id` form, e.g. `Rule:AWS.CloudTrail.Stopped`.
    #[must_use]
    pub fn cache_key(&self) -> String {
        format!("{}:{}", self.kind, self.id)
    }

    /// Narrow a `Detection` reference to `Rule` or `Policy`.
    ///
    /// Already-resolved references are returned unchanged, so callers can
    /// resolve unconditionally at their boundary.
    #[must_use]
    pub fn resolve(self, analysis_type: AnalysisType) -> Self {
        if self.kind == EntityKind::Detection {
            Self::new(analysis_type.entity_kind(), self.id)
        } else {
            self
        }
    }

    /// Fail with `InvalidReferenceKind` if this is an unresolved detection.
    pub fn ensure_resolved(&self) -> Result<(), CoreError> {
        if self.kind.is_resolved() {
            Ok(())
        } else {
            Err(CoreError::InvalidReferenceKind(self.clone()))
        }
    }
}

impl fmt::Display for EntityRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

impl FromStr for EntityRef {
    type Err = CoreError;

    /// Parse a `Kind:id` cache key. Ids may themselves contain `:`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (kind, id) = s
            .split_once(':')
            .ok_or_else(|| CoreError::UnknownKind(s.to_string()))?;
        Ok(Self::new(kind.parse()?, id))
    }
}

/// Anything that can be identified and rendered by name.
pub trait Identify {
    /// The cache reference of this entity.
    fn reference(&self) -> EntityRef;

    /// Raw display name as stored; may be empty.
    fn display_name(&self) -> &str;

    /// The identifier part of [`Identify::reference`].
    fn entity_id(&self) -> &str;

    /// Name to render: the display name, or the id when the name is empty.
    fn label(&self) -> &str {
        display_name_or_id(self.display_name(), self.entity_id())
    }
}

/// Display-name fallback used everywhere an entity is rendered.
#[must_use]
pub fn display_name_or_id<'a>(display_name: &'a str, id: &'a str) -> &'a str {
    if display_name.is_empty() {
        id
    } else {
        display_name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn equality_is_kind_and_id() {
        assert_eq!(EntityRef::rule("R1"), EntityRef::rule("R1"));
        assert_ne!(EntityRef::rule("R1"), EntityRef::policy("R1"));
        assert_ne!(EntityRef::rule("R1"), EntityRef::rule("R2"));
    }

    #[test]
    fn cache_key_roundtrips_through_from_str() {
        let reference = EntityRef::new(EntityKind::SavedQuery, "q:with:colons");
        assert_eq!(reference.cache_key(), "SavedQuery:q:with:colons");
        let parsed: EntityRef = reference.cache_key().parse().unwrap();
        assert_eq!(parsed, reference);
    }

    #[test]
    fn resolve_narrows_only_detections() {
        let unresolved = EntityRef::new(EntityKind::Detection, "D1");
        assert!(unresolved.ensure_resolved().is_err());
        assert_eq!(
            unresolved.resolve(AnalysisType::Policy),
            EntityRef::policy("D1")
        );
        assert_eq!(
            EntityRef::rule("R1").resolve(AnalysisType::Policy),
            EntityRef::rule("R1")
        );
    }

    #[test]
    fn empty_display_name_falls_back_to_id() {
        assert_eq!(display_name_or_id("", "AWS.Root.Login"), "AWS.Root.Login");
        assert_eq!(display_name_or_id("Root Login", "AWS.Root.Login"), "Root Login");
    }
}
