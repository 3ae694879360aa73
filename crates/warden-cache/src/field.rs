//! Root fields of the normalized cache and the specs that select them.
//!
//! A root field is stored under a key made of its name plus optional
//! arguments, e.g. `detections` or `detections({"page":2})`. A [`FieldSpec`]
//! names only the base name, so it matches every argument variant.

use serde::{Deserialize, Serialize};
use warden_core::{EntityKind, EntityRef};

/// Paging metadata carried by page-wrapped lists.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paging {
    pub total_items: usize,
    pub total_pages: usize,
    pub this_page: usize,
}

/// Value held by a root field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldValue {
    /// An ordered list of references.
    List { items: Vec<EntityRef> },
    /// A list wrapped with paging metadata.
    Page {
        items: Vec<EntityRef>,
        #[serde(default)]
        paging: Option<Paging>,
    },
    /// The currently viewed entity of one kind, if any.
    Singleton { item: Option<EntityRef> },
}

impl FieldValue {
    /// Build a list, dropping duplicate references (first occurrence wins).
    #[must_use]
    pub fn list(items: impl IntoIterator<Item = EntityRef>) -> Self {
        Self::List {
            items: dedupe(items),
        }
    }

    #[must_use]
    pub fn page(items: impl IntoIterator<Item = EntityRef>, paging: Option<Paging>) -> Self {
        Self::Page {
            items: dedupe(items),
            paging,
        }
    }

    #[must_use]
    pub const fn singleton(item: Option<EntityRef>) -> Self {
        Self::Singleton { item }
    }

    /// Every reference held by this field.
    #[must_use]
    pub fn refs(&self) -> &[EntityRef] {
        match self {
            Self::List { items } | Self::Page { items, .. } => items,
            Self::Singleton { item } => item.as_slice(),
        }
    }

    /// Restore the no-duplicates invariant after a raw write.
    pub(crate) fn normalize(&mut self) {
        if let Self::List { items } | Self::Page { items, .. } = self {
            *items = dedupe(std::mem::take(items));
        }
    }

    pub(crate) const fn shape(&self) -> &'static str {
        match self {
            Self::List { .. } | Self::Page { .. } => "list",
            Self::Singleton { .. } => "singleton",
        }
    }
}

/// A root field affected by a deletion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldSpec {
    /// A list or page field; deleted references are filtered out of it.
    List { name: String },
    /// A singleton holding entities of `kind`; cleared if its entity is deleted.
    Singleton { name: String, kind: EntityKind },
}

impl FieldSpec {
    #[must_use]
    pub fn list(name: impl Into<String>) -> Self {
        Self::List { name: name.into() }
    }

    #[must_use]
    pub fn singleton(name: impl Into<String>, kind: EntityKind) -> Self {
        Self::Singleton {
            name: name.into(),
            kind,
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        match self {
            Self::List { name } | Self::Singleton { name, .. } => name,
        }
    }

    /// Whether a stored field key is a variant of this field.
    #[must_use]
    pub fn matches(&self, key: &str) -> bool {
        base_name(key) == self.name()
    }

    pub(crate) const fn shape(&self) -> &'static str {
        match self {
            Self::List { .. } => "list",
            Self::Singleton { .. } => "singleton",
        }
    }
}

/// Field name without its argument suffix.
#[must_use]
pub fn base_name(key: &str) -> &str {
    key.split_once('(').map_or(key, |(name, _)| name)
}

fn dedupe(items: impl IntoIterator<Item = EntityRef>) -> Vec<EntityRef> {
    let mut seen = std::collections::HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn list_drops_duplicates_keeping_first() {
        let field = FieldValue::list([
            EntityRef::rule("R1"),
            EntityRef::rule("R2"),
            EntityRef::rule("R1"),
        ]);
        assert_eq!(field.refs(), &[EntityRef::rule("R1"), EntityRef::rule("R2")]);
    }

    #[test]
    fn spec_matches_argument_variants() {
        let spec = FieldSpec::list("detections");
        assert!(spec.matches("detections"));
        assert!(spec.matches(r#"detections({"input":{"page":2}})"#));
        assert!(!spec.matches("detectionsCount"));
        assert!(!spec.matches("listDataModels"));
    }

    #[test]
    fn empty_singleton_has_no_refs() {
        assert!(FieldValue::singleton(None).refs().is_empty());
    }

    #[test]
    fn field_value_is_tagged_in_json() {
        let value = serde_json::to_value(FieldValue::singleton(Some(EntityRef::rule("R1")))).unwrap();
        assert_eq!(value["type"], "singleton");
        assert_eq!(value["item"]["kind"], "Rule");
    }
}
