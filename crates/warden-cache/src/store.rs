//! The normalized cache: an arena of entities plus reference-holding root fields.
//!
//! Entities are stored once, keyed by their [`EntityRef`]. Root fields only
//! hold references, so deleting an entity means rewriting the fields that
//! point at it and then sweeping unreachable records (see [`crate::gc`]).

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use warden_core::entities::CachedEntity;
use warden_core::reference::Identify;
use warden_core::{CoreError, EntityKind, EntityRef};

use crate::error::CacheError;
use crate::field::{FieldSpec, FieldValue, Paging};
use crate::reconcile::{ReconcileReport, check, reconcile};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NormalizedCache {
    entities: BTreeMap<EntityRef, CachedEntity>,
    root: BTreeMap<String, FieldValue>,
}

/// Serializable form of a [`NormalizedCache`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct CacheSnapshot {
    #[serde(default)]
    pub entities: Vec<CachedEntity>,
    #[serde(default)]
    pub fields: BTreeMap<String, FieldValue>,
}

impl NormalizedCache {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace an entity record.
    pub fn write_entity(&mut self, entity: impl Into<CachedEntity>) -> EntityRef {
        let entity = entity.into();
        let reference = entity.reference();
        self.entities.insert(reference.clone(), entity);
        reference
    }

    /// Store entities and point a list field at them, in order.
    pub fn write_list<I>(&mut self, key: impl Into<String>, entities: I)
    where
        I: IntoIterator,
        I::Item: Into<CachedEntity>,
    {
        let refs: Vec<EntityRef> = entities
            .into_iter()
            .map(|entity| self.write_entity(entity))
            .collect();
        self.root.insert(key.into(), FieldValue::list(refs));
    }

    /// Store entities and point a page-wrapped list field at them.
    pub fn write_page<I>(&mut self, key: impl Into<String>, entities: I, paging: Option<Paging>)
    where
        I: IntoIterator,
        I::Item: Into<CachedEntity>,
    {
        let refs: Vec<EntityRef> = entities
            .into_iter()
            .map(|entity| self.write_entity(entity))
            .collect();
        self.root.insert(key.into(), FieldValue::page(refs, paging));
    }

    /// Store an entity (or nothing) as the currently viewed one.
    pub fn write_singleton(&mut self, key: impl Into<String>, entity: Option<impl Into<CachedEntity>>) {
        let reference = entity.map(|entity| self.write_entity(entity));
        self.root.insert(key.into(), FieldValue::singleton(reference));
    }

    /// Write a raw field value. Lists are deduplicated.
    pub fn set_field(&mut self, key: impl Into<String>, mut value: FieldValue) {
        value.normalize();
        self.root.insert(key.into(), value);
    }

    #[must_use]
    pub fn field(&self, key: &str) -> Option<&FieldValue> {
        self.root.get(key)
    }

    /// References held by a list or page field.
    #[must_use]
    pub fn list_refs(&self, key: &str) -> Option<&[EntityRef]> {
        match self.root.get(key)? {
            FieldValue::List { items } | FieldValue::Page { items, .. } => Some(items),
            FieldValue::Singleton { .. } => None,
        }
    }

    /// Entities of a list or page field, in order. Dangling references are skipped.
    #[must_use]
    pub fn list(&self, key: &str) -> Vec<&CachedEntity> {
        self.list_refs(key)
            .unwrap_or_default()
            .iter()
            .filter_map(|reference| self.entities.get(reference))
            .collect()
    }

    /// Reference held by a singleton field, `None` if absent or cleared.
    #[must_use]
    pub fn singleton(&self, key: &str) -> Option<&EntityRef> {
        match self.root.get(key)? {
            FieldValue::Singleton { item } => item.as_ref(),
            FieldValue::List { .. } | FieldValue::Page { .. } => None,
        }
    }

    #[must_use]
    pub fn get(&self, reference: &EntityRef) -> Option<&CachedEntity> {
        self.entities.get(reference)
    }

    #[must_use]
    pub fn contains(&self, reference: &EntityRef) -> bool {
        self.entities.contains_key(reference)
    }

    pub fn entity_refs(&self) -> impl Iterator<Item = &EntityRef> {
        self.entities.keys()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.entities.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entities.is_empty()
    }

    /// Narrow a bare detection id to the cached Rule or Policy carrying it.
    ///
    /// Fails with `InvalidReferenceKind` when neither or both are cached.
    pub fn resolve_detection(&self, id: &str) -> Result<EntityRef, CacheError> {
        let rule = EntityRef::new(EntityKind::Rule, id);
        let policy = EntityRef::new(EntityKind::Policy, id);
        match (self.contains(&rule), self.contains(&policy)) {
            (true, false) => Ok(rule),
            (false, true) => Ok(policy),
            _ => Err(CoreError::InvalidReferenceKind(EntityRef::new(EntityKind::Detection, id)).into()),
        }
    }

    /// Whether [`Self::reconcile`] would accept this deletion.
    pub fn check_deletion(&self, deleted: &[EntityRef], fields: &[FieldSpec]) -> Result<(), CacheError> {
        check(self, deleted, fields)
    }

    /// Apply a deletion to this cache. See [`crate::reconcile::reconcile`].
    pub fn reconcile(
        &mut self,
        deleted: &[EntityRef],
        fields: &[FieldSpec],
    ) -> Result<ReconcileReport, CacheError> {
        reconcile(self, deleted, fields)
    }

    #[must_use]
    pub fn snapshot(&self) -> CacheSnapshot {
        CacheSnapshot {
            entities: self.entities.values().cloned().collect(),
            fields: self.root.clone(),
        }
    }

    /// Rebuild a cache from a snapshot, rejecting unresolved detection references.
    pub fn from_snapshot(snapshot: CacheSnapshot) -> Result<Self, CacheError> {
        let mut cache = Self::new();
        for entity in snapshot.entities {
            cache.write_entity(entity);
        }
        for (key, value) in snapshot.fields {
            for reference in value.refs() {
                reference.ensure_resolved()?;
            }
            cache.set_field(key, value);
        }
        Ok(cache)
    }

    /// Parse a JSON snapshot document.
    pub fn from_json(json: &str) -> Result<Self, CacheError> {
        Self::from_snapshot(serde_json::from_str(json)?)
    }

    pub(crate) const fn root_mut(&mut self) -> &mut BTreeMap<String, FieldValue> {
        &mut self.root
    }

    pub(crate) const fn root(&self) -> &BTreeMap<String, FieldValue> {
        &self.root
    }

    pub(crate) const fn entities_mut(&mut self) -> &mut BTreeMap<EntityRef, CachedEntity> {
        &mut self.entities
    }
}
