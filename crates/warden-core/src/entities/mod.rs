//! Entity payloads held by the normalized cache.
//!
//! All structs derive `Serialize`, `Deserialize`, and `JsonSchema` and use the
//! API's `camelCase` field names, so cache snapshots can be fed straight from
//! query responses.

mod data_model;
mod destination;
mod detection;
mod saved_query;

pub use data_model::DataModel;
pub use destination::Destination;
pub use detection::{Detection, PolicySummary, RuleSummary};
pub use saved_query::SavedQuery;

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;
use crate::reference::{EntityRef, Identify};

/// A normalized record, tagged with its typename.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(tag = "__typename")]
pub enum CachedEntity {
    Rule(RuleSummary),
    Policy(PolicySummary),
    DataModel(DataModel),
    SavedQuery(SavedQuery),
    Destination(Destination),
}

impl CachedEntity {
    #[must_use]
    pub const fn kind(&self) -> EntityKind {
        match self {
            Self::Rule(_) => EntityKind::Rule,
            Self::Policy(_) => EntityKind::Policy,
            Self::DataModel(_) => EntityKind::DataModel,
            Self::SavedQuery(_) => EntityKind::SavedQuery,
            Self::Destination(_) => EntityKind::Destination,
        }
    }

    /// References held in relationship fields.
    ///
    /// Only detections point at other entities (their alert destinations).
    #[must_use]
    pub fn relations(&self) -> Vec<EntityRef> {
        let output_ids = match self {
            Self::Rule(rule) => rule.output_ids.as_slice(),
            Self::Policy(policy) => policy.output_ids.as_slice(),
            Self::DataModel(_) | Self::SavedQuery(_) | Self::Destination(_) => &[],
        };
        output_ids
            .iter()
            .map(|id| EntityRef::new(EntityKind::Destination, id.clone()))
            .collect()
    }

    fn as_identify(&self) -> &dyn Identify {
        match self {
            Self::Rule(rule) => rule,
            Self::Policy(policy) => policy,
            Self::DataModel(model) => model,
            Self::SavedQuery(query) => query,
            Self::Destination(destination) => destination,
        }
    }
}

impl Identify for CachedEntity {
    fn reference(&self) -> EntityRef {
        self.as_identify().reference()
    }

    fn display_name(&self) -> &str {
        self.as_identify().display_name()
    }

    fn entity_id(&self) -> &str {
        self.as_identify().entity_id()
    }
}

impl From<Detection> for CachedEntity {
    fn from(detection: Detection) -> Self {
        match detection {
            Detection::Rule(rule) => Self::Rule(rule),
            Detection::Policy(policy) => Self::Policy(policy),
        }
    }
}

impl From<RuleSummary> for CachedEntity {
    fn from(rule: RuleSummary) -> Self {
        Self::Rule(rule)
    }
}

impl From<PolicySummary> for CachedEntity {
    fn from(policy: PolicySummary) -> Self {
        Self::Policy(policy)
    }
}

impl From<DataModel> for CachedEntity {
    fn from(model: DataModel) -> Self {
        Self::DataModel(model)
    }
}

impl From<SavedQuery> for CachedEntity {
    fn from(query: SavedQuery) -> Self {
        Self::SavedQuery(query)
    }
}

impl From<Destination> for CachedEntity {
    fn from(destination: Destination) -> Self {
        Self::Destination(destination)
    }
}
