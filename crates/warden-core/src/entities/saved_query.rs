use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;
use crate::reference::{EntityRef, Identify};

/// A named SQL query kept for the data explorer. Its `name` is its display name.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct SavedQuery {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub sql_query: String,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Identify for SavedQuery {
    fn reference(&self) -> EntityRef {
        EntityRef::new(EntityKind::SavedQuery, self.id.clone())
    }

    fn display_name(&self) -> &str {
        &self.name
    }

    fn entity_id(&self) -> &str {
        &self.id
    }
}
