use chrono::{DateTime, Utc};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;
use crate::reference::{EntityRef, Identify};

/// A normalization layer mapping log-type fields to common names.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct DataModel {
    pub id: String,
    #[serde(default)]
    pub display_name: String,
    pub enabled: bool,
    #[serde(default)]
    pub log_types: Vec<String>,
    #[serde(default)]
    pub last_modified: Option<DateTime<Utc>>,
}

impl Identify for DataModel {
    fn reference(&self) -> EntityRef {
        EntityRef::new(EntityKind::DataModel, self.id.clone())
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn entity_id(&self) -> &str {
        &self.id
    }
}
