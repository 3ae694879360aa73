use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::kind::EntityKind;
use crate::reference::{EntityRef, Identify};

/// An alert destination. Only reachable through detections' `outputIds`.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Destination {
    pub output_id: String,
    #[serde(default)]
    pub display_name: String,
    pub output_type: String,
}

impl Identify for Destination {
    fn reference(&self) -> EntityRef {
        EntityRef::new(EntityKind::Destination, self.output_id.clone())
    }

    fn display_name(&self) -> &str {
        &self.display_name
    }

    fn entity_id(&self) -> &str {
        &self.output_id
    }
}
