//! List-view paths the client navigates to after deleting the viewed entity.

use serde::{Deserialize, Serialize};

fn default_detections() -> String {
    "/detections/".into()
}

fn default_data_models() -> String {
    "/log-analysis/data-models/".into()
}

fn default_saved_queries() -> String {
    "/data-explorer/saved-queries/".into()
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct RoutesConfig {
    #[serde(default = "default_detections")]
    pub detections: String,

    #[serde(default = "default_data_models")]
    pub data_models: String,

    #[serde(default = "default_saved_queries")]
    pub saved_queries: String,
}

impl Default for RoutesConfig {
    fn default() -> Self {
        Self {
            detections: default_detections(),
            data_models: default_data_models(),
            saved_queries: default_saved_queries(),
        }
    }
}
