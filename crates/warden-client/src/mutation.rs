//! Delete mutation families.
//!
//! Each deletable kind maps to exactly one backend mutation. A family knows its
//! GraphQL document, the input key its ids are batched under, the cache fields
//! it rewrites on success, and where its list view lives.

use std::fmt;

use serde::Serialize;
use serde_json::{Value, json};
use warden_cache::FieldSpec;
use warden_config::RoutesConfig;
use warden_core::copy::Noun;
use warden_core::{CoreError, EntityKind, EntityRef};

use crate::error::ClientError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum DeleteMutation {
    Detections,
    DataModels,
    SavedQueries,
}

impl DeleteMutation {
    /// The family deleting entities of `kind`, if any.
    #[must_use]
    pub const fn for_kind(kind: EntityKind) -> Option<Self> {
        match kind {
            EntityKind::Rule | EntityKind::Policy | EntityKind::Detection => Some(Self::Detections),
            EntityKind::DataModel => Some(Self::DataModels),
            EntityKind::SavedQuery => Some(Self::SavedQueries),
            EntityKind::Destination => None,
        }
    }

    /// The single family shared by all `references`.
    pub fn for_references(references: &[EntityRef]) -> Result<Self, ClientError> {
        let mut family: Option<Self> = None;
        for reference in references {
            let next =
                Self::for_kind(reference.kind).ok_or(ClientError::NotDeletable(reference.kind))?;
            match family {
                Some(current) if current != next => {
                    return Err(CoreError::MixedMutationFamilies {
                        first: current.to_string(),
                        second: next.to_string(),
                    }
                    .into());
                }
                _ => family = Some(next),
            }
        }
        family.ok_or_else(|| CoreError::EmptyReferenceSet.into())
    }

    #[must_use]
    pub const fn operation_name(self) -> &'static str {
        match self {
            Self::Detections => "DeleteDetections",
            Self::DataModels => "DeleteDataModel",
            Self::SavedQueries => "DeleteSavedQueries",
        }
    }

    /// Root mutation field whose boolean result marks success.
    #[must_use]
    pub const fn field_name(self) -> &'static str {
        match self {
            Self::Detections => "deleteDetections",
            Self::DataModels => "deleteDataModel",
            Self::SavedQueries => "deleteSavedQueries",
        }
    }

    #[must_use]
    pub const fn input_type(self) -> &'static str {
        match self {
            Self::Detections => "DeleteDetectionInput",
            Self::DataModels => "DeleteDataModelInput",
            Self::SavedQueries => "DeleteSavedQueriesInput",
        }
    }

    /// Key of the id batch inside `input`.
    #[must_use]
    pub const fn input_key(self) -> &'static str {
        match self {
            Self::Detections => "detections",
            Self::DataModels => "dataModels",
            Self::SavedQueries => "savedQueries",
        }
    }

    /// The GraphQL mutation document.
    #[must_use]
    pub fn document(self) -> String {
        format!(
            "mutation {op}($input: {input}!) {{ {field}(input: $input) }}",
            op = self.operation_name(),
            input = self.input_type(),
            field = self.field_name(),
        )
    }

    /// Root fields rewritten when a delete of this family succeeds.
    #[must_use]
    pub fn affected_fields(self) -> Vec<FieldSpec> {
        match self {
            Self::Detections => vec![
                FieldSpec::list("detections"),
                FieldSpec::singleton("rule", EntityKind::Rule),
                FieldSpec::singleton("policy", EntityKind::Policy),
            ],
            Self::DataModels => vec![
                FieldSpec::list("listDataModels"),
                FieldSpec::singleton("getDataModel", EntityKind::DataModel),
            ],
            Self::SavedQueries => vec![FieldSpec::list("listSavedQueries")],
        }
    }

    /// Whether the UI hides entities before the server answers.
    ///
    /// Data model deletes wait for the server.
    #[must_use]
    pub const fn is_optimistic(self) -> bool {
        !matches!(self, Self::DataModels)
    }

    #[must_use]
    pub const fn noun(self) -> Noun {
        match self {
            Self::Detections => Noun::DETECTION,
            Self::DataModels => Noun::DATA_MODEL,
            Self::SavedQueries => Noun::SAVED_QUERY,
        }
    }

    #[must_use]
    pub fn list_path(self, routes: &RoutesConfig) -> &str {
        match self {
            Self::Detections => &routes.detections,
            Self::DataModels => &routes.data_models,
            Self::SavedQueries => &routes.saved_queries,
        }
    }

    #[must_use]
    pub const fn completed_event(self) -> &'static str {
        match self {
            Self::Detections => "deleted_detections",
            Self::DataModels => "deleted_data_model",
            Self::SavedQueries => "deleted_saved_queries",
        }
    }

    #[must_use]
    pub const fn failed_event(self) -> &'static str {
        match self {
            Self::Detections => "failed_to_delete_detections",
            Self::DataModels => "failed_to_delete_data_model",
            Self::SavedQueries => "failed_to_delete_saved_queries",
        }
    }
}

impl fmt::Display for DeleteMutation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.noun().plural)
    }
}

/// One batched delete request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DeleteRequest {
    pub mutation: DeleteMutation,
    pub ids: Vec<String>,
}

impl DeleteRequest {
    #[must_use]
    pub fn new(mutation: DeleteMutation, references: &[EntityRef]) -> Self {
        Self {
            mutation,
            ids: references.iter().map(|r| r.id.clone()).collect(),
        }
    }

    /// GraphQL variables: `{ "input": { "<key>": [{ "id": .. }, ..] } }`.
    #[must_use]
    pub fn variables(&self) -> Value {
        let ids: Vec<Value> = self.ids.iter().map(|id| json!({ "id": id })).collect();
        let mut input = serde_json::Map::new();
        input.insert(self.mutation.input_key().to_string(), Value::Array(ids));
        json!({ "input": input })
    }

    /// Full request body posted to the GraphQL endpoint.
    #[must_use]
    pub fn body(&self) -> Value {
        json!({
            "operationName": self.mutation.operation_name(),
            "query": self.mutation.document(),
            "variables": self.variables(),
        })
    }
}
