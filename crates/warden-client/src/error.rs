//! Client error types and user-facing message extraction.

use thiserror::Error;
use warden_cache::CacheError;
use warden_config::ConfigError;
use warden_core::{CoreError, EntityKind};

/// Shown when an error carries no readable message.
pub const UNKNOWN_ERROR_MESSAGE: &str = "An unknown error occurred";

/// Failures of one mutation round trip.
#[derive(Debug, Error)]
pub enum TransportError {
    /// The API answered with GraphQL errors.
    #[error("GraphQL error: {}", messages.join("; "))]
    GraphQl { messages: Vec<String> },

    /// HTTP transport error.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The API returned a non-success status code.
    #[error("API error ({status}): {message}")]
    Status { status: u16, message: String },

    /// The mutation returned `false` instead of the success marker.
    #[error("The server did not confirm the deletion")]
    Rejected,

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Parse(String),
}

impl TransportError {
    /// Human-readable message for notifications. Raw error values are never shown.
    #[must_use]
    pub fn user_message(&self) -> String {
        extract_error_message(self)
    }
}

/// First GraphQL error message, else the status message, else a fallback.
#[must_use]
pub fn extract_error_message(error: &TransportError) -> String {
    let message = match error {
        TransportError::GraphQl { messages } => messages.iter().find(|m| !m.trim().is_empty()).cloned(),
        TransportError::Status { message, .. } => Some(message.clone()),
        TransportError::Http(error) => Some(error.to_string()),
        TransportError::Rejected => Some(TransportError::Rejected.to_string()),
        TransportError::Parse(_) => None,
    };
    message
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_ERROR_MESSAGE.to_string())
}

/// Errors returned by the delete controller.
///
/// Transport failures are not here: they end in a rolled-back outcome.
#[derive(Debug, Error)]
pub enum ClientError {
    /// The kind has no delete mutation (e.g. destinations).
    #[error("Entities of kind {0} cannot be deleted from this client")]
    NotDeletable(EntityKind),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Building the HTTP transport failed.
    #[error("Failed to build transport: {0}")]
    Transport(#[from] TransportError),
}
