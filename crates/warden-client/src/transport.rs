//! Mutation transports.
//!
//! [`GraphQlTransport`] posts to the configured API; [`LocalTransport`]
//! answers in-process with a scripted outcome and is used by the CLI and tests.

use std::future::Future;
use std::sync::{Mutex, PoisonError};
use std::time::Duration;

use serde_json::Value;
use warden_config::ApiConfig;

use crate::error::{ClientError, TransportError};
use crate::mutation::{DeleteMutation, DeleteRequest};

/// Sends one batched delete and reports whether the server confirmed it.
pub trait MutationTransport: Send + Sync {
    fn send(
        &self,
        request: &DeleteRequest,
    ) -> impl Future<Output = Result<bool, TransportError>> + Send;
}

// ── GraphQL over HTTP ──────────────────────────────────────────────

pub struct GraphQlTransport {
    http: reqwest::Client,
    url: String,
    token: String,
}

impl GraphQlTransport {
    /// Build a transport from the `api` config section.
    ///
    /// Fails with `ConfigError::NotConfigured` when the url or token is missing.
    pub fn from_config(config: &ApiConfig) -> Result<Self, ClientError> {
        let config = config.require()?;
        let http = reqwest::Client::builder()
            .user_agent(concat!("warden/", env!("CARGO_PKG_VERSION")))
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(TransportError::from)?;
        Ok(Self {
            http,
            url: config.url.clone(),
            token: config.token.clone(),
        })
    }
}

impl MutationTransport for GraphQlTransport {
    async fn send(&self, request: &DeleteRequest) -> Result<bool, TransportError> {
        tracing::debug!(
            operation = request.mutation.operation_name(),
            ids = request.ids.len(),
            "posting delete mutation"
        );
        let resp = self
            .http
            .post(&self.url)
            .bearer_auth(&self.token)
            .json(&request.body())
            .send()
            .await?;

        let status = resp.status();
        let text = resp.text().await?;
        if !status.is_success() {
            // GraphQL servers often put the real reason in an errors array.
            let messages = serde_json::from_str::<Value>(&text)
                .ok()
                .and_then(|body| graphql_errors(&body));
            if let Some(messages) = messages {
                return Err(TransportError::GraphQl { messages });
            }
            return Err(TransportError::Status {
                status: status.as_u16(),
                message: text,
            });
        }

        let body: Value =
            serde_json::from_str(&text).map_err(|e| TransportError::Parse(e.to_string()))?;
        parse_response(request.mutation, &body)
    }
}

/// Interpret a GraphQL response body for `mutation`.
///
/// A non-empty `errors` array wins over any `data`.
pub fn parse_response(mutation: DeleteMutation, body: &Value) -> Result<bool, TransportError> {
    if let Some(messages) = graphql_errors(body) {
        return Err(TransportError::GraphQl { messages });
    }
    body.get("data")
        .and_then(|data| data.get(mutation.field_name()))
        .and_then(Value::as_bool)
        .ok_or_else(|| {
            TransportError::Parse(format!("missing boolean data.{}", mutation.field_name()))
        })
}

fn graphql_errors(body: &Value) -> Option<Vec<String>> {
    let errors = body.get("errors")?.as_array()?;
    if errors.is_empty() {
        return None;
    }
    Some(
        errors
            .iter()
            .filter_map(|e| e.get("message").and_then(Value::as_str))
            .map(str::to_string)
            .collect(),
    )
}

// ── In-process ─────────────────────────────────────────────────────

/// Scripted answer of a [`LocalTransport`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LocalOutcome {
    /// Answer `true`.
    Confirm,
    /// Answer `false`.
    Reject,
    /// Answer with a GraphQL error carrying this message.
    Fail(String),
}

/// In-process transport that records every request it receives.
#[derive(Debug)]
pub struct LocalTransport {
    outcome: LocalOutcome,
    latency: Duration,
    sent: Mutex<Vec<DeleteRequest>>,
}

impl LocalTransport {
    #[must_use]
    pub const fn new(outcome: LocalOutcome) -> Self {
        Self {
            outcome,
            latency: Duration::ZERO,
            sent: Mutex::new(Vec::new()),
        }
    }

    #[must_use]
    pub const fn confirming() -> Self {
        Self::new(LocalOutcome::Confirm)
    }

    #[must_use]
    pub fn failing(message: impl Into<String>) -> Self {
        Self::new(LocalOutcome::Fail(message.into()))
    }

    /// Delay every answer by `latency`.
    #[must_use]
    pub const fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<DeleteRequest> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl MutationTransport for LocalTransport {
    async fn send(&self, request: &DeleteRequest) -> Result<bool, TransportError> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());
        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }
        match &self.outcome {
            LocalOutcome::Confirm => Ok(true),
            LocalOutcome::Reject => Ok(false),
            LocalOutcome::Fail(message) => Err(TransportError::GraphQl {
                messages: vec![message.clone()],
            }),
        }
    }
}
