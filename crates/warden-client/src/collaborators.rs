//! Seams the controller talks to: navigation, notifications, analytics.

use std::sync::{Mutex, PoisonError};

use serde::Serialize;
use serde_json::Value;

pub trait Navigator: Send + Sync {
    fn current_path(&self) -> String;
    fn navigate(&self, path: &str);
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum NotificationVariant {
    Success,
    Error,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Notification {
    pub variant: NotificationVariant,
    pub title: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

impl Notification {
    #[must_use]
    pub fn success(title: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Success,
            title: title.into(),
            description: None,
        }
    }

    #[must_use]
    pub fn error(title: impl Into<String>, description: impl Into<String>) -> Self {
        Self {
            variant: NotificationVariant::Error,
            title: title.into(),
            description: Some(description.into()),
        }
    }
}

pub trait Notifier: Send + Sync {
    fn notify(&self, notification: Notification);
}

/// Analytics sink. Errors are logged and dropped by the caller.
pub trait Analytics: Send + Sync {
    fn track(&self, event: &str, payload: &Value) -> anyhow::Result<()>;
}

// ── In-memory implementations ──────────────────────────────────────

/// Navigator holding the current path in memory.
#[derive(Debug, Default)]
pub struct MemoryNavigator {
    history: Mutex<Vec<String>>,
}

impl MemoryNavigator {
    #[must_use]
    pub fn at(path: impl Into<String>) -> Self {
        Self {
            history: Mutex::new(vec![path.into()]),
        }
    }

    /// Every path visited, starting with the initial one.
    pub fn history(&self) -> Vec<String> {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Navigator for MemoryNavigator {
    fn current_path(&self) -> String {
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .last()
            .cloned()
            .unwrap_or_else(|| "/".to_string())
    }

    fn navigate(&self, path: &str) {
        tracing::debug!(path, "navigating");
        self.history
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(path.to_string());
    }
}

/// Notifier that keeps every notification for later inspection.
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<Notification>>,
}

impl RecordingNotifier {
    pub fn notifications(&self) -> Vec<Notification> {
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Notifier for RecordingNotifier {
    fn notify(&self, notification: Notification) {
        match notification.variant {
            NotificationVariant::Success => tracing::info!(title = %notification.title, "notify"),
            NotificationVariant::Error => tracing::warn!(
                title = %notification.title,
                description = notification.description.as_deref().unwrap_or_default(),
                "notify"
            ),
        }
        self.sent
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(notification);
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrackedEvent {
    pub event: String,
    pub payload: Value,
}

/// Analytics sink that records events and emits them as tracing events.
#[derive(Debug, Default)]
pub struct RecordingAnalytics {
    events: Mutex<Vec<TrackedEvent>>,
}

impl RecordingAnalytics {
    pub fn events(&self) -> Vec<TrackedEvent> {
        self.events
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl Analytics for RecordingAnalytics {
    fn track(&self, event: &str, payload: &Value) -> anyhow::Result<()> {
        tracing::info!(target: "warden::analytics", event, %payload, "track");
        self.events
            .lock()
            .map_err(|_| anyhow::anyhow!("analytics buffer poisoned"))?
            .push(TrackedEvent {
                event: event.to_string(),
                payload: payload.clone(),
            });
        Ok(())
    }
}
