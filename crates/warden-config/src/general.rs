//! General client behaviour.

use serde::{Deserialize, Serialize};

/// How the current path is matched against deleted ids before redirecting.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RedirectMatch {
    /// A path segment must equal the deleted id.
    #[default]
    Segment,
    /// The path only has to contain the id anywhere.
    Substring,
}

const fn default_analytics_enabled() -> bool {
    true
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct GeneralConfig {
    #[serde(default)]
    pub redirect_match: RedirectMatch,

    /// Whether analytics events are forwarded to the sink.
    #[serde(default = "default_analytics_enabled")]
    pub analytics_enabled: bool,

    /// Artificial latency of the in-process transport, in milliseconds.
    #[serde(default)]
    pub transport_latency_ms: u64,
}

impl Default for GeneralConfig {
    fn default() -> Self {
        Self {
            redirect_match: RedirectMatch::default(),
            analytics_enabled: default_analytics_enabled(),
            transport_latency_ms: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_are_correct() {
        let config = GeneralConfig::default();
        assert_eq!(config.redirect_match, RedirectMatch::Segment);
        assert!(config.analytics_enabled);
        assert_eq!(config.transport_latency_ms, 0);
    }
}
