//! Remote GraphQL API configuration.

use serde::{Deserialize, Serialize};

use crate::ConfigError;

/// Default request timeout in seconds.
const fn default_timeout_secs() -> u64 {
    30
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ApiConfig {
    /// GraphQL endpoint (e.g., `https://api.example.com/v1/public/graphql`).
    #[serde(default)]
    pub url: String,

    /// Bearer token sent with every mutation.
    #[serde(default)]
    pub token: String,

    /// Transport-level timeout for one mutation round trip.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            url: String::new(),
            token: String::new(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

impl ApiConfig {
    /// Whether the endpoint and credentials are both present.
    #[must_use]
    pub const fn is_configured(&self) -> bool {
        !self.url.is_empty() && !self.token.is_empty()
    }

    /// Return `self` if configured, else `ConfigError::NotConfigured`.
    pub fn require(&self) -> Result<&Self, ConfigError> {
        if self.is_configured() {
            Ok(self)
        } else {
            Err(ConfigError::NotConfigured {
                section: "api".into(),
            })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_not_configured() {
        let config = ApiConfig::default();
        assert!(!config.is_configured());
        assert_eq!(config.timeout_secs, 30);
        assert!(config.require().is_err());
    }

    #[test]
    fn url_without_token_is_not_configured() {
        let config = ApiConfig {
            url: "https://api.example.com/graphql".into(),
            ..ApiConfig::default()
        };
        assert!(!config.is_configured());
    }
}
