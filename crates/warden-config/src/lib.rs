//! # warden-config
//!
//! Layered configuration loading for Warden using figment.
//!
//! Configuration sources (in priority order, highest wins):
//! 1. Environment variables (`WARDEN_*` prefix, `__` as separator)
//! 2. Project-level `.warden/config.toml`
//! 3. User-level `~/.config/warden/config.toml`
//! 4. Built-in defaults
//!
//! Figment maps `WARDEN_API__URL` -> `api.url`,
//! `WARDEN_GENERAL__REDIRECT_MATCH` -> `general.redirect_match`, etc.
//!
//! # Usage
//!
//! ```no_run
//! use warden_config::WardenConfig;
//!
//! let config = WardenConfig::load_with_dotenv().expect("config");
//! if config.api.is_configured() {
//!     println!("API endpoint: {}", config.api.url);
//! }
//! ```

mod api;
mod error;
mod general;
mod routes;

pub use api::ApiConfig;
pub use error::ConfigError;
pub use general::{GeneralConfig, RedirectMatch};
pub use routes::RoutesConfig;

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct WardenConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub routes: RoutesConfig,
    #[serde(default)]
    pub general: GeneralConfig,
}

impl WardenConfig {
    /// Load configuration from TOML files and environment variables.
    ///
    /// Does NOT call `dotenvy`; use [`WardenConfig::load_with_dotenv`] for `.env` loading.
    pub fn load() -> Result<Self, ConfigError> {
        let config: Self = Self::figment().extract()?;
        config.validate()?;
        Ok(config)
    }

    /// Load configuration after reading `.env` from the workspace root.
    pub fn load_with_dotenv() -> Result<Self, ConfigError> {
        Self::load_dotenv_from_workspace();
        Self::load()
    }

    /// Build the figment provider chain.
    ///
    /// Public so tests can inspect the figment or layer extra providers.
    pub fn figment() -> Figment {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        // Layer 1: User-global config
        if let Some(global_path) = Self::global_config_path() {
            if global_path.exists() {
                figment = figment.merge(Toml::file(global_path));
            }
        }

        // Layer 2: Project-local config
        let local_path = PathBuf::from(".warden/config.toml");
        if local_path.exists() {
            figment = figment.merge(Toml::file(local_path));
        }

        // Layer 3: Environment variables (highest priority)
        figment.merge(Env::prefixed("WARDEN_").split("__"))
    }

    /// Reject values that would make navigation or the transport misbehave.
    pub fn validate(&self) -> Result<(), ConfigError> {
        for (field, path) in [
            ("routes.detections", &self.routes.detections),
            ("routes.data_models", &self.routes.data_models),
            ("routes.saved_queries", &self.routes.saved_queries),
        ] {
            if !path.starts_with('/') {
                return Err(ConfigError::InvalidValue {
                    field: field.into(),
                    reason: format!("'{path}' must be an absolute path"),
                });
            }
        }
        if self.api.timeout_secs == 0 {
            return Err(ConfigError::InvalidValue {
                field: "api.timeout_secs".into(),
                reason: "must be greater than zero".into(),
            });
        }
        Ok(())
    }

    fn global_config_path() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("warden").join("config.toml"))
    }

    /// Walk up from `CARGO_MANIFEST_DIR` (or fall back to the current dir)
    /// looking for `.env`. Silently does nothing if none is found.
    fn load_dotenv_from_workspace() {
        if let Ok(manifest_dir) = std::env::var("CARGO_MANIFEST_DIR") {
            let mut dir = PathBuf::from(manifest_dir);
            // crate -> crates/ -> workspace root
            for _ in 0..3 {
                let env_path = dir.join(".env");
                if env_path.exists() {
                    let _ = dotenvy::from_path(&env_path);
                    return;
                }
                if !dir.pop() {
                    break;
                }
            }
        }

        let _ = dotenvy::dotenv();
    }
}
