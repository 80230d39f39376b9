//! # Console configuration: `console.toml`
//!
//! The console needs one mandatory setting, the base URL of the admin
//! backend, and allows the two session storage keys to be renamed.
//!
//! ## Structure
//!
//! ```toml
//! [api]
//! base_url = "https://api.example.com"   # required, no default
//!
//! [session]
//! token_key = "admin_token"
//! admin_key = "admin_info"
//! ```
//!
//! ## Sources
//!
//! [`ConsoleConfig::load`] resolves the settings in this order:
//!
//! | Source | Native | `wasm32` |
//! |--------|--------|----------|
//! | `ADMIN_API_BASE_URL` | process env at runtime, `.env` loaded via `dotenvy` | baked in at compile time |
//! | `console.toml` | read from the working directory when present | not available |
//!
//! The environment variable wins over the file. A configuration without a
//! base URL still loads; [`ConsoleConfig::base_url`] reports
//! [`ConfigError::MissingBaseUrl`] so the app can show a configuration error
//! instead of the login page.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::keys::SessionKeys;

pub const BASE_URL_ENV: &str = "ADMIN_API_BASE_URL";

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("no admin API base URL configured; set ADMIN_API_BASE_URL or [api] base_url in console.toml")]
    MissingBaseUrl,

    #[error("invalid console.toml: {0}")]
    Parse(String),

    #[error("could not read console.toml: {0}")]
    Io(String),
}

/// Top-level configuration stored in `console.toml`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ConsoleConfig {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub session: SessionConfig,
}

#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct ApiConfig {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
}

/// localStorage / file names for the persisted session.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct SessionConfig {
    #[serde(default = "default_token_key")]
    pub token_key: String,
    #[serde(default = "default_admin_key")]
    pub admin_key: String,
}

fn default_token_key() -> String {
    SessionKeys::default().token
}

fn default_admin_key() -> String {
    SessionKeys::default().admin
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            token_key: default_token_key(),
            admin_key: default_admin_key(),
        }
    }
}

impl ConsoleConfig {
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.api.base_url = Some(url.into());
        self
    }

    /// The well-known filename for the config file.
    pub fn filename() -> &'static str {
        "console.toml"
    }

    pub fn from_toml(s: &str) -> Result<Self, ConfigError> {
        toml::from_str(s).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(|e| ConfigError::Parse(e.to_string()))
    }

    /// The configured backend URL without a trailing slash.
    pub fn base_url(&self) -> Result<&str, ConfigError> {
        self.api
            .base_url
            .as_deref()
            .map(|url| url.trim().trim_end_matches('/'))
            .filter(|url| !url.is_empty())
            .ok_or(ConfigError::MissingBaseUrl)
    }

    pub fn session_keys(&self) -> SessionKeys {
        SessionKeys::from(&self.session)
    }

    /// Let a non-blank environment value replace the file's base URL.
    pub fn override_base_url(mut self, env_value: Option<String>) -> Self {
        if let Some(url) = env_value.filter(|v| !v.trim().is_empty()) {
            self.api.base_url = Some(url);
        }
        self
    }

    /// Resolve the configuration for the running target.
    #[cfg(not(target_arch = "wasm32"))]
    pub fn load() -> Result<Self, ConfigError> {
        if let Err(e) = dotenvy::dotenv() {
            if !e.not_found() {
                tracing::warn!("ignoring unreadable .env: {e}");
            }
        }
        let file = match std::fs::read_to_string(Self::filename()) {
            Ok(raw) => Self::from_toml(&raw)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Self::default(),
            Err(e) => return Err(ConfigError::Io(e.to_string())),
        };
        Ok(file.override_base_url(std::env::var(BASE_URL_ENV).ok()))
    }

    /// Resolve the configuration for the running target.
    #[cfg(target_arch = "wasm32")]
    pub fn load() -> Result<Self, ConfigError> {
        Ok(Self::default().override_base_url(option_env!("ADMIN_API_BASE_URL").map(str::to_string)))
    }
}
