//! Store configuration for the snapshot renderer.
//!
//! Configuration comes from a TOML file or from `SHOPSNAP_*` environment
//! variables. It is read once at startup and treated as read-only for the
//! lifetime of the process; nothing in the request path mutates it.
//!
//! ## Example configuration file
//!
//! ```toml
//! store_id = 12345
//! token = "public_abcdef123456"
//! base_url = "https://shop.example/"
//!
//! # Optional overrides
//! api_endpoint = "https://app.ecwid.com/api/v3"
//! timeout_seconds = 90
//! ```

use crate::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Production catalog API endpoint used when no override is configured.
pub const DEFAULT_API_ENDPOINT: &str = "https://app.ecwid.com/api/v3";

const DEFAULT_TIMEOUT_SECONDS: u64 = 90;

/// Connection settings for one store.
///
/// `api_endpoint` is overridable so tests can point the client at a mock
/// server; everything else identifies the store and how its public pages
/// are addressed.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Numeric store identifier, part of every API path.
    pub store_id: u64,
    /// Public or secret access token of the registered app.
    pub token: String,
    /// Base URL of the storefront page that hosts the SPA; resolved entity
    /// URLs and the canonical URL are derived from it.
    pub base_url: String,
    /// Catalog API endpoint, without a trailing slash.
    #[serde(default = "default_api_endpoint")]
    pub api_endpoint: String,
    /// Per-request timeout handed to the HTTP transport.
    #[serde(default = "default_timeout_seconds")]
    pub timeout_seconds: u64,
}

fn default_api_endpoint() -> String {
    DEFAULT_API_ENDPOINT.to_string()
}

const fn default_timeout_seconds() -> u64 {
    DEFAULT_TIMEOUT_SECONDS
}

impl StoreConfig {
    /// Create a configuration with default endpoint and timeout.
    pub fn new(store_id: u64, token: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            store_id,
            token: token.into(),
            base_url: base_url.into(),
            api_endpoint: default_api_endpoint(),
            timeout_seconds: DEFAULT_TIMEOUT_SECONDS,
        }
    }

    /// Load configuration from a TOML file.
    pub fn load(path: &Path) -> Result<Self> {
        let raw = fs::read_to_string(path)?;
        let config: Self = toml::from_str(&raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Build configuration from `SHOPSNAP_*` environment variables.
    ///
    /// Required: `SHOPSNAP_STORE_ID`, `SHOPSNAP_TOKEN`, `SHOPSNAP_BASE_URL`.
    /// Optional: `SHOPSNAP_API_ENDPOINT`, `SHOPSNAP_TIMEOUT_SECONDS`.
    pub fn from_env() -> Result<Self> {
        let store_id = require_env("SHOPSNAP_STORE_ID")?
            .parse::<u64>()
            .map_err(|_| Error::Config("SHOPSNAP_STORE_ID must be a number".into()))?;
        let token = require_env("SHOPSNAP_TOKEN")?;
        let base_url = require_env("SHOPSNAP_BASE_URL")?;

        let mut config = Self::new(store_id, token, base_url);
        if let Ok(endpoint) = std::env::var("SHOPSNAP_API_ENDPOINT") {
            config.api_endpoint = endpoint;
        }
        if let Ok(timeout) = std::env::var("SHOPSNAP_TIMEOUT_SECONDS") {
            config.timeout_seconds = timeout
                .parse()
                .map_err(|_| Error::Config("SHOPSNAP_TIMEOUT_SECONDS must be a number".into()))?;
        }
        config.validate()?;
        Ok(config)
    }

    /// Override the API endpoint (used by tests and staging setups).
    #[must_use]
    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.api_endpoint = endpoint.into();
        self
    }

    fn validate(&self) -> Result<()> {
        if self.token.trim().is_empty() {
            return Err(Error::Config("access token must not be empty".into()));
        }
        if self.base_url.trim().is_empty() {
            return Err(Error::Config("base_url must not be empty".into()));
        }
        if self.api_endpoint.ends_with('/') {
            return Err(Error::Config(
                "api_endpoint must not end with a trailing slash".into(),
            ));
        }
        Ok(())
    }
}

fn require_env(name: &str) -> Result<String> {
    std::env::var(name).map_err(|_| Error::Config(format!("{name} is not set")))
}
