//! Logsweep configuration loading and validation.
//!
//! The config file is a small JSON document (conventionally `search.conf`)
//! holding credentials and query shape for the remote log-search service.
//! Loading is fatal on failure: a run with no usable config has nothing to do.
//! Missing optional fields fall back to defaults at parse time.

use serde::{Deserialize, Serialize};
use std::path::Path;

use lsw_common::{Error, Result};

/// Default page size per query job.
pub const DEFAULT_PAGE_SIZE: u32 = 100;

/// Default window step in minutes.
pub const DEFAULT_STEP_MINUTES: i64 = 5;

/// Default service endpoint.
pub const DEFAULT_ENDPOINT: &str = "https://logdb.example.com";

/// Search service configuration, loaded once at startup and passed by
/// reference into the windower and query client.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchConfig {
    /// Access key, passed opaquely to the query service.
    #[serde(default)]
    pub ak: String,

    /// Secret key, passed opaquely to the query service.
    #[serde(default)]
    pub sk: String,

    /// Page size per query job.
    #[serde(default = "default_page_size")]
    pub size: u32,

    /// Target dataset (repository) identifier.
    #[serde(default)]
    pub repo: String,

    /// Field-selection string, in the query service's own syntax.
    #[serde(default)]
    pub fields: String,

    /// Window size in minutes.
    #[serde(default = "default_step_minutes")]
    pub step: i64,

    /// Base URL of the query service.
    #[serde(default = "default_endpoint")]
    pub endpoint: String,
}

fn default_page_size() -> u32 {
    DEFAULT_PAGE_SIZE
}

fn default_step_minutes() -> i64 {
    DEFAULT_STEP_MINUTES
}

fn default_endpoint() -> String {
    DEFAULT_ENDPOINT.to_string()
}

impl Default for SearchConfig {
    fn default() -> Self {
        Self {
            ak: String::new(),
            sk: String::new(),
            size: DEFAULT_PAGE_SIZE,
            repo: String::new(),
            fields: String::new(),
            step: DEFAULT_STEP_MINUTES,
            endpoint: default_endpoint(),
        }
    }
}

impl SearchConfig {
    /// Parse a config from JSON text, applying defaults for absent fields.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: SearchConfig = serde_json::from_str(json)
            .map_err(|e| Error::Config(format!("malformed config JSON: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config file. Unreadable or malformed files are fatal.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| Error::Config(format!("cannot read {}: {e}", path.display())))?;
        Self::from_json(&content)
    }

    /// Semantic validation beyond what serde enforces.
    pub fn validate(&self) -> Result<()> {
        if self.size == 0 {
            return Err(Error::Config("size must be positive".into()));
        }
        if self.step <= 0 {
            return Err(Error::Config(format!(
                "step must be positive minutes, got {}",
                self.step
            )));
        }
        if self.endpoint.is_empty() {
            return Err(Error::Config("endpoint must not be empty".into()));
        }
        Ok(())
    }

    /// Window step expressed in seconds. Saturates for absurd step values.
    pub fn step_seconds(&self) -> i64 {
        self.step.saturating_mul(60)
    }
}
