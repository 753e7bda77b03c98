//! Client configuration.
//!
//! Sources, lowest priority first: built-in defaults, an optional config
//! file, then `ADVANCED_SCHEDULER_*` environment variables.

use std::fmt;
use std::time::Duration;

use config::builder::DefaultState;
use config::{Config, ConfigBuilder, ConfigError};
use serde::Deserialize;

use crate::client::DEFAULT_BASE_URL;

pub const ENV_PREFIX: &str = "ADVANCED_SCHEDULER";

#[derive(Clone, Deserialize)]
pub struct ClientConfig {
    pub base_url: String,
    /// Sent verbatim as the `Authorization` header.
    pub auth_token: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

impl ClientConfig {
    /// Load configuration from `file` (any format the `config` crate
    /// recognises by extension) and the environment.
    pub fn load(file: Option<&str>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder();
        if let Some(file) = file {
            builder = builder.add_source(config::File::with_name(file));
        }
        Self::resolve(builder.add_source(config::Environment::with_prefix(ENV_PREFIX)))
    }

    fn resolve(builder: ConfigBuilder<DefaultState>) -> Result<Self, ConfigError> {
        builder
            .set_default("base_url", DEFAULT_BASE_URL)?
            .build()?
            .try_deserialize()
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout_secs.map(Duration::from_secs)
    }
}

impl fmt::Debug for ClientConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ClientConfig")
            .field("base_url", &self.base_url)
            .field("auth_token", &"<redacted>")
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}
