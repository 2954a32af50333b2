//! Runtime settings for the `calc` binary, loaded via OrthoConfig.
//!
//! Values come from `CALC_*` environment variables (and any configuration
//! file OrthoConfig discovers). Command-line flags are owned by the CLI
//! parser and passed in explicitly.

use std::env;
use std::ffi::OsString;
use std::time::Duration;

use ortho_config::OrthoConfig;
use serde::Deserialize;

use crate::outbound::persistence::PoolConfig;

/// Generic fallback consulted after `CALC_DATABASE_URL`.
pub const FALLBACK_DATABASE_URL_VAR: &str = "DATABASE_URL";

/// Errors raised while resolving settings.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ConfigError {
    /// OrthoConfig could not merge the configuration sources.
    #[error("failed to load configuration: {message}")]
    Load { message: String },
    /// No source supplied a database URL.
    #[error("database URL missing: set --database-url, CALC_DATABASE_URL or DATABASE_URL")]
    MissingDatabaseUrl,
    /// A source supplied a whitespace-only database URL.
    #[error("{source_name} must not be empty")]
    BlankDatabaseUrl { source_name: &'static str },
}

/// Database and pool settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "CALC")]
pub struct CalcSettings {
    /// PostgreSQL connection URL.
    pub database_url: Option<String>,
    /// Maximum pooled connections.
    pub pool_max_size: Option<u32>,
    /// Idle connections the pool keeps open.
    pub pool_min_idle: Option<u32>,
    /// Seconds to wait for a pooled connection.
    pub connection_timeout_secs: Option<u64>,
}

impl CalcSettings {
    /// Load settings from the environment and configuration files only.
    pub fn load_from_environment() -> Result<Self, ConfigError> {
        Self::load_from_iter([OsString::from("calc")]).map_err(|err| ConfigError::Load {
            message: err.to_string(),
        })
    }

    /// Pick the database URL: `explicit` (the CLI flag), then
    /// `CALC_DATABASE_URL`, then `DATABASE_URL`.
    ///
    /// The first source that is set wins; a blank value is an error rather
    /// than a reason to fall through.
    pub fn resolve_database_url(&self, explicit: Option<String>) -> Result<String, ConfigError> {
        if let Some(value) = explicit {
            return non_blank(value, "--database-url");
        }
        if let Some(value) = self.database_url.clone() {
            return non_blank(value, "CALC_DATABASE_URL");
        }
        match env::var(FALLBACK_DATABASE_URL_VAR) {
            Ok(value) => non_blank(value, FALLBACK_DATABASE_URL_VAR),
            Err(_) => Err(ConfigError::MissingDatabaseUrl),
        }
    }

    /// Pool configuration for `database_url` with any overrides applied.
    ///
    /// Without an explicit `pool_min_idle`, the default idle count is capped
    /// at `pool_max_size`. Explicit values are passed through unchanged and
    /// checked when the pool is built.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        let mut config = PoolConfig::new(database_url);
        if let Some(max_size) = self.pool_max_size {
            config = config.with_max_size(max_size);
        }
        let min_idle = match self.pool_min_idle {
            Some(min_idle) => min_idle,
            None => PoolConfig::DEFAULT_MIN_IDLE.min(config.max_size()),
        };
        config = config.with_min_idle(Some(min_idle));
        if let Some(secs) = self.connection_timeout_secs {
            config = config.with_connection_timeout(Duration::from_secs(secs));
        }
        config
    }
}

fn non_blank(value: String, source_name: &'static str) -> Result<String, ConfigError> {
    if value.trim().is_empty() {
        return Err(ConfigError::BlankDatabaseUrl { source_name });
    }
    Ok(value)
}
