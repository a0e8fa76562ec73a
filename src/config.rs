//! Server configuration read from the environment.
//!
//! `.env` is loaded by `main` before this runs, so values may come from either.

use std::env;

/// Default listen port when `PORT` is unset.
pub const DEFAULT_PORT: u16 = 3000;
/// Default `tracing` filter when `STOREFRONT_LOG` is unset.
pub const DEFAULT_LOG_FILTER: &str = "info,storefront=debug";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid {key}: {value:?} ({reason})")]
    Invalid { key: &'static str, value: String, reason: String },
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub port: u16,
    pub log_filter: String,
}

impl ServerConfig {
    /// Read `PORT` and `STOREFRONT_LOG` from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is not a valid port.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build from an arbitrary key lookup.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Invalid`] when `PORT` is not a valid port.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT").map(|raw| raw.trim().to_owned()) {
            None => DEFAULT_PORT,
            Some(raw) if raw.is_empty() => DEFAULT_PORT,
            Some(raw) => raw.parse::<u16>().map_err(|e| ConfigError::Invalid {
                key: "PORT",
                value: raw.clone(),
                reason: e.to_string(),
            })?,
        };
        let log_filter = lookup("STOREFRONT_LOG")
            .map(|raw| raw.trim().to_owned())
            .filter(|raw| !raw.is_empty())
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_owned());
        Ok(Self { port, log_filter })
    }
}

#[cfg(test)]
#[path = "config_test.rs"]
mod tests;
