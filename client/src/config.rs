//! Build-time client configuration.
//!
//! Values are baked into the WASM bundle from the environment of the build,
//! the same way bundlers inline `*_API_URL` variables.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

/// Upper bound on one login round-trip.
pub const DEFAULT_LOGIN_TIMEOUT_MS: u32 = 10_000;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the admin API. `None` selects the demo authority.
    pub api_base_url: Option<String>,
    pub login_timeout_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self { api_base_url: None, login_timeout_ms: DEFAULT_LOGIN_TIMEOUT_MS }
    }
}

impl ClientConfig {
    /// Read `STOREFRONT_API_URL` and `STOREFRONT_LOGIN_TIMEOUT_MS` as they
    /// were when the crate was compiled.
    #[must_use]
    pub fn from_build_env() -> Self {
        Self::from_values(option_env!("STOREFRONT_API_URL"), option_env!("STOREFRONT_LOGIN_TIMEOUT_MS"))
    }

    fn from_values(api_base_url: Option<&str>, login_timeout_ms: Option<&str>) -> Self {
        let api_base_url = api_base_url
            .map(str::trim)
            .filter(|url| !url.is_empty())
            .map(|url| url.trim_end_matches('/').to_owned());
        let login_timeout_ms = match login_timeout_ms.map(|raw| raw.trim().parse::<u32>()) {
            Some(Ok(ms)) if ms > 0 => ms,
            _ => DEFAULT_LOGIN_TIMEOUT_MS,
        };
        Self { api_base_url, login_timeout_ms }
    }
}
