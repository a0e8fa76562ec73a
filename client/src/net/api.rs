//! Authentication authority clients.
//!
//! Client-side (hydrate): real HTTP calls via `gloo-net`, bounded by a timer.
//! Server-side (SSR): the remote authority reports a network error since
//! sign-in only happens in the browser.
//!
//! ERROR HANDLING
//! ==============
//! A rejected identifier/secret pair and an unreachable authority are kept
//! apart so the login form can phrase them differently.

#![allow(clippy::unused_async)]

#[cfg(test)]
#[path = "api_test.rs"]
mod api_test;

use crate::config::ClientConfig;
use crate::state::credential::{Credential, Identity, encode_unsigned, now_secs};

/// Why the authority did not issue a credential.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("{0}")]
    Network(String),
}

/// Exchanges an identifier/secret pair for a [`Credential`].
#[allow(async_fn_in_trait)]
pub trait Authority {
    /// # Errors
    ///
    /// Returns [`AuthError::InvalidCredentials`] for a rejected pair and
    /// [`AuthError::Network`] when the authority cannot be reached.
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError>;
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, serde::Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

#[cfg(any(test, feature = "hydrate"))]
#[derive(Debug, serde::Deserialize)]
struct LoginResponse {
    token: String,
}

fn login_endpoint(base_url: &str) -> String {
    format!("{}/admin/login", base_url.trim_end_matches('/'))
}

#[cfg(any(test, feature = "hydrate"))]
/// Map a response status to the error it implies, if any.
fn classify_status(status: u16) -> Option<AuthError> {
    match status {
        200..=299 => None,
        401 | 403 => Some(AuthError::InvalidCredentials),
        _ => Some(AuthError::Network(format!("login request failed: {status}"))),
    }
}

#[cfg(any(test, feature = "hydrate"))]
fn timeout_message(timeout_ms: u32) -> String {
    format!("login request timed out after {timeout_ms} ms")
}

/// `POST {base}/admin/login` with `{email, password}`, answered by `{token}`.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct RemoteAuthority {
    base_url: String,
    timeout_ms: u32,
}

impl RemoteAuthority {
    pub fn new(base_url: impl Into<String>, timeout_ms: u32) -> Self {
        Self { base_url: base_url.into(), timeout_ms }
    }

    #[must_use]
    pub fn endpoint(&self) -> String {
        login_endpoint(&self.base_url)
    }
}

impl Authority for RemoteAuthority {
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError> {
        #[cfg(feature = "hydrate")]
        {
            use futures::future::{Either, select};

            let request = async {
                let body = LoginRequest { email: identifier, password: secret };
                let resp = gloo_net::http::Request::post(&self.endpoint())
                    .json(&body)
                    .map_err(|e| AuthError::Network(e.to_string()))?
                    .send()
                    .await
                    .map_err(|e| AuthError::Network(e.to_string()))?;
                if let Some(err) = classify_status(resp.status()) {
                    return Err(err);
                }
                let body: LoginResponse = resp
                    .json()
                    .await
                    .map_err(|e| AuthError::Network(format!("unexpected login response: {e}")))?;
                Ok(Credential::new(body.token))
            };
            let request = std::pin::pin!(request);
            let timeout = std::pin::pin!(gloo_timers::future::TimeoutFuture::new(self.timeout_ms));

            match select(request, timeout).await {
                Either::Left((result, _)) => result,
                Either::Right(((), _)) => {
                    log::warn!("login: {}", timeout_message(self.timeout_ms));
                    Err(AuthError::Network(timeout_message(self.timeout_ms)))
                }
            }
        }
        #[cfg(not(feature = "hydrate"))]
        {
            Err(AuthError::Network(format!(
                "{} is only reachable from the browser (timeout {} ms)",
                self.endpoint(),
                self.timeout_ms
            )))
        }
    }
}

/// Default lifetime of a demo token.
pub const DEMO_SESSION_TTL_SECS: u64 = 8 * 60 * 60;

/// Stand-in authority for builds without an admin API.
///
/// This is a placeholder, not an authentication protocol: it compares against
/// one hard-coded account and issues an unsigned token. Point
/// `STOREFRONT_API_URL` at a real authority before deploying.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DemoAuthority {
    email: String,
    password: String,
    name: String,
    ttl_secs: Option<u64>,
}

impl Default for DemoAuthority {
    fn default() -> Self {
        Self {
            email: "admin@example.com".to_owned(),
            password: "admin123".to_owned(),
            name: "Admin User".to_owned(),
            ttl_secs: Some(DEMO_SESSION_TTL_SECS),
        }
    }
}

impl DemoAuthority {
    fn issue(&self, identifier: &str, secret: &str, now: u64) -> Result<Credential, AuthError> {
        if !identifier.eq_ignore_ascii_case(&self.email) || secret != self.password {
            return Err(AuthError::InvalidCredentials);
        }
        let identity = Identity { id: "1".to_owned(), email: self.email.clone(), name: self.name.clone() };
        Ok(encode_unsigned(&identity, self.ttl_secs.map(|ttl| now + ttl)))
    }
}

impl Authority for DemoAuthority {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError> {
        self.issue(identifier, secret, now_secs())
    }
}

/// The authority selected for this build.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppAuthority {
    Remote(RemoteAuthority),
    Demo(DemoAuthority),
}

impl AppAuthority {
    #[must_use]
    pub fn from_config(config: &ClientConfig) -> Self {
        match &config.api_base_url {
            Some(url) => Self::Remote(RemoteAuthority::new(url.clone(), config.login_timeout_ms)),
            None => {
                log::warn!("login: STOREFRONT_API_URL unset, using the demo authority");
                Self::Demo(DemoAuthority::default())
            }
        }
    }
}

impl Authority for AppAuthority {
    async fn authenticate(&self, identifier: &str, secret: &str) -> Result<Credential, AuthError> {
        match self {
            Self::Remote(authority) => authority.authenticate(identifier, secret).await,
            Self::Demo(authority) => authority.authenticate(identifier, secret).await,
        }
    }
}
