//! Bearer credential and the identity decoded from it.
//!
//! SECURITY
//! ========
//! Decoding here is for display and routing only. Nothing in the client treats
//! a decoded identity as proof of authenticity; the admin API validates the
//! bearer token on every protected request.

#[cfg(test)]
#[path = "credential_test.rs"]
mod credential_test;

use std::fmt;

use base64::Engine as _;
use base64::engine::general_purpose::{STANDARD_NO_PAD, URL_SAFE_NO_PAD};
use serde::{Deserialize, Serialize};

/// Reasons a credential cannot be turned into an [`Identity`].
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DecodeError {
    #[error("credential is empty")]
    Empty,
    #[error("credential is not a three-segment token")]
    Malformed,
    #[error("credential payload is not valid base64")]
    Encoding,
    #[error("credential payload is not valid JSON: {0}")]
    Payload(String),
    #[error("credential payload is missing `{0}`")]
    MissingField(&'static str),
    #[error("credential expired at {0}")]
    Expired(u64),
}

/// Opaque bearer token issued by the authentication authority.
#[derive(Clone, PartialEq, Eq)]
pub struct Credential(String);

impl Credential {
    pub fn new(raw: impl Into<String>) -> Self {
        Self(raw.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Value for an `Authorization` header on admin API requests.
    #[must_use]
    pub fn bearer_header(&self) -> String {
        format!("Bearer {}", self.0)
    }

    /// Decode the display identity carried in the token payload.
    ///
    /// # Errors
    ///
    /// Returns a [`DecodeError`] when the token is empty, malformed, expired,
    /// or lacks one of the identity fields.
    pub fn identity(&self, now_secs: u64) -> Result<Identity, DecodeError> {
        decode_identity(&self.0, now_secs)
    }
}

// Tokens must never reach the log output.
impl fmt::Debug for Credential {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("Credential(<redacted>)")
    }
}

/// Display-facing attributes of the signed-in administrator.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Identity {
    pub id: String,
    pub email: String,
    pub name: String,
}

#[derive(Deserialize)]
struct Claims {
    #[serde(default)]
    id: Option<ClaimId>,
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    name: Option<String>,
    /// NumericDate: whole or fractional seconds.
    #[serde(default)]
    exp: Option<f64>,
}

/// Issuers disagree on whether `id` is numeric or a string.
#[derive(Deserialize)]
#[serde(untagged)]
enum ClaimId {
    Number(i64),
    Unsigned(u64),
    Text(String),
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

fn decode_segment(segment: &str) -> Result<Vec<u8>, DecodeError> {
    let trimmed = segment.trim_end_matches('=');
    URL_SAFE_NO_PAD
        .decode(trimmed)
        .or_else(|_| STANDARD_NO_PAD.decode(trimmed))
        .map_err(|_| DecodeError::Encoding)
}

#[allow(clippy::cast_precision_loss, clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn check_expiry(exp: f64, now_secs: u64) -> Result<(), DecodeError> {
    if exp <= now_secs as f64 {
        return Err(DecodeError::Expired(exp.floor() as u64));
    }
    Ok(())
}

/// Decode `header.payload.signature` into an [`Identity`].
///
/// Only `id`, `email`, and `name` are kept. An `exp` claim at or before
/// `now_secs` is rejected.
///
/// # Errors
///
/// Returns a [`DecodeError`] for any input that does not carry a complete,
/// unexpired identity.
pub fn decode_identity(raw: &str, now_secs: u64) -> Result<Identity, DecodeError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Err(DecodeError::Empty);
    }

    let mut segments = raw.split('.');
    let (Some(_header), Some(payload), Some(_signature), None) =
        (segments.next(), segments.next(), segments.next(), segments.next())
    else {
        return Err(DecodeError::Malformed);
    };
    if payload.is_empty() {
        return Err(DecodeError::Malformed);
    }

    let bytes = decode_segment(payload)?;
    let claims: Claims = serde_json::from_slice(&bytes).map_err(|e| DecodeError::Payload(e.to_string()))?;

    if let Some(exp) = claims.exp {
        check_expiry(exp, now_secs)?;
    }

    let id = match claims.id {
        Some(ClaimId::Number(n)) => n.to_string(),
        Some(ClaimId::Unsigned(n)) => n.to_string(),
        Some(ClaimId::Text(s)) if !s.trim().is_empty() => s,
        _ => return Err(DecodeError::MissingField("id")),
    };
    let email = non_empty(claims.email).ok_or(DecodeError::MissingField("email"))?;
    let name = non_empty(claims.name).ok_or(DecodeError::MissingField("name"))?;

    Ok(Identity { id, email, name })
}

/// Build an unsigned token carrying `identity`.
///
/// Only the demo authority uses this. The result has an empty signature and
/// must never be accepted by a real API.
#[must_use]
pub fn encode_unsigned(identity: &Identity, exp: Option<u64>) -> Credential {
    let header = serde_json::json!({ "alg": "none", "typ": "JWT" });
    let mut payload = serde_json::json!({
        "id": identity.id,
        "email": identity.email,
        "name": identity.name,
    });
    if let Some(exp) = exp {
        payload["exp"] = serde_json::Value::from(exp);
    }
    Credential::new(format!(
        "{}.{}.",
        URL_SAFE_NO_PAD.encode(header.to_string()),
        URL_SAFE_NO_PAD.encode(payload.to_string()),
    ))
}

/// Current wall-clock time in whole seconds since the Unix epoch.
#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
#[must_use]
pub fn now_secs() -> u64 {
    #[cfg(feature = "hydrate")]
    {
        (js_sys::Date::now() / 1000.0) as u64
    }
    #[cfg(not(feature = "hydrate"))]
    {
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .map_or(0, |d| d.as_secs())
    }
}
