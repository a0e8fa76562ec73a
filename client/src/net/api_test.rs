use futures::executor::block_on;

use super::*;

const NOW: u64 = 1_700_000_000;

// =============================================================
// Remote authority helpers
// =============================================================

#[test]
fn login_endpoint_joins_base_url() {
    assert_eq!(login_endpoint("http://localhost:5000/api"), "http://localhost:5000/api/admin/login");
    assert_eq!(login_endpoint("http://localhost:5000/api/"), "http://localhost:5000/api/admin/login");
}

#[test]
fn classify_status_success_range() {
    assert_eq!(classify_status(200), None);
    assert_eq!(classify_status(204), None);
}

#[test]
fn classify_status_rejections_are_invalid_credentials() {
    assert_eq!(classify_status(401), Some(AuthError::InvalidCredentials));
    assert_eq!(classify_status(403), Some(AuthError::InvalidCredentials));
}

#[test]
fn classify_status_other_failures_are_network_errors() {
    assert_eq!(
        classify_status(503),
        Some(AuthError::Network("login request failed: 503".to_owned()))
    );
    assert!(matches!(classify_status(404), Some(AuthError::Network(_))));
}

#[test]
fn timeout_message_formats_bound() {
    assert_eq!(timeout_message(10_000), "login request timed out after 10000 ms");
}

#[test]
fn login_request_serializes_email_and_password() {
    let body = LoginRequest { email: "a@b.com", password: "pw" };
    assert_eq!(
        serde_json::to_value(&body).unwrap(),
        serde_json::json!({ "email": "a@b.com", "password": "pw" })
    );
}

#[test]
fn login_response_reads_token() {
    let body: LoginResponse = serde_json::from_str(r#"{"token":"abc","refresh_token":"r"}"#).unwrap();
    assert_eq!(body.token, "abc");
}

#[cfg(not(feature = "hydrate"))]
#[test]
fn remote_authority_is_unreachable_outside_browser() {
    let authority = RemoteAuthority::new("http://localhost:5000/api", 100);
    let result = block_on(authority.authenticate("admin@example.com", "admin123"));
    assert_eq!(
        result,
        Err(AuthError::Network(
            "http://localhost:5000/api/admin/login is only reachable from the browser (timeout 100 ms)".to_owned()
        ))
    );
}

// =============================================================
// Demo authority
// =============================================================

#[test]
fn demo_authority_accepts_demo_account() {
    let credential = DemoAuthority::default().issue("admin@example.com", "admin123", NOW).unwrap();
    let identity = credential.identity(NOW).unwrap();
    assert_eq!(identity.id, "1");
    assert_eq!(identity.email, "admin@example.com");
    assert_eq!(identity.name, "Admin User");
}

#[test]
fn demo_authority_ignores_identifier_case() {
    assert!(DemoAuthority::default().issue("Admin@Example.com", "admin123", NOW).is_ok());
}

#[test]
fn demo_authority_rejects_wrong_secret_or_identifier() {
    let authority = DemoAuthority::default();
    assert_eq!(authority.issue("admin@example.com", "nope", NOW), Err(AuthError::InvalidCredentials));
    assert_eq!(authority.issue("other@example.com", "admin123", NOW), Err(AuthError::InvalidCredentials));
}

#[test]
fn demo_token_expires_after_ttl() {
    let credential = DemoAuthority::default().issue("admin@example.com", "admin123", NOW).unwrap();
    assert!(credential.identity(NOW + DEMO_SESSION_TTL_SECS - 1).is_ok());
    assert!(credential.identity(NOW + DEMO_SESSION_TTL_SECS).is_err());
}

#[test]
fn demo_authority_trait_call() {
    let result = block_on(DemoAuthority::default().authenticate("admin@example.com", "admin123"));
    assert!(result.is_ok());
}

// =============================================================
// AppAuthority selection
// =============================================================

#[test]
fn app_authority_without_api_url_is_demo() {
    let authority = AppAuthority::from_config(&ClientConfig::default());
    assert_eq!(authority, AppAuthority::Demo(DemoAuthority::default()));
}

#[test]
fn app_authority_with_api_url_is_remote() {
    let config = ClientConfig { api_base_url: Some("https://api.example.com".to_owned()), login_timeout_ms: 500 };
    let AppAuthority::Remote(remote) = AppAuthority::from_config(&config) else {
        panic!("expected remote authority");
    };
    assert_eq!(remote.endpoint(), "https://api.example.com/admin/login");
}
