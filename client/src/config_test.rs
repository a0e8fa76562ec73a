use super::*;

#[test]
fn defaults_select_demo_authority() {
    let config = ClientConfig::from_values(None, None);
    assert_eq!(config, ClientConfig::default());
    assert!(config.api_base_url.is_none());
    assert_eq!(config.login_timeout_ms, DEFAULT_LOGIN_TIMEOUT_MS);
}

#[test]
fn api_url_is_trimmed_and_loses_trailing_slash() {
    let config = ClientConfig::from_values(Some("  https://api.example.com/api/ "), None);
    assert_eq!(config.api_base_url.as_deref(), Some("https://api.example.com/api"));
}

#[test]
fn blank_api_url_is_ignored() {
    assert!(ClientConfig::from_values(Some("   "), None).api_base_url.is_none());
}

#[test]
fn timeout_parses_positive_integer() {
    assert_eq!(ClientConfig::from_values(None, Some(" 2500 ")).login_timeout_ms, 2500);
}

#[test]
fn invalid_or_zero_timeout_falls_back_to_default() {
    assert_eq!(ClientConfig::from_values(None, Some("soon")).login_timeout_ms, DEFAULT_LOGIN_TIMEOUT_MS);
    assert_eq!(ClientConfig::from_values(None, Some("0")).login_timeout_ms, DEFAULT_LOGIN_TIMEOUT_MS);
    assert_eq!(ClientConfig::from_values(None, Some("-5")).login_timeout_ms, DEFAULT_LOGIN_TIMEOUT_MS);
}
