use std::collections::HashMap;

use super::*;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| ((*k).to_owned(), (*v).to_owned()))
        .collect();
    move |key| map.get(key).cloned()
}

// =============================================================================
// ServerConfig::from_lookup
// =============================================================================

#[test]
fn defaults_when_unset() {
    let config = ServerConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
    assert_eq!(config.log_filter, DEFAULT_LOG_FILTER);
}

#[test]
fn port_is_parsed_and_trimmed() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", " 8080 ")])).unwrap();
    assert_eq!(config.port, 8080);
}

#[test]
fn blank_port_uses_default() {
    let config = ServerConfig::from_lookup(lookup(&[("PORT", "  ")])).unwrap();
    assert_eq!(config.port, DEFAULT_PORT);
}

#[test]
fn invalid_port_is_error() {
    let err = ServerConfig::from_lookup(lookup(&[("PORT", "http")])).unwrap_err();
    assert!(err.to_string().starts_with("invalid PORT: \"http\""));
}

#[test]
fn out_of_range_port_is_error() {
    assert!(ServerConfig::from_lookup(lookup(&[("PORT", "70000")])).is_err());
}

#[test]
fn log_filter_override() {
    let config = ServerConfig::from_lookup(lookup(&[("STOREFRONT_LOG", "warn")])).unwrap();
    assert_eq!(config.log_filter, "warn");
}
