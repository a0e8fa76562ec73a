use super::*;
use crate::state::credential::Identity;

fn signed_in() -> SessionState {
    SessionState::Authenticated(Identity {
        id: "1".to_owned(),
        email: "admin@example.com".to_owned(),
        name: "Admin User".to_owned(),
    })
}

// =============================================================
// decide
// =============================================================

#[test]
fn decide_waits_while_loading() {
    assert_eq!(decide(&SessionState::Loading, "/admin/inventory"), GuardDecision::Wait);
}

#[test]
fn decide_redirects_unauthenticated_with_destination() {
    assert_eq!(
        decide(&SessionState::Unauthenticated, "/admin/inventory"),
        GuardDecision::Redirect("/admin/login?from=%2Fadmin%2Finventory".to_owned())
    );
}

#[test]
fn decide_renders_when_authenticated() {
    assert_eq!(decide(&signed_in(), "/admin/inventory"), GuardDecision::Render);
}

// =============================================================
// is_protected_path
// =============================================================

#[test]
fn admin_pages_are_protected() {
    assert!(is_protected_path("/admin"));
    assert!(is_protected_path("/admin/dashboard"));
    assert!(is_protected_path("/admin/blog"));
}

#[test]
fn login_and_public_pages_are_not_protected() {
    assert!(!is_protected_path("/admin/login"));
    assert!(!is_protected_path("/"));
    assert!(!is_protected_path("/store"));
    assert!(!is_protected_path("/administrator"));
}

// =============================================================
// login_redirect / post_login_destination
// =============================================================

#[test]
fn login_redirect_for_public_path_has_no_destination() {
    assert_eq!(login_redirect("/store"), LOGIN_ROUTE);
    assert_eq!(login_redirect("/admin/login"), LOGIN_ROUTE);
}

#[test]
fn post_login_destination_defaults_to_dashboard() {
    assert_eq!(post_login_destination(None), DEFAULT_LANDING_ROUTE);
}

#[test]
fn post_login_destination_keeps_protected_path() {
    assert_eq!(post_login_destination(Some("/admin/inventory")), "/admin/inventory");
}

#[test]
fn post_login_destination_rejects_foreign_or_public_targets() {
    for target in [
        "https://evil.example/admin/x",
        "//evil.example/admin",
        "/\\evil.example",
        "/store",
        "/admin/login",
        "",
    ] {
        assert_eq!(post_login_destination(Some(target)), DEFAULT_LANDING_ROUTE, "target {target:?}");
    }
}

// =============================================================
// Redirect-preservation scenarios
// =============================================================

#[test]
fn inventory_request_round_trips_through_login() {
    let GuardDecision::Redirect(to) = decide(&SessionState::Unauthenticated, "/admin/inventory") else {
        panic!("expected redirect");
    };
    let encoded = to.strip_prefix("/admin/login?from=").unwrap();
    let from = urlencoding::decode(encoded).unwrap();
    assert_eq!(from, "/admin/inventory");
    assert_eq!(post_login_destination(Some(from.as_ref())), "/admin/inventory");
}

#[test]
fn dashboard_request_lands_on_dashboard() {
    let GuardDecision::Redirect(to) = decide(&SessionState::Unauthenticated, "/admin/dashboard") else {
        panic!("expected redirect");
    };
    let from = urlencoding::decode(to.strip_prefix("/admin/login?from=").unwrap()).unwrap();
    assert_eq!(post_login_destination(Some(from.as_ref())), "/admin/dashboard");
}
