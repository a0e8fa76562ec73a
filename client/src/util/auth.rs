//! Admin route guard and login redirect helpers.
//!
//! SYSTEM CONTEXT
//! ==============
//! Every protected route applies the same decision: wait while the session is
//! loading, send unauthenticated visitors to the login page with the requested
//! path in the `from` query parameter, and render otherwise.
//!
//! The decision is display logic only. The admin API validates the bearer
//! credential on every request regardless of what the guard allowed.

#[cfg(test)]
#[path = "auth_test.rs"]
mod auth_test;

use leptos::prelude::*;
use leptos_router::NavigateOptions;

use crate::state::session::{SessionState, SessionStore};

pub const LOGIN_ROUTE: &str = "/admin/login";
pub const DEFAULT_LANDING_ROUTE: &str = "/admin/dashboard";
pub const PUBLIC_LANDING_ROUTE: &str = "/";
/// Query parameter carrying the intended destination on the login URL.
pub const DESTINATION_PARAM: &str = "from";

const PROTECTED_ROOT: &str = "/admin";

/// Outcome of guarding one protected render.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GuardDecision {
    /// The session is still loading; render a neutral placeholder.
    Wait,
    /// Navigate to this login URL.
    Redirect(String),
    Render,
}

/// Decide how to handle a request for `requested_path` in `state`.
#[must_use]
pub fn decide(state: &SessionState, requested_path: &str) -> GuardDecision {
    match state {
        SessionState::Loading => GuardDecision::Wait,
        SessionState::Unauthenticated => GuardDecision::Redirect(login_redirect(requested_path)),
        SessionState::Authenticated(_) => GuardDecision::Render,
    }
}

/// Whether `path` is inside the guarded admin area (the login page is not).
#[must_use]
pub fn is_protected_path(path: &str) -> bool {
    let in_admin = path == PROTECTED_ROOT || path.starts_with("/admin/");
    in_admin && path != LOGIN_ROUTE && !path.starts_with("/admin/login/")
}

/// Accept `raw` as a post-login destination only if it is a same-origin
/// protected path.
fn sanitize_destination(raw: &str) -> Option<&str> {
    let path = raw.trim();
    if path.starts_with("//") || path.contains('\\') || path.contains("://") {
        return None;
    }
    is_protected_path(path).then_some(path)
}

/// Login URL that remembers `requested_path` as the intended destination.
#[must_use]
pub fn login_redirect(requested_path: &str) -> String {
    match sanitize_destination(requested_path) {
        Some(path) => format!("{LOGIN_ROUTE}?{DESTINATION_PARAM}={}", urlencoding::encode(path)),
        None => LOGIN_ROUTE.to_owned(),
    }
}

/// Where to go after signing in, given the captured destination.
#[must_use]
pub fn post_login_destination(intended: Option<&str>) -> String {
    intended
        .and_then(sanitize_destination)
        .unwrap_or(DEFAULT_LANDING_ROUTE)
        .to_owned()
}

/// Re-run [`decide`] whenever the path or session changes and navigate on
/// `Redirect`. Never navigates while the session is loading, nor once the
/// location has already left the admin area (e.g. right after sign-out).
pub fn install_guard_redirect<S, F>(session: RwSignal<SessionStore<S>>, pathname: Memo<String>, navigate: F)
where
    S: Send + Sync + 'static,
    F: Fn(&str, NavigateOptions) + Clone + 'static,
{
    Effect::new(move || {
        let path = pathname.get();
        if !is_protected_path(&path) {
            return;
        }
        let decision = session.with(|s| decide(s.state(), &path));
        if let GuardDecision::Redirect(to) = decision {
            log::debug!("guard: {path} requires sign-in");
            navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
        }
    });
}
