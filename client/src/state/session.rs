//! Admin session state machine.
//!
//! SYSTEM CONTEXT
//! ==============
//! One `SessionStore` is created at the application root and provided to the
//! component tree as an `RwSignal`. The route guard reads its state; the login
//! page and admin shell drive its transitions.
//!
//! LIFECYCLE
//! =========
//! `Loading` resolves exactly once (via `initialize` or the first completed
//! transition) into `Unauthenticated` or `Authenticated`, and never returns.
//!
//! ORDERING
//! ========
//! Every sign-out bumps an epoch. A login captures the epoch when it is issued
//! and its result is dropped if the epoch moved while the authority call was
//! in flight, so a late response cannot undo a sign-out. Concurrent logins do
//! not bump the epoch; the last one to complete wins.

#[cfg(test)]
#[path = "session_test.rs"]
mod session_test;

use leptos::prelude::*;

use super::credential::{Credential, DecodeError, Identity, now_secs};
use crate::net::api::{AuthError, Authority};
use crate::util::auth::{PUBLIC_LANDING_ROUTE, login_redirect, post_login_destination};
use crate::util::storage::CredentialStorage;

/// What the rest of the application observes about the session.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum SessionState {
    /// The stored credential has not been read yet.
    #[default]
    Loading,
    Unauthenticated,
    Authenticated(Identity),
}

impl SessionState {
    #[must_use]
    pub fn is_loading(&self) -> bool {
        matches!(self, Self::Loading)
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        matches!(self, Self::Authenticated(_))
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        match self {
            Self::Authenticated(identity) => Some(identity),
            _ => None,
        }
    }
}

/// Failures surfaced by the login flow.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LoginError {
    #[error("identifier and secret are both required")]
    MissingFields,
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("authentication authority unreachable: {0}")]
    Network(String),
    #[error("authority issued an unusable credential: {0}")]
    Rejected(DecodeError),
    /// A sign-out happened after this login was issued.
    #[error("login superseded by a later sign-out")]
    Superseded,
}

impl LoginError {
    /// Message shown inline on the login form.
    #[must_use]
    pub fn user_message(&self) -> &'static str {
        match self {
            Self::MissingFields => "Enter both email and password.",
            Self::InvalidCredentials => "Invalid email or password.",
            Self::Network(_) => "Could not reach the server. Please try again.",
            Self::Rejected(_) => "Sign-in failed. Please try again.",
            Self::Superseded => "",
        }
    }
}

impl From<AuthError> for LoginError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::InvalidCredentials => Self::InvalidCredentials,
            AuthError::Network(reason) => Self::Network(reason),
        }
    }
}

/// Proof that a login was issued, carrying the epoch it was issued in.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct LoginTicket {
    epoch: u64,
}

/// Single authority for who the current administrator is.
#[derive(Debug)]
pub struct SessionStore<S> {
    storage: S,
    state: SessionState,
    credential: Option<Credential>,
    epoch: u64,
    resolved: bool,
}

impl<S> SessionStore<S> {
    pub fn new(storage: S) -> Self {
        Self {
            storage,
            state: SessionState::Loading,
            credential: None,
            epoch: 0,
            resolved: false,
        }
    }

    #[must_use]
    pub fn state(&self) -> &SessionState {
        &self.state
    }

    #[must_use]
    pub fn identity(&self) -> Option<&Identity> {
        self.state.identity()
    }

    #[must_use]
    pub fn is_authenticated(&self) -> bool {
        self.state.is_authenticated()
    }

    #[must_use]
    pub fn credential(&self) -> Option<&Credential> {
        self.credential.as_ref()
    }

    /// `Authorization` header value for admin API collaborators.
    #[must_use]
    pub fn bearer_header(&self) -> Option<String> {
        self.credential.as_ref().map(Credential::bearer_header)
    }

    #[must_use]
    pub fn storage(&self) -> &S {
        &self.storage
    }
}

impl<S: CredentialStorage> SessionStore<S> {
    /// Resolve `Loading` from the stored credential. Later calls are no-ops.
    pub fn initialize(&mut self) {
        self.initialize_at(now_secs());
    }

    /// [`Self::initialize`] with an explicit clock, in seconds since the epoch.
    pub fn initialize_at(&mut self, now: u64) {
        if self.resolved {
            return;
        }
        self.resolved = true;

        let stored = match self.storage.load() {
            Ok(stored) => stored,
            Err(e) => {
                log::warn!("session: credential storage unreadable: {e}");
                None
            }
        };
        let Some(raw) = stored else {
            log::debug!("session: no stored credential");
            self.state = SessionState::Unauthenticated;
            return;
        };

        let credential = Credential::new(raw);
        match credential.identity(now) {
            Ok(identity) => {
                log::debug!("session: restored session for id={}", identity.id);
                self.credential = Some(credential);
                self.state = SessionState::Authenticated(identity);
            }
            Err(e) => {
                log::warn!("session: discarding stored credential: {e}");
                self.purge();
            }
        }
    }

    /// Mark the start of a login attempt.
    #[must_use]
    pub fn begin_login(&self) -> LoginTicket {
        LoginTicket { epoch: self.epoch }
    }

    /// Apply the authority's answer to a login issued with `ticket`.
    ///
    /// On success returns the route to navigate to: `intended` when it names a
    /// protected page, otherwise the default landing route.
    ///
    /// # Errors
    ///
    /// Returns [`LoginError::Superseded`] when a sign-out happened after the
    /// ticket was issued, and the authority's or decoder's error otherwise.
    /// Neither state nor storage changes on error.
    pub fn finish_login(
        &mut self,
        ticket: LoginTicket,
        result: Result<Credential, AuthError>,
        intended: Option<&str>,
    ) -> Result<String, LoginError> {
        self.finish_login_at(ticket, result, intended, now_secs())
    }

    /// [`Self::finish_login`] with an explicit clock.
    ///
    /// # Errors
    ///
    /// See [`Self::finish_login`].
    pub fn finish_login_at(
        &mut self,
        ticket: LoginTicket,
        result: Result<Credential, AuthError>,
        intended: Option<&str>,
        now: u64,
    ) -> Result<String, LoginError> {
        if ticket.epoch != self.epoch {
            log::debug!("session: dropping login result issued before sign-out");
            return Err(LoginError::Superseded);
        }

        let credential = result?;
        let identity = credential.identity(now).map_err(LoginError::Rejected)?;

        if let Err(e) = self.storage.save(credential.as_str()) {
            log::warn!("session: credential not persisted, session ends on reload: {e}");
        }
        log::debug!("session: signed in id={}", identity.id);
        self.credential = Some(credential);
        self.state = SessionState::Authenticated(identity);
        self.resolved = true;

        Ok(post_login_destination(intended))
    }

    /// Sign out and return the public landing route. Safe to repeat.
    pub fn logout(&mut self) -> &'static str {
        log::debug!("session: signed out");
        self.purge();
        PUBLIC_LANDING_ROUTE
    }

    /// Drop a credential the admin API rejected and return the login route
    /// that brings the visitor back to `current_path`.
    pub fn invalidate(&mut self, current_path: &str) -> String {
        log::warn!("session: credential rejected by the API");
        self.purge();
        login_redirect(current_path)
    }

    fn purge(&mut self) {
        if let Err(e) = self.storage.clear() {
            log::warn!("session: stored credential not cleared: {e}");
        }
        self.credential = None;
        self.state = SessionState::Unauthenticated;
        self.epoch += 1;
        self.resolved = true;
    }
}

/// Trim the identifier and require both fields.
///
/// # Errors
///
/// Returns [`LoginError::MissingFields`] when either field is blank.
pub fn validate_login_input(identifier: &str, secret: &str) -> Result<(String, String), LoginError> {
    let identifier = identifier.trim();
    if identifier.is_empty() || secret.trim().is_empty() {
        return Err(LoginError::MissingFields);
    }
    Ok((identifier.to_owned(), secret.to_owned()))
}

/// Mutable access to a shared [`SessionStore`] without holding it across an
/// `.await`.
pub trait SessionAccess {
    type Storage;

    /// Run `f` against the store. `None` when the store is gone.
    fn with_store<R>(&self, f: impl FnOnce(&mut SessionStore<Self::Storage>) -> R) -> Option<R>;
}

impl<S> SessionAccess for std::cell::RefCell<SessionStore<S>> {
    type Storage = S;

    fn with_store<R>(&self, f: impl FnOnce(&mut SessionStore<S>) -> R) -> Option<R> {
        Some(f(&mut self.borrow_mut()))
    }
}

impl<S> SessionAccess for RwSignal<SessionStore<S>>
where
    S: Send + Sync + 'static,
{
    type Storage = S;

    fn with_store<R>(&self, f: impl FnOnce(&mut SessionStore<S>) -> R) -> Option<R> {
        self.try_update(f)
    }
}

/// Validate input, ask `authority`, and apply the answer to the session.
///
/// Returns the route to navigate to on success.
///
/// # Errors
///
/// Returns a [`LoginError`] for blank input, rejected or unreachable
/// authority, an unusable credential, or a sign-out while the call was pending.
pub async fn login<H, A>(
    session: &H,
    authority: &A,
    identifier: &str,
    secret: &str,
    intended: Option<&str>,
) -> Result<String, LoginError>
where
    H: SessionAccess,
    H::Storage: CredentialStorage,
    A: Authority,
{
    let (identifier, secret) = validate_login_input(identifier, secret)?;
    let ticket = session.with_store(|s| s.begin_login()).ok_or(LoginError::Superseded)?;
    let result = authority.authenticate(&identifier, &secret).await;
    session
        .with_store(|s| s.finish_login(ticket, result, intended))
        .ok_or(LoginError::Superseded)?
}
