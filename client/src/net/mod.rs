//! Networking modules.
//!
//! SYSTEM CONTEXT
//! ==============
//! `api` talks to the authentication authority. Admin API collaborators take
//! the session's bearer header and handle their own requests.

pub mod api;
