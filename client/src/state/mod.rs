//! Shared client-side state modules.
//!
//! DESIGN
//! ======
//! `credential` owns token decoding; `session` owns the admin session state
//! machine built on top of it.

pub mod credential;
pub mod session;
