//! Page modules for route-level screens.
//!
//! ARCHITECTURE
//! ============
//! `home` is public. `login` is the sign-in entry point. The remaining admin
//! pages render inside the guarded admin shell; their inventory and blog
//! editors are served by the admin API and only framed here.

pub mod admin;
pub mod home;
pub mod login;
