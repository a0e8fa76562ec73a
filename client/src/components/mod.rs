//! Reusable UI components.
//!
//! SYSTEM CONTEXT
//! ==============
//! `admin_guard` gates the admin sub-tree on session state; `admin_layout` is
//! the shell it renders for signed-in administrators.

pub mod admin_guard;
pub mod admin_layout;
