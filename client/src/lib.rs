//! # client
//!
//! Leptos + WASM frontend for the DigitalNexus storefront and its admin area.
//!
//! The admin area is gated by a client-side session (`state::session`) and a
//! route guard (`components::admin_guard`). Both are convenience layers for
//! display and routing; the admin API authorizes every request on its own.

pub mod app;
pub mod components;
pub mod config;
pub mod net;
pub mod pages;
pub mod state;
pub mod util;

/// WASM entry point: attach to the server-rendered document.
#[cfg(feature = "hydrate")]
#[wasm_bindgen::prelude::wasm_bindgen]
pub fn hydrate() {
    console_error_panic_hook::set_once();
    let level = if cfg!(debug_assertions) { log::Level::Debug } else { log::Level::Info };
    if console_log::init_with_level(level).is_err() {
        web_sys::console::warn_1(&"logger already initialized".into());
    }
    leptos::mount::hydrate_body(app::App);
}
