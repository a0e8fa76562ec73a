//! Admin section pages rendered inside the guarded shell.

use leptos::prelude::*;

use crate::state::session::SessionStore;
use crate::util::storage::BrowserStorage;

/// Default landing page after sign-in.
#[component]
pub fn DashboardPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore<BrowserStorage>>>();
    let greeting = move || {
        session.with(|s| match s.identity() {
            Some(identity) => format!("Welcome back, {}", identity.name),
            None => String::new(),
        })
    };

    view! {
        <section class="admin-page">
            <h1>"Dashboard"</h1>
            <p class="admin-page__greeting">{greeting}</p>
        </section>
    }
}

#[component]
pub fn InventoryPage() -> impl IntoView {
    view! {
        <section class="admin-page">
            <h1>"Inventory"</h1>
            <div id="inventory-editor" class="admin-page__editor"></div>
        </section>
    }
}

#[component]
pub fn BlogPage() -> impl IntoView {
    view! {
        <section class="admin-page">
            <h1>"Blog CMS"</h1>
            <div id="blog-editor" class="admin-page__editor"></div>
        </section>
    }
}
