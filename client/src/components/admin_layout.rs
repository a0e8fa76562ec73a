//! Admin shell: sidebar with the signed-in identity, section links, and
//! sign-out.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::components::A;
use leptos_router::hooks::use_navigate;

use crate::state::session::SessionStore;
use crate::util::storage::BrowserStorage;

#[component]
pub fn AdminLayout(children: Children) -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore<BrowserStorage>>>();
    let navigate = use_navigate();

    let name = move || session.with(|s| s.identity().map(|i| i.name.clone()).unwrap_or_default());
    let email = move || session.with(|s| s.identity().map(|i| i.email.clone()).unwrap_or_default());

    let on_logout = move |_| {
        if let Some(to) = session.try_update(SessionStore::logout) {
            navigate(to, NavigateOptions::default());
        }
    };

    view! {
        <div class="admin-layout">
            <aside class="admin-layout__sidebar">
                <div class="admin-layout__brand">
                    "DigitalNexus"
                    <span class="admin-layout__badge">"Admin"</span>
                </div>
                <div class="admin-layout__user">
                    <div class="admin-layout__user-name">{name}</div>
                    <div class="admin-layout__user-email">{email}</div>
                </div>
                <nav class="admin-layout__nav">
                    <A href="/admin/dashboard">"Dashboard"</A>
                    <A href="/admin/inventory">"Inventory"</A>
                    <A href="/admin/blog">"Blog CMS"</A>
                </nav>
                <button class="admin-layout__logout" on:click=on_logout>
                    "Logout"
                </button>
            </aside>
            <main class="admin-layout__content">{children()}</main>
        </div>
    }
}
