//! Route guard for the `/admin/*` sub-tree.

use leptos::prelude::*;
use leptos_router::components::Outlet;
use leptos_router::hooks::{use_location, use_navigate};

use crate::components::admin_layout::AdminLayout;
use crate::state::session::SessionStore;
use crate::util::auth::{GuardDecision, decide, install_guard_redirect};
use crate::util::storage::BrowserStorage;

/// Parent view of every protected admin route.
///
/// Renders an empty placeholder while the session loads, redirects to the
/// login page once it resolves unauthenticated, and otherwise renders the
/// admin shell around the matched child route.
#[component]
pub fn AdminGuard() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore<BrowserStorage>>>();
    let location = use_location();
    install_guard_redirect(session, location.pathname, use_navigate());

    let allowed = Memo::new(move |_| {
        let path = location.pathname.get();
        session.with(|s| decide(s.state(), &path)) == GuardDecision::Render
    });

    view! {
        <Show
            when=move || allowed.get()
            fallback=|| view! { <div class="admin-guard__pending" aria-busy="true"></div> }
        >
            <AdminLayout>
                <Outlet/>
            </AdminLayout>
        </Show>
    }
}
