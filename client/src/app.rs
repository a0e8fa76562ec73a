//! Root application component with routing and context providers.

use leptos::prelude::*;
use leptos_meta::{MetaTags, Stylesheet, Title, provide_meta_context};
use leptos_router::{
    StaticSegment,
    components::{ParentRoute, Redirect, Route, Router, Routes},
};

use crate::components::admin_guard::AdminGuard;
use crate::config::ClientConfig;
use crate::net::api::AppAuthority;
use crate::pages::{
    admin::{BlogPage, DashboardPage, InventoryPage},
    home::HomePage,
    login::LoginPage,
};
use crate::state::session::SessionStore;
use crate::util::auth::DEFAULT_LANDING_ROUTE;
use crate::util::storage::BrowserStorage;

/// HTML shell rendered on the server for SSR + hydration.
pub fn shell(options: LeptosOptions) -> impl IntoView {
    view! {
        <!DOCTYPE html>
        <html lang="en">
            <head>
                <meta charset="utf-8"/>
                <meta name="viewport" content="width=device-width, initial-scale=1"/>
                <AutoReload options=options.clone()/>
                <HydrationScripts options/>
                <MetaTags/>
            </head>
            <body>
                <App/>
            </body>
        </html>
    }
}

/// Root application component.
///
/// Owns the one `SessionStore` for the page and provides it, with the
/// configured authentication authority, to every route.
#[component]
pub fn App() -> impl IntoView {
    provide_meta_context();

    let session = RwSignal::new(SessionStore::new(BrowserStorage));
    provide_context(session);
    provide_context(AppAuthority::from_config(&ClientConfig::from_build_env()));

    // Effects only run after hydration, so server-rendered output stays in
    // `Loading` and the guard never redirects before storage has been read.
    Effect::new(move || session.update(SessionStore::initialize));

    view! {
        <Stylesheet id="leptos" href="/pkg/storefront.css"/>
        <Title text="DigitalNexus"/>

        <Router>
            <Routes fallback=|| "Page not found.".into_view()>
                <Route path=StaticSegment("") view=HomePage/>
                <Route path=(StaticSegment("admin"), StaticSegment("login")) view=LoginPage/>
                <ParentRoute path=StaticSegment("admin") view=AdminGuard>
                    <Route path=StaticSegment("") view=|| view! { <Redirect path=DEFAULT_LANDING_ROUTE/> }/>
                    <Route path=StaticSegment("dashboard") view=DashboardPage/>
                    <Route path=StaticSegment("inventory") view=InventoryPage/>
                    <Route path=StaticSegment("blog") view=BlogPage/>
                </ParentRoute>
            </Routes>
        </Router>
    }
}
