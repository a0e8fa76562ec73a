//! Public landing page.

use leptos::prelude::*;
use leptos_router::components::A;

#[component]
pub fn HomePage() -> impl IntoView {
    view! {
        <div class="home-page">
            <h1>"DigitalNexus"</h1>
            <p>"Digital goods for creators and developers."</p>
            <A href="/admin/dashboard">"Admin"</A>
        </div>
    }
}
