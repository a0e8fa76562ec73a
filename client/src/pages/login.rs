//! Admin login page.
//!
//! The `from` query parameter, set by the route guard, names the page to
//! return to after signing in.

use leptos::prelude::*;
use leptos_router::NavigateOptions;
use leptos_router::hooks::{use_navigate, use_query_map};

use crate::net::api::AppAuthority;
use crate::state::session::{SessionStore, validate_login_input};
use crate::util::auth::{DESTINATION_PARAM, post_login_destination};
use crate::util::storage::BrowserStorage;

#[cfg(test)]
#[path = "login_test.rs"]
mod login_test;

/// Whether to send a visitor who arrives already signed in straight on.
///
/// Once the form has been submitted the submit handler owns navigation.
fn should_forward_signed_in(authenticated: bool, submitted: bool) -> bool {
    authenticated && !submitted
}

#[component]
pub fn LoginPage() -> impl IntoView {
    let session = expect_context::<RwSignal<SessionStore<BrowserStorage>>>();
    #[cfg_attr(not(feature = "hydrate"), allow(unused_variables))]
    let authority = expect_context::<AppAuthority>();
    let navigate = use_navigate();
    let query = use_query_map();
    let intended = move || query.with(|q| q.get(DESTINATION_PARAM));

    let email = RwSignal::new(String::new());
    let password = RwSignal::new(String::new());
    let info = RwSignal::new(String::new());
    let busy = RwSignal::new(false);
    let submitted = RwSignal::new(false);

    // A visitor who is already signed in goes straight on.
    {
        let navigate = navigate.clone();
        Effect::new(move || {
            let from = intended();
            let authenticated = session.with(SessionStore::is_authenticated);
            if !should_forward_signed_in(authenticated, submitted.get_untracked()) {
                return;
            }
            navigate(
                &post_login_destination(from.as_deref()),
                NavigateOptions { replace: true, ..NavigateOptions::default() },
            );
        });
    }

    let on_submit = move |ev: leptos::ev::SubmitEvent| {
        ev.prevent_default();
        if busy.get() {
            return;
        }
        let email_value = email.get();
        let password_value = password.get();
        if let Err(e) = validate_login_input(&email_value, &password_value) {
            info.set(e.user_message().to_owned());
            return;
        }
        busy.set(true);
        submitted.set(true);
        info.set("Signing in...".to_owned());

        #[cfg(feature = "hydrate")]
        {
            use crate::state::session::{LoginError, login};

            let authority = authority.clone();
            let navigate = navigate.clone();
            let from = intended();
            leptos::task::spawn_local(async move {
                match login(&session, &authority, &email_value, &password_value, from.as_deref()).await {
                    Ok(to) => {
                        info.set(String::new());
                        navigate(&to, NavigateOptions { replace: true, ..NavigateOptions::default() });
                    }
                    Err(LoginError::Superseded) => info.set(String::new()),
                    Err(e) => {
                        log::debug!("login: {e}");
                        info.set(e.user_message().to_owned());
                    }
                }
                busy.set(false);
            });
        }
    };

    view! {
        <div class="login-page">
            <div class="login-card">
                <h1>"DigitalNexus"</h1>
                <p class="login-card__subtitle">"Admin sign-in"</p>
                <form class="login-form" on:submit=on_submit>
                    <input
                        class="login-input"
                        type="email"
                        autocomplete="username"
                        placeholder="admin@example.com"
                        prop:value=move || email.get()
                        on:input=move |ev| email.set(event_target_value(&ev))
                    />
                    <input
                        class="login-input"
                        type="password"
                        autocomplete="current-password"
                        placeholder="Password"
                        prop:value=move || password.get()
                        on:input=move |ev| password.set(event_target_value(&ev))
                    />
                    <button class="login-button" type="submit" disabled=move || busy.get()>
                        "Sign In"
                    </button>
                </form>
                <Show when=move || !info.get().is_empty()>
                    <p class="login-message" role="alert">{move || info.get()}</p>
                </Show>
            </div>
        </div>
    }
}
