//! Login page - gate in front of the dashboard.
//!
//! Accepts a credential pasted from the identity provider, or issues a mock
//! one. Either way the credential is stored as-is.

use coinpulse_core::{mock_credential, View};
use dioxus::prelude::*;

use crate::context::{use_services, use_view_guard};

#[component]
pub fn Login() -> Element {
    use_view_guard(View::Login);

    let services = use_services();
    let mut token = use_signal(String::new);
    let mut error = use_signal(|| None::<String>);

    let mut sign_in = move |credential: String| {
        let Some(services) = services() else {
            return;
        };
        match services.app.session().login(credential) {
            Ok(_) => error.set(None),
            Err(e) => {
                tracing::warn!("Login failed: {}", e);
                error.set(Some(e.to_string()));
            }
        }
    };

    rsx! {
        section { class: "login-page",
            h2 { class: "page-title", "Sign in" }
            p { class: "body-text", "Sign in to see live prices for the top 100 coins." }

            div { class: "login-form",
                input {
                    class: "text-input",
                    r#type: "password",
                    placeholder: "Paste your credential",
                    value: "{token}",
                    oninput: move |e| token.set(e.value()),
                    onkeydown: move |e: KeyboardEvent| {
                        if e.key() == Key::Enter {
                            sign_in(token());
                        }
                    },
                }
                button {
                    class: "btn-primary",
                    disabled: token().trim().is_empty(),
                    onclick: move |_| sign_in(token()),
                    "Sign in"
                }
            }

            div { class: "login-divider", "or" }

            button {
                class: "btn-secondary",
                onclick: move |_| sign_in(mock_credential()),
                "Continue with mock provider"
            }

            if let Some(message) = error() {
                p { class: "error-text", "{message}" }
            }
        }
    }
}
