//! Chatbot Component
//!
//! Floating assistant panel on the dashboard. The transcript lives in a
//! signal; each question is sent in the background and the answer (or an
//! inline error) is appended when it arrives.

use coinpulse_core::{ChatRole, Conversation};
use dioxus::prelude::*;

use crate::context::use_services;

/// The assistant panel is expanded when the dashboard first renders.
const PANEL_STARTS_OPEN: bool = true;

#[component]
pub fn Chatbot(
    /// Coin the questions are about, if one is selected
    coin_id: Option<String>,
) -> Element {
    let services = use_services();
    let mut open = use_signal(|| PANEL_STARTS_OPEN);
    let mut input = use_signal(String::new);
    let mut waiting = use_signal(|| false);
    let mut conversation = use_signal(|| {
        services
            .peek()
            .as_ref()
            .map(|s| s.app.conversation())
            .unwrap_or_else(Conversation::default)
    });

    let mut send = move |coin_id: Option<String>| {
        if waiting() {
            return;
        }
        let Some(services) = services() else {
            return;
        };
        let Some(request) = conversation.write().begin(&input(), coin_id.as_deref()) else {
            return;
        };

        input.set(String::new());
        waiting.set(true);
        spawn(async move {
            let result = services.chat.send(&request).await;
            if let Err(ref e) = result {
                tracing::warn!("Chat request failed: {}", e);
            }
            conversation.write().complete(result);
            waiting.set(false);
        });
    };

    let turns = conversation.read().turns().to_vec();
    let coin_for_key = coin_id.clone();
    let coin_for_click = coin_id.clone();
    let can_send = !input().trim().is_empty() && !waiting();

    rsx! {
        div { class: "chatbot",
            if open() {
                div { class: "chatbot-panel",
                    div { class: "chatbot-header",
                        span { "Crypto Assistant" }
                        if let Some(coin) = coin_id.as_ref() {
                            span { class: "chatbot-coin", "About: {coin}" }
                        }
                    }

                    div { class: "chatbot-messages",
                        for (i, turn) in turns.iter().enumerate() {
                            div {
                                key: "{i}",
                                class: match turn.role {
                                    ChatRole::User => "chat-message chat-message-user",
                                    ChatRole::Assistant => "chat-message chat-message-assistant",
                                },
                                "{turn.content}"
                            }
                        }
                        if waiting() {
                            div { class: "chat-message chat-message-assistant chat-thinking", "Thinking..." }
                        }
                    }

                    div { class: "chatbot-input",
                        input {
                            class: "text-input",
                            r#type: "text",
                            placeholder: "Ask about crypto...",
                            value: "{input}",
                            disabled: waiting(),
                            oninput: move |e| input.set(e.value()),
                            onkeydown: move |e: KeyboardEvent| {
                                if e.key() == Key::Enter && !e.modifiers().shift() {
                                    e.prevent_default();
                                    send(coin_for_key.clone());
                                }
                            },
                        }
                        button {
                            class: "btn-primary",
                            disabled: !can_send,
                            onclick: move |_| send(coin_for_click.clone()),
                            "Send"
                        }
                    }
                }
            }

            button {
                class: "chatbot-toggle",
                onclick: move |_| open.set(!open()),
                if open() { "✕" } else { "💬" }
            }
        }
    }
}
