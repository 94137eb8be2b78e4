//! Offline mini-game.
//!
//! The simulation ticks in a [`GameLoop`] task; this component only mirrors
//! its snapshot into a signal and forwards jump and restart input. The loop
//! is dropped, and its task cancelled, when the component unmounts.

use std::rc::Rc;

use coinpulse_core::game::state::{
    GROUND_HEIGHT, OBSTACLE_HEIGHT, OBSTACLE_START, OBSTACLE_WIDTH, PLAYER_HEIGHT, PLAYER_LEFT,
    PLAYER_WIDTH,
};
use coinpulse_core::{GameLoop, GameState};
use dioxus::prelude::*;

#[component]
pub fn OfflineGame() -> Element {
    let game = use_hook(|| Rc::new(GameLoop::start()));
    let mut state = use_signal(GameState::new);

    let mirrored = game.clone();
    use_future(move || {
        let game = mirrored.clone();
        async move {
            let mut rx = game.subscribe();
            while rx.changed().await.is_ok() {
                state.set(rx.borrow_and_update().clone());
            }
        }
    });

    let on_key = game.clone();
    let on_click = game.clone();
    let on_restart = game.clone();

    let snapshot = state();
    let player_style = format!(
        "left: {}px; bottom: {}px; width: {}px; height: {}px;",
        PLAYER_LEFT,
        snapshot.player_bottom(),
        PLAYER_WIDTH,
        PLAYER_HEIGHT
    );
    let obstacle_style = format!(
        "left: {}px; bottom: {}px; width: {}px; height: {}px;",
        snapshot.obstacle_position, GROUND_HEIGHT, OBSTACLE_WIDTH, OBSTACLE_HEIGHT
    );
    let field_style = format!("width: {}px;", OBSTACLE_START);
    let ground_style = format!("height: {}px;", GROUND_HEIGHT);

    rsx! {
        div {
            class: "game",
            style: "{field_style}",
            tabindex: 0,
            onmounted: move |e| async move {
                let _ = e.set_focus(true).await;
            },
            onkeydown: move |e: KeyboardEvent| {
                if matches!(e.key(), Key::ArrowUp) || e.key() == Key::Character(" ".to_string()) {
                    e.prevent_default();
                    on_key.jump();
                }
            },
            onclick: move |_| on_click.jump(),

            div { class: "game-score", "Score: {snapshot.score}" }
            div { class: "game-player", style: "{player_style}" }
            div { class: "game-obstacle", style: "{obstacle_style}" }
            div { class: "game-ground", style: "{ground_style}" }

            if snapshot.game_over {
                div { class: "game-over",
                    p { "Game Over!" }
                    p { "Final score: {snapshot.score}" }
                    button {
                        class: "btn-primary",
                        onclick: move |e| {
                            e.stop_propagation();
                            on_restart.restart();
                        },
                        "Restart"
                    }
                }
            } else {
                div { class: "game-hint", "Press Space or click to jump" }
            }
        }
    }
}
