//! WASM-target tests for crawlchat-ui.
//!
//! Runs under wasm32-unknown-unknown via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use crawlchat_types::config::ClientConfig;
use crawlchat_ui::panels::results::score_label;
use crawlchat_ui::state::UiState;

#[wasm_bindgen_test]
fn score_label_formats_on_wasm() {
    assert_eq!(score_label(0.5), "0.5000");
}

#[wasm_bindgen_test]
fn ui_state_tracks_broken_thumbnails() {
    let mut state = UiState::new(&ClientConfig::default());
    let key = UiState::result_key("m", 0);
    state.mark_broken(key.clone());
    assert!(state.is_broken(&key));
}
