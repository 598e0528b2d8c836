//! crawlchat — WASM entry point.
//!
//! This crate is the composition root: it builds the browser adapters,
//! hands them to the controller and runs the egui app on a canvas.

#![cfg(target_arch = "wasm32")]

mod app;

use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;

use crawlchat_types::{ClientError, Result};

const CANVAS_ID: &str = "crawlchat_canvas";

/// WASM entry point — called from index.html
#[wasm_bindgen(start)]
pub async fn main() {
    wasm_logger::init(wasm_logger::Config::default());
    log::info!("crawlchat starting...");

    let canvas = match find_canvas(CANVAS_ID) {
        Ok(canvas) => canvas,
        Err(e) => {
            log::error!("Cannot start: {}", e);
            return;
        }
    };
    let web_options = eframe::WebOptions::default();

    wasm_bindgen_futures::spawn_local(async move {
        let started = eframe::WebRunner::new()
            .start(
                canvas,
                web_options,
                Box::new(|cc| Ok(Box::new(app::CrawlChatApp::new(cc)))),
            )
            .await;
        if let Err(e) = started {
            log::error!("Failed to start eframe: {:?}", e);
        }
    });
}

fn find_canvas(id: &str) -> Result<web_sys::HtmlCanvasElement> {
    let document = web_sys::window()
        .and_then(|w| w.document())
        .ok_or_else(|| ClientError::JsInterop("no document".to_string()))?;
    document
        .get_element_by_id(id)
        .ok_or_else(|| ClientError::JsInterop(format!("no canvas element with id '{}'", id)))?
        .dyn_into::<web_sys::HtmlCanvasElement>()
        .map_err(|_| ClientError::JsInterop(format!("element '{}' is not a canvas", id)))
}
