//! WASM-target tests for crawlchat-core.
//!
//! Exercises the session store and endpoint helpers under
//! wasm32-unknown-unknown via `wasm-pack test --node`.

#![cfg(target_arch = "wasm32")]

use wasm_bindgen_test::*;

use crawlchat_core::endpoints::{join_url, validate_crawl_input, Endpoints};
use crawlchat_core::event_bus::EventBus;
use crawlchat_core::session::SessionStore;
use crawlchat_types::api::{CrawlRequest, CrawlResponse};
use crawlchat_types::event::{SignalKind, StatusEvent, CrawlStats};
use crawlchat_types::message::Role;
use crawlchat_types::session::CrawlPhase;

#[wasm_bindgen_test]
fn join_url_normalizes_slash() {
    assert_eq!(join_url("http://h/", "/chat"), "http://h/chat");
    assert_eq!(Endpoints::new("http://h").status("x"), "http://h/crawl/x/status");
}

#[wasm_bindgen_test]
fn validation_rejects_out_of_range_limit() {
    assert!(validate_crawl_input("https://e.com", 0).is_err());
    assert!(validate_crawl_input("https://e.com", 20).is_ok());
}

#[wasm_bindgen_test]
fn event_bus_signals() {
    let bus = EventBus::new();
    bus.signal(3, SignalKind::Opened);
    assert!(bus.has_pending());
    assert_eq!(bus.drain().len(), 1);
}

#[wasm_bindgen_test]
fn store_completes_crawl() {
    let mut store = SessionStore::new();
    let ticket = store.begin_crawl(&CrawlRequest { url: "https://e.com".to_string(), limit: 2 });
    assert!(store.crawl_started(ticket, &CrawlResponse {
        session_id: "abc".to_string(),
        message: String::new(),
        subscribe_url: None,
    }));
    store.apply_status(StatusEvent::Completed {
        summary: Some("Found 3 images".to_string()),
        stats: CrawlStats::default(),
    });
    assert_eq!(store.phase(), CrawlPhase::Ready);
    assert_eq!(store.transcript()[0].role, Role::Ai);
}
