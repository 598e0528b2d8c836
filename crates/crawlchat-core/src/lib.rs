//! Platform-independent core of the crawl-and-chat client.
//!
//! Everything here runs on the UI thread. Adapters in `crawlchat-platform`
//! implement the traits in [`ports`] and report back through the
//! [`event_bus::EventBus`]; the [`controller::ChatController`] is the only
//! writer of session state.

pub mod endpoints;
pub mod ports;
pub mod event_bus;
pub mod channel;
pub mod session;
pub mod controller;
pub mod tasks;
