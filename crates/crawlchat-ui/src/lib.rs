//! egui front end for the crawl-and-chat client.
//!
//! Panels read the session through `crawlchat_core::controller::ChatController`
//! getters and hand user intents back to the app as return values. Nothing
//! here performs I/O.

pub mod panels;
pub mod state;
pub mod theme;

#[cfg(test)]
mod tests;
