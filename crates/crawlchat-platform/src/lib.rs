//! Browser adapters for the crawl-and-chat client.
//!
//! - [`http::HttpApiClient`]: `ApiPort` over `fetch()` (gloo-net)
//! - [`event_source::EventSourceChannel`]: `StatusChannelPort` over `EventSource`
//! - [`storage`]: `StoragePort` backends for persisting settings

pub mod http;
pub mod event_source;
pub mod storage;

pub use event_source::EventSourceChannel;
pub use http::HttpApiClient;

#[cfg(test)]
mod tests;
