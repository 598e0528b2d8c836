//! Async jobs the app spawns. Each one awaits a port and reports the
//! outcome on the event bus instead of touching session state.

use crawlchat_types::{
    Result, ClientError,
    api::{ChatRequest, CrawlRequest},
    config::{ClientConfig, CONFIG_STORAGE_KEY},
    event::ClientEvent,
};
use crate::event_bus::EventBus;
use crate::ports::{ApiPort, StoragePort};
use crate::session::Ticketed;

pub async fn start_crawl(api: &dyn ApiPort, req: Ticketed<CrawlRequest>, bus: &EventBus) {
    let Ticketed { ticket, request } = req;
    let result = api.start_crawl(&request).await;
    match &result {
        Ok(resp) => log::info!("Crawl session {} created for {}", resp.session_id, request.url),
        Err(e) => log::warn!("POST /crawl failed: {}", e),
    }
    bus.emit(ClientEvent::CrawlStarted { ticket, result });
}

pub async fn send_query(api: &dyn ApiPort, req: Ticketed<ChatRequest>, bus: &EventBus) {
    let Ticketed { ticket, request } = req;
    log::debug!(
        "Sending query #{} with {} turns of history",
        ticket,
        request.chat_history.len()
    );
    let result = api.send_query(&request).await;
    if let Err(e) = &result {
        log::warn!("POST /chat failed: {}", e);
    }
    bus.emit(ClientEvent::QueryAnswered {
        ticket,
        session_id: request.session_id,
        result,
    });
}

/// Health check and session listing, one after the other.
pub async fn refresh_diagnostics(api: &dyn ApiPort, bus: &EventBus) {
    bus.emit(ClientEvent::Health(api.check_health().await));
    bus.emit(ClientEvent::Sessions(api.list_sessions().await));
}

/// Read the persisted config. `Ok(None)` when nothing has been saved.
pub async fn load_config(storage: &dyn StoragePort) -> Result<Option<ClientConfig>> {
    match storage.get(CONFIG_STORAGE_KEY).await? {
        Some(bytes) => {
            let config = serde_json::from_slice::<ClientConfig>(&bytes)?.normalized();
            config.validate()?;
            Ok(Some(config))
        }
        None => Ok(None),
    }
}

pub async fn save_config(storage: &dyn StoragePort, config: &ClientConfig) -> Result<()> {
    let json = serde_json::to_vec(config)?;
    storage
        .set(CONFIG_STORAGE_KEY, &json)
        .await
        .map_err(|e| ClientError::Storage(format!("saving config: {}", e)))
}
