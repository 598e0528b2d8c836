//! Pick the best storage backend the browser offers.

use std::rc::Rc;
use crawlchat_core::ports::StoragePort;
use super::{IndexedDbStorage, MemoryStorage};

/// IndexedDB when it opens, otherwise memory. Never fails: losing
/// persistence only costs the user their saved settings.
pub async fn auto_detect_storage() -> Rc<dyn StoragePort> {
    match IndexedDbStorage::open().await {
        Ok(idb) => {
            log::info!("Storage backend: IndexedDB");
            Rc::new(idb)
        }
        Err(e) => {
            log::warn!("IndexedDB unavailable ({}), settings will not persist", e);
            Rc::new(MemoryStorage::new())
        }
    }
}
