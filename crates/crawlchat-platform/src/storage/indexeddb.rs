//! IndexedDB storage backend. Survives page reloads.
//!
//! IDB requests are callback based; `await_request` bridges one request
//! to a future through a oneshot channel and detaches its callbacks once
//! it settles.

use std::cell::RefCell;
use std::rc::Rc;

use async_trait::async_trait;
use futures::channel::oneshot;
use js_sys::Uint8Array;
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Event, IdbDatabase, IdbObjectStore, IdbRequest, IdbTransactionMode};

use crawlchat_core::ports::StoragePort;
use crawlchat_types::{ClientError, Result};

const DB_NAME: &str = "crawlchat";
const STORE_NAME: &str = "settings";
const DB_VERSION: u32 = 1;

pub struct IndexedDbStorage {
    db: IdbDatabase,
}

impl IndexedDbStorage {
    /// Open (or create) the settings database.
    pub async fn open() -> Result<Self> {
        let factory = web_sys::window()
            .ok_or_else(|| storage_error("no window object"))?
            .indexed_db()
            .map_err(js_error)?
            .ok_or_else(|| storage_error("IndexedDB not available"))?;

        let open_req = factory
            .open_with_u32(DB_NAME, DB_VERSION)
            .map_err(js_error)?;

        let upgrade_req = open_req.clone();
        let on_upgrade = Closure::wrap(Box::new(move |_event: Event| {
            let db = upgrade_req
                .result()
                .ok()
                .and_then(|value| value.dyn_into::<IdbDatabase>().ok());
            match db {
                Some(db) if !db.object_store_names().contains(STORE_NAME) => {
                    if let Err(e) = db.create_object_store(STORE_NAME) {
                        log::error!("Creating IndexedDB store failed: {:?}", e);
                    }
                }
                Some(_) => {}
                None => log::error!("IndexedDB upgrade without a database"),
            }
        }) as Box<dyn FnMut(Event)>);
        open_req.set_onupgradeneeded(Some(on_upgrade.as_ref().unchecked_ref()));

        let opened = await_request(&open_req).await;
        open_req.set_onupgradeneeded(None);
        drop(on_upgrade);

        let db = opened?.dyn_into::<IdbDatabase>().map_err(js_error)?;
        Ok(Self { db })
    }

    fn store(&self, mode: IdbTransactionMode) -> Result<IdbObjectStore> {
        self.db
            .transaction_with_str_and_mode(STORE_NAME, mode)
            .and_then(|tx| tx.object_store(STORE_NAME))
            .map_err(js_error)
    }
}

#[async_trait(?Send)]
impl StoragePort for IndexedDbStorage {
    async fn get(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let req = self
            .store(IdbTransactionMode::Readonly)?
            .get(&JsValue::from_str(key))
            .map_err(js_error)?;
        let value = await_request(&req).await?;
        if value.is_undefined() || value.is_null() {
            return Ok(None);
        }
        Ok(Some(Uint8Array::new(&value).to_vec()))
    }

    async fn set(&self, key: &str, value: &[u8]) -> Result<()> {
        let req = self
            .store(IdbTransactionMode::Readwrite)?
            .put_with_key(&Uint8Array::from(value), &JsValue::from_str(key))
            .map_err(js_error)?;
        await_request(&req).await.map(|_| ())
    }

    async fn delete(&self, key: &str) -> Result<()> {
        let req = self
            .store(IdbTransactionMode::Readwrite)?
            .delete(&JsValue::from_str(key))
            .map_err(js_error)?;
        await_request(&req).await.map(|_| ())
    }

    fn backend_name(&self) -> &str {
        "indexeddb"
    }
}

/// Resolve when `req` fires success or error.
async fn await_request(req: &IdbRequest) -> Result<JsValue> {
    let (tx, rx) = oneshot::channel::<Result<JsValue>>();
    let tx = Rc::new(RefCell::new(Some(tx)));

    let on_success = {
        let tx = tx.clone();
        let req = req.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(req.result().map_err(js_error));
            }
        }) as Box<dyn FnMut(Event)>)
    };
    let on_error = {
        let tx = tx.clone();
        Closure::wrap(Box::new(move |_event: Event| {
            if let Some(tx) = tx.borrow_mut().take() {
                let _ = tx.send(Err(storage_error("IndexedDB request failed")));
            }
        }) as Box<dyn FnMut(Event)>)
    };

    req.set_onsuccess(Some(on_success.as_ref().unchecked_ref()));
    req.set_onerror(Some(on_error.as_ref().unchecked_ref()));

    let outcome = rx
        .await
        .unwrap_or_else(|_| Err(storage_error("IndexedDB request abandoned")));

    req.set_onsuccess(None);
    req.set_onerror(None);
    outcome
}

fn storage_error(message: &str) -> ClientError {
    ClientError::Storage(message.to_string())
}

fn js_error(value: JsValue) -> ClientError {
    ClientError::Storage(format!("{:?}", value))
}
