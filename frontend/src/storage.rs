//! `window.localStorage` behind the store's persistence port.

use common::storage::{KeyValueStore, PersistenceError};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{DomException, Storage};

pub struct LocalStorage {
    storage: Storage,
}

impl LocalStorage {
    pub fn open() -> Result<Self, PersistenceError> {
        let window = web_sys::window()
            .ok_or_else(|| PersistenceError::Unavailable("no window".to_string()))?;
        match window.local_storage() {
            Ok(Some(storage)) => Ok(Self { storage }),
            Ok(None) => Err(PersistenceError::Unavailable(
                "localStorage is disabled".to_string(),
            )),
            Err(e) => Err(PersistenceError::Unavailable(describe(&e))),
        }
    }
}

impl KeyValueStore for LocalStorage {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        self.storage
            .get_item(key)
            .map_err(|e| PersistenceError::Backend(describe(&e)))
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), PersistenceError> {
        self.storage.set_item(key, value).map_err(|e| {
            if is_quota_error(&e) {
                PersistenceError::QuotaExceeded {
                    key: key.to_string(),
                    needed: key.len() + value.len(),
                }
            } else {
                PersistenceError::Backend(describe(&e))
            }
        })
    }

    fn remove(&mut self, key: &str) -> Result<(), PersistenceError> {
        self.storage
            .remove_item(key)
            .map_err(|e| PersistenceError::Backend(describe(&e)))
    }
}

fn is_quota_error(e: &JsValue) -> bool {
    e.dyn_ref::<DomException>()
        .map(|ex| ex.name() == "QuotaExceededError" || ex.code() == 22)
        .unwrap_or(false)
}

fn describe(e: &JsValue) -> String {
    match e.dyn_ref::<DomException>() {
        Some(ex) => format!("{}: {}", ex.name(), ex.message()),
        None => e.as_string().unwrap_or_else(|| format!("{:?}", e)),
    }
}
