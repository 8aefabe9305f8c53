//! `window.localStorage` as a [`KeyValueStore`].

use pp_core::{KeyValueStore, PlannerError, Result};
use wasm_bindgen::JsValue;
use web_sys::Storage;

/// Browser local storage. Private browsing modes and sandboxed iframes can
/// deny access entirely; every operation then reports a storage error and
/// the session carries on in memory.
pub struct LocalStorage {
    storage: Option<Storage>,
}

impl LocalStorage {
    pub fn open() -> Self {
        let storage = web_sys::window().and_then(|w| w.local_storage().ok().flatten());
        if storage.is_none() {
            log::warn!("localStorage unavailable; drawing will not be saved");
        }
        Self { storage }
    }

    fn storage(&self) -> Result<&Storage> {
        self.storage
            .as_ref()
            .ok_or_else(|| PlannerError::Storage("localStorage unavailable".to_string()))
    }
}

impl KeyValueStore for LocalStorage {
    fn load(&self, key: &str) -> Result<Option<String>> {
        self.storage()?.get_item(key).map_err(js_error)
    }

    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.storage()?.set_item(key, value).map_err(js_error)
    }
}

fn js_error(err: JsValue) -> PlannerError {
    PlannerError::Storage(err.as_string().unwrap_or_else(|| format!("{err:?}")))
}
