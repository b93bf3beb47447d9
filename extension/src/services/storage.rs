// Chrome Storage API Integration
// Settings live in the sync area (follows the user across devices), the
// status snapshot in the local area.

use anyhow::Result;
use async_trait::async_trait;
use streak_core::config::{KEY_CHECKED_AT, KEY_SOLVED_STATE, LOCAL_KEYS, SYNC_KEYS};
use streak_core::platform::{SettingsStore, StatusStore};
use streak_core::{StatusSnapshot, StoredSettings};
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{from_js, js_error, to_js};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "storage", "sync"], js_name = get)]
    fn sync_get(keys: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "sync"], js_name = set)]
    fn sync_set(items: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = get)]
    fn local_get(keys: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = set)]
    fn local_set(items: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["chrome", "storage", "local"], js_name = remove)]
    fn local_remove(keys: JsValue) -> js_sys::Promise;
}

fn key_list(keys: &[&str]) -> JsValue {
    let list = js_sys::Array::new();
    for key in keys {
        list.push(&JsValue::from_str(key));
    }
    list.into()
}

/// `chrome.storage.sync`: user configuration.
pub struct ChromeSyncStore;

#[async_trait(?Send)]
impl SettingsStore for ChromeSyncStore {
    async fn load_raw(&self) -> Result<StoredSettings> {
        let items = JsFuture::from(sync_get(key_list(&SYNC_KEYS)))
            .await
            .map_err(js_error)?;
        from_js(&items)
    }

    async fn save(&self, settings: &StoredSettings) -> Result<()> {
        log::info!("Saving settings...");
        JsFuture::from(sync_set(to_js(settings)?))
            .await
            .map_err(js_error)?;
        log::info!("Settings saved");
        Ok(())
    }
}

/// `chrome.storage.local`: last known status.
pub struct ChromeLocalStore;

#[async_trait(?Send)]
impl StatusStore for ChromeLocalStore {
    async fn load(&self) -> Result<StatusSnapshot> {
        let items = JsFuture::from(local_get(key_list(&LOCAL_KEYS)))
            .await
            .map_err(js_error)?;
        from_js(&items)
    }

    async fn save(&self, snapshot: &StatusSnapshot) -> Result<()> {
        JsFuture::from(local_set(to_js(snapshot)?))
            .await
            .map_err(js_error)?;
        Ok(())
    }

    async fn mark_unknown(&self, at: i64) -> Result<()> {
        let items = js_sys::Object::new();
        js_sys::Reflect::set(&items, &KEY_SOLVED_STATE.into(), &JsValue::NULL)
            .map_err(js_error)?;
        js_sys::Reflect::set(&items, &KEY_CHECKED_AT.into(), &JsValue::from_f64(at as f64))
            .map_err(js_error)?;

        JsFuture::from(local_set(items.into()))
            .await
            .map_err(js_error)?;
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        log::info!("Clearing stored status...");
        JsFuture::from(local_remove(key_list(&LOCAL_KEYS)))
            .await
            .map_err(js_error)?;
        Ok(())
    }
}
