use anyhow::Result;
use async_trait::async_trait;
use streak_core::notify::NotificationOptions;
use streak_core::platform::Notifier;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{js_error, to_js};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "notifications"], js_name = create)]
    fn notifications_create(id: &str, options: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["chrome", "notifications"], js_name = clear)]
    fn notifications_clear(id: &str) -> js_sys::Promise;
}

/// `chrome.notifications`
pub struct ChromeNotifications;

#[async_trait(?Send)]
impl Notifier for ChromeNotifications {
    async fn create(&self, id: &str, options: &NotificationOptions) -> Result<()> {
        let created = JsFuture::from(notifications_create(id, to_js(options)?))
            .await
            .map_err(js_error)?;
        log::info!("Notification {:?} created", created.as_string().unwrap_or_default());
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<bool> {
        let cleared = JsFuture::from(notifications_clear(id))
            .await
            .map_err(js_error)?;
        Ok(cleared.as_bool().unwrap_or(false))
    }
}
