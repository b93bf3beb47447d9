use anyhow::Result;
use async_trait::async_trait;
use streak_core::platform::AlarmScheduler;
use streak_core::schedule::AlarmSchedule;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{js_error, to_js};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "alarms"], js_name = create)]
    fn alarms_create(name: &str, info: JsValue) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["chrome", "alarms"], js_name = get)]
    fn alarms_get(name: &str) -> js_sys::Promise;

    #[wasm_bindgen(js_namespace = ["chrome", "alarms"], js_name = clear)]
    fn alarms_clear(name: &str) -> js_sys::Promise;
}

/// `chrome.alarms`. Alarms persist across service-worker restarts but not
/// necessarily across browser restarts or updates.
pub struct ChromeAlarms;

#[async_trait(?Send)]
impl AlarmScheduler for ChromeAlarms {
    async fn create(&self, name: &str, schedule: AlarmSchedule) -> Result<()> {
        JsFuture::from(alarms_create(name, to_js(&schedule)?))
            .await
            .map_err(js_error)?;
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        let alarm = JsFuture::from(alarms_get(name)).await.map_err(js_error)?;
        Ok(!alarm.is_undefined() && !alarm.is_null())
    }

    async fn clear(&self, name: &str) -> Result<bool> {
        let cleared = JsFuture::from(alarms_clear(name)).await.map_err(js_error)?;
        Ok(cleared.as_bool().unwrap_or(false))
    }
}
