use anyhow::Result;
use async_trait::async_trait;
use streak_core::platform::TabOpener;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::js_error;

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "tabs"], js_name = create)]
    fn tabs_create(properties: JsValue) -> js_sys::Promise;
}

/// `chrome.tabs`
pub struct ChromeTabs;

#[async_trait(?Send)]
impl TabOpener for ChromeTabs {
    async fn open(&self, url: &str) -> Result<()> {
        let properties = js_sys::Object::new();
        js_sys::Reflect::set(&properties, &"url".into(), &url.into()).map_err(js_error)?;
        JsFuture::from(tabs_create(properties.into()))
            .await
            .map_err(js_error)?;
        Ok(())
    }
}
