// chrome.runtime messaging between the content script, the popup and the
// background worker.

use anyhow::Result;
use streak_core::protocol::{Ack, Message};
use streak_core::InitialData;
use wasm_bindgen::prelude::*;
use wasm_bindgen_futures::JsFuture;

use super::{from_js, js_error, to_js};

#[wasm_bindgen]
extern "C" {
    #[wasm_bindgen(js_namespace = ["chrome", "runtime"], js_name = sendMessage, catch)]
    fn send_message(message: JsValue) -> Result<js_sys::Promise, JsValue>;
}

pub struct ChromeRuntime;

impl ChromeRuntime {
    /// One-way publish: nobody has to be listening and no answer is awaited.
    /// Delivery failures are only logged.
    pub fn publish(message: &Message) {
        let promise = match to_js(message).and_then(|m| send_message(m).map_err(js_error)) {
            Ok(promise) => promise,
            Err(e) => {
                log::error!("Failed to send message: {:?}", e);
                return;
            }
        };

        wasm_bindgen_futures::spawn_local(async move {
            match JsFuture::from(promise).await {
                Ok(_) => log::debug!("Message delivered to background"),
                Err(e) => {
                    let e = js_error(e);
                    if e.to_string().contains("Receiving end does not exist") {
                        log::warn!(
                            "Background worker unreachable; the extension may have been reloaded or disabled"
                        );
                    } else {
                        log::error!("Failed to deliver message: {:?}", e);
                    }
                }
            }
        });
    }

    /// Send a request and wait for the background worker's answer.
    pub async fn request(message: &Message) -> Result<JsValue> {
        let promise = send_message(to_js(message)?).map_err(js_error)?;
        JsFuture::from(promise).await.map_err(js_error)
    }

    /// `None` when the background worker could not read storage.
    pub async fn initial_data() -> Result<Option<InitialData>> {
        let response = Self::request(&Message::GetInitialData).await?;
        from_js(&response)
    }

    pub async fn force_recheck() -> Result<Ack> {
        let response = Self::request(&Message::ForceRecheck).await?;
        from_js(&response)
    }
}
