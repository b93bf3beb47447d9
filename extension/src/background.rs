// Background service worker for the streak reminder
// Minimal dependencies - no Dioxus, built with --no-default-features
// All business logic lives in streak-core; JavaScript only forwards chrome events here

use std::future::Future;

use solved_streak_extension::services::{from_js, to_js, ChromePlatform};
use streak_core::{Message, Orchestrator, SettingsChange};
use wasm_bindgen::prelude::*;

// Dummy main for binary target
fn main() {}

/// The orchestrator is stateless, so every event gets a fresh one.
fn orchestrator() -> Orchestrator<ChromePlatform> {
    Orchestrator::new(ChromePlatform::new())
}

/// Run an event handler to completion and hand JS a promise for it, so the
/// service worker stays alive until the handler is done.
fn run<F>(handler: F) -> js_sys::Promise
where
    F: Future<Output = ()> + 'static,
{
    wasm_bindgen_futures::future_to_promise(async move {
        handler.await;
        Ok(JsValue::UNDEFINED)
    })
}

/// Initialize background service worker
/// Called once from the JavaScript glue after the wasm module loads
#[wasm_bindgen]
pub fn init_background() {
    wasm_logger::init(wasm_logger::Config::new(log::Level::Info));
    log::info!("Streak checker background service initialized");
}

/// chrome.runtime.onInstalled
#[wasm_bindgen]
pub fn handle_install(reason: String) -> js_sys::Promise {
    log::info!("Extension {}", reason);
    run(async { orchestrator().on_installed().await })
}

/// chrome.runtime.onStartup
#[wasm_bindgen]
pub fn handle_startup() -> js_sys::Promise {
    run(async { orchestrator().on_startup().await })
}

/// chrome.storage.onChanged
#[wasm_bindgen]
pub fn handle_storage_change(changes: JsValue, area_name: String) -> js_sys::Promise {
    let keys: Vec<String> = js_sys::Object::keys(&js_sys::Object::from(changes))
        .iter()
        .filter_map(|key| key.as_string())
        .collect();
    let change = SettingsChange::from_event(&area_name, keys.iter().map(String::as_str));
    if change.is_empty() {
        return js_sys::Promise::resolve(&JsValue::UNDEFINED);
    }

    run(async move { orchestrator().on_settings_changed(change).await })
}

/// chrome.alarms.onAlarm
#[wasm_bindgen]
pub fn handle_alarm(name: String) -> js_sys::Promise {
    run(async move { orchestrator().on_alarm(&name).await })
}

/// chrome.runtime.onMessage
///
/// Returns a promise for the response when the sender waits for one, and
/// `undefined` otherwise so the glue can tell chrome not to keep the channel
/// open.
#[wasm_bindgen]
pub fn handle_message(message: JsValue) -> Option<js_sys::Promise> {
    let message: Message = match from_js(&message) {
        Ok(message) => message,
        Err(e) => {
            log::debug!("Ignoring unrecognized message: {:?}", e);
            return None;
        }
    };

    if !message.expects_response() {
        wasm_bindgen_futures::spawn_local(async move {
            orchestrator().handle_message(message).await;
        });
        return None;
    }

    Some(wasm_bindgen_futures::future_to_promise(async move {
        match orchestrator().handle_message(message).await {
            Some(response) => to_js(&response).or_else(|e| {
                log::error!("Failed to encode response: {:?}", e);
                Ok(JsValue::NULL)
            }),
            None => Ok(JsValue::NULL),
        }
    }))
}

/// chrome.notifications.onClicked
#[wasm_bindgen]
pub fn handle_notification_click(notification_id: String) -> js_sys::Promise {
    log::info!("Notification clicked: {}", notification_id);
    run(async move {
        orchestrator()
            .on_notification_clicked(&notification_id)
            .await
    })
}

/// chrome.notifications.onButtonClicked
#[wasm_bindgen]
pub fn handle_notification_button_click(notification_id: String, button_index: u32) -> js_sys::Promise {
    log::info!(
        "Notification button {} clicked: {}",
        button_index,
        notification_id
    );
    run(async move {
        orchestrator()
            .on_notification_button_clicked(&notification_id, button_index)
            .await
    })
}
