// chrome.* API bindings implementing the core platform traits.
// Values cross the JS boundary as JSON text; rejections become anyhow errors.

mod alarms;
mod notifications;
mod runtime;
mod storage;
mod tabs;

pub use alarms::ChromeAlarms;
pub use notifications::ChromeNotifications;
pub use runtime::ChromeRuntime;
pub use storage::{ChromeLocalStore, ChromeSyncStore};
pub use tabs::ChromeTabs;

use anyhow::{anyhow, Context, Result};
use chrono::{DateTime, Local};
use serde::{de::DeserializeOwned, Serialize};
use streak_core::platform::{Clock, Platform};
use wasm_bindgen::JsValue;

/// Describe a rejected promise or thrown JS value.
pub fn js_error(value: JsValue) -> anyhow::Error {
    if let Some(message) = js_sys::Reflect::get(&value, &"message".into())
        .ok()
        .and_then(|m| m.as_string())
    {
        return anyhow!(message);
    }
    anyhow!("{:?}", value)
}

pub fn to_js<T: Serialize + ?Sized>(value: &T) -> Result<JsValue> {
    let json = serde_json::to_string(value).context("Serialization error")?;
    js_sys::JSON::parse(&json).map_err(js_error)
}

/// `undefined` reads as JSON `null`.
pub fn from_js<T: DeserializeOwned>(value: &JsValue) -> Result<T> {
    if value.is_undefined() {
        return serde_json::from_str("null").context("Parse error");
    }
    let json: String = js_sys::JSON::stringify(value)
        .map_err(js_error)?
        .into();
    serde_json::from_str(&json).context("Parse error")
}

pub fn now_millis() -> i64 {
    js_sys::Date::now() as i64
}

pub struct BrowserClock;

impl Clock for BrowserClock {
    type Tz = Local;

    fn now(&self) -> DateTime<Local> {
        Local::now()
    }
}

/// The real platform. Every service is a zero-sized handle onto chrome.*,
/// so building one per event costs nothing.
pub struct ChromePlatform {
    settings: ChromeSyncStore,
    status: ChromeLocalStore,
    alarms: ChromeAlarms,
    notifications: ChromeNotifications,
    tabs: ChromeTabs,
    clock: BrowserClock,
}

impl ChromePlatform {
    pub fn new() -> Self {
        Self {
            settings: ChromeSyncStore,
            status: ChromeLocalStore,
            alarms: ChromeAlarms,
            notifications: ChromeNotifications,
            tabs: ChromeTabs,
            clock: BrowserClock,
        }
    }
}

impl Default for ChromePlatform {
    fn default() -> Self {
        Self::new()
    }
}

impl Platform for ChromePlatform {
    type Settings = ChromeSyncStore;
    type Status = ChromeLocalStore;
    type Alarms = ChromeAlarms;
    type Notifier = ChromeNotifications;
    type Tabs = ChromeTabs;
    type Clock = BrowserClock;

    fn settings(&self) -> &ChromeSyncStore {
        &self.settings
    }

    fn status(&self) -> &ChromeLocalStore {
        &self.status
    }

    fn alarms(&self) -> &ChromeAlarms {
        &self.alarms
    }

    fn notifier(&self) -> &ChromeNotifications {
        &self.notifications
    }

    fn tabs(&self) -> &ChromeTabs {
        &self.tabs
    }

    fn clock(&self) -> &BrowserClock {
        &self.clock
    }
}
