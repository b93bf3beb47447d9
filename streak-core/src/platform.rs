// Platform services the orchestrator depends on.
// The extension crate implements these on top of chrome.* APIs; tests use
// the in-memory versions in `testing`.

use anyhow::Result;
use async_trait::async_trait;
use chrono::{DateTime, TimeZone};

use crate::config::{Settings, StoredSettings};
use crate::notify::NotificationOptions;
use crate::schedule::AlarmSchedule;
use crate::status::StatusSnapshot;

/// User configuration (`chrome.storage.sync`).
#[async_trait(?Send)]
pub trait SettingsStore {
    async fn load_raw(&self) -> Result<StoredSettings>;

    async fn save(&self, settings: &StoredSettings) -> Result<()>;

    /// Configuration with defaults applied.
    async fn load(&self) -> Result<Settings> {
        Ok(self.load_raw().await?.resolve())
    }
}

/// Last known status (`chrome.storage.local`).
#[async_trait(?Send)]
pub trait StatusStore {
    async fn load(&self) -> Result<StatusSnapshot>;

    /// Replace all snapshot fields in a single write.
    async fn save(&self, snapshot: &StatusSnapshot) -> Result<()>;

    /// Set the state to unknown and the timestamp to `at`, leaving the
    /// streak count as it is. One write.
    async fn mark_unknown(&self, at: i64) -> Result<()>;

    async fn clear(&self) -> Result<()>;
}

/// Named timers (`chrome.alarms`).
#[async_trait(?Send)]
pub trait AlarmScheduler {
    /// Create or replace the alarm called `name`.
    async fn create(&self, name: &str, schedule: AlarmSchedule) -> Result<()>;

    async fn exists(&self, name: &str) -> Result<bool>;

    /// Returns whether an alarm was removed.
    async fn clear(&self, name: &str) -> Result<bool>;
}

/// Desktop notifications (`chrome.notifications`).
#[async_trait(?Send)]
pub trait Notifier {
    async fn create(&self, id: &str, options: &NotificationOptions) -> Result<()>;

    /// Returns whether a notification was removed.
    async fn clear(&self, id: &str) -> Result<bool>;
}

/// Opening pages (`chrome.tabs`).
#[async_trait(?Send)]
pub trait TabOpener {
    async fn open(&self, url: &str) -> Result<()>;
}

pub trait Clock {
    /// The user's time zone. Daily schedules are computed in it, so it has to
    /// know about daylight saving changes, not just today's offset.
    type Tz: TimeZone;

    fn now(&self) -> DateTime<Self::Tz>;
}

/// Bundle of every service one orchestrator instance talks to.
pub trait Platform {
    type Settings: SettingsStore;
    type Status: StatusStore;
    type Alarms: AlarmScheduler;
    type Notifier: Notifier;
    type Tabs: TabOpener;
    type Clock: Clock;

    fn settings(&self) -> &Self::Settings;
    fn status(&self) -> &Self::Status;
    fn alarms(&self) -> &Self::Alarms;
    fn notifier(&self) -> &Self::Notifier;
    fn tabs(&self) -> &Self::Tabs;
    fn clock(&self) -> &Self::Clock;
}
