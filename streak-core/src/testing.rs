//! In-memory platform for exercising the orchestrator without a browser.

use std::cell::{Cell, RefCell};
use std::collections::BTreeMap;

use anyhow::{bail, Result};
use async_trait::async_trait;
use chrono::{DateTime, FixedOffset, TimeZone};

use crate::config::StoredSettings;
use crate::notify::NotificationOptions;
use crate::platform::{AlarmScheduler, Clock, Notifier, Platform, SettingsStore, StatusStore, TabOpener};
use crate::schedule::AlarmSchedule;
use crate::status::{SolvedState, StatusSnapshot};

#[derive(Default)]
pub struct MemorySettings {
    pub stored: RefCell<StoredSettings>,
    pub fail: Cell<bool>,
}

#[async_trait(?Send)]
impl SettingsStore for MemorySettings {
    async fn load_raw(&self) -> Result<StoredSettings> {
        if self.fail.get() {
            bail!("sync storage unavailable");
        }
        Ok(self.stored.borrow().clone())
    }

    async fn save(&self, settings: &StoredSettings) -> Result<()> {
        if self.fail.get() {
            bail!("sync storage unavailable");
        }
        *self.stored.borrow_mut() = settings.clone();
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryStatus {
    /// `None` when nothing is stored.
    pub snapshot: RefCell<Option<StatusSnapshot>>,
    pub writes: Cell<usize>,
    pub fail: Cell<bool>,
}

impl MemoryStatus {
    pub fn current(&self) -> Option<StatusSnapshot> {
        self.snapshot.borrow().clone()
    }
}

#[async_trait(?Send)]
impl StatusStore for MemoryStatus {
    async fn load(&self) -> Result<StatusSnapshot> {
        if self.fail.get() {
            bail!("local storage unavailable");
        }
        Ok(self.current().unwrap_or_default())
    }

    async fn save(&self, snapshot: &StatusSnapshot) -> Result<()> {
        if self.fail.get() {
            bail!("local storage unavailable");
        }
        *self.snapshot.borrow_mut() = Some(snapshot.clone());
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    async fn mark_unknown(&self, at: i64) -> Result<()> {
        if self.fail.get() {
            bail!("local storage unavailable");
        }
        let mut snapshot = self.current().unwrap_or_default();
        snapshot.state = SolvedState::Unknown;
        snapshot.checked_at = Some(at);
        *self.snapshot.borrow_mut() = Some(snapshot);
        self.writes.set(self.writes.get() + 1);
        Ok(())
    }

    async fn clear(&self) -> Result<()> {
        if self.fail.get() {
            bail!("local storage unavailable");
        }
        *self.snapshot.borrow_mut() = None;
        Ok(())
    }
}

#[derive(Default)]
pub struct MemoryAlarms {
    pub alarms: RefCell<BTreeMap<String, AlarmSchedule>>,
    pub cleared: RefCell<Vec<String>>,
}

impl MemoryAlarms {
    pub fn get(&self, name: &str) -> Option<AlarmSchedule> {
        self.alarms.borrow().get(name).copied()
    }
}

#[async_trait(?Send)]
impl AlarmScheduler for MemoryAlarms {
    async fn create(&self, name: &str, schedule: AlarmSchedule) -> Result<()> {
        self.alarms.borrow_mut().insert(name.to_string(), schedule);
        Ok(())
    }

    async fn exists(&self, name: &str) -> Result<bool> {
        Ok(self.alarms.borrow().contains_key(name))
    }

    async fn clear(&self, name: &str) -> Result<bool> {
        self.cleared.borrow_mut().push(name.to_string());
        Ok(self.alarms.borrow_mut().remove(name).is_some())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NotifierCall {
    Create(String),
    Clear(String),
}

#[derive(Default)]
pub struct MemoryNotifier {
    pub shown: RefCell<BTreeMap<String, NotificationOptions>>,
    pub calls: RefCell<Vec<NotifierCall>>,
    pub fail_create: Cell<bool>,
}

impl MemoryNotifier {
    pub fn get(&self, id: &str) -> Option<NotificationOptions> {
        self.shown.borrow().get(id).cloned()
    }

    pub fn count(&self) -> usize {
        self.shown.borrow().len()
    }
}

#[async_trait(?Send)]
impl Notifier for MemoryNotifier {
    async fn create(&self, id: &str, options: &NotificationOptions) -> Result<()> {
        self.calls.borrow_mut().push(NotifierCall::Create(id.to_string()));
        if self.fail_create.get() {
            bail!("notifications are blocked");
        }
        if self.shown.borrow().contains_key(id) {
            bail!("notification {} already shown", id);
        }
        self.shown.borrow_mut().insert(id.to_string(), options.clone());
        Ok(())
    }

    async fn clear(&self, id: &str) -> Result<bool> {
        self.calls.borrow_mut().push(NotifierCall::Clear(id.to_string()));
        Ok(self.shown.borrow_mut().remove(id).is_some())
    }
}

#[derive(Default)]
pub struct MemoryTabs {
    pub opened: RefCell<Vec<String>>,
}

#[async_trait(?Send)]
impl TabOpener for MemoryTabs {
    async fn open(&self, url: &str) -> Result<()> {
        self.opened.borrow_mut().push(url.to_string());
        Ok(())
    }
}

pub struct FixedClock {
    pub now: Cell<DateTime<FixedOffset>>,
}

impl FixedClock {
    pub fn set(&self, now: DateTime<FixedOffset>) {
        self.now.set(now);
    }
}

impl Default for FixedClock {
    /// 2024-03-10 12:00 at UTC+9.
    fn default() -> Self {
        let kst = FixedOffset::east_opt(9 * 3600).unwrap();
        let now = kst.with_ymd_and_hms(2024, 3, 10, 12, 0, 0).unwrap();
        Self {
            now: Cell::new(now),
        }
    }
}

impl Clock for FixedClock {
    type Tz = FixedOffset;

    fn now(&self) -> DateTime<FixedOffset> {
        self.now.get()
    }
}

#[derive(Default)]
pub struct TestPlatform {
    pub settings: MemorySettings,
    pub status: MemoryStatus,
    pub alarms: MemoryAlarms,
    pub notifier: MemoryNotifier,
    pub tabs: MemoryTabs,
    pub clock: FixedClock,
}

impl TestPlatform {
    pub fn configured(username: &str, interval: u32) -> Self {
        let platform = Self::default();
        *platform.settings.stored.borrow_mut() = StoredSettings {
            target_username: Some(username.to_string()),
            alarm_interval: Some(interval as f64),
            notify_on_not_solved: Some(true),
            notify_on_unknown: Some(true),
        };
        platform
    }
}

impl Platform for TestPlatform {
    type Settings = MemorySettings;
    type Status = MemoryStatus;
    type Alarms = MemoryAlarms;
    type Notifier = MemoryNotifier;
    type Tabs = MemoryTabs;
    type Clock = FixedClock;

    fn settings(&self) -> &MemorySettings {
        &self.settings
    }

    fn status(&self) -> &MemoryStatus {
        &self.status
    }

    fn alarms(&self) -> &MemoryAlarms {
        &self.alarms
    }

    fn notifier(&self) -> &MemoryNotifier {
        &self.notifier
    }

    fn tabs(&self) -> &MemoryTabs {
        &self.tabs
    }

    fn clock(&self) -> &FixedClock {
        &self.clock
    }
}
