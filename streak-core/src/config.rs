use serde::{Deserialize, Deserializer, Serialize};

/// Site whose profile pages are scraped and opened.
pub const SITE_URL: &str = "https://solved.ac";

/// Recurring alarm that re-evaluates the stored status.
pub const CHECK_ALARM: &str = "solvedacStreakCheckAlarm";

/// One-shot alarm that forces the stored status back to unknown every morning.
pub const RESET_ALARM: &str = "dailyStatusResetAlarm";

/// Fixed id of the single notification this extension may show.
pub const NOTIFICATION_ID: &str = "solvedacStreakCheckNotification";

pub const NOTIFICATION_ICON: &str = "images/icon128.png";

pub const DEFAULT_ALARM_INTERVAL: u32 = 1;

/// Local hour at which the daily reset alarm fires.
pub const RESET_HOUR: u32 = 6;

/// Time the profile page gets to render its graph before the scraper samples it.
pub const SETTLE_DELAY_MS: u32 = 1500;

// Keys in chrome.storage.sync
pub const KEY_TARGET_USERNAME: &str = "targetUsername";
pub const KEY_ALARM_INTERVAL: &str = "alarmIntervalMinutes";
pub const KEY_NOTIFY_NOT_SOLVED: &str = "notifyOnNotSolved";
pub const KEY_NOTIFY_UNKNOWN: &str = "notifyOnUnknown";

pub const SYNC_KEYS: [&str; 4] = [
    KEY_TARGET_USERNAME,
    KEY_ALARM_INTERVAL,
    KEY_NOTIFY_NOT_SOLVED,
    KEY_NOTIFY_UNKNOWN,
];

// Keys in chrome.storage.local
pub const KEY_SOLVED_STATE: &str = "lastSolvedState";
pub const KEY_STREAK_COUNT: &str = "lastStreakCount";
pub const KEY_CHECKED_AT: &str = "lastCheckedAt";

/// Storage area holding the settings; changes elsewhere are not settings.
pub const SETTINGS_AREA: &str = "sync";

pub const LOCAL_KEYS: [&str; 3] = [KEY_SOLVED_STATE, KEY_STREAK_COUNT, KEY_CHECKED_AT];

pub fn profile_url(username: &str) -> String {
    format!("{}/profile/{}", SITE_URL, username)
}

/// Configuration exactly as it sits in sync storage.
///
/// Every field may be missing (fresh install) or hold something the popup
/// never writes (hand-edited storage, older versions). Nothing outside
/// [`StoredSettings::resolve`] looks at these raw values.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoredSettings {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub target_username: Option<String>,

    #[serde(
        rename = "alarmIntervalMinutes",
        default,
        deserialize_with = "lenient_number",
        skip_serializing_if = "Option::is_none"
    )]
    pub alarm_interval: Option<f64>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_on_not_solved: Option<bool>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notify_on_unknown: Option<bool>,
}

/// Accepts numbers and numeric strings; anything else reads as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<serde_json::Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(serde_json::Value::Number(n)) => n.as_f64(),
        Some(serde_json::Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    })
}

impl StoredSettings {
    /// Apply defaults: blank username means unconfigured, a missing or
    /// invalid interval becomes [`DEFAULT_ALARM_INTERVAL`], and the notify
    /// flags are on unless explicitly `false`.
    pub fn resolve(&self) -> Settings {
        let interval = match self.alarm_interval {
            Some(minutes) if minutes.is_finite() && minutes >= 1.0 => {
                minutes.min(u32::MAX as f64) as u32
            }
            _ => DEFAULT_ALARM_INTERVAL,
        };

        Settings {
            target_username: self
                .target_username
                .as_deref()
                .map(str::trim)
                .unwrap_or_default()
                .to_string(),
            alarm_interval: interval,
            notify_on_not_solved: self.notify_on_not_solved != Some(false),
            notify_on_unknown: self.notify_on_unknown != Some(false),
        }
    }
}

/// Resolved configuration. Always complete; see [`StoredSettings::resolve`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub target_username: String,
    pub alarm_interval: u32,
    pub notify_on_not_solved: bool,
    pub notify_on_unknown: bool,
}

impl Default for Settings {
    fn default() -> Self {
        StoredSettings::default().resolve()
    }
}

impl Settings {
    pub fn is_configured(&self) -> bool {
        !self.target_username.is_empty()
    }

    /// Case-insensitive match against the configured target.
    /// Never matches when no target is configured.
    pub fn is_target(&self, username: &str) -> bool {
        self.is_configured() && self.target_username.to_lowercase() == username.trim().to_lowercase()
    }

    pub fn profile_url(&self) -> Option<String> {
        self.is_configured()
            .then(|| profile_url(&self.target_username))
    }
}

impl From<&Settings> for StoredSettings {
    fn from(settings: &Settings) -> Self {
        Self {
            target_username: Some(settings.target_username.clone()),
            alarm_interval: Some(settings.alarm_interval as f64),
            notify_on_not_solved: Some(settings.notify_on_not_solved),
            notify_on_unknown: Some(settings.notify_on_unknown),
        }
    }
}

/// Which groups of sync keys changed in one storage event.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SettingsChange {
    pub username: bool,
    pub interval: bool,
    pub notify_flags: bool,
}

impl SettingsChange {
    /// Changes from a `chrome.storage.onChanged` event. Events for any area
    /// but [`SETTINGS_AREA`] produce an empty change.
    pub fn from_event<'a>(area: &str, keys: impl IntoIterator<Item = &'a str>) -> Self {
        if area != SETTINGS_AREA {
            return Self::default();
        }
        Self::from_keys(keys)
    }

    pub fn from_keys<'a>(keys: impl IntoIterator<Item = &'a str>) -> Self {
        let mut change = Self::default();
        for key in keys {
            match key {
                KEY_TARGET_USERNAME => change.username = true,
                KEY_ALARM_INTERVAL => change.interval = true,
                KEY_NOTIFY_NOT_SOLVED | KEY_NOTIFY_UNKNOWN => change.notify_flags = true,
                _ => {}
            }
        }
        change
    }

    pub fn is_empty(&self) -> bool {
        !(self.username || self.interval || self.notify_flags)
    }
}
