use std::fmt;

use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::config::Settings;

/// Whether the user solved a problem on the most recent tracked day.
///
/// Storage and messages carry this as `true` / `false` / `null`; everything
/// in Rust matches on the enum.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum SolvedState {
    Solved,
    NotSolved,
    #[default]
    Unknown,
}

impl SolvedState {
    pub fn from_flag(flag: Option<bool>) -> Self {
        match flag {
            Some(true) => SolvedState::Solved,
            Some(false) => SolvedState::NotSolved,
            None => SolvedState::Unknown,
        }
    }

    pub fn as_flag(self) -> Option<bool> {
        match self {
            SolvedState::Solved => Some(true),
            SolvedState::NotSolved => Some(false),
            SolvedState::Unknown => None,
        }
    }
}

impl fmt::Display for SolvedState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            SolvedState::Solved => "solved",
            SolvedState::NotSolved => "not solved",
            SolvedState::Unknown => "unknown",
        })
    }
}

impl Serialize for SolvedState {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        self.as_flag().serialize(serializer)
    }
}

impl<'de> Deserialize<'de> for SolvedState {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Option::<bool>::deserialize(deserializer).map(SolvedState::from_flag)
    }
}

/// Last known status of the configured user, as kept in local storage.
///
/// Written only by the background worker. Serializing always emits all three
/// keys (absent values as `null`) so a save replaces the whole record.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusSnapshot {
    #[serde(rename = "lastSolvedState", default)]
    pub state: SolvedState,
    #[serde(rename = "lastStreakCount", default)]
    pub streak_count: Option<u32>,
    /// Epoch milliseconds of the sample behind `state`.
    #[serde(rename = "lastCheckedAt", default)]
    pub checked_at: Option<i64>,
}

impl From<&StatusSample> for StatusSnapshot {
    fn from(sample: &StatusSample) -> Self {
        Self {
            state: sample.solved,
            streak_count: sample.streak_count,
            checked_at: Some(sample.timestamp),
        }
    }
}

/// One reading of a profile page, sent by the content script.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StatusSample {
    #[serde(default)]
    pub solved: SolvedState,
    pub username: String,
    #[serde(default)]
    pub streak_count: Option<u32>,
    pub timestamp: i64,
}

/// Everything the popup needs to render, merged from both storage areas.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InitialData {
    pub target_username: String,
    #[serde(rename = "alarmIntervalMinutes")]
    pub alarm_interval: u32,
    pub notify_on_not_solved: bool,
    pub notify_on_unknown: bool,
    #[serde(rename = "lastSolvedState", default)]
    pub solved_state: SolvedState,
    #[serde(rename = "lastStreakCount", default)]
    pub streak_count: Option<u32>,
    #[serde(rename = "lastCheckedAt", default)]
    pub checked_at: Option<i64>,
}

impl InitialData {
    pub fn merge(settings: Settings, snapshot: StatusSnapshot) -> Self {
        Self {
            target_username: settings.target_username,
            alarm_interval: settings.alarm_interval,
            notify_on_not_solved: settings.notify_on_not_solved,
            notify_on_unknown: settings.notify_on_unknown,
            solved_state: snapshot.state,
            streak_count: snapshot.streak_count,
            checked_at: snapshot.checked_at,
        }
    }

    pub fn settings(&self) -> Settings {
        Settings {
            target_username: self.target_username.clone(),
            alarm_interval: self.alarm_interval,
            notify_on_not_solved: self.notify_on_not_solved,
            notify_on_unknown: self.notify_on_unknown,
        }
    }

    pub fn snapshot(&self) -> StatusSnapshot {
        StatusSnapshot {
            state: self.solved_state,
            streak_count: self.streak_count,
            checked_at: self.checked_at,
        }
    }
}
