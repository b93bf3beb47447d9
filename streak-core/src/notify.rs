use serde::Serialize;

use crate::config::{Settings, NOTIFICATION_ICON};
use crate::status::{SolvedState, StatusSnapshot};

pub const NOT_SOLVED_MESSAGE: &str =
    "You did not solve a problem on the most recent active day! 😥\n\nShow your consistency today! 💪";

pub const UNKNOWN_MESSAGE: &str =
    "Your streak status is unknown.\n\nVisit your profile page\nto update it. 🤔";

pub const OPEN_PROFILE_BUTTON: &str = "Open profile";

/// Why a reminder is shown.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Reminder {
    NotSolved,
    Unknown,
}

impl Reminder {
    pub fn message(self) -> &'static str {
        match self {
            Reminder::NotSolved => NOT_SOLVED_MESSAGE,
            Reminder::Unknown => UNKNOWN_MESSAGE,
        }
    }
}

/// Outcome of one evaluation of the stored status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decision {
    Notify(Reminder),
    Clear,
}

/// Decide whether the snapshot warrants a reminder under the given settings.
///
/// Solved never notifies; a disabled preference never notifies; an
/// unconfigured target never notifies.
pub fn decide(settings: &Settings, snapshot: &StatusSnapshot) -> Decision {
    if !settings.is_configured() {
        return Decision::Clear;
    }

    match snapshot.state {
        SolvedState::NotSolved if settings.notify_on_not_solved => {
            Decision::Notify(Reminder::NotSolved)
        }
        SolvedState::Unknown if settings.notify_on_unknown => Decision::Notify(Reminder::Unknown),
        _ => Decision::Clear,
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct NotificationButton {
    pub title: String,
}

/// Options passed to `chrome.notifications.create`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationOptions {
    #[serde(rename = "type")]
    pub kind: &'static str,
    pub icon_url: String,
    pub title: String,
    pub message: String,
    pub priority: u8,
    pub buttons: Vec<NotificationButton>,
    /// Keep the notification on screen until the user dismisses it.
    pub require_interaction: bool,
}

impl NotificationOptions {
    pub fn reminder(reminder: Reminder, username: &str) -> Self {
        Self {
            kind: "basic",
            icon_url: NOTIFICATION_ICON.to_string(),
            title: format!("⚠️ {}, streak reminder! ⚠️", username),
            message: reminder.message().to_string(),
            priority: 1,
            buttons: vec![NotificationButton {
                title: OPEN_PROFILE_BUTTON.to_string(),
            }],
            require_interaction: true,
        }
    }
}
