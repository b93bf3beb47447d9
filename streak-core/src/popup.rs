// Popup view model: what the settings/status popup shows, independent of how
// it is rendered

use std::fmt;

use chrono::{DateTime, TimeZone, Utc};

use crate::config::{Settings, DEFAULT_ALARM_INTERVAL};
use crate::status::{InitialData, SolvedState};

pub const LOADING_MESSAGE: &str = "Loading status...";
pub const LOAD_FAILED_MESSAGE: &str = "Could not load data.\nPlease refresh in a moment.";
pub const SAVED_MESSAGE: &str = "Settings saved!";
pub const SAVE_FAILED_MESSAGE: &str = "Could not save settings.";

/// How long a save confirmation stays visible.
pub const SAVE_MESSAGE_TIMEOUT_MS: u32 = 2500;

/// The four mutually exclusive status displays.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StatusView {
    Unconfigured,
    Solved { username: String },
    NotSolved { username: String },
    Unknown { username: String },
}

impl StatusView {
    pub fn new(username: &str, state: SolvedState) -> Self {
        if username.is_empty() {
            return StatusView::Unconfigured;
        }
        let username = username.to_string();
        match state {
            SolvedState::Solved => StatusView::Solved { username },
            SolvedState::NotSolved => StatusView::NotSolved { username },
            SolvedState::Unknown => StatusView::Unknown { username },
        }
    }

    pub fn icon(&self) -> &'static str {
        match self {
            StatusView::Unconfigured => "⚠️",
            StatusView::Solved { .. } => "✅",
            StatusView::NotSolved { .. } => "❌",
            StatusView::Unknown { .. } => "❓",
        }
    }

    pub fn message(&self) -> String {
        match self {
            StatusView::Unconfigured => "Set a username\nand save.".to_string(),
            StatusView::Solved { username } => {
                format!("{},\nsolved on the most recent active day!", username)
            }
            StatusView::NotSolved { username } => {
                format!("{},\nnothing solved on the most recent active day", username)
            }
            StatusView::Unknown { username } => format!(
                "{}'s status is unknown.\nVisit the profile page\nto update it.",
                username
            ),
        }
    }

    /// CSS modifier; unconfigured shares the unknown style.
    pub fn css_class(&self) -> &'static str {
        match self {
            StatusView::Solved { .. } => "solved",
            StatusView::NotSolved { .. } => "not-solved",
            StatusView::Unconfigured | StatusView::Unknown { .. } => "unknown",
        }
    }
}

/// Status card contents: the headline plus the optional detail lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusDetails {
    pub view: StatusView,
    pub streak_line: Option<String>,
    pub checked_line: Option<String>,
}

impl StatusDetails {
    pub fn new<Tz: TimeZone>(
        username: &str,
        state: SolvedState,
        streak_count: Option<u32>,
        checked_at: Option<i64>,
        tz: &Tz,
    ) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        let view = StatusView::new(username, state);
        if view == StatusView::Unconfigured {
            return Self {
                view,
                streak_line: None,
                checked_line: None,
            };
        }

        Self {
            view,
            streak_line: streak_count.map(|count| format!("Current streak: {} days", count)),
            checked_line: checked_at
                .and_then(DateTime::<Utc>::from_timestamp_millis)
                .map(|at| {
                    format!(
                        "(Last checked: {})",
                        at.with_timezone(tz).format("%H:%M:%S")
                    )
                }),
        }
    }

    pub fn from_initial<Tz: TimeZone>(data: &InitialData, tz: &Tz) -> Self
    where
        Tz::Offset: fmt::Display,
    {
        Self::new(
            &data.target_username,
            data.solved_state,
            data.streak_count,
            data.checked_at,
            tz,
        )
    }

    /// Shown right after saving: no sample exists yet for the saved user.
    pub fn pending(username: &str) -> Self {
        Self {
            view: StatusView::new(username, SolvedState::Unknown),
            streak_line: None,
            checked_line: None,
        }
    }
}

/// What the status card is showing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PopupStatus {
    Loading,
    Failed,
    Ready(StatusDetails),
}

impl PopupStatus {
    pub fn icon(&self) -> &'static str {
        match self {
            PopupStatus::Loading => "⏳",
            PopupStatus::Failed => "❗",
            PopupStatus::Ready(details) => details.view.icon(),
        }
    }

    pub fn message(&self) -> String {
        match self {
            PopupStatus::Loading => LOADING_MESSAGE.to_string(),
            PopupStatus::Failed => LOAD_FAILED_MESSAGE.to_string(),
            PopupStatus::Ready(details) => details.view.message(),
        }
    }

    pub fn css_class(&self) -> &'static str {
        match self {
            PopupStatus::Loading => "",
            PopupStatus::Failed => "unknown",
            PopupStatus::Ready(details) => details.view.css_class(),
        }
    }

    /// Username for the "go to profile" button; `None` disables it.
    pub fn profile_username(&self) -> Option<&str> {
        match self {
            PopupStatus::Ready(StatusDetails {
                view:
                    StatusView::Solved { username }
                    | StatusView::NotSolved { username }
                    | StatusView::Unknown { username },
                ..
            }) => Some(username),
            _ => None,
        }
    }
}

/// Raw contents of the settings form.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormInput {
    pub username: String,
    pub interval: String,
    pub notify_not_solved: bool,
    pub notify_unknown: bool,
}

impl Default for FormInput {
    fn default() -> Self {
        Self::from_settings(&Settings::default())
    }
}

impl FormInput {
    pub fn from_settings(settings: &Settings) -> Self {
        Self {
            username: settings.target_username.clone(),
            interval: settings.alarm_interval.to_string(),
            notify_not_solved: settings.notify_on_not_solved,
            notify_unknown: settings.notify_on_unknown,
        }
    }
}

/// Inline validation errors of the settings form.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormError {
    EmptyUsername,
    InvalidInterval,
}

impl fmt::Display for FormError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FormError::EmptyUsername => f.write_str("Please enter a username."),
            FormError::InvalidInterval => {
                f.write_str("The interval must be a number of at least 1 minute.")
            }
        }
    }
}

impl std::error::Error for FormError {}

/// Validate the form before anything is written.
pub fn validate_form(input: &FormInput) -> Result<Settings, FormError> {
    let username = input.username.trim();
    if username.is_empty() {
        return Err(FormError::EmptyUsername);
    }

    let interval = match input.interval.trim().parse::<u32>() {
        Ok(minutes) if minutes >= 1 => minutes,
        _ => return Err(FormError::InvalidInterval),
    };

    Ok(Settings {
        target_username: username.to_string(),
        alarm_interval: interval,
        notify_on_not_solved: input.notify_not_solved,
        notify_on_unknown: input.notify_unknown,
    })
}

/// Interval text the form falls back to after a rejected value.
pub fn default_interval_text() -> String {
    DEFAULT_ALARM_INTERVAL.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::FixedOffset;

    fn utc() -> FixedOffset {
        FixedOffset::east_opt(0).unwrap()
    }

    #[test]
    fn test_views_are_exclusive() {
        assert_eq!(StatusView::new("", SolvedState::Solved), StatusView::Unconfigured);
        assert_eq!(StatusView::new("", SolvedState::NotSolved), StatusView::Unconfigured);

        let solved = StatusView::new("alice", SolvedState::Solved);
        let not_solved = StatusView::new("alice", SolvedState::NotSolved);
        let unknown = StatusView::new("alice", SolvedState::Unknown);

        assert_eq!(solved.css_class(), "solved");
        assert_eq!(not_solved.css_class(), "not-solved");
        assert_eq!(unknown.css_class(), "unknown");
        assert_eq!(StatusView::Unconfigured.css_class(), "unknown");

        let icons = [
            StatusView::Unconfigured.icon(),
            solved.icon(),
            not_solved.icon(),
            unknown.icon(),
        ];
        for (i, a) in icons.iter().enumerate() {
            for b in &icons[i + 1..] {
                assert_ne!(a, b);
            }
        }
        assert!(unknown.message().starts_with("alice's status is unknown"));
    }

    #[test]
    fn test_detail_lines() {
        let details = StatusDetails::new(
            "alice",
            SolvedState::NotSolved,
            Some(12),
            Some(3_723_000),
            &utc(),
        );
        assert_eq!(details.streak_line.as_deref(), Some("Current streak: 12 days"));
        assert_eq!(details.checked_line.as_deref(), Some("(Last checked: 01:02:03)"));

        let bare = StatusDetails::new("alice", SolvedState::Unknown, None, None, &utc());
        assert_eq!(bare.streak_line, None);
        assert_eq!(bare.checked_line, None);

        let unconfigured = StatusDetails::new("", SolvedState::Solved, Some(4), Some(0), &utc());
        assert_eq!(unconfigured.view, StatusView::Unconfigured);
        assert_eq!(unconfigured.streak_line, None);
        assert_eq!(unconfigured.checked_line, None);
    }

    #[test]
    fn test_pending_after_save() {
        let status = PopupStatus::Ready(StatusDetails::pending("bob"));
        assert_eq!(status.icon(), "❓");
        assert_eq!(status.profile_username(), Some("bob"));
    }

    #[test]
    fn test_profile_button_needs_a_user() {
        assert_eq!(PopupStatus::Loading.profile_username(), None);
        assert_eq!(PopupStatus::Failed.profile_username(), None);
        assert_eq!(
            PopupStatus::Ready(StatusDetails::pending("")).profile_username(),
            None
        );
    }

    #[test]
    fn test_validate_form() {
        let input = FormInput {
            username: "  alice ".to_string(),
            interval: "5".to_string(),
            notify_not_solved: true,
            notify_unknown: false,
        };
        let settings = validate_form(&input).unwrap();
        assert_eq!(settings.target_username, "alice");
        assert_eq!(settings.alarm_interval, 5);
        assert!(!settings.notify_on_unknown);

        let empty = FormInput {
            username: "   ".to_string(),
            ..input.clone()
        };
        assert_eq!(validate_form(&empty), Err(FormError::EmptyUsername));

        for interval in ["0", "-1", "abc", "", "1.5"] {
            let bad = FormInput {
                interval: interval.to_string(),
                ..input.clone()
            };
            assert_eq!(validate_form(&bad), Err(FormError::InvalidInterval), "{}", interval);
        }
    }

    #[test]
    fn test_default_form() {
        let form = FormInput::default();
        assert_eq!(form.username, "");
        assert_eq!(form.interval, default_interval_text());
        assert!(form.notify_not_solved);
        assert!(form.notify_unknown);
    }
}
