// Background orchestration: alarms, settings changes, status samples and the
// notification lifecycle.
//
// The orchestrator keeps no state of its own. Everything lives in the alarm
// registry or in storage, so the background worker builds one per event.
// Platform failures are logged and the current cycle is abandoned; the next
// alarm or event retries.

use anyhow::Result;

use crate::config::{Settings, SettingsChange, CHECK_ALARM, NOTIFICATION_ID, RESET_ALARM};
use crate::notify::{decide, Decision, NotificationOptions};
use crate::platform::{AlarmScheduler, Clock, Notifier, Platform, SettingsStore, StatusStore, TabOpener};
use crate::protocol::{Ack, Message, Response};
use crate::schedule::{check_schedule, reset_schedule};
use crate::status::{InitialData, StatusSample, StatusSnapshot};

pub struct Orchestrator<P: Platform> {
    platform: P,
}

impl<P: Platform> Orchestrator<P> {
    pub fn new(platform: P) -> Self {
        Self { platform }
    }

    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Extension installed or updated: start both alarms from scratch.
    pub async fn on_installed(&self) {
        log::info!("Extension installed or updated, re-arming alarms");
        self.clear_alarm(CHECK_ALARM).await;
        self.clear_alarm(RESET_ALARM).await;
        self.arm_check_alarm(None).await;
        self.arm_reset_alarm().await;
    }

    /// Browser started: alarms usually survive, only re-arm missing ones.
    pub async fn on_startup(&self) {
        log::info!("Browser started, verifying alarms");

        if !self.alarm_exists(CHECK_ALARM).await {
            log::info!("Alarm {} missing, creating it", CHECK_ALARM);
            self.arm_check_alarm(None).await;
        }
        if !self.alarm_exists(RESET_ALARM).await {
            log::info!("Alarm {} missing, creating it", RESET_ALARM);
            self.arm_reset_alarm().await;
        }
    }

    /// Sync settings changed.
    pub async fn on_settings_changed(&self, change: SettingsChange) {
        if change.notify_flags {
            log::info!("Notification preferences changed, applied on next check");
        }

        if change.username {
            log::info!("Target username changed, dropping stored status and notification");
            if let Err(e) = self.platform.status().clear().await {
                log::error!("Failed to clear stored status: {:?}", e);
            }
            self.clear_notification().await;
        }

        if change.interval || change.username {
            log::info!("Re-arming {} to fire now", CHECK_ALARM);
            self.clear_alarm(CHECK_ALARM).await;
            self.arm_check_alarm(Some(0)).await;
        }
    }

    pub async fn on_alarm(&self, name: &str) {
        match name {
            CHECK_ALARM => {
                log::debug!("Check alarm fired");
                self.evaluate().await;
            }
            RESET_ALARM => self.daily_reset().await,
            other => log::warn!("Ignoring unknown alarm {}", other),
        }
    }

    /// Morning reset: yesterday's answer no longer says anything about today.
    /// The streak count is kept.
    async fn daily_reset(&self) {
        log::info!("Daily reset alarm fired, marking status unknown");

        let now = self.platform.clock().now().timestamp_millis();
        let reset = self.platform.status().mark_unknown(now).await;

        self.arm_reset_alarm().await;

        match reset {
            Ok(()) => self.evaluate().await,
            Err(e) => log::error!("Failed to reset stored status: {:?}", e),
        }
    }

    /// A content script reported what it saw on a profile page.
    pub async fn on_status_sample(&self, sample: StatusSample) {
        log::info!(
            "Status sample for {}: {}, streak {:?}",
            sample.username,
            sample.solved,
            sample.streak_count
        );

        let settings = match self.platform.settings().load().await {
            Ok(settings) => settings,
            Err(e) => {
                log::error!("Failed to read settings for status sample: {:?}", e);
                return;
            }
        };

        if !settings.is_target(&sample.username) {
            log::debug!(
                "Discarding sample for {} (target is {:?})",
                sample.username,
                settings.target_username
            );
            return;
        }

        if let Err(e) = self.platform.status().save(&StatusSnapshot::from(&sample)).await {
            log::error!("Failed to store status sample: {:?}", e);
            return;
        }

        self.evaluate_with(&settings).await;
    }

    /// Settings and status merged for the popup; `None` if storage fails.
    pub async fn initial_data(&self) -> Option<InitialData> {
        let (settings, snapshot) = futures::join!(
            self.platform.settings().load(),
            self.platform.status().load()
        );

        match (settings, snapshot) {
            (Ok(settings), Ok(snapshot)) => Some(InitialData::merge(settings, snapshot)),
            (Err(e), _) | (_, Err(e)) => {
                log::error!("Failed to read data for popup: {:?}", e);
                None
            }
        }
    }

    /// Route a runtime message. Returns the response for request messages.
    pub async fn handle_message(&self, message: Message) -> Option<Response> {
        match message {
            Message::StatusSample(sample) => {
                self.on_status_sample(sample).await;
                None
            }
            Message::GetInitialData => Some(Response::InitialData(self.initial_data().await)),
            Message::ForceRecheck => {
                log::info!("Re-check requested by popup");
                self.evaluate().await;
                Some(Response::Ack(Ack { ok: true }))
            }
        }
    }

    /// Show, replace or clear the notification according to stored state.
    pub async fn evaluate(&self) {
        match self.platform.settings().load().await {
            Ok(settings) => self.evaluate_with(&settings).await,
            Err(e) => log::error!("Failed to read settings for evaluation: {:?}", e),
        }
    }

    async fn evaluate_with(&self, settings: &Settings) {
        if !settings.is_configured() {
            log::info!("No target username configured, skipping evaluation");
            self.clear_notification().await;
            return;
        }

        let snapshot = match self.platform.status().load().await {
            Ok(snapshot) => snapshot,
            Err(e) => {
                log::error!("Failed to read stored status: {:?}", e);
                return;
            }
        };

        log::debug!(
            "Evaluating {}: {}",
            settings.target_username,
            snapshot.state
        );

        match decide(settings, &snapshot) {
            Decision::Notify(reminder) => {
                log::info!("Notifying {} ({:?})", settings.target_username, reminder);
                let options = NotificationOptions::reminder(reminder, &settings.target_username);
                self.show_notification(&options).await;
            }
            Decision::Clear => self.clear_notification().await,
        }
    }

    pub async fn on_notification_clicked(&self, id: &str) {
        if id == NOTIFICATION_ID {
            self.open_profile().await;
        }
    }

    pub async fn on_notification_button_clicked(&self, id: &str, button_index: u32) {
        if id == NOTIFICATION_ID && button_index == 0 {
            self.open_profile().await;
        }
    }

    async fn open_profile(&self) {
        if let Err(e) = self.try_open_profile().await {
            log::error!("Failed to open profile from notification: {:?}", e);
        }
    }

    async fn try_open_profile(&self) -> Result<()> {
        let settings = self.platform.settings().load().await?;
        let Some(url) = settings.profile_url() else {
            log::warn!("Notification clicked but no target username is configured");
            return Ok(());
        };

        log::info!("Opening profile {}", url);
        self.platform.tabs().open(&url).await?;
        self.clear_notification().await;
        Ok(())
    }

    /// Replace whatever notification is showing.
    async fn show_notification(&self, options: &NotificationOptions) {
        self.clear_notification().await;
        if let Err(e) = self.platform.notifier().create(NOTIFICATION_ID, options).await {
            log::error!("Failed to create notification: {:?}", e);
        }
    }

    async fn clear_notification(&self) {
        if let Err(e) = self.platform.notifier().clear(NOTIFICATION_ID).await {
            log::error!("Failed to clear notification: {:?}", e);
        }
    }

    /// `delay` overrides the first fire, in minutes; the default is one interval.
    async fn arm_check_alarm(&self, delay: Option<u32>) {
        let interval = match self.platform.settings().load().await {
            Ok(settings) => settings.alarm_interval,
            Err(e) => {
                log::warn!("Failed to read interval, using default: {:?}", e);
                Settings::default().alarm_interval
            }
        };

        let schedule = check_schedule(interval, delay);
        match self.platform.alarms().create(CHECK_ALARM, schedule).await {
            Ok(()) => log::info!("Alarm {} set: {:?}", CHECK_ALARM, schedule),
            Err(e) => log::error!("Failed to create alarm {}: {:?}", CHECK_ALARM, e),
        }
    }

    async fn arm_reset_alarm(&self) {
        let now = self.platform.clock().now();
        let schedule = reset_schedule(&now);
        match self.platform.alarms().create(RESET_ALARM, schedule).await {
            Ok(()) => log::info!("Alarm {} set: {:?}", RESET_ALARM, schedule),
            Err(e) => log::error!("Failed to create alarm {}: {:?}", RESET_ALARM, e),
        }
    }

    async fn clear_alarm(&self, name: &str) {
        if let Err(e) = self.platform.alarms().clear(name).await {
            log::error!("Failed to clear alarm {}: {:?}", name, e);
        }
    }

    /// Lookup failures count as missing so startup re-arms.
    async fn alarm_exists(&self, name: &str) -> bool {
        match self.platform.alarms().exists(name).await {
            Ok(exists) => exists,
            Err(e) => {
                log::warn!("Failed to look up alarm {}: {:?}", name, e);
                false
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::StoredSettings;
    use crate::notify::{NOT_SOLVED_MESSAGE, UNKNOWN_MESSAGE};
    use crate::schedule::AlarmSchedule;
    use crate::status::SolvedState;
    use crate::testing::{NotifierCall, TestPlatform};
    use chrono::{FixedOffset, TimeZone};

    fn sample(username: &str, solved: SolvedState, streak: Option<u32>, at: i64) -> StatusSample {
        StatusSample {
            solved,
            username: username.to_string(),
            streak_count: streak,
            timestamp: at,
        }
    }

    fn kst(d: u32, h: u32) -> chrono::DateTime<FixedOffset> {
        FixedOffset::east_opt(9 * 3600)
            .unwrap()
            .with_ymd_and_hms(2024, 3, d, h, 0, 0)
            .unwrap()
    }

    #[tokio::test]
    async fn test_install_arms_both_alarms() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator.on_installed().await;

        let alarms = &orchestrator.platform().alarms;
        assert_eq!(
            alarms.get(CHECK_ALARM),
            Some(AlarmSchedule::Every {
                delay_in_minutes: 5,
                period_in_minutes: 5
            })
        );
        // clock is at 12:00 on the 10th
        assert_eq!(
            alarms.get(RESET_ALARM),
            Some(AlarmSchedule::At {
                when: kst(11, 6).timestamp_millis()
            })
        );
        assert_eq!(
            *alarms.cleared.borrow(),
            vec![CHECK_ALARM.to_string(), RESET_ALARM.to_string()]
        );
    }

    #[tokio::test]
    async fn test_install_early_morning_resets_today() {
        let platform = TestPlatform::configured("alice", 5);
        platform.clock.set(kst(10, 3));
        let orchestrator = Orchestrator::new(platform);
        orchestrator.on_installed().await;

        assert_eq!(
            orchestrator.platform().alarms.get(RESET_ALARM),
            Some(AlarmSchedule::At {
                when: kst(10, 6).timestamp_millis()
            })
        );
    }

    #[tokio::test]
    async fn test_startup_only_rearms_missing_alarms() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        let existing = AlarmSchedule::Every {
            delay_in_minutes: 2,
            period_in_minutes: 7,
        };
        orchestrator
            .platform()
            .alarms
            .alarms
            .borrow_mut()
            .insert(CHECK_ALARM.to_string(), existing);

        orchestrator.on_startup().await;

        let alarms = &orchestrator.platform().alarms;
        assert_eq!(alarms.get(CHECK_ALARM), Some(existing));
        assert!(alarms.get(RESET_ALARM).is_some());
        assert!(alarms.cleared.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_interval_change_fires_immediately() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator.on_installed().await;

        orchestrator
            .platform()
            .settings
            .stored
            .borrow_mut()
            .alarm_interval = Some(10.0);
        orchestrator
            .on_settings_changed(SettingsChange::from_keys(["alarmIntervalMinutes"]))
            .await;

        assert_eq!(
            orchestrator.platform().alarms.get(CHECK_ALARM),
            Some(AlarmSchedule::Every {
                delay_in_minutes: 0,
                period_in_minutes: 10
            })
        );
    }

    #[tokio::test]
    async fn test_preference_change_does_not_reschedule() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator.on_installed().await;
        let before = orchestrator.platform().alarms.get(CHECK_ALARM);

        orchestrator
            .on_settings_changed(SettingsChange::from_keys(["notifyOnUnknown"]))
            .await;

        assert_eq!(orchestrator.platform().alarms.get(CHECK_ALARM), before);
        assert_eq!(orchestrator.platform().alarms.cleared.borrow().len(), 2);
    }

    #[tokio::test]
    async fn test_username_change_invalidates_status() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, Some(3), 100))
            .await;
        assert_eq!(orchestrator.platform().notifier.count(), 1);

        orchestrator.platform().settings.stored.borrow_mut().target_username =
            Some("bob".to_string());
        orchestrator
            .on_settings_changed(SettingsChange::from_keys(["targetUsername"]))
            .await;

        let platform = orchestrator.platform();
        assert_eq!(platform.status.current(), None);
        assert_eq!(platform.notifier.count(), 0);
        assert_eq!(
            platform.alarms.get(CHECK_ALARM),
            Some(AlarmSchedule::Every {
                delay_in_minutes: 0,
                period_in_minutes: 5
            })
        );

        // a late sample for the old user must not resurrect its status
        orchestrator
            .on_status_sample(sample("alice", SolvedState::Solved, Some(4), 200))
            .await;
        assert_eq!(orchestrator.platform().status.current(), None);
    }

    #[tokio::test]
    async fn test_sample_for_other_user_is_discarded() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator
            .on_status_sample(sample("mallory", SolvedState::NotSolved, Some(1), 1))
            .await;

        assert_eq!(orchestrator.platform().status.current(), None);
        assert!(orchestrator.platform().notifier.calls.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_sample_username_is_case_insensitive() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("Alice", 5));
        orchestrator
            .on_status_sample(sample("aLiCe", SolvedState::Solved, Some(9), 7))
            .await;

        let snapshot = orchestrator.platform().status.current().unwrap();
        assert_eq!(snapshot.state, SolvedState::Solved);
        assert_eq!(snapshot.streak_count, Some(9));
        assert_eq!(orchestrator.platform().notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_samples_without_target_are_discarded() {
        let orchestrator = Orchestrator::new(TestPlatform::default());
        orchestrator
            .on_status_sample(sample("", SolvedState::NotSolved, None, 1))
            .await;
        assert_eq!(orchestrator.platform().status.current(), None);
    }

    #[tokio::test]
    async fn test_end_to_end_not_solved() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        let t = 1_710_000_000_000;

        let response = orchestrator
            .handle_message(Message::StatusSample(sample(
                "alice",
                SolvedState::NotSolved,
                Some(12),
                t,
            )))
            .await;
        assert_eq!(response, None);

        let platform = orchestrator.platform();
        assert_eq!(
            platform.status.current(),
            Some(StatusSnapshot {
                state: SolvedState::NotSolved,
                streak_count: Some(12),
                checked_at: Some(t),
            })
        );

        let shown = platform.notifier.get(NOTIFICATION_ID).unwrap();
        assert_eq!(shown.message, NOT_SOLVED_MESSAGE);
        assert!(shown.message.contains("did not solve"));
        assert_eq!(platform.notifier.count(), 1);

        let Some(Response::InitialData(Some(data))) =
            orchestrator.handle_message(Message::GetInitialData).await
        else {
            panic!("expected initial data");
        };
        assert_eq!(
            serde_json::to_value(&data).unwrap(),
            serde_json::json!({
                "targetUsername": "alice",
                "alarmIntervalMinutes": 5,
                "notifyOnNotSolved": true,
                "notifyOnUnknown": true,
                "lastSolvedState": false,
                "lastStreakCount": 12,
                "lastCheckedAt": t,
            })
        );
    }

    #[tokio::test]
    async fn test_solved_sample_clears_notification() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, Some(1), 1))
            .await;
        orchestrator
            .on_status_sample(sample("alice", SolvedState::Solved, Some(2), 2))
            .await;

        assert_eq!(orchestrator.platform().notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_notification_is_replaced_not_duplicated() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, Some(1), 1))
            .await;
        orchestrator.on_alarm(CHECK_ALARM).await;
        orchestrator.on_alarm(CHECK_ALARM).await;

        let platform = orchestrator.platform();
        assert_eq!(platform.notifier.count(), 1);

        // every create is preceded by a clear of the same id
        let calls = platform.notifier.calls.borrow();
        for (i, call) in calls.iter().enumerate() {
            if let NotifierCall::Create(id) = call {
                assert_eq!(calls[i - 1], NotifierCall::Clear(id.clone()));
            }
        }
    }

    #[tokio::test]
    async fn test_preferences_disable_notifications() {
        let platform = TestPlatform::configured("alice", 5);
        platform.settings.stored.borrow_mut().notify_on_not_solved = Some(false);
        let orchestrator = Orchestrator::new(platform);

        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, Some(1), 1))
            .await;
        assert_eq!(orchestrator.platform().notifier.count(), 0);

        orchestrator
            .on_status_sample(sample("alice", SolvedState::Unknown, None, 2))
            .await;
        let shown = orchestrator.platform().notifier.get(NOTIFICATION_ID).unwrap();
        assert_eq!(shown.message, UNKNOWN_MESSAGE);
    }

    #[tokio::test]
    async fn test_unconfigured_clears_notification() {
        let platform = TestPlatform::default();
        *platform.status.snapshot.borrow_mut() = Some(StatusSnapshot {
            state: SolvedState::NotSolved,
            streak_count: None,
            checked_at: None,
        });
        platform.notifier.shown.borrow_mut().insert(
            NOTIFICATION_ID.to_string(),
            NotificationOptions::reminder(crate::notify::Reminder::NotSolved, "old"),
        );
        let orchestrator = Orchestrator::new(platform);

        orchestrator.on_alarm(CHECK_ALARM).await;

        let notifier = &orchestrator.platform().notifier;
        assert_eq!(notifier.count(), 0);
        assert!(!notifier
            .calls
            .borrow()
            .iter()
            .any(|call| matches!(call, NotifierCall::Create(_))));
    }

    #[tokio::test]
    async fn test_daily_reset_keeps_streak() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, Some(5), 1))
            .await;

        let now = kst(11, 6);
        orchestrator.platform().clock.set(now);
        orchestrator.on_alarm(RESET_ALARM).await;

        let platform = orchestrator.platform();
        assert_eq!(
            platform.status.current(),
            Some(StatusSnapshot {
                state: SolvedState::Unknown,
                streak_count: Some(5),
                checked_at: Some(now.timestamp_millis()),
            })
        );
        assert_eq!(
            platform.alarms.get(RESET_ALARM),
            Some(AlarmSchedule::At {
                when: kst(12, 6).timestamp_millis()
            })
        );
        assert_eq!(
            platform.notifier.get(NOTIFICATION_ID).unwrap().message,
            UNKNOWN_MESSAGE
        );
    }

    #[tokio::test]
    async fn test_daily_reset_rearms_even_if_storage_fails() {
        let platform = TestPlatform::configured("alice", 5);
        platform.status.fail.set(true);
        let orchestrator = Orchestrator::new(platform);

        orchestrator.on_alarm(RESET_ALARM).await;

        assert!(orchestrator.platform().alarms.get(RESET_ALARM).is_some());
        assert_eq!(orchestrator.platform().notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_unknown_alarm_is_ignored() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator.on_alarm("somethingElse").await;

        assert!(orchestrator.platform().notifier.calls.borrow().is_empty());
        assert_eq!(orchestrator.platform().status.writes.get(), 0);
    }

    #[tokio::test]
    async fn test_initial_data_is_none_on_storage_failure() {
        let platform = TestPlatform::configured("alice", 5);
        platform.status.fail.set(true);
        let orchestrator = Orchestrator::new(platform);

        assert_eq!(
            orchestrator.handle_message(Message::GetInitialData).await,
            Some(Response::InitialData(None))
        );
    }

    #[tokio::test]
    async fn test_initial_data_defaults_on_fresh_install() {
        let orchestrator = Orchestrator::new(TestPlatform::default());
        let data = orchestrator.initial_data().await.unwrap();

        assert_eq!(data.target_username, "");
        assert_eq!(data.alarm_interval, 1);
        assert!(data.notify_on_not_solved);
        assert_eq!(data.solved_state, SolvedState::Unknown);
    }

    #[tokio::test]
    async fn test_force_recheck_evaluates_immediately() {
        let platform = TestPlatform::configured("alice", 5);
        *platform.status.snapshot.borrow_mut() = Some(StatusSnapshot {
            state: SolvedState::NotSolved,
            streak_count: Some(2),
            checked_at: Some(1),
        });
        let orchestrator = Orchestrator::new(platform);

        let response = orchestrator.handle_message(Message::ForceRecheck).await;

        assert_eq!(response, Some(Response::Ack(Ack { ok: true })));
        assert_eq!(orchestrator.platform().notifier.count(), 1);
    }

    #[tokio::test]
    async fn test_notification_click_opens_profile() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, None, 1))
            .await;

        orchestrator.on_notification_button_clicked(NOTIFICATION_ID, 0).await;

        let platform = orchestrator.platform();
        assert_eq!(
            *platform.tabs.opened.borrow(),
            vec!["https://solved.ac/profile/alice".to_string()]
        );
        assert_eq!(platform.notifier.count(), 0);
    }

    #[tokio::test]
    async fn test_foreign_clicks_are_ignored() {
        let orchestrator = Orchestrator::new(TestPlatform::configured("alice", 5));
        orchestrator.on_notification_clicked("other").await;
        orchestrator.on_notification_button_clicked(NOTIFICATION_ID, 1).await;

        assert!(orchestrator.platform().tabs.opened.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_click_without_username_is_noop() {
        let orchestrator = Orchestrator::new(TestPlatform::default());
        orchestrator.on_notification_clicked(NOTIFICATION_ID).await;

        assert!(orchestrator.platform().tabs.opened.borrow().is_empty());
    }

    #[tokio::test]
    async fn test_settings_failure_aborts_evaluation() {
        let platform = TestPlatform::configured("alice", 5);
        platform.settings.fail.set(true);
        let orchestrator = Orchestrator::new(platform);

        orchestrator.on_alarm(CHECK_ALARM).await;
        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, None, 1))
            .await;

        assert!(orchestrator.platform().notifier.calls.borrow().is_empty());
        assert_eq!(orchestrator.platform().status.current(), None);
    }

    #[tokio::test]
    async fn test_notification_failure_is_not_retried() {
        let platform = TestPlatform::configured("alice", 5);
        platform.notifier.fail_create.set(true);
        let orchestrator = Orchestrator::new(platform);

        orchestrator
            .on_status_sample(sample("alice", SolvedState::NotSolved, None, 1))
            .await;

        let creates = orchestrator
            .platform()
            .notifier
            .calls
            .borrow()
            .iter()
            .filter(|call| matches!(call, NotifierCall::Create(_)))
            .count();
        assert_eq!(creates, 1);
    }

    #[tokio::test]
    async fn test_check_alarm_uses_default_interval_when_invalid() {
        let platform = TestPlatform::default();
        *platform.settings.stored.borrow_mut() = StoredSettings {
            target_username: Some("alice".to_string()),
            alarm_interval: Some(0.0),
            ..Default::default()
        };
        let orchestrator = Orchestrator::new(platform);
        orchestrator.on_installed().await;

        assert_eq!(
            orchestrator.platform().alarms.get(CHECK_ALARM),
            Some(AlarmSchedule::Every {
                delay_in_minutes: 1,
                period_in_minutes: 1
            })
        );
    }
}
