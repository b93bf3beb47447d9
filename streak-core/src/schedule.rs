use chrono::{DateTime, Duration, LocalResult, NaiveDateTime, NaiveTime, TimeZone, Timelike};
use serde::Serialize;

use crate::config::RESET_HOUR;

/// Alarm creation options, serialized the way `chrome.alarms.create` takes them.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AlarmSchedule {
    /// Fire once at an absolute time.
    At {
        /// Epoch milliseconds.
        when: i64,
    },
    /// Fire after `delay_in_minutes`, then every `period_in_minutes`.
    Every {
        #[serde(rename = "delayInMinutes")]
        delay_in_minutes: u32,
        #[serde(rename = "periodInMinutes")]
        period_in_minutes: u32,
    },
}

/// Options for the recurring check alarm. The first fire comes after one
/// full interval unless `delay` overrides it (`Some(0)` fires right away).
pub fn check_schedule(interval_minutes: u32, delay: Option<u32>) -> AlarmSchedule {
    let period = interval_minutes.max(1);
    AlarmSchedule::Every {
        delay_in_minutes: delay.unwrap_or(period),
        period_in_minutes: period,
    }
}

/// Options for the daily reset alarm relative to `now`.
pub fn reset_schedule<Tz: TimeZone>(now: &DateTime<Tz>) -> AlarmSchedule {
    AlarmSchedule::At {
        when: next_reset_at(now).timestamp_millis(),
    }
}

/// Next [`RESET_HOUR`]:00 in `now`'s timezone: today's if that is still
/// ahead, otherwise tomorrow's.
pub fn next_reset_at<Tz: TimeZone>(now: &DateTime<Tz>) -> DateTime<Tz> {
    let today = now.date_naive();
    let day = if now.hour() < RESET_HOUR {
        today
    } else {
        today.succ_opt().unwrap_or(today)
    };

    let reset_time = NaiveTime::default() + Duration::hours(RESET_HOUR as i64);
    let naive = day.and_time(reset_time);

    resolve_local(&now.timezone(), naive).unwrap_or_else(|| now.clone() + Duration::days(1))
}

/// Map a wall-clock time onto the timezone. An ambiguous time (clocks going
/// back) takes the earlier instant; a skipped time (clocks going forward)
/// moves to the first valid hour after it.
fn resolve_local<Tz: TimeZone>(tz: &Tz, naive: NaiveDateTime) -> Option<DateTime<Tz>> {
    match tz.from_local_datetime(&naive) {
        LocalResult::Single(at) | LocalResult::Ambiguous(at, _) => Some(at),
        LocalResult::None => tz
            .from_local_datetime(&(naive + Duration::hours(1)))
            .earliest(),
    }
}
