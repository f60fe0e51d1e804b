//! Countdowns and the display category of a match.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::lineup::{reveal_window, should_reveal_lineup};
use crate::model::MatchStatus;

const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 60 * SECONDS_PER_MINUTE;
const SECONDS_PER_DAY: u64 = 24 * SECONDS_PER_HOUR;

/// Remaining time split into whole units. Zero fields are kept.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Countdown {
    pub days: u64,
    pub hours: u64,
    pub minutes: u64,
    pub seconds: u64,
}

impl Countdown {
    pub fn from_seconds(total: u64) -> Self {
        Self {
            days: total / SECONDS_PER_DAY,
            hours: total % SECONDS_PER_DAY / SECONDS_PER_HOUR,
            minutes: total % SECONDS_PER_HOUR / SECONDS_PER_MINUTE,
            seconds: total % SECONDS_PER_MINUTE,
        }
    }

    pub fn total_seconds(&self) -> u64 {
        self.days * SECONDS_PER_DAY
            + self.hours * SECONDS_PER_HOUR
            + self.minutes * SECONDS_PER_MINUTE
            + self.seconds
    }
}

/// Time left until `target`, or `None` once it has been reached.
/// A partial second counts as a whole one, so a pending countdown is never
/// all zeros.
pub fn countdown_remaining(now: DateTime<Utc>, target: DateTime<Utc>) -> Option<Countdown> {
    if target <= now {
        return None;
    }
    let remaining = target - now;
    let mut total = remaining.num_seconds().max(0) as u64;
    if remaining.subsec_nanos() > 0 {
        total += 1;
    }
    Some(Countdown::from_seconds(total))
}

/// Time left until lineups for a scheduled match are revealed.
pub fn reveal_countdown(now: DateTime<Utc>, kickoff: DateTime<Utc>) -> Option<Countdown> {
    countdown_remaining(now, kickoff - reveal_window())
}

/// Display classification of a match. Re-derived on every read.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum UiCategory {
    ScheduledUpcoming,
    ScheduledImminent,
    Live,
    Completed,
}

pub fn ui_category(status: MatchStatus, now: DateTime<Utc>, kickoff: DateTime<Utc>) -> UiCategory {
    match status {
        MatchStatus::Live => UiCategory::Live,
        MatchStatus::Completed => UiCategory::Completed,
        MatchStatus::Scheduled => {
            if should_reveal_lineup(now, kickoff, status) && now < kickoff {
                UiCategory::ScheduledImminent
            } else {
                UiCategory::ScheduledUpcoming
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Duration, TimeZone};

    fn now() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 14, 12, 0, 0).unwrap()
    }

    #[test]
    fn test_countdown_decomposes_units() {
        let cd = countdown_remaining(now(), now() + Duration::seconds(90_061)).unwrap();
        assert_eq!(cd, Countdown { days: 1, hours: 1, minutes: 1, seconds: 1 });
        assert_eq!(cd.total_seconds(), 90_061);
    }

    #[test]
    fn test_countdown_keeps_zero_days() {
        let cd = countdown_remaining(now(), now() + Duration::minutes(75)).unwrap();
        assert_eq!(cd, Countdown { days: 0, hours: 1, minutes: 15, seconds: 0 });
    }

    #[test]
    fn test_countdown_none_once_reached() {
        assert_eq!(countdown_remaining(now(), now()), None);
        assert_eq!(countdown_remaining(now(), now() - Duration::seconds(1)), None);
    }

    #[test]
    fn test_countdown_rounds_partial_second_up() {
        let cd = countdown_remaining(now(), now() + Duration::milliseconds(400)).unwrap();
        assert_eq!(cd, Countdown { days: 0, hours: 0, minutes: 0, seconds: 1 });
        let cd = countdown_remaining(now(), now() + Duration::milliseconds(61_500)).unwrap();
        assert_eq!(cd.total_seconds(), 62);
        let cd = countdown_remaining(now(), now() + Duration::nanoseconds(1)).unwrap();
        assert_eq!(cd.total_seconds(), 1);
    }

    #[test]
    fn test_countdown_no_calendar_arithmetic() {
        let cd = countdown_remaining(now(), now() + Duration::days(45)).unwrap();
        assert_eq!(cd.days, 45);
    }

    #[test]
    fn test_reveal_countdown_targets_window_start() {
        let kickoff = now() + Duration::minutes(25);
        let cd = reveal_countdown(now(), kickoff).unwrap();
        assert_eq!(cd, Countdown { days: 0, hours: 0, minutes: 15, seconds: 0 });
        assert_eq!(reveal_countdown(now(), now() + Duration::minutes(5)), None);
    }

    #[test]
    fn test_ui_category_for_scheduled_match() {
        let kickoff = now();
        assert_eq!(
            ui_category(MatchStatus::Scheduled, kickoff - Duration::minutes(11), kickoff),
            UiCategory::ScheduledUpcoming
        );
        assert_eq!(
            ui_category(MatchStatus::Scheduled, kickoff - Duration::minutes(10), kickoff),
            UiCategory::ScheduledImminent
        );
        assert_eq!(
            ui_category(MatchStatus::Scheduled, kickoff - Duration::seconds(1), kickoff),
            UiCategory::ScheduledImminent
        );
        // kickoff passed but nobody flipped the status yet
        assert_eq!(
            ui_category(MatchStatus::Scheduled, kickoff, kickoff),
            UiCategory::ScheduledUpcoming
        );
    }

    #[test]
    fn test_ui_category_follows_stored_status() {
        let kickoff = now() + Duration::days(2);
        assert_eq!(ui_category(MatchStatus::Live, now(), kickoff), UiCategory::Live);
        assert_eq!(ui_category(MatchStatus::Completed, now(), kickoff), UiCategory::Completed);
    }

    #[test]
    fn test_ui_category_serializes_kebab_case() {
        let json = serde_json::to_value(UiCategory::ScheduledImminent).unwrap();
        assert_eq!(json, "scheduled-imminent");
    }
}
