//! Read models combining a stored match with everything derived from `now`.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::clock::{countdown_remaining, reveal_countdown, ui_category, Countdown, UiCategory};
use crate::lineup::{resolve_lineup, should_reveal_lineup};
use crate::model::{Match, MatchStatus, Player};

/// Match detail as shown on the match page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchView {
    #[serde(flatten)]
    pub fixture: Match,
    pub lineup_revealed: bool,
    pub lineup_a: Vec<Player>,
    pub lineup_b: Vec<Player>,
    pub ui_category: UiCategory,
    pub kickoff_countdown: Option<Countdown>,
    pub reveal_countdown: Option<Countdown>,
}

/// Compact entry for match listings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchCard {
    #[serde(flatten)]
    pub fixture: Match,
    pub ui_category: UiCategory,
    pub kickoff_countdown: Option<Countdown>,
}

fn kickoff_countdown(m: &Match, now: DateTime<Utc>) -> Option<Countdown> {
    match m.status {
        MatchStatus::Scheduled => countdown_remaining(now, m.date_time),
        _ => None,
    }
}

/// Derive the match page for `now`. Rosters are the full team rosters in
/// display order; lineups stay empty until they are revealed.
pub fn derive_match_view(
    fixture: Match,
    roster_a: &[Player],
    roster_b: &[Player],
    now: DateTime<Utc>,
) -> MatchView {
    let revealed = should_reveal_lineup(now, fixture.date_time, fixture.status);

    let (lineup_a, lineup_b) = if revealed {
        (
            resolve_lineup(roster_a, fixture.lineup_a_ids.as_deref()),
            resolve_lineup(roster_b, fixture.lineup_b_ids.as_deref()),
        )
    } else {
        (Vec::new(), Vec::new())
    };

    let reveal = if revealed {
        None
    } else {
        reveal_countdown(now, fixture.date_time)
    };

    MatchView {
        lineup_revealed: revealed,
        lineup_a,
        lineup_b,
        ui_category: ui_category(fixture.status, now, fixture.date_time),
        kickoff_countdown: kickoff_countdown(&fixture, now),
        reveal_countdown: reveal,
        fixture,
    }
}

pub fn derive_match_card(fixture: Match, now: DateTime<Utc>) -> MatchCard {
    MatchCard {
        ui_category: ui_category(fixture.status, now, fixture.date_time),
        kickoff_countdown: kickoff_countdown(&fixture, now),
        fixture,
    }
}
