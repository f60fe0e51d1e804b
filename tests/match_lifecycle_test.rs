/// End-to-end checks of the derived match view.
///
/// The flow being tested:
/// 1. A stored match (status set by an admin) plus both rosters
/// 2. `now` supplied by the caller
/// 3. Lineup reveal, lineup resolution, countdowns and UI category derived together

use chrono::{DateTime, Duration, TimeZone, Utc};
use tournament_core::{
    derive_match_view, should_reveal_lineup, Match, MatchStatus, Player, TeamSummary, UiCategory,
};

fn kickoff() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 6, 14, 18, 0, 0).unwrap()
}

fn roster(team_id: i64, size: i64) -> Vec<Player> {
    (1..=size)
        .map(|n| Player {
            id: team_id * 100 + n,
            name: format!("Player {n}"),
            shirt_number: n as u32,
            team_id,
            position: None,
        })
        .collect()
}

fn scheduled_match() -> Match {
    Match {
        id: 1,
        team_a: TeamSummary { id: 1, name: "Riverside".into(), logo_url: None },
        team_b: TeamSummary { id: 2, name: "Old Town".into(), logo_url: None },
        date_time: kickoff(),
        venue: "Central Park Pitch".into(),
        status: MatchStatus::Scheduled,
        score_a: None,
        score_b: None,
        events: vec![],
        lineup_a_ids: None,
        lineup_b_ids: None,
        player_of_match: None,
        group_id: Some(1),
    }
}

#[test]
fn test_five_player_roster_nine_minutes_out() {
    let squad = roster(1, 5);
    let view = derive_match_view(
        scheduled_match(),
        &squad,
        &roster(2, 5),
        kickoff() - Duration::minutes(9),
    );

    assert!(view.lineup_revealed);
    assert_eq!(view.lineup_a, squad);
    assert_eq!(view.ui_category, UiCategory::ScheduledImminent);
}

#[test]
fn test_five_player_roster_eleven_minutes_out() {
    let view = derive_match_view(
        scheduled_match(),
        &roster(1, 5),
        &roster(2, 5),
        kickoff() - Duration::minutes(11),
    );

    assert!(!view.lineup_revealed);
    assert!(view.lineup_a.is_empty());
    assert_eq!(view.ui_category, UiCategory::ScheduledUpcoming);
    let reveal = view.reveal_countdown.expect("reveal countdown while hidden");
    assert_eq!(reveal.total_seconds(), 60);
}

#[test]
fn test_status_change_reveals_immediately() {
    let now = kickoff() - Duration::hours(2);
    let mut fixture = scheduled_match();
    assert!(!should_reveal_lineup(now, fixture.date_time, fixture.status));

    // admin starts the match early
    fixture.status = MatchStatus::Live;
    fixture.score_a = Some(0);
    fixture.score_b = Some(0);
    fixture.lineup_b_ids = Some(vec![203, 201]);

    let view = derive_match_view(fixture, &roster(1, 16), &roster(2, 16), now);
    assert!(view.lineup_revealed);
    assert_eq!(view.lineup_a.len(), 11);
    let b: Vec<i64> = view.lineup_b.iter().map(|p| p.id).collect();
    assert_eq!(b, vec![201, 203]);
    assert_eq!(view.ui_category, UiCategory::Live);
    assert_eq!(view.kickoff_countdown, None);
}

#[test]
fn test_view_is_rederived_per_call() {
    let fixture = scheduled_match();
    let early = derive_match_view(fixture.clone(), &[], &[], kickoff() - Duration::days(1));
    let late = derive_match_view(fixture, &[], &[], kickoff() - Duration::minutes(1));

    assert_eq!(early.kickoff_countdown.unwrap().days, 1);
    assert_eq!(late.kickoff_countdown.unwrap().minutes, 1);
    assert_eq!(early.ui_category, UiCategory::ScheduledUpcoming);
    assert_eq!(late.ui_category, UiCategory::ScheduledImminent);
}
