//! Starting lineup selection and reveal timing.

use std::collections::HashSet;

use chrono::{DateTime, Duration, Utc};

use crate::model::{MatchStatus, Player, PlayerId};

/// Fallback lineup size when no explicit lineup has been chosen.
pub const STARTING_LINEUP_SIZE: usize = 11;

/// Lineups become visible this many minutes before kickoff.
pub const REVEAL_WINDOW_MINUTES: i64 = 10;

pub fn reveal_window() -> Duration {
    Duration::minutes(REVEAL_WINDOW_MINUTES)
}

/// Pick the starting lineup out of a roster.
///
/// With explicit ids, the roster is filtered to those players and keeps roster
/// order (not the order of `explicit_ids`). Without them, the first
/// [`STARTING_LINEUP_SIZE`] roster entries are used.
pub fn resolve_lineup(roster: &[Player], explicit_ids: Option<&[PlayerId]>) -> Vec<Player> {
    if roster.is_empty() {
        return Vec::new();
    }

    match explicit_ids {
        Some(ids) if !ids.is_empty() => {
            let wanted: HashSet<PlayerId> = ids.iter().copied().collect();
            roster
                .iter()
                .filter(|p| wanted.contains(&p.id))
                .cloned()
                .collect()
        }
        _ => roster.iter().take(STARTING_LINEUP_SIZE).cloned().collect(),
    }
}

/// Started matches always show lineups. Scheduled ones from
/// `kickoff - 10min` onwards (inclusive).
pub fn should_reveal_lineup(now: DateTime<Utc>, kickoff: DateTime<Utc>, status: MatchStatus) -> bool {
    match status {
        MatchStatus::Live | MatchStatus::Completed => true,
        MatchStatus::Scheduled => now >= kickoff - reveal_window(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn roster(n: i64) -> Vec<Player> {
        (1..=n)
            .map(|i| Player {
                id: 100 + i,
                name: format!("Player {i}"),
                shirt_number: i as u32,
                team_id: 1,
                position: None,
            })
            .collect()
    }

    fn ids(players: &[Player]) -> Vec<i64> {
        players.iter().map(|p| p.id).collect()
    }

    fn kickoff() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 6, 14, 18, 0, 0).unwrap()
    }

    #[test]
    fn test_fallback_takes_first_eleven() {
        let squad = roster(18);
        let lineup = resolve_lineup(&squad, None);
        assert_eq!(lineup.len(), 11);
        assert_eq!(ids(&lineup), ids(&squad[..11]));
    }

    #[test]
    fn test_fallback_short_roster_returns_everyone() {
        let squad = roster(7);
        assert_eq!(resolve_lineup(&squad, None), squad);
    }

    #[test]
    fn test_empty_ids_fall_back() {
        let squad = roster(12);
        assert_eq!(resolve_lineup(&squad, Some(&[])).len(), 11);
    }

    #[test]
    fn test_explicit_ids_keep_roster_order() {
        let squad = roster(14);
        let chosen = [113, 102, 107, 999];
        let lineup = resolve_lineup(&squad, Some(&chosen));
        assert_eq!(ids(&lineup), vec![102, 107, 113]);
    }

    #[test]
    fn test_empty_roster_ignores_ids() {
        assert!(resolve_lineup(&[], Some(&[1, 2, 3])).is_empty());
        assert!(resolve_lineup(&[], None).is_empty());
    }

    #[test]
    fn test_reveal_boundary_is_inclusive() {
        let at_boundary = kickoff() - Duration::minutes(10);
        assert!(should_reveal_lineup(at_boundary, kickoff(), MatchStatus::Scheduled));
        assert!(!should_reveal_lineup(
            at_boundary - Duration::seconds(1),
            kickoff(),
            MatchStatus::Scheduled
        ));
    }

    #[test]
    fn test_started_matches_always_reveal() {
        let long_before = kickoff() - Duration::days(30);
        assert!(should_reveal_lineup(long_before, kickoff(), MatchStatus::Live));
        assert!(should_reveal_lineup(long_before, kickoff(), MatchStatus::Completed));
    }
}
