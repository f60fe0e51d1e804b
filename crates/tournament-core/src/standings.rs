//! Group standings ordering.

use std::cmp::Ordering;

use crate::model::{GroupTeam, Match, MatchStatus};

fn compare_points(a: &GroupTeam, b: &GroupTeam) -> Ordering {
    b.points.cmp(&a.points)
}

fn compare_goal_difference(a: &GroupTeam, b: &GroupTeam) -> Ordering {
    b.goal_difference().cmp(&a.goal_difference())
}

fn compare_goals_for(a: &GroupTeam, b: &GroupTeam) -> Ordering {
    b.goals_for.cmp(&a.goals_for)
}

/// Order a group table by points, then goal difference, then goals scored,
/// all descending. Full ties keep their input order.
pub fn rank(teams: &[GroupTeam]) -> Vec<GroupTeam> {
    let mut ranked = teams.to_vec();
    // `sort_by` is stable
    ranked.sort_by(|a, b| {
        compare_points(a, b)
            .then_with(|| compare_goal_difference(a, b))
            .then_with(|| compare_goals_for(a, b))
    });
    ranked
}

/// Flag teams currently playing a live match and attach their running score
/// ("own-opponent"). Every other row is cleared.
pub fn mark_live(teams: &[GroupTeam], matches: &[Match]) -> Vec<GroupTeam> {
    let live: Vec<&Match> = matches
        .iter()
        .filter(|m| m.status == MatchStatus::Live)
        .collect();

    teams
        .iter()
        .map(|row| {
            let score = live.iter().find_map(|m| m.score_for(row.team.id));
            GroupTeam {
                is_live: score.is_some(),
                live_score: score.map(|(own, opp)| format!("{own}-{opp}")),
                ..row.clone()
            }
        })
        .collect()
}
