use axum::{Extension, Json};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tournament_core::{mark_live, rank, Group, MatchStatus};

use crate::db::{groups, matches};
use crate::error::AppError;

fn group_to_json(group: &Group) -> JsonValue {
    let rows: Vec<JsonValue> = group
        .teams
        .iter()
        .enumerate()
        .map(|(i, row)| {
            serde_json::json!({
                "position": i + 1,
                "team": row.team,
                "played": row.played,
                "won": row.won,
                "drawn": row.drawn,
                "lost": row.lost,
                "goalsFor": row.goals_for,
                "goalsAgainst": row.goals_against,
                "goalDifference": row.goal_difference(),
                "points": row.points,
                "isLive": row.is_live,
                "liveScore": row.live_score,
            })
        })
        .collect();

    serde_json::json!({
        "id": group.id,
        "name": group.name,
        "teams": rows,
    })
}

/// GET /api/groups
/// Groups with ranked standings. Teams in a live match carry the running score.
pub async fn get_groups(Extension(pool): Extension<PgPool>) -> Result<Json<JsonValue>, AppError> {
    let stored = groups::list_groups_with_standings(&pool).await?;
    let live = matches::list_matches(&pool, Some(MatchStatus::Live)).await?;

    let ranked: Vec<JsonValue> = stored
        .into_iter()
        .map(|g| {
            for row in g.teams.iter().filter(|row| !row.is_consistent()) {
                tracing::warn!(
                    "Inconsistent standings row for team {} in group {}",
                    row.team.id,
                    g.id
                );
            }
            let teams = rank(&mark_live(&g.teams, &live));
            group_to_json(&Group { teams, ..g })
        })
        .collect();

    Ok(Json(serde_json::json!({ "groups": ranked })))
}
