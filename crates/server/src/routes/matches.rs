use axum::{extract::Path, extract::Query, Extension, Json};
use chrono::Utc;
use serde::Deserialize;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tournament_core::{derive_match_card, derive_match_view, MatchStatus, MatchView};

use crate::db::{matches, teams};
use crate::error::AppError;

#[derive(Deserialize)]
pub struct MatchListQuery {
    pub status: Option<String>,
}

pub(crate) fn parse_status(raw: &str) -> Result<MatchStatus, AppError> {
    raw.parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid status: {raw}")))
}

/// GET /api/matches?status=live
pub async fn list_matches(
    Extension(pool): Extension<PgPool>,
    Query(q): Query<MatchListQuery>,
) -> Result<Json<JsonValue>, AppError> {
    let status = q.status.as_deref().map(parse_status).transpose()?;
    let fixtures = matches::list_matches(&pool, status).await?;

    let now = Utc::now();
    let cards: Vec<_> = fixtures
        .into_iter()
        .map(|m| derive_match_card(m, now))
        .collect();

    Ok(Json(serde_json::json!({
        "matches": cards,
        "total": cards.len(),
    })))
}

/// GET /api/matches/{match_id}
pub async fn get_match(
    Extension(pool): Extension<PgPool>,
    Path(match_id): Path<i64>,
) -> Result<Json<MatchView>, AppError> {
    let fixture = matches::get_match_by_id(&pool, match_id)
        .await?
        .ok_or(AppError::NotFound("Match not found".into()))?;

    let roster_a = teams::get_team_roster(&pool, fixture.team_a.id).await?;
    let roster_b = teams::get_team_roster(&pool, fixture.team_b.id).await?;

    Ok(Json(derive_match_view(fixture, &roster_a, &roster_b, Utc::now())))
}
