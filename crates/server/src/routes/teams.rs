use axum::{extract::Path, Extension, Json};
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tournament_core::Team;

use crate::db::teams;
use crate::error::AppError;

/// GET /api/teams
pub async fn list_teams(Extension(pool): Extension<PgPool>) -> Result<Json<JsonValue>, AppError> {
    let all = teams::list_teams(&pool).await?;
    Ok(Json(serde_json::json!({
        "teams": all,
        "total": all.len(),
    })))
}

/// GET /api/teams/{team_id}
pub async fn get_team(
    Extension(pool): Extension<PgPool>,
    Path(team_id): Path<i64>,
) -> Result<Json<Team>, AppError> {
    let team = teams::get_team_by_id(&pool, team_id)
        .await?
        .ok_or(AppError::NotFound("Team not found".into()))?;
    Ok(Json(team))
}
