use std::collections::HashSet;

use axum::{
    body::Bytes,
    extract::{Path, Query},
    http::HeaderMap,
    Extension, Json,
};
use serde::Deserialize;
use serde_json::Value as JsonValue;
use sqlx::PgPool;
use tournament_core::{EventType, Match, MatchEvent, MatchStatus, PlayerId};
use validator::Validate;

use crate::auth::{jwt, middleware::AdminSession, middleware::MaybeAdminSession, pin};
use crate::clients::storage::AssetStorage;
use crate::config::Config;
use crate::db::matches::{self, NewEvent};
use crate::db::teams;
use crate::error::AppError;
use crate::routes::matches::parse_status;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub pin: String,
}

/// POST /api/admin/login
/// A wrong PIN is reported as `authenticated: false`, not as an error.
pub async fn login(
    Extension(config): Extension<Config>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<JsonValue>, AppError> {
    if !pin::pin_matches(&req.pin, &config.admin_pin) {
        tracing::warn!("Admin PIN mismatch");
        return Ok(Json(serde_json::json!({ "authenticated": false })));
    }

    let token = jwt::create_admin_token(&config.jwt_secret, config.admin_session_hours)
        .map_err(|e| AppError::Internal(format!("Token creation error: {e}")))?;

    tracing::info!("Admin session started");
    Ok(Json(serde_json::json!({
        "authenticated": true,
        "token": token,
    })))
}

/// GET /api/admin/session
pub async fn session(admin: MaybeAdminSession) -> Json<JsonValue> {
    Json(serde_json::json!({ "authenticated": admin.0 }))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct UpdateMatchRequest {
    pub status: String,
    #[validate(range(max = 99))]
    pub score_a: Option<u32>,
    #[validate(range(max = 99))]
    pub score_b: Option<u32>,
    pub player_of_match: Option<PlayerId>,
}

/// Scores are cleared for scheduled matches. Started matches keep the given
/// score, else the stored one, else 0.
fn resolve_scores(
    status: MatchStatus,
    requested: (Option<u32>, Option<u32>),
    stored: (Option<u32>, Option<u32>),
) -> (Option<u32>, Option<u32>) {
    if !status.has_started() {
        return (None, None);
    }
    (
        Some(requested.0.or(stored.0).unwrap_or(0)),
        Some(requested.1.or(stored.1).unwrap_or(0)),
    )
}

/// Player of the match is cleared when a match goes back to scheduled,
/// otherwise kept unless a new one is given.
fn resolve_player_of_match(
    status: MatchStatus,
    requested: Option<PlayerId>,
    stored: Option<PlayerId>,
) -> Option<PlayerId> {
    if !status.has_started() {
        return None;
    }
    requested.or(stored)
}

/// Admin view of a match. Unlike the public views it includes the explicit
/// lineup selections.
fn admin_match_json(m: &Match) -> Result<JsonValue, AppError> {
    let mut json = serde_json::to_value(m)
        .map_err(|e| AppError::Internal(format!("Serialize error: {e}")))?;
    json["lineupAIds"] = serde_json::json!(m.lineup_a_ids);
    json["lineupBIds"] = serde_json::json!(m.lineup_b_ids);
    Ok(json)
}

async fn load_match(pool: &PgPool, match_id: i64) -> Result<Match, AppError> {
    matches::get_match_by_id(pool, match_id)
        .await?
        .ok_or(AppError::NotFound("Match not found".into()))
}

/// PUT /api/admin/matches/{match_id}
pub async fn update_match(
    Extension(pool): Extension<PgPool>,
    _admin: AdminSession,
    Path(match_id): Path<i64>,
    Json(req): Json<UpdateMatchRequest>,
) -> Result<Json<JsonValue>, AppError> {
    req.validate()?;
    let status = parse_status(&req.status)?;
    let existing = load_match(&pool, match_id).await?;

    if let Some(player_id) = req.player_of_match {
        let mut eligible = teams::get_team_roster(&pool, existing.team_a.id).await?;
        eligible.extend(teams::get_team_roster(&pool, existing.team_b.id).await?);
        if !eligible.iter().any(|p| p.id == player_id) {
            return Err(AppError::BadRequest(
                "Player of the match must play for one of the teams".into(),
            ));
        }
    }

    let (score_a, score_b) = resolve_scores(
        status,
        (req.score_a, req.score_b),
        (existing.score_a, existing.score_b),
    );

    let player_of_match =
        resolve_player_of_match(status, req.player_of_match, existing.player_of_match);

    matches::update_match_result(&pool, match_id, status, score_a, score_b, player_of_match)
        .await?;

    tracing::info!("Match {} set to {} ({:?}-{:?})", match_id, status, score_a, score_b);
    Ok(Json(admin_match_json(&load_match(&pool, match_id).await?)?))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLineupRequest {
    pub lineup_a_ids: Option<Vec<PlayerId>>,
    pub lineup_b_ids: Option<Vec<PlayerId>>,
}

/// Every chosen id must belong to the roster. Empty selections become `None`.
fn check_lineup(
    ids: Option<Vec<PlayerId>>,
    roster_ids: &HashSet<PlayerId>,
    side: &str,
) -> Result<Option<Vec<PlayerId>>, AppError> {
    let Some(ids) = ids.filter(|ids| !ids.is_empty()) else {
        return Ok(None);
    };
    if let Some(stray) = ids.iter().find(|id| !roster_ids.contains(id)) {
        return Err(AppError::BadRequest(format!(
            "Player {stray} is not on the {side} roster"
        )));
    }
    let unique: HashSet<PlayerId> = ids.iter().copied().collect();
    if unique.len() != ids.len() {
        return Err(AppError::BadRequest(format!("Duplicate player in {side} lineup")));
    }
    Ok(Some(ids))
}

/// PUT /api/admin/matches/{match_id}/lineup
pub async fn update_lineup(
    Extension(pool): Extension<PgPool>,
    _admin: AdminSession,
    Path(match_id): Path<i64>,
    Json(req): Json<UpdateLineupRequest>,
) -> Result<Json<JsonValue>, AppError> {
    let existing = load_match(&pool, match_id).await?;

    let roster_a: HashSet<PlayerId> = teams::get_team_roster(&pool, existing.team_a.id)
        .await?
        .iter()
        .map(|p| p.id)
        .collect();
    let roster_b: HashSet<PlayerId> = teams::get_team_roster(&pool, existing.team_b.id)
        .await?
        .iter()
        .map(|p| p.id)
        .collect();

    let lineup_a = check_lineup(req.lineup_a_ids, &roster_a, &existing.team_a.name)?;
    let lineup_b = check_lineup(req.lineup_b_ids, &roster_b, &existing.team_b.name)?;

    matches::update_lineup(&pool, match_id, lineup_a.as_deref(), lineup_b.as_deref()).await?;

    tracing::info!("Lineups updated for match {}", match_id);
    Ok(Json(admin_match_json(&load_match(&pool, match_id).await?)?))
}

#[derive(Debug, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct AddEventRequest {
    #[serde(rename = "type")]
    pub event_type: String,
    #[validate(length(min = 1, max = 16))]
    pub time: String,
    #[validate(length(max = 100))]
    pub player_name: Option<String>,
    pub team_id: Option<i64>,
    #[validate(length(max = 500))]
    pub details: Option<String>,
}

/// POST /api/admin/matches/{match_id}/events
pub async fn add_event(
    Extension(pool): Extension<PgPool>,
    _admin: AdminSession,
    Path(match_id): Path<i64>,
    Json(req): Json<AddEventRequest>,
) -> Result<Json<MatchEvent>, AppError> {
    req.validate()?;
    let event_type: EventType = req
        .event_type
        .parse()
        .map_err(|_| AppError::BadRequest(format!("Invalid event type: {}", req.event_type)))?;

    let existing = load_match(&pool, match_id).await?;
    if let Some(team_id) = req.team_id {
        if !existing.involves(team_id) {
            return Err(AppError::BadRequest("Team is not playing in this match".into()));
        }
    }

    let event = matches::insert_match_event(
        &pool,
        match_id,
        &NewEvent {
            event_type,
            time: req.time.trim(),
            player_name: req.player_name.as_deref(),
            team_id: req.team_id,
            details: req.details.as_deref(),
        },
    )
    .await?;

    tracing::info!("Match {}: {} at {}", match_id, event_type.as_str(), event.time);
    Ok(Json(event))
}

#[derive(Deserialize)]
pub struct UploadQuery {
    pub filename: String,
}

/// POST /api/admin/assets?filename=logo.png
/// Raw file bytes in the body. Returns the public URL.
pub async fn upload_asset(
    Extension(storage): Extension<Option<AssetStorage>>,
    _admin: AdminSession,
    Query(q): Query<UploadQuery>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<JsonValue>, AppError> {
    let storage = storage.ok_or(AppError::Storage("Asset storage is not configured".into()))?;

    let content_type = headers
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("application/octet-stream");

    let url = storage
        .upload_asset(&q.filename, body, content_type)
        .await
        .map_err(AppError::Storage)?;

    Ok(Json(serde_json::json!({ "url": url })))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve_scores() {
        assert_eq!(
            resolve_scores(MatchStatus::Scheduled, (Some(1), Some(2)), (None, None)),
            (None, None)
        );
        assert_eq!(
            resolve_scores(MatchStatus::Live, (None, None), (None, None)),
            (Some(0), Some(0))
        );
        assert_eq!(
            resolve_scores(MatchStatus::Completed, (Some(3), None), (Some(1), Some(1))),
            (Some(3), Some(1))
        );
    }

    #[test]
    fn test_status_change_keeps_player_of_match() {
        assert_eq!(resolve_player_of_match(MatchStatus::Completed, None, Some(7)), Some(7));
        assert_eq!(resolve_player_of_match(MatchStatus::Completed, Some(9), Some(7)), Some(9));
        assert_eq!(resolve_player_of_match(MatchStatus::Live, None, None), None);
        assert_eq!(resolve_player_of_match(MatchStatus::Scheduled, Some(9), Some(7)), None);
    }

    #[test]
    fn test_admin_match_json_includes_lineup_ids() {
        use chrono::TimeZone;
        use tournament_core::TeamSummary;

        let m = Match {
            id: 4,
            team_a: TeamSummary { id: 1, name: "Harbour FC".into(), logo_url: None },
            team_b: TeamSummary { id: 2, name: "Northside".into(), logo_url: None },
            date_time: chrono::Utc.with_ymd_and_hms(2026, 6, 20, 17, 0, 0).unwrap(),
            venue: "Pitch 1".into(),
            status: MatchStatus::Scheduled,
            score_a: None,
            score_b: None,
            events: vec![],
            lineup_a_ids: Some(vec![12, 11]),
            lineup_b_ids: None,
            player_of_match: None,
            group_id: None,
        };
        let json = admin_match_json(&m).unwrap();
        assert_eq!(json["lineupAIds"], serde_json::json!([12, 11]));
        assert!(json["lineupBIds"].is_null());
        assert_eq!(json["teamA"]["name"], "Harbour FC");
    }

    #[test]
    fn test_check_lineup() {
        let roster: HashSet<PlayerId> = [1, 2, 3, 4].into_iter().collect();
        assert_eq!(check_lineup(None, &roster, "A").unwrap(), None);
        assert_eq!(check_lineup(Some(vec![]), &roster, "A").unwrap(), None);
        assert_eq!(
            check_lineup(Some(vec![3, 1]), &roster, "A").unwrap(),
            Some(vec![3, 1])
        );
        assert!(check_lineup(Some(vec![1, 9]), &roster, "A").is_err());
        assert!(check_lineup(Some(vec![2, 2]), &roster, "A").is_err());
    }
}
