use sqlx::PgPool;
use tournament_core::{
    EventType, Match, MatchEvent, MatchId, MatchStatus, ParseError, PlayerId, TeamId, TeamSummary,
};

use crate::error::AppError;

/// A `matches` row joined with both team summaries.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct MatchRow {
    pub id: i64,
    pub team_a_id: i64,
    pub team_a_name: String,
    pub team_a_logo_url: Option<String>,
    pub team_b_id: i64,
    pub team_b_name: String,
    pub team_b_logo_url: Option<String>,
    pub date_time: chrono::DateTime<chrono::Utc>,
    pub venue: String,
    pub status: String,
    pub score_a: Option<i32>,
    pub score_b: Option<i32>,
    pub lineup_a_ids: Option<Vec<i64>>,
    pub lineup_b_ids: Option<Vec<i64>>,
    pub player_of_match: Option<i64>,
    pub group_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct EventRow {
    pub id: i64,
    pub match_id: i64,
    pub event_type: String,
    pub time_label: String,
    pub player_name: Option<String>,
    pub team_id: Option<i64>,
    pub details: Option<String>,
}

fn score_from_row(score: Option<i32>) -> Option<u32> {
    score.map(|s| u32::try_from(s).unwrap_or(0))
}

fn score_to_row(score: Option<u32>) -> Option<i32> {
    score.map(|s| i32::try_from(s).unwrap_or(i32::MAX))
}

impl MatchRow {
    pub fn into_match(self, events: Vec<MatchEvent>) -> Result<Match, ParseError> {
        Ok(Match {
            id: self.id,
            team_a: TeamSummary {
                id: self.team_a_id,
                name: self.team_a_name,
                logo_url: self.team_a_logo_url,
            },
            team_b: TeamSummary {
                id: self.team_b_id,
                name: self.team_b_name,
                logo_url: self.team_b_logo_url,
            },
            date_time: self.date_time,
            venue: self.venue,
            status: self.status.parse()?,
            score_a: score_from_row(self.score_a),
            score_b: score_from_row(self.score_b),
            events,
            lineup_a_ids: self.lineup_a_ids,
            lineup_b_ids: self.lineup_b_ids,
            player_of_match: self.player_of_match,
            group_id: self.group_id,
        })
    }

    pub fn from_match(m: &Match) -> Self {
        Self {
            id: m.id,
            team_a_id: m.team_a.id,
            team_a_name: m.team_a.name.clone(),
            team_a_logo_url: m.team_a.logo_url.clone(),
            team_b_id: m.team_b.id,
            team_b_name: m.team_b.name.clone(),
            team_b_logo_url: m.team_b.logo_url.clone(),
            date_time: m.date_time,
            venue: m.venue.clone(),
            status: m.status.as_str().to_string(),
            score_a: score_to_row(m.score_a),
            score_b: score_to_row(m.score_b),
            lineup_a_ids: m.lineup_a_ids.clone(),
            lineup_b_ids: m.lineup_b_ids.clone(),
            player_of_match: m.player_of_match,
            group_id: m.group_id,
        }
    }
}

impl EventRow {
    pub fn into_event(self) -> Result<MatchEvent, ParseError> {
        Ok(MatchEvent {
            id: self.id,
            event_type: self.event_type.parse()?,
            time: self.time_label,
            player_name: self.player_name,
            team_id: self.team_id,
            details: self.details,
        })
    }
}

const MATCH_QUERY: &str = r#"SELECT
    m.id,
    m.team_a_id,
    ta.name as team_a_name,
    ta.logo_url as team_a_logo_url,
    m.team_b_id,
    tb.name as team_b_name,
    tb.logo_url as team_b_logo_url,
    m.date_time,
    m.venue,
    m.status,
    m.score_a,
    m.score_b,
    m.lineup_a_ids,
    m.lineup_b_ids,
    m.player_of_match,
    m.group_id
FROM matches m
JOIN teams ta ON m.team_a_id = ta.id
JOIN teams tb ON m.team_b_id = tb.id"#;

/// Event log for one match in insertion order.
pub async fn list_match_events(pool: &PgPool, match_id: MatchId) -> Result<Vec<MatchEvent>, AppError> {
    let rows = sqlx::query_as::<_, EventRow>(
        r#"SELECT id, match_id, event_type, time_label, player_name, team_id, details
           FROM match_events
           WHERE match_id = $1
           ORDER BY id"#,
    )
    .bind(match_id)
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)?;

    let events = rows
        .into_iter()
        .map(EventRow::into_event)
        .collect::<Result<Vec<_>, _>>()?;
    Ok(events)
}

/// Full match including its event log. `None` when the id is unknown.
pub async fn get_match_by_id(pool: &PgPool, match_id: MatchId) -> Result<Option<Match>, AppError> {
    let query = format!("{} WHERE m.id = $1", MATCH_QUERY);
    let row = sqlx::query_as::<_, MatchRow>(&query)
        .bind(match_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::Sqlx)?;

    match row {
        Some(row) => {
            let events = list_match_events(pool, match_id).await?;
            Ok(Some(row.into_match(events)?))
        }
        None => Ok(None),
    }
}

/// Matches in kickoff order, optionally filtered by status. Event logs are
/// not loaded for listings.
pub async fn list_matches(pool: &PgPool, status: Option<MatchStatus>) -> Result<Vec<Match>, AppError> {
    let rows = match status {
        Some(status) => {
            let query = format!("{} WHERE m.status = $1 ORDER BY m.date_time, m.id", MATCH_QUERY);
            sqlx::query_as::<_, MatchRow>(&query)
                .bind(status.as_str())
                .fetch_all(pool)
                .await
        }
        None => {
            let query = format!("{} ORDER BY m.date_time, m.id", MATCH_QUERY);
            sqlx::query_as::<_, MatchRow>(&query).fetch_all(pool).await
        }
    }
    .map_err(AppError::Sqlx)?;

    let matches = rows
        .into_iter()
        .map(|row| row.into_match(Vec::new()))
        .collect::<Result<Vec<_>, _>>()?;
    Ok(matches)
}

/// Set status, score and player of the match. Returns false if no such match.
pub async fn update_match_result(
    pool: &PgPool,
    match_id: MatchId,
    status: MatchStatus,
    score_a: Option<u32>,
    score_b: Option<u32>,
    player_of_match: Option<PlayerId>,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        r#"UPDATE matches
           SET status = $1, score_a = $2, score_b = $3, player_of_match = $4
           WHERE id = $5"#,
    )
    .bind(status.as_str())
    .bind(score_to_row(score_a))
    .bind(score_to_row(score_b))
    .bind(player_of_match)
    .bind(match_id)
    .execute(pool)
    .await
    .map_err(AppError::Sqlx)?;

    Ok(result.rows_affected() > 0)
}

/// Replace the explicit lineups. `None` clears a side back to the fallback.
pub async fn update_lineup(
    pool: &PgPool,
    match_id: MatchId,
    lineup_a_ids: Option<&[PlayerId]>,
    lineup_b_ids: Option<&[PlayerId]>,
) -> Result<bool, AppError> {
    let result = sqlx::query(
        "UPDATE matches SET lineup_a_ids = $1, lineup_b_ids = $2 WHERE id = $3",
    )
    .bind(lineup_a_ids)
    .bind(lineup_b_ids)
    .bind(match_id)
    .execute(pool)
    .await
    .map_err(AppError::Sqlx)?;

    Ok(result.rows_affected() > 0)
}

pub struct NewEvent<'a> {
    pub event_type: EventType,
    pub time: &'a str,
    pub player_name: Option<&'a str>,
    pub team_id: Option<TeamId>,
    pub details: Option<&'a str>,
}

/// Append to a match's event log.
pub async fn insert_match_event(
    pool: &PgPool,
    match_id: MatchId,
    event: &NewEvent<'_>,
) -> Result<MatchEvent, AppError> {
    let row = sqlx::query_as::<_, EventRow>(
        r#"INSERT INTO match_events (match_id, event_type, time_label, player_name, team_id, details)
           VALUES ($1, $2, $3, $4, $5, $6)
           RETURNING id, match_id, event_type, time_label, player_name, team_id, details"#,
    )
    .bind(match_id)
    .bind(event.event_type.as_str())
    .bind(event.time)
    .bind(event.player_name)
    .bind(event.team_id)
    .bind(event.details)
    .fetch_one(pool)
    .await
    .map_err(AppError::Sqlx)?;

    Ok(row.into_event()?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn match_row() -> MatchRow {
        MatchRow {
            id: 3,
            team_a_id: 1,
            team_a_name: "Harbour FC".into(),
            team_a_logo_url: Some("https://cdn.example.org/harbour.png".into()),
            team_b_id: 2,
            team_b_name: "Northside".into(),
            team_b_logo_url: None,
            date_time: chrono::Utc.with_ymd_and_hms(2026, 6, 20, 17, 0, 0).unwrap(),
            venue: "Pitch 1".into(),
            status: "live".into(),
            score_a: Some(1),
            score_b: Some(0),
            lineup_a_ids: Some(vec![5, 6, 7]),
            lineup_b_ids: None,
            player_of_match: None,
            group_id: Some(2),
        }
    }

    #[test]
    fn test_match_row_round_trip() {
        let row = match_row();
        let m = row.clone().into_match(vec![]).unwrap();
        assert_eq!(m.status, MatchStatus::Live);
        assert_eq!(m.team_a.name, "Harbour FC");
        assert_eq!(m.score_a, Some(1));
        assert_eq!(MatchRow::from_match(&m), row);
    }

    #[test]
    fn test_match_row_rejects_unknown_status() {
        let mut row = match_row();
        row.status = "abandoned".into();
        assert_eq!(
            row.into_match(vec![]),
            Err(ParseError::MatchStatus("abandoned".into()))
        );
    }

    #[test]
    fn test_event_row_maps_time_label() {
        let row = EventRow {
            id: 9,
            match_id: 3,
            event_type: "goal".into(),
            time_label: "90+4'".into(),
            player_name: Some("Silva".into()),
            team_id: Some(1),
            details: None,
        };
        let event = row.into_event().unwrap();
        assert_eq!(event.event_type, EventType::Goal);
        assert_eq!(event.time, "90+4'");
    }
}
