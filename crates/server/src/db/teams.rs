use std::collections::HashMap;

use sqlx::PgPool;
use tournament_core::{Player, Team, TeamId};

use crate::error::AppError;

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct TeamRow {
    pub id: i64,
    pub name: String,
    pub logo_url: Option<String>,
    pub coach_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct PlayerRow {
    pub id: i64,
    pub team_id: i64,
    pub name: String,
    pub shirt_number: i32,
    pub position: Option<String>,
}

impl TeamRow {
    pub fn into_team(self, players: Vec<Player>) -> Team {
        Team {
            id: self.id,
            name: self.name,
            logo_url: self.logo_url,
            coach_name: self.coach_name,
            players,
        }
    }

    pub fn from_team(team: &Team) -> Self {
        Self {
            id: team.id,
            name: team.name.clone(),
            logo_url: team.logo_url.clone(),
            coach_name: team.coach_name.clone(),
        }
    }
}

impl From<PlayerRow> for Player {
    fn from(row: PlayerRow) -> Self {
        Player {
            id: row.id,
            name: row.name,
            shirt_number: u32::try_from(row.shirt_number).unwrap_or(0),
            team_id: row.team_id,
            position: row.position,
        }
    }
}

impl PlayerRow {
    pub fn from_player(player: &Player) -> Self {
        Self {
            id: player.id,
            team_id: player.team_id,
            name: player.name.clone(),
            shirt_number: i32::try_from(player.shirt_number).unwrap_or(i32::MAX),
            position: player.position.clone(),
        }
    }
}

const TEAM_QUERY: &str = "SELECT id, name, logo_url, coach_name FROM teams";
const PLAYER_QUERY: &str = "SELECT id, team_id, name, shirt_number, position FROM players";

/// Roster in display order (shirt number). Lineup fallback relies on this order.
pub async fn get_team_roster(pool: &PgPool, team_id: TeamId) -> Result<Vec<Player>, AppError> {
    let query = format!("{} WHERE team_id = $1 ORDER BY shirt_number, id", PLAYER_QUERY);
    let rows = sqlx::query_as::<_, PlayerRow>(&query)
        .bind(team_id)
        .fetch_all(pool)
        .await
        .map_err(AppError::Sqlx)?;

    Ok(rows.into_iter().map(Player::from).collect())
}

pub async fn get_team_by_id(pool: &PgPool, team_id: TeamId) -> Result<Option<Team>, AppError> {
    let query = format!("{} WHERE id = $1", TEAM_QUERY);
    let row = sqlx::query_as::<_, TeamRow>(&query)
        .bind(team_id)
        .fetch_optional(pool)
        .await
        .map_err(AppError::Sqlx)?;

    match row {
        Some(row) => {
            let roster = get_team_roster(pool, team_id).await?;
            Ok(Some(row.into_team(roster)))
        }
        None => Ok(None),
    }
}

/// All teams with their rosters, ordered by name.
pub async fn list_teams(pool: &PgPool) -> Result<Vec<Team>, AppError> {
    let query = format!("{} ORDER BY name, id", TEAM_QUERY);
    let teams = sqlx::query_as::<_, TeamRow>(&query)
        .fetch_all(pool)
        .await
        .map_err(AppError::Sqlx)?;

    let query = format!("{} ORDER BY team_id, shirt_number, id", PLAYER_QUERY);
    let players = sqlx::query_as::<_, PlayerRow>(&query)
        .fetch_all(pool)
        .await
        .map_err(AppError::Sqlx)?;

    Ok(attach_rosters(teams, players))
}

/// Group player rows under their teams. Player order is preserved.
pub fn attach_rosters(teams: Vec<TeamRow>, players: Vec<PlayerRow>) -> Vec<Team> {
    let mut rosters: HashMap<i64, Vec<Player>> = HashMap::new();
    for row in players {
        rosters.entry(row.team_id).or_default().push(Player::from(row));
    }

    teams
        .into_iter()
        .map(|row| {
            let roster = rosters.remove(&row.id).unwrap_or_default();
            row.into_team(roster)
        })
        .collect()
}
