use sqlx::PgPool;
use tournament_core::{Group, GroupTeam, TeamSummary};

use crate::error::AppError;

/// One standings row joined with its group and team.
#[derive(Debug, Clone, PartialEq, Eq, sqlx::FromRow)]
pub struct GroupTeamRow {
    pub group_id: i64,
    pub group_name: String,
    pub team_id: i64,
    pub team_name: String,
    pub team_logo_url: Option<String>,
    pub played: i32,
    pub won: i32,
    pub drawn: i32,
    pub lost: i32,
    pub goals_for: i32,
    pub goals_against: i32,
    pub points: i32,
}

fn count(value: i32) -> u32 {
    u32::try_from(value).unwrap_or(0)
}

impl From<GroupTeamRow> for GroupTeam {
    fn from(row: GroupTeamRow) -> Self {
        GroupTeam {
            team: TeamSummary {
                id: row.team_id,
                name: row.team_name,
                logo_url: row.team_logo_url,
            },
            played: count(row.played),
            won: count(row.won),
            drawn: count(row.drawn),
            lost: count(row.lost),
            goals_for: count(row.goals_for),
            goals_against: count(row.goals_against),
            points: count(row.points),
            is_live: false,
            live_score: None,
        }
    }
}

/// Fold joined rows into groups. Groups appear in the order of their first
/// row; rows keep their stored order (ranking happens on read).
pub fn assemble_groups(rows: Vec<GroupTeamRow>) -> Vec<Group> {
    let mut groups: Vec<Group> = Vec::new();
    for row in rows {
        let position = groups.iter().position(|g| g.id == row.group_id);
        let index = match position {
            Some(index) => index,
            None => {
                groups.push(Group {
                    id: row.group_id,
                    name: row.group_name.clone(),
                    teams: Vec::new(),
                });
                groups.len() - 1
            }
        };
        groups[index].teams.push(GroupTeam::from(row));
    }
    groups
}

/// Every group with its raw standings rows. Groups without teams are included.
pub async fn list_groups_with_standings(pool: &PgPool) -> Result<Vec<Group>, AppError> {
    let empty: Vec<(i64, String)> = sqlx::query_as(
        r#"SELECT g.id, g.name FROM tournament_groups g
           WHERE NOT EXISTS (SELECT 1 FROM group_teams gt WHERE gt.group_id = g.id)"#,
    )
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)?;

    let rows = sqlx::query_as::<_, GroupTeamRow>(
        r#"SELECT
            g.id as group_id,
            g.name as group_name,
            t.id as team_id,
            t.name as team_name,
            t.logo_url as team_logo_url,
            gt.played,
            gt.won,
            gt.drawn,
            gt.lost,
            gt.goals_for,
            gt.goals_against,
            gt.points
        FROM group_teams gt
        JOIN tournament_groups g ON gt.group_id = g.id
        JOIN teams t ON gt.team_id = t.id
        ORDER BY g.name, g.id, gt.id"#,
    )
    .fetch_all(pool)
    .await
    .map_err(AppError::Sqlx)?;

    let mut groups = assemble_groups(rows);
    groups.extend(empty.into_iter().map(|(id, name)| Group {
        id,
        name,
        teams: Vec::new(),
    }));
    groups.sort_by(|a, b| a.name.cmp(&b.name));
    Ok(groups)
}
