use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ParseError;

pub type PlayerId = i64;
pub type TeamId = i64;
pub type MatchId = i64;
pub type GroupId = i64;

/// Stored match status. Set by an administrator, never derived here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MatchStatus {
    Scheduled,
    Live,
    Completed,
}

impl MatchStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            MatchStatus::Scheduled => "scheduled",
            MatchStatus::Live => "live",
            MatchStatus::Completed => "completed",
        }
    }

    /// Live or completed matches carry a score.
    pub fn has_started(&self) -> bool {
        !matches!(self, MatchStatus::Scheduled)
    }
}

impl FromStr for MatchStatus {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "scheduled" => Ok(MatchStatus::Scheduled),
            "live" => Ok(MatchStatus::Live),
            "completed" => Ok(MatchStatus::Completed),
            other => Err(ParseError::MatchStatus(other.to_string())),
        }
    }
}

impl fmt::Display for MatchStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EventType {
    Goal,
    Substitution,
    Card,
}

impl EventType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EventType::Goal => "goal",
            EventType::Substitution => "substitution",
            EventType::Card => "card",
        }
    }
}

impl FromStr for EventType {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal" => Ok(EventType::Goal),
            "substitution" => Ok(EventType::Substitution),
            "card" => Ok(EventType::Card),
            other => Err(ParseError::EventType(other.to_string())),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Player {
    pub id: PlayerId,
    pub name: String,
    pub shirt_number: u32,
    pub team_id: TeamId,
    pub position: Option<String>,
}

/// The part of a team a match or standings row needs for display.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TeamSummary {
    pub id: TeamId,
    pub name: String,
    pub logo_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Team {
    pub id: TeamId,
    pub name: String,
    pub logo_url: Option<String>,
    pub coach_name: Option<String>,
    pub players: Vec<Player>,
}

impl Team {
    pub fn summary(&self) -> TeamSummary {
        TeamSummary {
            id: self.id,
            name: self.name.clone(),
            logo_url: self.logo_url.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchEvent {
    pub id: i64,
    #[serde(rename = "type")]
    pub event_type: EventType,
    /// Match-clock label such as `45+2'`. Free-form.
    pub time: String,
    pub player_name: Option<String>,
    pub team_id: Option<TeamId>,
    pub details: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Match {
    pub id: MatchId,
    pub team_a: TeamSummary,
    pub team_b: TeamSummary,
    pub date_time: DateTime<Utc>,
    pub venue: String,
    pub status: MatchStatus,
    pub score_a: Option<u32>,
    pub score_b: Option<u32>,
    /// Event log in insertion order.
    pub events: Vec<MatchEvent>,
    /// Admin-chosen starting lineups. Never serialized: public views expose
    /// the resolved lineups only once they are revealed.
    #[serde(default, skip_serializing)]
    pub lineup_a_ids: Option<Vec<PlayerId>>,
    #[serde(default, skip_serializing)]
    pub lineup_b_ids: Option<Vec<PlayerId>>,
    pub player_of_match: Option<PlayerId>,
    pub group_id: Option<GroupId>,
}

impl Match {
    pub fn involves(&self, team_id: TeamId) -> bool {
        self.team_a.id == team_id || self.team_b.id == team_id
    }

    /// Score as seen by `team_id`: (own goals, opponent goals).
    /// Missing scores count as zero. `None` if the team is not playing.
    pub fn score_for(&self, team_id: TeamId) -> Option<(u32, u32)> {
        let a = self.score_a.unwrap_or(0);
        let b = self.score_b.unwrap_or(0);
        if self.team_a.id == team_id {
            Some((a, b))
        } else if self.team_b.id == team_id {
            Some((b, a))
        } else {
            None
        }
    }
}

/// A team's standing row within one group.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GroupTeam {
    pub team: TeamSummary,
    pub played: u32,
    pub won: u32,
    pub drawn: u32,
    pub lost: u32,
    pub goals_for: u32,
    pub goals_against: u32,
    pub points: u32,
    #[serde(default)]
    pub is_live: bool,
    pub live_score: Option<String>,
}

impl GroupTeam {
    pub fn goal_difference(&self) -> i64 {
        i64::from(self.goals_for) - i64::from(self.goals_against)
    }

    /// `played = won + drawn + lost`
    pub fn is_consistent(&self) -> bool {
        self.played == self.won + self.drawn + self.lost
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Group {
    pub id: GroupId,
    pub name: String,
    pub teams: Vec<GroupTeam>,
}

impl Group {
    pub fn ranked(&self) -> Group {
        Group {
            id: self.id,
            name: self.name.clone(),
            teams: crate::standings::rank(&self.teams),
        }
    }
}

/// Singleton tournament settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TournamentInfo {
    pub name: String,
    pub about: String,
    pub logo_url: Option<String>,
    pub knockout_image_url: Option<String>,
}
