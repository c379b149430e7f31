use std::fmt::{Display, Formatter};

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::ProviderId;

/// Upstream identifier. Some providers use integers, others numeric strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(i64),
    Text(String),
}

impl Display for RecordId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(value) => write!(f, "{value}"),
            Self::Text(value) => f.write_str(value),
        }
    }
}

impl From<i64> for RecordId {
    fn from(value: i64) -> Self {
        Self::Number(value)
    }
}

impl From<&str> for RecordId {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

/// League summary embedded in a match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeagueRef {
    pub id: Option<RecordId>,
    pub name: String,
    pub country: String,
    pub logo: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRef {
    pub id: Option<RecordId>,
    pub name: String,
    pub logo: Option<String>,
}

/// Goals per side. `None` until the provider reports a score.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Score {
    pub home: Option<u32>,
    pub away: Option<u32>,
}

impl Score {
    pub const fn new(home: u32, away: u32) -> Self {
        Self {
            home: Some(home),
            away: Some(away),
        }
    }

    pub fn total(&self) -> u32 {
        self.home.unwrap_or(0) + self.away.unwrap_or(0)
    }

    pub fn margin(&self) -> u32 {
        self.home.unwrap_or(0).abs_diff(self.away.unwrap_or(0))
    }
}

/// Canonical match record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Match {
    pub id: RecordId,
    /// ISO-8601 date or date-time as reported upstream.
    pub date: String,
    pub status: String,
    pub minute: Option<u32>,
    pub league: LeagueRef,
    pub home_team: TeamRef,
    pub away_team: TeamRef,
    pub score: Score,
    pub provider: ProviderId,
}

/// Canonical league record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct League {
    pub id: RecordId,
    pub name: String,
    pub country: String,
    pub logo: Option<String>,
    #[serde(rename = "type")]
    pub kind: String,
    pub provider: ProviderId,
}

/// Statistics for one match, kept in the answering provider's shape.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MatchStatistics {
    pub match_id: u64,
    pub provider: ProviderId,
    pub data: Value,
}
