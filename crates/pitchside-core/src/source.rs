use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::ValidationError;

/// Canonical provider identifiers used in records, routing and configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ProviderId {
    ApiFootball,
    FootballData,
    SportsDb,
}

impl ProviderId {
    pub const ALL: [Self; 3] = [Self::ApiFootball, Self::FootballData, Self::SportsDb];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ApiFootball => "api-football",
            Self::FootballData => "football-data",
            Self::SportsDb => "sports-db",
        }
    }
}

impl Display for ProviderId {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProviderId {
    type Err = ValidationError;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "api-football" => Ok(Self::ApiFootball),
            "football-data" => Ok(Self::FootballData),
            "sports-db" => Ok(Self::SportsDb),
            other => Err(ValidationError::InvalidProvider {
                value: other.to_owned(),
            }),
        }
    }
}
