use std::str::FromStr;

use crate::domain::Match;
use crate::ValidationError;

/// Predicates commonly applied to live match lists.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MatchFilter {
    /// At least `min_goals` scored in total.
    HighScoring { min_goals: u32 },
    /// Goal difference of at most `max_margin`.
    Close { max_margin: u32 },
    /// Reported minute is 45 or later.
    SecondHalf,
    /// League name contains the given text, case-insensitively.
    League(String),
}

impl MatchFilter {
    pub fn matches(&self, item: &Match) -> bool {
        match self {
            Self::HighScoring { min_goals } => item.score.total() >= *min_goals,
            Self::Close { max_margin } => item.score.margin() <= *max_margin,
            Self::SecondHalf => item.minute.is_some_and(|minute| minute >= 45),
            Self::League(needle) => item
                .league
                .name
                .to_lowercase()
                .contains(&needle.to_lowercase()),
        }
    }

    /// Keeps the matches that satisfy every filter.
    pub fn apply_all(filters: &[Self], matches: Vec<Match>) -> Vec<Match> {
        matches
            .into_iter()
            .filter(|item| filters.iter().all(|filter| filter.matches(item)))
            .collect()
    }
}

impl FromStr for MatchFilter {
    type Err = ValidationError;

    /// Accepts `high-scoring[=N]`, `close[=N]`, `second-half` and `league=NAME`.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let invalid = || ValidationError::InvalidFilter {
            value: value.to_owned(),
        };
        let (name, argument) = match value.split_once('=') {
            Some((name, argument)) => (name.trim(), Some(argument.trim())),
            None => (value.trim(), None),
        };
        let count = |default: u32| match argument {
            Some(raw) => raw.parse::<u32>().map_err(|_| invalid()),
            None => Ok(default),
        };

        match name.to_ascii_lowercase().as_str() {
            "high-scoring" => Ok(Self::HighScoring {
                min_goals: count(3)?,
            }),
            "close" => Ok(Self::Close {
                max_margin: count(1)?,
            }),
            "second-half" if argument.is_none() => Ok(Self::SecondHalf),
            "league" => match argument {
                Some(league) if !league.is_empty() => Ok(Self::League(league.to_owned())),
                _ => Err(invalid()),
            },
            _ => Err(invalid()),
        }
    }
}
