//! # Domain Models
//!
//! Canonical football records produced by every provider adapter.
//!
//! | Type | Description |
//! |------|-------------|
//! | [`Match`] | A fixture with league, teams, status and score |
//! | [`League`] | A competition offered by a provider |
//! | [`MatchStatistics`] | Provider-shaped statistics for one match |
//! | [`RecordId`] | Numeric or textual upstream identifier |
//! | [`MatchFilter`] | Predicates over normalized matches |
//!
//! Records are produced fresh per request and carry the provider that
//! answered in their `provider` field.

mod filter;
mod models;

pub use filter::MatchFilter;
pub use models::{League, LeagueRef, Match, MatchStatistics, RecordId, Score, TeamRef};
