use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::future::Future;
use std::pin::Pin;

use serde_json::Value;
use thiserror::Error;
use time::Date;

use crate::domain::{League, Match};
use crate::error::{NormalizeError, ValidationError};
use crate::transport::TransportError;
use crate::ProviderId;

/// Logical operations the service can route to a provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Operation {
    LiveMatches,
    MatchesByDate,
    Leagues,
    Statistics,
}

impl Operation {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::LiveMatches => "live_matches",
            Self::MatchesByDate => "matches_by_date",
            Self::Leagues => "leagues",
            Self::Statistics => "statistics",
        }
    }
}

impl Display for Operation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operations a provider adapter can serve.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapabilitySet {
    pub live: bool,
    pub by_date: bool,
    pub leagues: bool,
    pub statistics: bool,
}

impl CapabilitySet {
    pub const fn new(live: bool, by_date: bool, leagues: bool, statistics: bool) -> Self {
        Self {
            live,
            by_date,
            leagues,
            statistics,
        }
    }

    pub const fn full() -> Self {
        Self::new(true, true, true, true)
    }

    pub const fn supports(self, operation: Operation) -> bool {
        match operation {
            Operation::LiveMatches => self.live,
            Operation::MatchesByDate => self.by_date,
            Operation::Leagues => self.leagues,
            Operation::Statistics => self.statistics,
        }
    }

    pub fn supported_operations(self) -> Vec<&'static str> {
        [
            Operation::LiveMatches,
            Operation::MatchesByDate,
            Operation::Leagues,
            Operation::Statistics,
        ]
        .into_iter()
        .filter(|operation| self.supports(*operation))
        .map(Operation::as_str)
        .collect()
    }
}

/// Provider-relative endpoint plus query parameters.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiRequest {
    pub endpoint: String,
    pub params: BTreeMap<String, String>,
}

impl ApiRequest {
    pub fn new(endpoint: impl Into<String>) -> Self {
        Self {
            endpoint: endpoint.into(),
            params: BTreeMap::new(),
        }
    }

    pub fn param(mut self, name: &str, value: impl Into<String>) -> Self {
        self.params.insert(name.to_owned(), value.into());
        self
    }

    pub fn param_opt(self, name: &str, value: Option<impl Into<String>>) -> Self {
        match value {
            Some(value) => self.param(name, value),
            None => self,
        }
    }
}

/// Failure of one provider attempt.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ProviderError {
    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error("provider '{provider}' does not support {operation}")]
    Unsupported {
        provider: ProviderId,
        operation: Operation,
    },
}

impl ProviderError {
    pub const fn unsupported(provider: ProviderId, operation: Operation) -> Self {
        Self::Unsupported {
            provider,
            operation,
        }
    }
}

pub type InvokeFuture<'a, T> = Pin<Box<dyn Future<Output = Result<T, ProviderError>> + Send + 'a>>;

/// Per-provider knowledge: which endpoint serves which operation and how
/// raw records map onto canonical ones.
///
/// Adapters are stateless. Network access goes through a
/// [`TransportClient`](crate::transport::TransportClient) owned by the
/// caller; adapters only build requests and read responses.
pub trait ProviderAdapter: Send + Sync {
    fn id(&self) -> ProviderId;

    fn capabilities(&self) -> CapabilitySet;

    fn live_matches_request(&self) -> Result<ApiRequest, ProviderError> {
        Err(ProviderError::unsupported(self.id(), Operation::LiveMatches))
    }

    fn matches_by_date_request(
        &self,
        _date: Date,
        _league_id: Option<u32>,
    ) -> Result<ApiRequest, ProviderError> {
        Err(ProviderError::unsupported(self.id(), Operation::MatchesByDate))
    }

    fn leagues_request(&self, _country: Option<&str>) -> Result<ApiRequest, ProviderError> {
        Err(ProviderError::unsupported(self.id(), Operation::Leagues))
    }

    fn statistics_request(&self, _match_id: u64) -> Result<ApiRequest, ProviderError> {
        Err(ProviderError::unsupported(self.id(), Operation::Statistics))
    }

    /// Raw match records inside a match-list response. Missing or null
    /// list fields yield no records.
    fn extract_match_list<'v>(&self, body: &'v Value) -> Vec<&'v Value>;

    /// Raw league records, narrowed to `country` where the provider
    /// cannot filter server-side.
    fn extract_league_list<'v>(&self, body: &'v Value, country: Option<&str>) -> Vec<&'v Value>;

    /// Statistics payload inside a statistics response.
    fn extract_statistics(&self, body: Value) -> Value {
        body
    }

    fn normalize_match(&self, raw: &Value) -> Result<Match, NormalizeError>;

    fn normalize_league(&self, raw: &Value) -> Result<League, NormalizeError>;
}

/// Formats a date the way every provider expects it: `YYYY-MM-DD`.
pub fn iso_date(date: Date) -> String {
    format!(
        "{:04}-{:02}-{:02}",
        date.year(),
        u8::from(date.month()),
        date.day()
    )
}

/// Parses a `YYYY-MM-DD` calendar date.
pub fn parse_date(value: &str) -> Result<Date, ValidationError> {
    let format = time::macros::format_description!("[year]-[month]-[day]");
    Date::parse(value.trim(), &format).map_err(|_| ValidationError::InvalidDate {
        value: value.to_owned(),
    })
}

/// Array stored under `field`, or nothing when absent or not an array.
pub(crate) fn list_field<'v>(body: &'v Value, field: &str) -> Vec<&'v Value> {
    body.get(field)
        .and_then(Value::as_array)
        .map(|items| items.iter().collect())
        .unwrap_or_default()
}
