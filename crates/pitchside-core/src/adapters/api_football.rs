use serde_json::{json, Value};
use time::Date;

use crate::data_source::{
    iso_date, list_field, ApiRequest, CapabilitySet, ProviderAdapter, ProviderError,
};
use crate::domain::{League, LeagueRef, Match, Score, TeamRef};
use crate::error::NormalizeError;
use crate::normalize::{optional_str, optional_u32, required_id, required_str, string_or_empty};
use crate::ProviderId;

/// API-Football v3 (direct or through the RapidAPI gateway).
///
/// Every payload wraps its records in a top-level `response` array.
#[derive(Debug, Clone, Copy, Default)]
pub struct ApiFootballAdapter;

impl ProviderAdapter for ApiFootballAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::ApiFootball
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    fn live_matches_request(&self) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("fixtures").param("live", "all"))
    }

    fn matches_by_date_request(
        &self,
        date: Date,
        league_id: Option<u32>,
    ) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("fixtures")
            .param("date", iso_date(date))
            .param_opt("league", league_id.map(|id| id.to_string())))
    }

    fn leagues_request(&self, country: Option<&str>) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("leagues").param_opt("country", country))
    }

    fn statistics_request(&self, match_id: u64) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("fixtures/statistics").param("fixture", match_id.to_string()))
    }

    fn extract_match_list<'v>(&self, body: &'v Value) -> Vec<&'v Value> {
        list_field(body, "response")
    }

    fn extract_league_list<'v>(&self, body: &'v Value, _country: Option<&str>) -> Vec<&'v Value> {
        list_field(body, "response")
    }

    fn extract_statistics(&self, mut body: Value) -> Value {
        match body.get_mut("response").map(Value::take) {
            Some(Value::Null) | None => json!({}),
            Some(statistics) => statistics,
        }
    }

    fn normalize_match(&self, raw: &Value) -> Result<Match, NormalizeError> {
        Ok(Match {
            id: required_id(raw, "/fixture/id")?,
            date: required_str(raw, "/fixture/date")?,
            status: required_str(raw, "/fixture/status/short")?,
            minute: optional_u32(raw, "/fixture/status/elapsed")?,
            league: LeagueRef {
                id: Some(required_id(raw, "/league/id")?),
                name: required_str(raw, "/league/name")?,
                country: string_or_empty(raw, "/league/country"),
                logo: optional_str(raw, "/league/logo"),
            },
            home_team: TeamRef {
                id: Some(required_id(raw, "/teams/home/id")?),
                name: required_str(raw, "/teams/home/name")?,
                logo: optional_str(raw, "/teams/home/logo"),
            },
            away_team: TeamRef {
                id: Some(required_id(raw, "/teams/away/id")?),
                name: required_str(raw, "/teams/away/name")?,
                logo: optional_str(raw, "/teams/away/logo"),
            },
            score: Score {
                home: optional_u32(raw, "/goals/home")?,
                away: optional_u32(raw, "/goals/away")?,
            },
            provider: self.id(),
        })
    }

    fn normalize_league(&self, raw: &Value) -> Result<League, NormalizeError> {
        Ok(League {
            id: required_id(raw, "/league/id")?,
            name: required_str(raw, "/league/name")?,
            country: string_or_empty(raw, "/country/name"),
            logo: optional_str(raw, "/league/logo"),
            kind: string_or_empty(raw, "/league/type"),
            provider: self.id(),
        })
    }
}
