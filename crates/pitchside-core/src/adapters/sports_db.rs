use serde_json::Value;
use time::Date;

use crate::data_source::{
    iso_date, list_field, ApiRequest, CapabilitySet, ProviderAdapter, ProviderError,
};
use crate::domain::{League, LeagueRef, Match, Score, TeamRef};
use crate::error::NormalizeError;
use crate::normalize::{
    numeric_string_or_zero, optional_id, optional_str, required_id, required_str,
    string_or_empty,
};
use crate::ProviderId;

/// TheSportsDB v1 free JSON API.
///
/// No live or statistics endpoints. Scores arrive as numeric strings and
/// an empty day is reported as `"events": null`.
#[derive(Debug, Clone, Copy, Default)]
pub struct SportsDbAdapter;

impl ProviderAdapter for SportsDbAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::SportsDb
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::new(false, true, true, false)
    }

    fn matches_by_date_request(
        &self,
        date: Date,
        _league_id: Option<u32>,
    ) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("eventsday.php")
            .param("d", iso_date(date))
            .param("s", "Soccer"))
    }

    fn leagues_request(&self, _country: Option<&str>) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("all_leagues.php"))
    }

    fn extract_match_list<'v>(&self, body: &'v Value) -> Vec<&'v Value> {
        list_field(body, "events")
    }

    fn extract_league_list<'v>(&self, body: &'v Value, country: Option<&str>) -> Vec<&'v Value> {
        let leagues = list_field(body, "leagues");
        match country {
            Some(country) => leagues
                .into_iter()
                .filter(|raw| {
                    raw.get("strCountry")
                        .and_then(Value::as_str)
                        .is_some_and(|value| value.eq_ignore_ascii_case(country))
                })
                .collect(),
            None => leagues,
        }
    }

    fn normalize_match(&self, raw: &Value) -> Result<Match, NormalizeError> {
        Ok(Match {
            id: required_id(raw, "/idEvent")?,
            date: string_or_empty(raw, "/dateEvent"),
            status: string_or_empty(raw, "/strStatus"),
            minute: None,
            league: LeagueRef {
                id: optional_id(raw, "/idLeague"),
                name: string_or_empty(raw, "/strLeague"),
                country: string_or_empty(raw, "/strCountry"),
                logo: optional_str(raw, "/strLeagueBadge"),
            },
            home_team: TeamRef {
                id: optional_id(raw, "/idHomeTeam"),
                name: string_or_empty(raw, "/strHomeTeam"),
                logo: optional_str(raw, "/strHomeTeamBadge"),
            },
            away_team: TeamRef {
                id: optional_id(raw, "/idAwayTeam"),
                name: string_or_empty(raw, "/strAwayTeam"),
                logo: optional_str(raw, "/strAwayTeamBadge"),
            },
            score: Score::new(
                numeric_string_or_zero(raw, "/intHomeScore")?,
                numeric_string_or_zero(raw, "/intAwayScore")?,
            ),
            provider: self.id(),
        })
    }

    fn normalize_league(&self, raw: &Value) -> Result<League, NormalizeError> {
        Ok(League {
            id: required_id(raw, "/idLeague")?,
            name: required_str(raw, "/strLeague")?,
            country: string_or_empty(raw, "/strCountry"),
            logo: optional_str(raw, "/strBadge"),
            kind: string_or_empty(raw, "/strSport"),
            provider: self.id(),
        })
    }
}
