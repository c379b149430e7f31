use serde_json::Value;
use time::Date;

use crate::data_source::{
    iso_date, list_field, ApiRequest, CapabilitySet, ProviderAdapter, ProviderError,
};
use crate::domain::{League, LeagueRef, Match, Score, TeamRef};
use crate::error::NormalizeError;
use crate::normalize::{optional_str, optional_u32, required_id, required_str, string_or_empty};
use crate::ProviderId;

/// football-data.org v4.
///
/// The competitions endpoint has no country parameter, so leagues are
/// narrowed by `area.name` after the fact. Date queries cover a single day
/// and cannot be restricted to a league.
#[derive(Debug, Clone, Copy, Default)]
pub struct FootballDataAdapter;

impl ProviderAdapter for FootballDataAdapter {
    fn id(&self) -> ProviderId {
        ProviderId::FootballData
    }

    fn capabilities(&self) -> CapabilitySet {
        CapabilitySet::full()
    }

    fn live_matches_request(&self) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("matches").param("status", "LIVE"))
    }

    fn matches_by_date_request(
        &self,
        date: Date,
        _league_id: Option<u32>,
    ) -> Result<ApiRequest, ProviderError> {
        let day = iso_date(date);
        Ok(ApiRequest::new("matches")
            .param("dateFrom", day.clone())
            .param("dateTo", day))
    }

    fn leagues_request(&self, _country: Option<&str>) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new("competitions"))
    }

    fn statistics_request(&self, match_id: u64) -> Result<ApiRequest, ProviderError> {
        Ok(ApiRequest::new(format!("matches/{match_id}")))
    }

    fn extract_match_list<'v>(&self, body: &'v Value) -> Vec<&'v Value> {
        list_field(body, "matches")
    }

    fn extract_league_list<'v>(&self, body: &'v Value, country: Option<&str>) -> Vec<&'v Value> {
        let competitions = list_field(body, "competitions");
        let Some(country) = country else {
            return competitions;
        };

        competitions
            .into_iter()
            .filter(|raw| {
                raw.pointer("/area/name")
                    .and_then(Value::as_str)
                    .is_some_and(|area| area.eq_ignore_ascii_case(country))
            })
            .collect()
    }

    fn normalize_match(&self, raw: &Value) -> Result<Match, NormalizeError> {
        Ok(Match {
            id: required_id(raw, "/id")?,
            date: required_str(raw, "/utcDate")?,
            status: required_str(raw, "/status")?,
            minute: optional_u32(raw, "/minute")?,
            league: LeagueRef {
                id: Some(required_id(raw, "/competition/id")?),
                name: required_str(raw, "/competition/name")?,
                country: string_or_empty(raw, "/area/name"),
                logo: optional_str(raw, "/competition/emblem"),
            },
            home_team: TeamRef {
                id: Some(required_id(raw, "/homeTeam/id")?),
                name: required_str(raw, "/homeTeam/name")?,
                logo: optional_str(raw, "/homeTeam/crest"),
            },
            away_team: TeamRef {
                id: Some(required_id(raw, "/awayTeam/id")?),
                name: required_str(raw, "/awayTeam/name")?,
                logo: optional_str(raw, "/awayTeam/crest"),
            },
            score: Score {
                home: optional_u32(raw, "/score/fullTime/home")?,
                away: optional_u32(raw, "/score/fullTime/away")?,
            },
            provider: self.id(),
        })
    }

    fn normalize_league(&self, raw: &Value) -> Result<League, NormalizeError> {
        Ok(League {
            id: required_id(raw, "/id")?,
            name: required_str(raw, "/name")?,
            country: string_or_empty(raw, "/area/name"),
            logo: optional_str(raw, "/emblem"),
            kind: string_or_empty(raw, "/type"),
            provider: self.id(),
        })
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;
    use time::macros::date;

    use super::*;
    use crate::domain::RecordId;

    #[test]
    fn date_request_spans_one_day() {
        let request = FootballDataAdapter
            .matches_by_date_request(date!(2024 - 05 - 19), Some(2021))
            .expect("supported");

        assert_eq!(request.endpoint, "matches");
        assert_eq!(request.params.get("dateFrom").map(String::as_str), Some("2024-05-19"));
        assert_eq!(request.params.get("dateTo").map(String::as_str), Some("2024-05-19"));
        assert!(!request.params.contains_key("league"));
    }

    #[test]
    fn statistics_request_targets_the_match_document() {
        let request = FootballDataAdapter.statistics_request(436_218).expect("supported");

        assert_eq!(request.endpoint, "matches/436218");
        assert!(request.params.is_empty());
    }

    #[test]
    fn leagues_are_filtered_by_area_when_country_given() {
        let body = json!({
            "competitions": [
                { "id": 2021, "name": "Premier League", "area": { "name": "England" } },
                { "id": 2014, "name": "Primera Division", "area": { "name": "Spain" } }
            ]
        });

        let english = FootballDataAdapter.extract_league_list(&body, Some("england"));
        let all = FootballDataAdapter.extract_league_list(&body, None);

        assert_eq!(english.len(), 1);
        assert_eq!(english[0]["id"], json!(2021));
        assert_eq!(all.len(), 2);
    }

    #[test]
    fn scheduled_match_has_no_score() {
        let raw = json!({
            "id": 436218,
            "utcDate": "2024-05-19T15:00:00Z",
            "status": "TIMED",
            "competition": { "id": 2021, "name": "Premier League", "emblem": "pl.png" },
            "area": { "name": "England" },
            "homeTeam": { "id": 57, "name": "Arsenal FC", "crest": "57.png" },
            "awayTeam": { "id": 76, "name": "Wolverhampton", "crest": "76.png" },
            "score": { "fullTime": { "home": null, "away": null } }
        });

        let item = FootballDataAdapter.normalize_match(&raw).expect("valid");

        assert_eq!(item.id, RecordId::Number(436_218));
        assert_eq!(item.league.country, "England");
        assert_eq!(item.home_team.logo.as_deref(), Some("57.png"));
        assert_eq!(item.score, Score::default());
        assert_eq!(item.minute, None);
    }

    #[test]
    fn match_without_competition_id_is_rejected() {
        let raw = json!({
            "id": 436218,
            "utcDate": "2024-05-19T15:00:00Z",
            "status": "TIMED",
            "competition": { "name": "Premier League" },
            "homeTeam": { "id": 57, "name": "Arsenal FC" },
            "awayTeam": { "id": 76, "name": "Wolverhampton" }
        });

        assert_eq!(
            FootballDataAdapter.normalize_match(&raw),
            Err(NormalizeError::MissingField {
                field: "competition/id"
            })
        );
    }
}
