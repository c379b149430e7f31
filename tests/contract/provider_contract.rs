//! Contract tests every provider adapter must satisfy.

use std::sync::Arc;

use pitchside_core::{
    normalize_leagues, normalize_matches, AdapterRegistry, ApiFootballAdapter, FootballDataAdapter,
    Operation, ProviderAdapter, ProviderError, ProviderId, RecordId, Score, SportsDbAdapter,
};
use serde_json::{json, Value};
use time::macros::date;

struct AdapterCase {
    id: ProviderId,
    adapter: Arc<dyn ProviderAdapter>,
    match_list: Value,
    league_list: Value,
}

fn adapter_cases() -> Vec<AdapterCase> {
    vec![
        AdapterCase {
            id: ProviderId::ApiFootball,
            adapter: Arc::new(ApiFootballAdapter),
            match_list: json!({ "response": [api_football_fixture()] }),
            league_list: json!({
                "response": [{
                    "league": { "id": 39, "name": "Premier League", "type": "League", "logo": "pl.png" },
                    "country": { "name": "England" }
                }]
            }),
        },
        AdapterCase {
            id: ProviderId::FootballData,
            adapter: Arc::new(FootballDataAdapter),
            match_list: json!({
                "matches": [{
                    "id": 436218,
                    "utcDate": "2024-05-19T15:00:00Z",
                    "status": "IN_PLAY",
                    "minute": 55,
                    "competition": { "id": 2021, "name": "Premier League" },
                    "area": { "name": "England" },
                    "homeTeam": { "id": 57, "name": "Arsenal FC" },
                    "awayTeam": { "id": 62, "name": "Everton FC" },
                    "score": { "fullTime": { "home": 1, "away": 0 } }
                }]
            }),
            league_list: json!({
                "competitions": [{
                    "id": 2021, "name": "Premier League", "type": "LEAGUE",
                    "emblem": "pl.png", "area": { "name": "England" }
                }]
            }),
        },
        AdapterCase {
            id: ProviderId::SportsDb,
            adapter: Arc::new(SportsDbAdapter),
            match_list: json!({
                "events": [{
                    "idEvent": "2052711",
                    "dateEvent": "2024-05-19",
                    "strStatus": "Match Finished",
                    "idLeague": "4328",
                    "strLeague": "English Premier League",
                    "strHomeTeam": "Arsenal",
                    "strAwayTeam": "Everton",
                    "intHomeScore": "2",
                    "intAwayScore": "1"
                }]
            }),
            league_list: json!({
                "leagues": [{
                    "idLeague": "4328", "strLeague": "English Premier League",
                    "strSport": "Soccer", "strCountry": "England"
                }]
            }),
        },
    ]
}

fn api_football_fixture() -> Value {
    json!({
        "fixture": {
            "id": 1,
            "date": "2024-01-01T15:00:00Z",
            "status": { "short": "LIVE", "elapsed": 67 }
        },
        "league": { "id": 39, "name": "Premier League", "country": "England", "logo": "x" },
        "teams": {
            "home": { "id": 1, "name": "Arsenal", "logo": "a" },
            "away": { "id": 2, "name": "Chelsea", "logo": "c" }
        },
        "goals": { "home": 2, "away": 1 }
    })
}

#[test]
fn api_football_fixture_normalizes_to_canonical_match() {
    // Given: A live API-Football fixture
    let raw = api_football_fixture();

    // When: It is normalized
    let item = ApiFootballAdapter.normalize_match(&raw).expect("valid fixture");

    // Then: Every canonical field is populated from its provider path
    assert_eq!(
        serde_json::to_value(&item).expect("serializes"),
        json!({
            "id": 1,
            "date": "2024-01-01T15:00:00Z",
            "status": "LIVE",
            "minute": 67,
            "league": { "id": 39, "name": "Premier League", "country": "England", "logo": "x" },
            "home_team": { "id": 1, "name": "Arsenal", "logo": "a" },
            "away_team": { "id": 2, "name": "Chelsea", "logo": "c" },
            "score": { "home": 2, "away": 1 },
            "provider": "api-football"
        })
    );
}

#[test]
fn every_adapter_normalizes_its_match_list() {
    for case in adapter_cases() {
        let records = case.adapter.extract_match_list(&case.match_list);
        let matches = normalize_matches(case.adapter.as_ref(), &records);

        assert_eq!(matches.len(), 1, "{} should yield one match", case.id);
        assert_eq!(matches[0].provider, case.id);
        assert!(!matches[0].home_team.name.is_empty(), "{} home team", case.id);
        assert!(!matches[0].date.is_empty(), "{} date", case.id);
    }
}

#[test]
fn every_adapter_normalizes_its_league_list() {
    for case in adapter_cases() {
        let records = case.adapter.extract_league_list(&case.league_list, None);
        let leagues = normalize_leagues(case.adapter.as_ref(), &records);

        assert_eq!(leagues.len(), 1, "{} should yield one league", case.id);
        assert_eq!(leagues[0].provider, case.id);
        assert_eq!(leagues[0].country, "England", "{} country", case.id);
    }
}

#[test]
fn normalizing_the_same_record_twice_is_idempotent() {
    for case in adapter_cases() {
        let records = case.adapter.extract_match_list(&case.match_list);

        let first = case.adapter.normalize_match(records[0]).expect("valid");
        let second = case.adapter.normalize_match(records[0]).expect("valid");

        assert_eq!(first, second, "{} normalization must be pure", case.id);
    }
}

#[test]
fn malformed_record_is_dropped_without_discarding_the_batch() {
    // Given: A response with one valid and one fixture missing its id
    let mut broken = api_football_fixture();
    broken["fixture"]
        .as_object_mut()
        .expect("object")
        .remove("id");
    let body = json!({ "response": [broken, api_football_fixture()] });

    // When: The list is normalized
    let records = ApiFootballAdapter.extract_match_list(&body);
    let matches = normalize_matches(&ApiFootballAdapter, &records);

    // Then: Only the valid record survives
    assert_eq!(matches.len(), 1);
    assert_eq!(matches[0].id, RecordId::Number(1));
}

#[test]
fn records_with_missing_or_malformed_team_ids_are_dropped() {
    // Given: Fixtures lacking a league id, a home team id, or carrying an object as away team id
    let mut no_league_id = api_football_fixture();
    no_league_id["league"].as_object_mut().expect("object").remove("id");
    let mut no_home_id = api_football_fixture();
    no_home_id["teams"]["home"].as_object_mut().expect("object").remove("id");
    let mut object_away_id = api_football_fixture();
    object_away_id["teams"]["away"]["id"] = json!({ "bad": true });
    let api_football = json!({
        "response": [no_league_id, no_home_id, object_away_id, api_football_fixture()]
    });
    let football_data = json!({
        "matches": [
            {
                "id": 1, "utcDate": "2024-05-19T15:00:00Z", "status": "TIMED",
                "competition": { "id": 2021, "name": "Premier League" },
                "homeTeam": { "name": "Arsenal FC" },
                "awayTeam": { "id": 62, "name": "Everton FC" }
            },
            {
                "id": 2, "utcDate": "2024-05-19T15:00:00Z", "status": "TIMED",
                "competition": { "id": 2021, "name": "Premier League" },
                "homeTeam": { "id": 57, "name": "Arsenal FC" },
                "awayTeam": { "id": [62], "name": "Everton FC" }
            }
        ]
    });

    // When: Both batches are normalized
    let api_records = ApiFootballAdapter.extract_match_list(&api_football);
    let api_matches = normalize_matches(&ApiFootballAdapter, &api_records);
    let fd_records = FootballDataAdapter.extract_match_list(&football_data);
    let fd_matches = normalize_matches(&FootballDataAdapter, &fd_records);

    // Then: Only the complete fixture survives
    assert_eq!(api_matches.len(), 1);
    assert_eq!(api_matches[0].home_team.id, Some(RecordId::Number(1)));
    assert!(fd_matches.is_empty());
}

#[test]
fn missing_or_null_list_fields_yield_empty_results() {
    for case in adapter_cases() {
        assert!(case.adapter.extract_match_list(&json!({})).is_empty());
        assert!(case
            .adapter
            .extract_league_list(&json!({ "leagues": null, "response": null }), None)
            .is_empty());
    }
}

#[test]
fn sports_db_scores_default_to_zero_when_empty() {
    let raw = json!({ "idEvent": "1", "intHomeScore": "", "intAwayScore": null });

    let item = SportsDbAdapter.normalize_match(&raw).expect("valid");

    assert_eq!(item.score, Score::new(0, 0));
}

#[test]
fn capabilities_agree_with_request_builders() {
    let registry = AdapterRegistry::default();

    for id in ProviderId::ALL {
        let adapter = registry.get(id).expect("registered");
        let caps = adapter.capabilities();
        let outcomes = [
            (Operation::LiveMatches, adapter.live_matches_request()),
            (
                Operation::MatchesByDate,
                adapter.matches_by_date_request(date!(2024 - 05 - 19), None),
            ),
            (Operation::Leagues, adapter.leagues_request(Some("England"))),
            (Operation::Statistics, adapter.statistics_request(1)),
        ];

        for (operation, outcome) in outcomes {
            match outcome {
                Ok(_) => assert!(caps.supports(operation), "{id} builds {operation}"),
                Err(error) => {
                    assert!(!caps.supports(operation), "{id} rejects {operation}");
                    assert_eq!(error, ProviderError::unsupported(id, operation));
                }
            }
        }
    }
}
