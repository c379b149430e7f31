mod leagues;
mod live;
mod matches;
mod providers;
mod stats;

use std::sync::Arc;

use pitchside_core::{
    FootballDataService, League, Match, MatchFilter, ProviderId, ProviderRegistry, RouteSuccess,
};
use serde::Serialize;
use serde_json::Value;

use crate::cli::{Cli, Command};
use crate::error::CliError;

/// How the answering provider was reached.
#[derive(Debug, Clone, Serialize)]
pub struct RouteReport {
    pub provider: ProviderId,
    pub source_chain: Vec<ProviderId>,
    pub skipped: Vec<ProviderId>,
    pub errors: Vec<String>,
    pub latency_ms: u64,
}

impl RouteReport {
    pub fn from_route<T>(route: &RouteSuccess<T>) -> Self {
        Self {
            provider: route.selected_source,
            source_chain: route.source_chain.clone(),
            skipped: route.skipped.clone(),
            errors: route.errors.iter().map(ToString::to_string).collect(),
            latency_ms: route.latency_ms,
        }
    }
}

/// Rows for `--format table`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TableView {
    pub headers: Vec<&'static str>,
    pub rows: Vec<Vec<String>>,
}

pub struct CommandOutput {
    pub data: Value,
    pub route: Option<RouteReport>,
    pub table: Option<TableView>,
}

impl CommandOutput {
    pub fn new(data: Value) -> Self {
        Self {
            data,
            route: None,
            table: None,
        }
    }

    pub fn with_route(mut self, route: RouteReport) -> Self {
        self.route = Some(route);
        self
    }

    pub fn with_table(mut self, table: TableView) -> Self {
        self.table = Some(table);
        self
    }

    pub fn matches(matches: &[Match]) -> Result<Self, CliError> {
        let table = TableView {
            headers: vec!["date", "status", "min", "home", "score", "away", "league"],
            rows: matches.iter().map(match_row).collect(),
        };
        Ok(Self::new(serde_json::to_value(matches)?).with_table(table))
    }

    pub fn leagues(leagues: &[League]) -> Result<Self, CliError> {
        let table = TableView {
            headers: vec!["id", "name", "country", "type"],
            rows: leagues
                .iter()
                .map(|league| {
                    vec![
                        league.id.to_string(),
                        league.name.clone(),
                        league.country.clone(),
                        league.kind.clone(),
                    ]
                })
                .collect(),
        };
        Ok(Self::new(serde_json::to_value(leagues)?).with_table(table))
    }
}

pub async fn run(cli: &Cli) -> Result<CommandOutput, CliError> {
    let registry = Arc::new(ProviderRegistry::from_env()?);

    match &cli.command {
        Command::Providers => providers::run(&registry),
        Command::Live(args) => live::run(args, &service(registry, cli)?).await,
        Command::Matches(args) => matches::run(args, &service(registry, cli)?).await,
        Command::Leagues(args) => leagues::run(args, &service(registry, cli)?).await,
        Command::Stats(args) => stats::run(args, &service(registry, cli)?).await,
    }
}

fn service(registry: Arc<ProviderRegistry>, cli: &Cli) -> Result<FootballDataService, CliError> {
    Ok(FootballDataService::new(registry, cli.provider.as_deref())?)
}

fn parse_filters(raw: &[String]) -> Result<Vec<MatchFilter>, CliError> {
    raw.iter()
        .map(|value| value.parse::<MatchFilter>().map_err(CliError::from))
        .collect()
}

fn match_row(item: &Match) -> Vec<String> {
    let goals = |value: Option<u32>| value.map_or_else(|| String::from("-"), |goals| goals.to_string());
    vec![
        item.date.clone(),
        item.status.clone(),
        item.minute.map(|minute| minute.to_string()).unwrap_or_default(),
        item.home_team.name.clone(),
        format!("{}-{}", goals(item.score.home), goals(item.score.away)),
        item.away_team.name.clone(),
        item.league.name.clone(),
    ]
}
