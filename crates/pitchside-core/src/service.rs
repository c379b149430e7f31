use std::collections::BTreeMap;
use std::sync::Arc;

use serde_json::Value;
use time::Date;
use tracing::info;

use crate::adapters::AdapterRegistry;
use crate::config::ProviderRegistry;
use crate::data_source::Operation;
use crate::domain::{League, Match, MatchStatistics};
use crate::error::ServiceError;
use crate::routing::{FallbackOrchestrator, RouteSuccess};
use crate::session::{ClientFactory, MatchQuery};
use crate::transport::TransportClient;
use crate::ProviderId;

const MATCH_CANDIDATES: [ProviderId; 3] = [
    ProviderId::ApiFootball,
    ProviderId::FootballData,
    ProviderId::SportsDb,
];
const LEAGUE_CANDIDATES: [ProviderId; 3] = MATCH_CANDIDATES;
const STATISTICS_CANDIDATES: [ProviderId; 2] = [ProviderId::ApiFootball, ProviderId::FootballData];

/// Unified entry point for football data across providers.
///
/// Each operation walks a fixed candidate list through the
/// [`FallbackOrchestrator`]. The primary client, resolved at construction,
/// serves raw calls and keeps its cache for the lifetime of the service.
pub struct FootballDataService {
    orchestrator: FallbackOrchestrator,
    primary: TransportClient,
}

impl FootballDataService {
    /// Production service using reqwest and the system clock.
    pub fn new(
        registry: Arc<ProviderRegistry>,
        provider_name: Option<&str>,
    ) -> Result<Self, ServiceError> {
        Self::with_factory(registry, provider_name, ClientFactory::default())
    }

    /// Resolves the primary provider (explicit name, else the configured
    /// default). An unknown or unconfigured name is a configuration error.
    pub fn with_factory(
        registry: Arc<ProviderRegistry>,
        provider_name: Option<&str>,
        factory: ClientFactory,
    ) -> Result<Self, ServiceError> {
        let descriptor = registry.get(provider_name)?;
        let primary = factory.build(descriptor, registry.settings());
        info!(provider = primary.provider().as_str(), "football data service ready");

        Ok(Self {
            orchestrator: FallbackOrchestrator::new(registry, AdapterRegistry::default(), factory),
            primary,
        })
    }

    pub fn provider_name(&self) -> &'static str {
        self.primary.provider().as_str()
    }

    pub fn registry(&self) -> &ProviderRegistry {
        self.orchestrator.registry()
    }

    pub fn primary_client_mut(&mut self) -> &mut TransportClient {
        &mut self.primary
    }

    pub async fn live_matches(&self) -> Result<Vec<Match>, ServiceError> {
        Ok(self.live_matches_routed().await?.data)
    }

    pub async fn live_matches_routed(&self) -> Result<RouteSuccess<Vec<Match>>, ServiceError> {
        let routed = self
            .orchestrator
            .execute(Operation::LiveMatches, &MATCH_CANDIDATES, |session| {
                session.fetch_matches(MatchQuery::Live)
            })
            .await?;
        log_route(Operation::LiveMatches, &routed, routed.data.len());
        Ok(routed)
    }

    pub async fn matches_by_date(
        &self,
        date: Date,
        league_id: Option<u32>,
    ) -> Result<Vec<Match>, ServiceError> {
        Ok(self.matches_by_date_routed(date, league_id).await?.data)
    }

    pub async fn matches_by_date_routed(
        &self,
        date: Date,
        league_id: Option<u32>,
    ) -> Result<RouteSuccess<Vec<Match>>, ServiceError> {
        let query = MatchQuery::ByDate { date, league_id };
        let routed = self
            .orchestrator
            .execute(Operation::MatchesByDate, &MATCH_CANDIDATES, |session| {
                session.fetch_matches(query)
            })
            .await?;
        log_route(Operation::MatchesByDate, &routed, routed.data.len());
        Ok(routed)
    }

    pub async fn leagues(&self, country: Option<&str>) -> Result<Vec<League>, ServiceError> {
        Ok(self.leagues_routed(country).await?.data)
    }

    pub async fn leagues_routed(
        &self,
        country: Option<&str>,
    ) -> Result<RouteSuccess<Vec<League>>, ServiceError> {
        let country = country.map(str::to_owned);
        let routed = self
            .orchestrator
            .execute(Operation::Leagues, &LEAGUE_CANDIDATES, |session| {
                session.fetch_leagues(country.clone())
            })
            .await?;
        log_route(Operation::Leagues, &routed, routed.data.len());
        Ok(routed)
    }

    pub async fn match_statistics(&self, match_id: u64) -> Result<MatchStatistics, ServiceError> {
        let routed = self
            .orchestrator
            .execute(Operation::Statistics, &STATISTICS_CANDIDATES, |session| {
                session.fetch_statistics(match_id)
            })
            .await?;
        log_route(Operation::Statistics, &routed, 1);
        Ok(routed.data)
    }

    /// Raw GET through the primary client, cached when caching is enabled.
    pub async fn get(
        &mut self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
    ) -> Result<Value, ServiceError> {
        Ok(self.primary.get(endpoint, params, true).await?)
    }

    /// Raw POST through the primary client.
    pub async fn post(&mut self, endpoint: &str, body: &Value) -> Result<Value, ServiceError> {
        Ok(self.primary.post(endpoint, body).await?)
    }

    pub fn clear_cache(&mut self) {
        self.primary.clear_cache();
    }
}

fn log_route<T>(operation: Operation, routed: &RouteSuccess<T>, records: usize) {
    info!(
        operation = operation.as_str(),
        provider = routed.selected_source.as_str(),
        records,
        failed = routed.errors.len(),
        latency_ms = routed.latency_ms,
        "operation completed"
    );
}
