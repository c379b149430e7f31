//! One provider attempt: an adapter paired with a freshly built client.

use std::sync::Arc;

use time::Date;

use crate::clock::{Clock, SystemClock};
use crate::config::{ProviderDescriptor, Settings};
use crate::data_source::{InvokeFuture, ProviderAdapter};
use crate::domain::{League, Match, MatchStatistics};
use crate::http_client::{HttpClient, ReqwestHttpClient};
use crate::normalize::{normalize_leagues, normalize_matches};
use crate::transport::TransportClient;
use crate::ProviderId;

/// Builds provider-bound transport clients from shared collaborators.
#[derive(Clone)]
pub struct ClientFactory {
    http: Arc<dyn HttpClient>,
    clock: Arc<dyn Clock>,
}

impl Default for ClientFactory {
    fn default() -> Self {
        Self::new(Arc::new(ReqwestHttpClient::default()), Arc::new(SystemClock))
    }
}

impl ClientFactory {
    pub fn new(http: Arc<dyn HttpClient>, clock: Arc<dyn Clock>) -> Self {
        Self { http, clock }
    }

    pub fn build(&self, descriptor: &ProviderDescriptor, settings: &Settings) -> TransportClient {
        TransportClient::new(
            descriptor.clone(),
            settings,
            Arc::clone(&self.http),
            Arc::clone(&self.clock),
        )
    }
}

/// Which matches to fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchQuery {
    Live,
    ByDate { date: Date, league_id: Option<u32> },
}

pub struct ProviderSession {
    adapter: Arc<dyn ProviderAdapter>,
    client: TransportClient,
}

impl ProviderSession {
    pub fn new(adapter: Arc<dyn ProviderAdapter>, client: TransportClient) -> Self {
        Self { adapter, client }
    }

    pub fn provider(&self) -> ProviderId {
        self.adapter.id()
    }

    pub fn adapter(&self) -> &dyn ProviderAdapter {
        self.adapter.as_ref()
    }

    pub fn client_mut(&mut self) -> &mut TransportClient {
        &mut self.client
    }

    pub fn fetch_matches(&mut self, query: MatchQuery) -> InvokeFuture<'_, Vec<Match>> {
        Box::pin(async move {
            let request = match query {
                MatchQuery::Live => self.adapter.live_matches_request()?,
                MatchQuery::ByDate { date, league_id } => {
                    self.adapter.matches_by_date_request(date, league_id)?
                }
            };
            let body = self
                .client
                .get(&request.endpoint, &request.params, true)
                .await?;
            let records = self.adapter.extract_match_list(&body);
            Ok(normalize_matches(self.adapter.as_ref(), &records))
        })
    }

    pub fn fetch_leagues(&mut self, country: Option<String>) -> InvokeFuture<'_, Vec<League>> {
        Box::pin(async move {
            let request = self.adapter.leagues_request(country.as_deref())?;
            let body = self
                .client
                .get(&request.endpoint, &request.params, true)
                .await?;
            let records = self.adapter.extract_league_list(&body, country.as_deref());
            Ok(normalize_leagues(self.adapter.as_ref(), &records))
        })
    }

    pub fn fetch_statistics(&mut self, match_id: u64) -> InvokeFuture<'_, MatchStatistics> {
        Box::pin(async move {
            let request = self.adapter.statistics_request(match_id)?;
            let body = self
                .client
                .get(&request.endpoint, &request.params, true)
                .await?;
            Ok(MatchStatistics {
                match_id,
                provider: self.adapter.id(),
                data: self.adapter.extract_statistics(body),
            })
        })
    }
}
