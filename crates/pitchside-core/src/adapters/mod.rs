mod api_football;
mod football_data;
mod sports_db;

use std::collections::HashMap;
use std::sync::Arc;

pub use api_football::ApiFootballAdapter;
pub use football_data::FootballDataAdapter;
pub use sports_db::SportsDbAdapter;

use crate::data_source::ProviderAdapter;
use crate::ProviderId;

/// Adapter lookup by provider, shared by the orchestrator.
#[derive(Clone)]
pub struct AdapterRegistry {
    adapters: HashMap<ProviderId, Arc<dyn ProviderAdapter>>,
}

impl Default for AdapterRegistry {
    fn default() -> Self {
        Self::new(vec![
            Arc::new(ApiFootballAdapter),
            Arc::new(FootballDataAdapter),
            Arc::new(SportsDbAdapter),
        ])
    }
}

impl AdapterRegistry {
    pub fn new(adapters: Vec<Arc<dyn ProviderAdapter>>) -> Self {
        let adapters = adapters
            .into_iter()
            .map(|adapter| (adapter.id(), adapter))
            .collect();
        Self { adapters }
    }

    pub fn get(&self, id: ProviderId) -> Option<Arc<dyn ProviderAdapter>> {
        self.adapters.get(&id).cloned()
    }

    pub fn contains(&self, id: ProviderId) -> bool {
        self.adapters.contains_key(&id)
    }
}
