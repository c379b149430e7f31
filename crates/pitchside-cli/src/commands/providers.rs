use pitchside_core::{AdapterRegistry, ProviderId, ProviderRegistry};
use serde::Serialize;

use crate::error::CliError;

use super::{CommandOutput, TableView};

#[derive(Debug, Serialize)]
struct ProviderRow {
    id: ProviderId,
    configured: bool,
    default: bool,
    base_url: Option<String>,
    auth: Option<&'static str>,
    operations: Vec<&'static str>,
}

pub fn run(registry: &ProviderRegistry) -> Result<CommandOutput, CliError> {
    let adapters = AdapterRegistry::default();
    let default_provider = registry.settings().default_provider.as_str();

    let rows = ProviderId::ALL
        .into_iter()
        .map(|id| {
            let descriptor = registry.descriptor(id);
            ProviderRow {
                id,
                configured: descriptor.is_some(),
                default: id.as_str() == default_provider,
                base_url: descriptor.map(|descriptor| descriptor.base_url.clone()),
                auth: descriptor.map(|descriptor| match descriptor.host {
                    Some(_) => "gateway",
                    None => "token",
                }),
                operations: adapters
                    .get(id)
                    .map(|adapter| adapter.capabilities().supported_operations())
                    .unwrap_or_default(),
            }
        })
        .collect::<Vec<_>>();

    let table = TableView {
        headers: vec!["provider", "configured", "default", "operations"],
        rows: rows
            .iter()
            .map(|row| {
                vec![
                    row.id.to_string(),
                    row.configured.to_string(),
                    row.default.to_string(),
                    row.operations.join(","),
                ]
            })
            .collect(),
    };

    Ok(CommandOutput::new(serde_json::to_value(&rows)?).with_table(table))
}
