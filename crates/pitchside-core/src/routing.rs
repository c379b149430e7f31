use std::collections::HashSet;
use std::fmt::{Display, Formatter};
use std::sync::Arc;
use std::time::Instant;

use tracing::{debug, info, warn};

use crate::adapters::AdapterRegistry;
use crate::config::ProviderRegistry;
use crate::data_source::{InvokeFuture, Operation, ProviderError};
use crate::session::{ClientFactory, ProviderSession};
use crate::ProviderId;

/// A failed attempt against one provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderFailure {
    pub provider: ProviderId,
    pub error: ProviderError,
}

impl Display for ProviderFailure {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.provider, self.error)
    }
}

/// Successful routed call.
#[derive(Debug, Clone)]
pub struct RouteSuccess<T> {
    pub data: T,
    pub selected_source: ProviderId,
    /// Providers attempted, in order, ending with the selected one.
    pub source_chain: Vec<ProviderId>,
    /// Candidates passed over because they are not configured.
    pub skipped: Vec<ProviderId>,
    pub errors: Vec<ProviderFailure>,
    pub latency_ms: u64,
}

/// Every candidate was unconfigured or failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllProvidersFailed {
    pub operation: Operation,
    pub attempted: Vec<ProviderId>,
    pub skipped: Vec<ProviderId>,
    pub failures: Vec<ProviderFailure>,
}

impl AllProvidersFailed {
    /// Most recent transport failure, or the most recent failure of any
    /// kind when no provider was actually reached.
    pub fn last_error(&self) -> Option<&ProviderFailure> {
        self.failures
            .iter()
            .rev()
            .find(|failure| matches!(failure.error, ProviderError::Transport(_)))
            .or_else(|| self.failures.last())
    }
}

impl Display for AllProvidersFailed {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self.last_error() {
            Some(last) => write!(
                f,
                "all providers failed for {}; last error from {}",
                self.operation, last
            ),
            None => write!(f, "no providers available for {}", self.operation),
        }
    }
}

impl std::error::Error for AllProvidersFailed {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.last_error()
            .map(|failure| &failure.error as &(dyn std::error::Error + 'static))
    }
}

pub type RouteResult<T> = Result<RouteSuccess<T>, AllProvidersFailed>;

/// Tries an operation against an ordered list of providers, one at a time,
/// until one succeeds.
///
/// Each attempt gets a freshly built [`ProviderSession`]; nothing carries
/// over between candidates.
#[derive(Clone)]
pub struct FallbackOrchestrator {
    registry: Arc<ProviderRegistry>,
    adapters: AdapterRegistry,
    factory: ClientFactory,
}

impl FallbackOrchestrator {
    pub fn new(
        registry: Arc<ProviderRegistry>,
        adapters: AdapterRegistry,
        factory: ClientFactory,
    ) -> Self {
        Self {
            registry,
            adapters,
            factory,
        }
    }

    pub fn registry(&self) -> &ProviderRegistry {
        &self.registry
    }

    pub fn adapters(&self) -> &AdapterRegistry {
        &self.adapters
    }

    pub async fn execute<T, F>(
        &self,
        operation: Operation,
        candidates: &[ProviderId],
        mut invoke: F,
    ) -> RouteResult<T>
    where
        F: for<'s> FnMut(&'s mut ProviderSession) -> InvokeFuture<'s, T>,
    {
        let started = Instant::now();
        let mut seen = HashSet::with_capacity(candidates.len());
        let mut source_chain = Vec::with_capacity(candidates.len());
        let mut skipped = Vec::new();
        let mut errors = Vec::new();

        for &provider in candidates {
            if !seen.insert(provider) {
                continue;
            }

            let (Some(descriptor), Some(adapter)) = (
                self.registry.descriptor(provider),
                self.adapters.get(provider),
            ) else {
                debug!(
                    provider = provider.as_str(),
                    operation = operation.as_str(),
                    "provider not configured, skipping"
                );
                skipped.push(provider);
                continue;
            };

            source_chain.push(provider);

            if !adapter.capabilities().supports(operation) {
                debug!(
                    provider = provider.as_str(),
                    operation = operation.as_str(),
                    "operation not supported, trying next provider"
                );
                errors.push(ProviderFailure {
                    provider,
                    error: ProviderError::unsupported(provider, operation),
                });
                continue;
            }

            let client = self.factory.build(descriptor, self.registry.settings());
            let mut session = ProviderSession::new(adapter, client);

            match invoke(&mut session).await {
                Ok(data) => {
                    if !errors.is_empty() {
                        info!(
                            provider = provider.as_str(),
                            operation = operation.as_str(),
                            failed = errors.len(),
                            "fallback succeeded"
                        );
                    }

                    return Ok(RouteSuccess {
                        data,
                        selected_source: provider,
                        source_chain,
                        skipped,
                        errors,
                        latency_ms: elapsed_ms(started),
                    });
                }
                Err(error) => {
                    warn!(
                        provider = provider.as_str(),
                        operation = operation.as_str(),
                        %error,
                        "provider failed, trying next"
                    );
                    errors.push(ProviderFailure { provider, error });
                }
            }
        }

        Err(AllProvidersFailed {
            operation,
            attempted: source_chain,
            skipped,
            failures: errors,
        })
    }
}

fn elapsed_ms(started: Instant) -> u64 {
    u64::try_from(started.elapsed().as_millis()).unwrap_or(u64::MAX)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transport::{TransportError, TransportErrorKind};

    #[test]
    fn all_failed_reports_last_error() {
        let failure = AllProvidersFailed {
            operation: Operation::LiveMatches,
            attempted: vec![ProviderId::ApiFootball, ProviderId::FootballData],
            skipped: vec![],
            failures: vec![
                ProviderFailure {
                    provider: ProviderId::ApiFootball,
                    error: ProviderError::from(TransportError::new(
                        "https://a.test/fixtures",
                        TransportErrorKind::Timeout,
                        "timed out",
                    )),
                },
                ProviderFailure {
                    provider: ProviderId::FootballData,
                    error: ProviderError::from(TransportError::new(
                        "https://b.test/matches",
                        TransportErrorKind::Status(403),
                        "HTTP 403: forbidden",
                    )),
                },
            ],
        };

        let message = failure.to_string();

        assert!(message.starts_with("all providers failed for live_matches"));
        assert!(message.contains("football-data: https://b.test/matches"));
        assert_eq!(
            failure.last_error().map(|last| last.provider),
            Some(ProviderId::FootballData)
        );
    }

    #[test]
    fn trailing_unsupported_does_not_hide_transport_outage() {
        let failure = AllProvidersFailed {
            operation: Operation::LiveMatches,
            attempted: vec![ProviderId::FootballData, ProviderId::SportsDb],
            skipped: vec![],
            failures: vec![
                ProviderFailure {
                    provider: ProviderId::FootballData,
                    error: ProviderError::from(TransportError::new(
                        "https://b.test/matches",
                        TransportErrorKind::Status(503),
                        "HTTP 503: unavailable",
                    )),
                },
                ProviderFailure {
                    provider: ProviderId::SportsDb,
                    error: ProviderError::unsupported(ProviderId::SportsDb, Operation::LiveMatches),
                },
            ],
        };

        assert_eq!(
            failure.last_error().map(|last| last.provider),
            Some(ProviderId::FootballData)
        );
        assert!(failure.to_string().contains("football-data: https://b.test/matches"));
        assert!(!failure.to_string().contains("does not support"));
    }

    #[test]
    fn nothing_attempted_reads_as_no_providers() {
        let failure = AllProvidersFailed {
            operation: Operation::Leagues,
            attempted: vec![],
            skipped: vec![ProviderId::SportsDb],
            failures: vec![],
        };

        assert_eq!(failure.to_string(), "no providers available for leagues");
    }
}
