//! # Pitchside Core
//!
//! Multi-provider football data client with one normalized data model.
//!
//! ## Overview
//!
//! - **Canonical domain models** for matches, leagues and statistics
//! - **Provider adapters** that know each upstream API's endpoints and payload shapes
//! - **Transport client** with sliding-window rate limiting, retry with backoff and response caching
//! - **Fallback orchestration** across providers, first success wins
//! - **Explicit configuration** through a shared [`ProviderRegistry`]
//!
//! ## Modules
//!
//! | Module | Description |
//! |--------|-------------|
//! | [`adapters`] | Provider adapters (API-Football, football-data.org, TheSportsDB) |
//! | [`cache`] | Time-bounded response cache |
//! | [`clock`] | Injectable time source |
//! | [`config`] | Settings, provider descriptors and the registry |
//! | [`data_source`] | Adapter trait, operations and capabilities |
//! | [`domain`] | Domain models (Match, League, MatchStatistics) |
//! | [`error`] | Core error types |
//! | [`http_client`] | HTTP client abstraction |
//! | [`normalize`] | Record normalization helpers |
//! | [`retry`] | Retry policy and backoff |
//! | [`routing`] | Fallback orchestration |
//! | [`service`] | Football data service façade |
//! | [`session`] | Per-attempt provider sessions |
//! | [`source`] | Provider identifiers |
//! | [`throttling`] | Rate limiting |
//! | [`transport`] | Provider-bound transport client |
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use std::sync::Arc;
//! use pitchside_core::{FootballDataService, ProviderRegistry};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let registry = Arc::new(ProviderRegistry::from_env()?);
//!     let service = FootballDataService::new(registry, None)?;
//!
//!     for item in service.live_matches().await? {
//!         println!("{} vs {}", item.home_team.name, item.away_team.name);
//!     }
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! ┌──────────────────────┐
//! │ FootballDataService  │
//! └──────────┬───────────┘
//!            │
//!            ▼
//! ┌──────────────────────┐     ┌──────────────────┐
//! │ FallbackOrchestrator │────▶│ ProviderRegistry │
//! └──────────┬───────────┘     └──────────────────┘
//!            │ one session per candidate
//!            ▼
//! ┌──────────────────────┐     ┌──────────────────┐
//! │ ProviderAdapter      │     │ TransportClient  │
//! │ (request + normalize)│     │ rate limit/retry │
//! └──────────────────────┘     │ cache            │
//!                              └────────┬─────────┘
//!                                       ▼
//!                              ┌──────────────────┐
//!                              │ HttpClient       │
//!                              │ (reqwest)        │
//!                              └──────────────────┘
//! ```
//!
//! ## Error Handling
//!
//! A failed attempt against one provider never reaches the caller on its
//! own; the orchestrator moves on to the next candidate and only reports
//! [`AllProvidersFailed`] once the list is exhausted. Configuration
//! mistakes surface immediately as [`ConfigError`].
//!
//! ```rust
//! use pitchside_core::ServiceError;
//!
//! fn describe(error: &ServiceError) -> &'static str {
//!     match error {
//!         ServiceError::Configuration(_) => "fix configuration",
//!         ServiceError::AllProvidersFailed(_) => "try again later",
//!         ServiceError::Transport(_) => "raw call failed",
//!     }
//! }
//! ```

pub mod adapters;
pub mod cache;
pub mod clock;
pub mod config;
pub mod data_source;
pub mod domain;
pub mod error;
pub mod http_client;
pub mod normalize;
pub mod retry;
pub mod routing;
pub mod service;
pub mod session;
pub mod source;
pub mod throttling;
pub mod transport;

// Adapter implementations
pub use adapters::{AdapterRegistry, ApiFootballAdapter, FootballDataAdapter, SportsDbAdapter};

// Caching
pub use cache::{cache_key, ResponseCache};

// Time
pub use clock::{Clock, SystemClock};

// Configuration
pub use config::{ProviderDescriptor, ProviderRegistry, ProviderRegistryBuilder, Settings};

// Adapter trait and types
pub use data_source::{
    iso_date, parse_date, ApiRequest, CapabilitySet, InvokeFuture, Operation, ProviderAdapter,
    ProviderError,
};

// Domain models
pub use domain::{League, LeagueRef, Match, MatchFilter, MatchStatistics, RecordId, Score, TeamRef};

// Error types
pub use error::{ConfigError, NormalizeError, ServiceError, ValidationError};

// HTTP client types
pub use http_client::{
    HttpAuth, HttpClient, HttpError, HttpErrorKind, HttpMethod, HttpRequest, HttpResponse,
    ReqwestHttpClient,
};

// Normalization
pub use normalize::{normalize_leagues, normalize_matches};

// Retry logic
pub use retry::{Backoff, RetryPolicy};

// Routing types
pub use routing::{AllProvidersFailed, FallbackOrchestrator, ProviderFailure, RouteResult, RouteSuccess};

// Service façade
pub use service::FootballDataService;

// Sessions
pub use session::{ClientFactory, MatchQuery, ProviderSession};

// Source identifiers
pub use source::ProviderId;

// Throttling
pub use throttling::RateLimiter;

// Transport
pub use transport::{TransportClient, TransportError, TransportErrorKind};
