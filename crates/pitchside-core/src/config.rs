//! Provider registry and global settings.
//!
//! A [`ProviderRegistry`] is built once at startup, either programmatically
//! through [`ProviderRegistryBuilder`] or from environment variables, and is
//! then shared (`Arc`) by the service and the fallback orchestrator.
//!
//! # Environment Variables
//!
//! | Variable | Default | Meaning |
//! |----------|---------|---------|
//! | `API_TIMEOUT` | `30` | Per-request timeout, seconds |
//! | `API_RETRY_ATTEMPTS` | `3` | Attempts per request |
//! | `CACHE_DURATION` | `300` | Cache entry lifetime, seconds |
//! | `RATE_LIMIT_REQUESTS` | `100` | Calls allowed per window |
//! | `RATE_LIMIT_PERIOD` | `3600` | Window length, seconds |
//! | `ENABLE_CACHE` | `true` | Cache GET responses |
//! | `LOG_API_CALLS` | `true` | Log every outbound call |
//! | `DEFAULT_API_PROVIDER` | `api-football` | Provider used when none is named |
//!
//! | Provider | Key | Other |
//! |----------|-----|-------|
//! | api-football | `API_FOOTBALL_KEY` | `API_FOOTBALL_HOST`, `API_FOOTBALL_BASE_URL` |
//! | football-data | `FOOTBALL_DATA_KEY` | `FOOTBALL_DATA_BASE_URL` |
//! | sports-db | `SPORTS_DB_KEY` | `SPORTS_DB_BASE_URL` |
//!
//! A provider is registered only when its key variable is set.

use std::collections::BTreeMap;
use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;
use crate::http_client::HttpAuth;
use crate::ProviderId;

const API_FOOTBALL_DIRECT_URL: &str = "https://v3.football.api-sports.io";
const FOOTBALL_DATA_URL: &str = "https://api.football-data.org/v4";
const SPORTS_DB_URL: &str = "https://www.thesportsdb.com/api/v1/json";

/// Immutable connection details for one configured provider.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProviderDescriptor {
    pub id: ProviderId,
    pub api_key: String,
    pub host: Option<String>,
    pub base_url: String,
    pub timeout: Duration,
    pub retry_attempts: u32,
}

impl ProviderDescriptor {
    pub fn new(id: ProviderId, api_key: impl Into<String>, base_url: impl Into<String>) -> Self {
        Self {
            id,
            api_key: api_key.into(),
            host: None,
            base_url: base_url.into(),
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
        }
    }

    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        self.host = Some(host.into());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retry_attempts(mut self, retry_attempts: u32) -> Self {
        self.retry_attempts = retry_attempts;
        self
    }

    pub fn name(&self) -> &'static str {
        self.id.as_str()
    }

    /// Header strategy: gateway style when a host is set, token otherwise.
    pub fn auth(&self) -> HttpAuth {
        match &self.host {
            Some(host) => HttpAuth::Gateway {
                key: self.api_key.clone(),
                host: host.clone(),
            },
            None => HttpAuth::Token(self.api_key.clone()),
        }
    }
}

/// Settings shared by every provider client.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub timeout: Duration,
    pub retry_attempts: u32,
    pub cache_duration: Duration,
    pub cache_enabled: bool,
    pub rate_limit_max_requests: u32,
    pub rate_limit_period: Duration,
    pub default_provider: String,
    pub log_api_calls: bool,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(30),
            retry_attempts: 3,
            cache_duration: Duration::from_secs(300),
            cache_enabled: true,
            rate_limit_max_requests: 100,
            rate_limit_period: Duration::from_secs(3600),
            default_provider: String::from(ProviderId::ApiFootball.as_str()),
            log_api_calls: true,
        }
    }
}

/// The set of configured providers plus global settings.
#[derive(Debug, Clone, Default)]
pub struct ProviderRegistry {
    settings: Settings,
    providers: BTreeMap<ProviderId, ProviderDescriptor>,
}

impl ProviderRegistry {
    pub fn builder() -> ProviderRegistryBuilder {
        ProviderRegistryBuilder::default()
    }

    /// Loads settings and providers from the process environment.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads settings and providers from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Settings::default();
        let settings = Settings {
            timeout: seconds(&lookup, "API_TIMEOUT", defaults.timeout)?,
            retry_attempts: number(&lookup, "API_RETRY_ATTEMPTS", defaults.retry_attempts)?,
            cache_duration: seconds(&lookup, "CACHE_DURATION", defaults.cache_duration)?,
            cache_enabled: flag(&lookup, "ENABLE_CACHE", defaults.cache_enabled),
            rate_limit_max_requests: number(
                &lookup,
                "RATE_LIMIT_REQUESTS",
                defaults.rate_limit_max_requests,
            )?,
            rate_limit_period: seconds(&lookup, "RATE_LIMIT_PERIOD", defaults.rate_limit_period)?,
            default_provider: lookup("DEFAULT_API_PROVIDER")
                .unwrap_or(defaults.default_provider),
            log_api_calls: flag(&lookup, "LOG_API_CALLS", defaults.log_api_calls),
        };

        let mut builder = Self::builder().with_settings(settings.clone());
        let configure = |descriptor: ProviderDescriptor| {
            descriptor
                .with_timeout(settings.timeout)
                .with_retry_attempts(settings.retry_attempts)
        };

        if let Some(key) = present(&lookup, "API_FOOTBALL_KEY") {
            let host = present(&lookup, "API_FOOTBALL_HOST");
            let base_url = present(&lookup, "API_FOOTBALL_BASE_URL").unwrap_or_else(|| {
                match &host {
                    Some(host) => format!("https://{host}/v3"),
                    None => String::from(API_FOOTBALL_DIRECT_URL),
                }
            });
            let mut descriptor = ProviderDescriptor::new(ProviderId::ApiFootball, key, base_url);
            if let Some(host) = host {
                descriptor = descriptor.with_host(host);
            }
            builder = builder.with_provider(configure(descriptor));
        }

        if let Some(key) = present(&lookup, "FOOTBALL_DATA_KEY") {
            let base_url = present(&lookup, "FOOTBALL_DATA_BASE_URL")
                .unwrap_or_else(|| String::from(FOOTBALL_DATA_URL));
            builder = builder.with_provider(configure(ProviderDescriptor::new(
                ProviderId::FootballData,
                key,
                base_url,
            )));
        }

        if let Some(key) = present(&lookup, "SPORTS_DB_KEY") {
            let base_url = present(&lookup, "SPORTS_DB_BASE_URL")
                .unwrap_or_else(|| format!("{SPORTS_DB_URL}/{key}"));
            builder = builder.with_provider(configure(ProviderDescriptor::new(
                ProviderId::SportsDb,
                key,
                base_url,
            )));
        }

        Ok(builder.build())
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    /// Resolves an explicit provider name, or the default provider when none
    /// is given.
    pub fn get(&self, name: Option<&str>) -> Result<&ProviderDescriptor, ConfigError> {
        let name = name.unwrap_or(&self.settings.default_provider);
        ProviderId::from_str(name)
            .ok()
            .and_then(|id| self.providers.get(&id))
            .ok_or_else(|| ConfigError::UnknownProvider {
                name: name.to_owned(),
                available: self.names().map(String::from).collect(),
            })
    }

    pub fn descriptor(&self, id: ProviderId) -> Option<&ProviderDescriptor> {
        self.providers.get(&id)
    }

    pub fn is_available(&self, id: ProviderId) -> bool {
        self.providers.contains_key(&id)
    }

    pub fn providers(&self) -> impl Iterator<Item = &ProviderDescriptor> {
        self.providers.values()
    }

    pub fn names(&self) -> impl Iterator<Item = &'static str> + '_ {
        self.providers.keys().map(|id| id.as_str())
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ProviderRegistryBuilder {
    settings: Settings,
    providers: BTreeMap<ProviderId, ProviderDescriptor>,
}

impl ProviderRegistryBuilder {
    pub fn with_settings(mut self, settings: Settings) -> Self {
        self.settings = settings;
        self
    }

    /// Registers a provider, replacing any earlier descriptor with the same id.
    pub fn with_provider(mut self, descriptor: ProviderDescriptor) -> Self {
        self.providers.insert(descriptor.id, descriptor);
        self
    }

    pub fn build(self) -> ProviderRegistry {
        ProviderRegistry {
            settings: self.settings,
            providers: self.providers,
        }
    }
}

fn present<F>(lookup: &F, key: &str) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key).filter(|value| !value.trim().is_empty())
}

fn number<F>(lookup: &F, key: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u32>()
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

fn seconds<F>(lookup: &F, key: &'static str, default: Duration) -> Result<Duration, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        Some(raw) => raw
            .trim()
            .parse::<u64>()
            .map(Duration::from_secs)
            .map_err(|_| ConfigError::InvalidValue { key, value: raw }),
        None => Ok(default),
    }
}

fn flag<F>(lookup: &F, key: &str, default: bool) -> bool
where
    F: Fn(&str) -> Option<String>,
{
    lookup(key)
        .map(|raw| raw.trim().eq_ignore_ascii_case("true"))
        .unwrap_or(default)
}
