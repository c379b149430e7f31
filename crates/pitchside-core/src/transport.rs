//! Provider-bound HTTP client with rate limiting, retry and caching.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};
use std::sync::Arc;

use serde_json::Value;
use tracing::{debug, info, warn};

use crate::cache::{cache_key, ResponseCache};
use crate::clock::Clock;
use crate::config::{ProviderDescriptor, Settings};
use crate::http_client::{HttpAuth, HttpClient, HttpErrorKind, HttpMethod, HttpRequest};
use crate::retry::RetryPolicy;
use crate::throttling::RateLimiter;
use crate::ProviderId;

const BODY_EXCERPT_CHARS: usize = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TransportErrorKind {
    Timeout,
    Connect,
    /// Non-2xx response status.
    Status(u16),
    /// 2xx response whose body is not valid JSON.
    Decode,
    Request,
}

impl TransportErrorKind {
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Timeout => "timeout",
            Self::Connect => "connect",
            Self::Status(_) => "status",
            Self::Decode => "decode",
            Self::Request => "request",
        }
    }
}

/// Final failure of a transport call once every attempt is used up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransportError {
    url: String,
    attempts: u32,
    kind: TransportErrorKind,
    message: String,
}

impl TransportError {
    pub fn new(url: impl Into<String>, kind: TransportErrorKind, message: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            attempts: 1,
            kind,
            message: message.into(),
        }
    }

    fn with_attempts(mut self, attempts: u32) -> Self {
        self.attempts = attempts;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub const fn attempts(&self) -> u32 {
        self.attempts
    }

    pub const fn kind(&self) -> TransportErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub const fn status(&self) -> Option<u16> {
        match self.kind {
            TransportErrorKind::Status(status) => Some(status),
            _ => None,
        }
    }
}

impl Display for TransportError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} failed after {} attempt(s): {}",
            self.url, self.attempts, self.message
        )
    }
}

impl std::error::Error for TransportError {}

/// HTTP client bound to one provider.
///
/// Owns its rate window and (when enabled) its response cache, so nothing
/// here is shared between clients. Calls take `&mut self`.
pub struct TransportClient {
    descriptor: ProviderDescriptor,
    auth: HttpAuth,
    http: Arc<dyn HttpClient>,
    limiter: RateLimiter,
    cache: Option<ResponseCache>,
    retry: RetryPolicy,
    clock: Arc<dyn Clock>,
    log_api_calls: bool,
}

impl TransportClient {
    pub fn new(
        descriptor: ProviderDescriptor,
        settings: &Settings,
        http: Arc<dyn HttpClient>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        let limiter = RateLimiter::new(
            settings.rate_limit_max_requests,
            settings.rate_limit_period,
            Arc::clone(&clock),
        );
        let cache = settings
            .cache_enabled
            .then(|| ResponseCache::new(settings.cache_duration, Arc::clone(&clock)));

        Self {
            auth: descriptor.auth(),
            retry: RetryPolicy::exponential(descriptor.retry_attempts),
            descriptor,
            http,
            limiter,
            cache,
            clock,
            log_api_calls: settings.log_api_calls,
        }
    }

    pub fn with_retry_policy(mut self, retry: RetryPolicy) -> Self {
        self.retry = retry;
        self
    }

    pub fn provider(&self) -> ProviderId {
        self.descriptor.id
    }

    pub fn descriptor(&self) -> &ProviderDescriptor {
        &self.descriptor
    }

    /// Issues a GET, answering from the cache when allowed and possible.
    pub async fn get(
        &mut self,
        endpoint: &str,
        params: &BTreeMap<String, String>,
        use_cache: bool,
    ) -> Result<Value, TransportError> {
        let key = cache_key(endpoint, params);

        if use_cache {
            if let Some(hit) = self.cache.as_mut().and_then(|cache| cache.get(&key)) {
                info!(provider = self.provider().as_str(), key = %key, "cache hit");
                return Ok(hit);
            }
        }

        let value = self.request(HttpMethod::Get, endpoint, params, None).await?;

        if use_cache {
            if let Some(cache) = self.cache.as_mut() {
                cache.set(key, value.clone());
            }
        }

        Ok(value)
    }

    /// Issues a POST with a JSON body. Never cached.
    pub async fn post(&mut self, endpoint: &str, body: &Value) -> Result<Value, TransportError> {
        self.request(HttpMethod::Post, endpoint, &BTreeMap::new(), Some(body))
            .await
    }

    /// Performs the call with rate limiting and exponential backoff between
    /// failed attempts.
    pub async fn request(
        &mut self,
        method: HttpMethod,
        endpoint: &str,
        params: &BTreeMap<String, String>,
        body: Option<&Value>,
    ) -> Result<Value, TransportError> {
        let url = join_url(&self.descriptor.base_url, endpoint);
        let mut request = HttpRequest::new(method, url.clone())
            .with_query(params)
            .with_auth(&self.auth)
            .with_timeout(self.descriptor.timeout);
        if let Some(body) = body {
            request = request.with_json_body(body.to_string());
        }

        let attempts = self.retry.attempts();
        let mut attempt = 0;
        loop {
            self.limiter.wait_if_needed().await;
            if self.log_api_calls {
                info!(
                    provider = self.provider().as_str(),
                    method = method.as_str(),
                    url = %url,
                    attempt = attempt + 1,
                    "api call"
                );
            }

            let failure = match self.send_once(request.clone()).await {
                Ok(value) => return Ok(value),
                Err(failure) => failure,
            };

            attempt += 1;
            if attempt >= attempts {
                warn!(
                    provider = self.provider().as_str(),
                    url = %url,
                    attempts,
                    error = failure.message(),
                    "request failed, no attempts left"
                );
                return Err(failure.with_attempts(attempt));
            }

            let delay = self.retry.delay_for_attempt(attempt - 1);
            warn!(
                provider = self.provider().as_str(),
                url = %url,
                attempt,
                backoff_secs = delay.as_secs_f64(),
                error = failure.message(),
                "request failed, retrying"
            );
            self.clock.sleep(delay).await;
        }
    }

    /// Drops every cached response held by this client.
    pub fn clear_cache(&mut self) {
        if let Some(cache) = self.cache.as_mut() {
            cache.clear();
            debug!(provider = self.provider().as_str(), "cache cleared");
        }
    }

    pub fn cached_entries(&self) -> usize {
        self.cache.as_ref().map_or(0, ResponseCache::len)
    }

    async fn send_once(&self, request: HttpRequest) -> Result<Value, TransportError> {
        let url = request.url.clone();
        let response = self.http.execute(request).await.map_err(|error| {
            let kind = match error.kind() {
                HttpErrorKind::Timeout => TransportErrorKind::Timeout,
                HttpErrorKind::Connect => TransportErrorKind::Connect,
                HttpErrorKind::Other => TransportErrorKind::Request,
            };
            TransportError::new(&url, kind, error.message())
        })?;

        if !response.is_success() {
            let excerpt = response
                .body
                .chars()
                .take(BODY_EXCERPT_CHARS)
                .collect::<String>();
            return Err(TransportError::new(
                &url,
                TransportErrorKind::Status(response.status),
                format!("HTTP {}: {}", response.status, excerpt.trim()),
            ));
        }

        serde_json::from_str(&response.body).map_err(|error| {
            TransportError::new(
                &url,
                TransportErrorKind::Decode,
                format!("invalid JSON response: {error}"),
            )
        })
    }
}

fn join_url(base_url: &str, endpoint: &str) -> String {
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        endpoint.trim_start_matches('/')
    )
}
