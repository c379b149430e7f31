use thiserror::Error;

use crate::routing::AllProvidersFailed;
use crate::transport::TransportError;

/// Input validation errors exposed by `pitchside-core`.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("invalid provider '{value}', expected one of api-football, football-data, sports-db")]
    InvalidProvider { value: String },

    #[error("invalid date '{value}', expected YYYY-MM-DD")]
    InvalidDate { value: String },

    #[error("invalid match filter '{value}'")]
    InvalidFilter { value: String },
}

/// Caller or deployment mistakes in provider configuration.
///
/// These are never retried or converted into a fallback; they surface
/// directly to the caller.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("provider '{name}' not configured; available: [{}]", available.join(", "))]
    UnknownProvider { name: String, available: Vec<String> },

    #[error("invalid value '{value}' for {key}")]
    InvalidValue { key: &'static str, value: String },
}

/// Reason a single raw record was dropped during normalization.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum NormalizeError {
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    #[error("field '{field}' has unexpected type, expected {expected}")]
    InvalidType {
        field: &'static str,
        expected: &'static str,
    },
}

/// Top-level error returned by the football data service.
#[derive(Debug, Error)]
pub enum ServiceError {
    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    AllProvidersFailed(#[from] AllProvidersFailed),

    /// Raw call through the primary client.
    #[error(transparent)]
    Transport(#[from] TransportError),
}
