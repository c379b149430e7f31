use thiserror::Error;

use pitchside_core::{AllProvidersFailed, ConfigError, ServiceError, TransportError};

/// CLI-level error categories mapped to exit codes.
#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Validation(#[from] pitchside_core::ValidationError),

    #[error(transparent)]
    Configuration(#[from] ConfigError),

    #[error(transparent)]
    AllProvidersFailed(#[from] AllProvidersFailed),

    #[error(transparent)]
    Transport(#[from] TransportError),

    #[error(transparent)]
    Serialization(#[from] serde_json::Error),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<ServiceError> for CliError {
    fn from(error: ServiceError) -> Self {
        match error {
            ServiceError::Configuration(error) => Self::Configuration(error),
            ServiceError::AllProvidersFailed(error) => Self::AllProvidersFailed(error),
            ServiceError::Transport(error) => Self::Transport(error),
        }
    }
}

impl CliError {
    pub const fn exit_code(&self) -> u8 {
        match self {
            Self::Validation(_) => 2,
            Self::Configuration(_) => 2,
            Self::AllProvidersFailed(_) => 3,
            Self::Transport(_) => 3,
            Self::Serialization(_) => 4,
            Self::Io(_) => 10,
        }
    }
}
