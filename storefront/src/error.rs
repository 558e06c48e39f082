use crate::flows::listing::ValidationErrors;

/// Failures reported by an external wallet provider.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ProviderError {
    #[error("Request rejected by the wallet")]
    Rejected,

    #[error("Network {0} is unknown to the wallet")]
    UnknownNetwork(u64),

    #[error("Wallet did not respond in time")]
    Timeout,

    #[error("Wallet returned no accounts")]
    NoAccounts,

    #[error("Wallet request failed: {0}")]
    Failed(String),
}

/// Domain-specific error types for the storefront library.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Validation failed: {0}")]
    Validation(ValidationErrors),

    #[error("Wallet is not connected")]
    NotConnected,

    #[error(transparent)]
    Provider(#[from] ProviderError),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Invalid state: {0}")]
    InvalidState(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Convenience type alias.
pub type StoreResult<T> = Result<T, StoreError>;
