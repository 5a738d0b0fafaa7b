//! Listening-intent persistence port interface

use async_trait::async_trait;
use thiserror::Error;

/// Persistence errors
#[derive(Debug, Clone, Error)]
pub enum StateStoreError {
    #[error("Failed to read state file: {0}")]
    ReadError(String),

    #[error("Failed to parse state file: {0}")]
    ParseError(String),

    #[error("Failed to write state file: {0}")]
    WriteError(String),
}

/// Port for the durable listening-intent flag.
///
/// Written on every entry into the listening/stopped states so a later
/// session (e.g. after a page navigation) can restore the prior intent.
#[async_trait]
pub trait ListenStateStore: Send + Sync {
    /// Load the last persisted intent; absent state means not listening
    async fn load(&self) -> Result<bool, StateStoreError>;

    /// Persist the current intent
    async fn save(&self, listening: bool) -> Result<(), StateStoreError>;
}
