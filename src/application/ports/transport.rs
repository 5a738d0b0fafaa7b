//! Remote-context messaging port interfaces

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::fmt;
use thiserror::Error;

/// Opaque handle to a browsing context managed by the transport
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContextId(u64);

impl ContextId {
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    pub const fn raw(&self) -> u64 {
        self.0
    }
}

impl fmt::Display for ContextId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Snapshot of a context as reported by the transport
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContextInfo {
    pub id: ContextId,
    pub url: String,
    pub active: bool,
}

/// Messages exchanged over the transport, including the context
/// lifecycle notifications it delivers.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum TransportMessage {
    /// A controlled context declares itself as the active one
    AnnounceActiveContext {
        #[serde(rename = "contextId")]
        id: ContextId,
    },
    /// Request to search and play in the controlled context
    SearchAndPlay { query: String },
    /// A context came to the foreground
    Activated {
        #[serde(rename = "contextId")]
        id: ContextId,
    },
    /// A context was removed
    Removed {
        #[serde(rename = "contextId")]
        id: ContextId,
    },
}

/// Transport errors
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("No context with id {0}")]
    UnknownContext(ContextId),

    #[error("Failed to navigate context {id}: {message}")]
    NavigateFailed { id: ContextId, message: String },

    #[error("Failed to create context: {0}")]
    CreateFailed(String),

    #[error("Transport unavailable: {0}")]
    Unavailable(String),
}

/// Port for inspecting and steering remote contexts
#[async_trait]
pub trait ContextTransport: Send + Sync {
    /// Look up a context by id; fails when the context is gone
    async fn lookup(&self, id: ContextId) -> Result<ContextInfo, TransportError>;

    /// Find contexts whose location matches the given pattern
    async fn find_matching(&self, pattern: &str) -> Result<Vec<ContextInfo>, TransportError>;

    /// Navigate a context to a destination, optionally foregrounding it
    async fn navigate(
        &self,
        id: ContextId,
        url: &str,
        foreground: bool,
    ) -> Result<(), TransportError>;

    /// Create a new context at the given destination
    async fn create(&self, url: &str) -> Result<ContextInfo, TransportError>;
}

/// Port for posting messages onto the transport
#[async_trait]
pub trait MessageBus: Send + Sync {
    async fn post(&self, message: TransportMessage) -> Result<(), TransportError>;
}
