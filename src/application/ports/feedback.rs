//! User feedback port interface

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Feedback errors
#[derive(Debug, Clone, Error)]
pub enum FeedbackError {
    #[error("Failed to display feedback: {0}")]
    DisplayFailed(String),
}

/// Port for short user-visible status messages.
///
/// Every externally visible failure ends up here as a short status
/// string replacing prior feedback; nothing is thrown at the user.
#[async_trait]
pub trait FeedbackSink: Send + Sync {
    /// Show a transient status message
    async fn show(&self, message: &str) -> Result<(), FeedbackError>;

    /// Show an error status message
    async fn show_error(&self, message: &str) -> Result<(), FeedbackError>;

    /// Clear any visible feedback
    async fn clear(&self) -> Result<(), FeedbackError>;
}

/// Blanket implementation for shared feedback handles
#[async_trait]
impl<F: FeedbackSink> FeedbackSink for Arc<F> {
    async fn show(&self, message: &str) -> Result<(), FeedbackError> {
        self.as_ref().show(message).await
    }

    async fn show_error(&self, message: &str) -> Result<(), FeedbackError> {
        self.as_ref().show_error(message).await
    }

    async fn clear(&self) -> Result<(), FeedbackError> {
        self.as_ref().clear().await
    }
}
