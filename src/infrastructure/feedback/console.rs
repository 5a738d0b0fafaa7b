//! Console feedback adapter
//!
//! Renders the transient status bubble as colored stderr lines, so it
//! never mixes with stdout output.

use async_trait::async_trait;
use colored::Colorize;

use crate::application::ports::{FeedbackError, FeedbackSink};

/// Colored console feedback
#[derive(Debug, Clone)]
pub struct ConsoleFeedback {
    enabled: bool,
}

impl ConsoleFeedback {
    /// Create a console feedback sink
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl Default for ConsoleFeedback {
    fn default() -> Self {
        Self::new(true)
    }
}

#[async_trait]
impl FeedbackSink for ConsoleFeedback {
    async fn show(&self, message: &str) -> Result<(), FeedbackError> {
        if self.enabled {
            eprintln!("{} {}", "●".cyan(), message);
        }
        Ok(())
    }

    async fn show_error(&self, message: &str) -> Result<(), FeedbackError> {
        if self.enabled {
            eprintln!("{} {}", "✗".red(), message.red());
        }
        Ok(())
    }

    async fn clear(&self) -> Result<(), FeedbackError> {
        Ok(())
    }
}
