//! Recognition session entity and restart policy

pub mod retry;
pub mod state;

pub use retry::RetryPolicy;
pub use state::{InvalidTransition, RecognitionSession, SessionState, DEFAULT_DEBOUNCE_MS};
