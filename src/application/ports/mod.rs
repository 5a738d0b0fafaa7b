//! Port interfaces (traits) for external systems
//!
//! These traits define the boundaries between the application
//! and infrastructure layers.

pub mod config;
pub mod feedback;
pub mod media;
pub mod recognizer;
pub mod state_store;
pub mod transport;

// Re-export common types
pub use config::ConfigStore;
pub use feedback::{FeedbackError, FeedbackSink};
pub use media::{MediaError, MediaSurface};
pub use recognizer::{RecognizerError, RecognizerErrorKind, RecognizerEvent, SpeechRecognizer};
pub use state_store::{ListenStateStore, StateStoreError};
pub use transport::{
    ContextId, ContextInfo, ContextTransport, MessageBus, TransportError, TransportMessage,
};
