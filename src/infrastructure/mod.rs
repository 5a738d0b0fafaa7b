//! Infrastructure layer - Adapter implementations
//!
//! Contains concrete implementations of the port interfaces: the
//! channel-driven recognition engine stand-in, the in-memory media
//! surface and context transport, file-backed stores, and console
//! feedback.

pub mod config;
pub mod feedback;
pub mod logging;
pub mod media;
pub mod recognition;
pub mod state;
pub mod transport;

// Re-export adapters
pub use config::XdgConfigStore;
pub use feedback::ConsoleFeedback;
pub use media::VirtualPlayer;
pub use recognition::ChannelRecognizer;
pub use state::XdgStateStore;
pub use transport::LoopbackTransport;
