//! Speech recognition port interface

use async_trait::async_trait;
use std::fmt;
use std::sync::Arc;
use thiserror::Error;

/// Errors from starting or stopping the recognition stream
#[derive(Debug, Clone, Error)]
pub enum RecognizerError {
    #[error("Failed to start recognition: {0}")]
    StartFailed(String),

    #[error("Recognition is already running")]
    AlreadyRunning,

    #[error("Failed to stop recognition: {0}")]
    StopFailed(String),
}

/// Error kinds reported by the recognition stream while running
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RecognizerErrorKind {
    /// No speech was detected before the engine gave up
    NoSpeech,
    /// The microphone could not be captured
    AudioCapture,
    /// Microphone permission was denied; not recoverable by retrying
    NotAllowed,
    /// Any other engine-reported error
    Other(String),
}

impl fmt::Display for RecognizerErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoSpeech => write!(f, "no-speech"),
            Self::AudioCapture => write!(f, "audio-capture"),
            Self::NotAllowed => write!(f, "not-allowed"),
            Self::Other(kind) => write!(f, "{kind}"),
        }
    }
}

/// Events emitted by the recognition stream
#[derive(Debug, Clone, PartialEq)]
pub enum RecognizerEvent {
    /// A recognition result. Only finalized results carry a usable
    /// transcript; interim results are discarded by the session.
    Result { transcript: String, is_final: bool },
    /// The stream reported an error
    Error { kind: RecognizerErrorKind },
    /// The stream ended (normal end of utterance)
    Ended,
}

/// Port for the speech recognition engine.
///
/// The engine pushes [`RecognizerEvent`]s through a channel supplied at
/// adapter construction; this trait only covers the control surface.
#[async_trait]
pub trait SpeechRecognizer: Send + Sync {
    /// Start the recognition stream
    async fn start(&self) -> Result<(), RecognizerError>;

    /// Stop the recognition stream
    async fn stop(&self) -> Result<(), RecognizerError>;
}

/// Blanket implementation for shared recognizer handles
#[async_trait]
impl<R: SpeechRecognizer> SpeechRecognizer for Arc<R> {
    async fn start(&self) -> Result<(), RecognizerError> {
        self.as_ref().start().await
    }

    async fn stop(&self) -> Result<(), RecognizerError> {
        self.as_ref().stop().await
    }
}
