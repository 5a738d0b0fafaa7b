//! Channel-driven recognition engine stand-in
//!
//! The real recognition engine is an external capability; this adapter
//! models its control surface and event stream for the interactive CLI
//! and for tests. Utterances are delivered explicitly and flow out as
//! [`RecognizerEvent`]s while the stream is started, matching how an
//! engine only produces results between `start()` and `stop()`.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

use tokio::sync::mpsc::UnboundedSender;

use crate::application::ports::{
    RecognizerError, RecognizerErrorKind, RecognizerEvent, SpeechRecognizer,
};

/// Recognition engine stand-in driven by explicit calls
pub struct ChannelRecognizer {
    events: UnboundedSender<RecognizerEvent>,
    active: AtomicBool,
    start_calls: AtomicUsize,
    fail_starts: AtomicUsize,
}

impl ChannelRecognizer {
    /// Create an adapter that emits events on the given channel
    pub fn new(events: UnboundedSender<RecognizerEvent>) -> Self {
        Self {
            events,
            active: AtomicBool::new(false),
            start_calls: AtomicUsize::new(0),
            fail_starts: AtomicUsize::new(0),
        }
    }

    /// Whether the stream is currently started
    pub fn is_active(&self) -> bool {
        self.active.load(Ordering::SeqCst)
    }

    /// Number of `start()` calls seen so far
    pub fn start_calls(&self) -> usize {
        self.start_calls.load(Ordering::SeqCst)
    }

    /// Make the next `n` start attempts fail, to exercise retry paths
    pub fn fail_next_starts(&self, n: usize) {
        self.fail_starts.store(n, Ordering::SeqCst);
    }

    /// Deliver a finalized utterance. Returns false when the stream is
    /// stopped and the utterance was dropped.
    pub fn deliver(&self, transcript: &str) -> bool {
        self.deliver_with_finality(transcript, true)
    }

    /// Deliver an utterance with explicit finality
    pub fn deliver_with_finality(&self, transcript: &str, is_final: bool) -> bool {
        if !self.is_active() {
            tracing::debug!(transcript, "utterance dropped: stream not started");
            return false;
        }
        self.events
            .send(RecognizerEvent::Result {
                transcript: transcript.to_string(),
                is_final,
            })
            .is_ok()
    }

    /// Emit a stream error
    pub fn inject_error(&self, kind: RecognizerErrorKind) {
        let _ = self.events.send(RecognizerEvent::Error { kind });
    }

    /// Emit a normal end-of-stream
    pub fn end_stream(&self) {
        self.active.store(false, Ordering::SeqCst);
        let _ = self.events.send(RecognizerEvent::Ended);
    }
}

#[async_trait::async_trait]
impl SpeechRecognizer for ChannelRecognizer {
    async fn start(&self) -> Result<(), RecognizerError> {
        self.start_calls.fetch_add(1, Ordering::SeqCst);

        let remaining = self.fail_starts.load(Ordering::SeqCst);
        if remaining > 0 {
            self.fail_starts.store(remaining - 1, Ordering::SeqCst);
            return Err(RecognizerError::StartFailed(
                "injected start failure".to_string(),
            ));
        }

        if self.active.swap(true, Ordering::SeqCst) {
            return Err(RecognizerError::AlreadyRunning);
        }
        Ok(())
    }

    async fn stop(&self) -> Result<(), RecognizerError> {
        self.active.store(false, Ordering::SeqCst);
        Ok(())
    }
}
