//! Listening session use case
//!
//! Owns the recognition stream lifecycle: keeps the stream alive across
//! transient failures with a bounded restart policy, debounces finalized
//! transcripts, interprets them into commands, and persists the user's
//! listening intent so a rebuilt session can restore it.
//!
//! All mutation is funneled through [`ListeningController::handle`], fed
//! from one event queue. Scheduled restarts post [`SessionEvent::RestartDue`]
//! back into that queue after their delay; stopping does not cancel them,
//! so the handler re-checks listening intent when they fire.

use std::time::{Duration, Instant};

use tokio::sync::mpsc::UnboundedSender;

use crate::domain::command::{interpret, Command};
use crate::domain::session::{RecognitionSession, RetryPolicy, SessionState};

use super::ports::{
    FeedbackSink, ListenStateStore, RecognizerErrorKind, RecognizerEvent, SpeechRecognizer,
};

/// Events consumed by the listening controller
#[derive(Debug, Clone, PartialEq)]
pub enum SessionEvent {
    /// User asked to start listening
    Start,
    /// User asked to stop listening
    Stop,
    /// The recognition engine emitted an event
    Recognizer(RecognizerEvent),
    /// A scheduled restart came due
    RestartDue { attempt: usize, policy: RetryPolicy },
}

/// Listening session use case
pub struct ListeningController<R, F, S>
where
    R: SpeechRecognizer,
    F: FeedbackSink,
    S: ListenStateStore,
{
    recognizer: R,
    feedback: F,
    store: S,
    session: RecognitionSession,
    events: UnboundedSender<SessionEvent>,
}

impl<R, F, S> ListeningController<R, F, S>
where
    R: SpeechRecognizer,
    F: FeedbackSink,
    S: ListenStateStore,
{
    /// Create a new controller in the stopped state.
    ///
    /// `events` must be the sender side of the queue this controller is
    /// driven from; scheduled restarts are posted onto it.
    pub fn new(
        recognizer: R,
        feedback: F,
        store: S,
        debounce: Duration,
        events: UnboundedSender<SessionEvent>,
    ) -> Self {
        Self {
            recognizer,
            feedback,
            store,
            session: RecognitionSession::with_debounce(debounce),
            events,
        }
    }

    /// Current session state
    pub fn state(&self) -> SessionState {
        self.session.state()
    }

    /// Whether the session currently intends to listen
    pub fn is_listening(&self) -> bool {
        self.session.intends_listening()
    }

    /// Restore the persisted listening intent, starting the stream when
    /// the previous session was listening. Used after construction and
    /// after a navigation rebuild.
    pub async fn restore(&mut self) {
        match self.store.load().await {
            Ok(true) => {
                tracing::debug!("restoring persisted listening state");
                self.handle(SessionEvent::Start).await;
            }
            Ok(false) => {}
            Err(e) => tracing::warn!("failed to load listening state: {e}"),
        }
    }

    /// Single entry point for all session events.
    /// Returns a command when a finalized transcript was accepted and
    /// interpreted; the caller dispatches it.
    pub async fn handle(&mut self, event: SessionEvent) -> Option<Command> {
        match event {
            SessionEvent::Start => {
                self.start_listening().await;
                None
            }
            SessionEvent::Stop => {
                self.stop_listening().await;
                None
            }
            SessionEvent::Recognizer(RecognizerEvent::Result {
                transcript,
                is_final,
            }) => self.on_result(&transcript, is_final).await,
            SessionEvent::Recognizer(RecognizerEvent::Error { kind }) => {
                self.on_stream_error(kind).await;
                None
            }
            SessionEvent::Recognizer(RecognizerEvent::Ended) => {
                self.on_stream_ended();
                None
            }
            SessionEvent::RestartDue { attempt, policy } => {
                self.on_restart_due(attempt, policy).await;
                None
            }
        }
    }

    async fn start_listening(&mut self) {
        if self.session.intends_listening() {
            return;
        }

        match self.recognizer.start().await {
            Ok(()) => {
                if let Err(e) = self.session.start() {
                    tracing::warn!("{e}");
                    return;
                }
                self.persist(true).await;
                let _ = self.feedback.show("Listening...").await;
            }
            Err(e) => {
                tracing::error!("failed to start recognition: {e}");
                let _ = self
                    .feedback
                    .show_error("Speech recognition failed to start. Check microphone permissions.")
                    .await;
                self.persist(false).await;
            }
        }
    }

    async fn stop_listening(&mut self) {
        if !self.session.intends_listening() {
            return;
        }

        if let Err(e) = self.recognizer.stop().await {
            tracing::warn!("failed to stop recognition: {e}");
        }
        if let Err(e) = self.session.stop() {
            tracing::warn!("{e}");
        }
        self.persist(false).await;
        let _ = self.feedback.clear().await;
    }

    async fn on_result(&mut self, transcript: &str, is_final: bool) -> Option<Command> {
        if !is_final || !self.session.intends_listening() {
            return None;
        }

        if !self.session.accept_transcript_at(Instant::now()) {
            tracing::debug!(transcript, "transcript debounced");
            return None;
        }

        let _ = self
            .feedback
            .show(&format!("Heard: \"{}\"", transcript.trim()))
            .await;

        let command = interpret(transcript);
        tracing::info!(command = %command, "interpreted transcript");
        Some(command)
    }

    async fn on_stream_error(&mut self, kind: RecognizerErrorKind) {
        let errors = self.session.record_error();
        tracing::warn!(error = %kind, consecutive = errors, "recognition stream error");

        match kind {
            RecognizerErrorKind::NoSpeech | RecognizerErrorKind::AudioCapture => {
                self.schedule_restart(RetryPolicy::after_transient_error(), 0);
            }
            RecognizerErrorKind::NotAllowed => {
                if self.session.intends_listening() {
                    if let Err(e) = self.recognizer.stop().await {
                        tracing::warn!("failed to stop recognition: {e}");
                    }
                    let _ = self.session.stop();
                    self.persist(false).await;
                }
                let _ = self
                    .feedback
                    .show_error("Microphone access denied. Please allow it in browser settings.")
                    .await;
            }
            RecognizerErrorKind::Other(message) => {
                let _ = self
                    .feedback
                    .show_error(&format!("Error: {message}. Attempting restart."))
                    .await;
                self.schedule_restart(RetryPolicy::after_generic_error(), 0);
            }
        }
    }

    fn on_stream_ended(&mut self) {
        if !self.session.intends_listening() {
            tracing::debug!("stream ended while stopped");
            return;
        }
        self.schedule_restart(RetryPolicy::after_stream_end(), 0);
    }

    async fn on_restart_due(&mut self, attempt: usize, policy: RetryPolicy) {
        // Intent may have changed while the timer was pending.
        if !self.session.intends_listening() {
            tracing::debug!(attempt, "restart fired after stop; ignoring");
            return;
        }

        match self.recognizer.start().await {
            Ok(()) => {
                if let Err(e) = self.session.resume() {
                    tracing::warn!("{e}");
                }
                self.persist(true).await;
                tracing::debug!(attempt, "recognition stream restarted");
            }
            Err(e) => {
                let next = attempt + 1;
                if policy.delay(next).is_some() {
                    tracing::warn!(attempt, "restart failed, retrying: {e}");
                    self.schedule_restart(policy, next);
                } else {
                    tracing::error!(attempt, "restart failed, giving up: {e}");
                    let _ = self
                        .feedback
                        .show_error("Speech recognition could not be restarted.")
                        .await;
                    let _ = self.session.stop();
                    self.persist(false).await;
                }
            }
        }
    }

    fn schedule_restart(&mut self, policy: RetryPolicy, attempt: usize) {
        if !self.session.intends_listening() {
            return;
        }
        let Some(delay) = policy.delay(attempt) else {
            return;
        };
        if let Err(e) = self.session.suspend() {
            tracing::warn!("{e}");
            return;
        }

        let events = self.events.clone();
        tokio::spawn(async move {
            tokio::time::sleep(delay).await;
            let _ = events.send(SessionEvent::RestartDue { attempt, policy });
        });
        tracing::debug!(attempt, ?delay, "scheduled recognition restart");
    }

    async fn persist(&self, listening: bool) {
        if let Err(e) = self.store.save(listening).await {
            tracing::warn!("failed to persist listening state: {e}");
        }
    }
}
