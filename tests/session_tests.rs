//! End-to-end session tests
//!
//! Drive the full pipeline through the in-process adapters: utterances
//! delivered to the recognition stand-in flow through the listening
//! controller, accepted commands are dispatched against the virtual
//! player, and search commands travel over the loopback transport to the
//! target resolver.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::mpsc;

use voice_remote::application::ports::{
    FeedbackError, FeedbackSink, MediaSurface, SpeechRecognizer, TransportMessage,
};
use voice_remote::application::{
    CommandDispatcher, ListeningController, ResolverConfig, SessionEvent, TargetResolver,
};
use voice_remote::domain::session::SessionState;
use voice_remote::infrastructure::{
    ChannelRecognizer, LoopbackTransport, VirtualPlayer, XdgStateStore,
};

#[derive(Clone, Default)]
struct CaptureFeedback {
    messages: Arc<Mutex<Vec<String>>>,
}

impl CaptureFeedback {
    fn contains(&self, needle: &str) -> bool {
        self.messages
            .lock()
            .unwrap()
            .iter()
            .any(|m| m.contains(needle))
    }
}

#[async_trait]
impl FeedbackSink for CaptureFeedback {
    async fn show(&self, message: &str) -> Result<(), FeedbackError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }

    async fn show_error(&self, message: &str) -> Result<(), FeedbackError> {
        self.messages.lock().unwrap().push(message.to_string());
        Ok(())
    }

    async fn clear(&self) -> Result<(), FeedbackError> {
        Ok(())
    }
}

struct Harness {
    controller: ListeningController<Arc<ChannelRecognizer>, CaptureFeedback, XdgStateStore>,
    recognizer: Arc<ChannelRecognizer>,
    recognizer_rx: mpsc::UnboundedReceiver<voice_remote::application::ports::RecognizerEvent>,
    session_rx: mpsc::UnboundedReceiver<SessionEvent>,
    feedback: CaptureFeedback,
    _dir: tempfile::TempDir,
}

fn harness(debounce: Duration) -> Harness {
    let dir = tempfile::tempdir().unwrap();
    let store = XdgStateStore::with_path(dir.path().join("state.toml"));
    let (recognizer_tx, recognizer_rx) = mpsc::unbounded_channel();
    let recognizer = Arc::new(ChannelRecognizer::new(recognizer_tx));
    let (session_tx, session_rx) = mpsc::unbounded_channel();
    let feedback = CaptureFeedback::default();

    let controller = ListeningController::new(
        Arc::clone(&recognizer),
        feedback.clone(),
        store,
        debounce,
        session_tx,
    );

    Harness {
        controller,
        recognizer,
        recognizer_rx,
        session_rx,
        feedback,
        _dir: dir,
    }
}

impl Harness {
    /// Deliver one utterance and run it through the controller
    async fn speak(&mut self, utterance: &str) -> Option<voice_remote::domain::command::Command> {
        assert!(self.recognizer.deliver(utterance));
        let event = self.recognizer_rx.recv().await.unwrap();
        self.controller.handle(SessionEvent::Recognizer(event)).await
    }
}

#[tokio::test]
async fn spoken_commands_control_the_player() {
    let mut harness = harness(Duration::ZERO);
    harness.controller.handle(SessionEvent::Start).await;

    let (transport, _transport_rx) = LoopbackTransport::new();
    let dispatcher = CommandDispatcher::new(transport);
    let mut player = VirtualPlayer::new();

    let command = harness.speak("play").await.unwrap();
    dispatcher.dispatch(&command, Some(&mut player)).await;
    assert!(!player.is_paused());

    let command = harness.speak("volume down").await.unwrap();
    dispatcher.dispatch(&command, Some(&mut player)).await;
    assert_eq!(player.volume(), 0.9);

    let command = harness.speak("go to 2:30").await.unwrap();
    let status = dispatcher.dispatch(&command, Some(&mut player)).await;
    assert_eq!(player.current_time(), 150.0);
    assert!(status.message.contains("2:30"));

    let command = harness.speak("mute").await.unwrap();
    dispatcher.dispatch(&command, Some(&mut player)).await;
    assert!(player.is_muted());

    assert!(harness.feedback.contains("Heard: \"volume down\""));
}

#[tokio::test]
async fn search_travels_through_transport_to_resolver() {
    let mut harness = harness(Duration::ZERO);
    harness.controller.handle(SessionEvent::Start).await;

    let (transport, mut transport_rx) = LoopbackTransport::new();
    let dispatcher = CommandDispatcher::new(transport.clone());
    let mut resolver = TargetResolver::new(
        transport.clone(),
        ResolverConfig {
            search_url: "https://media.example/results?q=".to_string(),
            context_pattern: "media.example".to_string(),
        },
    );
    let mut player = VirtualPlayer::new();

    // "play <query>" becomes a search, not a local play.
    let command = harness.speak("play lo-fi beats").await.unwrap();
    let status = dispatcher.dispatch(&command, Some(&mut player)).await;
    assert!(status.message.contains("lo-fi beats"));
    assert!(player.is_paused());

    // The request arrives over the transport and creates a fresh context.
    let message = transport_rx.recv().await.unwrap();
    assert_eq!(
        message,
        TransportMessage::SearchAndPlay {
            query: "lo-fi beats".into()
        }
    );
    resolver.handle_message(message).await.unwrap();

    let cached = resolver.cached_target().unwrap();
    let info = transport.context(cached).unwrap();
    assert!(info.url.contains("lo-fi%20beats"));
    assert!(info.active);
    assert_eq!(transport.context_count(), 1);

    // Closing the controlled context clears the cache...
    transport.close(cached);
    let removal = transport_rx.recv().await.unwrap();
    resolver.handle_message(removal).await.unwrap();
    assert_eq!(resolver.cached_target(), None);

    // ...and the next search re-enters the create path.
    let command = harness.speak("search rainy jazz").await.unwrap();
    dispatcher.dispatch(&command, Some(&mut player)).await;
    let message = transport_rx.recv().await.unwrap();
    resolver.handle_message(message).await.unwrap();

    let fresh = resolver.cached_target().unwrap();
    assert_ne!(fresh, cached);
    assert_eq!(transport.context_count(), 1);
}

#[tokio::test]
async fn listening_intent_survives_a_session_rebuild() {
    let dir = tempfile::tempdir().unwrap();
    let store = XdgStateStore::with_path(dir.path().join("state.toml"));

    let (recognizer_tx, _recognizer_rx) = mpsc::unbounded_channel();
    let recognizer = Arc::new(ChannelRecognizer::new(recognizer_tx));
    let (session_tx, _session_rx) = mpsc::unbounded_channel();

    let mut first = ListeningController::new(
        Arc::clone(&recognizer),
        CaptureFeedback::default(),
        store.clone(),
        Duration::ZERO,
        session_tx.clone(),
    );
    first.handle(SessionEvent::Start).await;
    assert_eq!(first.state(), SessionState::Listening);
    drop(first);

    // Simulated navigation: the stream stops and a fresh controller
    // restores the persisted intent.
    recognizer.stop().await.unwrap();
    let mut second = ListeningController::new(
        Arc::clone(&recognizer),
        CaptureFeedback::default(),
        store.clone(),
        Duration::ZERO,
        session_tx.clone(),
    );
    second.restore().await;
    assert_eq!(second.state(), SessionState::Listening);
    assert!(recognizer.is_active());

    // Stopping persists the new intent for the next rebuild.
    second.handle(SessionEvent::Stop).await;
    drop(second);

    let mut third = ListeningController::new(
        recognizer,
        CaptureFeedback::default(),
        store,
        Duration::ZERO,
        session_tx,
    );
    third.restore().await;
    assert_eq!(third.state(), SessionState::Stopped);
}

#[tokio::test(start_paused = true)]
async fn stream_end_restarts_the_engine() {
    let mut harness = harness(Duration::ZERO);
    harness.controller.handle(SessionEvent::Start).await;
    assert!(harness.recognizer.is_active());

    harness.recognizer.end_stream();
    let event = harness.recognizer_rx.recv().await.unwrap();
    harness
        .controller
        .handle(SessionEvent::Recognizer(event))
        .await;
    assert_eq!(harness.controller.state(), SessionState::RestartPending);

    let due = harness.session_rx.recv().await.unwrap();
    harness.controller.handle(due).await;

    assert_eq!(harness.controller.state(), SessionState::Listening);
    assert!(harness.recognizer.is_active());
    assert_eq!(harness.recognizer.start_calls(), 2);
}

#[tokio::test(start_paused = true)]
async fn failing_restarts_give_up_after_the_fallback_retry() {
    let mut harness = harness(Duration::ZERO);
    harness.controller.handle(SessionEvent::Start).await;

    harness.recognizer.end_stream();
    harness.recognizer.fail_next_starts(usize::MAX);
    let event = harness.recognizer_rx.recv().await.unwrap();
    harness
        .controller
        .handle(SessionEvent::Recognizer(event))
        .await;

    let due = harness.session_rx.recv().await.unwrap();
    harness.controller.handle(due).await;
    let due = harness.session_rx.recv().await.unwrap();
    harness.controller.handle(due).await;

    assert_eq!(harness.controller.state(), SessionState::Stopped);
    assert!(harness.feedback.contains("could not be restarted"));
    assert_eq!(harness.recognizer.start_calls(), 3);
}
