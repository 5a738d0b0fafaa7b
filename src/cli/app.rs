//! Interactive session runner
//!
//! Wires the adapters to the use cases and drives everything from one
//! select loop: typed lines stand in for utterances, recognizer events
//! flow into the listening controller, accepted commands are dispatched
//! against the virtual player, and transport messages feed the target
//! resolver. Control lines (`:start`, `:stop`, `:nav`, ...) map to the
//! session lifecycle actions a page surface would trigger.

use std::process::ExitCode;
use std::sync::Arc;

use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::mpsc;

use crate::application::ports::{FeedbackSink, RecognizerErrorKind, SpeechRecognizer};
use crate::application::{
    CommandDispatcher, ListeningController, ResolverConfig, SessionEvent, TargetResolver,
};
use crate::domain::config::AppConfig;
use crate::infrastructure::{
    ChannelRecognizer, ConsoleFeedback, LoopbackTransport, VirtualPlayer, XdgConfigStore,
    XdgStateStore,
};

use super::args::SessionOptions;
use super::presenter::Presenter;

/// Load file config and overlay CLI-provided values on top
pub async fn load_merged_config(cli_config: AppConfig) -> AppConfig {
    use crate::application::ports::ConfigStore;

    let store = XdgConfigStore::new();
    let file_config = match store.load().await {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("failed to load config, using defaults: {e}");
            AppConfig::empty()
        }
    };
    file_config.merge(cli_config)
}

enum LineAction {
    Continue,
    Quit,
    Navigate,
}

/// Run the interactive session loop
pub async fn run_session(options: SessionOptions) -> ExitCode {
    let presenter = Presenter::new();

    let (recognizer_tx, mut recognizer_rx) = mpsc::unbounded_channel();
    let recognizer = Arc::new(ChannelRecognizer::new(recognizer_tx));
    let (transport, mut transport_rx) = LoopbackTransport::new();
    let store = XdgStateStore::new();
    let feedback = ConsoleFeedback::new(options.feedback);
    let (session_tx, mut session_rx) = mpsc::unbounded_channel();

    let mut controller = ListeningController::new(
        Arc::clone(&recognizer),
        feedback.clone(),
        store.clone(),
        options.debounce,
        session_tx.clone(),
    );
    let dispatcher = CommandDispatcher::new(transport.clone())
        .with_steps(options.volume_step, options.rate_step);
    let mut resolver = TargetResolver::new(
        transport.clone(),
        ResolverConfig {
            search_url: options.search_url.clone(),
            context_pattern: options.context_pattern.clone(),
        },
    );
    let mut media = VirtualPlayer::new();

    controller.restore().await;
    if options.listen {
        controller.handle(SessionEvent::Start).await;
    }

    presenter.info("Type a phrase to speak it; :start, :stop, :nav, :status, :quit control the session.");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();

    loop {
        tokio::select! {
            line = lines.next_line() => {
                let line = match line {
                    Ok(Some(line)) => line,
                    Ok(None) => break,
                    Err(e) => {
                        presenter.error(&format!("Failed to read input: {e}"));
                        break;
                    }
                };
                match handle_line(&line, &mut controller, &recognizer, &presenter).await {
                    LineAction::Continue => {}
                    LineAction::Quit => break,
                    LineAction::Navigate => {
                        // The page navigated: tear the session down and bring
                        // up a fresh one restoring the persisted intent.
                        let _ = recognizer.stop().await;
                        controller = ListeningController::new(
                            Arc::clone(&recognizer),
                            feedback.clone(),
                            store.clone(),
                            options.debounce,
                            session_tx.clone(),
                        );
                        controller.restore().await;
                        presenter.info("Navigation finished; session rebuilt.");
                    }
                }
            }
            Some(event) = recognizer_rx.recv() => {
                if let Some(command) = controller.handle(SessionEvent::Recognizer(event)).await {
                    let status = dispatcher.dispatch(&command, Some(&mut media)).await;
                    if status.error {
                        let _ = feedback.show_error(&status.message).await;
                    } else {
                        let _ = feedback.show(&status.message).await;
                    }
                }
            }
            Some(event) = session_rx.recv() => {
                controller.handle(event).await;
            }
            Some(message) = transport_rx.recv() => {
                match resolver.handle_message(message).await {
                    Ok(resolution) => tracing::debug!(?resolution, "transport message handled"),
                    Err(e) => {
                        let _ = feedback.show_error(&e.to_string()).await;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => break,
        }
    }

    let _ = recognizer.stop().await;
    ExitCode::SUCCESS
}

async fn handle_line<F, S>(
    line: &str,
    controller: &mut ListeningController<Arc<ChannelRecognizer>, F, S>,
    recognizer: &ChannelRecognizer,
    presenter: &Presenter,
) -> LineAction
where
    F: FeedbackSink,
    S: crate::application::ports::ListenStateStore,
{
    let line = line.trim();
    if line.is_empty() {
        return LineAction::Continue;
    }

    if let Some(control) = line.strip_prefix(':') {
        let mut parts = control.splitn(2, char::is_whitespace);
        match parts.next().unwrap_or("") {
            "quit" | "q" => return LineAction::Quit,
            "start" => {
                controller.handle(SessionEvent::Start).await;
            }
            "stop" => {
                controller.handle(SessionEvent::Stop).await;
            }
            "nav" => return LineAction::Navigate,
            "status" => presenter.key_value("session", controller.state().as_str()),
            "end" => recognizer.end_stream(),
            "err" => {
                let kind = match parts.next().map(str::trim).unwrap_or("") {
                    "no-speech" | "" => RecognizerErrorKind::NoSpeech,
                    "audio-capture" => RecognizerErrorKind::AudioCapture,
                    "not-allowed" => RecognizerErrorKind::NotAllowed,
                    other => RecognizerErrorKind::Other(other.to_string()),
                };
                recognizer.inject_error(kind);
            }
            other => presenter.error(&format!("Unknown control command: :{other}")),
        }
        return LineAction::Continue;
    }

    if !recognizer.deliver(line) {
        presenter.info("Not listening. Use :start first.");
    }
    LineAction::Continue
}
