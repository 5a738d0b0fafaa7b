//! Recognition session state machine

use std::fmt;
use std::time::{Duration, Instant};

use thiserror::Error;

/// Minimum time between accepted transcripts (milliseconds)
pub const DEFAULT_DEBOUNCE_MS: u64 = 1000;

/// Session states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SessionState {
    #[default]
    Stopped,
    Listening,
    RestartPending,
}

impl SessionState {
    /// Get the string representation
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Stopped => "stopped",
            Self::Listening => "listening",
            Self::RestartPending => "restart-pending",
        }
    }
}

impl fmt::Display for SessionState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Error when an invalid state transition is attempted
#[derive(Debug, Clone, Error)]
#[error("Invalid state transition: cannot {action} while in {current_state} state")]
pub struct InvalidTransition {
    pub current_state: SessionState,
    pub action: String,
}

/// Recognition session entity.
/// Manages the listening lifecycle for one logical session, which may span
/// many physical restarts of the underlying recognition stream.
///
/// State machine:
///   STOPPED -> LISTENING (start)
///   LISTENING | RESTART_PENDING -> STOPPED (stop)
///   LISTENING -> RESTART_PENDING (suspend, on stream end/error)
///   RESTART_PENDING -> LISTENING (resume, on successful restart)
///
/// While in `Listening` or `RestartPending` the session still intends to
/// listen: the stream is either running or a restart is scheduled.
#[derive(Debug)]
pub struct RecognitionSession {
    state: SessionState,
    last_command_at: Option<Instant>,
    consecutive_errors: u32,
    debounce: Duration,
}

impl RecognitionSession {
    /// Create a new session in the stopped state
    pub fn new() -> Self {
        Self::with_debounce(Duration::from_millis(DEFAULT_DEBOUNCE_MS))
    }

    /// Create a session with a custom debounce window
    pub fn with_debounce(debounce: Duration) -> Self {
        Self {
            state: SessionState::Stopped,
            last_command_at: None,
            consecutive_errors: 0,
            debounce,
        }
    }

    /// Get the current state
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Check if currently stopped
    pub fn is_stopped(&self) -> bool {
        self.state == SessionState::Stopped
    }

    /// Whether the session still intends to listen (stream running or a
    /// restart scheduled). Restart callbacks must re-check this before
    /// starting the stream, since stopping does not cancel them.
    pub fn intends_listening(&self) -> bool {
        matches!(
            self.state,
            SessionState::Listening | SessionState::RestartPending
        )
    }

    /// Errors seen since the last successful start or accepted transcript
    pub fn consecutive_errors(&self) -> u32 {
        self.consecutive_errors
    }

    /// Transition from STOPPED to LISTENING
    pub fn start(&mut self) -> Result<(), InvalidTransition> {
        if self.state != SessionState::Stopped {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "start listening".to_string(),
            });
        }
        self.state = SessionState::Listening;
        self.consecutive_errors = 0;
        Ok(())
    }

    /// Transition to STOPPED from any listening state
    pub fn stop(&mut self) -> Result<(), InvalidTransition> {
        if self.state == SessionState::Stopped {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "stop listening".to_string(),
            });
        }
        self.state = SessionState::Stopped;
        Ok(())
    }

    /// Transition from LISTENING to RESTART_PENDING.
    /// A no-op when a restart is already pending (overlapping schedules).
    pub fn suspend(&mut self) -> Result<(), InvalidTransition> {
        match self.state {
            SessionState::Listening | SessionState::RestartPending => {
                self.state = SessionState::RestartPending;
                Ok(())
            }
            SessionState::Stopped => Err(InvalidTransition {
                current_state: self.state,
                action: "suspend".to_string(),
            }),
        }
    }

    /// Transition from RESTART_PENDING back to LISTENING
    pub fn resume(&mut self) -> Result<(), InvalidTransition> {
        if self.state != SessionState::RestartPending {
            return Err(InvalidTransition {
                current_state: self.state,
                action: "resume".to_string(),
            });
        }
        self.state = SessionState::Listening;
        self.consecutive_errors = 0;
        Ok(())
    }

    /// Debounce check for a finalized transcript arriving at `now`.
    /// Accepts the transcript (and records its time) when the debounce
    /// window since the last accepted one has elapsed; otherwise the
    /// transcript must be discarded.
    pub fn accept_transcript_at(&mut self, now: Instant) -> bool {
        if let Some(last) = self.last_command_at {
            if now.saturating_duration_since(last) < self.debounce {
                return false;
            }
        }
        self.last_command_at = Some(now);
        self.consecutive_errors = 0;
        true
    }

    /// Record a stream error, returning the consecutive error count
    pub fn record_error(&mut self) -> u32 {
        self.consecutive_errors += 1;
        self.consecutive_errors
    }
}

impl Default for RecognitionSession {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_session_is_stopped() {
        let session = RecognitionSession::new();
        assert!(session.is_stopped());
        assert!(!session.intends_listening());
        assert_eq!(session.state(), SessionState::Stopped);
    }

    #[test]
    fn start_from_stopped() {
        let mut session = RecognitionSession::new();
        assert!(session.start().is_ok());
        assert_eq!(session.state(), SessionState::Listening);
        assert!(session.intends_listening());
    }

    #[test]
    fn start_while_listening_fails() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();

        let err = session.start().unwrap_err();
        assert_eq!(err.current_state, SessionState::Listening);
        assert!(err.action.contains("start"));
    }

    #[test]
    fn stop_from_listening() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();
        assert!(session.stop().is_ok());
        assert!(session.is_stopped());
    }

    #[test]
    fn stop_from_restart_pending() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();
        session.suspend().unwrap();
        assert!(session.stop().is_ok());
        assert!(session.is_stopped());
    }

    #[test]
    fn stop_from_stopped_fails() {
        let mut session = RecognitionSession::new();
        assert!(session.stop().is_err());
    }

    #[test]
    fn suspend_and_resume_cycle() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();

        session.suspend().unwrap();
        assert_eq!(session.state(), SessionState::RestartPending);
        assert!(session.intends_listening());

        session.resume().unwrap();
        assert_eq!(session.state(), SessionState::Listening);
    }

    #[test]
    fn suspend_twice_is_allowed() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();
        session.suspend().unwrap();
        assert!(session.suspend().is_ok());
        assert_eq!(session.state(), SessionState::RestartPending);
    }

    #[test]
    fn suspend_while_stopped_fails() {
        let mut session = RecognitionSession::new();
        assert!(session.suspend().is_err());
    }

    #[test]
    fn resume_while_listening_fails() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();
        assert!(session.resume().is_err());
    }

    #[test]
    fn debounce_rejects_rapid_transcripts() {
        let mut session = RecognitionSession::new();
        let t0 = Instant::now();

        assert!(session.accept_transcript_at(t0));
        assert!(!session.accept_transcript_at(t0 + Duration::from_millis(400)));
        // The rejected transcript does not push the window forward.
        assert!(session.accept_transcript_at(t0 + Duration::from_millis(1200)));
    }

    #[test]
    fn debounce_accepts_spaced_transcripts() {
        let mut session = RecognitionSession::new();
        let t0 = Instant::now();

        assert!(session.accept_transcript_at(t0));
        assert!(session.accept_transcript_at(t0 + Duration::from_millis(1200)));
        assert!(session.accept_transcript_at(t0 + Duration::from_millis(2400)));
    }

    #[test]
    fn custom_debounce_window() {
        let mut session = RecognitionSession::with_debounce(Duration::from_millis(100));
        let t0 = Instant::now();

        assert!(session.accept_transcript_at(t0));
        assert!(session.accept_transcript_at(t0 + Duration::from_millis(150)));
    }

    #[test]
    fn error_count_resets_on_accepted_transcript() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();

        assert_eq!(session.record_error(), 1);
        assert_eq!(session.record_error(), 2);

        session.accept_transcript_at(Instant::now());
        assert_eq!(session.consecutive_errors(), 0);
    }

    #[test]
    fn error_count_resets_on_resume() {
        let mut session = RecognitionSession::new();
        session.start().unwrap();
        session.record_error();
        session.suspend().unwrap();

        session.resume().unwrap();
        assert_eq!(session.consecutive_errors(), 0);
    }

    #[test]
    fn state_display() {
        assert_eq!(SessionState::Stopped.to_string(), "stopped");
        assert_eq!(SessionState::Listening.to_string(), "listening");
        assert_eq!(SessionState::RestartPending.to_string(), "restart-pending");
    }
}
