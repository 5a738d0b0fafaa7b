//! Command dispatch use case
//!
//! Applies a [`Command`] to the local media surface, or forwards search
//! commands onto the messaging transport for the target resolver. Every
//! dispatch produces a short status string and never panics: a missing
//! media target or page control yields an error status and no mutation.

use crate::domain::command::{clamp_rate, format_time, Command, PLAYBACK_RATE_STEP, VOLUME_STEP};

use super::ports::{MediaError, MediaSurface, MessageBus, TransportMessage};

/// Outcome of one dispatch: a human-readable status line
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DispatchStatus {
    pub message: String,
    pub error: bool,
}

impl DispatchStatus {
    fn ok(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: false,
        }
    }

    fn err(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            error: true,
        }
    }
}

/// Command dispatch use case
pub struct CommandDispatcher<B: MessageBus> {
    bus: B,
    volume_step: f64,
    rate_step: f64,
}

impl<B: MessageBus> CommandDispatcher<B> {
    /// Create a dispatcher with the default adjustment steps
    pub fn new(bus: B) -> Self {
        Self {
            bus,
            volume_step: VOLUME_STEP,
            rate_step: PLAYBACK_RATE_STEP,
        }
    }

    /// Override the volume and playback-rate adjustment steps
    pub fn with_steps(mut self, volume_step: f64, rate_step: f64) -> Self {
        self.volume_step = volume_step;
        self.rate_step = rate_step;
        self
    }

    /// Execute one command against the media surface (or the transport,
    /// for searches). `media` is `None` when no playable element exists
    /// on the page.
    pub async fn dispatch<M: MediaSurface>(
        &self,
        command: &Command,
        media: Option<&mut M>,
    ) -> DispatchStatus {
        match command {
            Command::Search { query } => {
                return match self
                    .bus
                    .post(TransportMessage::SearchAndPlay {
                        query: query.clone(),
                    })
                    .await
                {
                    Ok(()) => DispatchStatus::ok(format!("Searching for: \"{query}\"")),
                    Err(e) => {
                        tracing::error!("search request failed: {e}");
                        DispatchStatus::err(format!("Search request failed: {e}"))
                    }
                };
            }
            Command::Unknown { raw } => {
                return DispatchStatus::err(format!("Command not recognized: \"{raw}\""));
            }
            _ => {}
        }

        let Some(media) = media else {
            return DispatchStatus::err(MediaError::NoMedia.to_string());
        };

        match command {
            Command::Play => {
                media.play();
                DispatchStatus::ok("Playing.")
            }
            Command::Pause => {
                media.pause();
                DispatchStatus::ok("Paused.")
            }
            Command::Mute => {
                media.set_muted(true);
                DispatchStatus::ok("Muted.")
            }
            Command::Unmute => {
                media.set_muted(false);
                DispatchStatus::ok("Unmuted.")
            }
            Command::Fullscreen => {
                if media.is_fullscreen() {
                    DispatchStatus::ok("Already in fullscreen.")
                } else {
                    match media.request_fullscreen() {
                        Ok(()) => DispatchStatus::ok("Entering fullscreen."),
                        Err(e) => DispatchStatus::err(e.to_string()),
                    }
                }
            }
            Command::ExitFullscreen => {
                if !media.is_fullscreen() {
                    DispatchStatus::ok("Not in fullscreen mode.")
                } else {
                    match media.exit_fullscreen() {
                        Ok(()) => DispatchStatus::ok("Exiting fullscreen."),
                        Err(e) => DispatchStatus::err(e.to_string()),
                    }
                }
            }
            Command::VolumeUp => {
                let volume = (media.volume() + self.volume_step).clamp(0.0, 1.0);
                media.set_volume(volume);
                DispatchStatus::ok(format!("Volume: {}%", (volume * 100.0).round() as u32))
            }
            Command::VolumeDown => {
                let volume = (media.volume() - self.volume_step).clamp(0.0, 1.0);
                media.set_volume(volume);
                DispatchStatus::ok(format!("Volume: {}%", (volume * 100.0).round() as u32))
            }
            Command::Seek { delta_secs } => {
                let target = (media.current_time() + *delta_secs as f64).max(0.0);
                media.set_current_time(target);
                if *delta_secs >= 0 {
                    DispatchStatus::ok(format!("Skipped forward {delta_secs} seconds."))
                } else {
                    DispatchStatus::ok(format!("Rewound {} seconds.", -delta_secs))
                }
            }
            Command::SeekTo { secs } => {
                media.set_current_time(*secs as f64);
                DispatchStatus::ok(format!("Skipped to {}.", format_time(*secs)))
            }
            Command::Next => match media.next() {
                Ok(()) => DispatchStatus::ok("Playing next."),
                Err(e) => DispatchStatus::err(e.to_string()),
            },
            Command::Previous => match media.previous() {
                Ok(()) => DispatchStatus::ok("Playing previous."),
                Err(e) => DispatchStatus::err(e.to_string()),
            },
            Command::SetSpeed { rate } => {
                let rate = clamp_rate(*rate);
                media.set_playback_rate(rate);
                DispatchStatus::ok(format!("Speed set to {rate}x"))
            }
            Command::SpeedUp => {
                let rate = clamp_rate(media.playback_rate() + self.rate_step);
                media.set_playback_rate(rate);
                DispatchStatus::ok(format!("Speed: {rate}x"))
            }
            Command::SpeedDown => {
                let rate = clamp_rate(media.playback_rate() - self.rate_step);
                media.set_playback_rate(rate);
                DispatchStatus::ok(format!("Speed: {rate}x"))
            }
            // Handled above before the media lookup.
            Command::Search { .. } | Command::Unknown { .. } => unreachable!(),
        }
    }
}
