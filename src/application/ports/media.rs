//! Media surface port interface

use thiserror::Error;

/// Errors from the media capability surface
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MediaError {
    #[error("No media found on this page")]
    NoMedia,

    #[error("{0} control not found")]
    ControlMissing(&'static str),

    #[error("Fullscreen request failed: {0}")]
    FullscreenFailed(String),
}

/// Port for a playable media element and its surrounding page controls.
///
/// Setters are expected to clamp into their valid ranges the way a real
/// playback element does (volume to [0, 1], rate to [0.25, 4.0], time
/// floored at zero); the dispatcher clamps as well before calling.
pub trait MediaSurface {
    fn play(&mut self);
    fn pause(&mut self);
    fn is_paused(&self) -> bool;

    fn is_muted(&self) -> bool;
    fn set_muted(&mut self, muted: bool);

    fn volume(&self) -> f64;
    fn set_volume(&mut self, volume: f64);

    /// Playback position in seconds
    fn current_time(&self) -> f64;
    fn set_current_time(&mut self, seconds: f64);

    fn playback_rate(&self) -> f64;
    fn set_playback_rate(&mut self, rate: f64);

    fn is_fullscreen(&self) -> bool;
    fn request_fullscreen(&mut self) -> Result<(), MediaError>;
    fn exit_fullscreen(&mut self) -> Result<(), MediaError>;

    /// Advance to the next item, when the page exposes such a control
    fn next(&mut self) -> Result<(), MediaError>;

    /// Return to the previous item, when the page exposes such a control
    fn previous(&mut self) -> Result<(), MediaError>;
}
