//! Command vocabulary and transcript interpretation

pub mod interpreter;
pub mod time;

pub use interpreter::interpret;
pub use time::{format_time, parse_time};

use std::fmt;

/// Lowest playback rate a media surface accepts
pub const MIN_PLAYBACK_RATE: f64 = 0.25;

/// Highest playback rate a media surface accepts
pub const MAX_PLAYBACK_RATE: f64 = 4.0;

/// Playback rate adjustment applied by "faster"/"slower"
pub const PLAYBACK_RATE_STEP: f64 = 0.25;

/// Seek distance in seconds applied by "skip"/"back"
pub const SEEK_STEP_SECS: i64 = 10;

/// Volume adjustment applied by "volume up"/"volume down"
pub const VOLUME_STEP: f64 = 0.1;

/// Clamp a playback rate into the accepted range
pub fn clamp_rate(rate: f64) -> f64 {
    rate.clamp(MIN_PLAYBACK_RATE, MAX_PLAYBACK_RATE)
}

/// A typed instruction derived from one transcript.
/// Exactly one variant is produced per transcript; `Unknown` is the
/// total catch-all, so interpretation never fails.
#[derive(Debug, Clone, PartialEq)]
pub enum Command {
    Play,
    Pause,
    Mute,
    Unmute,
    Fullscreen,
    ExitFullscreen,
    VolumeUp,
    VolumeDown,
    Seek { delta_secs: i64 },
    SeekTo { secs: u64 },
    Next,
    Previous,
    SetSpeed { rate: f64 },
    SpeedUp,
    SpeedDown,
    Search { query: String },
    Unknown { raw: String },
}

impl Command {
    /// Short name for logging
    pub const fn name(&self) -> &'static str {
        match self {
            Self::Play => "play",
            Self::Pause => "pause",
            Self::Mute => "mute",
            Self::Unmute => "unmute",
            Self::Fullscreen => "fullscreen",
            Self::ExitFullscreen => "exit-fullscreen",
            Self::VolumeUp => "volume-up",
            Self::VolumeDown => "volume-down",
            Self::Seek { .. } => "seek",
            Self::SeekTo { .. } => "seek-to",
            Self::Next => "next",
            Self::Previous => "previous",
            Self::SetSpeed { .. } => "set-speed",
            Self::SpeedUp => "speed-up",
            Self::SpeedDown => "speed-down",
            Self::Search { .. } => "search",
            Self::Unknown { .. } => "unknown",
        }
    }

    /// Whether this command acts on the local media surface.
    /// `Search` is forwarded to the remote target instead, and `Unknown`
    /// only produces feedback.
    pub const fn is_local(&self) -> bool {
        !matches!(self, Self::Search { .. } | Self::Unknown { .. })
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}
