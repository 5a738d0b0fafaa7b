//! In-memory media surface
//!
//! Stands in for a playable page element in the interactive CLI and in
//! tests, with the same clamping behavior a real element applies.

use crate::application::ports::{MediaError, MediaSurface};
use crate::domain::command::clamp_rate;

/// In-memory playable element with optional next/previous controls
#[derive(Debug, Clone)]
pub struct VirtualPlayer {
    paused: bool,
    muted: bool,
    volume: f64,
    current_time: f64,
    playback_rate: f64,
    fullscreen: bool,
    has_track_controls: bool,
    track: i64,
}

impl VirtualPlayer {
    /// Create a paused player at full volume with track controls
    pub fn new() -> Self {
        Self {
            paused: true,
            muted: false,
            volume: 1.0,
            current_time: 0.0,
            playback_rate: 1.0,
            fullscreen: false,
            has_track_controls: true,
            track: 0,
        }
    }

    /// Create a player whose page exposes no next/previous controls
    pub fn without_track_controls() -> Self {
        Self {
            has_track_controls: false,
            ..Self::new()
        }
    }

    /// Current track index, advanced by next/previous
    pub fn track(&self) -> i64 {
        self.track
    }
}

impl Default for VirtualPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl MediaSurface for VirtualPlayer {
    fn play(&mut self) {
        self.paused = false;
    }

    fn pause(&mut self) {
        self.paused = true;
    }

    fn is_paused(&self) -> bool {
        self.paused
    }

    fn is_muted(&self) -> bool {
        self.muted
    }

    fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    fn volume(&self) -> f64 {
        self.volume
    }

    fn set_volume(&mut self, volume: f64) {
        self.volume = volume.clamp(0.0, 1.0);
    }

    fn current_time(&self) -> f64 {
        self.current_time
    }

    fn set_current_time(&mut self, seconds: f64) {
        self.current_time = seconds.max(0.0);
    }

    fn playback_rate(&self) -> f64 {
        self.playback_rate
    }

    fn set_playback_rate(&mut self, rate: f64) {
        self.playback_rate = clamp_rate(rate);
    }

    fn is_fullscreen(&self) -> bool {
        self.fullscreen
    }

    fn request_fullscreen(&mut self) -> Result<(), MediaError> {
        self.fullscreen = true;
        Ok(())
    }

    fn exit_fullscreen(&mut self) -> Result<(), MediaError> {
        self.fullscreen = false;
        Ok(())
    }

    fn next(&mut self) -> Result<(), MediaError> {
        if !self.has_track_controls {
            return Err(MediaError::ControlMissing("next"));
        }
        self.track += 1;
        self.paused = false;
        Ok(())
    }

    fn previous(&mut self) -> Result<(), MediaError> {
        if !self.has_track_controls {
            return Err(MediaError::ControlMissing("previous"));
        }
        self.track -= 1;
        self.paused = false;
        Ok(())
    }
}
