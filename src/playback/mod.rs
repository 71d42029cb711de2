// Playback module - bounded, seekable region playback
//
// The controller is a small state machine over a `PlaybackSink`; position is
// always derived by sampling the sink's clock at read time, never by
// counting ticks, so the visual indicator cannot drift from the audible
// position.

pub mod controller;
pub mod cpal_sink;
pub mod offline;
pub mod sink;

pub use controller::{PlayRegion, PlaybackController, PlaybackTick};
pub use cpal_sink::CpalSink;
pub use offline::{OfflineClock, OfflineSink};
pub use sink::PlaybackSink;

/// Playback state machine states.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PlaybackState {
    Idle,
    Playing,
    Paused,
}

impl PlaybackState {
    pub fn is_playing(&self) -> bool {
        matches!(self, PlaybackState::Playing)
    }

    pub fn is_paused(&self) -> bool {
        matches!(self, PlaybackState::Paused)
    }

    pub fn is_idle(&self) -> bool {
        matches!(self, PlaybackState::Idle)
    }
}

impl Default for PlaybackState {
    fn default() -> Self {
        PlaybackState::Idle
    }
}
