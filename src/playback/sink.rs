// Playback sink trait - the seam between the state machine and audio output

use std::sync::Arc;

use crate::buffer::SampleBuffer;
use crate::error::PlaybackError;

/// Audio output abstraction the controller schedules against.
///
/// `CpalSink` is the real-time implementation; `OfflineSink` is a manually
/// advanced clock for headless use and tests.
pub trait PlaybackSink {
    /// Make the output ready to produce sound, resuming a suspended stream
    /// if needed. Called before every play attempt.
    fn ensure_ready(&mut self) -> Result<(), PlaybackError>;

    /// Begin playback of frames `[start_frame, end_frame)` of `buffer`,
    /// replacing any source already playing. Resets the elapsed clock.
    fn start(
        &mut self,
        buffer: Arc<SampleBuffer>,
        start_frame: usize,
        end_frame: usize,
    ) -> Result<(), PlaybackError>;

    /// Stop the current source. No-op when nothing is playing.
    fn stop(&mut self);

    /// Seconds of buffer audio consumed since the last `start`, capped at
    /// the scheduled region length.
    fn elapsed_secs(&self) -> f64;

    /// True once the scheduled region has played to its end.
    fn is_finished(&self) -> bool;
}
