// Offline sink - manually advanced playback clock
//
// Produces no sound. The paired `OfflineClock` advances time explicitly,
// which makes controller behavior (clamping, pause/resume bookkeeping,
// natural end-of-region) deterministic to test, and allows headless hosts
// to drive the editor without an audio device.

use std::sync::{Arc, Mutex};

use crate::buffer::SampleBuffer;
use crate::error::PlaybackError;
use crate::playback::sink::PlaybackSink;

#[derive(Debug, Default)]
struct OfflineState {
    playing: bool,
    elapsed_secs: f64,
    region_secs: f64,
    finished: bool,
}

/// Silent playback sink with an externally advanced clock.
pub struct OfflineSink {
    state: Arc<Mutex<OfflineState>>,
}

/// Handle for advancing an [`OfflineSink`]'s clock.
#[derive(Clone)]
pub struct OfflineClock {
    state: Arc<Mutex<OfflineState>>,
}

impl OfflineSink {
    pub fn new() -> (Self, OfflineClock) {
        let state = Arc::new(Mutex::new(OfflineState::default()));
        (
            Self {
                state: Arc::clone(&state),
            },
            OfflineClock { state },
        )
    }
}

impl OfflineClock {
    /// Advance the clock by `dt` seconds of playback.
    pub fn advance(&self, dt: f64) {
        let mut state = self.state.lock().expect("offline clock poisoned");
        if !state.playing {
            return;
        }
        state.elapsed_secs += dt;
        if state.elapsed_secs >= state.region_secs {
            state.elapsed_secs = state.region_secs;
            state.finished = true;
            state.playing = false;
        }
    }

    pub fn is_playing(&self) -> bool {
        self.state.lock().expect("offline clock poisoned").playing
    }
}

impl PlaybackSink for OfflineSink {
    fn ensure_ready(&mut self) -> Result<(), PlaybackError> {
        Ok(())
    }

    fn start(
        &mut self,
        buffer: Arc<SampleBuffer>,
        start_frame: usize,
        end_frame: usize,
    ) -> Result<(), PlaybackError> {
        let mut state = self.state.lock().expect("offline clock poisoned");
        state.playing = true;
        state.finished = false;
        state.elapsed_secs = 0.0;
        state.region_secs =
            end_frame.saturating_sub(start_frame) as f64 / buffer.sample_rate() as f64;
        Ok(())
    }

    fn stop(&mut self) {
        let mut state = self.state.lock().expect("offline clock poisoned");
        state.playing = false;
        state.finished = false;
    }

    fn elapsed_secs(&self) -> f64 {
        self.state.lock().expect("offline clock poisoned").elapsed_secs
    }

    fn is_finished(&self) -> bool {
        self.state.lock().expect("offline clock poisoned").finished
    }
}
