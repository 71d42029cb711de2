// Playback controller - Idle/Playing/Paused state machine
//
// Region bounds are derived from the trim handles at the moment playback
// starts and captured here; while playing, the true position is always
// `offset + sink elapsed`, read from the sink's clock. Failed transitions
// leave the state unchanged.

use std::sync::Arc;

use crate::buffer::SampleBuffer;
use crate::error::PlaybackError;
use crate::playback::sink::PlaybackSink;
use crate::playback::PlaybackState;

/// Absolute playback bounds within the active buffer, in seconds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlayRegion {
    pub start_secs: f64,
    pub end_secs: f64,
}

impl PlayRegion {
    pub fn len_secs(&self) -> f64 {
        self.end_secs - self.start_secs
    }
}

/// One position poll while playing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaybackTick {
    /// Absolute position in the active buffer, in seconds.
    pub position_secs: f64,
    /// True when the region just played to its natural end; the controller
    /// has already returned to Idle with the offset reset to the region
    /// start.
    pub finished: bool,
}

/// Bounded, seekable, pausable playback of a buffer sub-region.
pub struct PlaybackController {
    sink: Box<dyn PlaybackSink>,
    state: PlaybackState,
    region: PlayRegion,
    /// Absolute resume position within the active buffer.
    offset_secs: f64,
    min_region_secs: f64,
}

impl PlaybackController {
    pub fn new(sink: Box<dyn PlaybackSink>, min_region_secs: f64) -> Self {
        Self {
            sink,
            state: PlaybackState::Idle,
            region: PlayRegion {
                start_secs: 0.0,
                end_secs: 0.0,
            },
            offset_secs: 0.0,
            min_region_secs,
        }
    }

    pub fn state(&self) -> PlaybackState {
        self.state
    }

    pub fn region(&self) -> PlayRegion {
        self.region
    }

    /// Current absolute position: the stored offset plus, while playing,
    /// the audio consumed since the segment started.
    pub fn position_secs(&self) -> f64 {
        if self.state.is_playing() {
            (self.offset_secs + self.sink.elapsed_secs()).min(self.region.end_secs)
        } else {
            self.offset_secs
        }
    }

    /// Start (or restart) playback of `region`, from `from` when given,
    /// from the pause point when paused, otherwise from the region start.
    ///
    /// The start offset is clamped into the region; a playable span below
    /// the minimum threshold aborts with no state change. Returns the actual
    /// start position.
    pub fn play(
        &mut self,
        buffer: &Arc<SampleBuffer>,
        region: PlayRegion,
        from: Option<f64>,
    ) -> Result<f64, PlaybackError> {
        if region.len_secs() < self.min_region_secs {
            return Err(PlaybackError::RegionInvalid {
                got: region.len_secs().max(0.0),
                min: self.min_region_secs,
            });
        }

        let requested = from.unwrap_or(if self.state.is_paused() {
            self.offset_secs
        } else {
            region.start_secs
        });
        let start_secs = requested.clamp(
            region.start_secs,
            region.end_secs - self.min_region_secs,
        );

        // No overlapping playback: replace any current source. Leave the
        // Playing state before touching the sink so a failure below cannot
        // strand the controller Playing with no source; the resume point is
        // captured the same way pause captures it.
        if self.state.is_playing() {
            self.offset_secs =
                (self.offset_secs + self.sink.elapsed_secs()).min(self.region.end_secs);
            self.sink.stop();
            self.state = PlaybackState::Idle;
        }
        self.sink.ensure_ready()?;

        let sr = buffer.sample_rate() as f64;
        let start_frame = ((start_secs * sr).floor() as usize).min(buffer.len());
        let end_frame = ((region.end_secs * sr).floor() as usize).min(buffer.len());
        self.sink.start(Arc::clone(buffer), start_frame, end_frame)?;

        self.state = PlaybackState::Playing;
        self.region = region;
        self.offset_secs = start_secs;
        Ok(start_secs)
    }

    /// Playing -> Paused. Captures the exact resume point from the audio
    /// clock before stopping the source. No-op in other states.
    pub fn pause(&mut self) {
        if !self.state.is_playing() {
            return;
        }
        self.offset_secs =
            (self.offset_secs + self.sink.elapsed_secs()).min(self.region.end_secs);
        self.sink.stop();
        self.state = PlaybackState::Paused;
    }

    /// Any state -> Idle. The offset resets to the start of the caller's
    /// current selection (not to zero) so replay restarts from the
    /// selection.
    pub fn stop(&mut self, selection_start_secs: f64) {
        self.sink.stop();
        self.state = PlaybackState::Idle;
        self.offset_secs = selection_start_secs;
    }

    /// Move the playback position. Restarts the source when playing,
    /// otherwise just moves the stored offset (clamped into `region`).
    pub fn seek(
        &mut self,
        buffer: &Arc<SampleBuffer>,
        region: PlayRegion,
        time_secs: f64,
    ) -> Result<f64, PlaybackError> {
        if self.state.is_playing() {
            self.play(buffer, region, Some(time_secs))
        } else {
            let clamped = time_secs.clamp(region.start_secs, region.end_secs);
            self.region = region;
            self.offset_secs = clamped;
            Ok(clamped)
        }
    }

    /// Position poll; call once per visual update while playing. Returns
    /// `None` outside the Playing state. Detects the natural end of the
    /// region and performs the Playing -> Idle transition.
    pub fn tick(&mut self) -> Option<PlaybackTick> {
        if !self.state.is_playing() {
            return None;
        }
        let position = self.offset_secs + self.sink.elapsed_secs();
        if self.sink.is_finished() || position >= self.region.end_secs {
            self.sink.stop();
            self.state = PlaybackState::Idle;
            self.offset_secs = self.region.start_secs;
            return Some(PlaybackTick {
                position_secs: self.region.start_secs,
                finished: true,
            });
        }
        Some(PlaybackTick {
            position_secs: position,
            finished: false,
        })
    }

    /// Hard reset on file load/teardown: cancel playback, clear the region
    /// and offset.
    pub fn reset(&mut self) {
        self.sink.stop();
        self.state = PlaybackState::Idle;
        self.region = PlayRegion {
            start_secs: 0.0,
            end_secs: 0.0,
        };
        self.offset_secs = 0.0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::playback::offline::{OfflineClock, OfflineSink};

    fn controller_with_clock() -> (PlaybackController, OfflineClock, Arc<SampleBuffer>) {
        let (sink, clock) = OfflineSink::new();
        let controller = PlaybackController::new(Box::new(sink), 0.01);
        // 10 seconds mono at 44100
        let buffer = Arc::new(SampleBuffer::from_mono(vec![0.0; 441_000], 44_100));
        (controller, clock, buffer)
    }

    fn region(start: f64, end: f64) -> PlayRegion {
        PlayRegion {
            start_secs: start,
            end_secs: end,
        }
    }

    /// Sink that loses the device after a fixed number of successful starts.
    struct FlakySink {
        inner: OfflineSink,
        starts_left: usize,
    }

    impl PlaybackSink for FlakySink {
        fn ensure_ready(&mut self) -> Result<(), PlaybackError> {
            self.inner.ensure_ready()
        }

        fn start(
            &mut self,
            buffer: Arc<SampleBuffer>,
            start_frame: usize,
            end_frame: usize,
        ) -> Result<(), PlaybackError> {
            if self.starts_left == 0 {
                return Err(PlaybackError::Subsystem("device lost".to_string()));
            }
            self.starts_left -= 1;
            self.inner.start(buffer, start_frame, end_frame)
        }

        fn stop(&mut self) {
            self.inner.stop();
        }

        fn elapsed_secs(&self) -> f64 {
            self.inner.elapsed_secs()
        }

        fn is_finished(&self) -> bool {
            self.inner.is_finished()
        }
    }

    #[test]
    fn test_start_clamps_into_region() {
        let (mut controller, _clock, buffer) = controller_with_clock();
        // Handles at [10%, 90%] of 10s; play(0) must clamp to 1.0s
        let actual = controller.play(&buffer, region(1.0, 9.0), Some(0.0)).unwrap();
        assert!((actual - 1.0).abs() < 1e-12);
        assert_eq!(controller.state(), PlaybackState::Playing);
        assert!((controller.position_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_too_small_region_rejected_without_transition() {
        let (mut controller, _clock, buffer) = controller_with_clock();
        let err = controller.play(&buffer, region(2.0, 2.005), None).unwrap_err();
        assert!(matches!(err, PlaybackError::RegionInvalid { .. }));
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_pause_records_exact_resume_point() {
        let (mut controller, clock, buffer) = controller_with_clock();
        controller.play(&buffer, region(1.0, 9.0), None).unwrap();
        clock.advance(1.5);

        controller.pause();
        assert_eq!(controller.state(), PlaybackState::Paused);
        assert!((controller.position_secs() - 2.5).abs() < 1e-12);

        // Resume re-enters from the recorded offset
        let actual = controller.play(&buffer, region(1.0, 9.0), None).unwrap();
        assert!((actual - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_natural_end_returns_to_selection_start() {
        let (mut controller, clock, buffer) = controller_with_clock();
        controller.play(&buffer, region(2.0, 3.0), None).unwrap();
        clock.advance(5.0);

        let tick = controller.tick().unwrap();
        assert!(tick.finished);
        assert!((tick.position_secs - 2.0).abs() < 1e-12);
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!((controller.position_secs() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_stop_resets_to_selection_start() {
        let (mut controller, clock, buffer) = controller_with_clock();
        controller.play(&buffer, region(2.0, 8.0), None).unwrap();
        clock.advance(1.0);

        controller.stop(2.0);
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!((controller.position_secs() - 2.0).abs() < 1e-12);
    }

    #[test]
    fn test_restart_while_playing_replaces_source() {
        let (mut controller, clock, buffer) = controller_with_clock();
        controller.play(&buffer, region(0.0, 10.0), Some(1.0)).unwrap();
        clock.advance(0.5);

        // Implicit stop + restart; elapsed clock restarts at the new offset
        let actual = controller.play(&buffer, region(0.0, 10.0), Some(5.0)).unwrap();
        assert!((actual - 5.0).abs() < 1e-12);
        assert!((controller.position_secs() - 5.0).abs() < 1e-12);
    }

    #[test]
    fn test_failed_restart_does_not_stay_playing() {
        let (inner, clock) = OfflineSink::new();
        let sink = FlakySink {
            inner,
            starts_left: 1,
        };
        let mut controller = PlaybackController::new(Box::new(sink), 0.01);
        let buffer = Arc::new(SampleBuffer::from_mono(vec![0.0; 441_000], 44_100));

        controller.play(&buffer, region(1.0, 9.0), None).unwrap();
        clock.advance(1.5);

        // The device is gone for the restart: the error must not leave the
        // controller Playing with no source.
        let err = controller
            .play(&buffer, region(1.0, 9.0), Some(5.0))
            .unwrap_err();
        assert!(matches!(err, PlaybackError::Subsystem(_)));
        assert_eq!(controller.state(), PlaybackState::Idle);
        assert!(!clock.is_playing());
        // The resume point was captured before the source was torn down.
        assert!((controller.position_secs() - 2.5).abs() < 1e-12);
    }

    #[test]
    fn test_seek_while_idle_moves_offset_only() {
        let (mut controller, _clock, buffer) = controller_with_clock();
        let pos = controller.seek(&buffer, region(1.0, 9.0), 12.0).unwrap();
        assert!((pos - 9.0).abs() < 1e-12);
        assert_eq!(controller.state(), PlaybackState::Idle);
    }

    #[test]
    fn test_tick_outside_playing_is_none() {
        let (mut controller, _clock, _buffer) = controller_with_clock();
        assert!(controller.tick().is_none());
    }
}
