// Multi-channel PCM sample buffer
//
// Samples are stored planar (one Vec per channel) in f32, range [-1.0, 1.0].
// All channels have the same length. Buffers are never mutated in place by
// the editor; edit operations allocate a new buffer and the store swaps the
// reference.

/// Fixed-length, fixed-rate, multi-channel f32 PCM data.
#[derive(Debug, Clone, PartialEq)]
pub struct SampleBuffer {
    channels: Vec<Vec<f32>>,
    sample_rate: u32,
}

impl SampleBuffer {
    /// Create a buffer from planar channel data.
    ///
    /// Panics if `channels` is empty, channel lengths differ, or
    /// `sample_rate` is zero. Callers construct channel data themselves so
    /// these are programming errors, not runtime conditions.
    pub fn new(channels: Vec<Vec<f32>>, sample_rate: u32) -> Self {
        assert!(!channels.is_empty(), "buffer needs at least one channel");
        assert!(sample_rate > 0, "sample rate must be > 0");
        let len = channels[0].len();
        assert!(
            channels.iter().all(|c| c.len() == len),
            "all channels must have equal length"
        );
        Self {
            channels,
            sample_rate,
        }
    }

    /// Convenience constructor for mono data.
    pub fn from_mono(samples: Vec<f32>, sample_rate: u32) -> Self {
        Self::new(vec![samples], sample_rate)
    }

    /// Number of channels (>= 1).
    pub fn num_channels(&self) -> usize {
        self.channels.len()
    }

    /// Length in frames (samples per channel).
    pub fn len(&self) -> usize {
        self.channels[0].len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn sample_rate(&self) -> u32 {
        self.sample_rate
    }

    /// Duration in seconds (`len / sample_rate`).
    pub fn duration_secs(&self) -> f64 {
        self.len() as f64 / self.sample_rate as f64
    }

    /// Sample data for one channel.
    pub fn channel(&self, index: usize) -> &[f32] {
        &self.channels[index]
    }

    /// Mono mixdown of one frame (average across channels).
    pub fn mono_frame(&self, frame: usize) -> f32 {
        let sum: f32 = self.channels.iter().map(|c| c[frame]).sum();
        sum / self.channels.len() as f32
    }

    /// Sample at (channel, frame) with the channel index wrapped into range.
    /// Used by playback when the output device has more channels than the
    /// buffer (mono material plays on every device channel).
    pub fn sample_wrapped(&self, channel: usize, frame: usize) -> f32 {
        self.channels[channel % self.channels.len()][frame]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_basics() {
        let buf = SampleBuffer::new(vec![vec![0.0; 44100], vec![0.0; 44100]], 44100);
        assert_eq!(buf.num_channels(), 2);
        assert_eq!(buf.len(), 44100);
        assert_eq!(buf.sample_rate(), 44100);
        assert!((buf.duration_secs() - 1.0).abs() < 1e-12);
    }

    #[test]
    fn test_mono_frame_mixdown() {
        let buf = SampleBuffer::new(vec![vec![1.0, 0.0], vec![0.0, 0.5]], 48000);
        assert_eq!(buf.mono_frame(0), 0.5);
        assert_eq!(buf.mono_frame(1), 0.25);
    }

    #[test]
    fn test_sample_wrapped_mono_on_stereo_device() {
        let buf = SampleBuffer::from_mono(vec![0.25, -0.25], 48000);
        assert_eq!(buf.sample_wrapped(0, 0), 0.25);
        assert_eq!(buf.sample_wrapped(1, 0), 0.25);
    }

    #[test]
    #[should_panic(expected = "equal length")]
    fn test_unequal_channels_panics() {
        SampleBuffer::new(vec![vec![0.0; 10], vec![0.0; 11]], 44100);
    }
}
