// Waveform peak extraction
//
// Produces per-pixel (min, max) amplitude pairs over the visible window for
// the presentation layer to draw. Multi-channel audio is mixed down to mono
// (channel average) before the bucket scan.

use crate::buffer::SampleBuffer;
use crate::view::Viewport;

/// Per-pixel min/max amplitude pairs, values in [-1.0, 1.0].
#[derive(Debug, Clone, PartialEq)]
pub struct WaveformPeaks {
    pub peaks: Vec<(f32, f32)>,
}

impl WaveformPeaks {
    pub fn len(&self) -> usize {
        self.peaks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }
}

/// Extract peaks for an arbitrary frame range, one pair per pixel column.
pub fn peaks_for_range(
    buffer: &SampleBuffer,
    start_frame: usize,
    end_frame: usize,
    width_px: usize,
) -> WaveformPeaks {
    let start_frame = start_frame.min(buffer.len());
    let end_frame = end_frame.clamp(start_frame, buffer.len());
    let span = end_frame - start_frame;
    if width_px == 0 || span == 0 {
        return WaveformPeaks {
            peaks: vec![(0.0, 0.0); width_px],
        };
    }

    let mut peaks = Vec::with_capacity(width_px);
    for px in 0..width_px {
        let bucket_start = start_frame + px * span / width_px;
        let bucket_end = (start_frame + (px + 1) * span / width_px).max(bucket_start + 1);
        let bucket_end = bucket_end.min(end_frame);

        let mut min_val = f32::MAX;
        let mut max_val = f32::MIN;
        for frame in bucket_start..bucket_end {
            let mono = buffer.mono_frame(frame);
            min_val = min_val.min(mono);
            max_val = max_val.max(mono);
        }
        if bucket_start >= bucket_end {
            peaks.push((0.0, 0.0));
        } else {
            peaks.push((min_val, max_val));
        }
    }

    WaveformPeaks { peaks }
}

/// Extract peaks for the window currently visible in the viewport.
pub fn visible_peaks(buffer: &SampleBuffer, view: &Viewport, width_px: usize) -> WaveformPeaks {
    let len = buffer.len() as f64;
    let start_frame = (view.zoom_offset() * len).floor() as usize;
    let visible_frames = (len / view.zoom_level()).ceil() as usize;
    peaks_for_range(buffer, start_frame, start_frame + visible_frames, width_px)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_peaks_cover_extremes() {
        // Alternating +1/-1: every bucket wider than one frame sees both.
        let samples: Vec<f32> = (0..1000).map(|i| if i % 2 == 0 { 1.0 } else { -1.0 }).collect();
        let buffer = SampleBuffer::from_mono(samples, 44100);

        let peaks = peaks_for_range(&buffer, 0, 1000, 100);
        assert_eq!(peaks.len(), 100);
        for &(min, max) in &peaks.peaks {
            assert_eq!(min, -1.0);
            assert_eq!(max, 1.0);
        }
    }

    #[test]
    fn test_more_pixels_than_frames() {
        let buffer = SampleBuffer::from_mono(vec![0.5; 10], 44100);
        let peaks = peaks_for_range(&buffer, 0, 10, 40);
        assert_eq!(peaks.len(), 40);
        assert!(peaks.peaks.iter().all(|&(min, max)| min == 0.5 && max == 0.5));
    }

    #[test]
    fn test_visible_peaks_follow_zoom() {
        // First half silent, second half full-scale.
        let mut samples = vec![0.0; 500];
        samples.extend(vec![1.0; 500]);
        let buffer = SampleBuffer::from_mono(samples, 44100);

        let mut view = Viewport::default();
        view.set_zoom(2.0);
        view.set_offset(0.5); // second half visible

        let peaks = visible_peaks(&buffer, &view, 50);
        assert!(peaks.peaks.iter().all(|&(_, max)| max == 1.0));
    }

    #[test]
    fn test_empty_range_yields_silence() {
        let buffer = SampleBuffer::from_mono(vec![0.3; 100], 44100);
        let peaks = peaks_for_range(&buffer, 100, 100, 10);
        assert_eq!(peaks.peaks, vec![(0.0, 0.0); 10]);
    }
}
