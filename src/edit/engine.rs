// Edit engine - splice delete, extract, gain and speed
//
// Every operation takes the current buffer by reference and returns a new
// one; nothing here mutates shared data. Time-to-sample conversion uses
// floor on both edges: consistent truncation avoids off-by-one gaps when a
// cut is later re-spliced against its neighbor.

use crate::buffer::SampleBuffer;
use crate::error::EditError;

fn region_to_frames(
    buffer: &SampleBuffer,
    start_secs: f64,
    end_secs: f64,
    min_region_secs: f64,
) -> Result<(usize, usize), EditError> {
    let span = end_secs - start_secs;
    if span < min_region_secs {
        return Err(EditError::RegionTooSmall {
            got: span.max(0.0),
            min: min_region_secs,
        });
    }
    let sr = buffer.sample_rate() as f64;
    let start = ((start_secs * sr).floor().max(0.0) as usize).min(buffer.len());
    let end = ((end_secs * sr).floor().max(0.0) as usize).min(buffer.len());
    if end <= start {
        return Err(EditError::RegionTooSmall {
            got: span.max(0.0),
            min: min_region_secs,
        });
    }
    Ok((start, end))
}

/// Ripple-delete the region [start_secs, end_secs): remove those frames and
/// close the gap, producing a shorter buffer. The removed span must be at
/// least `min_region_secs` and must not cover the entire buffer.
pub fn delete_region(
    buffer: &SampleBuffer,
    start_secs: f64,
    end_secs: f64,
    min_region_secs: f64,
) -> Result<SampleBuffer, EditError> {
    let (start, end) = region_to_frames(buffer, start_secs, end_secs, min_region_secs)?;
    let removed = end - start;
    if removed >= buffer.len() {
        return Err(EditError::WouldEmptyBuffer);
    }

    let new_len = buffer.len() - removed;
    let mut channels = Vec::with_capacity(buffer.num_channels());
    for ch in 0..buffer.num_channels() {
        let data = buffer.channel(ch);
        let mut out = Vec::with_capacity(new_len);
        out.extend_from_slice(&data[..start]);
        out.extend_from_slice(&data[end..]);
        channels.push(out);
    }
    Ok(SampleBuffer::new(channels, buffer.sample_rate()))
}

/// Copy the region [start_secs, end_secs) into a new buffer (trim-keep).
pub fn extract_region(
    buffer: &SampleBuffer,
    start_secs: f64,
    end_secs: f64,
    min_region_secs: f64,
) -> Result<SampleBuffer, EditError> {
    let (start, end) = region_to_frames(buffer, start_secs, end_secs, min_region_secs)?;
    let channels = (0..buffer.num_channels())
        .map(|ch| buffer.channel(ch)[start..end].to_vec())
        .collect();
    Ok(SampleBuffer::new(channels, buffer.sample_rate()))
}

/// Scale every sample by `gain`, hard-clamped back into [-1.0, 1.0].
pub fn apply_gain(buffer: &SampleBuffer, gain: f32) -> SampleBuffer {
    let channels = (0..buffer.num_channels())
        .map(|ch| {
            buffer
                .channel(ch)
                .iter()
                .map(|s| (s * gain).clamp(-1.0, 1.0))
                .collect()
        })
        .collect();
    SampleBuffer::new(channels, buffer.sample_rate())
}

/// Resample for a playback-rate change by nearest-neighbor index mapping:
/// `out[i] = in[floor(i * rate)]`. A rate above 1.0 shortens the buffer,
/// below 1.0 lengthens it. The sample rate tag is unchanged.
pub fn change_speed(buffer: &SampleBuffer, rate: f64) -> Result<SampleBuffer, EditError> {
    if !(rate.is_finite() && rate > 0.0) {
        return Err(EditError::InvalidRate(rate));
    }
    let new_len = ((buffer.len() as f64 / rate).floor() as usize).max(1);
    let channels = (0..buffer.num_channels())
        .map(|ch| {
            let data = buffer.channel(ch);
            (0..new_len)
                .map(|i| {
                    let src = ((i as f64 * rate).floor() as usize).min(data.len() - 1);
                    data[src]
                })
                .collect()
        })
        .collect();
    Ok(SampleBuffer::new(channels, buffer.sample_rate()))
}
