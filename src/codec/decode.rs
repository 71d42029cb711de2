// Container decode - bytes to planar f32 samples
//
// All decode paths normalize to f32 planar data. Integer formats are scaled
// by the positive full-scale value of their bit depth, matching the scaling
// used on export.

use std::io::Cursor;

use symphonia::core::audio::SampleBuffer as SymphoniaSampleBuffer;
use symphonia::core::codecs::{DecoderOptions, CODEC_TYPE_NULL};
use symphonia::core::errors::Error as SymphoniaError;
use symphonia::core::formats::FormatOptions;
use symphonia::core::io::MediaSourceStream;
use symphonia::core::meta::MetadataOptions;
use symphonia::core::probe::Hint;

use crate::buffer::SampleBuffer;
use crate::error::DecodeError;

/// Decode container bytes (WAV, FLAC or MP3) into a sample buffer.
///
/// Failure leaves no partial state anywhere; the caller decides whether a
/// previously loaded buffer stays in place.
pub fn decode_bytes(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let buffer = if is_wav(bytes) {
        decode_wav(bytes)?
    } else if bytes.starts_with(b"fLaC") {
        decode_flac(bytes)?
    } else {
        // MP3 has no single magic (ID3 tag or bare frame sync); let
        // symphonia probe it.
        decode_compressed(bytes)?
    };

    if buffer.is_empty() {
        return Err(DecodeError::EmptyStream);
    }
    Ok(buffer)
}

fn is_wav(bytes: &[u8]) -> bool {
    bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WAVE"
}

fn decode_wav(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let mut reader = hound::WavReader::new(Cursor::new(bytes))?;
    let spec = reader.spec();
    let channels = spec.channels as usize;

    let interleaved: Vec<f32> = match (spec.sample_format, spec.bits_per_sample) {
        (hound::SampleFormat::Float, 32) => reader
            .samples::<f32>()
            .collect::<Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, 16) => reader
            .samples::<i16>()
            .map(|s| s.map(|s| s as f32 / i16::MAX as f32))
            .collect::<Result<Vec<_>, _>>()?,
        (hound::SampleFormat::Int, bits @ (24 | 32)) => {
            let scale = ((1i64 << (bits - 1)) - 1) as f32;
            reader
                .samples::<i32>()
                .map(|s| s.map(|s| s as f32 / scale))
                .collect::<Result<Vec<_>, _>>()?
        }
        (_, bits) => return Err(DecodeError::UnsupportedBitDepth(bits)),
    };

    Ok(deinterleave(&interleaved, channels, spec.sample_rate))
}

fn decode_flac(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let mut reader = claxon::FlacReader::new(Cursor::new(bytes))?;
    let info = reader.streaminfo();
    let channels = info.channels as usize;
    let scale = ((1i64 << (info.bits_per_sample - 1)) - 1) as f32;

    let interleaved: Vec<f32> = reader
        .samples()
        .map(|s| s.map(|s| s as f32 / scale))
        .collect::<Result<Vec<_>, _>>()?;

    Ok(deinterleave(&interleaved, channels, info.sample_rate))
}

fn decode_compressed(bytes: &[u8]) -> Result<SampleBuffer, DecodeError> {
    let mss = MediaSourceStream::new(Box::new(Cursor::new(bytes.to_vec())), Default::default());
    let probed = symphonia::default::get_probe().format(
        &Hint::new(),
        mss,
        &FormatOptions::default(),
        &MetadataOptions::default(),
    )?;
    let mut format = probed.format;

    let track = format
        .tracks()
        .iter()
        .find(|t| t.codec_params.codec != CODEC_TYPE_NULL)
        .ok_or(DecodeError::UnknownFormat)?;
    let track_id = track.id;
    let mut decoder =
        symphonia::default::get_codecs().make(&track.codec_params, &DecoderOptions::default())?;

    let mut sample_rate = track.codec_params.sample_rate.unwrap_or(44_100);
    let mut channels: Vec<Vec<f32>> = Vec::new();
    let mut scratch: Option<SymphoniaSampleBuffer<f32>> = None;

    loop {
        let packet = match format.next_packet() {
            Ok(packet) => packet,
            Err(SymphoniaError::IoError(e))
                if e.kind() == std::io::ErrorKind::UnexpectedEof =>
            {
                break;
            }
            Err(e) => return Err(e.into()),
        };
        if packet.track_id() != track_id {
            continue;
        }

        match decoder.decode(&packet) {
            Ok(decoded) => {
                let spec = *decoded.spec();
                sample_rate = spec.rate;
                let channel_count = spec.channels.count();
                if channels.is_empty() {
                    channels = vec![Vec::new(); channel_count];
                }
                let scratch = scratch.get_or_insert_with(|| {
                    SymphoniaSampleBuffer::new(decoded.capacity() as u64, spec)
                });
                scratch.copy_interleaved_ref(decoded);
                for (i, sample) in scratch.samples().iter().enumerate() {
                    channels[i % channel_count].push(*sample);
                }
            }
            // Recoverable per-packet corruption: skip the packet, as the
            // symphonia docs recommend.
            Err(SymphoniaError::DecodeError(_)) => continue,
            Err(e) => return Err(e.into()),
        }
    }

    if channels.is_empty() || channels[0].is_empty() {
        return Err(DecodeError::EmptyStream);
    }
    Ok(SampleBuffer::new(channels, sample_rate))
}

fn deinterleave(interleaved: &[f32], channels: usize, sample_rate: u32) -> SampleBuffer {
    let channels = channels.max(1);
    let frames = interleaved.len() / channels;
    let mut planar = vec![Vec::with_capacity(frames); channels];
    for frame in interleaved.chunks_exact(channels) {
        for (channel, &sample) in planar.iter_mut().zip(frame) {
            channel.push(sample);
        }
    }
    SampleBuffer::new(planar, sample_rate)
}
