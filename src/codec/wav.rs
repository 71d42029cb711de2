// Canonical WAV serialization
//
// Output layout is fixed for round-trip compatibility with standard audio
// tools: RIFF/WAVE header, 16-byte `fmt ` sub-chunk with format 1 (PCM),
// 16-bit signed little-endian samples interleaved by channel, `data`
// sub-chunk of exactly `frames * channels * 2` bytes. hound produces this
// layout; the tests below pin the header bytes so a writer swap would be
// caught.

use std::io::Cursor;

use hound::{SampleFormat, WavSpec, WavWriter};

use crate::buffer::SampleBuffer;
use crate::error::ExportError;

/// Serialize a buffer to an in-memory 16-bit PCM WAV file.
pub fn encode_wav(buffer: &SampleBuffer) -> Result<Vec<u8>, ExportError> {
    let spec = WavSpec {
        channels: buffer.num_channels() as u16,
        sample_rate: buffer.sample_rate(),
        bits_per_sample: 16,
        sample_format: SampleFormat::Int,
    };

    let mut cursor = Cursor::new(Vec::new());
    let mut writer = WavWriter::new(&mut cursor, spec)?;
    for frame in 0..buffer.len() {
        for channel in 0..buffer.num_channels() {
            let sample = buffer.channel(channel)[frame].clamp(-1.0, 1.0);
            writer.write_sample((sample * i16::MAX as f32) as i16)?;
        }
    }
    writer.finalize()?;

    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn read_u32_le(bytes: &[u8], at: usize) -> u32 {
        u32::from_le_bytes(bytes[at..at + 4].try_into().unwrap())
    }

    fn read_u16_le(bytes: &[u8], at: usize) -> u16 {
        u16::from_le_bytes(bytes[at..at + 2].try_into().unwrap())
    }

    #[test]
    fn test_canonical_header_layout() {
        let buffer = SampleBuffer::new(vec![vec![0.0; 100], vec![0.0; 100]], 44100);
        let bytes = encode_wav(&buffer).unwrap();

        assert_eq!(&bytes[0..4], b"RIFF");
        assert_eq!(read_u32_le(&bytes, 4) as usize, bytes.len() - 8);
        assert_eq!(&bytes[8..12], b"WAVE");
        assert_eq!(&bytes[12..16], b"fmt ");
        assert_eq!(read_u32_le(&bytes, 16), 16); // fmt chunk length
        assert_eq!(read_u16_le(&bytes, 20), 1); // PCM
        assert_eq!(read_u16_le(&bytes, 22), 2); // channels
        assert_eq!(read_u32_le(&bytes, 24), 44100); // sample rate
        assert_eq!(read_u32_le(&bytes, 28), 44100 * 2 * 2); // byte rate
        assert_eq!(read_u16_le(&bytes, 32), 4); // block align
        assert_eq!(read_u16_le(&bytes, 34), 16); // bits per sample
        assert_eq!(&bytes[36..40], b"data");
        assert_eq!(read_u32_le(&bytes, 40), 100 * 2 * 2); // data size
        assert_eq!(bytes.len(), 44 + 100 * 2 * 2);
    }

    #[test]
    fn test_samples_interleaved_little_endian() {
        let buffer = SampleBuffer::new(vec![vec![0.5], vec![-0.5]], 44100);
        let bytes = encode_wav(&buffer).unwrap();

        let left = i16::from_le_bytes(bytes[44..46].try_into().unwrap());
        let right = i16::from_le_bytes(bytes[46..48].try_into().unwrap());
        assert_eq!(left, (0.5 * i16::MAX as f32) as i16);
        assert_eq!(right, (-0.5 * i16::MAX as f32) as i16);
    }

    #[test]
    fn test_exported_file_readable_from_disk() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("clip.wav");

        let buffer = SampleBuffer::from_mono(vec![0.25; 500], 48_000);
        std::fs::write(&path, encode_wav(&buffer).unwrap()).unwrap();

        let reader = hound::WavReader::open(&path).unwrap();
        let spec = reader.spec();
        assert_eq!(spec.channels, 1);
        assert_eq!(spec.sample_rate, 48_000);
        assert_eq!(spec.bits_per_sample, 16);
        assert_eq!(reader.len(), 500);
    }

    #[test]
    fn test_out_of_range_samples_are_clamped() {
        let buffer = SampleBuffer::from_mono(vec![2.0, -2.0], 44100);
        let bytes = encode_wav(&buffer).unwrap();

        let first = i16::from_le_bytes(bytes[44..46].try_into().unwrap());
        let second = i16::from_le_bytes(bytes[46..48].try_into().unwrap());
        assert_eq!(first, i16::MAX);
        assert_eq!(second, -i16::MAX);
    }
}
