// Crate-wide error taxonomy
//
// Every error here is terminal for the operation that raised it: the caller's
// state is left untouched and the failure is surfaced to the user through a
// notification. The only transparent retry in the crate is the single
// resume-then-retry step the playback sink performs on a stalled stream.

use thiserror::Error;

/// Errors raised while decoding container bytes into a sample buffer.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("Unrecognized audio container")]
    UnknownFormat,

    #[error("Decoded stream contains no samples")]
    EmptyStream,

    #[error("Unsupported bit depth: {0}")]
    UnsupportedBitDepth(u16),

    #[error("WAV decode error: {0}")]
    Wav(#[from] hound::Error),

    #[error("FLAC decode error: {0}")]
    Flac(#[from] claxon::Error),

    #[error("Compressed audio decode error: {0}")]
    Compressed(#[from] symphonia::core::errors::Error),
}

/// Errors raised by destructive edit operations.
#[derive(Debug, Error, PartialEq)]
pub enum EditError {
    #[error("Region too small to edit ({got:.3}s, minimum {min:.3}s)")]
    RegionTooSmall { got: f64, min: f64 },

    #[error("Deleting this region would leave an empty buffer")]
    WouldEmptyBuffer,

    #[error("Invalid playback rate: {0}")]
    InvalidRate(f64),

    #[error("No audio is loaded")]
    NoAudioLoaded,
}

/// Errors raised by the playback controller and its output sink.
#[derive(Debug, Error)]
pub enum PlaybackError {
    #[error("Playback region too short ({got:.3}s, minimum {min:.3}s)")]
    RegionInvalid { got: f64, min: f64 },

    #[error("No audio is loaded")]
    NoAudioLoaded,

    #[error("Audio output error: {0}")]
    Subsystem(String),
}

/// Errors raised while serializing the active buffer.
#[derive(Debug, Error)]
pub enum ExportError {
    #[error("No audio is loaded")]
    NoAudioLoaded,

    #[error("WAV write error: {0}")]
    Wav(#[from] hound::Error),
}
