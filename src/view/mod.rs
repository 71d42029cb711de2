// View module - zoom/scroll state and waveform peak extraction
// Pure with respect to the sample data; the presentation layer owns pixels.

pub mod viewport;
pub mod waveform;

pub use viewport::Viewport;
pub use waveform::WaveformPeaks;
