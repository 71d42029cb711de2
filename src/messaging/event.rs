// Editor state-change events
//
// The core holds no references to presentation elements; it emits these
// events and a separate presentation layer repositions handles, redraws the
// waveform, or moves the playback indicator in response.

use crate::playback::PlaybackState;

/// State-change notification published by the editor.
#[derive(Debug, Clone, PartialEq)]
pub enum EditorEvent {
    /// The active buffer was replaced (load, edit, or reset).
    BufferReplaced {
        duration_secs: f64,
        sample_rate: u32,
        channels: usize,
    },
    /// Trim handles moved or were reset.
    SelectionChanged { left_pct: f64, right_pct: f64 },
    /// Zoom level or scroll offset changed.
    ViewChanged { zoom_level: f64, zoom_offset: f64 },
    /// Playback position advanced. `percent_x` is the indicator position in
    /// the current view, clamped to [0, 100].
    PositionChanged { seconds: f64, percent_x: f64 },
    /// The playback state machine transitioned.
    PlaybackStateChanged(PlaybackState),
}
