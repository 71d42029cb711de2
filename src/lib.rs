// waveclip - Sample-accurate, non-destructive audio trimming core
//
// The crate is a library consumed by a thin presentation layer: the core
// owns the sample data, the selection/zoom state and the playback state
// machine, and publishes state changes over lock-free channels. It never
// touches presentation directly.

pub mod buffer;
pub mod codec;
pub mod config;
pub mod edit;
pub mod editor;
pub mod error;
pub mod messaging;
pub mod playback;
pub mod time;
pub mod view;

// Re-export commonly used types for convenience
pub use buffer::{BufferStore, SampleBuffer};
pub use config::EditorConfig;
pub use edit::{HandleSide, Selection};
pub use editor::{AudioEditor, EditorChannels};
pub use error::{DecodeError, EditError, ExportError, PlaybackError};
pub use messaging::channels::{create_event_channel, create_notification_channel};
pub use messaging::event::EditorEvent;
pub use messaging::notification::{Notification, NotificationCategory, NotificationLevel};
pub use playback::controller::{PlayRegion, PlaybackController, PlaybackTick};
pub use playback::offline::{OfflineClock, OfflineSink};
pub use playback::sink::PlaybackSink;
pub use playback::PlaybackState;
pub use view::viewport::Viewport;
pub use view::waveform::WaveformPeaks;
