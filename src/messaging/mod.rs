// Messaging module - notifications and the view-adapter event channel
// The core publishes here; a presentation layer subscribes. Lock-free SPSC.

pub mod channels;
pub mod event;
pub mod notification;

pub use channels::{create_event_channel, create_notification_channel};
pub use event::EditorEvent;
pub use notification::{Notification, NotificationCategory, NotificationLevel};
