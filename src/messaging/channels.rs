// Lock-free communication channels

use crate::messaging::event::EditorEvent;
use crate::messaging::notification::Notification;
use ringbuf::{traits::Split, HeapRb};

pub type NotificationProducer = ringbuf::HeapProd<Notification>;
pub type NotificationConsumer = ringbuf::HeapCons<Notification>;

pub fn create_notification_channel(
    capacity: usize,
) -> (NotificationProducer, NotificationConsumer) {
    let rb = HeapRb::<Notification>::new(capacity);
    rb.split()
}

pub type EventProducer = ringbuf::HeapProd<EditorEvent>;
pub type EventConsumer = ringbuf::HeapCons<EditorEvent>;

pub fn create_event_channel(capacity: usize) -> (EventProducer, EventConsumer) {
    let rb = HeapRb::<EditorEvent>::new(capacity);
    rb.split()
}
