// Buffer module - sample data ownership
// The store is the only legal mutation path for the active buffer.

pub mod sample_buffer;
pub mod store;

pub use sample_buffer::SampleBuffer;
pub use store::BufferStore;
