// Buffer store - original/active buffer ownership
//
// The store owns two handles: the original buffer from the last successful
// decode (immutable for the life of the session) and the active buffer the
// rest of the editor reads. Until the first edit both point at the same
// allocation. Edits replace the active handle wholesale; nothing in the
// crate mutates sample data behind a shared reference.

use std::sync::Arc;

use crate::buffer::SampleBuffer;

/// Owner of the original and active sample buffers.
#[derive(Debug, Default)]
pub struct BufferStore {
    original: Option<Arc<SampleBuffer>>,
    active: Option<Arc<SampleBuffer>>,
}

impl BufferStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Install a freshly decoded buffer, discarding any prior session.
    /// Original and active share the same allocation until the first edit.
    pub fn load(&mut self, buffer: SampleBuffer) {
        let buffer = Arc::new(buffer);
        self.original = Some(Arc::clone(&buffer));
        self.active = Some(buffer);
    }

    /// Replace the active buffer with an edit result.
    ///
    /// The caller (the edit engine) is responsible for the buffer being
    /// non-empty with the session's sample rate and channel count.
    pub fn replace(&mut self, buffer: SampleBuffer) {
        debug_assert!(!buffer.is_empty(), "active buffer must stay non-empty");
        self.active = Some(Arc::new(buffer));
    }

    /// Set the active buffer back to the original. No-op when nothing is
    /// loaded ("undo all edits in one step"; there is no incremental undo).
    pub fn reset(&mut self) {
        if let Some(original) = &self.original {
            self.active = Some(Arc::clone(original));
        }
    }

    /// Discard all buffers (tool teardown / before a new load).
    pub fn clear(&mut self) {
        self.original = None;
        self.active = None;
    }

    pub fn is_loaded(&self) -> bool {
        self.active.is_some()
    }

    pub fn active(&self) -> Option<&Arc<SampleBuffer>> {
        self.active.as_ref()
    }

    pub fn original(&self) -> Option<&Arc<SampleBuffer>> {
        self.original.as_ref()
    }

    /// Duration of the active buffer in seconds, 0.0 when nothing is loaded.
    pub fn duration_secs(&self) -> f64 {
        self.active.as_ref().map_or(0.0, |b| b.duration_secs())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn one_second_mono() -> SampleBuffer {
        SampleBuffer::from_mono(vec![0.1; 44100], 44100)
    }

    #[test]
    fn test_load_shares_allocation() {
        let mut store = BufferStore::new();
        store.load(one_second_mono());

        let original = store.original().unwrap();
        let active = store.active().unwrap();
        assert!(Arc::ptr_eq(original, active));
    }

    #[test]
    fn test_replace_keeps_original() {
        let mut store = BufferStore::new();
        store.load(one_second_mono());

        store.replace(SampleBuffer::from_mono(vec![0.2; 22050], 44100));
        assert_eq!(store.active().unwrap().len(), 22050);
        assert_eq!(store.original().unwrap().len(), 44100);
    }

    #[test]
    fn test_reset_restores_original() {
        let mut store = BufferStore::new();
        store.load(one_second_mono());
        store.replace(SampleBuffer::from_mono(vec![0.2; 22050], 44100));

        store.reset();
        let original = store.original().unwrap();
        let active = store.active().unwrap();
        assert!(Arc::ptr_eq(original, active));
        assert_eq!(active.len(), 44100);
    }

    #[test]
    fn test_reset_without_load_is_noop() {
        let mut store = BufferStore::new();
        store.reset();
        assert!(!store.is_loaded());
        assert_eq!(store.duration_secs(), 0.0);
    }
}
