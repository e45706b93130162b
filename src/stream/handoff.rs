//! Latest-classification handoff
//!
//! The classification loop publishes each completed cycle; a display thread
//! reads whatever is newest. Older unread results are overwritten.

use crate::gesture::Classification;
use parking_lot::Mutex;
use std::sync::Arc;

/// Single-slot, overwrite-on-publish mailbox
#[derive(Debug, Clone, Default)]
pub struct ClassificationSlot {
    inner: Arc<Mutex<SlotState>>,
}

#[derive(Debug, Default)]
struct SlotState {
    latest: Option<Classification>,
    published: u64,
}

impl ClassificationSlot {
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the stored result
    pub fn publish(&self, classification: Classification) {
        let mut state = self.inner.lock();
        state.latest = Some(classification);
        state.published += 1;
    }

    /// Newest result, left in place
    pub fn latest(&self) -> Option<Classification> {
        self.inner.lock().latest
    }

    /// Newest result, leaving the slot empty
    pub fn take(&self) -> Option<Classification> {
        self.inner.lock().latest.take()
    }

    /// Results published so far, including overwritten ones
    pub fn published(&self) -> u64 {
        self.inner.lock().published
    }
}
