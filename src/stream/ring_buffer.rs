//! Lock-Free Frame Ring Buffer
//!
//! SPSC (Single Producer, Single Consumer) queue between the sensor reader
//! and the classification loop.
//!
//! Architecture:
//! - Producer (sensor reader): never blocks, drops frames when full
//! - Consumer (classifier): drains frames at its own pace
//!
//! The core queue is `rtrb`; this wrapper adds sequence numbers and shared
//! statistics.

use crate::gesture::SensorFrame;
use rtrb::{Consumer, Producer, RingBuffer};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

/// Default ring buffer capacity (must be power of 2)
pub const DEFAULT_CAPACITY: usize = 1024;

/// A frame tagged with its arrival order
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FrameSlot {
    pub frame: SensorFrame,
    /// Position in the producer's stream, counting only accepted frames
    pub sequence: u64,
}

/// Ring buffer statistics for monitoring
#[derive(Debug, Default)]
pub struct StreamStats {
    /// Total frames pushed
    pub frames_pushed: AtomicU64,
    /// Frames dropped due to full buffer
    pub frames_dropped: AtomicU64,
    /// Frames taken by the consumer
    pub frames_consumed: AtomicU64,
    /// Peak buffer occupancy
    pub peak_occupancy: AtomicU64,
}

impl StreamStats {
    pub fn pushed(&self) -> u64 {
        self.frames_pushed.load(Ordering::Relaxed)
    }

    pub fn dropped(&self) -> u64 {
        self.frames_dropped.load(Ordering::Relaxed)
    }

    pub fn consumed(&self) -> u64 {
        self.frames_consumed.load(Ordering::Relaxed)
    }

    pub fn peak(&self) -> u64 {
        self.peak_occupancy.load(Ordering::Relaxed)
    }
}

/// Unsplit frame ring buffer
pub struct FrameRingBuffer {
    producer: Producer<FrameSlot>,
    consumer: Consumer<FrameSlot>,
    stats: Arc<StreamStats>,
    capacity: usize,
}

impl FrameRingBuffer {
    /// Create a ring buffer with the default capacity
    pub fn new() -> Self {
        let (producer, consumer) = RingBuffer::new(DEFAULT_CAPACITY);
        Self {
            producer,
            consumer,
            stats: Arc::new(StreamStats::default()),
            capacity: DEFAULT_CAPACITY,
        }
    }

    /// Create a ring buffer with the given capacity, which must be a power of 2
    pub fn with_capacity(capacity: usize) -> crate::Result<Self> {
        if !capacity.is_power_of_two() {
            return Err(crate::Error::Configuration(format!(
                "Ring buffer capacity must be a power of 2, got {}",
                capacity
            )));
        }

        let (producer, consumer) = RingBuffer::new(capacity);
        Ok(Self {
            producer,
            consumer,
            stats: Arc::new(StreamStats::default()),
            capacity,
        })
    }

    /// Split into the producer half (sensor thread) and consumer half
    /// (classification thread)
    pub fn split(self) -> (FrameProducer, FrameConsumer) {
        (
            FrameProducer {
                inner: self.producer,
                sequence: 0,
                stats: Arc::clone(&self.stats),
                capacity: self.capacity,
            },
            FrameConsumer {
                inner: self.consumer,
                stats: self.stats,
            },
        )
    }

    pub fn capacity(&self) -> usize {
        self.capacity
    }

    pub fn stats(&self) -> Arc<StreamStats> {
        Arc::clone(&self.stats)
    }
}

impl Default for FrameRingBuffer {
    fn default() -> Self {
        Self::new()
    }
}

/// Producer half of the ring buffer
pub struct FrameProducer {
    inner: Producer<FrameSlot>,
    sequence: u64,
    stats: Arc<StreamStats>,
    capacity: usize,
}

impl FrameProducer {
    /// Push a frame without blocking.
    ///
    /// Returns false and counts a drop if the buffer is full.
    #[inline]
    pub fn push(&mut self, frame: SensorFrame) -> bool {
        let slot = FrameSlot {
            frame,
            sequence: self.sequence,
        };

        match self.inner.push(slot) {
            Ok(()) => {
                self.sequence += 1;
                self.stats.frames_pushed.fetch_add(1, Ordering::Relaxed);

                let occupied = (self.capacity - self.inner.slots()) as u64;
                self.stats.peak_occupancy.fetch_max(occupied, Ordering::Relaxed);
                true
            }
            Err(_) => {
                self.stats.frames_dropped.fetch_add(1, Ordering::Relaxed);
                false
            }
        }
    }

    #[inline]
    pub fn available_slots(&self) -> usize {
        self.inner.slots()
    }

    #[inline]
    pub fn is_full(&self) -> bool {
        self.inner.is_full()
    }

    /// True once the consumer half has been dropped
    pub fn is_abandoned(&self) -> bool {
        self.inner.is_abandoned()
    }

    /// Sequence number the next accepted frame will get
    #[inline]
    pub fn sequence(&self) -> u64 {
        self.sequence
    }

    pub fn stats(&self) -> Arc<StreamStats> {
        Arc::clone(&self.stats)
    }
}

/// Consumer half of the ring buffer
pub struct FrameConsumer {
    inner: Consumer<FrameSlot>,
    stats: Arc<StreamStats>,
}

impl FrameConsumer {
    /// Pop the oldest frame, if any
    #[inline]
    pub fn pop(&mut self) -> Option<FrameSlot> {
        match self.inner.pop() {
            Ok(slot) => {
                self.stats.frames_consumed.fetch_add(1, Ordering::Relaxed);
                Some(slot)
            }
            Err(_) => None,
        }
    }

    #[inline]
    pub fn peek(&self) -> Option<&FrameSlot> {
        self.inner.peek().ok()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }

    /// Number of frames waiting
    #[inline]
    pub fn available(&self) -> usize {
        self.inner.slots()
    }

    /// True once the producer half has been dropped
    pub fn is_abandoned(&self) -> bool {
        self.inner.is_abandoned()
    }

    /// Pop up to `max_count` frames (batch processing)
    pub fn pop_batch(&mut self, max_count: usize) -> Vec<FrameSlot> {
        let mut batch = Vec::with_capacity(max_count.min(self.available()));
        while batch.len() < max_count {
            match self.pop() {
                Some(slot) => batch.push(slot),
                None => break,
            }
        }
        batch
    }
}
