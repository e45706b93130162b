//! Sensor streaming
//!
//! - Lock-free frame queue between the sensor reader and the classifier
//! - Latest-result handoff to display consumers
//! - JSON recordings for offline replay

pub mod ring_buffer;
pub mod handoff;
pub mod recording;

pub use ring_buffer::{FrameConsumer, FrameProducer, FrameRingBuffer, FrameSlot, StreamStats};
pub use handoff::ClassificationSlot;
pub use recording::{Recording, RecordingMetadata};
