//! Gesture classification
//!
//! Maps calibrated motion-sensor frames onto gesture labels through the
//! fuzzy engine:
//! - Sensor frame and gesture types, score bucketing
//! - The standard motion-gesture profile (variables and rules)
//! - Per-channel Kalman smoothing
//! - The classifier tying them together

pub mod types;
pub mod profile;
pub mod filter;
pub mod classifier;

pub use types::{Classification, GestureType, SensorFrame, CHANNEL_COUNT};
pub use profile::{standard_controller, GESTURE_OUTPUT, INPUT_NAMES};
pub use filter::{ChannelFilters, KalmanFilter};
pub use classifier::GestureClassifier;
