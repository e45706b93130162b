//! Per-channel smoothing
//!
//! Constant-value scalar Kalman filter applied independently to every sensor
//! channel before the frame reaches the fuzzy controller.

use super::types::{SensorFrame, CHANNEL_COUNT};
use crate::app::config::FilterConfig;

/// Scalar Kalman filter with a constant-value process model
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct KalmanFilter {
    /// Process noise variance
    q: f64,
    /// Measurement noise variance
    r: f64,
    /// Current estimate
    x: f64,
    /// Estimate variance
    p: f64,
    initialized: bool,
}

impl KalmanFilter {
    pub fn new(process_noise: f64, measurement_noise: f64) -> Self {
        Self {
            q: process_noise,
            r: measurement_noise,
            x: 0.0,
            p: measurement_noise,
            initialized: false,
        }
    }

    /// Fold a measurement into the estimate and return the new estimate.
    /// The first measurement seeds the estimate unchanged.
    pub fn update(&mut self, measurement: f64) -> f64 {
        if !self.initialized {
            self.x = measurement;
            self.p = self.r;
            self.initialized = true;
            return self.x;
        }

        // Predict
        self.p += self.q;

        // Update
        let gain = self.p / (self.p + self.r);
        self.x += gain * (measurement - self.x);
        self.p *= 1.0 - gain;
        self.x
    }

    pub fn estimate(&self) -> f64 {
        self.x
    }

    pub fn variance(&self) -> f64 {
        self.p
    }

    pub fn is_initialized(&self) -> bool {
        self.initialized
    }

    /// Forget all measurements; the next update seeds again
    pub fn reset(&mut self) {
        *self = Self::new(self.q, self.r);
    }
}

/// One filter per sensor channel
#[derive(Debug, Clone)]
pub struct ChannelFilters {
    filters: [KalmanFilter; CHANNEL_COUNT],
}

impl ChannelFilters {
    pub fn new(config: &FilterConfig) -> Self {
        Self {
            filters: [KalmanFilter::new(config.process_noise, config.measurement_noise); CHANNEL_COUNT],
        }
    }

    /// Smooth every channel of `frame`
    pub fn apply(&mut self, frame: &SensorFrame) -> SensorFrame {
        let raw = frame.channels();
        let mut smoothed = [0.0; CHANNEL_COUNT];
        for ((out, filter), value) in smoothed.iter_mut().zip(self.filters.iter_mut()).zip(raw) {
            *out = filter.update(value);
        }
        SensorFrame::from_channels(smoothed)
    }

    pub fn reset(&mut self) {
        self.filters.iter_mut().for_each(KalmanFilter::reset);
    }
}
