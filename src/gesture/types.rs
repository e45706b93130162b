//! Gesture data types
//!
//! Sensor frames entering the classifier and the gesture labels leaving it.

use serde::{Deserialize, Serialize};
use std::fmt;

/// One calibrated reading per sensor channel for a single tick
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SensorFrame {
    /// Linear acceleration, device X axis (g)
    pub acceleration_x: f64,
    /// Linear acceleration, device Y axis (g)
    pub acceleration_y: f64,
    /// Linear acceleration, device Z axis (g)
    pub acceleration_z: f64,
    /// Rotation from the reference attitude around X (degrees)
    pub angle_x: f64,
    /// Rotation from the reference attitude around Y (degrees)
    pub angle_y: f64,
    /// Rotation from the reference attitude around Z (degrees)
    pub angle_z: f64,
    /// Squared magnitude of the acceleration vector
    pub magnitude: f64,
}

/// Number of sensor channels in a frame
pub const CHANNEL_COUNT: usize = 7;

impl SensorFrame {
    /// Channel values in a fixed order matching [`from_channels`](Self::from_channels)
    pub fn channels(&self) -> [f64; CHANNEL_COUNT] {
        [
            self.acceleration_x,
            self.acceleration_y,
            self.acceleration_z,
            self.angle_x,
            self.angle_y,
            self.angle_z,
            self.magnitude,
        ]
    }

    pub fn from_channels(values: [f64; CHANNEL_COUNT]) -> Self {
        Self {
            acceleration_x: values[0],
            acceleration_y: values[1],
            acceleration_z: values[2],
            angle_x: values[3],
            angle_y: values[4],
            angle_z: values[5],
            magnitude: values[6],
        }
    }

    /// Reject frames carrying NaN or infinite readings
    pub fn validate(&self) -> crate::Result<()> {
        if let Some(value) = self.channels().iter().find(|v| !v.is_finite()) {
            return Err(crate::Error::Stream(format!(
                "sensor frame contains non-finite value {}",
                value
            )));
        }
        Ok(())
    }
}

/// Gesture categories, in output band order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GestureType {
    None,
    StepBackward,
    StepForward,
    Jump,
    StepLeft,
    StepRight,
    Shake,
    Squat,
    TurnLeft,
    TurnRight,
}

impl GestureType {
    /// All gestures; band `k` of the output score is `ALL[k + 1]`
    pub const ALL: [GestureType; 10] = [
        GestureType::None,
        GestureType::StepBackward,
        GestureType::StepForward,
        GestureType::Jump,
        GestureType::StepLeft,
        GestureType::StepRight,
        GestureType::Shake,
        GestureType::Squat,
        GestureType::TurnLeft,
        GestureType::TurnRight,
    ];

    /// Map a defuzzified score onto a gesture.
    ///
    /// Negative and non-finite scores are `None`; otherwise the score is
    /// floored onto its unit-width band and clamped to the last gesture.
    pub fn from_score(score: f64) -> Self {
        if !score.is_finite() || score < 0.0 {
            return GestureType::None;
        }
        let band = (score.floor() as usize).min(Self::ALL.len() - 2);
        Self::ALL[band + 1]
    }

    /// Output set name for this gesture
    pub fn set_name(&self) -> &'static str {
        match self {
            GestureType::None => "None",
            GestureType::StepBackward => "StepBackward",
            GestureType::StepForward => "StepForward",
            GestureType::Jump => "Jump",
            GestureType::StepLeft => "StepLeft",
            GestureType::StepRight => "StepRight",
            GestureType::Shake => "Shake",
            GestureType::Squat => "Squat",
            GestureType::TurnLeft => "TurnLeft",
            GestureType::TurnRight => "TurnRight",
        }
    }

    /// Score band `[start, start + 1]` owned by this gesture
    pub fn band(&self) -> (f64, f64) {
        let index = Self::ALL
            .iter()
            .position(|g| g == self)
            .unwrap_or(0);
        let start = index as f64 - 1.0;
        (start, start + 1.0)
    }
}

impl fmt::Display for GestureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.set_name())
    }
}

/// Result of classifying one frame
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Classification {
    /// Frames classified so far, including this one
    pub tick: u64,
    /// Defuzzified output score
    pub score: f64,
    /// Gesture owning the score's band
    pub gesture: GestureType,
}
