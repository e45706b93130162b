//! # Gesture Fuzzy
//!
//! A Mamdani-style fuzzy inference engine that classifies a continuous
//! stream of motion-sensor readings into discrete gestures.
//!
//! ## Overview
//!
//! Crisp sensor values (accelerations, rotation angles, acceleration
//! magnitude) are fuzzified against named linguistic sets, combined through
//! an ordered rule base, and defuzzified back into a crisp score. The score
//! falls into a band that identifies the most likely gesture.
//!
//! ## Quick Start
//!
//! ```no_run
//! use gesture_fuzzy::app::config::Config;
//! use gesture_fuzzy::gesture::{GestureClassifier, SensorFrame};
//!
//! let config = Config::default();
//! let mut classifier = GestureClassifier::new(&config).expect("valid profile");
//!
//! let frame = SensorFrame {
//!     magnitude: 12.0,
//!     ..Default::default()
//! };
//! let result = classifier.classify(&frame).expect("classify");
//! println!("{:?} (score {:.3})", result.gesture, result.score);
//! ```
//!
//! ## Architecture
//!
//! - [`fuzzy`]: membership functions, sets, variables, rules, rule base, controller
//! - [`gesture`]: the motion-gesture profile, channel smoothing and the classifier
//! - [`stream`]: frame ring buffer, result handoff and JSON recordings
//! - [`app`]: CLI and configuration management
//!
//! ## Inference Cycle
//!
//! ```text
//! ┌─────────────┐    ┌─────────────┐    ┌─────────────┐    ┌─────────────┐
//! │ SensorFrame │───▶│  Smoothing  │───▶│  set_input  │───▶│  run_cycle  │
//! │             │    │  (Kalman)   │    │ (fuzzify)   │    │ reset+fire  │
//! └─────────────┘    └─────────────┘    └─────────────┘    └─────────────┘
//!                                                                 │
//!                                                                 ▼
//!                                       ┌─────────────┐    ┌─────────────┐
//!                                       │ GestureType │◀───│  defuzzify  │
//!                                       │  (bucket)   │    │ (centroid)  │
//!                                       └─────────────┘    └─────────────┘
//! ```

pub mod fuzzy;
pub mod gesture;
pub mod stream;
pub mod app;

use std::fmt;

// Re-export commonly used types
pub use fuzzy::{
    Clause, FuzzyController, FuzzyOperator, FuzzyRule, FuzzyRuleBase, FuzzySet, FuzzyVariable,
    MembershipFunction,
};
pub use gesture::{Classification, GestureClassifier, GestureType, SensorFrame};

/// Result type alias for the engine
pub type Result<T> = std::result::Result<T, Error>;

/// What kind of name a failed lookup was for
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LookupKind {
    /// A fuzzy set inside a variable
    Set,
    /// A registered input variable
    InputVariable,
    /// A registered output variable
    OutputVariable,
}

impl fmt::Display for LookupKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LookupKind::Set => write!(f, "Fuzzy set"),
            LookupKind::InputVariable => write!(f, "Input variable"),
            LookupKind::OutputVariable => write!(f, "Output variable"),
        }
    }
}

/// Error types for the engine
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{kind} '{name}' not found")]
    NotFound { kind: LookupKind, name: String },

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error("Stream error: {0}")]
    Stream(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl Error {
    pub(crate) fn set_not_found(name: &str) -> Self {
        Error::NotFound {
            kind: LookupKind::Set,
            name: name.to_string(),
        }
    }

    /// The offending name, for `NotFound` errors
    pub fn missing_name(&self) -> Option<&str> {
        match self {
            Error::NotFound { name, .. } => Some(name),
            _ => None,
        }
    }
}
