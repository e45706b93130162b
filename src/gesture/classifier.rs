//! Gesture Classifier
//!
//! Drives one inference cycle per sensor frame:
//!
//! ```text
//! SensorFrame ─▶ ChannelFilters ─▶ inputs ─▶ rule base ─▶ centroid ─▶ GestureType
//!                 (optional)
//! ```

use super::filter::ChannelFilters;
use super::profile::{self, GESTURE_OUTPUT};
use super::types::{Classification, GestureType, SensorFrame};
use crate::app::config::Config;
use crate::fuzzy::FuzzyController;
use tracing::debug;

/// Classifies sensor frames with a fuzzy controller
#[derive(Debug, Clone)]
pub struct GestureClassifier {
    controller: FuzzyController,
    filters: Option<ChannelFilters>,
    ticks: u64,
}

impl GestureClassifier {
    /// Classifier over the standard gesture profile
    pub fn new(config: &Config) -> crate::Result<Self> {
        config.validate()?;
        let controller = profile::standard_controller(&config.engine)?;
        let filters = config.filter.enabled.then(|| ChannelFilters::new(&config.filter));
        Ok(Self::from_controller(controller, filters))
    }

    /// Classifier over a caller-built controller. The controller must expose
    /// the seven standard input names and the `GestureType` output.
    pub fn from_controller(controller: FuzzyController, filters: Option<ChannelFilters>) -> Self {
        Self {
            controller,
            filters,
            ticks: 0,
        }
    }

    /// Run one cycle over `frame`
    pub fn classify(&mut self, frame: &SensorFrame) -> crate::Result<Classification> {
        frame.validate()?;

        let frame = match self.filters.as_mut() {
            Some(filters) => filters.apply(frame),
            None => *frame,
        };

        profile::apply_frame(&mut self.controller, &frame)?;
        self.controller.run_cycle()?;
        let score = self.controller.output_value(GESTURE_OUTPUT)?;
        let gesture = GestureType::from_score(score);

        self.ticks += 1;
        debug!(tick = self.ticks, score, gesture = %gesture, "Classified frame");

        Ok(Classification {
            tick: self.ticks,
            score,
            gesture,
        })
    }

    pub fn controller(&self) -> &FuzzyController {
        &self.controller
    }

    pub fn controller_mut(&mut self) -> &mut FuzzyController {
        &mut self.controller
    }

    pub fn is_filtering(&self) -> bool {
        self.filters.is_some()
    }

    /// Frames classified since construction or the last reset
    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    /// Reset the smoothing state and tick counter. The controller keeps its
    /// last output, as a restarted capture would.
    pub fn reset(&mut self) {
        if let Some(filters) = self.filters.as_mut() {
            filters.reset();
        }
        self.ticks = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn raw_config() -> Config {
        let mut config = Config::default();
        config.filter.enabled = false;
        config
    }

    #[test]
    fn test_classify_shake() {
        let mut classifier = GestureClassifier::new(&raw_config()).unwrap();
        let result = classifier
            .classify(&SensorFrame {
                magnitude: 1.2,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(result.tick, 1);
        assert_eq!(result.gesture, GestureType::Shake);
        assert!((5.0..=6.0).contains(&result.score));
    }

    #[test]
    fn test_tick_counter_and_reset() {
        let mut classifier = GestureClassifier::new(&Config::default()).unwrap();
        assert!(classifier.is_filtering());
        for _ in 0..3 {
            classifier.classify(&SensorFrame::default()).unwrap();
        }
        assert_eq!(classifier.ticks(), 3);
        classifier.reset();
        assert_eq!(classifier.ticks(), 0);
        assert_eq!(classifier.classify(&SensorFrame::default()).unwrap().tick, 1);
    }

    #[test]
    fn test_hold_last_score_when_no_rule_fires() {
        let mut classifier = GestureClassifier::new(&raw_config()).unwrap();
        let shake = classifier
            .classify(&SensorFrame {
                magnitude: 1.2,
                ..Default::default()
            })
            .unwrap();

        // Magnitude between the Zero and HighPos sets and no axis active
        let idle = classifier
            .classify(&SensorFrame {
                magnitude: 0.75,
                ..Default::default()
            })
            .unwrap();
        assert_eq!(idle.score, shake.score);
        assert_eq!(idle.gesture, GestureType::Shake);
    }

    #[test]
    fn test_filter_smooths_spike() {
        let mut classifier = GestureClassifier::new(&Config::default()).unwrap();
        let rest = SensorFrame {
            magnitude: 0.25,
            ..Default::default()
        };
        assert_eq!(classifier.classify(&rest).unwrap().gesture, GestureType::None);

        // A single-tick spike is pulled towards the resting estimate
        let spike = SensorFrame {
            acceleration_y: 0.375,
            ..rest
        };
        let result = classifier.classify(&spike).unwrap();
        assert_ne!(result.gesture, GestureType::StepForward);
    }

    #[test]
    fn test_rejects_non_finite_frame() {
        let mut classifier = GestureClassifier::new(&raw_config()).unwrap();
        let frame = SensorFrame {
            acceleration_x: f64::INFINITY,
            ..Default::default()
        };
        assert!(matches!(classifier.classify(&frame), Err(crate::Error::Stream(_))));
        assert_eq!(classifier.ticks(), 0);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let mut config = Config::default();
        config.engine.defuzzify_samples = 0;
        assert!(GestureClassifier::new(&config).is_err());
    }

    #[test]
    fn test_missing_output_reports_name() {
        let mut classifier = GestureClassifier::from_controller(FuzzyController::new(), None);
        let err = classifier.classify(&SensorFrame::default()).unwrap_err();
        assert_eq!(err.missing_name(), Some("AccelerometerX"));
    }
}
