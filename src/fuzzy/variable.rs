//! Fuzzy Variable
//!
//! A named collection of fuzzy sets sharing one crisp input channel.
//! Input variables are fuzzified through [`FuzzyVariable::set_input`];
//! output variables collect rule strengths and are turned back into a crisp
//! value by centroid defuzzification.

use super::set::FuzzySet;
use indexmap::IndexMap;

/// Default number of sampling intervals per set during defuzzification
pub const DEFAULT_DEFUZZIFY_SAMPLES: usize = 100;

/// Total weight below which defuzzification keeps the previous output
pub const MIN_TOTAL_WEIGHT: f64 = 1e-6;

/// A linguistic variable with uniquely named sets
#[derive(Debug, Clone)]
pub struct FuzzyVariable {
    name: String,
    sets: IndexMap<String, FuzzySet>,
    current_input: f64,
    /// Result of the last defuzzification that had a non-degenerate weight
    last_output: f64,
}

impl FuzzyVariable {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            sets: IndexMap::new(),
            current_input: 0.0,
            last_output: 0.0,
        }
    }

    /// Builder form of [`add_set`](Self::add_set)
    pub fn with_set(mut self, name: impl Into<String>, set: FuzzySet) -> Self {
        self.add_set(name, set);
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Register a set, replacing any set already under `name`.
    ///
    /// Returns the replaced set. The new set's cached membership is brought
    /// up to date with the current input.
    pub fn add_set(&mut self, name: impl Into<String>, mut set: FuzzySet) -> Option<FuzzySet> {
        set.refresh_membership(self.current_input);
        self.sets.insert(name.into(), set)
    }

    /// Store a crisp input and recompute every set's membership
    pub fn set_input(&mut self, value: f64) {
        self.current_input = value;
        for set in self.sets.values_mut() {
            set.refresh_membership(value);
        }
    }

    pub fn input(&self) -> f64 {
        self.current_input
    }

    /// Membership of the current input in `set_name`
    pub fn membership_of(&self, set_name: &str) -> crate::Result<f64> {
        self.set(set_name).map(FuzzySet::cached_membership)
    }

    /// Write a consequent strength into `set_name`
    pub fn set_output_strength(&mut self, set_name: &str, value: f64) -> crate::Result<()> {
        let set = self
            .sets
            .get_mut(set_name)
            .ok_or_else(|| crate::Error::set_not_found(set_name))?;
        set.set_output_strength(value);
        Ok(())
    }

    pub fn output_strength(&self, set_name: &str) -> crate::Result<f64> {
        self.set(set_name).map(FuzzySet::output_strength)
    }

    /// Zero the strength of every set
    pub fn reset_output_strengths(&mut self) {
        for set in self.sets.values_mut() {
            set.set_output_strength(0.0);
        }
    }

    /// Centroid defuzzification with [`DEFAULT_DEFUZZIFY_SAMPLES`]
    pub fn defuzzify(&mut self) -> f64 {
        self.defuzzify_with_samples(DEFAULT_DEFUZZIFY_SAMPLES)
    }

    /// Centroid of area over the union of all sets.
    ///
    /// Each set is sampled at `num_samples + 1` evenly spaced points across
    /// its range, weighting every sample by `membership * output_strength`.
    /// When the total weight is not above [`MIN_TOTAL_WEIGHT`] the previous
    /// result is returned unchanged (0.0 before any successful call).
    pub fn defuzzify_with_samples(&mut self, num_samples: usize) -> f64 {
        let intervals = num_samples.max(1);
        let mut weighted_sum = 0.0;
        let mut total_weight = 0.0;

        for set in self.sets.values() {
            let strength = set.output_strength();
            let step = (set.range_max() - set.range_min()) / intervals as f64;
            for i in 0..=intervals {
                let x = set.range_min() + i as f64 * step;
                let weight = set.membership_function().evaluate(x) * strength;
                weighted_sum += x * weight;
                total_weight += weight;
            }
        }

        if total_weight.abs() > MIN_TOTAL_WEIGHT {
            self.last_output = weighted_sum / total_weight;
        }
        self.last_output
    }

    /// Value returned by the most recent defuzzification
    pub fn last_output(&self) -> f64 {
        self.last_output
    }

    /// Names of all registered sets
    pub fn set_names(&self) -> impl Iterator<Item = &str> {
        self.sets.keys().map(String::as_str)
    }

    pub fn sets(&self) -> impl Iterator<Item = (&str, &FuzzySet)> {
        self.sets.iter().map(|(name, set)| (name.as_str(), set))
    }

    pub fn set(&self, set_name: &str) -> crate::Result<&FuzzySet> {
        self.sets
            .get(set_name)
            .ok_or_else(|| crate::Error::set_not_found(set_name))
    }

    pub fn contains_set(&self, set_name: &str) -> bool {
        self.sets.contains_key(set_name)
    }

    /// Cached membership of the current input for every set
    pub fn memberships(&self) -> Vec<(&str, f64)> {
        self.sets
            .iter()
            .map(|(name, set)| (name.as_str(), set.cached_membership()))
            .collect()
    }

    /// Set with the highest membership for the current input
    pub fn dominant_set(&self) -> Option<(&str, f64)> {
        self.memberships()
            .into_iter()
            .max_by(|a, b| a.1.partial_cmp(&b.1).unwrap_or(std::cmp::Ordering::Equal))
    }

    pub fn len(&self) -> usize {
        self.sets.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sets.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fuzzy::membership::MembershipFunction;
    use crate::{Error, LookupKind};

    fn magnitude() -> FuzzyVariable {
        FuzzyVariable::new("Magnitude")
            .with_set("Zero", FuzzySet::triangular(0.0, 0.25, 0.5).unwrap())
            .with_set("LowPos", FuzzySet::triangular(0.5, 0.75, 1.0).unwrap())
            .with_set("HighPos", FuzzySet::triangular(1.0, 10.0, 25.0).unwrap())
    }

    #[test]
    fn test_set_input_refreshes_every_set() {
        let mut var = magnitude();
        var.set_input(0.25);
        assert_eq!(var.membership_of("Zero").unwrap(), 1.0);
        assert_eq!(var.membership_of("LowPos").unwrap(), 0.0);
        assert_eq!(var.membership_of("HighPos").unwrap(), 0.0);

        var.set_input(10.0);
        assert_eq!(var.membership_of("Zero").unwrap(), 0.0);
        assert_eq!(var.membership_of("HighPos").unwrap(), 1.0);
    }

    #[test]
    fn test_membership_of_unknown_set() {
        let var = magnitude();
        let err = var.membership_of("DoesNotExist").unwrap_err();
        match err {
            Error::NotFound { kind, name } => {
                assert_eq!(kind, LookupKind::Set);
                assert_eq!(name, "DoesNotExist");
            }
            other => panic!("Expected NotFound, got {:?}", other),
        }
    }

    #[test]
    fn test_set_output_strength_unknown_set() {
        let mut var = magnitude();
        let err = var.set_output_strength("Nope", 0.5).unwrap_err();
        assert_eq!(err.missing_name(), Some("Nope"));
    }

    #[test]
    fn test_add_set_replaces_existing() {
        let mut var = magnitude();
        let replaced = var.add_set("Zero", FuzzySet::triangular(-1.0, 0.0, 1.0).unwrap());
        assert!(replaced.is_some());
        assert_eq!(var.len(), 3);
        assert_eq!(var.set("Zero").unwrap().range_min(), -1.0);
    }

    #[test]
    fn test_add_set_after_input_is_current() {
        let mut var = FuzzyVariable::new("X");
        var.set_input(1.0);
        var.add_set("Mid", FuzzySet::triangular(0.0, 1.0, 2.0).unwrap());
        assert_eq!(var.membership_of("Mid").unwrap(), 1.0);
    }

    #[test]
    fn test_defuzzify_symmetric_set_returns_apex() {
        let mut var = FuzzyVariable::new("Out")
            .with_set("Shake", FuzzySet::triangular(5.0, 5.5, 6.0).unwrap());
        var.set_output_strength("Shake", 0.8).unwrap();
        let value = var.defuzzify();
        assert!((value - 5.5).abs() < 1e-9, "got {}", value);
    }

    #[test]
    fn test_defuzzify_weights_between_sets() {
        let mut var = FuzzyVariable::new("Out")
            .with_set("Low", FuzzySet::triangular(0.0, 0.5, 1.0).unwrap())
            .with_set("High", FuzzySet::triangular(4.0, 4.5, 5.0).unwrap());
        var.set_output_strength("Low", 1.0).unwrap();
        var.set_output_strength("High", 1.0).unwrap();
        // Identical shapes and strengths: centroid halfway between apexes
        assert!((var.defuzzify() - 2.5).abs() < 1e-9);

        var.set_output_strength("High", 0.0).unwrap();
        assert!((var.defuzzify() - 0.5).abs() < 1e-9);
    }

    #[test]
    fn test_defuzzify_holds_last_value_when_no_rule_fires() {
        let mut var = FuzzyVariable::new("Out")
            .with_set("A", FuzzySet::triangular(2.0, 2.5, 3.0).unwrap())
            .with_set("B", FuzzySet::triangular(3.0, 3.5, 4.0).unwrap());

        // Nothing fired yet: default output
        assert_eq!(var.defuzzify(), 0.0);

        var.set_output_strength("B", 0.6).unwrap();
        let first = var.defuzzify();
        assert!((first - 3.5).abs() < 1e-9);

        var.reset_output_strengths();
        assert_eq!(var.defuzzify(), first);
        assert_eq!(var.last_output(), first);
    }

    #[test]
    fn test_defuzzify_zero_samples_does_not_divide_by_zero() {
        let mut var = FuzzyVariable::new("Out").with_set(
            "Flat",
            FuzzySet::new(MembershipFunction::trapezoidal(0.0, 0.0, 2.0, 2.0).unwrap(), 0.0, 2.0)
                .unwrap(),
        );
        var.set_output_strength("Flat", 1.0).unwrap();
        let value = var.defuzzify_with_samples(0);
        assert!(value.is_finite());
    }

    #[test]
    fn test_set_names_and_dominant_set() {
        let mut var = magnitude();
        let names: Vec<&str> = var.set_names().collect();
        assert_eq!(names, vec!["Zero", "LowPos", "HighPos"]);

        var.set_input(0.7);
        let (name, degree) = var.dominant_set().unwrap();
        assert_eq!(name, "LowPos");
        assert!(degree > 0.5);
    }
}
