//! Fuzzy Set
//!
//! A region of a variable's domain: a membership function, the range sampled
//! during defuzzification, and a strength slot written by rule consequents.

use super::membership::MembershipFunction;
use serde::{Deserialize, Serialize};

/// A fuzzy set owned by a [`FuzzyVariable`](super::FuzzyVariable)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FuzzySet {
    /// Shaping function
    membership: MembershipFunction,
    /// Lower bound of the defuzzification sampling range
    range_min: f64,
    /// Upper bound of the defuzzification sampling range
    range_max: f64,
    /// Membership of the owning variable's current input
    #[serde(skip)]
    cached_membership: f64,
    /// Strength written by the last rule targeting this set
    #[serde(skip)]
    output_strength: f64,
}

impl FuzzySet {
    /// Create a set sampled over `[range_min, range_max]`.
    ///
    /// The range need not match the support of `membership`.
    pub fn new(membership: MembershipFunction, range_min: f64, range_max: f64) -> crate::Result<Self> {
        let set = Self {
            membership,
            range_min,
            range_max,
            cached_membership: 0.0,
            output_strength: 0.0,
        };
        set.validate()?;
        Ok(set)
    }

    /// Triangular set whose sampling range is its own support `[a, c]`
    pub fn triangular(a: f64, b: f64, c: f64) -> crate::Result<Self> {
        Self::new(MembershipFunction::triangular(a, b, c)?, a, c)
    }

    /// Check the membership parameters and the sampling range
    pub fn validate(&self) -> crate::Result<()> {
        self.membership.validate()?;
        if !self.range_min.is_finite() || !self.range_max.is_finite() || self.range_min > self.range_max {
            return Err(crate::Error::Configuration(format!(
                "set range must be finite with min <= max, got [{}, {}]",
                self.range_min, self.range_max
            )));
        }
        Ok(())
    }

    /// Evaluate at `x`, cache and return the membership
    pub fn membership_at(&mut self, x: f64) -> f64 {
        self.cached_membership = self.membership.evaluate(x);
        self.cached_membership
    }

    /// Evaluate at `x` and only update the cache
    pub fn refresh_membership(&mut self, x: f64) {
        self.cached_membership = self.membership.evaluate(x);
    }

    /// Most recently cached membership
    pub fn cached_membership(&self) -> f64 {
        self.cached_membership
    }

    pub fn output_strength(&self) -> f64 {
        self.output_strength
    }

    pub fn set_output_strength(&mut self, value: f64) {
        self.output_strength = value;
    }

    pub fn membership_function(&self) -> &MembershipFunction {
        &self.membership
    }

    pub fn range_min(&self) -> f64 {
        self.range_min
    }

    pub fn range_max(&self) -> f64 {
        self.range_max
    }
}
