//! Fuzzy inference engine
//!
//! Mamdani-style inference built bottom-up:
//! - Membership functions (Gaussian, Sigmoid, Triangular, Trapezoidal)
//! - Fuzzy sets and variables with centroid defuzzification
//! - Rules, an ordered rule base, and the controller that owns them

pub mod membership;
pub mod set;
pub mod variable;
pub mod rule;
pub mod rule_base;
pub mod controller;

pub use membership::MembershipFunction;
pub use set::FuzzySet;
pub use variable::FuzzyVariable;
pub use rule::{Clause, FuzzyOperator, FuzzyRule};
pub use rule_base::FuzzyRuleBase;
pub use controller::FuzzyController;

/// Variables keyed by registration name
pub type VariableRegistry = indexmap::IndexMap<String, FuzzyVariable>;
