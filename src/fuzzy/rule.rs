//! Fuzzy Rule
//!
//! One antecedent, an ordered list of `(variable, set)` clauses joined by
//! operators, mapped onto a single consequent `(variable, set)`.

use super::VariableRegistry;
use crate::{Error, LookupKind};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Operator joining two antecedent clauses
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FuzzyOperator {
    /// Minimum of the running result and the next clause
    And,
    /// Maximum of the running result and the next clause
    Or,
    /// Complement of the running result; the next clause is evaluated but
    /// does not take part in the combination
    Not,
}

impl FuzzyOperator {
    /// Fold `next` into the running `result`
    pub fn combine(self, result: f64, next: f64) -> f64 {
        match self {
            FuzzyOperator::And => result.min(next),
            FuzzyOperator::Or => result.max(next),
            FuzzyOperator::Not => 1.0 - result,
        }
    }
}

/// A `(variable, set)` reference
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Clause {
    pub variable: String,
    pub set: String,
}

impl Clause {
    pub fn new(variable: impl Into<String>, set: impl Into<String>) -> Self {
        Self {
            variable: variable.into(),
            set: set.into(),
        }
    }
}

impl fmt::Display for Clause {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} is {}", self.variable, self.set)
    }
}

/// An immutable rule
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FuzzyRule {
    antecedents: Vec<Clause>,
    operators: Vec<FuzzyOperator>,
    consequent: Clause,
}

impl FuzzyRule {
    /// Build a rule; `operators` must hold exactly one entry fewer than
    /// `antecedents`, and there must be at least one antecedent.
    pub fn new(
        antecedents: Vec<Clause>,
        operators: Vec<FuzzyOperator>,
        consequent: Clause,
    ) -> crate::Result<Self> {
        if antecedents.is_empty() {
            return Err(Error::Configuration(format!(
                "rule for {} has no antecedent clauses",
                consequent
            )));
        }
        if operators.len() != antecedents.len() - 1 {
            return Err(Error::Configuration(format!(
                "rule for {} has {} antecedents but {} operators (expected {})",
                consequent,
                antecedents.len(),
                operators.len(),
                antecedents.len() - 1
            )));
        }
        Ok(Self {
            antecedents,
            operators,
            consequent,
        })
    }

    /// Single-clause rule
    pub fn single(antecedent: Clause, consequent: Clause) -> Self {
        Self {
            antecedents: vec![antecedent],
            operators: Vec::new(),
            consequent,
        }
    }

    /// Rule whose clauses are all joined by [`FuzzyOperator::And`]
    pub fn all_of(antecedents: Vec<Clause>, consequent: Clause) -> crate::Result<Self> {
        let operators = vec![FuzzyOperator::And; antecedents.len().saturating_sub(1)];
        Self::new(antecedents, operators, consequent)
    }

    pub fn antecedents(&self) -> &[Clause] {
        &self.antecedents
    }

    pub fn operators(&self) -> &[FuzzyOperator] {
        &self.operators
    }

    pub fn consequent(&self) -> &Clause {
        &self.consequent
    }

    /// Combined antecedent strength against the current inputs.
    ///
    /// Every clause is looked up before combining, so an unknown name fails
    /// the rule even where a `Not` would discard that clause.
    pub fn firing_strength(&self, inputs: &VariableRegistry) -> crate::Result<f64> {
        let memberships = self
            .antecedents
            .iter()
            .map(|clause| {
                let variable = inputs.get(&clause.variable).ok_or_else(|| Error::NotFound {
                    kind: LookupKind::InputVariable,
                    name: clause.variable.clone(),
                })?;
                variable.membership_of(&clause.set)
            })
            .collect::<crate::Result<Vec<f64>>>()?;

        Ok(combine_memberships(&memberships, &self.operators))
    }

    /// Compute the firing strength and overwrite the consequent's strength
    /// with it. Returns the strength written.
    pub fn evaluate(&self, inputs: &VariableRegistry, outputs: &mut VariableRegistry) -> crate::Result<f64> {
        let strength = self.firing_strength(inputs)?;
        let output = outputs
            .get_mut(&self.consequent.variable)
            .ok_or_else(|| Error::NotFound {
                kind: LookupKind::OutputVariable,
                name: self.consequent.variable.clone(),
            })?;
        output.set_output_strength(&self.consequent.set, strength)?;
        Ok(strength)
    }
}

impl fmt::Display for FuzzyRule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // `Not` complements everything folded so far and drops its clause
        let mut text = self.antecedents[0].to_string();
        for (op, clause) in self.operators.iter().zip(&self.antecedents[1..]) {
            text = match op {
                FuzzyOperator::And => format!("{} AND {}", text, clause),
                FuzzyOperator::Or => format!("{} OR {}", text, clause),
                FuzzyOperator::Not => format!("NOT ({}) [ignored: {}]", text, clause),
            };
        }
        write!(f, "IF {} THEN {}", text, self.consequent)
    }
}

/// Left fold of `memberships` through `operators`, starting from the first
/// membership.
pub fn combine_memberships(memberships: &[f64], operators: &[FuzzyOperator]) -> f64 {
    let Some((&first, rest)) = memberships.split_first() else {
        return 0.0;
    };
    rest.iter()
        .zip(operators)
        .fold(first, |result, (&next, op)| op.combine(result, next))
}
