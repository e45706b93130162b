//! Fuzzy Controller
//!
//! Owns the input and output variable registries together with the rule
//! base. Callers push crisp inputs, trigger a cycle, then read crisp outputs.
//! A controller is not internally synchronized: one cycle must not be
//! interleaved with another thread touching the same instance.

use super::rule::FuzzyRule;
use super::rule_base::FuzzyRuleBase;
use super::variable::{FuzzyVariable, DEFAULT_DEFUZZIFY_SAMPLES};
use super::VariableRegistry;
use crate::{Error, LookupKind};
use tracing::debug;

/// Mamdani inference façade
#[derive(Debug, Clone)]
pub struct FuzzyController {
    inputs: VariableRegistry,
    outputs: VariableRegistry,
    rule_base: FuzzyRuleBase,
    defuzzify_samples: usize,
}

impl FuzzyController {
    pub fn new() -> Self {
        Self {
            inputs: VariableRegistry::new(),
            outputs: VariableRegistry::new(),
            rule_base: FuzzyRuleBase::new(),
            defuzzify_samples: DEFAULT_DEFUZZIFY_SAMPLES,
        }
    }

    /// Use `samples` intervals per set in [`output_value`](Self::output_value)
    pub fn with_defuzzify_samples(mut self, samples: usize) -> Self {
        self.defuzzify_samples = samples;
        self
    }

    /// Register an input variable; an existing registration under `name` is
    /// replaced.
    pub fn register_input(&mut self, name: impl Into<String>, variable: FuzzyVariable) {
        let name = name.into();
        if self.inputs.insert(name.clone(), variable).is_some() {
            debug!(variable = %name, "Replaced input variable");
        }
    }

    /// Register an output variable; an existing registration under `name` is
    /// replaced.
    pub fn register_output(&mut self, name: impl Into<String>, variable: FuzzyVariable) {
        let name = name.into();
        if self.outputs.insert(name.clone(), variable).is_some() {
            debug!(variable = %name, "Replaced output variable");
        }
    }

    /// Append a rule. Names are not checked against the registries until
    /// the rule fires.
    pub fn add_rule(&mut self, rule: FuzzyRule) {
        self.rule_base.add_rule(rule);
    }

    /// Store a crisp value on a registered input variable
    pub fn set_input(&mut self, name: &str, value: f64) -> crate::Result<()> {
        self.input_mut(name)?.set_input(value);
        Ok(())
    }

    /// Evaluate every rule once over the current inputs
    pub fn run_cycle(&mut self) -> crate::Result<()> {
        self.rule_base.evaluate(&self.inputs, &mut self.outputs)
    }

    /// Defuzzified value of a registered output variable
    pub fn output_value(&mut self, name: &str) -> crate::Result<f64> {
        let samples = self.defuzzify_samples;
        let output = self.outputs.get_mut(name).ok_or_else(|| Error::NotFound {
            kind: LookupKind::OutputVariable,
            name: name.to_string(),
        })?;
        Ok(output.defuzzify_with_samples(samples))
    }

    pub fn input(&self, name: &str) -> crate::Result<&FuzzyVariable> {
        self.inputs.get(name).ok_or_else(|| Error::NotFound {
            kind: LookupKind::InputVariable,
            name: name.to_string(),
        })
    }

    pub fn input_mut(&mut self, name: &str) -> crate::Result<&mut FuzzyVariable> {
        self.inputs.get_mut(name).ok_or_else(|| Error::NotFound {
            kind: LookupKind::InputVariable,
            name: name.to_string(),
        })
    }

    pub fn output(&self, name: &str) -> crate::Result<&FuzzyVariable> {
        self.outputs.get(name).ok_or_else(|| Error::NotFound {
            kind: LookupKind::OutputVariable,
            name: name.to_string(),
        })
    }

    pub fn inputs(&self) -> impl Iterator<Item = (&str, &FuzzyVariable)> {
        self.inputs.iter().map(|(name, var)| (name.as_str(), var))
    }

    pub fn outputs(&self) -> impl Iterator<Item = (&str, &FuzzyVariable)> {
        self.outputs.iter().map(|(name, var)| (name.as_str(), var))
    }

    pub fn rule_base(&self) -> &FuzzyRuleBase {
        &self.rule_base
    }

    pub fn defuzzify_samples(&self) -> usize {
        self.defuzzify_samples
    }
}

impl Default for FuzzyController {
    fn default() -> Self {
        Self::new()
    }
}
