//! Fuzzy Rule Base
//!
//! Ordered rules evaluated once per inference cycle. Rules sharing a
//! consequent do not accumulate: the rule registered last wins.

use super::rule::FuzzyRule;
use super::VariableRegistry;
use tracing::{debug, trace};

/// Ordered collection of rules
#[derive(Debug, Clone, Default)]
pub struct FuzzyRuleBase {
    rules: Vec<FuzzyRule>,
}

impl FuzzyRuleBase {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a rule after all previously registered ones
    pub fn add_rule(&mut self, rule: FuzzyRule) {
        self.rules.push(rule);
    }

    pub fn rules(&self) -> &[FuzzyRule] {
        &self.rules
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Run one cycle: zero every output set's strength, then fire every rule
    /// in registration order.
    ///
    /// The first failing rule aborts the cycle; output strengths are then
    /// left as the earlier rules wrote them.
    pub fn evaluate(&self, inputs: &VariableRegistry, outputs: &mut VariableRegistry) -> crate::Result<()> {
        for output in outputs.values_mut() {
            output.reset_output_strengths();
        }

        for (index, rule) in self.rules.iter().enumerate() {
            let strength = rule.evaluate(inputs, outputs)?;
            trace!(rule = index, consequent = %rule.consequent(), strength, "Rule fired");
        }

        debug!(rules = self.rules.len(), "Rule base cycle complete");
        Ok(())
    }
}
