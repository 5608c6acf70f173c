//! Composable eligibility policy.
//!
//! Combines several rules into one, either requiring all of them or
//! accepting any of them. A policy is itself an [`EligibilityRule`], so
//! policies nest.

use std::sync::Arc;

use super::{EligibilityContext, EligibilityRule};
use crate::models::Worker;

/// How the rules of a policy are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Combine {
    /// Every rule must admit the worker. An empty policy admits everyone.
    #[default]
    All,
    /// At least one rule must admit the worker. An empty policy admits no one.
    Any,
}

/// A set of eligibility rules evaluated together.
///
/// Rules are evaluated in insertion order and short-circuit.
///
/// # Example
/// ```
/// use u_roster::eligibility::{EligibilityPolicy, rules};
///
/// let on_call = EligibilityPolicy::any()
///     .with_rule(rules::LastShiftIs::night())
///     .with_rule(rules::MinRestDays(2));
/// ```
#[derive(Clone, Default)]
pub struct EligibilityPolicy {
    rules: Vec<Arc<dyn EligibilityRule>>,
    combine: Combine,
}

impl EligibilityPolicy {
    /// Creates an empty policy with the given combination mode.
    pub fn new(combine: Combine) -> Self {
        Self {
            rules: Vec::new(),
            combine,
        }
    }

    /// Creates an empty policy requiring every rule.
    pub fn all() -> Self {
        Self::new(Combine::All)
    }

    /// Creates an empty policy requiring at least one rule.
    pub fn any() -> Self {
        Self::new(Combine::Any)
    }

    /// Adds a rule.
    pub fn with_rule<R: EligibilityRule + 'static>(mut self, rule: R) -> Self {
        self.rules.push(Arc::new(rule));
        self
    }

    /// Adds a shared rule.
    pub fn with_shared_rule(mut self, rule: Arc<dyn EligibilityRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Number of rules.
    pub fn len(&self) -> usize {
        self.rules.len()
    }

    /// Whether the policy holds no rules.
    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    /// Names of the rules that reject `worker`, in insertion order.
    pub fn failing_rules(
        &self,
        worker: &Worker,
        context: &EligibilityContext<'_>,
    ) -> Vec<&'static str> {
        self.rules
            .iter()
            .filter(|r| !r.is_eligible(worker, context))
            .map(|r| r.name())
            .collect()
    }
}

impl EligibilityRule for EligibilityPolicy {
    fn name(&self) -> &'static str {
        match self.combine {
            Combine::All => "ALL",
            Combine::Any => "ANY",
        }
    }

    fn is_eligible(&self, worker: &Worker, context: &EligibilityContext<'_>) -> bool {
        match self.combine {
            Combine::All => self.rules.iter().all(|r| r.is_eligible(worker, context)),
            Combine::Any => self.rules.iter().any(|r| r.is_eligible(worker, context)),
        }
    }

    fn description(&self) -> &'static str {
        match self.combine {
            Combine::All => "All rules must admit the worker",
            Combine::Any => "Any rule may admit the worker",
        }
    }
}

impl std::fmt::Debug for EligibilityPolicy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EligibilityPolicy")
            .field("combine", &self.combine)
            .field(
                "rules",
                &self.rules.iter().map(|r| r.name()).collect::<Vec<_>>(),
            )
            .finish()
    }
}
