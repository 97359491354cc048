//! Health condition model.
//!
//! A condition is what a diagnostic test screens for. Its two weights
//! combine multiplicatively into the utility gained when any test for
//! the condition is scheduled.

use serde::{Deserialize, Serialize};

/// A health condition screened for by one or more tests.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Condition {
    /// Stable identifier, referenced by `DiagnosticTest::condition_id`.
    pub id: usize,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Criticality weight (W_Crit), non-negative.
    pub criticality: f64,
    /// Survivability weight (W_Surv), non-negative.
    pub survivability: f64,
}

impl Condition {
    /// Creates a condition with the given weights.
    pub fn new(id: usize, criticality: f64, survivability: f64) -> Self {
        Self {
            id,
            name: String::new(),
            criticality,
            survivability,
        }
    }

    /// Sets the condition name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Medical utility of scheduling one test for this condition.
    #[inline]
    pub fn utility(&self) -> f64 {
        self.criticality * self.survivability
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_utility_is_product_of_weights() {
        let c = Condition::new(0, 80.0, 70.0).with_name("Sepsis");
        assert_eq!(c.name, "Sepsis");
        assert!((c.utility() - 5600.0).abs() < 1e-10);
    }

    #[test]
    fn test_zero_weight_gives_zero_utility() {
        let c = Condition::new(3, 0.0, 95.0);
        assert_eq!(c.utility(), 0.0);
    }
}
