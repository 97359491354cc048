//! Global allocation ledger.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Running totals for one allocation run.
///
/// All fields start at zero and only ever grow.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Ledger {
    /// Explicit costs plus setup costs charged so far.
    pub total_cost_spent: f64,
    /// Sum of condition utilities of scheduled tests.
    pub total_utility_achieved: f64,
    /// Tests scheduled during the equity phase.
    pub equity_count: usize,
}

impl Ledger {
    /// Creates an empty ledger.
    pub fn new() -> Self {
        Self::default()
    }

    /// Budget left under `budget_max`.
    #[inline]
    pub fn remaining_budget(&self, budget_max: f64) -> f64 {
        budget_max - self.total_cost_spent
    }
}

/// The phase in which a test was committed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum AllocationPhase {
    /// Phase 1: equity floor for low-priority tests.
    Equity,
    /// Phase 2: utility maximization by descending priority.
    Utility,
}

impl fmt::Display for AllocationPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Equity => write!(f, "Equity"),
            Self::Utility => write!(f, "Triage"),
        }
    }
}
