//! Diagnostic test model.
//!
//! A diagnostic test is a candidate awaiting a scheduling decision. The
//! static record carries what the input layer supplies; the derived
//! values (future demand, marginal cost, priority score) and the
//! scheduled flag live in a separate [`TestState`] owned by the
//! allocation session.

use serde::{Deserialize, Serialize};

use super::AllocationPhase;

/// A candidate diagnostic test (static input).
///
/// `immediate_demand` is positional: entry `j` is the demand on the
/// problem's `j`-th resource. Missing trailing entries count as zero.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticTest {
    /// Stable identifier, preserved through candidate-pool sorting.
    pub id: usize,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Condition this test screens for.
    pub condition_id: usize,
    /// Direct cost charged once if scheduled.
    pub explicit_cost: f64,
    /// Positivity probability (P_Pos) in [0, 1].
    pub positivity_probability: f64,
    /// Per-resource demand consumed immediately if scheduled.
    #[serde(default)]
    pub immediate_demand: Vec<f64>,
}

impl DiagnosticTest {
    /// Creates a test with no resource demand.
    pub fn new(id: usize, condition_id: usize, explicit_cost: f64, positivity_probability: f64) -> Self {
        Self {
            id,
            name: String::new(),
            condition_id,
            explicit_cost,
            positivity_probability,
            immediate_demand: Vec::new(),
        }
    }

    /// Sets the test name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the full immediate-demand vector.
    pub fn with_demand(mut self, demand: Vec<f64>) -> Self {
        self.immediate_demand = demand;
        self
    }

    /// Immediate demand on resource `index` (0.0 if not specified).
    #[inline]
    pub fn demand_on(&self, index: usize) -> f64 {
        self.immediate_demand.get(index).copied().unwrap_or(0.0)
    }
}

/// Per-run derived values and decision flag for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestState {
    /// Source test ID.
    pub test_id: usize,
    /// Projected next-horizon demand per resource.
    pub future_demand: Vec<f64>,
    /// Explicit cost plus every pending setup cost in the system.
    pub marginal_cost: f64,
    /// Triage priority score (TPS).
    pub priority_score: f64,
    /// Set once by the allocator, never reset.
    pub scheduled: bool,
    /// Phase that scheduled this test, if any.
    pub scheduled_in: Option<AllocationPhase>,
}

impl TestState {
    /// Unscored, unscheduled state for a test.
    pub fn new(test_id: usize) -> Self {
        Self {
            test_id,
            future_demand: Vec::new(),
            marginal_cost: 0.0,
            priority_score: 0.0,
            scheduled: false,
            scheduled_in: None,
        }
    }

    /// Projected future demand on resource `index` (0.0 if not projected).
    #[inline]
    pub fn future_demand_on(&self, index: usize) -> f64 {
        self.future_demand.get(index).copied().unwrap_or(0.0)
    }
}
