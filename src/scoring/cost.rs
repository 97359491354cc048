//! Cost projector: future demand and marginal cost.
//!
//! # Future demand
//!
//! Every resource receives the same projection,
//! `positivity_probability * horizon_factor`, regardless of which
//! resources the test draws on immediately.
//!
//! # Marginal cost
//!
//! `explicit_cost` plus the setup cost of *every* resource in the system
//! that still has a pending setup, not only the resources the test itself
//! consumes. Only the first commit actually pays a given setup into the
//! ledger; until then every test's estimate carries it.

use crate::config::DEFAULT_HORIZON_FACTOR;
use crate::models::{DiagnosticTest, ResourceState, TestState};

/// Projects future demand and marginal cost against the current ledger.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CostProjector {
    horizon_factor: f64,
}

impl CostProjector {
    /// Creates a projector for the given planning-horizon factor.
    pub fn new(horizon_factor: f64) -> Self {
        Self { horizon_factor }
    }

    /// The planning-horizon factor.
    pub fn horizon_factor(&self) -> f64 {
        self.horizon_factor
    }

    /// Projected next-horizon demand, one entry per resource.
    pub fn future_demand(&self, test: &DiagnosticTest, resources: &[ResourceState]) -> Vec<f64> {
        vec![test.positivity_probability * self.horizon_factor; resources.len()]
    }

    /// Explicit cost plus all pending setup costs system-wide.
    pub fn marginal_cost(&self, test: &DiagnosticTest, resources: &[ResourceState]) -> f64 {
        resources
            .iter()
            .filter(|r| r.has_pending_setup())
            .fold(test.explicit_cost, |acc, r| acc + r.setup_cost)
    }

    /// Writes future demand and marginal cost into `state`.
    pub fn project(&self, test: &DiagnosticTest, resources: &[ResourceState], state: &mut TestState) {
        state.future_demand = self.future_demand(test, resources);
        state.marginal_cost = self.marginal_cost(test, resources);
    }
}

impl Default for CostProjector {
    fn default() -> Self {
        Self::new(DEFAULT_HORIZON_FACTOR)
    }
}
