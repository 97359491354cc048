//! Cost projection and triage priority scoring.
//!
//! Scoring is a two-step derivation run once before the equity phase and
//! again for every still-unscheduled test before the utility phase:
//!
//! 1. [`CostProjector`] writes the test's projected future demand and its
//!    marginal cost given the current resource ledger.
//! 2. [`PriorityScorer`] turns condition weights and marginal cost into
//!    the triage priority score (TPS).
//!
//! Both steps are pure with respect to the ledger: scoring a test twice
//! against an unchanged ledger yields identical derived values.
//!
//! # Usage
//!
//! ```
//! use u_triage::models::{Condition, DiagnosticTest, Resource, ResourceState, TestState};
//! use u_triage::scoring::{score_test, CostProjector};
//!
//! let resources = vec![ResourceState::from_resource(
//!     &Resource::new("R0", 50.0).with_setup_cost(500.0),
//! )];
//! let test = DiagnosticTest::new(0, 0, 100.0, 0.8).with_demand(vec![10.0]);
//! let condition = Condition::new(0, 80.0, 70.0);
//!
//! let mut state = TestState::new(test.id);
//! score_test(&CostProjector::default(), &test, Some(&condition), &resources, &mut state);
//! assert_eq!(state.marginal_cost, 600.0);
//! assert!((state.priority_score - 5600.0 / 610.0).abs() < 1e-12);
//! ```

mod cost;
mod priority;

pub use cost::CostProjector;
pub use priority::PriorityScorer;

use crate::models::{Condition, DiagnosticTest, ResourceState, TestState};

/// Runs the cost projector then the priority scorer for one test.
///
/// `condition` is `None` only when the input layer let an unknown
/// reference through; such a test contributes zero utility and scores 0.
pub fn score_test(
    projector: &CostProjector,
    test: &DiagnosticTest,
    condition: Option<&Condition>,
    resources: &[ResourceState],
    state: &mut TestState,
) {
    projector.project(test, resources, state);
    state.priority_score = PriorityScorer::score(
        condition.map(Condition::utility).unwrap_or(0.0),
        state.marginal_cost,
        PriorityScorer::time_demand(test, resources.len()),
    );
}
