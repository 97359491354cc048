//! Allocation run results.

use serde::{Deserialize, Serialize};

use crate::feasibility::SkipReason;
use crate::models::{AllocationPhase, Ledger, ResourceState};

/// One committed test, recorded at the moment of commitment.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CommitRecord {
    /// Committed test ID.
    pub test_id: usize,
    /// Phase that committed it.
    pub phase: AllocationPhase,
    /// Priority score the decision was based on.
    pub priority_score: f64,
    /// Marginal cost the budget check was based on.
    pub marginal_cost: f64,
    /// Cost actually added to the ledger (explicit plus setups switched on).
    pub cost_charged: f64,
    /// Resources whose setup cost this commit paid.
    pub setups_charged: Vec<String>,
    /// Ledger cost after the commit.
    pub total_cost_after: f64,
    /// Ledger utility after the commit.
    pub total_utility_after: f64,
}

/// Final decision for one test.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TestOutcome {
    /// Test ID.
    pub test_id: usize,
    /// Condition the test screens for.
    pub condition_id: usize,
    /// Final priority score.
    pub priority_score: f64,
    /// Final marginal cost estimate.
    pub marginal_cost: f64,
    /// Whether the test was scheduled.
    pub scheduled: bool,
    /// Phase that scheduled it, if scheduled.
    pub phase: Option<AllocationPhase>,
    /// Most recent reason the test was skipped, if it ever was.
    pub last_skip: Option<SkipReason>,
}

/// Everything an allocation run produces.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationOutcome {
    /// Budget ceiling of the run.
    pub budget_max: f64,
    /// Final ledger totals.
    pub ledger: Ledger,
    /// Equity floor the run aimed for.
    pub equity_target: usize,
    /// Cutoff used to build the equity pool.
    pub low_priority_cutoff: f64,
    /// Final resource ledger, in problem order.
    pub resources: Vec<ResourceState>,
    /// Per-test decisions, in problem order.
    pub tests: Vec<TestOutcome>,
    /// Commit trail, in commit order.
    pub commits: Vec<CommitRecord>,
}

impl AllocationOutcome {
    /// Scheduled tests, in problem order.
    pub fn scheduled(&self) -> impl Iterator<Item = &TestOutcome> {
        self.tests.iter().filter(|t| t.scheduled)
    }

    /// Deferred (unscheduled) tests, in problem order.
    pub fn deferred(&self) -> impl Iterator<Item = &TestOutcome> {
        self.tests.iter().filter(|t| !t.scheduled)
    }

    /// Finds a test's outcome by ID.
    pub fn test(&self, test_id: usize) -> Option<&TestOutcome> {
        self.tests.iter().find(|t| t.test_id == test_id)
    }

    /// IDs of scheduled tests, in problem order.
    pub fn scheduled_ids(&self) -> Vec<usize> {
        self.scheduled().map(|t| t.test_id).collect()
    }

    /// IDs of deferred tests, in problem order.
    pub fn deferred_ids(&self) -> Vec<usize> {
        self.deferred().map(|t| t.test_id).collect()
    }

    /// Whether the equity floor was reached.
    pub fn equity_met(&self) -> bool {
        self.ledger.equity_count >= self.equity_target
    }

    /// Immediate utilization of resource 0 as a percentage.
    ///
    /// 0.0 when no resource is configured or resource 0 has no capacity.
    pub fn primary_utilization_percent(&self) -> f64 {
        self.resources
            .first()
            .map(ResourceState::utilization_percent)
            .unwrap_or(0.0)
    }
}
