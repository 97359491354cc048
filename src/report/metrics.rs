//! Report figures derived from an allocation outcome.

use serde::{Deserialize, Serialize};

use crate::allocator::{AllocationOutcome, CommitRecord, TestOutcome};
use crate::feasibility::SkipReason;
use crate::models::AllocationPhase;

/// Post-run allocation report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AllocationReport {
    /// Budget ceiling.
    pub budget_max: f64,
    /// Cost charged during the run.
    pub total_cost_spent: f64,
    /// Utility achieved during the run.
    pub total_utility_achieved: f64,
    /// Tests scheduled in the equity phase.
    pub equity_count: usize,
    /// Equity floor.
    pub equity_target: usize,
    /// Whether the equity floor was reached.
    pub equity_passed: bool,
    /// Cutoff used for the equity pool.
    pub low_priority_cutoff: f64,
    /// Immediate utilization of resource 0 (percent).
    pub primary_utilization_percent: f64,
    /// Per-resource utilization, in problem order.
    pub resources: Vec<ResourceUtilization>,
    /// Scheduled tests, in problem order.
    pub scheduled: Vec<ReportedTest>,
    /// Deferred tests, in problem order.
    pub deferred: Vec<ReportedTest>,
    /// Commit trail, in commit order.
    pub commits: Vec<CommitRecord>,
}

/// Utilization of one resource.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceUtilization {
    /// Resource ID.
    pub resource_id: String,
    /// Immediate capacity consumed.
    pub used: f64,
    /// Total capacity.
    pub total: f64,
    /// Consumed share (percent).
    pub percent: f64,
    /// Committed future demand.
    pub future_demand_committed: f64,
    /// Whether the setup cost was charged.
    pub utilized: bool,
}

/// A test as it appears in the report.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportedTest {
    /// Test ID.
    pub test_id: usize,
    /// Condition screened for.
    pub condition_id: usize,
    /// Final priority score.
    pub priority_score: f64,
    /// Scheduling phase, if scheduled.
    pub phase: Option<AllocationPhase>,
    /// Last skip reason, if any.
    pub skip_reason: Option<SkipReason>,
}

impl From<&TestOutcome> for ReportedTest {
    fn from(t: &TestOutcome) -> Self {
        Self {
            test_id: t.test_id,
            condition_id: t.condition_id,
            priority_score: t.priority_score,
            phase: t.phase,
            skip_reason: t.last_skip.clone(),
        }
    }
}

impl AllocationReport {
    /// Builds the report for a finished run.
    pub fn from_outcome(outcome: &AllocationOutcome) -> Self {
        let resources = outcome
            .resources
            .iter()
            .map(|r| ResourceUtilization {
                resource_id: r.resource_id.clone(),
                used: r.used_capacity(),
                total: r.total_capacity,
                percent: r.utilization_percent(),
                future_demand_committed: r.future_demand_committed,
                utilized: r.utilized,
            })
            .collect();

        Self {
            budget_max: outcome.budget_max,
            total_cost_spent: outcome.ledger.total_cost_spent,
            total_utility_achieved: outcome.ledger.total_utility_achieved,
            equity_count: outcome.ledger.equity_count,
            equity_target: outcome.equity_target,
            equity_passed: outcome.equity_met(),
            low_priority_cutoff: outcome.low_priority_cutoff,
            primary_utilization_percent: outcome.primary_utilization_percent(),
            resources,
            scheduled: outcome.scheduled().map(ReportedTest::from).collect(),
            deferred: outcome.deferred().map(ReportedTest::from).collect(),
            commits: outcome.commits.clone(),
        }
    }

    /// Budget left unspent.
    pub fn budget_remaining(&self) -> f64 {
        self.budget_max - self.total_cost_spent
    }

    /// Share of tests scheduled (1.0 when there were no tests).
    pub fn coverage_rate(&self) -> f64 {
        let total = self.scheduled.len() + self.deferred.len();
        if total == 0 {
            1.0
        } else {
            self.scheduled.len() as f64 / total as f64
        }
    }
}
