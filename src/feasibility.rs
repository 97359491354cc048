//! Feasibility and affordability checks.
//!
//! A candidate may be committed only if it is both *feasible* and
//! *affordable*; the two checks are independent and callers run both.
//!
//! Feasibility holds when, for every resource `j`:
//! 1. `remaining_capacity[j] >= immediate_demand[j]`
//! 2. `total_capacity[j] >= future_demand_committed[j] + future_demand[j]`
//!
//! The second condition is a planning-horizon constraint measured against
//! *total* capacity, independent of today's consumption.
//!
//! Affordability holds when `total_cost_spent + marginal_cost <= budget_max`.
//!
//! Neither check mutates anything.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::models::{AllocationPhase, DiagnosticTest, Ledger, ResourceState, TestState};

/// Why a candidate was passed over.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum SkipReason {
    /// Immediate demand exceeds a resource's remaining capacity.
    ImmediateCapacity {
        /// Resource that blocked the commit.
        resource_id: String,
        /// Demand the test would consume.
        required: f64,
        /// Capacity left on the resource.
        remaining: f64,
    },
    /// Projected future demand would exceed a resource's total capacity.
    HorizonCapacity {
        /// Resource that blocked the commit.
        resource_id: String,
        /// Committed plus candidate future demand.
        projected: f64,
        /// Total capacity of the resource.
        total: f64,
    },
    /// Marginal cost does not fit in the remaining budget.
    Budget {
        /// Marginal cost of the candidate.
        required: f64,
        /// Budget left.
        available: f64,
    },
    /// The test was committed earlier in the run.
    AlreadyScheduled {
        /// Phase that committed it.
        phase: Option<AllocationPhase>,
    },
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ImmediateCapacity {
                resource_id,
                required,
                remaining,
            } => write!(
                f,
                "resource {resource_id} has {remaining:.2} remaining, needs {required:.2}"
            ),
            Self::HorizonCapacity {
                resource_id,
                projected,
                total,
            } => write!(
                f,
                "resource {resource_id} horizon demand {projected:.2} exceeds capacity {total:.2}"
            ),
            Self::Budget {
                required,
                available,
            } => write!(f, "marginal cost ${required:.2} exceeds remaining budget ${available:.2}"),
            Self::AlreadyScheduled { phase: Some(phase) } => {
                write!(f, "already scheduled in the {phase} phase")
            }
            Self::AlreadyScheduled { phase: None } => write!(f, "already scheduled"),
        }
    }
}

/// Pure capacity and budget predicates.
#[derive(Debug, Clone, Copy, Default)]
pub struct FeasibilityChecker;

impl FeasibilityChecker {
    /// Checks capacity constraints, reporting the first violated one.
    ///
    /// Resources are checked in order; for each, immediate capacity is
    /// checked before horizon capacity.
    pub fn check(
        test: &DiagnosticTest,
        state: &TestState,
        resources: &[ResourceState],
    ) -> Result<(), SkipReason> {
        for (j, resource) in resources.iter().enumerate() {
            let required = test.demand_on(j);
            if resource.remaining_capacity < required {
                return Err(SkipReason::ImmediateCapacity {
                    resource_id: resource.resource_id.clone(),
                    required,
                    remaining: resource.remaining_capacity,
                });
            }

            let projected = resource.future_demand_committed + state.future_demand_on(j);
            if resource.total_capacity < projected {
                return Err(SkipReason::HorizonCapacity {
                    resource_id: resource.resource_id.clone(),
                    projected,
                    total: resource.total_capacity,
                });
            }
        }
        Ok(())
    }

    /// Whether the test can be committed without violating any capacity.
    pub fn is_feasible(test: &DiagnosticTest, state: &TestState, resources: &[ResourceState]) -> bool {
        Self::check(test, state, resources).is_ok()
    }

    /// Checks the budget constraint for a given marginal cost.
    pub fn check_budget(ledger: &Ledger, marginal_cost: f64, budget_max: f64) -> Result<(), SkipReason> {
        if ledger.total_cost_spent + marginal_cost <= budget_max {
            Ok(())
        } else {
            Err(SkipReason::Budget {
                required: marginal_cost,
                available: ledger.remaining_budget(budget_max),
            })
        }
    }

    /// Whether the marginal cost fits in the remaining budget.
    pub fn is_affordable(ledger: &Ledger, marginal_cost: f64, budget_max: f64) -> bool {
        Self::check_budget(ledger, marginal_cost, budget_max).is_ok()
    }
}
