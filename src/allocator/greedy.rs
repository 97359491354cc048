//! Two-phase greedy triage allocator.
//!
//! # Algorithm
//!
//! 0. Score every test against the fresh ledger.
//! 1. **Equity.** Pool the unscheduled tests scoring strictly below the
//!    low-priority cutoff, sort by resource-0 demand ascending, and commit
//!    each feasible, affordable candidate until the equity target is met.
//!    Budget checks use the marginal costs from step 0.
//! 2. **Utility.** Rescore every unscheduled test (setup flags may have
//!    flipped), sort by priority descending, and commit each feasible,
//!    affordable candidate.
//!
//! Every decision is final: a skipped candidate is not retried within the
//! phase and a committed test is never revisited.
//!
//! # Complexity
//! O(n log n + n * r) where n = tests, r = resources.

use tracing::info;

use super::ordering::{sort_pool, PoolEntry, SortDirection};
use super::outcome::AllocationOutcome;
use super::session::AllocationSession;
use crate::config::AllocationConfig;
use crate::models::{AllocationPhase, AllocationProblem};
use crate::scoring::{CostProjector, PriorityScorer};

/// Equity-constrained greedy allocator.
///
/// # Example
///
/// ```
/// use u_triage::allocator::TriageAllocator;
/// use u_triage::models::{AllocationProblem, Condition, DiagnosticTest, Resource};
///
/// let problem = AllocationProblem::new(500.0)
///     .with_condition(Condition::new(0, 800.0, 700.0))
///     .with_resource(Resource::new("R0", 20.0))
///     .with_test(DiagnosticTest::new(0, 0, 100.0, 0.5).with_demand(vec![5.0]))
///     .with_test(DiagnosticTest::new(1, 0, 450.0, 0.5).with_demand(vec![5.0]));
///
/// let outcome = TriageAllocator::new().allocate(&problem);
/// assert_eq!(outcome.scheduled_ids(), vec![0]);
/// assert_eq!(outcome.deferred_ids(), vec![1]);
/// assert_eq!(outcome.ledger.total_cost_spent, 100.0);
/// ```
#[derive(Debug, Clone, Default)]
pub struct TriageAllocator {
    config: AllocationConfig,
}

impl TriageAllocator {
    /// Creates an allocator with the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates an allocator with the given configuration.
    pub fn with_config(config: AllocationConfig) -> Self {
        Self { config }
    }

    /// The active configuration.
    pub fn config(&self) -> &AllocationConfig {
        &self.config
    }

    /// Runs a full allocation over `problem` from a fresh ledger.
    pub fn allocate(&self, problem: &AllocationProblem) -> AllocationOutcome {
        let mut session =
            AllocationSession::new(problem, CostProjector::new(self.config.horizon_factor));
        session.score_all();

        let equity_target = self
            .config
            .equity_target(problem.primary_resource().map(|r| r.total_capacity));
        info!(
            equity_target,
            cutoff = self.config.low_priority_cutoff,
            tests = problem.test_count(),
            budget = problem.budget_max,
            "starting allocation"
        );

        self.run_equity_phase(&mut session, equity_target);
        self.run_utility_phase(&mut session);

        let outcome = session.into_outcome(equity_target, self.config.low_priority_cutoff);
        info!(
            total_cost = outcome.ledger.total_cost_spent,
            total_utility = outcome.ledger.total_utility_achieved,
            scheduled = outcome.scheduled().count(),
            deferred = outcome.deferred().count(),
            "allocation finished"
        );
        outcome
    }

    fn run_equity_phase(&self, session: &mut AllocationSession<'_>, equity_target: usize) {
        let problem = session.problem();
        let resource_count = session.resources().len();
        let mut pool: Vec<PoolEntry> = session
            .states()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.scheduled && s.priority_score < self.config.low_priority_cutoff)
            .map(|(position, s)| PoolEntry {
                position,
                test_id: s.test_id,
                key: PriorityScorer::time_demand(&problem.tests[position], resource_count),
            })
            .collect();
        sort_pool(&mut pool, SortDirection::Ascending, self.config.tie_breaker);
        info!(pool = pool.len(), equity_target, "equity phase");

        let mut skipped = 0usize;
        for entry in &pool {
            if session.ledger().equity_count >= equity_target {
                break;
            }
            if !session.try_commit(entry.position, AllocationPhase::Equity) {
                skipped += 1;
            }
        }

        info!(
            met = session.ledger().equity_count,
            target = equity_target,
            skipped,
            "equity compliance"
        );
    }

    fn run_utility_phase(&self, session: &mut AllocationSession<'_>) {
        session.rescore_unscheduled();

        let mut pool: Vec<PoolEntry> = session
            .states()
            .iter()
            .enumerate()
            .filter(|(_, s)| !s.scheduled)
            .map(|(position, s)| PoolEntry {
                position,
                test_id: s.test_id,
                key: s.priority_score,
            })
            .collect();
        sort_pool(&mut pool, SortDirection::Descending, self.config.tie_breaker);
        info!(pool = pool.len(), "utility phase");

        let committed = pool
            .iter()
            .filter(|entry| session.try_commit(entry.position, AllocationPhase::Utility))
            .count();
        info!(committed, skipped = pool.len() - committed, "utility phase finished");
    }
}
