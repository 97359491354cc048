//! Allocation session: the per-run ledger and the commit operation.
//!
//! A session owns every value that changes during a run: resource
//! ledger, per-test derived values, global totals and the commit trail.
//! The problem itself is borrowed read-only. Nothing survives between
//! runs; a new session starts from a fresh ledger.

use std::collections::HashMap;

use tracing::{debug, info};

use super::outcome::{AllocationOutcome, CommitRecord, TestOutcome};
use crate::feasibility::{FeasibilityChecker, SkipReason};
use crate::models::{
    AllocationPhase, AllocationProblem, Condition, Ledger, ResourceState, TestState,
};
use crate::scoring::{score_test, CostProjector};

/// Mutable state of one allocation run.
///
/// Tests are addressed by their *position* in the problem's test list;
/// pools carry both position and stable ID so sorted copies map back to
/// the canonical entry.
#[derive(Debug, Clone)]
pub(crate) struct AllocationSession<'a> {
    problem: &'a AllocationProblem,
    projector: CostProjector,
    condition_index: HashMap<usize, usize>,
    resources: Vec<ResourceState>,
    states: Vec<TestState>,
    skips: Vec<Option<SkipReason>>,
    ledger: Ledger,
    commits: Vec<CommitRecord>,
}

impl<'a> AllocationSession<'a> {
    /// Starts a session with a fresh ledger.
    pub fn new(problem: &'a AllocationProblem, projector: CostProjector) -> Self {
        let condition_index = problem
            .conditions
            .iter()
            .enumerate()
            .map(|(pos, c)| (c.id, pos))
            .collect();

        Self {
            problem,
            projector,
            condition_index,
            resources: problem.resources.iter().map(ResourceState::from_resource).collect(),
            states: problem.tests.iter().map(|t| TestState::new(t.id)).collect(),
            skips: vec![None; problem.tests.len()],
            ledger: Ledger::new(),
            commits: Vec::new(),
        }
    }

    /// The problem being allocated.
    pub fn problem(&self) -> &'a AllocationProblem {
        self.problem
    }

    /// Current resource ledger.
    pub fn resources(&self) -> &[ResourceState] {
        &self.resources
    }

    /// Current per-test state, in problem order.
    pub fn states(&self) -> &[TestState] {
        &self.states
    }

    /// Current global totals.
    pub fn ledger(&self) -> &Ledger {
        &self.ledger
    }

    /// Condition of the test at `position`.
    pub fn condition_for(&self, position: usize) -> Option<&'a Condition> {
        let test = self.problem.tests.get(position)?;
        let problem = self.problem;
        self.condition_index
            .get(&test.condition_id)
            .and_then(|&pos| problem.conditions.get(pos))
    }

    /// Recomputes derived values for the test at `position`.
    pub fn score(&mut self, position: usize) {
        let problem = self.problem;
        let condition = self.condition_for(position);
        let test = &problem.tests[position];
        score_test(
            &self.projector,
            test,
            condition,
            &self.resources,
            &mut self.states[position],
        );
    }

    /// Scores every test.
    pub fn score_all(&mut self) {
        for position in 0..self.states.len() {
            self.score(position);
        }
    }

    /// Rescores every test not yet scheduled.
    pub fn rescore_unscheduled(&mut self) {
        for position in 0..self.states.len() {
            if !self.states[position].scheduled {
                self.score(position);
            }
        }
    }

    /// Runs the feasibility and affordability checks for a candidate.
    pub fn evaluate(&self, position: usize) -> Result<(), SkipReason> {
        let test = &self.problem.tests[position];
        let state = &self.states[position];
        if state.scheduled {
            return Err(SkipReason::AlreadyScheduled {
                phase: state.scheduled_in,
            });
        }
        FeasibilityChecker::check(test, state, &self.resources)?;
        FeasibilityChecker::check_budget(&self.ledger, state.marginal_cost, self.problem.budget_max)
    }

    /// Commits the candidate if it passes both checks.
    ///
    /// Returns whether the test was committed. A failed check is recorded
    /// as the test's latest skip reason and leaves every ledger value
    /// untouched; a test that is already scheduled is refused without
    /// overwriting its record.
    pub fn try_commit(&mut self, position: usize, phase: AllocationPhase) -> bool {
        match self.evaluate(position) {
            Ok(()) => {
                self.commit(position, phase);
                true
            }
            Err(reason) => {
                debug!(
                    test_id = self.states[position].test_id,
                    phase = %phase,
                    reason = %reason,
                    "skipped test"
                );
                if !matches!(reason, SkipReason::AlreadyScheduled { .. }) {
                    self.skips[position] = Some(reason);
                }
                false
            }
        }
    }

    /// Applies the commit transition to the test at `position`.
    ///
    /// Performs no validation; callers must have confirmed feasibility
    /// and affordability. Setup costs of every resource still pending are
    /// charged here, once per resource per run.
    pub fn commit(&mut self, position: usize, phase: AllocationPhase) -> &CommitRecord {
        let problem = self.problem;
        let test = &problem.tests[position];
        let utility = self.condition_for(position).map(Condition::utility).unwrap_or(0.0);
        let state = &mut self.states[position];

        state.scheduled = true;
        state.scheduled_in = Some(phase);

        let mut cost_charged = test.explicit_cost;
        let mut setups_charged = Vec::new();
        for (j, resource) in self.resources.iter_mut().enumerate() {
            resource.remaining_capacity -= test.demand_on(j);
            resource.future_demand_committed += state.future_demand_on(j);

            if resource.has_pending_setup() {
                resource.utilized = true;
                cost_charged += resource.setup_cost;
                setups_charged.push(resource.resource_id.clone());
            }
        }

        self.ledger.total_cost_spent += cost_charged;
        self.ledger.total_utility_achieved += utility;
        if phase == AllocationPhase::Equity {
            self.ledger.equity_count += 1;
        }

        info!(
            test_id = test.id,
            phase = %phase,
            tps = state.priority_score,
            total_cost = self.ledger.total_cost_spent,
            "scheduled test"
        );

        self.commits.push(CommitRecord {
            test_id: test.id,
            phase,
            priority_score: state.priority_score,
            marginal_cost: state.marginal_cost,
            cost_charged,
            setups_charged,
            total_cost_after: self.ledger.total_cost_spent,
            total_utility_after: self.ledger.total_utility_achieved,
        });
        &self.commits[self.commits.len() - 1]
    }

    /// Consumes the session into a run outcome.
    pub fn into_outcome(self, equity_target: usize, low_priority_cutoff: f64) -> AllocationOutcome {
        let tests = self
            .problem
            .tests
            .iter()
            .zip(self.states)
            .zip(self.skips)
            .map(|((test, state), last_skip)| TestOutcome {
                test_id: test.id,
                condition_id: test.condition_id,
                priority_score: state.priority_score,
                marginal_cost: state.marginal_cost,
                scheduled: state.scheduled,
                phase: state.scheduled_in,
                last_skip,
            })
            .collect();

        AllocationOutcome {
            budget_max: self.problem.budget_max,
            ledger: self.ledger,
            equity_target,
            low_priority_cutoff,
            resources: self.resources,
            tests,
            commits: self.commits,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{DiagnosticTest, Resource};

    fn problem() -> AllocationProblem {
        AllocationProblem::new(1000.0)
            .with_condition(Condition::new(0, 80.0, 70.0))
            .with_condition(Condition::new(1, 20.0, 95.0))
            .with_resource(Resource::new("R0", 50.0).with_setup_cost(500.0))
            .with_resource(Resource::new("R1", 30.0))
            .with_resource(Resource::new("R2", 10.0).with_setup_cost(100.0))
            .with_test(DiagnosticTest::new(0, 0, 100.0, 0.8).with_demand(vec![10.0, 0.0, 0.0]))
            .with_test(DiagnosticTest::new(1, 1, 50.0, 0.1).with_demand(vec![5.0, 2.0, 0.0]))
    }

    #[test]
    fn test_fresh_session() {
        let p = problem();
        let s = AllocationSession::new(&p, CostProjector::default());
        assert_eq!(s.resources().len(), 3);
        assert_eq!(s.states().len(), 2);
        assert_eq!(s.ledger(), &Ledger::new());
        assert_eq!(s.condition_for(1).map(|c| c.id), Some(1));
        assert!(s.into_outcome(0, 50.0).commits.is_empty());
    }

    #[test]
    fn test_commit_transition() {
        let p = problem();
        let mut s = AllocationSession::new(&p, CostProjector::default());
        s.score_all();
        let record = s.commit(1, AllocationPhase::Equity).clone();

        // Both pending setups are charged, though the test never touches R2.
        assert!((record.cost_charged - 650.0).abs() < 1e-10);
        assert_eq!(record.setups_charged, vec!["R0".to_string(), "R2".to_string()]);

        let st = &s.states()[1];
        assert!(st.scheduled);
        assert_eq!(st.scheduled_in, Some(AllocationPhase::Equity));

        let r = s.resources();
        assert!((r[0].remaining_capacity - 45.0).abs() < 1e-10);
        assert!((r[1].remaining_capacity - 28.0).abs() < 1e-10);
        assert!((r[0].future_demand_committed - 0.1).abs() < 1e-10);
        assert!((r[2].future_demand_committed - 0.1).abs() < 1e-10);
        assert!(r[0].utilized && r[2].utilized && !r[1].utilized);

        assert!((s.ledger().total_cost_spent - 650.0).abs() < 1e-10);
        assert!((s.ledger().total_utility_achieved - 1900.0).abs() < 1e-10);
        assert_eq!(s.ledger().equity_count, 1);
    }

    #[test]
    fn test_setup_cost_charged_once() {
        let p = problem();
        let mut s = AllocationSession::new(&p, CostProjector::default());
        s.score_all();
        s.commit(1, AllocationPhase::Utility);
        s.rescore_unscheduled();
        let second = s.commit(0, AllocationPhase::Utility).clone();

        assert!(second.setups_charged.is_empty());
        assert!((second.cost_charged - 100.0).abs() < 1e-10);
        assert!((s.ledger().total_cost_spent - 750.0).abs() < 1e-10);
        assert_eq!(s.ledger().equity_count, 0);
    }

    #[test]
    fn test_rescore_only_touches_unscheduled() {
        let p = problem();
        let mut s = AllocationSession::new(&p, CostProjector::default());
        s.score_all();
        let before = s.states()[1].clone();
        s.commit(1, AllocationPhase::Utility);
        s.rescore_unscheduled();

        // Scheduled test keeps the score it was committed with.
        assert!((s.states()[1].priority_score - before.priority_score).abs() < 1e-12);
        // Unscheduled test now sees no pending setups.
        assert!((s.states()[0].marginal_cost - 100.0).abs() < 1e-12);
    }

    #[test]
    fn test_try_commit_records_skip() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_resource(Resource::new("R0", 10.0))
            .with_test(DiagnosticTest::new(0, 0, 150.0, 0.1).with_demand(vec![1.0]));
        let mut s = AllocationSession::new(&p, CostProjector::default());
        s.score_all();

        assert!(!s.try_commit(0, AllocationPhase::Utility));
        assert_eq!(s.ledger(), &Ledger::new());

        let outcome = s.into_outcome(0, 50.0);
        assert!(!outcome.tests[0].scheduled);
        assert_eq!(
            outcome.tests[0].last_skip,
            Some(SkipReason::Budget {
                required: 150.0,
                available: 100.0
            })
        );
    }

    #[test]
    fn test_scheduled_test_is_never_committed_twice() {
        let p = AllocationProblem::new(1000.0)
            .with_condition(Condition::new(0, 10.0, 10.0))
            .with_resource(Resource::new("R0", 50.0))
            .with_test(DiagnosticTest::new(0, 0, 100.0, 0.5).with_demand(vec![10.0]));
        let mut s = AllocationSession::new(&p, CostProjector::default());
        s.score_all();

        assert!(s.try_commit(0, AllocationPhase::Equity));
        s.rescore_unscheduled();
        assert!(!s.try_commit(0, AllocationPhase::Utility));
        assert_eq!(
            s.evaluate(0),
            Err(SkipReason::AlreadyScheduled {
                phase: Some(AllocationPhase::Equity)
            })
        );

        let ledger = s.ledger().clone();
        assert!((ledger.total_cost_spent - 100.0).abs() < 1e-10);
        assert!((ledger.total_utility_achieved - 100.0).abs() < 1e-10);
        assert_eq!(ledger.equity_count, 1);
        assert!((s.resources()[0].remaining_capacity - 40.0).abs() < 1e-10);

        let outcome = s.into_outcome(0, 50.0);
        assert_eq!(outcome.commits.len(), 1);
        assert_eq!(outcome.tests[0].phase, Some(AllocationPhase::Equity));
        assert!(outcome.tests[0].last_skip.is_none());
    }
}
