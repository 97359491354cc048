//! Packaged example dataset.
//!
//! Budget 1000; resource `R0` (capacity 50, setup 500) and `R1`
//! (capacity 30, no setup); three conditions; five tests that all draw
//! only on `R0`.

use crate::models::{AllocationProblem, Condition, DiagnosticTest, Resource};

/// The packaged example problem.
pub fn example_problem() -> AllocationProblem {
    AllocationProblem::new(1000.0)
        .with_condition(Condition::new(0, 80.0, 70.0))
        .with_condition(Condition::new(1, 20.0, 95.0))
        .with_condition(Condition::new(2, 50.0, 10.0))
        .with_resource(Resource::new("R0", 50.0).with_setup_cost(500.0))
        .with_resource(Resource::new("R1", 30.0))
        .with_test(DiagnosticTest::new(0, 0, 100.0, 0.80).with_demand(vec![10.0, 0.0]))
        .with_test(DiagnosticTest::new(1, 1, 50.0, 0.10).with_demand(vec![5.0, 0.0]))
        .with_test(DiagnosticTest::new(2, 1, 150.0, 0.15).with_demand(vec![15.0, 0.0]))
        .with_test(DiagnosticTest::new(3, 2, 200.0, 0.90).with_demand(vec![20.0, 0.0]))
        .with_test(DiagnosticTest::new(4, 0, 50.0, 0.50).with_demand(vec![5.0, 0.0]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_shape() {
        let p = example_problem();
        assert_eq!(p.conditions.len(), 3);
        assert_eq!(p.resources.len(), 2);
        assert_eq!(p.tests.len(), 5);
        assert!((p.budget_max - 1000.0).abs() < 1e-10);
        assert!(p.tests.iter().all(|t| t.demand_on(1) == 0.0));
    }
}
