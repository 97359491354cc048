//! Seeded synthetic scenarios.
//!
//! Generates structurally valid problems for stress runs and invariant
//! checks. The same parameters and seed always yield the same problem.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use serde::{Deserialize, Serialize};

use crate::models::{AllocationProblem, Condition, DiagnosticTest, Resource};

/// Shape of a generated scenario.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SynthParams {
    /// Number of candidate tests.
    pub tests: usize,
    /// Number of resources (may be 0).
    pub resources: usize,
    /// Number of conditions (at least one is always generated).
    pub conditions: usize,
    /// Budget ceiling.
    pub budget_max: f64,
    /// Probability that a resource carries a setup cost.
    pub setup_probability: f64,
    /// Probability that a test draws on a given resource.
    pub demand_probability: f64,
}

impl Default for SynthParams {
    fn default() -> Self {
        Self {
            tests: 30,
            resources: 3,
            conditions: 6,
            budget_max: 2500.0,
            setup_probability: 0.5,
            demand_probability: 0.6,
        }
    }
}

/// Generates a problem from `params` and `seed`.
pub fn generate(params: &SynthParams, seed: u64) -> AllocationProblem {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut problem = AllocationProblem::new(params.budget_max);

    for k in 0..params.conditions.max(1) {
        problem.conditions.push(Condition::new(
            k,
            rng.random_range(1.0..100.0),
            rng.random_range(1.0..100.0),
        ));
    }

    for j in 0..params.resources {
        let capacity = rng.random_range(5.0..80.0);
        let setup = if rng.random_bool(params.setup_probability.clamp(0.0, 1.0)) {
            rng.random_range(50.0..600.0)
        } else {
            0.0
        };
        problem
            .resources
            .push(Resource::new(format!("R{j}"), capacity).with_setup_cost(setup));
    }

    let condition_count = problem.conditions.len();
    let demand_probability = params.demand_probability.clamp(0.0, 1.0);
    for i in 0..params.tests {
        let demand = (0..params.resources)
            .map(|_| {
                if rng.random_bool(demand_probability) {
                    rng.random_range(0.5..20.0)
                } else {
                    0.0
                }
            })
            .collect();
        problem.tests.push(
            DiagnosticTest::new(
                i,
                rng.random_range(0..condition_count),
                rng.random_range(10.0..400.0),
                rng.random::<f64>(),
            )
            .with_demand(demand),
        );
    }

    problem
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::validation::validate_problem;

    #[test]
    fn test_same_seed_same_problem() {
        let params = SynthParams::default();
        assert_eq!(generate(&params, 42), generate(&params, 42));
        assert_ne!(generate(&params, 42), generate(&params, 43));
    }

    #[test]
    fn test_generated_problems_are_valid() {
        for seed in 0..20 {
            let p = generate(&SynthParams::default(), seed);
            assert!(validate_problem(&p).is_ok(), "seed {seed}");
            assert_eq!(p.tests.len(), 30);
            assert_eq!(p.resources.len(), 3);
        }
    }

    #[test]
    fn test_zero_resources_and_conditions() {
        let params = SynthParams {
            resources: 0,
            conditions: 0,
            ..SynthParams::default()
        };
        let p = generate(&params, 7);
        assert!(p.resources.is_empty());
        assert_eq!(p.conditions.len(), 1);
        assert!(p.tests.iter().all(|t| t.immediate_demand.is_empty()));
        assert!(validate_problem(&p).is_ok());
    }
}
