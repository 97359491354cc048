//! Input collaborators.
//!
//! Every way of obtaining an [`AllocationProblem`]: the packaged example
//! dataset, JSON scenario files, interactive prompts and a seeded
//! synthetic generator. All of them funnel through [`prepare`], which
//! coerces dangling condition references and validates the result, so
//! the allocator only ever sees well-formed input.

pub mod json;
pub mod preset;
pub mod prompt;
pub mod synth;

use tracing::warn;

use crate::error::{InputError, InputResult};
use crate::models::AllocationProblem;
use crate::validation::validate_problem;

/// Rewrites unknown condition references to the first condition's ID.
///
/// Returns the number of tests that were rewritten. Does nothing when
/// the problem has no conditions at all.
pub fn coerce_condition_refs(problem: &mut AllocationProblem) -> usize {
    let Some(fallback) = problem.conditions.first().map(|c| c.id) else {
        return 0;
    };

    let known: std::collections::HashSet<usize> =
        problem.conditions.iter().map(|c| c.id).collect();
    let mut coerced = 0;
    for test in &mut problem.tests {
        if !known.contains(&test.condition_id) {
            warn!(
                test_id = test.id,
                condition_id = test.condition_id,
                fallback,
                "unknown condition reference coerced"
            );
            test.condition_id = fallback;
            coerced += 1;
        }
    }
    coerced
}

/// Coerces condition references, then validates.
pub fn prepare(mut problem: AllocationProblem) -> InputResult<AllocationProblem> {
    coerce_condition_refs(&mut problem);
    validate_problem(&problem).map_err(InputError::Invalid)?;
    Ok(problem)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{Condition, DiagnosticTest};

    #[test]
    fn test_coerce_to_first_condition() {
        let mut p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(3, 1.0, 1.0))
            .with_condition(Condition::new(4, 1.0, 1.0))
            .with_test(DiagnosticTest::new(0, 4, 10.0, 0.1))
            .with_test(DiagnosticTest::new(1, 99, 10.0, 0.1));

        assert_eq!(coerce_condition_refs(&mut p), 1);
        assert_eq!(p.tests[0].condition_id, 4);
        assert_eq!(p.tests[1].condition_id, 3);
    }

    #[test]
    fn test_coerce_without_conditions_is_noop() {
        let mut p = AllocationProblem::new(100.0).with_test(DiagnosticTest::new(0, 7, 10.0, 0.1));
        assert_eq!(coerce_condition_refs(&mut p), 0);
        assert_eq!(p.tests[0].condition_id, 7);
    }

    #[test]
    fn test_prepare_rejects_invalid() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_test(DiagnosticTest::new(0, 0, 10.0, 2.0));
        assert!(matches!(prepare(p), Err(InputError::Invalid(_))));
    }

    #[test]
    fn test_prepare_accepts_after_coercion() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_test(DiagnosticTest::new(0, 12, 10.0, 0.5));
        let prepared = prepare(p).unwrap();
        assert_eq!(prepared.tests[0].condition_id, 0);
    }
}
