//! Input validation for allocation problems.
//!
//! Checks structural integrity of conditions, resources and tests before
//! an allocation run. The allocator itself assumes valid input; this is
//! where the input layer finds out it isn't. Detects:
//! - Duplicate IDs
//! - Tests referencing unknown conditions
//! - Negative or non-finite weights, capacities, costs and demands
//! - Positivity probabilities outside [0, 1]
//! - Demand vectors naming more resources than are configured

use crate::models::AllocationProblem;
use std::collections::HashSet;

/// Validation result.
pub type ValidationResult = Result<(), Vec<ValidationError>>;

/// A validation error.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
#[error("{message}")]
pub struct ValidationError {
    /// Error category.
    pub kind: ValidationErrorKind,
    /// Human-readable description.
    pub message: String,
}

/// Categories of validation errors.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationErrorKind {
    /// Two entities of the same kind share an ID.
    DuplicateId,
    /// A test references a condition that doesn't exist.
    InvalidConditionReference,
    /// A quantity that must be non-negative is negative.
    NegativeValue,
    /// A quantity is NaN or infinite.
    NonFiniteValue,
    /// Positivity probability outside [0, 1].
    ProbabilityOutOfRange,
    /// A demand vector is longer than the resource list.
    DemandLengthMismatch,
}

impl ValidationError {
    pub(crate) fn new(kind: ValidationErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

fn check_quantity(errors: &mut Vec<ValidationError>, what: impl FnOnce() -> String, value: f64) {
    if !value.is_finite() {
        errors.push(ValidationError::new(
            ValidationErrorKind::NonFiniteValue,
            format!("{} is not finite", what()),
        ));
    } else if value < 0.0 {
        errors.push(ValidationError::new(
            ValidationErrorKind::NegativeValue,
            format!("{} is negative ({value})", what()),
        ));
    }
}

/// Validates an allocation problem.
///
/// Checks:
/// 1. Budget is finite and non-negative
/// 2. No duplicate condition, resource or test IDs
/// 3. Condition weights are finite and non-negative
/// 4. Resource capacities and setup costs are finite and non-negative
/// 5. Every test references an existing condition
/// 6. Test costs and demands are finite and non-negative
/// 7. Positivity probabilities lie in [0, 1]
/// 8. No demand vector is longer than the resource list
///
/// # Returns
/// `Ok(())` if all checks pass, `Err(errors)` with all detected issues.
pub fn validate_problem(problem: &AllocationProblem) -> ValidationResult {
    let mut errors = Vec::new();

    check_quantity(&mut errors, || "Budget".to_string(), problem.budget_max);

    let mut condition_ids = HashSet::new();
    for c in &problem.conditions {
        if !condition_ids.insert(c.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate condition ID: {}", c.id),
            ));
        }
        check_quantity(&mut errors, || format!("Condition {} criticality", c.id), c.criticality);
        check_quantity(&mut errors, || format!("Condition {} survivability", c.id), c.survivability);
    }

    let mut resource_ids = HashSet::new();
    for r in &problem.resources {
        if !resource_ids.insert(r.id.as_str()) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate resource ID: {}", r.id),
            ));
        }
        check_quantity(&mut errors, || format!("Resource '{}' capacity", r.id), r.total_capacity);
        check_quantity(&mut errors, || format!("Resource '{}' setup cost", r.id), r.setup_cost);
    }

    let mut test_ids = HashSet::new();
    for t in &problem.tests {
        if !test_ids.insert(t.id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::DuplicateId,
                format!("Duplicate test ID: {}", t.id),
            ));
        }

        if !condition_ids.contains(&t.condition_id) {
            errors.push(ValidationError::new(
                ValidationErrorKind::InvalidConditionReference,
                format!("Test {} references unknown condition {}", t.id, t.condition_id),
            ));
        }

        check_quantity(&mut errors, || format!("Test {} cost", t.id), t.explicit_cost);

        let p = t.positivity_probability;
        if !(0.0..=1.0).contains(&p) {
            errors.push(ValidationError::new(
                ValidationErrorKind::ProbabilityOutOfRange,
                format!("Test {} positivity probability {p} is outside [0, 1]", t.id),
            ));
        }

        if t.immediate_demand.len() > problem.resources.len() {
            errors.push(ValidationError::new(
                ValidationErrorKind::DemandLengthMismatch,
                format!(
                    "Test {} lists demand for {} resources, only {} configured",
                    t.id,
                    t.immediate_demand.len(),
                    problem.resources.len()
                ),
            ));
        }
        for (j, &d) in t.immediate_demand.iter().enumerate() {
            check_quantity(&mut errors, || format!("Test {} demand on resource {j}", t.id), d);
        }
    }

    if errors.is_empty() {
        Ok(())
    } else {
        Err(errors)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::preset;
    use crate::models::{Condition, DiagnosticTest, Resource};

    fn has(errors: &[ValidationError], kind: ValidationErrorKind) -> bool {
        errors.iter().any(|e| e.kind == kind)
    }

    #[test]
    fn test_preset_is_valid() {
        assert!(validate_problem(&preset::example_problem()).is_ok());
    }

    #[test]
    fn test_duplicate_test_id() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_test(DiagnosticTest::new(1, 0, 10.0, 0.1))
            .with_test(DiagnosticTest::new(1, 0, 20.0, 0.1));

        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("test")));
    }

    #[test]
    fn test_duplicate_resource_id() {
        let p = AllocationProblem::new(100.0)
            .with_resource(Resource::new("R0", 10.0))
            .with_resource(Resource::new("R0", 20.0));

        let errors = validate_problem(&p).unwrap_err();
        assert!(errors
            .iter()
            .any(|e| e.kind == ValidationErrorKind::DuplicateId && e.message.contains("resource")));
    }

    #[test]
    fn test_unknown_condition() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_test(DiagnosticTest::new(0, 4, 10.0, 0.1));

        let errors = validate_problem(&p).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::InvalidConditionReference));
    }

    #[test]
    fn test_probability_out_of_range() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_test(DiagnosticTest::new(0, 0, 10.0, 1.2));

        let errors = validate_problem(&p).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::ProbabilityOutOfRange));
    }

    #[test]
    fn test_negative_and_non_finite_values() {
        let p = AllocationProblem::new(f64::NAN)
            .with_condition(Condition::new(0, -1.0, 1.0))
            .with_resource(Resource::new("R0", -5.0))
            .with_test(DiagnosticTest::new(0, 0, 10.0, 0.1).with_demand(vec![f64::INFINITY]));

        let errors = validate_problem(&p).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::NegativeValue));
        assert!(has(&errors, ValidationErrorKind::NonFiniteValue));
        assert_eq!(errors.len(), 4);
    }

    #[test]
    fn test_demand_longer_than_resources() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_resource(Resource::new("R0", 10.0))
            .with_test(DiagnosticTest::new(0, 0, 10.0, 0.1).with_demand(vec![1.0, 2.0]));

        let errors = validate_problem(&p).unwrap_err();
        assert!(has(&errors, ValidationErrorKind::DemandLengthMismatch));
    }

    #[test]
    fn test_short_demand_is_allowed() {
        let p = AllocationProblem::new(100.0)
            .with_condition(Condition::new(0, 1.0, 1.0))
            .with_resource(Resource::new("R0", 10.0))
            .with_resource(Resource::new("R1", 10.0))
            .with_test(DiagnosticTest::new(0, 0, 10.0, 0.1).with_demand(vec![1.0]));

        assert!(validate_problem(&p).is_ok());
    }

    #[test]
    fn test_multiple_errors() {
        let p = AllocationProblem::new(-1.0)
            .with_test(DiagnosticTest::new(0, 0, 10.0, 0.1));

        let errors = validate_problem(&p).unwrap_err();
        assert!(errors.len() >= 2);
    }
}
