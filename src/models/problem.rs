//! Allocation problem (input container).

use serde::{Deserialize, Serialize};

use super::{Condition, DiagnosticTest, Resource};

/// Everything one allocation run consumes.
///
/// Populated once by an input collaborator (preset, JSON file, prompts,
/// synthetic generator) and treated as read-only by the allocator.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AllocationProblem {
    /// Budget ceiling for the time slice.
    pub budget_max: f64,
    /// Conditions referenced by tests.
    #[serde(default)]
    pub conditions: Vec<Condition>,
    /// Shared resources; index 0 is the bottleneck reference.
    #[serde(default)]
    pub resources: Vec<Resource>,
    /// Candidate tests.
    #[serde(default)]
    pub tests: Vec<DiagnosticTest>,
}

impl AllocationProblem {
    /// Creates an empty problem with the given budget.
    pub fn new(budget_max: f64) -> Self {
        Self {
            budget_max,
            ..Default::default()
        }
    }

    /// Adds a condition.
    pub fn with_condition(mut self, condition: Condition) -> Self {
        self.conditions.push(condition);
        self
    }

    /// Adds a resource.
    pub fn with_resource(mut self, resource: Resource) -> Self {
        self.resources.push(resource);
        self
    }

    /// Adds a test.
    pub fn with_test(mut self, test: DiagnosticTest) -> Self {
        self.tests.push(test);
        self
    }

    /// Finds a condition by ID.
    pub fn condition(&self, id: usize) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.id == id)
    }

    /// Finds a test by ID.
    pub fn test(&self, id: usize) -> Option<&DiagnosticTest> {
        self.tests.iter().find(|t| t.id == id)
    }

    /// The bottleneck reference resource, if any resource is configured.
    pub fn primary_resource(&self) -> Option<&Resource> {
        self.resources.first()
    }

    /// Number of candidate tests.
    pub fn test_count(&self) -> usize {
        self.tests.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builder_and_lookup() {
        let p = AllocationProblem::new(1000.0)
            .with_condition(Condition::new(0, 80.0, 70.0))
            .with_condition(Condition::new(5, 20.0, 95.0))
            .with_resource(Resource::new("R0", 50.0))
            .with_test(DiagnosticTest::new(10, 5, 50.0, 0.1));

        assert_eq!(p.test_count(), 1);
        assert_eq!(p.condition(5).map(|c| c.criticality), Some(20.0));
        assert!(p.condition(1).is_none());
        assert_eq!(p.test(10).map(|t| t.condition_id), Some(5));
        assert_eq!(p.primary_resource().map(|r| r.id.as_str()), Some("R0"));
    }

    #[test]
    fn test_empty_problem_has_no_primary_resource() {
        let p = AllocationProblem::new(0.0);
        assert!(p.primary_resource().is_none());
        assert_eq!(p.test_count(), 0);
    }
}
