//! Triage priority score (TPS).
//!
//! ```text
//! TPS = (criticality * survivability) / (marginal_cost + immediate_demand[0])
//! ```
//!
//! Only resource 0 contributes a time-demand term; it is the bottleneck
//! reference. With no resources configured the term is 0. A non-positive
//! denominator yields a score of 0 instead of a division, and so does a
//! quotient that overflows to infinity or NaN.

use crate::models::DiagnosticTest;

/// Computes the triage priority score.
#[derive(Debug, Clone, Copy, Default)]
pub struct PriorityScorer;

impl PriorityScorer {
    /// Score from a utility numerator, marginal cost and time demand.
    pub fn score(utility: f64, marginal_cost: f64, time_demand: f64) -> f64 {
        let denominator = marginal_cost + time_demand;
        if denominator <= 0.0 {
            return 0.0;
        }
        let score = utility / denominator;
        if score.is_finite() {
            score
        } else {
            0.0
        }
    }

    /// Time-demand term: the test's demand on resource 0, if any exists.
    pub fn time_demand(test: &DiagnosticTest, resource_count: usize) -> f64 {
        if resource_count > 0 {
            test.demand_on(0)
        } else {
            0.0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_score_formula() {
        // 5600 / (550 + 5)
        let s = PriorityScorer::score(5600.0, 550.0, 5.0);
        assert!((s - 5600.0 / 555.0).abs() < 1e-12);
    }

    #[test]
    fn test_zero_denominator_scores_zero() {
        assert_eq!(PriorityScorer::score(5600.0, 0.0, 0.0), 0.0);
    }

    #[test]
    fn test_negative_denominator_scores_zero() {
        assert_eq!(PriorityScorer::score(100.0, -10.0, 2.0), 0.0);
    }

    #[test]
    fn test_overflowing_terms_score_zero() {
        // inf / inf and inf / finite
        assert_eq!(PriorityScorer::score(f64::INFINITY, f64::INFINITY, 0.0), 0.0);
        assert_eq!(PriorityScorer::score(f64::INFINITY, 10.0, 1.0), 0.0);
        assert_eq!(PriorityScorer::score(f64::NAN, 10.0, 1.0), 0.0);
    }

    #[test]
    fn test_time_demand_uses_resource_zero_only() {
        let t = DiagnosticTest::new(0, 0, 10.0, 0.1).with_demand(vec![3.0, 40.0]);
        assert!((PriorityScorer::time_demand(&t, 2) - 3.0).abs() < 1e-12);
    }

    #[test]
    fn test_time_demand_without_resources() {
        let t = DiagnosticTest::new(0, 0, 10.0, 0.1).with_demand(vec![3.0]);
        assert_eq!(PriorityScorer::time_demand(&t, 0), 0.0);
    }
}
