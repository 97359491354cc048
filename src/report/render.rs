//! Plain-text rendering of an allocation report.

use std::fmt;

use super::AllocationReport;
use crate::models::AllocationPhase;

impl AllocationReport {
    fn fmt_phase(&self, f: &mut fmt::Formatter<'_>, phase: AllocationPhase) -> fmt::Result {
        for c in self.commits.iter().filter(|c| c.phase == phase) {
            writeln!(
                f,
                "  [{}] Scheduled Test {} (TPS: {:.2}) Cost: ${:.2}",
                c.phase, c.test_id, c.priority_score, c.total_cost_after
            )?;
        }
        Ok(())
    }
}

impl fmt::Display for AllocationReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "--- Starting Allocation ---")?;
        writeln!(f, "Equity Target (Min Low-Crit Slots): {}", self.equity_target)?;
        writeln!(f, "TPS Cutoff for Low-Crit: {:.2}", self.low_priority_cutoff)?;

        writeln!(f, "\n--- Phase 1: Equity Enforcement ---")?;
        self.fmt_phase(f, AllocationPhase::Equity)?;
        writeln!(
            f,
            "Equity Compliance: {} / {} met.",
            self.equity_count, self.equity_target
        )?;

        writeln!(f, "\n--- Phase 2: Utility Maximization ---")?;
        self.fmt_phase(f, AllocationPhase::Utility)?;

        writeln!(f, "\n--- System Output Metrics ---")?;
        writeln!(
            f,
            "Total Cost Incurred: ${:.2} (Max: ${:.2})",
            self.total_cost_spent, self.budget_max
        )?;
        writeln!(f, "Total Utility Achieved: {:.2}", self.total_utility_achieved)?;
        writeln!(
            f,
            "Equity Compliance Rate: {}",
            if self.equity_passed { "PASSED" } else { "FAILED" }
        )?;
        writeln!(
            f,
            "Resource 0 Utilization Rate (Immediate): {:.2}%",
            self.primary_utilization_percent
        )?;

        writeln!(f, "Uncovered Diagnostics (Deferred):")?;
        if self.deferred.is_empty() {
            writeln!(f, "  - None.")?;
        }
        for t in &self.deferred {
            writeln!(
                f,
                "  - Test {} (Condition {}, TPS: {:.2})",
                t.test_id, t.condition_id, t.priority_score
            )?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::allocator::TriageAllocator;
    use crate::input::preset;
    use crate::models::{AllocationProblem, Condition, DiagnosticTest, Resource};
    use crate::report::AllocationReport;

    fn render(problem: &AllocationProblem) -> String {
        let outcome = TriageAllocator::new().allocate(problem);
        AllocationReport::from_outcome(&outcome).to_string()
    }

    #[test]
    fn test_preset_text() {
        let text = render(&preset::example_problem());

        assert!(text.contains("Equity Target (Min Low-Crit Slots): 7\n"));
        assert!(text.contains("TPS Cutoff for Low-Crit: 50.00\n"));
        assert!(text.contains("  [Equity] Scheduled Test 1 (TPS: 3.42) Cost: $550.00\n"));
        assert!(text.contains("Equity Compliance: 1 / 7 met.\n"));
        assert!(text.contains("  [Triage] Scheduled Test 4"));
        assert!(text.contains("Total Cost Incurred: $850.00 (Max: $1000.00)\n"));
        assert!(text.contains("Total Utility Achieved: 15000.00\n"));
        assert!(text.contains("Equity Compliance Rate: FAILED\n"));
        assert!(text.contains("Resource 0 Utilization Rate (Immediate): 70.00%\n"));
        assert!(text.contains("  - Test 3 (Condition 2, TPS: 2.27)\n"));
        assert!(!text.contains("None."));
    }

    #[test]
    fn test_triage_lines_follow_commit_order() {
        let text = render(&preset::example_problem());
        let pos = |needle: &str| text.find(needle).unwrap();
        assert!(pos("[Triage] Scheduled Test 4") < pos("[Triage] Scheduled Test 0"));
        assert!(pos("[Triage] Scheduled Test 0") < pos("[Triage] Scheduled Test 2"));
        assert!(pos("Equity Compliance: 1 / 7") < pos("[Triage]"));
    }

    #[test]
    fn test_nothing_deferred() {
        let problem = AllocationProblem::new(1000.0)
            .with_condition(Condition::new(0, 90.0, 90.0))
            .with_resource(Resource::new("R0", 5.0))
            .with_test(DiagnosticTest::new(0, 0, 10.0, 0.5).with_demand(vec![1.0]));

        let text = render(&problem);
        assert!(text.contains("Uncovered Diagnostics (Deferred):\n  - None.\n"));
        assert!(text.contains("Equity Compliance Rate: PASSED\n"));
        assert!(text.contains("Resource 0 Utilization Rate (Immediate): 20.00%\n"));
    }
}
