//! Interactive data entry.
//!
//! Walks the operator through budget, counts, condition weights,
//! resource capacities and per-test figures. Answers are
//! whitespace-separated tokens, so several answers may share a line.
//! A condition answer outside the configured range falls back to
//! condition 0.

use std::collections::VecDeque;
use std::io::{BufRead, Write};
use std::str::FromStr;

use tracing::warn;

use crate::error::{InputError, InputResult};
use crate::models::{AllocationProblem, Condition, DiagnosticTest, Resource};

/// Prompt-driven reader of an [`AllocationProblem`].
pub struct Prompter<R, W> {
    reader: R,
    writer: W,
    pending: VecDeque<String>,
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    /// Creates a prompter over the given input and prompt output.
    pub fn new(reader: R, writer: W) -> Self {
        Self {
            reader,
            writer,
            pending: VecDeque::new(),
        }
    }

    /// Runs the full prompt sequence.
    pub fn read_problem(&mut self) -> InputResult<AllocationProblem> {
        writeln!(self.writer, "\n*** Data Input for Allocation ***")?;

        let budget_max: f64 = self.ask("Enter Total Budget B_Max ($): ", "budget")?;
        let resource_count: usize =
            self.ask("Enter number of Resource Categories: ", "resource count")?;
        let condition_count: usize =
            self.ask("Enter number of Health Conditions: ", "condition count")?;
        let test_count: usize = self.ask("Enter number of Diagnostic Tests: ", "test count")?;

        let mut problem = AllocationProblem::new(budget_max);

        writeln!(self.writer, "\n--- Condition Data ---")?;
        for k in 0..condition_count {
            writeln!(self.writer, "Condition {k}:")?;
            let criticality = self.ask("  Criticality W_Crit (Score): ", "criticality")?;
            let survivability = self.ask("  Survivability W_Surv (Score): ", "survivability")?;
            problem
                .conditions
                .push(Condition::new(k, criticality, survivability));
        }

        writeln!(self.writer, "\n--- Resource and Capacity Data ---")?;
        for j in 0..resource_count {
            writeln!(self.writer, "Resource {j}:")?;
            let capacity = self.ask("  Total Capacity (Units/Time): ", "capacity")?;
            let setup_cost = self.ask("  Shared Resource Setup Cost ($): ", "setup cost")?;
            problem
                .resources
                .push(Resource::new(format!("R{j}"), capacity).with_setup_cost(setup_cost));
        }

        writeln!(self.writer, "\n--- Test and Cost Data ---")?;
        for i in 0..test_count {
            writeln!(self.writer, "Test {i}:")?;
            let prompt = format!(
                "  Screens for Condition ID (0 to {}): ",
                condition_count.saturating_sub(1)
            );
            let raw: i64 = self.ask(&prompt, "condition id")?;
            let condition_id = match usize::try_from(raw) {
                Ok(k) if k < condition_count => k,
                _ => {
                    warn!(test_id = i, answer = raw, "condition out of range, using 0");
                    0
                }
            };

            let explicit_cost = self.ask("  Explicit Test Cost ($): ", "test cost")?;
            let probability = self.ask("  Prevalence P_Pos (0-1): ", "positivity probability")?;

            let mut demand = Vec::with_capacity(resource_count);
            for j in 0..resource_count {
                let prompt = format!("  Immediate Demand on resource {j} (Units/Time): ");
                demand.push(self.ask(&prompt, "immediate demand")?);
            }

            problem.tests.push(
                DiagnosticTest::new(i, condition_id, explicit_cost, probability).with_demand(demand),
            );
        }

        Ok(problem)
    }

    fn ask<T: FromStr>(&mut self, prompt: &str, field: &str) -> InputResult<T> {
        write!(self.writer, "{prompt}")?;
        self.writer.flush()?;
        let token = self.next_token(field)?;
        token.parse().map_err(|_| InputError::Parse {
            field: field.to_string(),
            value: token,
        })
    }

    fn next_token(&mut self, field: &str) -> InputResult<String> {
        loop {
            if let Some(token) = self.pending.pop_front() {
                return Ok(token);
            }
            let mut line = String::new();
            if self.reader.read_line(&mut line)? == 0 {
                return Err(InputError::UnexpectedEof(field.to_string()));
            }
            self.pending
                .extend(line.split_whitespace().map(str::to_string));
        }
    }
}
