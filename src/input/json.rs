//! JSON scenario files.
//!
//! A scenario is an [`AllocationProblem`] with an optional `config`
//! object alongside it:
//!
//! ```json
//! {
//!   "budget_max": 1000.0,
//!   "conditions": [{ "id": 0, "criticality": 80.0, "survivability": 70.0 }],
//!   "resources": [{ "id": "R0", "total_capacity": 50.0, "setup_cost": 500.0 }],
//!   "tests": [{ "id": 0, "condition_id": 0, "explicit_cost": 100.0,
//!               "positivity_probability": 0.8, "immediate_demand": [10.0] }],
//!   "config": { "low_priority_cutoff": 40.0 }
//! }
//! ```

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::config::AllocationConfig;
use crate::error::{InputError, InputResult};
use crate::models::AllocationProblem;

/// A problem plus optional run configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Scenario {
    /// The allocation problem.
    #[serde(flatten)]
    pub problem: AllocationProblem,
    /// Configuration overrides; `None` means defaults.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<AllocationConfig>,
}

impl Scenario {
    /// Wraps a problem with no configuration overrides.
    pub fn new(problem: AllocationProblem) -> Self {
        Self {
            problem,
            config: None,
        }
    }

    /// Attaches a configuration.
    pub fn with_config(mut self, config: AllocationConfig) -> Self {
        self.config = Some(config);
        self
    }
}

/// Parses a scenario from JSON text.
pub fn parse_scenario(text: &str) -> InputResult<Scenario> {
    Ok(serde_json::from_str(text)?)
}

/// Loads a scenario from a JSON file.
pub fn load_scenario(path: &Path) -> InputResult<Scenario> {
    let text = std::fs::read_to_string(path).map_err(|source| InputError::ReadFile {
        path: path.to_path_buf(),
        source,
    })?;
    parse_scenario(&text)
}

/// Writes a scenario as pretty-printed JSON.
pub fn save_scenario(path: &Path, scenario: &Scenario) -> InputResult<()> {
    let text = serde_json::to_string_pretty(scenario)?;
    std::fs::write(path, text).map_err(|source| InputError::WriteFile {
        path: path.to_path_buf(),
        source,
    })
}
