//! Equity-constrained triage allocation.
//!
//! Decides which diagnostic tests to run within a fixed budget and finite
//! shared capacity. A two-phase greedy allocator first guarantees a floor
//! of low-priority tests (equity), then fills what remains by priority
//! score (utility).
//!
//! # Modules
//!
//! - **`models`**: Domain types: `Condition`, `Resource`, `DiagnosticTest`,
//!   `Ledger`, `AllocationProblem`
//! - **`scoring`**: Marginal cost projection and priority scoring
//! - **`feasibility`**: Capacity and budget checks with typed skip reasons
//! - **`allocator`**: Allocation session and the two-phase greedy allocator
//! - **`report`**: Post-run metrics and text rendering
//! - **`input`**: Preset, JSON, interactive and synthetic problem sources
//! - **`validation`**: Input integrity checks (duplicate IDs, references, ranges)
//! - **`config`**: Tunable allocation parameters
//!
//! # Architecture
//!
//! The core (`scoring`, `feasibility`, `allocator`, `report`) is
//! infallible and pure: one call to
//! [`TriageAllocator::allocate`](allocator::TriageAllocator::allocate)
//! owns all run state. Everything fallible lives in `input`.
//!
//! # Example
//!
//! ```
//! use u_triage::allocator::TriageAllocator;
//! use u_triage::input::preset;
//! use u_triage::report::AllocationReport;
//!
//! let outcome = TriageAllocator::new().allocate(&preset::example_problem());
//! let report = AllocationReport::from_outcome(&outcome);
//! assert_eq!(report.equity_target, 7);
//! assert!(!report.equity_passed);
//! ```

pub mod allocator;
pub mod config;
pub mod error;
pub mod feasibility;
pub mod input;
pub mod models;
pub mod report;
pub mod scoring;
pub mod validation;
