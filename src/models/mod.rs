//! Allocation domain models.
//!
//! Provides the core data types for describing a triage allocation
//! problem and the mutable ledger an allocation run works against.
//! Static input records (`Condition`, `Resource`, `DiagnosticTest`) are
//! never mutated once loaded; everything that changes during a run lives
//! in the per-run state types (`ResourceState`, `TestState`, `Ledger`).
//!
//! # Domain Mappings
//!
//! | u-triage | Laboratory | Imaging | Field screening |
//! |----------|-----------|---------|-----------------|
//! | Condition | Disease panel | Indication | Outbreak target |
//! | Resource | Analyzer / reagent line | Scanner | Mobile unit |
//! | DiagnosticTest | Assay order | Scan request | Screening visit |
//! | Ledger | Lab budget sheet | Department budget | Campaign budget |

mod condition;
mod diagnostic;
mod ledger;
mod problem;
mod resource;

pub use condition::Condition;
pub use diagnostic::{DiagnosticTest, TestState};
pub use ledger::{AllocationPhase, Ledger};
pub use problem::AllocationProblem;
pub use resource::{Resource, ResourceState};
