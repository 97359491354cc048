//! Allocation reporting.
//!
//! Turns an [`AllocationOutcome`](crate::allocator::AllocationOutcome)
//! into the figures an operator reviews after a run, and renders them as
//! text or JSON.
//!
//! # Metrics
//!
//! | Metric | Definition |
//! |--------|-----------|
//! | Total cost | Explicit plus setup costs charged |
//! | Total utility | Sum of criticality × survivability over scheduled tests |
//! | Equity compliance | `equity_count >= equity_target` |
//! | Resource 0 utilization | `(total - remaining) / total × 100` |
//! | Deferred | Unscheduled tests with condition and final score |

mod metrics;
mod render;

pub use metrics::{AllocationReport, ReportedTest, ResourceUtilization};
