//! Two-phase greedy allocation.
//!
//! Provides the crate-private allocation session (per-run ledger plus
//! the commit operation), candidate ordering, and the [`TriageAllocator`] that runs
//! the equity and utility phases.
//!
//! # Algorithm
//!
//! `TriageAllocator` is a single-pass, irrevocable greedy heuristic. It
//! first secures an equity floor of low-priority tests (cheapest in
//! resource-0 demand first), then maximizes utility by walking the
//! remaining tests in descending priority. It is not optimal: there is
//! no backtracking and no knapsack/LP guarantee.
//!
//! # Determinism
//!
//! Pool sorts always apply an explicit [`TieBreaker`]; identical input
//! produces identical output across runs.

mod greedy;
mod ordering;
mod outcome;
mod session;

pub use greedy::TriageAllocator;
pub use ordering::{sort_pool, PoolEntry, SortDirection, TieBreaker};
pub use outcome::{AllocationOutcome, CommitRecord, TestOutcome};
