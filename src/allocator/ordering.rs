//! Candidate pool ordering.
//!
//! Both phases walk a sorted copy of the candidates. The primary key is
//! the phase's sort key (resource-0 demand ascending for equity, priority
//! score descending for utility); ties are resolved by an explicit
//! [`TieBreaker`] so that identical input always yields identical output.

use serde::{Deserialize, Serialize};

/// How equal primary keys are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TieBreaker {
    /// Ascending test ID.
    #[default]
    ById,
    /// Order in which tests appear in the problem (stable sort).
    InputOrder,
}

/// Sort direction of the primary key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    /// Smallest key first.
    Ascending,
    /// Largest key first.
    Descending,
}

/// A candidate in a phase pool: a sort key plus the handles needed to
/// map back to the canonical test and its state.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PoolEntry {
    /// Position of the test in the problem's test list.
    pub position: usize,
    /// Stable test ID.
    pub test_id: usize,
    /// Primary sort key.
    pub key: f64,
}

/// Sorts a pool in place by key, then by the tie-breaker.
///
/// Keys are compared with [`f64::total_cmp`], so the order stays total
/// even if a NaN slips in (positive NaN ranks above every finite key).
pub fn sort_pool(pool: &mut [PoolEntry], direction: SortDirection, tie_breaker: TieBreaker) {
    pool.sort_by(|a, b| {
        let primary = a.key.total_cmp(&b.key);
        let primary = match direction {
            SortDirection::Ascending => primary,
            SortDirection::Descending => primary.reverse(),
        };
        match tie_breaker {
            TieBreaker::ById => primary.then_with(|| a.test_id.cmp(&b.test_id)),
            TieBreaker::InputOrder => primary,
        }
    });
}
