//! Allocation run configuration.
//!
//! Constants that shape a run: the equity floor fraction, the
//! low-priority cutoff, the planning-horizon factor and the tie-break
//! rule for candidate ordering. Defaults reproduce the reference
//! allocation policy; a scenario file or CLI flags may override them.

use serde::{Deserialize, Serialize};

use crate::allocator::TieBreaker;

/// Default share of resource-0 capacity reserved for low-priority tests.
pub const DEFAULT_EQUITY_FRACTION: f64 = 0.15;

/// Default priority score below which a test counts as low priority.
pub const DEFAULT_LOW_PRIORITY_CUTOFF: f64 = 50.0;

/// Default planning-horizon factor (single period).
pub const DEFAULT_HORIZON_FACTOR: f64 = 1.0;

/// Configuration for one allocation run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AllocationConfig {
    /// Fraction of resource-0 capacity forming the equity target.
    pub equity_fraction: f64,
    /// Tests scoring strictly below this enter the equity pool.
    pub low_priority_cutoff: f64,
    /// Multiplier turning positivity probability into future demand.
    pub horizon_factor: f64,
    /// Secondary ordering for equal sort keys.
    pub tie_breaker: TieBreaker,
}

impl Default for AllocationConfig {
    fn default() -> Self {
        Self {
            equity_fraction: DEFAULT_EQUITY_FRACTION,
            low_priority_cutoff: DEFAULT_LOW_PRIORITY_CUTOFF,
            horizon_factor: DEFAULT_HORIZON_FACTOR,
            tie_breaker: TieBreaker::default(),
        }
    }
}

impl AllocationConfig {
    /// Creates the default configuration.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the equity fraction.
    pub fn with_equity_fraction(mut self, fraction: f64) -> Self {
        self.equity_fraction = fraction;
        self
    }

    /// Sets the low-priority cutoff.
    pub fn with_low_priority_cutoff(mut self, cutoff: f64) -> Self {
        self.low_priority_cutoff = cutoff;
        self
    }

    /// Sets the planning-horizon factor.
    pub fn with_horizon_factor(mut self, factor: f64) -> Self {
        self.horizon_factor = factor;
        self
    }

    /// Sets the tie-break rule.
    pub fn with_tie_breaker(mut self, tie_breaker: TieBreaker) -> Self {
        self.tie_breaker = tie_breaker;
        self
    }

    /// Equity target: `floor(equity_fraction * capacity)`, saturating at 0.
    ///
    /// `None` (no resource configured) yields 0.
    pub fn equity_target(&self, primary_capacity: Option<f64>) -> usize {
        let raw = (self.equity_fraction * primary_capacity.unwrap_or(0.0)).floor();
        if raw.is_finite() && raw > 0.0 {
            raw as usize
        } else {
            0
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let c = AllocationConfig::default();
        assert!((c.equity_fraction - 0.15).abs() < 1e-12);
        assert!((c.low_priority_cutoff - 50.0).abs() < 1e-12);
        assert!((c.horizon_factor - 1.0).abs() < 1e-12);
        assert_eq!(c.tie_breaker, TieBreaker::ById);
    }

    #[test]
    fn test_equity_target_floors() {
        let c = AllocationConfig::default();
        // 0.15 * 50 = 7.5
        assert_eq!(c.equity_target(Some(50.0)), 7);
        assert_eq!(c.equity_target(Some(100.0)), 15);
        assert_eq!(c.equity_target(Some(6.0)), 0);
    }

    #[test]
    fn test_equity_target_without_resources() {
        assert_eq!(AllocationConfig::default().equity_target(None), 0);
    }

    #[test]
    fn test_equity_target_negative_saturates() {
        let c = AllocationConfig::new().with_equity_fraction(-0.5);
        assert_eq!(c.equity_target(Some(50.0)), 0);
    }

    #[test]
    fn test_partial_deserialize_keeps_defaults() {
        let c: AllocationConfig = serde_json::from_str(r#"{"low_priority_cutoff": 20.0}"#).unwrap();
        assert!((c.low_priority_cutoff - 20.0).abs() < 1e-12);
        assert!((c.equity_fraction - 0.15).abs() < 1e-12);
        assert_eq!(c.tie_breaker, TieBreaker::ById);
    }

    #[test]
    fn test_builder() {
        let c = AllocationConfig::new()
            .with_equity_fraction(0.2)
            .with_low_priority_cutoff(10.0)
            .with_horizon_factor(2.0)
            .with_tie_breaker(TieBreaker::InputOrder);
        assert!((c.equity_fraction - 0.2).abs() < 1e-12);
        assert!((c.low_priority_cutoff - 10.0).abs() < 1e-12);
        assert!((c.horizon_factor - 2.0).abs() < 1e-12);
        assert_eq!(c.tie_breaker, TieBreaker::InputOrder);
    }
}
