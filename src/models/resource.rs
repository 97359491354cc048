//! Resource model.
//!
//! Resources are the shared, capacity-limited facilities tests draw on:
//! analyzers, scanners, reagent lines, staffed slots. Each resource has a
//! total capacity for the time slice and an optional one-time setup cost
//! charged the first time any scheduled test switches it on.
//!
//! The position of a resource in the problem's resource list is
//! significant: resource 0 is the bottleneck reference used by the
//! priority score, the equity target and the utilization report.

use serde::{Deserialize, Serialize};

/// A capacity-limited shared resource (static input).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Resource {
    /// Unique resource identifier.
    pub id: String,
    /// Human-readable name.
    #[serde(default)]
    pub name: String,
    /// Units available in this time slice.
    pub total_capacity: f64,
    /// One-time cost charged on first use (0 = no setup needed).
    #[serde(default)]
    pub setup_cost: f64,
}

impl Resource {
    /// Creates a resource with the given capacity and no setup cost.
    pub fn new(id: impl Into<String>, total_capacity: f64) -> Self {
        Self {
            id: id.into(),
            name: String::new(),
            total_capacity,
            setup_cost: 0.0,
        }
    }

    /// Sets the resource name.
    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    /// Sets the one-time setup cost.
    pub fn with_setup_cost(mut self, setup_cost: f64) -> Self {
        self.setup_cost = setup_cost;
        self
    }
}

/// Per-run ledger view of a resource.
///
/// Created fresh from a [`Resource`] at the start of every allocation run.
/// Only the allocator's commit step mutates it.
///
/// # Invariants
/// - `remaining_capacity <= total_capacity`
/// - `future_demand_committed <= total_capacity` after every commit
/// - `utilized` flips to `true` at most once per run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceState {
    /// Source resource ID.
    pub resource_id: String,
    /// Total capacity (copied from the resource).
    pub total_capacity: f64,
    /// Capacity not yet consumed by immediate demand.
    pub remaining_capacity: f64,
    /// Whether the one-time setup cost has been charged.
    pub utilized: bool,
    /// One-time setup cost (copied from the resource).
    pub setup_cost: f64,
    /// Sum of projected future demand from tests scheduled so far.
    pub future_demand_committed: f64,
}

impl ResourceState {
    /// Fresh state: full capacity, nothing utilized, nothing committed.
    pub fn from_resource(resource: &Resource) -> Self {
        Self {
            resource_id: resource.id.clone(),
            total_capacity: resource.total_capacity,
            remaining_capacity: resource.total_capacity,
            utilized: false,
            setup_cost: resource.setup_cost,
            future_demand_committed: 0.0,
        }
    }

    /// Whether committing a test now would charge this resource's setup cost.
    #[inline]
    pub fn has_pending_setup(&self) -> bool {
        self.setup_cost > 0.0 && !self.utilized
    }

    /// Immediate capacity consumed so far.
    #[inline]
    pub fn used_capacity(&self) -> f64 {
        self.total_capacity - self.remaining_capacity
    }

    /// Immediate utilization as a percentage (0.0 for zero-capacity resources).
    pub fn utilization_percent(&self) -> f64 {
        if self.total_capacity > 0.0 {
            self.used_capacity() / self.total_capacity * 100.0
        } else {
            0.0
        }
    }
}
