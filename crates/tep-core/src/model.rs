//! Domain entities for expansion planning.
//!
//! All power quantities share one unit (the unit `s_base` is given in);
//! the optimization layer divides by the base to obtain per-unit values.
//! Entities are immutable by convention: they are constructed once, cloned
//! freely, and never mutated during an optimization run.

use crate::{LineId, NodeId, PlantId};
use serde::{Deserialize, Serialize};

/// A generating unit attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PowerPlant {
    /// Unique identifier
    pub id: PlantId,
    /// Rated maximum active-power output, in system power units (>= 0)
    pub capacity: f64,
}

impl PowerPlant {
    pub fn new(id: PlantId, capacity: f64) -> Self {
        Self { id, capacity }
    }
}

/// A constant active-power demand attached to a node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Load {
    /// Demanded active power, in system power units (>= 0)
    pub value: f64,
}

impl Load {
    pub fn new(value: f64) -> Self {
        Self { value }
    }
}

/// A bus in the network, carrying its loads and generating units.
///
/// Nodes are identified by [`NodeId`]; every line endpoint referring to the
/// same id must carry the same loads and plants (checked during
/// aggregation, see [`crate::Topology::from_lines`]).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Node {
    /// Unique identifier
    pub id: NodeId,
    /// Demands served at this node
    #[serde(default)]
    pub loads: Vec<Load>,
    /// Generating units connected at this node
    #[serde(default)]
    pub power_plants: Vec<PowerPlant>,
}

impl Node {
    /// Create an empty node (no loads, no plants).
    pub fn new(id: NodeId) -> Self {
        Self {
            id,
            loads: Vec::new(),
            power_plants: Vec::new(),
        }
    }

    /// Attach a load.
    pub fn with_load(mut self, load: Load) -> Self {
        self.loads.push(load);
        self
    }

    /// Attach a generating unit.
    pub fn with_plant(mut self, plant: PowerPlant) -> Self {
        self.power_plants.push(plant);
        self
    }

    /// Sum of all demands at this node.
    pub fn total_load(&self) -> f64 {
        self.loads.iter().map(|l| l.value).sum()
    }

    /// Sum of the rated capacities of all plants at this node.
    pub fn total_generation_capacity(&self) -> f64 {
        self.power_plants.iter().map(|p| p.capacity).sum()
    }
}

/// A transmission corridor between two nodes, existing or candidate.
///
/// The line is electrically undirected; `node_start`/`node_end` order only
/// fixes the sign convention for flow terms. Candidate lines
/// (`is_real = false`) are built only if the optimizer selects them;
/// existing lines (`is_real = true`) are always in service.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TransmissionLine {
    /// Unique identifier
    pub id: LineId,
    /// Maximum transferable active power, in system power units (>= 0)
    pub capacity: f64,
    /// Series reactance in per-unit (> 0)
    pub reactance: f64,
    /// First endpoint
    pub node_start: Node,
    /// Second endpoint
    pub node_end: Node,
    /// Corridor length, in miles (> 0)
    pub length: f64,
    /// Construction cost per mile of corridor
    #[serde(default = "default_cost_per_mile")]
    pub cost_per_mile: f64,
    /// Whether the line already exists and is always in service
    #[serde(default)]
    pub is_real: bool,
}

fn default_cost_per_mile() -> f64 {
    1e6
}

impl TransmissionLine {
    /// Create a candidate line with the default cost per mile (1e6).
    pub fn new(
        id: impl Into<LineId>,
        capacity: f64,
        reactance: f64,
        node_start: Node,
        node_end: Node,
        length: f64,
    ) -> Self {
        Self {
            id: id.into(),
            capacity,
            reactance,
            node_start,
            node_end,
            length,
            cost_per_mile: default_cost_per_mile(),
            is_real: false,
        }
    }

    /// Override the construction cost per mile.
    pub fn with_cost_per_mile(mut self, cost_per_mile: f64) -> Self {
        self.cost_per_mile = cost_per_mile;
        self
    }

    /// Mark the line as already built and in service.
    pub fn existing(mut self) -> Self {
        self.is_real = true;
        self
    }

    /// Construction cost of the full corridor.
    pub fn capital_cost(&self) -> f64 {
        self.cost_per_mile * self.length
    }

    /// Susceptance b = 1/x in per-unit.
    ///
    /// Callers must hold a validated topology: aggregation rejects
    /// non-positive reactances before this value is ever used.
    pub fn susceptance(&self) -> f64 {
        1.0 / self.reactance
    }
}
