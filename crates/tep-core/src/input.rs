//! Serde records for network definition files.
//!
//! The on-disk format keeps one record per line, referencing its endpoints
//! by node id, with the node definitions (loads and plants attached) given
//! once in a separate list:
//!
//! ```json
//! {
//!   "s_base": 100e6,
//!   "nodes": [
//!     { "id": 1, "power_plants": [{ "id": 1, "capacity": 150e6 }] },
//!     { "id": 2, "loads": [{ "value": 120e6 }] }
//!   ],
//!   "lines": [
//!     { "id": "1-2", "capacity": 100e6, "reactance": 0.4,
//!       "from": 1, "to": 2, "length": 40.0, "is_real": true }
//!   ]
//! }
//! ```
//!
//! `cost_per_mile` and `is_real` are optional and default to `1e6` and
//! `false`, matching [`TransmissionLine`]'s own serde defaults.

use crate::{LineId, ModelError, Node, NodeId, TransmissionLine};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// One transmission line, endpoints referenced by node id.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineRecord {
    pub id: LineId,
    pub capacity: f64,
    pub reactance: f64,
    pub from: NodeId,
    pub to: NodeId,
    pub length: f64,
    #[serde(default = "default_cost_per_mile")]
    pub cost_per_mile: f64,
    #[serde(default)]
    pub is_real: bool,
}

fn default_cost_per_mile() -> f64 {
    1e6
}

/// A complete network definition: base power, nodes, and line records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SystemSpec {
    /// Apparent-power base for per-unit conversion
    pub s_base: f64,
    /// Node definitions, each id given once
    pub nodes: Vec<Node>,
    /// One record per transmission line
    pub lines: Vec<LineRecord>,
}

impl SystemSpec {
    /// Resolve line records against the node list.
    ///
    /// Each node id must be defined exactly once and each endpoint id must
    /// be defined in `nodes`; resolution clones the full node definition
    /// into both lines touching it, so downstream aggregation sees
    /// consistent endpoint instances by construction. A repeated node id is
    /// rejected here, since resolving against one of the duplicates would
    /// hide the conflict from the aggregation check.
    pub fn to_lines(&self) -> Result<Vec<TransmissionLine>, ModelError> {
        let mut registry: BTreeMap<NodeId, &Node> = BTreeMap::new();
        for node in &self.nodes {
            if registry.insert(node.id, node).is_some() {
                return Err(ModelError::InconsistentNode(node.id));
            }
        }

        let resolve = |line: &LineId, id: NodeId| -> Result<Node, ModelError> {
            registry
                .get(&id)
                .map(|n| (*n).clone())
                .ok_or(ModelError::UnknownNode {
                    line: line.clone(),
                    node: id,
                })
        };

        self.lines
            .iter()
            .map(|rec| {
                let node_start = resolve(&rec.id, rec.from)?;
                let node_end = resolve(&rec.id, rec.to)?;
                Ok(TransmissionLine {
                    id: rec.id.clone(),
                    capacity: rec.capacity,
                    reactance: rec.reactance,
                    node_start,
                    node_end,
                    length: rec.length,
                    cost_per_mile: rec.cost_per_mile,
                    is_real: rec.is_real,
                })
            })
            .collect()
    }
}
