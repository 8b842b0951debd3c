//! # tep-core: Transmission Expansion Planning Data Model
//!
//! Provides the domain entities for transmission expansion planning (TEP)
//! studies and the aggregation step that turns a flat list of transmission
//! lines into a validated network topology.
//!
//! ## Design Philosophy
//!
//! The network is described **implicitly by its lines**: every
//! [`TransmissionLine`] carries full copies of its two endpoint [`Node`]s,
//! and [`Topology`] derives the distinct node and power-plant sets from the
//! line list. Entity identity is carried purely by typed IDs ([`NodeId`],
//! [`PlantId`], [`LineId`]); two endpoint instances describing the same node
//! must agree structurally, and aggregation fails fast when they do not.
//!
//! ## Quick Start
//!
//! ```rust
//! use tep_core::*;
//!
//! let gen = Node::new(NodeId::new(1))
//!     .with_plant(PowerPlant::new(PlantId::new(1), 150e6));
//! let city = Node::new(NodeId::new(2)).with_load(Load::new(120e6));
//!
//! let lines = vec![
//!     TransmissionLine::new("1-2", 100e6, 0.40, gen, city, 40.0).existing(),
//! ];
//!
//! let topology = Topology::from_lines(&lines)?;
//! assert_eq!(topology.node_count(), 2);
//! assert_eq!(topology.susceptance()[0], 2.5);
//! # Ok::<(), tep_core::ModelError>(())
//! ```
//!
//! ## Modules
//!
//! - [`model`] - Domain entities (plants, loads, nodes, lines)
//! - [`topology`] - Line-list aggregation into a validated topology
//! - [`input`] - Serde records for network files (one record per line)
//! - [`error`] - Typed validation errors

use serde::{Deserialize, Serialize};
use std::fmt;

pub mod error;
pub mod input;
pub mod model;
pub mod topology;

pub use error::{ModelError, ModelResult};
pub use input::{LineRecord, SystemSpec};
pub use model::{Load, Node, PowerPlant, TransmissionLine};
pub use topology::Topology;

// Newtype wrappers for IDs for type safety
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct NodeId(usize);
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PlantId(usize);
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LineId(String);

impl NodeId {
    #[inline]
    pub fn new(value: usize) -> Self {
        NodeId(value)
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl PlantId {
    #[inline]
    pub fn new(value: usize) -> Self {
        PlantId(value)
    }

    #[inline]
    pub fn value(&self) -> usize {
        self.0
    }
}

impl LineId {
    pub fn new(value: impl Into<String>) -> Self {
        LineId(value.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node#{}", self.0)
    }
}

impl fmt::Display for PlantId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Plant#{}", self.0)
    }
}

impl fmt::Display for LineId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for LineId {
    fn from(value: &str) -> Self {
        LineId(value.to_string())
    }
}

impl From<String> for LineId {
    fn from(value: String) -> Self {
        LineId(value)
    }
}
