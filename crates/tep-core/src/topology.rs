//! Aggregation of a line list into a validated network topology.
//!
//! The set of nodes in a system is exactly the set of distinct endpoints
//! across its transmission lines; there is no separate node registry in the
//! input. This module builds that registry explicitly, keyed by [`NodeId`],
//! and validates the data the optimizer later relies on:
//!
//! - the same node id must carry identical loads/plants wherever it appears,
//! - every plant belongs to exactly one node,
//! - every reactance is strictly positive.
//!
//! The result is a fixed, indexable snapshot. It is computed once per system
//! and never rebuilt mid-run, so the entity-to-variable associations made
//! against it stay stable for the whole optimization.

use crate::{ModelError, Node, NodeId, PlantId, PowerPlant, TransmissionLine};
use std::collections::{BTreeMap, HashSet};

/// Validated, de-duplicated view over a list of transmission lines.
#[derive(Debug, Clone, PartialEq)]
pub struct Topology {
    nodes: Vec<Node>,
    plants: Vec<PowerPlant>,
    susceptance: Vec<f64>,
}

impl Topology {
    /// Aggregate the endpoints of `lines` into a topology.
    ///
    /// Fails fast on the first malformed reactance, inconsistent node
    /// definition, or duplicated plant, before any solver state exists.
    pub fn from_lines(lines: &[TransmissionLine]) -> Result<Self, ModelError> {
        let mut susceptance = Vec::with_capacity(lines.len());
        for line in lines {
            if !(line.reactance > 0.0) {
                return Err(ModelError::NonPositiveReactance {
                    line: line.id.clone(),
                    reactance: line.reactance,
                });
            }
            susceptance.push(line.susceptance());
        }

        let mut registry: BTreeMap<NodeId, Node> = BTreeMap::new();
        for line in lines {
            register(&mut registry, &line.node_start)?;
            register(&mut registry, &line.node_end)?;
        }

        let mut plants = Vec::new();
        let mut seen: HashSet<PlantId> = HashSet::new();
        for node in registry.values() {
            for plant in &node.power_plants {
                if !seen.insert(plant.id) {
                    return Err(ModelError::DuplicatePlant(plant.id));
                }
                plants.push(plant.clone());
            }
        }

        Ok(Self {
            nodes: registry.into_values().collect(),
            plants,
            susceptance,
        })
    }

    /// Distinct nodes, in ascending id order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Distinct plants, in node-id order then attachment order.
    pub fn plants(&self) -> &[PowerPlant] {
        &self.plants
    }

    /// Per-line susceptance b = 1/x, in input line order.
    pub fn susceptance(&self) -> &[f64] {
        &self.susceptance
    }

    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    pub fn plant_count(&self) -> usize {
        self.plants.len()
    }

    /// Look up a node by id.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes
            .binary_search_by_key(&id, |n| n.id)
            .ok()
            .map(|i| &self.nodes[i])
    }

    /// Total demand across the network, in system power units.
    pub fn total_load(&self) -> f64 {
        self.nodes.iter().map(Node::total_load).sum()
    }

    /// Total rated generation capacity, in system power units.
    pub fn total_generation_capacity(&self) -> f64 {
        self.nodes.iter().map(Node::total_generation_capacity).sum()
    }
}

fn register(registry: &mut BTreeMap<NodeId, Node>, node: &Node) -> Result<(), ModelError> {
    match registry.get(&node.id) {
        None => {
            registry.insert(node.id, node.clone());
            Ok(())
        }
        // Structural comparison: two instances of the same node must agree
        // on everything attached to it, not just on the id.
        Some(existing) if existing == node => Ok(()),
        Some(_) => Err(ModelError::InconsistentNode(node.id)),
    }
}
