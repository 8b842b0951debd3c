//! The planning system: a line list, a power base, and their aggregation.

use crate::solver::{self, SolverConfig};
use crate::{ExpansionPlan, TepError};
use tep_core::{ModelError, Topology, TransmissionLine};

/// A power system under expansion planning.
///
/// Owns the transmission-line list and the apparent-power base used for
/// per-unit conversion. The node and plant sets are derived from the line
/// endpoints at construction time and validated then; a `System` that
/// exists is safe to formulate.
///
/// [`System::optimize`] builds a fresh optimization problem on every call,
/// so repeated runs can never append duplicate variables or constraints to
/// a stale problem. Entities are read-only; independent systems may share
/// cloned entities freely, including across threads.
#[derive(Debug, Clone)]
pub struct System {
    lines: Vec<TransmissionLine>,
    s_base: f64,
    topology: Topology,
}

impl System {
    /// Validate and aggregate a line list.
    ///
    /// Fails fast on a non-positive base power, a non-positive reactance,
    /// inconsistent node definitions, or duplicated plants.
    pub fn new(lines: Vec<TransmissionLine>, s_base: f64) -> Result<Self, TepError> {
        if !(s_base > 0.0) {
            return Err(ModelError::NonPositiveBase(s_base).into());
        }
        let topology = Topology::from_lines(&lines)?;
        Ok(Self {
            lines,
            s_base,
            topology,
        })
    }

    /// The transmission lines, in input order.
    pub fn lines(&self) -> &[TransmissionLine] {
        &self.lines
    }

    /// Apparent-power base for per-unit conversion.
    pub fn s_base(&self) -> f64 {
        self.s_base
    }

    /// The validated topology derived from the line endpoints.
    pub fn topology(&self) -> &Topology {
        &self.topology
    }

    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    pub fn node_count(&self) -> usize {
        self.topology.node_count()
    }

    pub fn plant_count(&self) -> usize {
        self.topology.plant_count()
    }

    /// Formulate and solve the expansion problem, returning the optimal
    /// plan or a terminal failure status. See [`solver::solve`].
    pub fn optimize(&self, config: &SolverConfig) -> Result<ExpansionPlan, TepError> {
        solver::solve(self, config)
    }
}
