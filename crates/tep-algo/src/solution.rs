//! Solved expansion plans.

use std::collections::BTreeMap;
use std::time::Duration;
use tep_core::{LineId, NodeId, PlantId};

/// Build decision for one transmission line.
#[derive(Debug, Clone, PartialEq)]
pub struct BuildDecision {
    /// Line this decision applies to
    pub line: LineId,
    /// Whether the optimizer selected the line for construction
    pub selected: bool,
    /// Capital cost of the full corridor (charged only if selected and
    /// priced by the active cost rule)
    pub capital_cost: f64,
}

impl BuildDecision {
    pub fn is_built(&self) -> bool {
        self.selected
    }
}

/// Optimal solution of an expansion-planning run.
#[derive(Debug, Clone)]
pub struct ExpansionPlan {
    /// Achieved objective value: total capital cost of the selected,
    /// priced lines
    pub expansion_cost: f64,
    /// One decision per line, in input line order
    pub decisions: Vec<BuildDecision>,
    /// Plant dispatch in per-unit, keyed by plant id
    pub dispatch: BTreeMap<PlantId, f64>,
    /// Bus voltage angles in radians, keyed by node id
    pub angles: BTreeMap<NodeId, f64>,
    /// Build-weighted line flows in per-unit, keyed by line id
    pub flows: BTreeMap<LineId, f64>,
    /// Wall time spent formulating and solving
    pub solve_time: Duration,
}

impl ExpansionPlan {
    /// Number of lines selected for construction.
    pub fn lines_built(&self) -> usize {
        self.decisions.iter().filter(|d| d.is_built()).count()
    }

    /// Ids of the lines selected for construction, in input order.
    pub fn built_line_ids(&self) -> Vec<&LineId> {
        self.decisions
            .iter()
            .filter(|d| d.is_built())
            .map(|d| &d.line)
            .collect()
    }

    /// Total dispatched generation, in per-unit.
    pub fn total_dispatch_pu(&self) -> f64 {
        self.dispatch.values().sum()
    }

    /// Format a human-readable summary.
    pub fn summary(&self) -> String {
        let mut s = String::new();
        s.push_str(&format!("Expansion Plan\n{}\n", "=".repeat(40)));
        s.push_str(&format!("Expansion Cost: ${:.2}\n", self.expansion_cost));
        s.push_str(&format!(
            "Lines Built: {} of {}\n",
            self.lines_built(),
            self.decisions.len()
        ));
        s.push_str(&format!(
            "Total Dispatch: {:.3} p.u.\n",
            self.total_dispatch_pu()
        ));
        s.push_str(&format!("Solve Time: {:.2?}\n", self.solve_time));

        if !self.decisions.is_empty() {
            s.push_str("\nBuild Decisions:\n");
            for decision in &self.decisions {
                if decision.is_built() {
                    s.push_str(&format!(
                        "  [BUILD] {} - ${:.2}\n",
                        decision.line, decision.capital_cost
                    ));
                } else {
                    s.push_str(&format!("  [SKIP]  {}\n", decision.line));
                }
            }
        }

        s
    }
}
