//! Post-hoc verification against the literal product-form constraints.
//!
//! The solve path linearizes the product of build decision and angle
//! difference with a big-M disjunction. This module evaluates the original
//! product form — the build binary multiplying `b·Δθ` directly — at a
//! concrete operating point, so tests can confirm that a big-M optimum is
//! feasible for the product-form model as well.

use crate::solver::BalanceMode;
use crate::{ExpansionPlan, System};
use std::collections::BTreeMap;
use std::f64::consts::PI;
use tep_core::{NodeId, PlantId};

/// A concrete assignment of every decision quantity.
#[derive(Debug, Clone)]
pub struct OperatingPoint {
    /// Build decision per line, in input line order (0.0 or 1.0)
    pub build: Vec<f64>,
    /// Plant dispatch in per-unit, keyed by plant id
    pub dispatch: BTreeMap<PlantId, f64>,
    /// Bus voltage angles in radians, keyed by node id
    pub angle: BTreeMap<NodeId, f64>,
}

impl OperatingPoint {
    /// Extract the operating point of a solved plan.
    pub fn from_plan(system: &System, plan: &ExpansionPlan) -> Self {
        let build = system
            .lines()
            .iter()
            .map(|line| {
                let selected = plan
                    .decisions
                    .iter()
                    .find(|d| d.line == line.id)
                    .map(|d| d.selected)
                    .unwrap_or(false);
                if selected {
                    1.0
                } else {
                    0.0
                }
            })
            .collect();
        Self {
            build,
            dispatch: plan.dispatch.clone(),
            angle: plan.angles.clone(),
        }
    }
}

/// One violated constraint at an operating point.
#[derive(Debug, Clone)]
pub struct Violation {
    /// Which constraint was violated, in human-readable form
    pub constraint: String,
    /// Amount by which the constraint is exceeded
    pub residual: f64,
}

/// Evaluate the product-form constraint set at `point`.
///
/// Returns every constraint violated by more than `tol`. An empty result
/// means the point is feasible for the literal bilinear model under the
/// given balance mode.
pub fn check(
    system: &System,
    point: &OperatingPoint,
    balance: BalanceMode,
    tol: f64,
) -> Vec<Violation> {
    let lines = system.lines();
    let topology = system.topology();
    let s_base = system.s_base();
    let b = topology.susceptance();
    let mut violations = Vec::new();

    // Generation bounds.
    for plant in topology.plants() {
        let g = point.dispatch.get(&plant.id).copied().unwrap_or(0.0);
        let cap_pu = plant.capacity / s_base;
        if g < -tol {
            violations.push(Violation {
                constraint: format!("dispatch lower bound at {}", plant.id),
                residual: -g,
            });
        }
        if g > cap_pu + tol {
            violations.push(Violation {
                constraint: format!("dispatch upper bound at {}", plant.id),
                residual: g - cap_pu,
            });
        }
    }

    // Angle bounds.
    for node in topology.nodes() {
        let theta = point.angle.get(&node.id).copied().unwrap_or(0.0);
        if theta.abs() > PI + tol {
            violations.push(Violation {
                constraint: format!("angle bound at {}", node.id),
                residual: theta.abs() - PI,
            });
        }
    }

    // Flow limits: |b·Δθ·x| ≤ cap for every line, plus the unconditional
    // |b·Δθ| ≤ cap for existing lines.
    for (i, line) in lines.iter().enumerate() {
        let cap_pu = line.capacity / s_base;
        let dtheta = point.angle.get(&line.node_start.id).copied().unwrap_or(0.0)
            - point.angle.get(&line.node_end.id).copied().unwrap_or(0.0);
        let weighted = b[i] * dtheta * point.build[i];
        if weighted.abs() > cap_pu + tol {
            violations.push(Violation {
                constraint: format!("selected-line flow limit on {}", line.id),
                residual: weighted.abs() - cap_pu,
            });
        }
        if line.is_real {
            let unconditional = b[i] * dtheta;
            if unconditional.abs() > cap_pu + tol {
                violations.push(Violation {
                    constraint: format!("existing-line flow limit on {}", line.id),
                    residual: unconditional.abs() - cap_pu,
                });
            }
        }
    }

    // Nodal balance with product-form flow terms.
    for node in topology.nodes() {
        let mut residual: f64 = node
            .power_plants
            .iter()
            .map(|p| point.dispatch.get(&p.id).copied().unwrap_or(0.0))
            .sum();
        residual -= node.total_load() / s_base;

        for (i, line) in lines.iter().enumerate() {
            let sign = if line.node_start.id == node.id {
                1.0
            } else if line.node_end.id == node.id {
                -1.0
            } else {
                continue;
            };
            let dtheta = point.angle.get(&line.node_start.id).copied().unwrap_or(0.0)
                - point.angle.get(&line.node_end.id).copied().unwrap_or(0.0);
            let physics = b[i] * dtheta;

            match balance {
                BalanceMode::DoubleCounted => {
                    residual -= sign * physics * point.build[i];
                    if line.is_real {
                        residual -= sign * physics;
                    }
                }
                BalanceMode::Physical => {
                    if line.is_real {
                        residual -= sign * physics;
                    } else {
                        residual -= sign * physics * point.build[i];
                    }
                }
            }
        }

        if residual.abs() > tol {
            violations.push(Violation {
                constraint: format!("nodal balance at {}", node.id),
                residual: residual.abs(),
            });
        }
    }

    violations
}
