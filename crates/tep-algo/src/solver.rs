//! MILP formulation and solve driver.
//!
//! Builds the expansion model against a [`System`] and hands it to the
//! `good_lp` backend selected at compile time (`solver-microlp` by default,
//! `solver-highs` behind a feature).
//!
//! ## Variables
//!
//! - `x_i ∈ {0,1}` per line (input order): selected for construction.
//!   Created for every line, existing lines included; existing lines'
//!   service is guaranteed separately by unconditional constraints.
//! - `g_p` per plant: dispatched output, per-unit.
//! - `θ_n` per node: voltage angle, radians.
//! - `f_i` per line: auxiliary build-weighted flow, per-unit. Stands in for
//!   the product `b_i·(θ_s - θ_e)·x_i`, which is bilinear and not
//!   expressible directly. The big-M disjunction ties it to the physics:
//!
//! ```text
//!   -M(1-x_i) ≤ f_i - b_i(θ_s - θ_e) ≤ M(1-x_i)
//!   -cap_i·x_i ≤ f_i ≤ cap_i·x_i
//! ```
//!
//! When `x_i = 1` the flow follows the DC physics and respects the rating;
//! when `x_i = 0` the flow is forced to zero and the physics tie is slack.
//! A solved point can be checked against the literal product form with
//! [`crate::verify::check`].
//!
//! Plant and angle variables are associated to their entities by id, never
//! by iteration position, so the mapping is stable for the whole run.

use crate::{BuildDecision, ExpansionPlan, System, TepError};
use good_lp::{
    constraint, default_solver, variable, variables, Expression, ResolutionError, Solution,
    SolverModel, Variable,
};
use std::collections::{BTreeMap, HashMap};
use std::f64::consts::PI;
use std::time::Instant;
use tep_core::{NodeId, PlantId, TransmissionLine};
use tracing::{debug, info};

/// How existing (already in service) lines enter the nodal balance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BalanceMode {
    /// Existing lines contribute their unconditional physics flow and, in
    /// addition, a build-weighted flow term when their build variable is
    /// selected. Default; kept for parity with legacy planning studies,
    /// where selecting an existing corridor doubles its effective
    /// susceptance at the corridor's capital cost.
    DoubleCounted,
    /// Existing lines contribute only the unconditional physics flow;
    /// build-weighted terms appear for candidate lines only.
    Physical,
}

/// Which lines carry capital cost in the objective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostRule {
    /// Every line's build variable is priced, existing lines included.
    AllLines,
    /// Only candidate lines are priced; selecting an existing line is free.
    CandidatesOnly,
}

impl CostRule {
    fn prices(&self, line: &TransmissionLine) -> bool {
        match self {
            CostRule::AllLines => true,
            CostRule::CandidatesOnly => !line.is_real,
        }
    }
}

/// Solver configuration.
#[derive(Debug, Clone)]
pub struct SolverConfig {
    /// Big-M constant for the flow/physics disjunction, in per-unit power.
    /// Must dominate the largest attainable |b·Δθ|, but not by orders of
    /// magnitude: an oversized M degrades the conditioning of the simplex
    /// basis and can make the backend report spurious infeasibility.
    pub big_m: f64,
    /// Existing-line treatment in the nodal balance.
    pub balance: BalanceMode,
    /// Objective pricing rule.
    pub cost_rule: CostRule,
}

impl Default for SolverConfig {
    fn default() -> Self {
        Self {
            // With angles bounded to ±π, |b·Δθ| ≤ 2π·b_max; 1e2 covers any
            // per-unit susceptance up to ~16 while staying well conditioned.
            big_m: 1e2,
            balance: BalanceMode::DoubleCounted,
            cost_rule: CostRule::AllLines,
        }
    }
}

/// Defensively round a relaxed binary value to a build decision.
///
/// Backends report binaries as floating values that may sit a rounding
/// error away from 0 or 1.
pub fn round_binary(x: f64) -> bool {
    x.round() != 0.0
}

/// Formulate and solve the expansion problem for `system`.
///
/// Builds a fresh problem on every call. Infeasibility and unboundedness
/// are surfaced as distinct [`TepError`] variants; on any failure no plan
/// (and no cost figure) is produced.
pub fn solve(system: &System, config: &SolverConfig) -> Result<ExpansionPlan, TepError> {
    let start = Instant::now();
    let lines = system.lines();
    let topology = system.topology();
    let s_base = system.s_base();
    let b = topology.susceptance();

    debug!(
        lines = lines.len(),
        nodes = topology.node_count(),
        plants = topology.plant_count(),
        "building expansion model"
    );

    let mut vars = variables!();

    // Build and auxiliary flow variables, in input line order.
    let build: Vec<Variable> = lines.iter().map(|_| vars.add(variable().binary())).collect();
    let flow: Vec<Variable> = lines.iter().map(|_| vars.add(variable())).collect();

    // Dispatch and angle variables, associated by entity id. Free here;
    // their bounds are emitted as explicit constraints below.
    let dispatch: HashMap<PlantId, Variable> = topology
        .plants()
        .iter()
        .map(|p| (p.id, vars.add(variable())))
        .collect();
    let angle: HashMap<NodeId, Variable> = topology
        .nodes()
        .iter()
        .map(|n| (n.id, vars.add(variable())))
        .collect();

    // Objective: capital cost of the priced, selected lines.
    let mut objective = Expression::from(0.0);
    for (i, line) in lines.iter().enumerate() {
        if config.cost_rule.prices(line) {
            objective += line.capital_cost() * build[i];
        }
    }

    let mut model = vars.minimise(objective.clone()).using(default_solver);

    // Generation bounds: 0 ≤ g ≤ capacity / s_base.
    for plant in topology.plants() {
        let g = dispatch[&plant.id];
        model = model.with(constraint!(g >= 0.0));
        model = model.with(constraint!(g <= plant.capacity / s_base));
    }

    // Angle bounds: -π ≤ θ ≤ π.
    for node in topology.nodes() {
        let theta = angle[&node.id];
        model = model.with(constraint!(theta <= PI));
        model = model.with(constraint!(theta >= -PI));
    }

    // Line flow limits.
    for (i, line) in lines.iter().enumerate() {
        let cap_pu = line.capacity / s_base;
        let x = build[i];
        let f = flow[i];
        let m = config.big_m;
        let physics: Expression =
            b[i] * (angle[&line.node_start.id] - angle[&line.node_end.id]);

        // Physics tie, active only when the line is selected.
        model = model.with(constraint!(f - physics.clone() <= m - m * x));
        model = model.with(constraint!(f - physics.clone() >= -m + m * x));

        // Rating, scaled by the build decision.
        model = model.with(constraint!(f <= cap_pu * x));
        model = model.with(constraint!(f >= -cap_pu * x));

        // Existing lines carry flow regardless of their build variable and
        // are unconditionally held to their rating.
        if line.is_real {
            model = model.with(constraint!(physics.clone() <= cap_pu));
            model = model.with(constraint!(physics >= -cap_pu));
        }
    }

    // Nodal balance: Σ g − load − Σ signed incident flows = 0, stated as
    // Σ g − Σ flows = load.
    for node in topology.nodes() {
        let mut expr = Expression::from(0.0);
        for plant in &node.power_plants {
            expr += dispatch[&plant.id];
        }
        let load_pu = node.total_load() / s_base;

        for (i, line) in lines.iter().enumerate() {
            // Outflow is positive at the start endpoint, negative at the
            // end; a self-loop is counted through the start arm only and
            // nets to zero.
            let sign = if line.node_start.id == node.id {
                1.0
            } else if line.node_end.id == node.id {
                -1.0
            } else {
                continue;
            };
            let physics: Expression =
                b[i] * (angle[&line.node_start.id] - angle[&line.node_end.id]);

            match config.balance {
                BalanceMode::DoubleCounted => {
                    expr -= sign * flow[i];
                    if line.is_real {
                        expr -= sign * physics;
                    }
                }
                BalanceMode::Physical => {
                    if line.is_real {
                        expr -= sign * physics;
                    } else {
                        expr -= sign * flow[i];
                    }
                }
            }
        }

        model = model.with(constraint!(expr == load_pu));
    }

    let solution = model.solve().map_err(|e| match e {
        ResolutionError::Infeasible => TepError::Infeasible,
        ResolutionError::Unbounded => TepError::Unbounded,
        other => TepError::Solver(format!("{other:?}")),
    })?;

    // Extraction: decisions from defensively rounded binaries, cost read
    // back from the achieved objective value.
    let expansion_cost = solution.eval(&objective);
    let mut decisions = Vec::with_capacity(lines.len());
    for (i, line) in lines.iter().enumerate() {
        decisions.push(BuildDecision {
            line: line.id.clone(),
            selected: round_binary(solution.value(build[i])),
            capital_cost: line.capital_cost(),
        });
    }

    let plan = ExpansionPlan {
        expansion_cost,
        decisions,
        dispatch: dispatch
            .iter()
            .map(|(id, v)| (*id, solution.value(*v)))
            .collect::<BTreeMap<_, _>>(),
        angles: angle
            .iter()
            .map(|(id, v)| (*id, solution.value(*v)))
            .collect::<BTreeMap<_, _>>(),
        flows: lines
            .iter()
            .enumerate()
            .map(|(i, line)| (line.id.clone(), solution.value(flow[i])))
            .collect::<BTreeMap<_, _>>(),
        solve_time: start.elapsed(),
    };

    info!(
        expansion_cost = plan.expansion_cost,
        lines_built = plan.lines_built(),
        elapsed = ?plan.solve_time,
        "expansion plan solved"
    );

    Ok(plan)
}
