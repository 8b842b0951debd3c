//! End-to-end expansion planning solves.

use tep_algo::{
    verify, BalanceMode, CostRule, OperatingPoint, SolverConfig, System, TepError,
};
use tep_core::{LineId, Load, Node, NodeId, PlantId, PowerPlant, SystemSpec, TransmissionLine};

const S_BASE: f64 = 100e6;

fn node(id: usize) -> Node {
    Node::new(NodeId::new(id))
}

/// The Garver six-node system: three plants (150/360/600 MW), five loads
/// totaling 760 MW, six existing corridors and nine candidates. Node 6's
/// large plant is stranded until at least one candidate connects it.
fn garver_lines() -> Vec<TransmissionLine> {
    let node_1 = node(1)
        .with_load(Load::new(80e6))
        .with_plant(PowerPlant::new(PlantId::new(1), 150e6));
    let node_2 = node(2).with_load(Load::new(240e6));
    let node_3 = node(3)
        .with_load(Load::new(40e6))
        .with_plant(PowerPlant::new(PlantId::new(2), 360e6));
    let node_4 = node(4).with_load(Load::new(160e6));
    let node_5 = node(5).with_load(Load::new(240e6));
    let node_6 = node(6).with_plant(PowerPlant::new(PlantId::new(3), 600e6));

    vec![
        TransmissionLine::new("1-2", 100e6, 0.40, node_1.clone(), node_2.clone(), 40.0).existing(),
        TransmissionLine::new("1-3", 100e6, 0.38, node_1.clone(), node_3.clone(), 38.0),
        TransmissionLine::new("1-4", 80e6, 0.60, node_1.clone(), node_4.clone(), 60.0).existing(),
        TransmissionLine::new("1-5", 100e6, 0.20, node_1.clone(), node_5.clone(), 20.0).existing(),
        TransmissionLine::new("1-6", 70e6, 0.68, node_1.clone(), node_6.clone(), 68.0),
        TransmissionLine::new("2-3", 100e6, 0.20, node_2.clone(), node_3.clone(), 20.0).existing(),
        TransmissionLine::new("2-4", 100e6, 0.40, node_2.clone(), node_4.clone(), 40.0).existing(),
        TransmissionLine::new("2-5", 100e6, 0.31, node_2.clone(), node_5.clone(), 31.0),
        TransmissionLine::new("2-6", 100e6, 0.30, node_2.clone(), node_6.clone(), 30.0),
        TransmissionLine::new("3-4", 82e6, 0.59, node_3.clone(), node_4.clone(), 59.0),
        TransmissionLine::new("3-5", 100e6, 0.20, node_3.clone(), node_5.clone(), 20.0).existing(),
        TransmissionLine::new("3-6", 100e6, 0.48, node_3.clone(), node_6.clone(), 48.0),
        TransmissionLine::new("4-5", 75e6, 0.63, node_4.clone(), node_5.clone(), 63.0),
        TransmissionLine::new("4-6", 100e6, 0.30, node_4.clone(), node_6.clone(), 30.0),
        TransmissionLine::new("5-6", 78e6, 0.61, node_5, node_6, 61.0),
    ]
}

#[test]
fn existing_only_network_costs_nothing() {
    let gen = node(1).with_plant(PowerPlant::new(PlantId::new(1), 100e6));
    let city = node(2).with_load(Load::new(50e6));
    let lines = vec![TransmissionLine::new("1-2", 100e6, 0.5, gen, city, 10.0).existing()];

    let system = System::new(lines, S_BASE).unwrap();
    let plan = system.optimize(&SolverConfig::default()).unwrap();

    assert!(plan.expansion_cost.abs() < 1.0);
    assert_eq!(plan.lines_built(), 0);
    assert!((plan.total_dispatch_pu() - 0.5).abs() < 1e-6);
}

#[test]
fn mandatory_candidate_is_built() {
    let gen = node(1).with_plant(PowerPlant::new(PlantId::new(1), 100e6));
    let city = node(2).with_load(Load::new(50e6));
    let lines = vec![TransmissionLine::new("1-2", 100e6, 0.5, gen, city, 10.0)];

    let system = System::new(lines, S_BASE).unwrap();
    let plan = system.optimize(&SolverConfig::default()).unwrap();

    assert_eq!(plan.lines_built(), 1);
    assert!(plan.decisions[0].selected);
    // 10 miles at the default 1e6/mile, read back from the objective.
    assert!((plan.expansion_cost - 1e7).abs() < 1.0);
}

#[test]
fn load_beyond_capacity_is_infeasible() {
    let gen = node(1).with_plant(PowerPlant::new(PlantId::new(1), 10e6));
    let city = node(2).with_load(Load::new(50e6));
    let lines = vec![TransmissionLine::new("1-2", 100e6, 0.5, gen, city, 10.0).existing()];

    let system = System::new(lines, S_BASE).unwrap();
    let result = system.optimize(&SolverConfig::default());
    assert!(matches!(result, Err(TepError::Infeasible)));
}

#[test]
fn garver_without_candidates_is_infeasible() {
    // Dropping every candidate strands node 6; the remaining 510 MW of
    // capacity cannot serve the 760 MW load.
    let lines: Vec<TransmissionLine> = garver_lines()
        .into_iter()
        .filter(|line| line.is_real)
        .collect();

    let system = System::new(lines, S_BASE).unwrap();
    let result = system.optimize(&SolverConfig::default());
    assert!(matches!(result, Err(TepError::Infeasible)));
}

#[test]
fn garver_expansion_restores_feasibility() {
    let system = System::new(garver_lines(), S_BASE).unwrap();
    let config = SolverConfig::default();
    let plan = system.optimize(&config).unwrap();

    assert!(plan.expansion_cost.is_finite());
    assert!(plan.expansion_cost > 0.0);
    assert!(plan.lines_built() >= 1);

    // All 760 MW of load must be dispatched.
    assert!((plan.total_dispatch_pu() - 7.6).abs() < 1e-3);

    // The stranded plant at node 6 must have been connected.
    let node_6 = NodeId::new(6);
    let touches_node_6 = system
        .lines()
        .iter()
        .zip(&plan.decisions)
        .any(|(line, decision)| {
            decision.selected && (line.node_start.id == node_6 || line.node_end.id == node_6)
        });
    assert!(touches_node_6, "no built line reaches node 6");

    // The big-M optimum must satisfy the literal product-form constraints.
    let point = OperatingPoint::from_plan(&system, &plan);
    let violations = verify::check(&system, &point, config.balance, 1e-4);
    assert!(violations.is_empty(), "product-form violations: {violations:?}");
}

#[test]
fn garver_is_infeasible_under_physical_balance() {
    // The double-counted balance lets a selected existing corridor move
    // power through both its unconditional and its build-weighted flow
    // term, effectively doubling the corridor. Once that artifact is
    // removed, Garver's single-circuit ratings cannot carry the 760 MW
    // load whichever candidates are added.
    let system = System::new(garver_lines(), S_BASE).unwrap();
    let config = SolverConfig {
        balance: BalanceMode::Physical,
        ..SolverConfig::default()
    };
    assert!(matches!(system.optimize(&config), Err(TepError::Infeasible)));
}

#[test]
fn physical_balance_builds_a_mandatory_candidate() {
    let gen = node(1).with_plant(PowerPlant::new(PlantId::new(1), 100e6));
    let city = node(2).with_load(Load::new(50e6));
    let lines = vec![TransmissionLine::new("1-2", 100e6, 0.5, gen, city, 10.0)];

    let system = System::new(lines, S_BASE).unwrap();
    let config = SolverConfig {
        balance: BalanceMode::Physical,
        ..SolverConfig::default()
    };
    let plan = system.optimize(&config).unwrap();

    assert_eq!(plan.lines_built(), 1);
    assert!((plan.expansion_cost - 1e7).abs() < 1.0);
    assert!((plan.total_dispatch_pu() - 0.5).abs() < 1e-6);

    let point = OperatingPoint::from_plan(&system, &plan);
    let violations = verify::check(&system, &point, BalanceMode::Physical, 1e-4);
    assert!(violations.is_empty(), "product-form violations: {violations:?}");
}

#[test]
fn garver_solves_with_free_existing_lines() {
    let system = System::new(garver_lines(), S_BASE).unwrap();
    let config = SolverConfig {
        cost_rule: CostRule::CandidatesOnly,
        ..SolverConfig::default()
    };
    let plan = system.optimize(&config).unwrap();

    assert!(plan.expansion_cost >= 0.0);
    assert!((plan.total_dispatch_pu() - 7.6).abs() < 1e-3);

    // Only candidate lines may contribute to the cost figure.
    let candidate_cost: f64 = system
        .lines()
        .iter()
        .zip(&plan.decisions)
        .filter(|(line, decision)| !line.is_real && decision.selected)
        .map(|(line, _)| line.capital_cost())
        .sum();
    assert!((plan.expansion_cost - candidate_cost).abs() < 1.0);
}

#[test]
fn json_network_solves_end_to_end() {
    let spec: SystemSpec = serde_json::from_str(
        r#"{
            "s_base": 100e6,
            "nodes": [
                { "id": 1, "power_plants": [{ "id": 1, "capacity": 100e6 }] },
                { "id": 2, "loads": [{ "value": 60e6 }] },
                { "id": 3, "loads": [{ "value": 20e6 }] }
            ],
            "lines": [
                { "id": "1-2", "capacity": 100e6, "reactance": 0.25,
                  "from": 1, "to": 2, "length": 25.0, "is_real": true },
                { "id": "2-3", "capacity": 50e6, "reactance": 0.5,
                  "from": 2, "to": 3, "length": 15.0 }
            ]
        }"#,
    )
    .unwrap();

    let system = System::new(spec.to_lines().unwrap(), spec.s_base).unwrap();
    let plan = system.optimize(&SolverConfig::default()).unwrap();

    // Node 3's load is only reachable over the candidate line.
    assert_eq!(plan.built_line_ids(), vec![&LineId::new("2-3")]);
    assert!((plan.expansion_cost - 1.5e7).abs() < 1.0);
    assert!((plan.total_dispatch_pu() - 0.8).abs() < 1e-6);
}
