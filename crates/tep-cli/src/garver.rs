//! The Garver six-node example network.
//!
//! Three plants (150/360/600 MW), five loads totaling 760 MW, six existing
//! corridors and nine candidates on a 100 MVA base. The 600 MW plant at
//! node 6 is stranded until a candidate line connects it.

use tep_core::{Load, Node, NodeId, PlantId, PowerPlant, TransmissionLine};

pub const S_BASE: f64 = 100e6;

pub fn lines() -> Vec<TransmissionLine> {
    let node_1 = Node::new(NodeId::new(1))
        .with_load(Load::new(80e6))
        .with_plant(PowerPlant::new(PlantId::new(1), 150e6));
    let node_2 = Node::new(NodeId::new(2)).with_load(Load::new(240e6));
    let node_3 = Node::new(NodeId::new(3))
        .with_load(Load::new(40e6))
        .with_plant(PowerPlant::new(PlantId::new(2), 360e6));
    let node_4 = Node::new(NodeId::new(4)).with_load(Load::new(160e6));
    let node_5 = Node::new(NodeId::new(5)).with_load(Load::new(240e6));
    let node_6 = Node::new(NodeId::new(6)).with_plant(PowerPlant::new(PlantId::new(3), 600e6));

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

#[cfg(test)]
mod tests {
    use super::*;
    use tep_algo::System;

    #[test]
    fn test_garver_fixture_shape() {
        let system = System::new(lines(), S_BASE).unwrap();
        assert_eq!(system.line_count(), 15);
        assert_eq!(system.node_count(), 6);
        assert_eq!(system.plant_count(), 3);
        assert_eq!(system.topology().total_load(), 760e6);
        assert_eq!(system.topology().total_generation_capacity(), 1110e6);
    }
}
