//! Transmission Expansion Planning (TEP)
//!
//! DC-based Mixed-Integer Linear Programming formulation for deciding which
//! candidate transmission lines to build at minimum capital cost.
//!
//! ## Problem Overview
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────┐
//! │  Given:                                                      │
//! │    • A network of nodes with generating plants and loads     │
//! │    • Existing transmission lines (always in service)         │
//! │    • Candidate lines with capital costs                      │
//! │                                                              │
//! │  Decide:                                                     │
//! │    • Which lines to build (binary decisions)                 │
//! │    • Plant dispatch and bus voltage angles (continuous)      │
//! │                                                              │
//! │  Minimize:   Σ_i  capital_cost_i · x_i                       │
//! │                                                              │
//! │  Subject to (per-unit on s_base):                            │
//! │    0 ≤ g_p ≤ cap_p              plant output bounds          │
//! │    -π ≤ θ_n ≤ π                 angle bounds                 │
//! │    |b_i·(θ_s - θ_e)·x_i| ≤ cap_i   selected-line flow limit  │
//! │    |b_i·(θ_s - θ_e)| ≤ cap_i       existing-line flow limit  │
//! │    Σ g - load - Σ flows = 0        nodal balance             │
//! └──────────────────────────────────────────────────────────────┘
//! ```
//!
//! The selected-line limit and the balance flow terms multiply a binary
//! build decision by a continuous angle difference, which no LP/MILP
//! backend accepts directly. The solver replaces each product with an
//! auxiliary flow variable tied to the physics by a big-M disjunction
//! (see [`solver`]); the [`verify`] module evaluates the literal product
//! form at a solved point so the two formulations can be compared.
//!
//! ## Quick Start
//!
//! ```no_run
//! use tep_algo::{SolverConfig, System};
//! use tep_core::{Load, Node, NodeId, PlantId, PowerPlant, TransmissionLine};
//!
//! let gen = Node::new(NodeId::new(1))
//!     .with_plant(PowerPlant::new(PlantId::new(1), 150e6));
//! let city = Node::new(NodeId::new(2)).with_load(Load::new(120e6));
//! let lines = vec![TransmissionLine::new("1-2", 150e6, 0.4, gen, city, 40.0)];
//!
//! let system = System::new(lines, 100e6)?;
//! let plan = system.optimize(&SolverConfig::default())?;
//! println!("{}", plan.summary());
//! # Ok::<(), tep_algo::TepError>(())
//! ```
//!
//! ## References
//!
//! - **Garver (1970)**: "Transmission Network Estimation Using Linear
//!   Programming" — the classic formulation and the 6-bus benchmark.

pub mod error;
pub mod solution;
pub mod solver;
pub mod system;
pub mod verify;

pub use error::{TepError, TepResult};
pub use solution::{BuildDecision, ExpansionPlan};
pub use solver::{round_binary, solve, BalanceMode, CostRule, SolverConfig};
pub use system::System;
pub use verify::{OperatingPoint, Violation};
