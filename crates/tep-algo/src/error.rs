//! Error type for expansion-planning runs.
//!
//! Solver outcomes other than proven optimality are surfaced as distinct
//! variants; a failed run produces no plan and therefore no cost figure.

use tep_core::ModelError;
use thiserror::Error;

/// Errors raised while building or solving an expansion-planning problem.
#[derive(Error, Debug)]
pub enum TepError {
    /// Input data failed validation before any variable was created.
    #[error(transparent)]
    Model(#[from] ModelError),

    /// The constraint system admits no solution; the network cannot serve
    /// its load even with every candidate line built.
    #[error("no feasible expansion plan exists for this network")]
    Infeasible,

    /// The objective can decrease without bound; indicates a malformed
    /// model (e.g. negative capital costs).
    #[error("expansion problem is unbounded")]
    Unbounded,

    /// The backend failed for a reason other than infeasibility or
    /// unboundedness (numerical trouble, resource limits).
    #[error("solver failure: {0}")]
    Solver(String),
}

/// Convenience type alias for Results using TepError.
pub type TepResult<T> = Result<T, TepError>;
