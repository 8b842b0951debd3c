//! Validation errors raised while assembling a network model.
//!
//! Every variant represents a defect in the input data that must be caught
//! before any optimization variable is created.

use crate::{LineId, NodeId, PlantId};
use thiserror::Error;

/// Errors raised by entity construction and topology aggregation.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    /// A line's reactance is zero, negative, or not a number. Susceptance
    /// is the reciprocal of reactance, so these values have no physical
    /// meaning and would poison the formulation with NaN/Inf coefficients.
    #[error("line {line}: reactance must be positive, got {reactance}")]
    NonPositiveReactance { line: LineId, reactance: f64 },

    /// The same node id appears at different line endpoints with different
    /// loads or power plants attached.
    #[error("node {0} is defined inconsistently across line endpoints")]
    InconsistentNode(NodeId),

    /// A power plant id appears under more than one node, or twice under
    /// the same node.
    #[error("power plant {0} is attached to the network more than once")]
    DuplicatePlant(PlantId),

    /// A line record references a node id that is not in the node list.
    #[error("line {line} references unknown node {node}")]
    UnknownNode { line: LineId, node: NodeId },

    /// The apparent-power base used for per-unit conversion must be positive.
    #[error("system base power must be positive, got {0}")]
    NonPositiveBase(f64),
}

/// Convenience type alias for Results using ModelError.
pub type ModelResult<T> = Result<T, ModelError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = ModelError::NonPositiveReactance {
            line: LineId::new("1-2"),
            reactance: -0.4,
        };
        assert!(err.to_string().contains("1-2"));
        assert!(err.to_string().contains("-0.4"));

        let err = ModelError::UnknownNode {
            line: LineId::new("3-9"),
            node: NodeId::new(9),
        };
        assert!(err.to_string().contains("Node#9"));
    }
}
