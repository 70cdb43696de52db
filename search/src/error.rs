//! Typed search errors.
//!
//! `SearchError` covers fatal failures only. Exhausting the open set without
//! reaching the goal is a normal outcome, expressed via
//! [`crate::search::TerminationReason::OpenSetExhausted`].

use crate::node::RecordId;

/// Where a NaN cost was observed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CostStage {
    /// `NodeModel::step_cost` returned NaN.
    StepCost,
    /// `NodeModel::heuristic` returned NaN.
    Heuristic,
}

impl CostStage {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StepCost => "step_cost",
            Self::Heuristic => "heuristic",
        }
    }
}

/// Fatal failure during a search run.
///
/// `E` is the node model's own error type.
#[derive(Debug, Clone, PartialEq)]
pub enum SearchError<E> {
    /// The node model reported a contract violation (e.g. a step cost was
    /// requested for two nodes that are not connected).
    Model(E),
    /// The node model produced a NaN cost, which cannot be ordered.
    NanCost { stage: CostStage, record_id: RecordId },
    /// A step cost was negative while the policy rejects negative edges.
    NegativeStepCost { cost: f64, record_id: RecordId },
}

impl<E: std::fmt::Display> std::fmt::Display for SearchError<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Model(e) => write!(f, "node model contract violation: {e}"),
            Self::NanCost { stage, record_id } => write!(
                f,
                "NaN {} while expanding record {record_id}",
                stage.as_str()
            ),
            Self::NegativeStepCost { cost, record_id } => write!(
                f,
                "negative step cost {cost} while expanding record {record_id}"
            ),
        }
    }
}

impl<E: std::error::Error + 'static> std::error::Error for SearchError<E> {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Model(e) => Some(e),
            _ => None,
        }
    }
}
