//! Scenario contract: a node model plus the query to run against it.
//!
//! A scenario provides the model, the start node, the goal (as a literal
//! node, a predicate, or both) and a JSON label per node for reports.
//! Scenarios do NOT run searches, record traces or hash anything; those are
//! runner concerns.

use wayfind_search::NodeModel;

/// How the goal is handed to the engine.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GoalForm {
    /// A literal goal node, matched with `nodes_match`.
    Node,
    /// An acceptance predicate.
    Predicate,
}

impl GoalForm {
    /// Stable lowercase name (matches `Goal::form`).
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Node => "node",
            Self::Predicate => "predicate",
        }
    }
}

/// The contract a world must implement to be run by the scenario runner.
pub trait ScenarioV1 {
    type Node: Clone;
    type Model: NodeModel<Self::Node>;

    /// Unique world identifier (e.g. `"dungeon"`).
    fn world_id(&self) -> &str;

    fn model(&self) -> &Self::Model;

    fn start(&self) -> Self::Node;

    /// The literal goal node, if the goal can be stated as one.
    fn goal_node(&self) -> Option<Self::Node>;

    /// Goal predicate. Must agree with [`ScenarioV1::goal_node`] when both
    /// are available.
    fn accepts(&self, node: &Self::Node) -> bool;

    /// JSON description of a node for reports.
    fn label(&self, node: &Self::Node) -> serde_json::Value;
}
