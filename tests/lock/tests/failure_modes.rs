//! Failure semantics: unreachable goals are a normal outcome, contract
//! violations are errors.

use lock_tests::graph::{NoEdge, WeightedGraph};
use wayfind_search::error::CostStage;
use wayfind_search::{Goal, NodeModel, SearchEngine, SearchError, TerminationReason};

/// A model where nothing is reachable from anywhere.
struct Island;

impl NodeModel<&'static str> for Island {
    type Error = std::convert::Infallible;

    fn successors(&self, _node: &&'static str) -> Vec<&'static str> {
        Vec::new()
    }

    fn nodes_match(&self, a: &&'static str, b: &&'static str) -> bool {
        a == b
    }

    fn step_cost(&self, _from: &&'static str, _to: &&'static str) -> Result<f64, Self::Error> {
        Ok(1.0)
    }

    fn heuristic(&self, _node: &&'static str) -> f64 {
        1.0
    }
}

#[test]
fn empty_successors_yield_no_path() {
    let result = SearchEngine::new(Island)
        .solve("shore", Goal::node("mainland"))
        .unwrap();
    assert_eq!(
        result.termination_reason,
        TerminationReason::OpenSetExhausted
    );
    assert!(result.path.is_none());
    assert!(result.cost.is_none());
    assert_eq!(result.stats.total_expansions, 1);
    assert_eq!(result.stats.total_records_created, 1);
}

#[test]
fn predicate_never_satisfied_exhausts_open_set() {
    let graph = WeightedGraph::new(4, &[(0, 1, 1), (1, 2, 1), (2, 3, 1), (3, 0, 1)]);
    let never = |_: &usize| false;
    let result = SearchEngine::new(graph)
        .solve(0, Goal::predicate(&never))
        .unwrap();
    assert!(!result.is_goal_reached());
    assert_eq!(result.stats.total_expansions, 4);
}

/// Claims an edge to `node + 1` but refuses to price it.
struct Inconsistent;

impl NodeModel<u32> for Inconsistent {
    type Error = NoEdge;

    fn successors(&self, node: &u32) -> Vec<u32> {
        vec![node + 1]
    }

    fn nodes_match(&self, a: &u32, b: &u32) -> bool {
        a == b
    }

    fn step_cost(&self, from: &u32, to: &u32) -> Result<f64, NoEdge> {
        Err(NoEdge {
            from: *from as usize,
            to: *to as usize,
        })
    }

    fn heuristic(&self, _node: &u32) -> f64 {
        0.0
    }
}

#[test]
fn step_cost_failure_aborts_search() {
    let err = SearchEngine::new(Inconsistent)
        .solve(0, Goal::node(3))
        .unwrap_err();
    assert_eq!(err, SearchError::Model(NoEdge { from: 0, to: 1 }));
    assert_eq!(
        err.to_string(),
        "node model contract violation: no edge 0 -> 1"
    );
}

/// Step costs are NaN.
struct Undefined;

impl NodeModel<u32> for Undefined {
    type Error = std::convert::Infallible;

    fn successors(&self, node: &u32) -> Vec<u32> {
        vec![node + 1]
    }

    fn nodes_match(&self, a: &u32, b: &u32) -> bool {
        a == b
    }

    fn step_cost(&self, _from: &u32, _to: &u32) -> Result<f64, Self::Error> {
        Ok(f64::NAN)
    }

    fn heuristic(&self, _node: &u32) -> f64 {
        0.0
    }
}

#[test]
fn nan_step_cost_is_rejected() {
    let err = SearchEngine::new(Undefined)
        .solve(0, Goal::node(2))
        .unwrap_err();
    assert!(matches!(
        err,
        SearchError::NanCost {
            stage: CostStage::StepCost,
            record_id: 0
        }
    ));
}
