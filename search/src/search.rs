//! Search entry point and expansion loop.

use tracing::{debug, trace, warn};

use crate::contract::{Goal, NodeModel};
use crate::error::{CostStage, SearchError};
use crate::frontier::{BestFirstFrontier, Lookup};
use crate::node::RecordId;
use crate::observer::{NoopObserver, SearchEvent, SearchEventKind, SearchObserver};
use crate::policy::SearchPolicy;
use crate::stats::SearchStats;

/// Why the search stopped.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TerminationReason {
    /// A popped record satisfied the goal.
    GoalReached { record_id: RecordId },
    /// The open set emptied first: no path exists.
    OpenSetExhausted,
}

impl TerminationReason {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::GoalReached { .. } => "goal_reached",
            Self::OpenSetExhausted => "open_set_exhausted",
        }
    }
}

/// Outcome of a search run that did not fail fatally.
///
/// Check [`SearchResult::is_goal_reached`] before using `path`: an exhausted
/// open set is a normal outcome, not an error.
#[derive(Debug, Clone)]
pub struct SearchResult<N> {
    /// Nodes from the start to the matched goal, both inclusive.
    pub path: Option<Vec<N>>,
    /// Total cost of `path`.
    pub cost: Option<f64>,
    pub termination_reason: TerminationReason,
    pub stats: SearchStats,
}

impl<N> SearchResult<N> {
    /// Returns `true` if the search terminated because a goal was reached.
    #[must_use]
    pub fn is_goal_reached(&self) -> bool {
        matches!(
            self.termination_reason,
            TerminationReason::GoalReached { .. }
        )
    }

    /// Take the path, if one was found.
    #[must_use]
    pub fn into_path(self) -> Option<Vec<N>> {
        self.path
    }
}

/// A* engine over a caller-supplied [`NodeModel`].
///
/// The engine holds no search state: open and closed sets live inside each
/// `solve` call, so one engine may serve independent searches concurrently.
#[derive(Debug, Clone)]
pub struct SearchEngine<M> {
    model: M,
    policy: SearchPolicy,
}

impl<M> SearchEngine<M> {
    /// Engine with the default [`SearchPolicy`].
    #[must_use]
    pub fn new(model: M) -> Self {
        Self {
            model,
            policy: SearchPolicy::default(),
        }
    }

    #[must_use]
    pub fn with_policy(mut self, policy: SearchPolicy) -> Self {
        self.policy = policy;
        self
    }

    #[must_use]
    pub fn model(&self) -> &M {
        &self.model
    }

    #[must_use]
    pub fn policy(&self) -> &SearchPolicy {
        &self.policy
    }

    /// Find a cheapest path from `start` to `goal`.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    pub fn solve<N>(
        &self,
        start: N,
        goal: Goal<'_, N>,
    ) -> Result<SearchResult<N>, SearchError<M::Error>>
    where
        N: Clone,
        M: NodeModel<N>,
    {
        solve(&self.model, &self.policy, start, &goal, &mut NoopObserver)
    }

    /// Like [`SearchEngine::solve`], reporting every transition to `observer`.
    ///
    /// # Errors
    ///
    /// See [`solve`].
    pub fn solve_observed<N>(
        &self,
        start: N,
        goal: Goal<'_, N>,
        observer: &mut dyn SearchObserver<N>,
    ) -> Result<SearchResult<N>, SearchError<M::Error>>
    where
        N: Clone,
        M: NodeModel<N>,
    {
        solve(&self.model, &self.policy, start, &goal, observer)
    }
}

/// Run A* from `start` until a popped node satisfies `goal`.
///
/// The goal test runs on pop, before the record is closed; the terminal
/// record therefore never enters the closed set.
///
/// # Errors
///
/// - [`SearchError::Model`] if the model's `step_cost` fails.
/// - [`SearchError::NanCost`] if a step cost or heuristic is NaN.
/// - [`SearchError::NegativeStepCost`] if a step cost is negative and the
///   policy rejects negative edges.
pub fn solve<N, M>(
    model: &M,
    policy: &SearchPolicy,
    start: N,
    goal: &Goal<'_, N>,
    observer: &mut dyn SearchObserver<N>,
) -> Result<SearchResult<N>, SearchError<M::Error>>
where
    N: Clone,
    M: NodeModel<N> + ?Sized,
{
    let mut frontier = BestFirstFrontier::new(policy.tie_break);
    let mut stats = SearchStats::default();

    debug!(
        goal = goal.form(),
        tie_break = policy.tie_break.as_str(),
        "search started"
    );

    let start_h = evaluate_heuristic(model, &start, 0, &mut stats)?;
    let root = frontier.seed(model.bucket_key(&start), start, start_h);
    notify(observer, &frontier, SearchEventKind::Opened, root);

    let termination_reason = loop {
        let Some(current_id) = frontier.pop() else {
            break TerminationReason::OpenSetExhausted;
        };
        let Some(current) = frontier.record(current_id) else {
            break TerminationReason::OpenSetExhausted;
        };

        if goal.is_satisfied_by(model, &current.node) {
            break TerminationReason::GoalReached {
                record_id: current_id,
            };
        }

        let current_g = current.g;
        let current_node = current.node.clone();
        frontier.close(current_id);
        stats.total_expansions += 1;
        notify(observer, &frontier, SearchEventKind::Closed, current_id);

        let successors = model.successors(&current_node);
        stats.total_successors_generated += successors.len() as u64;
        trace!(
            record_id = current_id,
            g = current_g,
            successors = successors.len(),
            "expanding"
        );

        for successor in successors {
            let bucket = model.bucket_key(&successor);
            let existing = match frontier.lookup(bucket, |n| model.nodes_match(n, &successor)) {
                Lookup::Closed(_) => {
                    stats.total_closed_suppressed += 1;
                    continue;
                }
                Lookup::Open(id) => Some(id),
                Lookup::Absent => None,
            };

            let step = match model.step_cost(&current_node, &successor) {
                Ok(step) => step,
                Err(e) => {
                    warn!(record_id = current_id, "node model rejected step cost: {e}");
                    return Err(SearchError::Model(e));
                }
            };
            let g = tentative_cost(policy, current_g, step, current_id)?;

            if let Some(existing_id) = existing {
                let improves = frontier
                    .record(existing_id)
                    .is_some_and(|record| g < record.g);
                if improves && frontier.relax(existing_id, current_id, g) {
                    stats.total_relaxations_applied += 1;
                    notify(observer, &frontier, SearchEventKind::Improved, existing_id);
                } else {
                    stats.total_relaxations_rejected += 1;
                }
                continue;
            }

            let h = evaluate_heuristic(model, &successor, current_id, &mut stats)?;
            if let Some(child_id) = frontier.insert_child(bucket, successor, current_id, g, h) {
                notify(observer, &frontier, SearchEventKind::Opened, child_id);
            }
        }
    };

    stats.total_records_created = frontier.records_created();
    stats.open_high_water = frontier.high_water();

    let (path, cost) = match termination_reason {
        TerminationReason::GoalReached { record_id } => (
            Some(frontier.reconstruct_path(record_id)),
            frontier.record(record_id).map(|record| record.g),
        ),
        TerminationReason::OpenSetExhausted => (None, None),
    };

    debug!(
        termination = termination_reason.as_str(),
        expansions = stats.total_expansions,
        records = stats.total_records_created,
        cost = cost.unwrap_or(f64::INFINITY),
        "search finished"
    );

    Ok(SearchResult {
        path,
        cost,
        termination_reason,
        stats,
    })
}

/// `current_g + step`, validated against the policy.
fn tentative_cost<E>(
    policy: &SearchPolicy,
    current_g: f64,
    step: f64,
    record_id: RecordId,
) -> Result<f64, SearchError<E>> {
    if step.is_nan() {
        warn!(record_id, "NaN step cost");
        return Err(SearchError::NanCost {
            stage: CostStage::StepCost,
            record_id,
        });
    }
    if step < 0.0 && policy.reject_negative_step_cost {
        warn!(record_id, step, "negative step cost");
        return Err(SearchError::NegativeStepCost {
            cost: step,
            record_id,
        });
    }
    let g = current_g + step;
    if g.is_nan() {
        return Err(SearchError::NanCost {
            stage: CostStage::StepCost,
            record_id,
        });
    }
    Ok(g)
}

fn evaluate_heuristic<N, M>(
    model: &M,
    node: &N,
    record_id: RecordId,
    stats: &mut SearchStats,
) -> Result<f64, SearchError<M::Error>>
where
    M: NodeModel<N> + ?Sized,
{
    stats.heuristic_evaluations += 1;
    let h = model.heuristic(node);
    if h.is_nan() {
        warn!(record_id, "NaN heuristic");
        return Err(SearchError::NanCost {
            stage: CostStage::Heuristic,
            record_id,
        });
    }
    Ok(h)
}

fn notify<N>(
    observer: &mut dyn SearchObserver<N>,
    frontier: &BestFirstFrontier<N>,
    kind: SearchEventKind,
    record_id: RecordId,
) {
    if let Some(record) = frontier.record(record_id) {
        observer.on_event(&SearchEvent {
            kind,
            record_id,
            parent_id: record.parent,
            node: &record.node,
            g: record.g,
            h: record.h,
            f: record.f,
        });
    }
}
