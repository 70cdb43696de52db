//! Scenario runner: one search over a [`ScenarioV1`], packaged as a report.
//!
//! # Pipeline
//!
//! ```text
//! scenario.start() + goal form → solve() with TraceRecorder
//!   → seal trace → trace digest → RunReport (labels, stats, digest)
//! ```
//!
//! The runner owns orchestration only; search semantics live in
//! `wayfind_search`.

use tracing::{info, warn};

use wayfind_search::canon::{canonical_json_bytes, cost_string};
use wayfind_search::digest::{canonical_hash, ContentHash, DOMAIN_RUN_REPORT};
use wayfind_search::search::solve;
use wayfind_search::stats::SearchStats;
use wayfind_search::trace::{SearchTraceV1, TraceRecorder};
use wayfind_search::{Goal, SearchPolicy, TerminationReason};

use crate::contract::{GoalForm, ScenarioV1};

/// Error during a scenario run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RunError {
    /// The scenario cannot express its goal in the requested form.
    GoalFormUnsupported { world_id: String, form: GoalForm },
    /// The search failed fatally (model contract violation or bad cost).
    SearchFailed { detail: String },
    /// Canonical JSON serialization failed.
    CanonFailed { detail: String },
}

impl std::fmt::Display for RunError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::GoalFormUnsupported { world_id, form } => write!(
                f,
                "world {world_id} has no {} goal",
                form.as_str()
            ),
            Self::SearchFailed { detail } => write!(f, "search failed: {detail}"),
            Self::CanonFailed { detail } => write!(f, "canonical serialization failed: {detail}"),
        }
    }
}

impl std::error::Error for RunError {}

/// Outcome of one scenario run.
#[derive(Debug, Clone)]
pub struct RunReport {
    pub world_id: String,
    pub goal_form: GoalForm,
    pub termination_reason: TerminationReason,
    pub cost: Option<f64>,
    /// Scenario labels of the path nodes, start first.
    pub path: Option<Vec<serde_json::Value>>,
    pub stats: SearchStats,
    pub trace: SearchTraceV1,
    pub trace_digest: ContentHash,
}

impl RunReport {
    /// Number of nodes on the path, start and goal included.
    #[must_use]
    pub fn path_len(&self) -> Option<usize> {
        self.path.as_ref().map(Vec::len)
    }

    /// JSON form. The trace itself is referenced by digest only.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "cost": self.cost.map(cost_string),
            "goal_form": self.goal_form.as_str(),
            "path": self.path,
            "stats": self.stats.to_json_value(),
            "termination_reason": self.termination_reason.as_str(),
            "trace_digest": self.trace_digest.as_str(),
            "world_id": self.world_id,
        })
    }

    /// Content hash of the canonical report bytes.
    ///
    /// # Errors
    ///
    /// Returns [`RunError::CanonFailed`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, RunError> {
        let bytes =
            canonical_json_bytes(&self.to_json_value()).map_err(|e| RunError::CanonFailed {
                detail: e.to_string(),
            })?;
        Ok(canonical_hash(DOMAIN_RUN_REPORT, &bytes))
    }
}

/// Run `scenario` once with the goal in the requested form.
///
/// An unreachable goal is a successful run whose report carries
/// [`TerminationReason::OpenSetExhausted`].
///
/// # Errors
///
/// - [`RunError::GoalFormUnsupported`] if `form` is [`GoalForm::Node`] and
///   the scenario has no literal goal node.
/// - [`RunError::SearchFailed`] if the search aborts.
/// - [`RunError::CanonFailed`] if the trace cannot be serialized.
pub fn run_scenario<S: ScenarioV1>(
    scenario: &S,
    form: GoalForm,
    policy: &SearchPolicy,
) -> Result<RunReport, RunError> {
    let world_id = scenario.world_id().to_string();
    let accept = |node: &S::Node| scenario.accepts(node);
    let goal = match form {
        GoalForm::Predicate => Goal::predicate(&accept),
        GoalForm::Node => match scenario.goal_node() {
            Some(node) => Goal::node(node),
            None => {
                return Err(RunError::GoalFormUnsupported { world_id, form });
            }
        },
    };

    info!(world = %world_id, goal = form.as_str(), "scenario run started");

    let mut recorder = TraceRecorder::new();
    let result = solve(
        scenario.model(),
        policy,
        scenario.start(),
        &goal,
        &mut recorder,
    )
    .map_err(|e| {
        warn!(world = %world_id, "scenario search failed: {e}");
        RunError::SearchFailed {
            detail: e.to_string(),
        }
    })?;

    let trace = recorder.finish(policy, &result);
    let trace_digest = trace.digest().map_err(|e| RunError::CanonFailed {
        detail: e.to_string(),
    })?;

    let path = result
        .path
        .as_ref()
        .map(|nodes| nodes.iter().map(|n| scenario.label(n)).collect());

    info!(
        world = %world_id,
        termination = result.termination_reason.as_str(),
        expansions = result.stats.total_expansions,
        digest = %trace_digest,
        "scenario run finished"
    );

    Ok(RunReport {
        world_id,
        goal_form: form,
        termination_reason: result.termination_reason,
        cost: result.cost,
        path,
        stats: result.stats,
        trace,
        trace_digest,
    })
}
