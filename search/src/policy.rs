//! Search policy: deterministic tie-breaking and cost validation.

/// How equal-`f` frontier entries are ordered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum TieBreak {
    /// Lower heuristic first (closer to the goal), then older record.
    #[default]
    LowestHeuristic,
    /// Older record first (insertion order).
    OldestFirst,
    /// Newer record first.
    NewestFirst,
}

impl TieBreak {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::LowestHeuristic => "lowest_heuristic",
            Self::OldestFirst => "oldest_first",
            Self::NewestFirst => "newest_first",
        }
    }
}

/// Per-engine search configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SearchPolicy {
    /// Frontier tie-break on equal `f`.
    pub tie_break: TieBreak,
    /// Abort with `SearchError::NegativeStepCost` on a negative edge.
    pub reject_negative_step_cost: bool,
}

impl SearchPolicy {
    /// JSON echo of the policy, embedded in search traces.
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "reject_negative_step_cost": self.reject_negative_step_cost,
            "tie_break": self.tie_break.as_str(),
        })
    }
}

impl Default for SearchPolicy {
    fn default() -> Self {
        Self {
            tie_break: TieBreak::LowestHeuristic,
            reject_negative_step_cost: true,
        }
    }
}
