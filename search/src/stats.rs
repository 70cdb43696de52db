//! Per-run counters.

/// Aggregate counters collected during one `solve` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SearchStats {
    /// Records popped and expanded (goal pop excluded).
    pub total_expansions: u64,
    /// Successor nodes returned by the model.
    pub total_successors_generated: u64,
    /// Successors dropped because they matched a closed record.
    pub total_closed_suppressed: u64,
    /// Records created, start record included.
    pub total_records_created: u64,
    /// Open records re-parented onto a cheaper path.
    pub total_relaxations_applied: u64,
    /// Open matches whose tentative cost was not strictly lower.
    pub total_relaxations_rejected: u64,
    /// Calls to `NodeModel::heuristic`.
    pub heuristic_evaluations: u64,
    /// Largest number of live open records at any point.
    pub open_high_water: u64,
}

impl SearchStats {
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        serde_json::json!({
            "heuristic_evaluations": self.heuristic_evaluations,
            "open_high_water": self.open_high_water,
            "total_closed_suppressed": self.total_closed_suppressed,
            "total_expansions": self.total_expansions,
            "total_records_created": self.total_records_created,
            "total_relaxations_applied": self.total_relaxations_applied,
            "total_relaxations_rejected": self.total_relaxations_rejected,
            "total_successors_generated": self.total_successors_generated,
        })
    }
}
