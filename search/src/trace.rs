//! `SearchTraceV1`: node-free event log of one search run.
//!
//! [`TraceRecorder`] is an observer that keeps record ids and costs, never
//! nodes, so any model can be traced. The finished trace serializes to
//! canonical JSON and is content-addressed, which makes run-to-run and
//! process-to-process reproducibility checkable by comparing one digest.

use std::path::Path;

use crate::canon::{canonical_json_bytes, cost_string, CanonError};
use crate::digest::{canonical_hash, ContentHash, DOMAIN_SEARCH_TRACE};
use crate::node::RecordId;
use crate::observer::{SearchEvent, SearchEventKind, SearchObserver};
use crate::policy::SearchPolicy;
use crate::search::{SearchResult, TerminationReason};
use crate::stats::SearchStats;

/// One recorded transition.
#[derive(Debug, Clone, PartialEq)]
pub struct TraceEventV1 {
    /// Position in the event stream.
    pub seq: u64,
    pub kind: SearchEventKind,
    pub record_id: RecordId,
    pub parent_id: Option<RecordId>,
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

/// Observer that records every transition.
#[derive(Debug, Clone, Default)]
pub struct TraceRecorder {
    events: Vec<TraceEventV1>,
}

impl TraceRecorder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn events(&self) -> &[TraceEventV1] {
        &self.events
    }

    /// Seal the recording together with the run's outcome.
    #[must_use]
    pub fn finish<N>(self, policy: &SearchPolicy, result: &SearchResult<N>) -> SearchTraceV1 {
        SearchTraceV1 {
            events: self.events,
            policy: *policy,
            termination_reason: result.termination_reason,
            cost: result.cost,
            path_len: result.path.as_ref().map(Vec::len),
            stats: result.stats,
        }
    }
}

impl<N> SearchObserver<N> for TraceRecorder {
    fn on_event(&mut self, event: &SearchEvent<'_, N>) {
        self.events.push(TraceEventV1 {
            seq: self.events.len() as u64,
            kind: event.kind,
            record_id: event.record_id,
            parent_id: event.parent_id,
            g: event.g,
            h: event.h,
            f: event.f,
        });
    }
}

/// A complete, sealed search trace.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTraceV1 {
    pub events: Vec<TraceEventV1>,
    pub policy: SearchPolicy,
    pub termination_reason: TerminationReason,
    pub cost: Option<f64>,
    pub path_len: Option<usize>,
    pub stats: SearchStats,
}

/// Failure persisting a trace.
#[derive(Debug)]
pub enum TraceWriteError {
    Canon(CanonError),
    Io {
        path: String,
        source: std::io::Error,
    },
}

impl std::fmt::Display for TraceWriteError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Canon(e) => write!(f, "trace serialization failed: {e}"),
            Self::Io { path, source } => write!(f, "writing trace to {path} failed: {source}"),
        }
    }
}

impl std::error::Error for TraceWriteError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Canon(e) => Some(e),
            Self::Io { source, .. } => Some(source),
        }
    }
}

impl From<CanonError> for TraceWriteError {
    fn from(e: CanonError) -> Self {
        Self::Canon(e)
    }
}

impl SearchTraceV1 {
    /// JSON form. Costs are strings (see [`cost_string`]).
    #[must_use]
    pub fn to_json_value(&self) -> serde_json::Value {
        let mut termination = serde_json::json!({
            "type": self.termination_reason.as_str(),
        });
        if let TerminationReason::GoalReached { record_id } = self.termination_reason {
            termination["record_id"] = serde_json::json!(record_id);
        }

        serde_json::json!({
            "cost": self.cost.map(cost_string),
            "events": self.events.iter().map(event_to_json).collect::<Vec<_>>(),
            "path_len": self.path_len,
            "policy": self.policy.to_json_value(),
            "stats": self.stats.to_json_value(),
            "termination_reason": termination,
        })
    }

    /// Serialize to canonical JSON bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn to_canonical_json_bytes(&self) -> Result<Vec<u8>, CanonError> {
        canonical_json_bytes(&self.to_json_value())
    }

    /// Content hash of the canonical bytes.
    ///
    /// # Errors
    ///
    /// Returns [`CanonError`] if serialization fails.
    pub fn digest(&self) -> Result<ContentHash, CanonError> {
        let bytes = self.to_canonical_json_bytes()?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }

    /// Write the canonical bytes to `path` and return their digest.
    ///
    /// # Errors
    ///
    /// Returns [`TraceWriteError`] on serialization or I/O failure.
    pub fn write_to(&self, path: &Path) -> Result<ContentHash, TraceWriteError> {
        let bytes = self.to_canonical_json_bytes()?;
        std::fs::write(path, &bytes).map_err(|source| TraceWriteError::Io {
            path: path.display().to_string(),
            source,
        })?;
        Ok(canonical_hash(DOMAIN_SEARCH_TRACE, &bytes))
    }
}

fn event_to_json(e: &TraceEventV1) -> serde_json::Value {
    serde_json::json!({
        "f": cost_string(e.f),
        "g": cost_string(e.g),
        "h": cost_string(e.h),
        "kind": e.kind.as_str(),
        "parent_id": e.parent_id,
        "record_id": e.record_id,
        "seq": e.seq,
    })
}
