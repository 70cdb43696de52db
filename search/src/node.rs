//! Search records and the frontier ordering key.

use std::cmp::Ordering;

use crate::policy::TieBreak;

/// Dense index of a record in the per-run arena.
///
/// Also the record's creation order: ids are handed out monotonically.
pub type RecordId = usize;

/// Whether a record is still awaiting expansion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordStatus {
    Open,
    Closed,
}

/// Engine-side wrapper around one discovered node.
///
/// `node` never changes after creation. `parent`, `g`, `f` and `depth` are
/// rewritten when a cheaper path is found; `h` is computed once.
#[derive(Debug, Clone)]
pub struct SearchRecord<N> {
    pub record_id: RecordId,
    pub node: N,
    /// Arena index of the predecessor (`None` only for the start record).
    /// Always points at a record that was already closed when the link was
    /// set, so the parent chain is acyclic.
    pub parent: Option<RecordId>,
    /// Cost from the start along the best path found so far.
    pub g: f64,
    /// Heuristic estimate to the goal.
    pub h: f64,
    /// Frontier priority, `g + h`.
    pub f: f64,
    /// Steps from the start along the current parent chain.
    pub depth: u32,
    pub status: RecordStatus,
    /// Bumped on every relaxation; heap entries carrying an older revision
    /// are stale.
    pub revision: u32,
}

impl<N> SearchRecord<N> {
    /// Create the start record: `g = 0`, `f = h`.
    #[must_use]
    pub fn root(node: N, h: f64) -> Self {
        Self {
            record_id: 0,
            node,
            parent: None,
            g: 0.0,
            h,
            f: h,
            depth: 0,
            status: RecordStatus::Open,
            revision: 0,
        }
    }

    /// Create a record discovered as a successor of `parent`.
    #[must_use]
    pub fn child(record_id: RecordId, node: N, parent: &SearchRecord<N>, g: f64, h: f64) -> Self {
        Self {
            record_id,
            node,
            parent: Some(parent.record_id),
            g,
            h,
            f: g + h,
            depth: parent.depth + 1,
            status: RecordStatus::Open,
            revision: 0,
        }
    }

    /// Re-parent onto a cheaper path. Keeps the stored heuristic.
    pub fn relax(&mut self, parent: &SearchRecord<N>, g: f64) {
        self.parent = Some(parent.record_id);
        self.g = g;
        self.f = g + self.h;
        self.depth = parent.depth + 1;
        self.revision += 1;
    }

    #[must_use]
    pub fn is_closed(&self) -> bool {
        self.status == RecordStatus::Closed
    }

    /// Ordering key for the record's current costs.
    #[must_use]
    pub fn frontier_key(&self, tie_break: TieBreak) -> FrontierKey {
        FrontierKey {
            f: self.f,
            h: self.h,
            record_id: self.record_id,
            revision: self.revision,
            tie_break,
        }
    }
}

/// Frontier ordering key: `(f, tie-break)`.
///
/// Lower sorts first. On equal `f` the [`TieBreak`] decides: by default lower
/// `h`, then older record. Floats are compared with `total_cmp`; NaN costs are
/// rejected before a key is ever built.
#[derive(Debug, Clone, Copy)]
pub struct FrontierKey {
    pub f: f64,
    pub h: f64,
    pub record_id: RecordId,
    pub revision: u32,
    pub tie_break: TieBreak,
}

impl PartialEq for FrontierKey {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl Eq for FrontierKey {}

impl PartialOrd for FrontierKey {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for FrontierKey {
    fn cmp(&self, other: &Self) -> Ordering {
        let by_f = self.f.total_cmp(&other.f);
        let tie = match self.tie_break {
            TieBreak::LowestHeuristic => self
                .h
                .total_cmp(&other.h)
                .then(self.record_id.cmp(&other.record_id)),
            TieBreak::OldestFirst => self.record_id.cmp(&other.record_id),
            TieBreak::NewestFirst => other.record_id.cmp(&self.record_id),
        };
        by_f.then(tie).then(self.revision.cmp(&other.revision))
    }
}
