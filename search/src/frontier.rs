//! Open and closed sets for a single search run.
//!
//! Records live in an append-only arena owned by the frontier; parent links
//! are arena indices. The open set is a `BinaryHeap` of frontier keys with
//! lazy removal: relaxing a record pushes a fresh key and the superseded one
//! is skipped when it surfaces. The closed set is the `Closed` status bit on
//! the arena record. Lookups go through a `BTreeMap` bucket index keyed by
//! [`crate::contract::NodeModel::bucket_key`], then `nodes_match` within the
//! bucket.

use std::cmp::Reverse;
use std::collections::{BTreeMap, BinaryHeap};

use crate::node::{FrontierKey, RecordId, RecordStatus, SearchRecord};
use crate::policy::TieBreak;

/// Result of looking a node up in the frontier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Lookup {
    /// Never discovered in this run.
    Absent,
    /// Discovered and still awaiting expansion.
    Open(RecordId),
    /// Already expanded; never reopened.
    Closed(RecordId),
}

/// Best-first frontier manager.
///
/// Maintains:
/// - the record arena (every record discovered in this run)
/// - a `BinaryHeap` for O(log n) extraction of the lowest key
/// - a `BTreeMap<u64, Vec<RecordId>>` bucket index for membership tests
pub struct BestFirstFrontier<N> {
    records: Vec<SearchRecord<N>>,
    buckets: BTreeMap<u64, Vec<RecordId>>,
    heap: BinaryHeap<Reverse<FrontierKey>>,
    tie_break: TieBreak,
    open_count: usize,
    high_water: u64,
}

impl<N> BestFirstFrontier<N> {
    /// Create a new empty frontier.
    #[must_use]
    pub fn new(tie_break: TieBreak) -> Self {
        Self {
            records: Vec::new(),
            buckets: BTreeMap::new(),
            heap: BinaryHeap::new(),
            tie_break,
            open_count: 0,
            high_water: 0,
        }
    }

    /// Insert the start record. Must be the first insertion of a run.
    pub fn seed(&mut self, bucket: u64, node: N, h: f64) -> RecordId {
        debug_assert!(self.records.is_empty(), "seed must be the first insert");
        self.push_record(bucket, SearchRecord::root(node, h))
    }

    /// Insert a newly discovered successor of `parent` as an open record.
    ///
    /// Returns `None` if `parent` is not a record of this frontier.
    pub fn insert_child(
        &mut self,
        bucket: u64,
        node: N,
        parent: RecordId,
        g: f64,
        h: f64,
    ) -> Option<RecordId> {
        let record_id = self.records.len();
        let record = SearchRecord::child(record_id, node, self.records.get(parent)?, g, h);
        Some(self.push_record(bucket, record))
    }

    fn push_record(&mut self, bucket: u64, record: SearchRecord<N>) -> RecordId {
        let record_id = record.record_id;
        self.heap.push(Reverse(record.frontier_key(self.tie_break)));
        self.records.push(record);
        self.buckets.entry(bucket).or_default().push(record_id);
        self.open_count += 1;
        let size = self.open_count as u64;
        if size > self.high_water {
            self.high_water = size;
        }
        record_id
    }

    /// Find the record whose node satisfies `matches` within `bucket`.
    pub fn lookup(&self, bucket: u64, mut matches: impl FnMut(&N) -> bool) -> Lookup {
        let Some(ids) = self.buckets.get(&bucket) else {
            return Lookup::Absent;
        };
        for &id in ids {
            let record = &self.records[id];
            if matches(&record.node) {
                return match record.status {
                    RecordStatus::Open => Lookup::Open(id),
                    RecordStatus::Closed => Lookup::Closed(id),
                };
            }
        }
        Lookup::Absent
    }

    /// Re-parent open record `id` onto `parent` with the cheaper cost `g`.
    ///
    /// Returns `false` (and changes nothing) if either id is unknown or the
    /// record is already closed.
    pub fn relax(&mut self, id: RecordId, parent: RecordId, g: f64) -> bool {
        let len = self.records.len();
        if id >= len || parent >= len || id == parent {
            return false;
        }
        let (parent_record, record) = if parent < id {
            let (head, tail) = self.records.split_at_mut(id);
            (&head[parent], tail.first_mut())
        } else {
            let (head, tail) = self.records.split_at_mut(parent);
            (&tail[0], head.get_mut(id))
        };
        let Some(record) = record else {
            return false;
        };
        if record.is_closed() {
            return false;
        }
        record.relax(parent_record, g);
        self.heap.push(Reverse(record.frontier_key(self.tie_break)));
        true
    }

    /// Remove and return the open record with the lowest key.
    ///
    /// The record stays `Open` until [`BestFirstFrontier::close`] is called.
    pub fn pop(&mut self) -> Option<RecordId> {
        while let Some(Reverse(key)) = self.heap.pop() {
            let record = &self.records[key.record_id];
            if record.is_closed() || record.revision != key.revision {
                continue;
            }
            self.open_count -= 1;
            return Some(key.record_id);
        }
        None
    }

    /// Move record `id` into the closed set.
    pub fn close(&mut self, id: RecordId) {
        if let Some(record) = self.records.get_mut(id) {
            record.status = RecordStatus::Closed;
        }
    }

    #[must_use]
    pub fn record(&self, id: RecordId) -> Option<&SearchRecord<N>> {
        self.records.get(id)
    }

    /// Live open records (stale heap entries excluded).
    #[must_use]
    pub fn len(&self) -> usize {
        self.open_count
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.open_count == 0
    }

    /// High-water mark of live open records.
    #[must_use]
    pub fn high_water(&self) -> u64 {
        self.high_water
    }

    /// Number of records ever created in this run.
    #[must_use]
    pub fn records_created(&self) -> u64 {
        self.records.len() as u64
    }

    /// Nodes from the start record to `id`, following parent links.
    ///
    /// Returns an empty vector if `id` is unknown.
    #[must_use]
    pub fn reconstruct_path(&self, id: RecordId) -> Vec<N>
    where
        N: Clone,
    {
        let mut path = Vec::new();
        let mut current = Some(id);

        while let Some(record) = current.and_then(|i| self.records.get(i)) {
            path.push(record.node.clone());
            current = record.parent;
        }

        path.reverse();
        path
    }
}
