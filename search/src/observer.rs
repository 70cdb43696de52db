//! Side-channel notifications for visualization and instrumentation.
//!
//! Observers see every open-set insertion, open-set improvement and
//! closed-set transition, synchronously and after it happened. They return
//! nothing and cannot influence the search.

use crate::node::RecordId;

/// Kind of state transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SearchEventKind {
    /// A newly discovered node entered the open set.
    Opened,
    /// An open record was re-parented onto a cheaper path.
    Improved,
    /// A record was expanded and moved into the closed set.
    Closed,
}

impl SearchEventKind {
    /// Stable lowercase name.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Opened => "opened",
            Self::Improved => "improved",
            Self::Closed => "closed",
        }
    }
}

/// One transition, borrowed from the frontier at the moment it happened.
#[derive(Debug, Clone, Copy)]
pub struct SearchEvent<'a, N> {
    pub kind: SearchEventKind,
    pub record_id: RecordId,
    pub parent_id: Option<RecordId>,
    pub node: &'a N,
    pub g: f64,
    pub h: f64,
    pub f: f64,
}

/// Receiver of [`SearchEvent`]s.
pub trait SearchObserver<N> {
    fn on_event(&mut self, event: &SearchEvent<'_, N>);
}

impl<N, F> SearchObserver<N> for F
where
    F: FnMut(&SearchEvent<'_, N>),
{
    fn on_event(&mut self, event: &SearchEvent<'_, N>) {
        self(event);
    }
}

/// Observer that ignores everything.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoopObserver;

impl<N> SearchObserver<N> for NoopObserver {
    fn on_event(&mut self, _event: &SearchEvent<'_, N>) {}
}
