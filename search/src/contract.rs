//! Node model contract and goal forms.

/// The capability set the engine requires from its caller.
///
/// The engine never inspects a node's structure. It only calls the four
/// operations below (plus the optional [`NodeModel::bucket_key`] index hint).
///
/// # Contract
///
/// - `successors` must be deterministic: same node → same successors in the
///   same order. The returned vector is treated as transient; the engine
///   relies on value equality via `nodes_match`, never on identity.
/// - `nodes_match` must be an equivalence relation (reflexive, symmetric,
///   transitive). Violations corrupt set membership and can make the search
///   return duplicates or fail to terminate.
/// - `step_cost(a, b)` is only called with `b` a direct successor of `a`.
///   It must be non-negative. Returning `Err` signals a contract violation
///   and aborts the search.
/// - `heuristic` should be admissible (never overestimate the remaining
///   cost). This is not verified: an inadmissible heuristic silently
///   degrades the optimality guarantee.
pub trait NodeModel<N> {
    /// Failure raised by [`NodeModel::step_cost`] when asked for the cost of
    /// an edge that does not exist.
    type Error: std::error::Error;

    /// Every node directly reachable from `node` in one step. May be empty.
    fn successors(&self, node: &N) -> Vec<N>;

    /// Node equality used for open/closed-set deduplication and literal goals.
    fn nodes_match(&self, a: &N, b: &N) -> bool;

    /// Exact cost of moving from `from` to its direct successor `to`.
    ///
    /// # Errors
    ///
    /// Returns `Self::Error` if `to` is not reachable from `from`.
    fn step_cost(&self, from: &N, to: &N) -> Result<f64, Self::Error>;

    /// Estimated remaining cost from `node` to the goal.
    fn heuristic(&self, node: &N) -> f64;

    /// Index hint for set lookups.
    ///
    /// Nodes that match under [`NodeModel::nodes_match`] MUST return the same
    /// key. Distinct keys let the engine skip equality checks; equal keys
    /// still fall back to `nodes_match`. The default places every node in one
    /// bucket, which degrades lookups to a linear scan.
    fn bucket_key(&self, _node: &N) -> u64 {
        0
    }
}

/// What the search is looking for.
pub enum Goal<'g, N> {
    /// A literal node, matched with [`NodeModel::nodes_match`].
    Node(N),
    /// An arbitrary acceptance predicate.
    Predicate(&'g dyn Fn(&N) -> bool),
}

impl<'g, N> Goal<'g, N> {
    /// Goal satisfied by nodes matching `node`.
    #[must_use]
    pub fn node(node: N) -> Self {
        Self::Node(node)
    }

    /// Goal satisfied by nodes accepted by `predicate`.
    #[must_use]
    pub fn predicate(predicate: &'g dyn Fn(&N) -> bool) -> Self {
        Self::Predicate(predicate)
    }

    /// Test `candidate` against this goal.
    pub fn is_satisfied_by<M>(&self, model: &M, candidate: &N) -> bool
    where
        M: NodeModel<N> + ?Sized,
    {
        match self {
            Self::Node(target) => model.nodes_match(candidate, target),
            Self::Predicate(accept) => accept(candidate),
        }
    }

    /// Short label for logs and reports.
    #[must_use]
    pub fn form(&self) -> &'static str {
        match self {
            Self::Node(_) => "node",
            Self::Predicate(_) => "predicate",
        }
    }
}

impl<N: std::fmt::Debug> std::fmt::Debug for Goal<'_, N> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Node(node) => f.debug_tuple("Node").field(node).finish(),
            Self::Predicate(_) => f.write_str("Predicate(..)"),
        }
    }
}
