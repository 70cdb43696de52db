//! Directed graph with integer weights and a brute-force shortest-path oracle.
//!
//! Weights are whole numbers so engine costs (f64 sums of small integers) and
//! oracle costs (u64) compare exactly.

use std::cmp::Reverse;
use std::collections::BinaryHeap;

use wayfind_search::NodeModel;

/// Step cost requested for a pair with no edge.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NoEdge {
    pub from: usize,
    pub to: usize,
}

impl std::fmt::Display for NoEdge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "no edge {} -> {}", self.from, self.to)
    }
}

impl std::error::Error for NoEdge {}

#[derive(Debug, Clone)]
pub struct WeightedGraph {
    adjacency: Vec<Vec<(usize, u32)>>,
    heuristic: Vec<f64>,
}

impl WeightedGraph {
    /// Graph over nodes `0..node_count`. Edges naming other nodes are dropped;
    /// parallel edges keep the cheapest weight.
    #[must_use]
    pub fn new(node_count: usize, edges: &[(usize, usize, u32)]) -> Self {
        let mut adjacency: Vec<Vec<(usize, u32)>> = vec![Vec::new(); node_count];
        for &(from, to, weight) in edges {
            if from >= node_count || to >= node_count {
                continue;
            }
            let out = &mut adjacency[from];
            match out.iter_mut().find(|(t, _)| *t == to) {
                Some(existing) => existing.1 = existing.1.min(weight),
                None => out.push((to, weight)),
            }
        }
        Self {
            adjacency,
            heuristic: vec![0.0; node_count],
        }
    }

    #[must_use]
    pub fn node_count(&self) -> usize {
        self.adjacency.len()
    }

    #[must_use]
    pub fn weight(&self, from: usize, to: usize) -> Option<u32> {
        self.adjacency
            .get(from)?
            .iter()
            .find(|(t, _)| *t == to)
            .map(|(_, w)| *w)
    }

    /// Use `factor × (exact distance to goal)` as the heuristic. For
    /// `factor` in `[0, 1]` the result is consistent.
    #[must_use]
    pub fn with_scaled_exact_heuristic(mut self, goal: usize, factor: f64) -> Self {
        self.heuristic = self
            .distances_to(goal)
            .into_iter()
            .map(|d| d.map_or(0.0, |d| d as f64 * factor))
            .collect();
        self
    }

    /// Dijkstra from `start`: cheapest cost to every node, `None` if
    /// unreachable.
    #[must_use]
    pub fn distances_from(&self, start: usize) -> Vec<Option<u64>> {
        dijkstra(&self.adjacency, start)
    }

    /// Dijkstra on the reversed graph: cheapest cost from every node to
    /// `goal`.
    #[must_use]
    pub fn distances_to(&self, goal: usize) -> Vec<Option<u64>> {
        let mut reversed: Vec<Vec<(usize, u32)>> = vec![Vec::new(); self.node_count()];
        for (from, out) in self.adjacency.iter().enumerate() {
            for &(to, w) in out {
                reversed[to].push((from, w));
            }
        }
        dijkstra(&reversed, goal)
    }

    /// Sum of edge weights along `path`, `None` if a hop has no edge.
    #[must_use]
    pub fn path_cost(&self, path: &[usize]) -> Option<u64> {
        path.windows(2)
            .map(|hop| self.weight(hop[0], hop[1]).map(u64::from))
            .sum()
    }
}

fn dijkstra(adjacency: &[Vec<(usize, u32)>], start: usize) -> Vec<Option<u64>> {
    let mut dist: Vec<Option<u64>> = vec![None; adjacency.len()];
    if start >= adjacency.len() {
        return dist;
    }
    let mut heap = BinaryHeap::new();
    dist[start] = Some(0);
    heap.push(Reverse((0u64, start)));
    while let Some(Reverse((d, node))) = heap.pop() {
        if dist[node].is_some_and(|best| d > best) {
            continue;
        }
        for &(next, w) in &adjacency[node] {
            let candidate = d + u64::from(w);
            let improves = match dist[next] {
                Some(best) => candidate < best,
                None => true,
            };
            if improves {
                dist[next] = Some(candidate);
                heap.push(Reverse((candidate, next)));
            }
        }
    }
    dist
}

impl NodeModel<usize> for WeightedGraph {
    type Error = NoEdge;

    fn successors(&self, node: &usize) -> Vec<usize> {
        self.adjacency
            .get(*node)
            .map(|out| out.iter().map(|(to, _)| *to).collect())
            .unwrap_or_default()
    }

    fn nodes_match(&self, a: &usize, b: &usize) -> bool {
        a == b
    }

    fn step_cost(&self, from: &usize, to: &usize) -> Result<f64, NoEdge> {
        self.weight(*from, *to)
            .map(f64::from)
            .ok_or(NoEdge {
                from: *from,
                to: *to,
            })
    }

    fn heuristic(&self, node: &usize) -> f64 {
        self.heuristic.get(*node).copied().unwrap_or(0.0)
    }

    fn bucket_key(&self, node: &usize) -> u64 {
        *node as u64
    }
}
