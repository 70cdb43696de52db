//! Wayfind Search: generic A* over caller-defined node types.
//!
//! The engine knows nothing about the search space. Callers implement
//! [`NodeModel`] (successors, equality, step cost, heuristic) and hand it to
//! a [`SearchEngine`]; each `solve` call runs one single-threaded search with
//! private open and closed sets.
//!
//! # Crate dependency graph
//!
//! ```text
//! wayfind_search  ←  wayfind_worlds  ←  lock-tests, benchmarks
//! (engine, trace)    (example models)
//! ```
//!
//! # Key types
//!
//! - [`NodeModel`]: the capability set a search space must provide
//! - [`Goal`]: literal goal node or acceptance predicate
//! - [`SearchEngine`]: holds a model and a [`SearchPolicy`], exposes `solve`
//! - [`SearchResult`]: path, cost, termination reason, counters
//! - [`SearchObserver`]: side-channel for open/closed transitions
//! - [`trace::TraceRecorder`]: observer producing a content-addressed trace

#![forbid(unsafe_code)]

pub mod canon;
pub mod contract;
pub mod digest;
pub mod error;
pub mod frontier;
pub mod node;
pub mod observer;
pub mod policy;
pub mod search;
pub mod stats;
pub mod trace;

pub use contract::{Goal, NodeModel};
pub use error::SearchError;
pub use observer::{SearchEvent, SearchEventKind, SearchObserver};
pub use policy::{SearchPolicy, TieBreak};
pub use search::{SearchEngine, SearchResult, TerminationReason};
