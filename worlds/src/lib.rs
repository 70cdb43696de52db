//! Wayfind Worlds: concrete node models for the search engine.
//!
//! Each world owns its state-space representation entirely; the engine only
//! sees it through [`wayfind_search::NodeModel`]. Worlds also implement
//! [`contract::ScenarioV1`] so the [`runner`] can drive them with either a
//! literal goal or a goal predicate and package the outcome as a
//! content-addressed [`runner::RunReport`].

#![forbid(unsafe_code)]

pub mod contract;
pub mod runner;
pub mod worlds;
