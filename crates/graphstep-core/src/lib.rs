//! Graphstep Core Library
//!
//! Stepable shortest-path and spanning-tree engine for interactive graph
//! exploration.

pub mod config;
pub mod error;
pub mod graph;
pub mod logging;
pub mod session;
pub mod step;
