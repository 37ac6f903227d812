//! Command implementations for graphstep

pub mod dispatch;
pub mod format;
pub mod graph;
pub mod run;
