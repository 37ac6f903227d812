//! Cooperative step suspension
//!
//! After every emitted event the engine hands control to a [`Suspend`]
//! implementation and continues only when it answers [`Resume::Continue`].
//! - [`StepController`]: channel-driven auto/manual stepping with cancellation
//! - [`Immediate`]: never waits, for scripted runs and tests

mod controller;

use std::fmt;
use std::str::FromStr;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::GraphError;

pub use controller::{CancelToken, Signal, StepController, StepHandle};

/// Lower bound for a pacing value, in milliseconds
pub const MIN_PACING_MS: u64 = 10;
/// Upper bound for a pacing value, in milliseconds
pub const MAX_PACING_MS: u64 = 2000;
/// Pacing used when nothing is configured
pub const DEFAULT_PACING_MS: u64 = 300;
/// Relaxation steps never wait less than this in auto mode
const MIN_RELAX_DELAY_MS: u64 = 40;

/// Kind of step the engine just emitted
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StepKind {
    /// A node was settled (Dijkstra `on_visit`)
    Visit,
    /// A tentative distance improved (Dijkstra `on_update`)
    Relax,
    /// The spanning tree grew (Prim `on_update`)
    Grow,
}

/// Per-step delay used in auto mode
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Pacing(Duration);

impl Pacing {
    /// Build a pacing value, clamped to the supported range
    pub fn from_millis(ms: u64) -> Self {
        Pacing(Duration::from_millis(ms.clamp(MIN_PACING_MS, MAX_PACING_MS)))
    }

    pub fn as_millis(&self) -> u64 {
        self.0.as_millis() as u64
    }

    /// Delay for a given step kind.
    ///
    /// Visits and tree growth wait the full pacing; relaxations wait a third
    /// of it, never less than 40ms.
    pub fn delay_for(&self, kind: StepKind) -> Duration {
        match kind {
            StepKind::Visit | StepKind::Grow => self.0,
            StepKind::Relax => {
                Duration::from_millis((self.as_millis() / 3).max(MIN_RELAX_DELAY_MS))
            }
        }
    }
}

impl Default for Pacing {
    fn default() -> Self {
        Pacing::from_millis(DEFAULT_PACING_MS)
    }
}

/// Whether suspensions release on a timer or on an explicit advance
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StepMode {
    #[default]
    Auto,
    Manual,
}

impl FromStr for StepMode {
    type Err = GraphError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "auto" => Ok(StepMode::Auto),
            "manual" => Ok(StepMode::Manual),
            other => Err(GraphError::invalid_value("step mode", other)),
        }
    }
}

impl fmt::Display for StepMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StepMode::Auto => write!(f, "auto"),
            StepMode::Manual => write!(f, "manual"),
        }
    }
}

/// Answer from a suspension point
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Resume {
    Continue,
    Cancel,
}

/// A suspension point handler, consulted after every emitted event
pub trait Suspend {
    fn suspend(&mut self, kind: StepKind, delay: Duration) -> Resume;
}

/// Suspension that never waits
#[derive(Debug, Clone, Copy, Default)]
pub struct Immediate;

impl Suspend for Immediate {
    fn suspend(&mut self, _kind: StepKind, _delay: Duration) -> Resume {
        Resume::Continue
    }
}
