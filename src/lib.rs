//! Interaction Simulator - synthetic search telemetry for analytics dashboards
//!
//! Deterministically fabricates search, navigation and success events across
//! a date range and forwards them to a pluggable sink, so dashboards have
//! realistic-looking data before real traffic exists.

pub mod config;
pub mod domain;
pub mod error;
pub mod simulation;

pub use error::{Error, Result};
pub use simulation::{run_simulation, EventSimulator, SimulationRng};
