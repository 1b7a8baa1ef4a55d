//! Synthetic interaction event generation
//!
//! [`EventSimulator`] produces the events, an [`EventSink`] receives them and
//! [`run_simulation`] connects the two under a [`SinkFailurePolicy`].

pub mod clock;
pub mod generator;
pub mod rng;
pub mod runner;
pub mod sink;

pub use generator::{sample_dates, EventSimulator};
pub use rng::SimulationRng;
pub use runner::{run_simulation, RunSummary, SinkFailurePolicy};
pub use sink::{EventSink, JsonLinesSink, MemorySink, SinkError, TracingSink};
