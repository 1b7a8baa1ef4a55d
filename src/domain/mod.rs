//! Domain types for the interaction simulator
//!
//! This module contains the types that describe a simulated search session
//! and the telemetry it produces, following type-driven development
//! principles.

pub mod config_types;
pub mod events;
pub mod identifiers;
pub mod session;
pub mod types;
pub mod vocabulary;

pub use config_types::*;
pub use events::*;
pub use identifiers::*;
pub use session::*;
pub use types::*;
