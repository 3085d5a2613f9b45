//! Simulation engine for FIRELORD.
//!
//! Owns the hecs ECS world that shadows the host's agents, runs the fire-bar,
//! weapon fire-effect and fire-arrow state machines at the host's tick rate,
//! and produces FireStateSnapshots for the host.

pub mod engine;
pub mod host;
pub mod sandbox;
pub mod scenario;
pub mod systems;

pub use engine::{FireSimulation, SimConfig};
pub use firelord_core as core;
pub use host::BattleHost;
