//! FIRELORD console harness.
//!
//! Runs a scripted skirmish on the sandbox host in a game loop thread, takes
//! player commands from the console and reports what burned.

pub mod error;
pub mod game_loop;
pub mod state;

pub use firelord_core as core;
