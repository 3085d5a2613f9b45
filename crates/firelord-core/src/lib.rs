//! Core types and definitions for the FIRELORD status-effect simulation.
//!
//! This crate defines the vocabulary shared across all other crates:
//! host views, components, commands, configuration, events, snapshots and
//! constants. It has no dependency on the ECS or any host runtime.

pub mod agent;
pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod state;
pub mod timer;
pub mod types;
