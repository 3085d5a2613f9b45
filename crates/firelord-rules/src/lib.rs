//! Pure decision rules for FIRELORD.
//!
//! Eligibility policy, the ranged ignition gates and the flame layout of
//! burning weapons. No ECS dependency; every function operates on plain data
//! from `firelord-core`.

pub mod eligibility;
pub mod flame_layout;
pub mod ranged;

pub use firelord_core as core;

#[cfg(test)]
mod tests;
