//! Simulation constants and fixed tuning parameters.
//!
//! Everything a player may want to tune lives in [`crate::config`]; these
//! stay fixed.

/// Nominal host tick rate (Hz) used by the harness.
pub const TICK_RATE: u32 = 30;

/// Seconds per tick at the nominal rate.
pub const DT: f64 = 1.0 / TICK_RATE as f64;

/// Slack applied to timer comparisons so accumulated `dt` rounding does not
/// push an expiry one tick late.
pub const TIMER_EPSILON: f64 = 1e-9;

// --- Ignition ---

/// Skeleton bones that receive a flame particle when an agent ignites.
pub const IGNITION_BONE_INDEXES: [i8; 14] = [0, 1, 2, 3, 5, 6, 7, 9, 12, 13, 15, 17, 22, 24];

/// Interval between burning damage blows (seconds).
pub const BURNING_DAMAGE_INTERVAL_SECS: f64 = 1.0;

/// Health a burning blow always leaves behind. Burning never kills.
pub const NON_LETHAL_HEALTH_FLOOR: f32 = 1.0;

/// Particle system attached to an igniting agent.
pub const IGNITION_PARTICLE: &str = "psys_campfire";

// --- Weapon fire effect ---

/// Particle system used for burning weapons and fire arrows.
pub const BURNING_AGENT_PARTICLE: &str = "psys_game_burning_agent";

/// Delay between picking up a weapon and the flames appearing (seconds).
pub const WIELD_DELAY_SECS: f64 = 0.1;

/// Delay after an agent spawns before its weapon is lit (seconds).
pub const SPAWN_WIELD_DELAY_SECS: f64 = 1.0;

/// Weapon length units per flame section.
pub const WEAPON_LENGTH_PER_SECTION: f32 = 10.0;

/// Elevation between two flame particles along the blade (meters).
pub const WEAPON_SECTION_LENGTH: f32 = 0.1;

// --- Messages ---

/// Text color of the "received burning damage" message.
pub const RECEIVED_DAMAGE_COLOR: &str = "#D65252FF";
