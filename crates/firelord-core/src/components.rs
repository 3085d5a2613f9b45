//! ECS components for hecs entities.
//!
//! Each tracked agent gets one hecs entity carrying these records.
//! Components are plain data; the state machines live in the sim systems.

use serde::{Deserialize, Serialize};

use crate::timer::MissionTimer;
use crate::types::{AgentId, EffectHandle, GameEntityId};

/// Links a hecs entity back to the host agent it shadows.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Tracked {
    pub agent: AgentId,
    /// Set by the removal notification; the cleanup pass despawns the entity.
    pub removed: bool,
}

impl Tracked {
    pub fn new(agent: AgentId) -> Self {
        Self {
            agent,
            removed: false,
        }
    }
}

/// Fire bar and burning state of one agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireRecord {
    /// Heat accumulator in `[0, bar_max]`. Frozen while burning.
    pub fire_bar: f32,
    pub is_burning: bool,
    /// Runs for the configured burn duration. Set only while burning.
    pub burning_timer: Option<MissionTimer>,
    /// Paces the once-per-second burning blows. Set only while burning.
    pub damage_timer: Option<MissionTimer>,
    /// Last agent credited for heat; a weak reference by id.
    pub attacker: Option<AgentId>,
    /// Scene entity the ignition particles hang off.
    pub fire_entity: Option<GameEntityId>,
    /// Attached ignition particles, released when burning ends.
    pub visuals: Vec<EffectHandle>,
}

impl FireRecord {
    pub fn with_heat(fire_bar: f32, attacker: Option<AgentId>) -> Self {
        Self {
            fire_bar,
            attacker,
            ..Self::default()
        }
    }
}

/// Burning weapon state of one human agent.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WeaponFireRecord {
    pub enabled: bool,
    /// Whether the main hand was empty at the last observed wield change.
    pub last_wielded_weapon_empty: bool,
    /// Pending delayed enable.
    pub equip_timer: Option<MissionTimer>,
    /// Weapon entity the flames are attached to while enabled.
    pub weapon_entity: Option<GameEntityId>,
    pub visuals: Vec<EffectHandle>,
}

/// Set while either state machine forces an equip-slot mutation on the agent.
///
/// Shared by both machines: wield changes seen while it is held were caused by
/// the forced drop and pickup, not by the agent.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DropLock {
    pub held: bool,
}
