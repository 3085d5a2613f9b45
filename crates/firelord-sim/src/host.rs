//! The seam between the simulation and the host game.
//!
//! The host owns agents, weapons, missiles, particles and damage. The
//! simulation queries it for fresh views every time and drives it through the
//! few mutations below; it never caches host state across ticks.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use firelord_core::agent::{AgentView, MissileView, MissionContext, WeaponView};
use firelord_core::enums::DamageType;
use firelord_core::types::{AgentId, EffectHandle, EquipmentIndex, GameEntityId};

/// A particle system to attach to a scene entity.
#[derive(Debug, Clone, PartialEq)]
pub struct EffectRequest {
    pub particle: &'static str,
    /// Entity the particle's frame is relative to.
    pub entity: GameEntityId,
    /// Skeleton bone to parent the particle to; `None` for missiles.
    pub bone: Option<i8>,
    /// Local offset from the entity frame.
    pub offset: Vec3,
}

impl EffectRequest {
    pub fn on_entity(particle: &'static str, entity: GameEntityId) -> Self {
        Self {
            particle,
            entity,
            bone: None,
            offset: Vec3::ZERO,
        }
    }

    pub fn on_bone(particle: &'static str, entity: GameEntityId, bone: i8) -> Self {
        Self {
            bone: Some(bone),
            ..Self::on_entity(particle, entity)
        }
    }

    /// Raise the particle along the entity's up axis.
    pub fn elevated(mut self, elevation: f32) -> Self {
        self.offset = Vec3::Z * elevation;
        self
    }
}

/// A damage blow registered against an agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Blow {
    pub attacker: Option<AgentId>,
    pub victim: AgentId,
    pub damage_type: DamageType,
    /// The victim does not flinch.
    pub shrug_off: bool,
    pub no_sound: bool,
    pub bone_index: i8,
    pub inflicted_damage: f32,
}

/// Something the host reports back after a forced re-equip.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub enum HostNotification {
    WieldedItemChanged { agent: AgentId },
    HealthChanged {
        agent: AgentId,
        old_health: f32,
        new_health: f32,
    },
}

/// Everything the simulation needs from the host game.
pub trait BattleHost {
    /// The current encounter.
    fn mission(&self) -> MissionContext;

    /// The player-controlled agent, if one is on the field.
    fn main_agent(&self) -> Option<AgentId>;

    /// A fresh view of the agent; `None` once the host deleted it.
    fn agent(&self, id: AgentId) -> Option<AgentView>;

    fn weapon_in_slot(&self, agent: AgentId, slot: EquipmentIndex) -> Option<WeaponView>;

    /// Missiles currently in flight.
    fn missiles(&self) -> Vec<MissileView>;

    /// Attach a particle system. `None` when the host could not create it.
    fn attach_effect(&mut self, request: &EffectRequest) -> Option<EffectHandle>;

    fn detach_effect(&mut self, handle: EffectHandle);

    /// Apply a blow and return the damage actually dealt.
    fn register_blow(&mut self, blow: &Blow) -> f32;

    /// Drop the item in `slot` and pick it straight back up so newly attached
    /// particles render. Returns the notifications the host raised meanwhile.
    fn drop_and_reequip(&mut self, agent: AgentId, slot: EquipmentIndex) -> Vec<HostNotification>;

    /// Brackets a forced drop for other host-side logic.
    fn notify_drop_item(&mut self, agent: AgentId, locking: bool);
}
