//! Read-only views of host state.
//!
//! The host owns agents, weapons and missiles. Each query returns a fresh
//! view; the simulation never keeps one across ticks.

use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::types::{AgentId, EquipmentIndex, GameEntityId, MissileId};

/// The encounter the agents are fighting in.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct MissionContext {
    pub is_field_battle: bool,
    pub is_siege_battle: bool,
    /// Friendly missions (towns, villages) never run the fire logic
    /// unless the mode itself is combat-like.
    pub is_friendly_mission: bool,
    pub mode: MissionMode,
    /// Scene time of day in hours, `[0, 24)`.
    pub time_of_day: f32,
}

impl MissionContext {
    /// An open-field battle at noon.
    pub fn field_battle() -> Self {
        Self {
            is_field_battle: true,
            is_siege_battle: false,
            is_friendly_mission: false,
            mode: MissionMode::Battle,
            time_of_day: 12.0,
        }
    }

    /// A siege assault at noon.
    pub fn siege() -> Self {
        Self {
            is_siege_battle: true,
            is_field_battle: false,
            ..Self::field_battle()
        }
    }

    /// A peaceful town visit.
    pub fn town_visit() -> Self {
        Self {
            is_field_battle: false,
            is_siege_battle: false,
            is_friendly_mission: true,
            mode: MissionMode::StartUp,
            time_of_day: 12.0,
        }
    }

    /// Whether this is a combat-like encounter the fire logic runs in.
    pub fn is_in_battle(&self) -> bool {
        self.is_field_battle
            || self.is_siege_battle
            || !self.is_friendly_mission
            || matches!(
                self.mode,
                MissionMode::Duel | MissionMode::Stealth | MissionMode::Tournament
            )
    }
}

/// Team membership of an agent, relative to the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamView {
    pub side: BattleSide,
    pub is_player_team: bool,
    pub is_player_ally: bool,
}

impl TeamView {
    pub fn player_team(side: BattleSide) -> Self {
        Self {
            side,
            is_player_team: true,
            is_player_ally: true,
        }
    }

    pub fn allied(side: BattleSide) -> Self {
        Self {
            side,
            is_player_team: false,
            is_player_ally: true,
        }
    }

    pub fn hostile(side: BattleSide) -> Self {
        Self {
            side,
            is_player_team: false,
            is_player_ally: false,
        }
    }
}

/// A weapon in one of an agent's equipment slots.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeaponView {
    pub slot: EquipmentIndex,
    /// Scene entity of the weapon while it is held.
    pub entity: GameEntityId,
    /// Item string id, as matched by item whitelists.
    pub item_id: String,
    pub class: WeaponClass,
    /// Physical length in host units (centimeters).
    pub length: f32,
    /// Item id of the ammunition loaded into this weapon, if any.
    pub ammo_item_id: Option<String>,
}

impl WeaponView {
    pub fn new(
        slot: EquipmentIndex,
        entity: GameEntityId,
        item_id: impl Into<String>,
        class: WeaponClass,
        length: f32,
    ) -> Self {
        Self {
            slot,
            entity,
            item_id: item_id.into(),
            class,
            length,
            ammo_item_id: None,
        }
    }

    pub fn with_ammo(mut self, ammo_item_id: impl Into<String>) -> Self {
        self.ammo_item_id = Some(ammo_item_id.into());
        self
    }
}

/// Skeleton of an agent's visuals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SkeletonView {
    pub bone_count: u8,
    /// Bone the main-hand item is parented to.
    pub main_hand_item_bone: i8,
    /// Bone burning blows are registered against.
    pub head_bone: i8,
}

impl Default for SkeletonView {
    fn default() -> Self {
        Self {
            bone_count: 30,
            main_hand_item_bone: 27,
            head_bone: 13,
        }
    }
}

/// A snapshot of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentView {
    pub id: AgentId,
    /// Character (troop) string id, as matched by troop whitelists.
    pub character_id: String,
    /// False once the agent died or left the scene.
    pub is_active: bool,
    /// Mounts and other creatures are not human.
    pub is_human: bool,
    pub is_hero: bool,
    pub health: f32,
    pub team: Option<TeamView>,
    /// Weapon wielded in the main hand; `None` when empty-handed.
    pub main_hand: Option<WeaponView>,
    /// `None` while the agent has no visuals loaded.
    pub skeleton: Option<SkeletonView>,
}

impl AgentView {
    /// An active, empty-handed human soldier with full health.
    pub fn human(id: AgentId, character_id: impl Into<String>) -> Self {
        Self {
            id,
            character_id: character_id.into(),
            is_active: true,
            is_human: true,
            is_hero: false,
            health: 100.0,
            team: None,
            main_hand: None,
            skeleton: Some(SkeletonView::default()),
        }
    }

    pub fn hero(mut self) -> Self {
        self.is_hero = true;
        self
    }

    pub fn on_team(mut self, team: TeamView) -> Self {
        self.team = Some(team);
        self
    }

    pub fn wielding(mut self, weapon: WeaponView) -> Self {
        self.main_hand = Some(weapon);
        self
    }

    pub fn with_health(mut self, health: f32) -> Self {
        self.health = health;
        self
    }

    pub fn is_player_ally(&self) -> bool {
        self.team.is_some_and(|t| t.is_player_ally)
    }

    pub fn is_player_team(&self) -> bool {
        self.team.is_some_and(|t| t.is_player_team)
    }

    /// Both agents are on teams and those teams fight on opposite sides.
    pub fn is_enemy_of(&self, other: &AgentView) -> bool {
        match (self.team, other.team) {
            (Some(a), Some(b)) => a.side != b.side,
            _ => false,
        }
    }
}

/// A missile currently in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct MissileView {
    pub id: MissileId,
    pub shooter: AgentId,
    /// Scene entity, absent for missiles without a visible body.
    pub entity: Option<GameEntityId>,
}
