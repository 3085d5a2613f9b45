//! Per-tick systems and the notification handlers behind the engine's entry
//! points.
//!
//! Systems are free functions over `&mut World`. They own no state; records
//! live in components and everything else is passed in a [`TickContext`].

pub mod cleanup;
pub mod equip;
pub mod fire_arrow;
pub mod fire_sword;
pub mod ignition;
pub mod snapshot;

use std::collections::HashMap;

use hecs::Entity;

use firelord_core::config::FireLordConfig;
use firelord_core::events::{FireEvent, Message};
use firelord_core::types::{AgentId, SimTime};

use crate::host::BattleHost;

/// What a state-machine step may read or mutate outside the ECS world.
pub struct TickContext<'a> {
    pub host: &'a mut dyn BattleHost,
    pub config: &'a FireLordConfig,
    pub index: &'a HashMap<AgentId, Entity>,
    pub time: SimTime,
    pub main_agent: Option<AgentId>,
    /// Per-encounter default of the player's fire sword.
    pub player_fire_sword: bool,
    pub events: &'a mut Vec<FireEvent>,
    pub messages: &'a mut Vec<Message>,
}

impl TickContext<'_> {
    pub fn now(&self) -> f64 {
        self.time.elapsed_secs
    }

    pub fn is_main(&self, agent: AgentId) -> bool {
        self.main_agent == Some(agent)
    }
}
