//! Fire state snapshot: the visible state handed back to the host each tick.

use serde::{Deserialize, Serialize};

use crate::events::{FireEvent, Message};
use crate::types::{AgentId, SimTime};

/// Complete simulation state after a tick.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FireStateSnapshot {
    pub time: SimTime,
    /// False when the encounter is not combat-like; nothing ran this tick.
    pub in_battle: bool,
    pub fire_arrows_enabled: bool,
    pub player_fire_sword_enabled: bool,
    /// One entry per tracked agent, ordered by agent id.
    pub agents: Vec<AgentFireView>,
    /// Fire arrows currently in flight.
    pub tracked_missiles: usize,
    pub events: Vec<FireEvent>,
    pub messages: Vec<Message>,
}

/// Fire state of one agent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AgentFireView {
    pub agent: AgentId,
    pub fire_bar: f32,
    pub is_burning: bool,
    /// Seconds until the burn ends (0 when not burning).
    pub burning_remaining_secs: f64,
    pub weapon_fire_enabled: bool,
    /// Effect handles held for this agent across both state machines.
    pub visual_count: usize,
}

impl FireStateSnapshot {
    pub fn agent(&self, id: AgentId) -> Option<&AgentFireView> {
        self.agents.iter().find(|a| a.agent == id)
    }
}
