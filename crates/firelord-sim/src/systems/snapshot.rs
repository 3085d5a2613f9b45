//! Snapshot system: reads the ECS world and builds a FireStateSnapshot.
//!
//! Read-only: it never modifies the world.

use hecs::World;

use firelord_core::components::{FireRecord, Tracked, WeaponFireRecord};
use firelord_core::events::{FireEvent, Message};
use firelord_core::state::{AgentFireView, FireStateSnapshot};
use firelord_core::types::SimTime;

/// Encounter-level flags copied into the snapshot.
#[derive(Debug, Clone, Copy, Default)]
pub struct EncounterFlags {
    pub in_battle: bool,
    pub fire_arrows_enabled: bool,
    pub player_fire_sword_enabled: bool,
    pub tracked_missiles: usize,
}

pub fn build_snapshot(
    world: &World,
    time: &SimTime,
    flags: EncounterFlags,
    events: Vec<FireEvent>,
    messages: Vec<Message>,
) -> FireStateSnapshot {
    FireStateSnapshot {
        time: *time,
        in_battle: flags.in_battle,
        fire_arrows_enabled: flags.fire_arrows_enabled,
        player_fire_sword_enabled: flags.player_fire_sword_enabled,
        agents: build_agents(world, time.elapsed_secs),
        tracked_missiles: flags.tracked_missiles,
        events,
        messages,
    }
}

/// One view per tracked agent, ordered by agent id.
fn build_agents(world: &World, now: f64) -> Vec<AgentFireView> {
    let mut agents: Vec<AgentFireView> = world
        .query::<(&Tracked, Option<&FireRecord>, Option<&WeaponFireRecord>)>()
        .iter()
        .map(|(_, (tracked, fire, weapon))| {
            let burning_remaining_secs = fire
                .filter(|record| record.is_burning)
                .and_then(|record| record.burning_timer)
                .map_or(0.0, |timer| timer.remaining(now));
            AgentFireView {
                agent: tracked.agent,
                fire_bar: fire.map_or(0.0, |record| record.fire_bar),
                is_burning: fire.is_some_and(|record| record.is_burning),
                burning_remaining_secs,
                weapon_fire_enabled: weapon.is_some_and(|record| record.enabled),
                visual_count: fire.map_or(0, |record| record.visuals.len())
                    + weapon.map_or(0, |record| record.visuals.len()),
            }
        })
        .collect();
    agents.sort_by_key(|view| view.agent);
    agents
}
