//! Cleanup system: drops records of agents that died or left the scene.

use std::collections::HashMap;

use hecs::{Entity, World};
use tracing::debug;

use firelord_core::components::{FireRecord, Tracked, WeaponFireRecord};
use firelord_core::events::FireEvent;
use firelord_core::types::{AgentId, EffectHandle};

use crate::host::BattleHost;

/// Despawn agents the host removed, drop the fire records of agents that
/// are no longer active and put their weapons out. Every particle those
/// records held is detached.
pub fn run(
    world: &mut World,
    index: &mut HashMap<AgentId, Entity>,
    host: &mut dyn BattleHost,
    despawn_buffer: &mut Vec<Entity>,
    events: &mut Vec<FireEvent>,
) {
    despawn_buffer.clear();
    let mut inactive: Vec<(AgentId, Entity)> = Vec::new();

    for (entity, tracked) in world.query_mut::<&Tracked>() {
        if tracked.removed {
            despawn_buffer.push(entity);
            continue;
        }
        match host.agent(tracked.agent) {
            None => despawn_buffer.push(entity),
            Some(view) if !view.is_active => inactive.push((tracked.agent, entity)),
            Some(_) => {}
        }
    }

    // Inactive agents keep their entity until the host removes them, but
    // their fire state goes now.
    for (agent, entity) in inactive {
        if let Ok(mut record) = world.remove_one::<FireRecord>(entity) {
            release(host, record.visuals.drain(..));
        }
        if let Ok(mut record) = world.get::<&mut WeaponFireRecord>(entity) {
            record.equip_timer = None;
            record.weapon_entity = None;
            release(host, record.visuals.drain(..));
            if std::mem::take(&mut record.enabled) {
                debug!(%agent, "fire sword of inactive agent put out");
                events.push(FireEvent::FireSwordDisabled { agent });
            }
        }
    }

    for entity in despawn_buffer.drain(..) {
        if let Ok(mut record) = world.remove_one::<FireRecord>(entity) {
            release(host, record.visuals.drain(..));
        }
        if let Ok(mut record) = world.remove_one::<WeaponFireRecord>(entity) {
            release(host, record.visuals.drain(..));
        }
        if let Ok(tracked) = world.remove_one::<Tracked>(entity) {
            debug!(agent = %tracked.agent, "agent record removed");
            index.remove(&tracked.agent);
        }
        let _ = world.despawn(entity);
    }
}

/// Release everything held for every agent, for encounter teardown.
pub fn release_all(world: &mut World, host: &mut dyn BattleHost) {
    for (_entity, record) in world.query_mut::<&mut FireRecord>() {
        release(host, record.visuals.drain(..));
    }
    for (_entity, record) in world.query_mut::<&mut WeaponFireRecord>() {
        release(host, record.visuals.drain(..));
    }
    world.clear();
}

fn release(host: &mut dyn BattleHost, handles: impl Iterator<Item = EffectHandle>) {
    for handle in handles {
        host.detach_effect(handle);
    }
}
