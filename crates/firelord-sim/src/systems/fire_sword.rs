//! Weapon fire-effect state machine.
//!
//! Every human agent carries a [`WeaponFireRecord`]. Picking up a weapon
//! starts a short equip timer; when it runs out the weapon is lit, provided
//! the agent passes the melee eligibility rules. Any other wield change, or
//! death, puts the flames out.

use hecs::{Entity, World};
use tracing::{debug, info};

use firelord_core::agent::AgentView;
use firelord_core::components::{Tracked, WeaponFireRecord};
use firelord_core::constants::{BURNING_AGENT_PARTICLE, SPAWN_WIELD_DELAY_SECS, WIELD_DELAY_SECS};
use firelord_core::enums::TriggerKind;
use firelord_core::events::{keys, FireEvent, Message};
use firelord_core::timer::MissionTimer;
use firelord_core::types::AgentId;
use firelord_rules::eligibility::{is_allowed, rules_for, EligibilitySubject};
use firelord_rules::flame_layout::flame_elevations;

use crate::host::EffectRequest;
use crate::systems::{equip, TickContext};

/// Record for a newly spawned human. The weapon is lit after the spawn delay
/// unless this is the player with the fire sword toggled off.
pub fn spawn_record(
    agent: &AgentView,
    is_main: bool,
    player_fire_sword: bool,
    now: f64,
) -> WeaponFireRecord {
    WeaponFireRecord {
        last_wielded_weapon_empty: agent.main_hand.is_none(),
        equip_timer: (!is_main || player_fire_sword)
            .then(|| MissionTimer::start(now, SPAWN_WIELD_DELAY_SECS)),
        ..WeaponFireRecord::default()
    }
}

/// Advance the equip timers and light the weapons whose delay ran out.
pub fn run(world: &mut World, ctx: &mut TickContext<'_>) {
    let now = ctx.now();
    let mut due: Vec<(AgentId, Entity)> = Vec::new();

    for (entity, (tracked, record)) in world.query_mut::<(&Tracked, &mut WeaponFireRecord)>() {
        if tracked.removed {
            continue;
        }
        if ctx.is_main(tracked.agent) && !ctx.player_fire_sword {
            record.equip_timer = None;
            continue;
        }
        let expired = record
            .equip_timer
            .as_ref()
            .is_some_and(|timer| timer.is_expired(now));
        if expired {
            record.equip_timer = None;
            due.push((tracked.agent, entity));
        }
    }

    due.sort_unstable_by_key(|(agent, _)| *agent);
    for (agent, entity) in due {
        enable(world, ctx, entity, agent);
    }
}

/// Wield change reported by the host. Ignored while the drop lock is held.
pub fn on_wielded_item_changed(
    world: &mut World,
    ctx: &mut TickContext<'_>,
    entity: Entity,
    agent: AgentId,
) {
    if equip::is_locked(world, entity) {
        return;
    }
    let Some(view) = ctx.host.agent(agent) else {
        return;
    };
    let now_empty = view.main_hand.is_none();
    let arm_timer = !ctx.is_main(agent) || ctx.player_fire_sword;

    let Ok(last_empty) = world
        .get::<&WeaponFireRecord>(entity)
        .map(|record| record.last_wielded_weapon_empty)
    else {
        return;
    };

    if last_empty && !now_empty {
        if arm_timer {
            if let Ok(mut record) = world.get::<&mut WeaponFireRecord>(entity) {
                record.equip_timer = Some(MissionTimer::start(ctx.now(), WIELD_DELAY_SECS));
            }
        }
    } else {
        disable(world, ctx, entity);
    }

    if let Ok(mut record) = world.get::<&mut WeaponFireRecord>(entity) {
        record.last_wielded_weapon_empty = now_empty;
    }
}

pub fn on_health_changed(
    world: &mut World,
    ctx: &mut TickContext<'_>,
    entity: Entity,
    new_health: f32,
) {
    if new_health > 0.0 {
        return;
    }
    if let Ok(mut record) = world.get::<&mut WeaponFireRecord>(entity) {
        record.equip_timer = None;
    }
    disable(world, ctx, entity);
}

/// Flip the player's fire sword and apply the new setting to the main agent
/// at once. Returns the new setting; without a main agent nothing changes.
pub fn toggle_player(world: &mut World, ctx: &mut TickContext<'_>) -> bool {
    let Some(main) = ctx.main_agent else {
        return ctx.player_fire_sword;
    };
    ctx.player_fire_sword = !ctx.player_fire_sword;
    let enabled = ctx.player_fire_sword;
    info!(enabled, "player fire sword toggled");

    let key = if enabled {
        keys::FIRE_SWORD_ENABLED
    } else {
        keys::FIRE_SWORD_DISABLED
    };
    ctx.messages.push(Message::new(key, ctx.time.tick));

    let Some(&entity) = ctx.index.get(&main) else {
        return enabled;
    };
    match world.get::<&mut WeaponFireRecord>(entity) {
        Ok(mut record) => record.equip_timer = None,
        Err(_) => return enabled,
    }
    if enabled {
        enable(world, ctx, entity, main);
    } else {
        disable(world, ctx, entity);
    }
    enabled
}

/// Light the agent's wielded weapon.
///
/// Starts from a clean slate, then gives up without side effects when the
/// agent is dead or unarmed, is ineligible, has no skeleton, or the weapon
/// has nowhere to put a flame.
pub fn enable(world: &mut World, ctx: &mut TickContext<'_>, entity: Entity, agent: AgentId) {
    disable(world, ctx, entity);

    let Some(view) = ctx.host.agent(agent) else {
        return;
    };
    if !view.is_active || view.health <= 0.0 {
        return;
    }
    let Some(weapon) = view.main_hand.as_ref() else {
        return;
    };
    let is_main = ctx.is_main(agent);
    let rules = rules_for(ctx.config, TriggerKind::Melee);
    if !is_allowed(&rules, &EligibilitySubject::melee(&view, is_main)) {
        return;
    }
    let Some(skeleton) = view.skeleton else {
        return;
    };

    let mut requests: Vec<EffectRequest> = flame_elevations(weapon.class, weapon.length)
        .into_iter()
        .map(|elevation| {
            EffectRequest::on_bone(
                BURNING_AGENT_PARTICLE,
                weapon.entity,
                skeleton.main_hand_item_bone,
            )
            .elevated(elevation)
        })
        .collect();
    if is_main && ctx.config.fire_sword.ignite_player_body {
        requests.extend(
            (0..skeleton.bone_count)
                .filter_map(|bone| i8::try_from(bone).ok())
                .map(|bone| EffectRequest::on_bone(BURNING_AGENT_PARTICLE, weapon.entity, bone)),
        );
    }

    let visuals: Vec<_> = requests
        .iter()
        .filter_map(|request| ctx.host.attach_effect(request))
        .collect();
    if visuals.is_empty() {
        debug!(%agent, class = ?weapon.class, "weapon has no flame points");
        return;
    }

    let Ok(mut record) = world.get::<&mut WeaponFireRecord>(entity) else {
        for handle in visuals {
            ctx.host.detach_effect(handle);
        }
        return;
    };
    debug!(%agent, item = %weapon.item_id, particles = visuals.len(), "fire sword enabled");
    record.enabled = true;
    record.weapon_entity = Some(weapon.entity);
    record.visuals = visuals;
    drop(record);

    ctx.events.push(FireEvent::FireSwordEnabled { agent });
    equip::forced_reequip(world, ctx, entity, agent, weapon.slot);
}

/// Put the flames out and release every particle. Idempotent.
pub fn disable(world: &mut World, ctx: &mut TickContext<'_>, entity: Entity) {
    let Ok(mut record) = world.get::<&mut WeaponFireRecord>(entity) else {
        return;
    };
    let was_enabled = record.enabled;
    record.enabled = false;
    record.weapon_entity = None;
    let visuals = std::mem::take(&mut record.visuals);
    drop(record);

    for handle in visuals {
        ctx.host.detach_effect(handle);
    }
    if was_enabled {
        if let Ok(tracked) = world.get::<&Tracked>(entity) {
            debug!(agent = %tracked.agent, "fire sword disabled");
            ctx.events.push(FireEvent::FireSwordDisabled {
                agent: tracked.agent,
            });
        }
    }
}
