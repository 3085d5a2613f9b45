//! Fire-bar and burning state machine.
//!
//! Heat deposited by the triggers accumulates in each agent's fire bar and
//! drains over time. A full bar ignites the agent: it burns for the configured
//! duration, taking a non-lethal blow every second, then the bar resets.

use std::collections::HashMap;

use hecs::{Entity, World};
use tracing::{debug, trace};

use firelord_core::agent::AgentView;
use firelord_core::components::{DropLock, FireRecord, Tracked};
use firelord_core::config::IgnitionConfig;
use firelord_core::constants::*;
use firelord_core::enums::DamageType;
use firelord_core::events::{keys, FireEvent, Message};
use firelord_core::timer::MissionTimer;
use firelord_core::types::AgentId;

use crate::host::{Blow, EffectRequest};
use crate::systems::{equip, TickContext};

/// Find the agent's entity, spawning an empty one on first sight.
pub fn ensure_entity(
    world: &mut World,
    index: &mut HashMap<AgentId, Entity>,
    agent: AgentId,
) -> Entity {
    *index
        .entry(agent)
        .or_insert_with(|| world.spawn((Tracked::new(agent), DropLock::default())))
}

/// Deposit heat on `victim`. A burning victim is left untouched; otherwise
/// the bar grows by `amount`, capped at `bar_max`, and `attacker` becomes the
/// agent credited for the burn.
pub fn increase_fire_bar(
    world: &mut World,
    index: &mut HashMap<AgentId, Entity>,
    config: &IgnitionConfig,
    attacker: Option<AgentId>,
    victim: AgentId,
    amount: f32,
) {
    let amount = amount.max(0.0);
    let entity = ensure_entity(world, index, victim);

    if let Ok(mut record) = world.get::<&mut FireRecord>(entity) {
        if record.is_burning {
            return;
        }
        record.fire_bar = (record.fire_bar + amount).min(config.bar_max);
        record.attacker = attacker;
        trace!(%victim, fire_bar = record.fire_bar, "heat deposited");
        return;
    }

    let record = FireRecord::with_heat(amount.min(config.bar_max), attacker);
    // The entity was just looked up or spawned; insertion cannot miss.
    let _ = world.insert_one(entity, record);
}

/// Advance every fire record by one tick.
///
/// Agents the host no longer reports as active are skipped here; the cleanup
/// pass that follows drops their records.
pub fn run(world: &mut World, ctx: &mut TickContext<'_>, dt: f64) {
    let mut agents: Vec<(AgentId, Entity)> = world
        .query_mut::<(&Tracked, &FireRecord)>()
        .into_iter()
        .filter(|(_, (tracked, _))| !tracked.removed)
        .map(|(entity, (tracked, _))| (tracked.agent, entity))
        .collect();
    agents.sort_unstable_by_key(|(agent, _)| *agent);

    for (agent, entity) in agents {
        let Some(view) = ctx.host.agent(agent).filter(|view| view.is_active) else {
            continue;
        };
        let Ok(mut record) = world.get::<&FireRecord>(entity).map(|r| (*r).clone()) else {
            continue;
        };

        if record.is_burning {
            burn(ctx, &view, &mut record);
        } else if record.fire_bar >= ctx.config.ignition.bar_max {
            ignite(world, ctx, entity, &view, &mut record);
        } else {
            let drain = dt as f32 * ctx.config.ignition.drop_per_second;
            let drained = (record.fire_bar - drain).max(0.0);
            trace!(%agent, from = record.fire_bar, to = drained, "fire bar decay");
            record.fire_bar = drained;
        }

        if let Ok(mut slot) = world.get::<&mut FireRecord>(entity) {
            *slot = record;
        }
    }
}

/// One tick of a burning agent: the periodic blow, then the burn timer.
fn burn(ctx: &mut TickContext<'_>, victim: &AgentView, record: &mut FireRecord) {
    let now = ctx.now();

    let blow_due = ctx.config.ignition.deal_damage
        && record
            .damage_timer
            .as_mut()
            .is_some_and(|timer| timer.check(now, true));
    if blow_due {
        apply_burning_damage(ctx, victim, record.attacker);
    }

    let expired = record
        .burning_timer
        .as_mut()
        .is_some_and(|timer| timer.check(now, false));
    if expired {
        extinguish(ctx, victim.id, record);
    }
}

/// Register one burning blow, never taking the victim below the health floor.
fn apply_burning_damage(ctx: &mut TickContext<'_>, victim: &AgentView, attacker: Option<AgentId>) {
    let damage = ctx
        .config
        .ignition
        .damage_per_second
        .min(victim.health - NON_LETHAL_HEALTH_FLOOR);
    if damage <= 0.0 {
        return;
    }

    let blow = Blow {
        attacker,
        victim: victim.id,
        damage_type: DamageType::Blunt,
        shrug_off: true,
        no_sound: true,
        bone_index: victim.skeleton.unwrap_or_default().head_bone,
        inflicted_damage: damage,
    };
    let dealt = ctx.host.register_blow(&blow);
    trace!(victim = %victim.id, dealt, "burning damage");

    ctx.events.push(FireEvent::BurningDamage {
        attacker,
        victim: victim.id,
        amount: dealt,
    });

    let tick = ctx.time.tick;
    if attacker.is_some_and(|a| ctx.is_main(a)) {
        ctx.messages
            .push(Message::new(keys::DELIVERED_BURNING_DAMAGE, tick).with_amount(dealt));
    } else if ctx.is_main(victim.id) {
        ctx.messages.push(
            Message::new(keys::RECEIVED_BURNING_DAMAGE, tick)
                .with_amount(dealt)
                .with_color(RECEIVED_DAMAGE_COLOR),
        );
    }
}

/// Set the agent alight.
///
/// The record is burning from here on even when no particles can be placed
/// (unarmed, or no visuals loaded).
fn ignite(
    world: &mut World,
    ctx: &mut TickContext<'_>,
    entity: Entity,
    view: &AgentView,
    record: &mut FireRecord,
) {
    let now = ctx.now();
    record.is_burning = true;
    record.burning_timer = Some(MissionTimer::start(now, ctx.config.ignition.duration_secs));
    record.damage_timer = Some(MissionTimer::start(now, BURNING_DAMAGE_INTERVAL_SECS));
    debug!(agent = %view.id, attacker = ?record.attacker, "agent ignited");
    ctx.events.push(FireEvent::Ignited { agent: view.id });

    let Some(weapon) = view.main_hand.as_ref() else {
        return;
    };
    let Some(skeleton) = view.skeleton else {
        return;
    };

    record.visuals = IGNITION_BONE_INDEXES
        .iter()
        .copied()
        .filter(|&bone| i16::from(bone) < i16::from(skeleton.bone_count))
        .filter_map(|bone| {
            ctx.host
                .attach_effect(&EffectRequest::on_bone(IGNITION_PARTICLE, weapon.entity, bone))
        })
        .collect();
    record.fire_entity = Some(weapon.entity);

    equip::forced_reequip(world, ctx, entity, view.id, weapon.slot);
}

/// End the burn: release the particles and empty the bar.
pub fn extinguish(ctx: &mut TickContext<'_>, agent: AgentId, record: &mut FireRecord) {
    release_visuals(ctx, record);
    record.fire_bar = 0.0;
    record.is_burning = false;
    record.burning_timer = None;
    record.damage_timer = None;
    debug!(%agent, "agent extinguished");
    ctx.events.push(FireEvent::Extinguished { agent });
}

/// Detach every ignition particle the record holds.
pub fn release_visuals(ctx: &mut TickContext<'_>, record: &mut FireRecord) {
    for handle in record.visuals.drain(..) {
        ctx.host.detach_effect(handle);
    }
    record.fire_entity = None;
}
