//! Ranged ignition trigger.
//!
//! Shots that pass the launch gates get a burning particle on their missile
//! and are tracked until they hit something or leave the host's missile list.
//! A tracked missile that hits an opposing human deposits heat on it.

use std::collections::BTreeSet;

use rand_chacha::ChaCha8Rng;
use tracing::{debug, info, trace};

use firelord_core::constants::BURNING_AGENT_PARTICLE;
use firelord_core::enums::{TriggerKind, WeaponClass};
use firelord_core::events::{keys, FireEvent, Message};
use firelord_core::types::{AgentId, EffectHandle, EquipmentIndex, MissileId};
use firelord_rules::eligibility::{rules_for, EligibilitySubject};
use firelord_rules::ranged::evaluate_launch;

use crate::host::EffectRequest;
use crate::systems::TickContext;

/// A burning missile in flight.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrackedMissile {
    pub missile: MissileId,
    pub shooter: AgentId,
    pub effect: Option<EffectHandle>,
}

/// Per-encounter state of the ranged trigger.
#[derive(Debug, Clone, Default)]
pub struct FireArrowState {
    /// Set on the first battle tick with a main agent.
    pub initialized: bool,
    pub enabled: bool,
    pub tracked: Vec<TrackedMissile>,
}

impl FireArrowState {
    pub fn is_tracked(&self, missile: MissileId) -> bool {
        self.tracked.iter().any(|t| t.missile == missile)
    }
}

/// Decide whether fire arrows are on for this encounter: inside the allowed
/// hours, and in a siege when the config restricts them to sieges.
pub fn initialize(state: &mut FireArrowState, ctx: &mut TickContext<'_>) {
    if state.initialized || ctx.main_agent.is_none() {
        return;
    }
    state.initialized = true;

    let mission = ctx.host.mission();
    let config = &ctx.config.fire_arrow;
    state.enabled = config.allows_time_of_day(mission.time_of_day)
        && (!config.only_in_siege || mission.is_siege_battle);
    info!(
        enabled = state.enabled,
        time_of_day = mission.time_of_day,
        siege = mission.is_siege_battle,
        "fire arrows initialized"
    );
}

/// Flip fire arrows for the rest of the encounter.
pub fn toggle(state: &mut FireArrowState, ctx: &mut TickContext<'_>) {
    state.enabled = !state.enabled;
    info!(enabled = state.enabled, "fire arrows toggled");
    let key = if state.enabled {
        keys::FIRE_ARROW_ENABLED
    } else {
        keys::FIRE_ARROW_DISABLED
    };
    ctx.messages.push(Message::new(key, ctx.time.tick));
}

/// Evaluate a shot and, when admitted, set alight the first missile in the
/// host's list that belongs to the shooter and is not tracked yet.
pub fn on_shoot(
    state: &mut FireArrowState,
    ctx: &mut TickContext<'_>,
    rng: &mut ChaCha8Rng,
    shooter: AgentId,
    slot: EquipmentIndex,
) {
    if !state.enabled {
        return;
    }
    let Some(view) = ctx.host.agent(shooter) else {
        return;
    };
    let class = ctx
        .host
        .weapon_in_slot(shooter, slot)
        .map_or(WeaponClass::Undefined, |weapon| weapon.class);

    let rules = rules_for(ctx.config, TriggerKind::Ranged);
    let subject = EligibilitySubject::ranged(&view, ctx.is_main(shooter));
    let verdict = evaluate_launch(&ctx.config.fire_arrow, &rules, class, &subject, rng);
    if !verdict.is_admitted() {
        trace!(%shooter, ?class, "shot not incendiary");
        return;
    }

    let candidate = ctx.host.missiles().into_iter().find(|missile| {
        missile.shooter == shooter && missile.entity.is_some() && !state.is_tracked(missile.id)
    });
    let Some(missile) = candidate else {
        return;
    };
    let Some(entity) = missile.entity else {
        return;
    };

    let effect = ctx
        .host
        .attach_effect(&EffectRequest::on_entity(BURNING_AGENT_PARTICLE, entity));
    state.tracked.push(TrackedMissile {
        missile: missile.id,
        shooter,
        effect,
    });
    debug!(%shooter, missile = missile.id.0, ?verdict, "fire arrow launched");
    ctx.events.push(FireEvent::FireArrowLaunched {
        shooter,
        missile: missile.id,
    });
}

/// A missile from `attacker` collided. Every tracked missile of that shooter
/// is put out; returns how many heat deposits the victim should receive.
pub fn on_collision(
    state: &mut FireArrowState,
    ctx: &mut TickContext<'_>,
    attacker: AgentId,
    victim: Option<AgentId>,
) -> usize {
    if !state.enabled {
        return 0;
    }

    let (landed, in_flight): (Vec<_>, Vec<_>) = state
        .tracked
        .drain(..)
        .partition(|tracked| tracked.shooter == attacker);
    state.tracked = in_flight;
    for tracked in &landed {
        if let Some(handle) = tracked.effect {
            ctx.host.detach_effect(handle);
        }
    }

    if landed.is_empty() || !ctx.config.fire_arrow.ignite_target {
        return 0;
    }
    let Some(victim) = victim.and_then(|id| ctx.host.agent(id)) else {
        return 0;
    };
    if !victim.is_human {
        return 0;
    }
    if !ctx.config.ignition.friendly_fire {
        let Some(shooter) = ctx.host.agent(attacker) else {
            return 0;
        };
        if !shooter.is_enemy_of(&victim) {
            return 0;
        }
    }
    landed.len()
}

/// Put out and forget tracked missiles the host no longer reports in flight.
pub fn prune(state: &mut FireArrowState, ctx: &mut TickContext<'_>) {
    let live: BTreeSet<MissileId> = ctx.host.missiles().iter().map(|m| m.id).collect();
    let before = state.tracked.len();
    let mut stale = Vec::new();
    state.tracked.retain(|tracked| {
        let keep = live.contains(&tracked.missile);
        if !keep {
            stale.push(tracked.effect);
        }
        keep
    });
    for handle in stale.into_iter().flatten() {
        ctx.host.detach_effect(handle);
    }
    if state.tracked.len() != before {
        trace!(pruned = before - state.tracked.len(), "stale fire arrows dropped");
    }
}

/// Release every tracked missile, for encounter teardown.
pub fn release_all(state: &mut FireArrowState, ctx: &mut TickContext<'_>) {
    for tracked in state.tracked.drain(..) {
        if let Some(handle) = tracked.effect {
            ctx.host.detach_effect(handle);
        }
    }
}
