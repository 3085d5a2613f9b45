//! Forced drop and re-pickup of a wielded item, under the agent's drop lock.

use hecs::{Entity, World};
use tracing::trace;

use firelord_core::components::DropLock;
use firelord_core::events::FireEvent;
use firelord_core::types::{AgentId, EquipmentIndex};

use crate::host::HostNotification;
use crate::systems::{fire_sword, TickContext};

/// Make the host drop and re-equip `slot` so freshly attached particles
/// render. Notifications raised by the host meanwhile are handled while the
/// lock is held, so the wield changes it causes are not mistaken for the
/// agent's own.
pub fn forced_reequip(
    world: &mut World,
    ctx: &mut TickContext<'_>,
    entity: Entity,
    agent: AgentId,
    slot: EquipmentIndex,
) {
    set_lock(world, ctx, entity, agent, true);

    let notifications = ctx.host.drop_and_reequip(agent, slot);
    trace!(%agent, count = notifications.len(), "forced re-equip");
    for notification in notifications {
        dispatch(world, ctx, notification);
    }

    set_lock(world, ctx, entity, agent, false);
}

/// Whether the agent is in the middle of a forced re-equip.
pub fn is_locked(world: &World, entity: Entity) -> bool {
    world.get::<&DropLock>(entity).is_ok_and(|lock| lock.held)
}

fn set_lock(
    world: &mut World,
    ctx: &mut TickContext<'_>,
    entity: Entity,
    agent: AgentId,
    locking: bool,
) {
    if let Ok(mut lock) = world.get::<&mut DropLock>(entity) {
        lock.held = locking;
    }
    ctx.host.notify_drop_item(agent, locking);
    ctx.events.push(FireEvent::AgentDropItem { agent, locking });
}

/// Route one host notification to the machine that listens for it.
pub fn dispatch(world: &mut World, ctx: &mut TickContext<'_>, notification: HostNotification) {
    match notification {
        HostNotification::WieldedItemChanged { agent } => {
            if let Some(&entity) = ctx.index.get(&agent) {
                fire_sword::on_wielded_item_changed(world, ctx, entity, agent);
            }
        }
        HostNotification::HealthChanged {
            agent, new_health, ..
        } => {
            if let Some(&entity) = ctx.index.get(&agent) {
                fire_sword::on_health_changed(world, ctx, entity, new_health);
            }
        }
    }
}
