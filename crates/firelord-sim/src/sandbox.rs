//! In-memory battle host.
//!
//! Stands in for the game in tests and in the harness: agents, equipment and
//! missiles are plain maps, attached effects are counted, and every blow,
//! forced re-equip and drop notice is recorded for inspection.

use std::collections::BTreeMap;

use firelord_core::agent::{AgentView, MissileView, MissionContext, WeaponView};
use firelord_core::enums::WeaponClass;
use firelord_core::types::{AgentId, EffectHandle, EquipmentIndex, GameEntityId, MissileId};

use crate::host::{BattleHost, Blow, EffectRequest, HostNotification};

/// Effects attached by the simulation that are still alive.
#[derive(Debug, Clone, PartialEq)]
pub struct ActiveEffect {
    pub particle: &'static str,
    pub entity: GameEntityId,
    pub bone: Option<i8>,
}

#[derive(Debug, Clone)]
struct SandboxAgent {
    view: AgentView,
    equipment: BTreeMap<EquipmentIndex, WeaponView>,
}

#[derive(Debug, Clone)]
pub struct SandboxHost {
    pub mission: MissionContext,
    main_agent: Option<AgentId>,
    agents: BTreeMap<AgentId, SandboxAgent>,
    missiles: Vec<MissileView>,
    effects: BTreeMap<EffectHandle, ActiveEffect>,
    next_effect: u64,
    next_entity: u64,
    next_missile: u32,
    /// Every blow registered, in order.
    pub blows: Vec<Blow>,
    /// Every forced re-equip, in order.
    pub reequips: Vec<(AgentId, EquipmentIndex)>,
    /// Every drop notice, in order.
    pub drop_notices: Vec<(AgentId, bool)>,
}

impl SandboxHost {
    pub fn new(mission: MissionContext) -> Self {
        Self {
            mission,
            main_agent: None,
            agents: BTreeMap::new(),
            missiles: Vec::new(),
            effects: BTreeMap::new(),
            next_effect: 1,
            next_entity: 1000,
            next_missile: 1,
            blows: Vec::new(),
            reequips: Vec::new(),
            drop_notices: Vec::new(),
        }
    }

    /// Put an agent on the field. Its main-hand weapon, if any, also goes into
    /// its equipment.
    pub fn spawn(&mut self, view: AgentView) -> AgentId {
        let id = view.id;
        let mut equipment = BTreeMap::new();
        if let Some(weapon) = &view.main_hand {
            equipment.insert(weapon.slot, weapon.clone());
        }
        self.agents.insert(id, SandboxAgent { view, equipment });
        id
    }

    /// Put the player's agent on the field.
    pub fn spawn_main(&mut self, view: AgentView) -> AgentId {
        let id = self.spawn(view);
        self.main_agent = Some(id);
        id
    }

    /// Give an agent a weapon in the first free slot and wield it. Returns
    /// the slot.
    pub fn arm(
        &mut self,
        agent: AgentId,
        item_id: &str,
        class: WeaponClass,
        length: f32,
    ) -> Option<EquipmentIndex> {
        let entity = self.new_entity();
        let entry = self.agents.get_mut(&agent)?;
        let slot = (0..=u8::MAX)
            .map(EquipmentIndex)
            .find(|slot| !entry.equipment.contains_key(slot))?;
        let weapon = WeaponView::new(slot, entity, item_id, class, length);
        entry.equipment.insert(slot, weapon.clone());
        entry.view.main_hand = Some(weapon);
        Some(slot)
    }

    /// A fresh scene entity id. Ids below 1000 are left to hand-built views.
    pub fn new_entity(&mut self) -> GameEntityId {
        let id = GameEntityId(self.next_entity);
        self.next_entity += 1;
        id
    }

    /// Wield the weapon in `slot`, or nothing.
    pub fn wield(&mut self, agent: AgentId, slot: Option<EquipmentIndex>) {
        if let Some(entry) = self.agents.get_mut(&agent) {
            entry.view.main_hand = slot.and_then(|s| entry.equipment.get(&s).cloned());
        }
    }

    /// Set health and return the previous value.
    pub fn set_health(&mut self, agent: AgentId, health: f32) -> Option<f32> {
        let entry = self.agents.get_mut(&agent)?;
        let old = entry.view.health;
        entry.view.health = health;
        Some(old)
    }

    /// The agent dies but stays in the scene.
    pub fn kill(&mut self, agent: AgentId) {
        if let Some(entry) = self.agents.get_mut(&agent) {
            entry.view.health = 0.0;
            entry.view.is_active = false;
        }
    }

    /// The agent leaves the scene for good.
    pub fn remove(&mut self, agent: AgentId) {
        self.agents.remove(&agent);
        if self.main_agent == Some(agent) {
            self.main_agent = None;
        }
    }

    /// Release a missile from `shooter`. Invisible missiles have no entity.
    pub fn launch(&mut self, shooter: AgentId, visible: bool) -> MissileId {
        let id = MissileId(self.next_missile);
        self.next_missile += 1;
        let entity = visible.then(|| self.new_entity());
        self.missiles.push(MissileView {
            id,
            shooter,
            entity,
        });
        id
    }

    /// The missile stops flying.
    pub fn land(&mut self, missile: MissileId) {
        self.missiles.retain(|m| m.id != missile);
    }

    pub fn health(&self, agent: AgentId) -> Option<f32> {
        self.agents.get(&agent).map(|entry| entry.view.health)
    }

    pub fn effect_count(&self) -> usize {
        self.effects.len()
    }

    pub fn effects_on(&self, entity: GameEntityId) -> usize {
        self.effects.values().filter(|e| e.entity == entity).count()
    }

    pub fn effects_named(&self, particle: &str) -> usize {
        self.effects.values().filter(|e| e.particle == particle).count()
    }

    pub fn agent_ids(&self) -> Vec<AgentId> {
        self.agents.keys().copied().collect()
    }

    pub fn missiles_in_flight(&self) -> &[MissileView] {
        &self.missiles
    }
}

impl BattleHost for SandboxHost {
    fn mission(&self) -> MissionContext {
        self.mission
    }

    fn main_agent(&self) -> Option<AgentId> {
        self.main_agent
    }

    fn agent(&self, id: AgentId) -> Option<AgentView> {
        self.agents.get(&id).map(|entry| entry.view.clone())
    }

    fn weapon_in_slot(&self, agent: AgentId, slot: EquipmentIndex) -> Option<WeaponView> {
        self.agents.get(&agent)?.equipment.get(&slot).cloned()
    }

    fn missiles(&self) -> Vec<MissileView> {
        self.missiles.clone()
    }

    fn attach_effect(&mut self, request: &EffectRequest) -> Option<EffectHandle> {
        let handle = EffectHandle(self.next_effect);
        self.next_effect += 1;
        self.effects.insert(
            handle,
            ActiveEffect {
                particle: request.particle,
                entity: request.entity,
                bone: request.bone,
            },
        );
        Some(handle)
    }

    fn detach_effect(&mut self, handle: EffectHandle) {
        self.effects.remove(&handle);
    }

    fn register_blow(&mut self, blow: &Blow) -> f32 {
        let Some(entry) = self.agents.get_mut(&blow.victim) else {
            return 0.0;
        };
        let dealt = blow.inflicted_damage.min(entry.view.health).max(0.0);
        entry.view.health -= dealt;
        self.blows.push(blow.clone());
        dealt
    }

    /// The weapon hits the ground and comes straight back: two wield changes.
    fn drop_and_reequip(&mut self, agent: AgentId, slot: EquipmentIndex) -> Vec<HostNotification> {
        self.reequips.push((agent, slot));
        let Some(entry) = self.agents.get_mut(&agent) else {
            return Vec::new();
        };
        entry.view.main_hand = entry.equipment.get(&slot).cloned();
        vec![
            HostNotification::WieldedItemChanged { agent },
            HostNotification::WieldedItemChanged { agent },
        ]
    }

    fn notify_drop_item(&mut self, agent: AgentId, locking: bool) {
        self.drop_notices.push((agent, locking));
    }
}
