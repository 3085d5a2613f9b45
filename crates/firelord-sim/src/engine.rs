//! Simulation engine.
//!
//! `FireSimulation` owns the hecs world that shadows the host's agents,
//! receives the host's notifications, runs the per-tick systems and produces
//! a `FireStateSnapshot`. It never touches host state except through the
//! [`BattleHost`] passed to each call, so it runs headless in tests.

use std::collections::{HashMap, VecDeque};

use hecs::World;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
use tracing::{debug, trace};

use firelord_core::commands::PlayerCommand;
use firelord_core::components::{FireRecord, Tracked, WeaponFireRecord};
use firelord_core::config::FireLordConfig;
use firelord_core::events::{FireEvent, Message};
use firelord_core::state::FireStateSnapshot;
use firelord_core::types::{AgentId, EquipmentIndex, SimTime};

use crate::host::BattleHost;
use crate::systems;
use crate::systems::fire_arrow::FireArrowState;
use crate::systems::snapshot::EncounterFlags;
use crate::systems::TickContext;

/// Configuration for starting a new encounter.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub fire: FireLordConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            fire: FireLordConfig::default(),
        }
    }
}

/// Fire state of one encounter.
pub struct FireSimulation {
    world: World,
    index: HashMap<AgentId, hecs::Entity>,
    config: FireLordConfig,
    time: SimTime,
    rng: ChaCha8Rng,
    in_battle: bool,
    player_fire_sword: bool,
    fire_arrows: FireArrowState,
    command_queue: VecDeque<PlayerCommand>,
    despawn_buffer: Vec<hecs::Entity>,
    events: Vec<FireEvent>,
    messages: Vec<Message>,
}

/// Build a [`TickContext`] from the engine's fields, leaving `world` and the
/// other fields free to borrow alongside it.
macro_rules! context {
    ($sim:ident, $host:expr) => {{
        let main_agent = $host.main_agent();
        TickContext {
            host: &mut *$host,
            config: &$sim.config,
            index: &$sim.index,
            time: $sim.time,
            main_agent,
            player_fire_sword: $sim.player_fire_sword,
            events: &mut $sim.events,
            messages: &mut $sim.messages,
        }
    }};
}

impl FireSimulation {
    pub fn new(config: SimConfig) -> Self {
        Self {
            world: World::new(),
            index: HashMap::new(),
            player_fire_sword: config.fire.fire_sword.player_default_on,
            config: config.fire,
            time: SimTime::default(),
            rng: ChaCha8Rng::seed_from_u64(config.seed),
            in_battle: false,
            fire_arrows: FireArrowState::default(),
            command_queue: VecDeque::new(),
            despawn_buffer: Vec::new(),
            events: Vec::new(),
            messages: Vec::new(),
        }
    }

    pub fn config(&self) -> &FireLordConfig {
        &self.config
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    /// Read-only access to the ECS world.
    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn fire_arrows_enabled(&self) -> bool {
        self.fire_arrows.enabled
    }

    pub fn player_fire_sword_enabled(&self) -> bool {
        self.player_fire_sword
    }

    pub fn tracked_missiles(&self) -> usize {
        self.fire_arrows.tracked.len()
    }

    pub fn fire_bar(&self, agent: AgentId) -> Option<f32> {
        let entity = *self.index.get(&agent)?;
        let record = self.world.get::<&FireRecord>(entity).ok()?;
        Some(record.fire_bar)
    }

    pub fn is_burning(&self, agent: AgentId) -> bool {
        self.index.get(&agent).is_some_and(|&entity| {
            self.world
                .get::<&FireRecord>(entity)
                .is_ok_and(|record| record.is_burning)
        })
    }

    /// Last agent credited with heat on `agent`.
    pub fn attacker_of(&self, agent: AgentId) -> Option<AgentId> {
        let entity = *self.index.get(&agent)?;
        let record = self.world.get::<&FireRecord>(entity).ok()?;
        record.attacker
    }

    pub fn weapon_fire_enabled(&self, agent: AgentId) -> bool {
        self.index.get(&agent).is_some_and(|&entity| {
            self.world
                .get::<&WeaponFireRecord>(entity)
                .is_ok_and(|record| record.enabled)
        })
    }

    pub fn is_tracked(&self, agent: AgentId) -> bool {
        self.index.contains_key(&agent)
    }

    /// Queue a player command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: PlayerCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = PlayerCommand>) {
        self.command_queue.extend(commands);
    }

    // ---- Host notifications ----

    /// The host spawned an agent. Humans get a weapon fire record.
    pub fn on_agent_created(&mut self, host: &dyn BattleHost, agent: AgentId) {
        if !host.mission().is_in_battle() {
            return;
        }
        let Some(view) = host.agent(agent) else {
            return;
        };
        let entity = systems::ignition::ensure_entity(&mut self.world, &mut self.index, agent);
        if !view.is_human || self.world.get::<&WeaponFireRecord>(entity).is_ok() {
            return;
        }

        let is_main = host.main_agent() == Some(agent);
        let record = systems::fire_sword::spawn_record(
            &view,
            is_main,
            self.player_fire_sword,
            self.time.elapsed_secs,
        );
        trace!(%agent, is_main, "weapon fire record created");
        let _ = self.world.insert_one(entity, record);
    }

    /// The host deleted an agent. Its records go in the next cleanup pass,
    /// burning or not.
    pub fn on_agent_removed(&mut self, agent: AgentId) {
        if let Some(&entity) = self.index.get(&agent) {
            if let Ok(mut tracked) = self.world.get::<&mut Tracked>(entity) {
                tracked.removed = true;
            }
        }
    }

    pub fn on_wielded_item_changed(&mut self, host: &mut dyn BattleHost, agent: AgentId) {
        if !host.mission().is_in_battle() {
            return;
        }
        let Some(&entity) = self.index.get(&agent) else {
            return;
        };
        let mut ctx = context!(self, host);
        systems::fire_sword::on_wielded_item_changed(&mut self.world, &mut ctx, entity, agent);
    }

    pub fn on_agent_health_changed(
        &mut self,
        host: &mut dyn BattleHost,
        agent: AgentId,
        _old_health: f32,
        new_health: f32,
    ) {
        if !host.mission().is_in_battle() {
            return;
        }
        let Some(&entity) = self.index.get(&agent) else {
            return;
        };
        let mut ctx = context!(self, host);
        systems::fire_sword::on_health_changed(&mut self.world, &mut ctx, entity, new_health);
    }

    /// An agent released a missile with the weapon in `slot`.
    pub fn on_agent_shoot_missile(
        &mut self,
        host: &mut dyn BattleHost,
        shooter: AgentId,
        slot: EquipmentIndex,
    ) {
        if !host.mission().is_in_battle() {
            return;
        }
        let mut ctx = context!(self, host);
        systems::fire_arrow::on_shoot(
            &mut self.fire_arrows,
            &mut ctx,
            &mut self.rng,
            shooter,
            slot,
        );
    }

    /// A missile shot by `attacker` hit something; `victim` is the agent it
    /// hit, if any.
    pub fn on_missile_collision(
        &mut self,
        host: &mut dyn BattleHost,
        attacker: AgentId,
        victim: Option<AgentId>,
    ) {
        if !host.mission().is_in_battle() {
            return;
        }
        let mut ctx = context!(self, host);
        let deposits =
            systems::fire_arrow::on_collision(&mut self.fire_arrows, &mut ctx, attacker, victim);
        let Some(victim) = victim else {
            return;
        };
        let amount = self.config.ignition.per_fire_arrow;
        for _ in 0..deposits {
            self.increase_fire_bar(Some(attacker), victim, amount);
        }
    }

    /// A melee hit landed. Only the player's own hits feed the victim's fire
    /// bar; blocked hits count half.
    pub fn on_score_hit(
        &mut self,
        host: &dyn BattleHost,
        attacker: AgentId,
        victim: AgentId,
        is_blocked: bool,
    ) {
        if !host.mission().is_in_battle() || host.main_agent() != Some(attacker) {
            return;
        }
        let Some(view) = host.agent(attacker) else {
            return;
        };
        if !view.is_player_ally() {
            return;
        }
        let per_hit = self.config.ignition.per_fire_sword_hit;
        let amount = if is_blocked { per_hit / 2.0 } else { per_hit };
        self.increase_fire_bar(Some(attacker), victim, amount);
    }

    /// Deposit heat on `victim`. No-op while the victim burns.
    pub fn increase_fire_bar(&mut self, attacker: Option<AgentId>, victim: AgentId, amount: f32) {
        systems::ignition::increase_fire_bar(
            &mut self.world,
            &mut self.index,
            &self.config.ignition,
            attacker,
            victim,
            amount,
        );
    }

    /// Release every particle and forget every agent. Call when the encounter
    /// ends.
    pub fn end_encounter(&mut self, host: &mut dyn BattleHost) {
        {
            let mut ctx = context!(self, host);
            systems::fire_arrow::release_all(&mut self.fire_arrows, &mut ctx);
        }
        systems::cleanup::release_all(&mut self.world, host);
        self.index.clear();
        self.fire_arrows = FireArrowState::default();
        self.command_queue.clear();
        debug!(tick = self.time.tick, "encounter ended");
    }

    // ---- Tick ----

    /// Advance the simulation by one tick of `dt` seconds and return the
    /// resulting snapshot. Outside a battle nothing runs and queued commands
    /// are discarded.
    pub fn tick(&mut self, host: &mut dyn BattleHost, dt: f64) -> FireStateSnapshot {
        self.in_battle = host.mission().is_in_battle();

        if self.in_battle {
            {
                let mut ctx = context!(self, host);
                systems::fire_arrow::initialize(&mut self.fire_arrows, &mut ctx);
            }
            self.process_commands(host);
            self.time.advance(dt);
            self.run_systems(host, dt);
        } else if !self.command_queue.is_empty() {
            trace!(count = self.command_queue.len(), "commands dropped outside battle");
            self.command_queue.clear();
        }

        let flags = EncounterFlags {
            in_battle: self.in_battle,
            fire_arrows_enabled: self.fire_arrows.enabled,
            player_fire_sword_enabled: self.player_fire_sword,
            tracked_missiles: self.fire_arrows.tracked.len(),
        };
        systems::snapshot::build_snapshot(
            &self.world,
            &self.time,
            flags,
            std::mem::take(&mut self.events),
            std::mem::take(&mut self.messages),
        )
    }

    fn process_commands(&mut self, host: &mut dyn BattleHost) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(host, command);
        }
    }

    fn handle_command(&mut self, host: &mut dyn BattleHost, command: PlayerCommand) {
        match command {
            PlayerCommand::ToggleFireSword => {
                let mut ctx = context!(self, host);
                let enabled = systems::fire_sword::toggle_player(&mut self.world, &mut ctx);
                self.player_fire_sword = enabled;
            }
            PlayerCommand::ToggleFireArrows => {
                let mut ctx = context!(self, host);
                systems::fire_arrow::toggle(&mut self.fire_arrows, &mut ctx);
            }
        }
    }

    /// Run all systems in order.
    fn run_systems(&mut self, host: &mut dyn BattleHost, dt: f64) {
        {
            let mut ctx = context!(self, host);
            // 1. Weapon equip timers
            systems::fire_sword::run(&mut self.world, &mut ctx);
            // 2. Fire bars, ignition, burning
            systems::ignition::run(&mut self.world, &mut ctx, dt);
        }
        // 3. Records of dead and removed agents
        systems::cleanup::run(
            &mut self.world,
            &mut self.index,
            host,
            &mut self.despawn_buffer,
            &mut self.events,
        );
        // 4. Fire arrows that left the host's missile list
        let mut ctx = context!(self, host);
        systems::fire_arrow::prune(&mut self.fire_arrows, &mut ctx);
    }
}
