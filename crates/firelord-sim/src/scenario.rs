//! Scripted skirmish on the sandbox host.
//!
//! The player and a few companions face enemy archers and spearmen. Archers
//! volley at fixed intervals, their missiles land a little later, and the
//! player swings at a random enemy now and then. Everything random comes from
//! the skirmish's own seeded RNG, so a run is reproducible.

use rand::seq::SliceRandom;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};
use tracing::info;

use firelord_core::agent::{AgentView, MissionContext, TeamView};
use firelord_core::commands::PlayerCommand;
use firelord_core::constants::{DT, TICK_RATE};
use firelord_core::enums::{BattleSide, WeaponClass};
use firelord_core::events::FireEvent;
use firelord_core::state::FireStateSnapshot;
use firelord_core::types::{AgentId, EquipmentIndex, MissileId};

use crate::engine::{FireSimulation, SimConfig};
use crate::host::BattleHost;
use crate::sandbox::SandboxHost;

/// Shape and pacing of a skirmish.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SkirmishScript {
    pub companions: u32,
    pub archers: u32,
    pub spearmen: u32,
    /// Ticks between archer volleys.
    pub volley_interval_ticks: u64,
    /// Ticks a missile flies before it lands.
    pub flight_ticks: u64,
    /// Ticks between two player swings.
    pub swing_interval_ticks: u64,
    /// Chance in `[0, 1]` that a player swing is blocked.
    pub block_chance: f64,
    /// Tick at which the player toggles the fire sword, if ever.
    pub toggle_fire_sword_at: Option<u64>,
}

impl Default for SkirmishScript {
    fn default() -> Self {
        Self {
            companions: 2,
            archers: 4,
            spearmen: 4,
            volley_interval_ticks: u64::from(TICK_RATE) * 2,
            flight_ticks: u64::from(TICK_RATE) / 2,
            swing_interval_ticks: u64::from(TICK_RATE),
            block_chance: 0.3,
            toggle_fire_sword_at: Some(1),
        }
    }
}

/// Totals of a finished run.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SkirmishReport {
    pub ticks: u64,
    pub shots: u64,
    pub fire_arrows: u64,
    pub ignitions: u64,
    pub extinguished: u64,
    pub burning_blows: u64,
    pub burning_damage: f32,
    pub final_snapshot: FireStateSnapshot,
}

impl SkirmishReport {
    /// Add one tick's events to the totals.
    pub fn record(&mut self, snapshot: &FireStateSnapshot) {
        self.ticks = snapshot.time.tick;
        for event in &snapshot.events {
            match event {
                FireEvent::FireArrowLaunched { .. } => self.fire_arrows += 1,
                FireEvent::Ignited { .. } => self.ignitions += 1,
                FireEvent::Extinguished { .. } => self.extinguished += 1,
                FireEvent::BurningDamage { amount, .. } => {
                    self.burning_blows += 1;
                    self.burning_damage += amount;
                }
                _ => {}
            }
        }
    }
}

#[derive(Debug, Clone, Copy)]
struct InFlight {
    missile: MissileId,
    shooter: AgentId,
    target: AgentId,
    lands_at: u64,
}

/// A running skirmish.
pub struct Skirmish {
    pub host: SandboxHost,
    pub sim: FireSimulation,
    script: SkirmishScript,
    rng: ChaCha8Rng,
    player: AgentId,
    allies: Vec<AgentId>,
    archers: Vec<(AgentId, EquipmentIndex)>,
    enemies: Vec<AgentId>,
    in_flight: Vec<InFlight>,
    tick: u64,
    shots: u64,
}

impl Skirmish {
    pub fn new(config: SimConfig, script: SkirmishScript, mission: MissionContext) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed ^ 0x5eed);
        let mut host = SandboxHost::new(mission);
        let mut sim = FireSimulation::new(config);
        let mut next_id = 0u32;
        let mut next = || {
            next_id += 1;
            AgentId(next_id)
        };

        let own = TeamView::player_team(BattleSide::Attacker);
        let hostile = TeamView::hostile(BattleSide::Defender);

        let player = host.spawn_main(AgentView::human(next(), "main_hero").hero().on_team(own));
        host.arm(player, "fire_longsword", WeaponClass::TwoHandedSword, 105.0);
        let mut allies = vec![player];

        for _ in 0..script.companions {
            let id = host.spawn(AgentView::human(next(), "spc_companion").hero().on_team(own));
            host.arm(id, "bearded_axe", WeaponClass::OneHandedAxe, 70.0);
            allies.push(id);
        }

        let mut archers = Vec::new();
        let mut enemies = Vec::new();
        for _ in 0..script.archers {
            let id = host.spawn(AgentView::human(next(), "imperial_archer").on_team(hostile));
            if let Some(slot) = host.arm(id, "hunting_bow", WeaponClass::Bow, 110.0) {
                archers.push((id, slot));
            }
            enemies.push(id);
        }
        for _ in 0..script.spearmen {
            let id = host.spawn(AgentView::human(next(), "imperial_spearman").on_team(hostile));
            host.arm(id, "long_spear", WeaponClass::TwoHandedPolearm, 220.0);
            enemies.push(id);
        }

        for id in host.agent_ids() {
            sim.on_agent_created(&host, id);
        }
        info!(
            allies = allies.len(),
            enemies = enemies.len(),
            "skirmish set up"
        );

        Self {
            host,
            sim,
            script,
            rng,
            player,
            allies,
            archers,
            enemies,
            in_flight: Vec::new(),
            tick: 0,
            shots: 0,
        }
    }

    pub fn player(&self) -> AgentId {
        self.player
    }

    /// Shots fired so far, fire arrows or not.
    pub fn shots(&self) -> u64 {
        self.shots
    }

    /// Play one tick of the script, then tick the simulation.
    pub fn step(&mut self) -> FireStateSnapshot {
        self.tick += 1;
        let tick = self.tick;

        if self.script.toggle_fire_sword_at == Some(tick) {
            self.sim.queue_command(PlayerCommand::ToggleFireSword);
        }

        self.land_missiles(tick);
        if tick % self.script.volley_interval_ticks.max(1) == 0 {
            self.volley(tick);
        }
        if tick % self.script.swing_interval_ticks.max(1) == 0 {
            self.player_swing();
        }

        self.sim.tick(&mut self.host, DT)
    }

    /// Run `ticks` ticks and total up what happened.
    pub fn run(&mut self, ticks: u64) -> SkirmishReport {
        let mut report = SkirmishReport::default();
        for _ in 0..ticks {
            let snapshot = self.step();
            report.record(&snapshot);
            report.final_snapshot = snapshot;
        }
        report.shots = self.shots;
        report
    }

    fn alive(&self, agent: AgentId) -> bool {
        self.host.agent(agent).is_some_and(|view| view.is_active)
    }

    fn volley(&mut self, tick: u64) {
        let targets: Vec<AgentId> = self
            .allies
            .iter()
            .copied()
            .filter(|&ally| self.alive(ally))
            .collect();
        for (archer, slot) in self.archers.clone() {
            if !self.alive(archer) {
                continue;
            }
            let Some(&target) = targets.choose(&mut self.rng) else {
                return;
            };
            let missile = self.host.launch(archer, true);
            self.sim.on_agent_shoot_missile(&mut self.host, archer, slot);
            self.shots += 1;
            self.in_flight.push(InFlight {
                missile,
                shooter: archer,
                target,
                lands_at: tick + self.script.flight_ticks,
            });
        }
    }

    fn land_missiles(&mut self, tick: u64) {
        let (landing, flying): (Vec<_>, Vec<_>) = std::mem::take(&mut self.in_flight)
            .into_iter()
            .partition(|flight| flight.lands_at <= tick);
        self.in_flight = flying;
        for flight in landing {
            self.host.land(flight.missile);
            let victim = self.alive(flight.target).then_some(flight.target);
            self.sim.on_missile_collision(&mut self.host, flight.shooter, victim);
        }
    }

    fn player_swing(&mut self) {
        if !self.alive(self.player) {
            return;
        }
        let targets: Vec<AgentId> = self
            .enemies
            .iter()
            .copied()
            .filter(|&enemy| self.alive(enemy))
            .collect();
        let Some(&victim) = targets.choose(&mut self.rng) else {
            return;
        };
        let blocked = self.rng.gen_bool(self.script.block_chance.clamp(0.0, 1.0));
        self.sim.on_score_hit(&self.host, self.player, victim, blocked);
    }
}
