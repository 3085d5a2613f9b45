use std::io::BufRead;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::{Parser, ValueEnum};
use tracing::{info, warn};
use tracing_subscriber::filter::EnvFilter;

use firelord_core::agent::MissionContext;
use firelord_core::config::FireLordConfig;
use firelord_harness::error::HarnessError;
use firelord_harness::game_loop::{self, LoopOptions};
use firelord_harness::state::{GameLoopCommand, HarnessState};
use firelord_sim::engine::SimConfig;
use firelord_sim::scenario::{Skirmish, SkirmishScript};

#[derive(Debug, Clone, Copy, ValueEnum)]
enum Mission {
    Field,
    Siege,
    Night,
}

impl Mission {
    fn context(self) -> MissionContext {
        match self {
            Mission::Field => MissionContext::field_battle(),
            Mission::Siege => MissionContext::siege(),
            Mission::Night => MissionContext {
                time_of_day: 23.0,
                ..MissionContext::field_battle()
            },
        }
    }
}

#[derive(Parser)]
#[command(version, about = "Play a scripted skirmish and report what burned")]
struct Cli {
    /// JSON fire configuration. Defaults apply when absent or invalid.
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// JSON skirmish script.
    #[arg(short, long)]
    script: Option<PathBuf>,
    #[arg(long, default_value_t = 42)]
    seed: u64,
    #[arg(short, long, default_value_t = 900)]
    ticks: u64,
    #[arg(short, long, value_enum, default_value_t = Mission::Field)]
    mission: Mission,
    /// Hold the nominal tick rate instead of running flat out.
    #[arg(long)]
    realtime: bool,
    /// Read `sword`, `arrows` and `quit` from stdin while running.
    #[arg(short, long)]
    interactive: bool,
}

fn main() {
    init_tracing();
    if let Err(err) = run(Cli::parse()) {
        eprintln!("error: {err}");
        std::process::exit(1);
    }
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: Cli) -> Result<(), HarnessError> {
    let fire = load_config(cli.config.as_deref());
    let script = match cli.script.as_deref() {
        Some(path) => load_script(path)?,
        None => SkirmishScript::default(),
    };
    let config = SimConfig {
        seed: cli.seed,
        fire,
    };
    let skirmish = Skirmish::new(config, script, cli.mission.context());

    let state = HarnessState::new();
    let options = LoopOptions {
        ticks: cli.ticks,
        realtime: cli.realtime,
    };
    let (tx, handle) =
        game_loop::spawn_game_loop(skirmish, options, Arc::clone(&state.latest_snapshot))?;
    if let Ok(mut lock) = state.command_tx.lock() {
        *lock = Some(tx);
    }
    info!(seed = cli.seed, ticks = cli.ticks, mission = ?cli.mission, "skirmish started");

    let state = Arc::new(state);
    if cli.interactive {
        let console = Arc::clone(&state);
        // Blocks on stdin; left behind when the loop finishes first.
        std::thread::spawn(move || read_console(&console));
    }
    finish(handle, &state)
}

fn finish(
    handle: std::thread::JoinHandle<firelord_sim::scenario::SkirmishReport>,
    state: &HarnessState,
) -> Result<(), HarnessError> {
    let report = handle.join().map_err(|_| HarnessError::LoopPanicked)?;
    info!(
        last_tick = state.latest_tick().unwrap_or(0),
        ignitions = report.ignitions,
        fire_arrows = report.fire_arrows,
        "skirmish finished"
    );
    let json = serde_json::to_string_pretty(&report).map_err(HarnessError::Report)?;
    println!("{json}");
    Ok(())
}

fn read_console(state: &HarnessState) {
    let stdin = std::io::stdin();
    for line in stdin.lock().lines() {
        let Ok(line) = line else {
            return;
        };
        match GameLoopCommand::parse(&line) {
            Some(command) => {
                let shutdown = matches!(command, GameLoopCommand::Shutdown);
                if !state.send(command) || shutdown {
                    return;
                }
            }
            None if line.trim().is_empty() => {}
            None => warn!(input = line.trim(), "unknown command; try sword, arrows or quit"),
        }
    }
}

fn load_config(path: Option<&Path>) -> FireLordConfig {
    let Some(path) = path else {
        return FireLordConfig::default();
    };
    match FireLordConfig::from_path(path) {
        Ok(config) => {
            info!(path = %path.display(), "config loaded");
            config
        }
        Err(err) => {
            warn!(path = %path.display(), error = %err, "config rejected, using defaults");
            FireLordConfig::default()
        }
    }
}

fn load_script(path: &Path) -> Result<SkirmishScript, HarnessError> {
    let text = std::fs::read_to_string(path).map_err(|source| HarnessError::ScriptIo {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&text).map_err(HarnessError::ScriptParse)
}
