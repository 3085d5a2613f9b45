//! Game loop thread: plays a skirmish tick by tick and publishes snapshots.
//!
//! The skirmish is moved into the thread. Commands arrive via `mpsc` channel;
//! the latest snapshot is stored in shared state for polling, and the totals
//! come back through the thread's join handle.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use tracing::{debug, info};

use firelord_core::constants::TICK_RATE;
use firelord_core::state::FireStateSnapshot;
use firelord_sim::scenario::{Skirmish, SkirmishReport};

use crate::error::HarnessError;
use crate::state::GameLoopCommand;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// How long and how fast to run.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    pub ticks: u64,
    /// Sleep between ticks to hold the nominal tick rate.
    pub realtime: bool,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the handle that yields the final report.
pub fn spawn_game_loop(
    skirmish: Skirmish,
    options: LoopOptions,
    latest_snapshot: Arc<Mutex<Option<FireStateSnapshot>>>,
) -> Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<SkirmishReport>), HarnessError> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("firelord-game-loop".into())
        .spawn(move || run_game_loop(skirmish, cmd_rx, &latest_snapshot, options))
        .map_err(HarnessError::Spawn)?;

    Ok((cmd_tx, handle))
}

/// Runs until the tick budget is spent or a Shutdown arrives.
pub fn run_game_loop(
    mut skirmish: Skirmish,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<FireStateSnapshot>>,
    options: LoopOptions,
) -> SkirmishReport {
    let mut report = SkirmishReport::default();
    let mut next_tick_time = Instant::now();
    let mut listening = true;

    for _ in 0..options.ticks {
        // 1. Drain all pending commands
        while listening {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::PlayerCommand(cmd)) => {
                    debug!(?cmd, "command received");
                    skirmish.sim.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => {
                    info!(tick = report.ticks, "shutdown requested");
                    report.shots = skirmish.shots();
                    return report;
                }
                Err(mpsc::TryRecvError::Empty) => break,
                // Console gone: play out the budget without it
                Err(mpsc::TryRecvError::Disconnected) => listening = false,
            }
        }

        // 2. Advance one tick
        let snapshot = skirmish.step();
        report.record(&snapshot);
        report.final_snapshot = snapshot.clone();

        // 3. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        // 4. Sleep until the next tick
        if options.realtime {
            next_tick_time += TICK_DURATION;
            let now = Instant::now();
            if next_tick_time > now {
                std::thread::sleep(next_tick_time - now);
            } else if now - next_tick_time > TICK_DURATION * 2 {
                // Too far behind: reset to avoid a catch-up spiral
                next_tick_time = now;
            }
        }
    }

    report.shots = skirmish.shots();
    report
}
