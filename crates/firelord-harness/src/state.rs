//! State shared between the console and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex};

use firelord_core::commands::PlayerCommand;
use firelord_core::state::FireStateSnapshot;

/// Commands sent from the console to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A player command to forward to the simulation.
    PlayerCommand(PlayerCommand),
    /// Stop the loop before its tick budget runs out.
    Shutdown,
}

impl GameLoopCommand {
    /// Parse one console line. Unknown input yields `None`.
    pub fn parse(line: &str) -> Option<Self> {
        match line.trim().to_ascii_lowercase().as_str() {
            "sword" | "fire_sword" => Some(Self::PlayerCommand(PlayerCommand::ToggleFireSword)),
            "arrows" | "fire_arrows" => {
                Some(Self::PlayerCommand(PlayerCommand::ToggleFireArrows))
            }
            "quit" | "exit" => Some(Self::Shutdown),
            _ => None,
        }
    }
}

/// Shared harness state.
///
/// - `command_tx` is `None` until the loop is started.
/// - `latest_snapshot` is written by the loop after each tick.
pub struct HarnessState {
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    pub latest_snapshot: Arc<Mutex<Option<FireStateSnapshot>>>,
}

impl Default for HarnessState {
    fn default() -> Self {
        Self {
            command_tx: Mutex::new(None),
            latest_snapshot: Arc::new(Mutex::new(None)),
        }
    }
}

impl HarnessState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forward a command to the running loop. Returns false when no loop is
    /// listening.
    pub fn send(&self, command: GameLoopCommand) -> bool {
        let Ok(tx) = self.command_tx.lock() else {
            return false;
        };
        tx.as_ref().is_some_and(|tx| tx.send(command).is_ok())
    }

    pub fn latest_tick(&self) -> Option<u64> {
        let lock = self.latest_snapshot.lock().ok()?;
        lock.as_ref().map(|snapshot| snapshot.time.tick)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_harness_state_creation() {
        let state = HarnessState::new();
        assert!(state.command_tx.lock().unwrap().is_none());
        assert!(state.latest_snapshot.lock().unwrap().is_none());
        assert!(!state.send(GameLoopCommand::Shutdown), "no loop yet");
    }

    #[test]
    fn test_console_lines() {
        assert!(matches!(
            GameLoopCommand::parse(" Sword\n"),
            Some(GameLoopCommand::PlayerCommand(PlayerCommand::ToggleFireSword))
        ));
        assert!(matches!(
            GameLoopCommand::parse("arrows"),
            Some(GameLoopCommand::PlayerCommand(PlayerCommand::ToggleFireArrows))
        ));
        assert!(matches!(
            GameLoopCommand::parse("quit"),
            Some(GameLoopCommand::Shutdown)
        ));
        assert!(GameLoopCommand::parse("dance").is_none());
    }
}
