//! Player commands forwarded by the host's input layer.
//!
//! Commands are queued and processed at the next tick boundary.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum PlayerCommand {
    /// Flip the player's fire sword default and apply it at once.
    ToggleFireSword,
    /// Flip whether fire arrows are enabled for this encounter.
    ToggleFireArrows,
}
