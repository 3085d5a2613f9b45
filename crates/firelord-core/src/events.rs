//! Events and on-screen messages emitted by the simulation.

use serde::{Deserialize, Serialize};

use crate::types::{AgentId, MissileId};

/// State transitions, for the host's effects and for diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum FireEvent {
    /// The agent's fire bar crossed the threshold and it started burning.
    Ignited { agent: AgentId },
    /// The burn ran its course.
    Extinguished { agent: AgentId },
    /// A burning blow landed.
    BurningDamage {
        attacker: Option<AgentId>,
        victim: AgentId,
        amount: f32,
    },
    FireSwordEnabled { agent: AgentId },
    FireSwordDisabled { agent: AgentId },
    /// A shot was admitted and its missile set alight.
    FireArrowLaunched { shooter: AgentId, missile: MissileId },
    /// Brackets a forced drop and re-pickup. Drop-triggered logic elsewhere
    /// should ignore the agent while `locking` is true.
    AgentDropItem { agent: AgentId, locking: bool },
}

/// Localization keys of the messages the simulation shows.
pub mod keys {
    pub const DELIVERED_BURNING_DAMAGE: &str = "ui_delivered_burning_damage";
    pub const RECEIVED_BURNING_DAMAGE: &str = "ui_received_burning_damage";
    pub const FIRE_ARROW_ENABLED: &str = "ui_fire_arrow_enabled";
    pub const FIRE_ARROW_DISABLED: &str = "ui_fire_arrow_disabled";
    pub const FIRE_SWORD_ENABLED: &str = "ui_fire_sword_enabled";
    pub const FIRE_SWORD_DISABLED: &str = "ui_fire_sword_disabled";
}

/// An on-screen message for the host to localize and display.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Message {
    pub key: String,
    /// Number substituted into the localized text.
    pub amount: Option<f32>,
    /// Text color as `#RRGGBBAA`; host default when absent.
    pub color: Option<String>,
    pub tick: u64,
}

impl Message {
    pub fn new(key: &str, tick: u64) -> Self {
        Self {
            key: key.to_string(),
            amount: None,
            color: None,
            tick,
        }
    }

    pub fn with_amount(mut self, amount: f32) -> Self {
        self.amount = Some(amount);
        self
    }

    pub fn with_color(mut self, color: &str) -> Self {
        self.color = Some(color.to_string());
        self
    }

    /// Fill a localized template: every run of digits is replaced by the
    /// rounded amount. Templates are authored with a placeholder number.
    pub fn render(&self, template: &str) -> String {
        let Some(amount) = self.amount else {
            return template.to_string();
        };
        let value = format!("{}", amount.round() as i64);
        let mut out = String::with_capacity(template.len());
        let mut in_digits = false;
        for ch in template.chars() {
            if ch.is_ascii_digit() {
                if !in_digits {
                    out.push_str(&value);
                    in_digits = true;
                }
            } else {
                in_digits = false;
                out.push(ch);
            }
        }
        out
    }
}
