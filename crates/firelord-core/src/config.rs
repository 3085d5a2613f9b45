//! Player-tunable configuration.
//!
//! Loaded once before an encounter and read-only afterwards. Every section
//! defaults field by field, so a config file only needs the values it
//! changes.

use std::collections::BTreeSet;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::enums::{UnitType, WhitelistType};
use crate::error::ConfigError;

/// Complete configuration snapshot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireLordConfig {
    pub ignition: IgnitionConfig,
    pub fire_arrow: FireArrowConfig,
    pub fire_sword: FireSwordConfig,
}

/// Fire bar and burning parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IgnitionConfig {
    /// Fire bar value at which an agent ignites.
    pub bar_max: f32,
    /// Fire bar drained per second while not burning.
    pub drop_per_second: f32,
    /// How long an agent burns (seconds).
    pub duration_secs: f64,
    /// Whether burning agents take damage.
    pub deal_damage: bool,
    /// Damage of each once-per-second burning blow.
    pub damage_per_second: f32,
    /// Fire bar added by each fire arrow hit.
    pub per_fire_arrow: f32,
    /// Fire bar added by each fire sword hit (halved when blocked).
    pub per_fire_sword_hit: f32,
    /// Whether fire arrows can ignite agents on the shooter's side.
    pub friendly_fire: bool,
}

impl Default for IgnitionConfig {
    fn default() -> Self {
        Self {
            bar_max: 100.0,
            drop_per_second: 10.0,
            duration_secs: 3.0,
            deal_damage: true,
            damage_per_second: 8.0,
            per_fire_arrow: 50.0,
            per_fire_sword_hit: 25.0,
            friendly_fire: false,
        }
    }
}

/// Fire arrow parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireArrowConfig {
    pub allowed_unit_type: UnitType,
    pub whitelist_type: WhitelistType,
    pub troops_whitelist: BTreeSet<String>,
    pub items_whitelist: BTreeSet<String>,
    /// Percent chance that a shot from anyone but the player burns.
    pub chance_percent: f32,
    /// Throwing axes, knives and javelins may burn too.
    pub allow_thrown_weapons: bool,
    /// Fire arrow hits feed the victim's fire bar.
    pub ignite_target: bool,
    /// Start of the daily window (hours) in which fire arrows are on.
    pub allowed_time_start: f32,
    /// End of the daily window (hours). May be lower than the start to wrap
    /// past midnight.
    pub allowed_time_end: f32,
    /// Only enable fire arrows in sieges.
    pub only_in_siege: bool,
}

impl Default for FireArrowConfig {
    fn default() -> Self {
        Self {
            allowed_unit_type: UnitType::All,
            whitelist_type: WhitelistType::Disabled,
            troops_whitelist: BTreeSet::new(),
            items_whitelist: BTreeSet::new(),
            chance_percent: 20.0,
            allow_thrown_weapons: false,
            ignite_target: true,
            allowed_time_start: 0.0,
            allowed_time_end: 24.0,
            only_in_siege: false,
        }
    }
}

/// Fire sword parameters.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FireSwordConfig {
    pub allowed_unit_type: UnitType,
    pub whitelist_type: WhitelistType,
    pub troops_whitelist: BTreeSet<String>,
    pub items_whitelist: BTreeSet<String>,
    /// Initial state of the player's own fire sword toggle.
    pub player_default_on: bool,
    /// Light the whole body of the player, not just the blade.
    pub ignite_player_body: bool,
}

impl Default for FireSwordConfig {
    fn default() -> Self {
        Self {
            allowed_unit_type: UnitType::Player,
            whitelist_type: WhitelistType::Disabled,
            troops_whitelist: BTreeSet::new(),
            items_whitelist: BTreeSet::new(),
            player_default_on: false,
            ignite_player_body: false,
        }
    }
}

impl FireLordConfig {
    /// Parse and validate a JSON config.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a JSON config file.
    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Reject values the simulation cannot run with.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let ignition = &self.ignition;
        if !ignition.bar_max.is_finite() || ignition.bar_max <= 0.0 {
            return Err(ConfigError::invalid("ignition.bar_max", "must be positive"));
        }
        if !ignition.drop_per_second.is_finite() || ignition.drop_per_second < 0.0 {
            return Err(ConfigError::invalid(
                "ignition.drop_per_second",
                "must not be negative",
            ));
        }
        if !ignition.duration_secs.is_finite() || ignition.duration_secs <= 0.0 {
            return Err(ConfigError::invalid(
                "ignition.duration_secs",
                "must be positive",
            ));
        }
        if ignition.damage_per_second.is_nan() || ignition.damage_per_second < 0.0 {
            return Err(ConfigError::invalid(
                "ignition.damage_per_second",
                "must not be negative",
            ));
        }
        if ignition.per_fire_arrow.is_nan()
            || ignition.per_fire_arrow < 0.0
            || ignition.per_fire_sword_hit.is_nan()
            || ignition.per_fire_sword_hit < 0.0
        {
            return Err(ConfigError::invalid(
                "ignition.per_fire_arrow",
                "fire bar increments must not be negative",
            ));
        }

        let arrow = &self.fire_arrow;
        if !(0.0..=100.0).contains(&arrow.chance_percent) {
            return Err(ConfigError::invalid(
                "fire_arrow.chance_percent",
                format!("{} is outside [0, 100]", arrow.chance_percent),
            ));
        }
        for (field, hour) in [
            ("fire_arrow.allowed_time_start", arrow.allowed_time_start),
            ("fire_arrow.allowed_time_end", arrow.allowed_time_end),
        ] {
            if !(0.0..=24.0).contains(&hour) {
                return Err(ConfigError::invalid(
                    field,
                    format!("{hour} is not an hour of the day"),
                ));
            }
        }
        Ok(())
    }
}

impl FireArrowConfig {
    /// Whether `time_of_day` falls inside the allowed window.
    pub fn allows_time_of_day(&self, time_of_day: f32) -> bool {
        if self.allowed_time_start <= self.allowed_time_end {
            time_of_day >= self.allowed_time_start && time_of_day <= self.allowed_time_end
        } else {
            time_of_day >= self.allowed_time_start || time_of_day <= self.allowed_time_end
        }
    }
}
