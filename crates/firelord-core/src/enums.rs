//! Enumeration types used throughout the simulation.

use serde::{Deserialize, Serialize};

/// Which agents a trigger is allowed for, before any whitelist is consulted.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum UnitType {
    #[default]
    All,
    /// Only the main (player-controlled) agent.
    Player,
    Heroes,
    /// Heroes fighting on the player's own team.
    Companions,
    /// Anyone on a team allied with the player.
    Allies,
    Enemies,
}

/// Second-chance admission list for agents the unit filter rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WhitelistType {
    #[default]
    Disabled,
    /// Match on the agent's character (troop) id.
    Troops,
    /// Match on the wielded weapon or its ammunition item id.
    Items,
}

/// The trigger an eligibility check is made for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum TriggerKind {
    /// Burning weapon held in hand.
    Melee,
    /// Burning projectile.
    Ranged,
}

/// Host weapon classes. Mirrors the host's own classification.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum WeaponClass {
    #[default]
    Undefined,
    Dagger,
    OneHandedSword,
    TwoHandedSword,
    OneHandedAxe,
    TwoHandedAxe,
    Mace,
    Pick,
    TwoHandedMace,
    OneHandedPolearm,
    TwoHandedPolearm,
    LowGripPolearm,
    Arrow,
    Bolt,
    Cartridge,
    Bow,
    Crossbow,
    Stone,
    Boulder,
    ThrowingAxe,
    ThrowingKnife,
    Javelin,
    Pistol,
    Musket,
    SmallShield,
    LargeShield,
    Banner,
}

/// How flames are laid out along a wielded weapon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FlameStyle {
    /// Evenly spaced along the whole blade.
    Blade,
    /// Clustered near the head of a long haft.
    Head,
}

impl WeaponClass {
    /// Bows, crossbows and their ammunition.
    pub fn is_projectile(self) -> bool {
        matches!(
            self,
            WeaponClass::Arrow | WeaponClass::Bolt | WeaponClass::Bow | WeaponClass::Crossbow
        )
    }

    /// Weapons thrown by hand.
    pub fn is_thrown(self) -> bool {
        matches!(
            self,
            WeaponClass::ThrowingAxe | WeaponClass::ThrowingKnife | WeaponClass::Javelin
        )
    }

    /// Flame layout for a burning weapon of this class, if it can burn at all.
    pub fn flame_style(self) -> Option<FlameStyle> {
        match self {
            WeaponClass::OneHandedSword
            | WeaponClass::TwoHandedSword
            | WeaponClass::Mace
            | WeaponClass::TwoHandedMace => Some(FlameStyle::Blade),
            WeaponClass::OneHandedAxe
            | WeaponClass::TwoHandedAxe
            | WeaponClass::OneHandedPolearm
            | WeaponClass::TwoHandedPolearm
            | WeaponClass::LowGripPolearm => Some(FlameStyle::Head),
            _ => None,
        }
    }
}

/// Side of a battle a team fights on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BattleSide {
    Attacker,
    Defender,
}

/// Host mission mode.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum MissionMode {
    #[default]
    Battle,
    Conversation,
    StartUp,
    Barter,
    Deployment,
    Duel,
    Stealth,
    Tournament,
    CutScene,
}

/// Damage type of a blow.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DamageType {
    Cut,
    Pierce,
    Blunt,
}
