//! Launch gates of the ranged ignition trigger.
//!
//! A shot burns when its weapon class qualifies, the shooter passes the unit
//! filter and the chance roll succeeds. A shot failing any of those may still
//! be admitted by the whitelist.

use rand::Rng;

use firelord_core::config::FireArrowConfig;
use firelord_core::enums::WeaponClass;

use crate::eligibility::{unit_type_matches, whitelist_admits, EligibilityRules, EligibilitySubject};

/// Outcome of evaluating one shot.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LaunchVerdict {
    /// All regular gates passed.
    Admitted,
    /// A regular gate failed but the whitelist re-admitted the shot.
    Whitelisted,
    Rejected,
}

impl LaunchVerdict {
    pub fn is_admitted(self) -> bool {
        !matches!(self, LaunchVerdict::Rejected)
    }
}

/// Bows, crossbows and their ammo always qualify; thrown weapons only when
/// the config allows them; nothing else ever does.
pub fn weapon_class_admits(class: WeaponClass, allow_thrown: bool) -> bool {
    class.is_projectile() || (allow_thrown && class.is_thrown())
}

/// Uniform draw in `[0, 100)` compared against a percentage.
pub fn roll_chance<R: Rng + ?Sized>(rng: &mut R, chance_percent: f32) -> bool {
    rng.gen_range(0.0f32..100.0) < chance_percent
}

/// Run every gate for one shot.
///
/// The main agent's own shots skip the chance roll; everyone else draws
/// exactly once per shot, whatever the other gates decided, so the random
/// stream does not depend on the class filter.
pub fn evaluate_launch<R: Rng + ?Sized>(
    config: &FireArrowConfig,
    rules: &EligibilityRules<'_>,
    class: WeaponClass,
    subject: &EligibilitySubject<'_>,
    rng: &mut R,
) -> LaunchVerdict {
    let class_ok = weapon_class_admits(class, config.allow_thrown_weapons);
    let unit_ok = unit_type_matches(rules.unit_type, subject);
    let chance_ok = subject.is_main || roll_chance(rng, config.chance_percent);

    if class_ok && unit_ok && chance_ok {
        LaunchVerdict::Admitted
    } else if whitelist_admits(rules, subject) {
        LaunchVerdict::Whitelisted
    } else {
        LaunchVerdict::Rejected
    }
}
