//! Where flames go on a burning weapon.
//!
//! A weapon is cut into sections of `WEAPON_LENGTH_PER_SECTION`. Blades burn
//! along their whole length; hafted weapons only burn near the head.

use firelord_core::constants::{WEAPON_LENGTH_PER_SECTION, WEAPON_SECTION_LENGTH};
use firelord_core::enums::{FlameStyle, WeaponClass};

/// Number of sections a weapon of `length` is cut into.
pub fn section_count(length: f32) -> u32 {
    (length / WEAPON_LENGTH_PER_SECTION).round().max(0.0) as u32
}

/// How many sections of a hafted weapon burn, counting the tip.
pub fn head_flame_length(sections: u32) -> u32 {
    match sections {
        s if s > 19 => 9,
        s if s > 15 => 6,
        s if s > 12 => 5,
        s if s > 10 => 4,
        _ => 3,
    }
}

/// Elevations (meters along the weapon's up axis) of each flame particle.
/// Empty for classes that never burn.
pub fn flame_elevations(class: WeaponClass, length: f32) -> Vec<f32> {
    let sections = section_count(length);
    let elevation = |i: u32| i as f32 * WEAPON_SECTION_LENGTH;

    match class.flame_style() {
        Some(FlameStyle::Blade) => (1..sections).map(elevation).collect(),
        Some(FlameStyle::Head) => {
            let lowest = sections.saturating_sub(head_flame_length(sections));
            (1..sections)
                .rev()
                .take_while(|&i| i > lowest)
                .map(elevation)
                .collect()
        }
        None => Vec::new(),
    }
}
