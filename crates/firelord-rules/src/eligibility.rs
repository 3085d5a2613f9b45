//! Eligibility policy engine.
//!
//! Decides whether an agent may use a trigger: first by unit class, then, if
//! the class filter rejects it, by the optional troop or item whitelist.

use std::collections::BTreeSet;

use firelord_core::agent::AgentView;
use firelord_core::config::FireLordConfig;
use firelord_core::enums::{TriggerKind, UnitType, WhitelistType};

/// The policy of one trigger, borrowed from the config.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityRules<'a> {
    pub unit_type: UnitType,
    pub whitelist_type: WhitelistType,
    pub troops: &'a BTreeSet<String>,
    pub items: &'a BTreeSet<String>,
}

/// Who is asking, and with what.
#[derive(Debug, Clone, Copy)]
pub struct EligibilitySubject<'a> {
    pub agent: &'a AgentView,
    /// The agent is the main (player-controlled) agent.
    pub is_main: bool,
    /// Item id of the weapon the trigger fires through.
    pub weapon_item: Option<&'a str>,
    /// Item id of the ammunition, for ranged triggers.
    pub ammo_item: Option<&'a str>,
}

impl<'a> EligibilitySubject<'a> {
    /// Subject for a melee check: the main-hand weapon, no ammunition.
    pub fn melee(agent: &'a AgentView, is_main: bool) -> Self {
        Self {
            agent,
            is_main,
            weapon_item: agent.main_hand.as_ref().map(|w| w.item_id.as_str()),
            ammo_item: None,
        }
    }

    /// Subject for a ranged check: the main-hand weapon and its loaded ammo.
    pub fn ranged(agent: &'a AgentView, is_main: bool) -> Self {
        let weapon = agent.main_hand.as_ref();
        Self {
            agent,
            is_main,
            weapon_item: weapon.map(|w| w.item_id.as_str()),
            ammo_item: weapon.and_then(|w| w.ammo_item_id.as_deref()),
        }
    }
}

/// Select the rule set of a trigger.
pub fn rules_for(config: &FireLordConfig, kind: TriggerKind) -> EligibilityRules<'_> {
    match kind {
        TriggerKind::Melee => EligibilityRules {
            unit_type: config.fire_sword.allowed_unit_type,
            whitelist_type: config.fire_sword.whitelist_type,
            troops: &config.fire_sword.troops_whitelist,
            items: &config.fire_sword.items_whitelist,
        },
        TriggerKind::Ranged => EligibilityRules {
            unit_type: config.fire_arrow.allowed_unit_type,
            whitelist_type: config.fire_arrow.whitelist_type,
            troops: &config.fire_arrow.troops_whitelist,
            items: &config.fire_arrow.items_whitelist,
        },
    }
}

/// Class filter, then whitelist.
pub fn is_allowed(rules: &EligibilityRules<'_>, subject: &EligibilitySubject<'_>) -> bool {
    unit_type_matches(rules.unit_type, subject) || whitelist_admits(rules, subject)
}

/// Whether the agent's role matches the unit class filter.
pub fn unit_type_matches(unit_type: UnitType, subject: &EligibilitySubject<'_>) -> bool {
    let agent = subject.agent;
    match unit_type {
        UnitType::All => true,
        UnitType::Player => subject.is_main,
        UnitType::Heroes => agent.is_hero,
        UnitType::Companions => agent.is_hero && agent.is_player_team(),
        UnitType::Allies => agent.is_player_ally(),
        // An agent without a team is nobody's enemy.
        UnitType::Enemies => agent.team.is_some_and(|t| !t.is_player_ally),
    }
}

/// Whether the whitelist admits the subject. Always false when disabled.
pub fn whitelist_admits(rules: &EligibilityRules<'_>, subject: &EligibilitySubject<'_>) -> bool {
    match rules.whitelist_type {
        WhitelistType::Disabled => false,
        WhitelistType::Troops => rules.troops.contains(subject.agent.character_id.as_str()),
        WhitelistType::Items => {
            let listed = |item: Option<&str>| item.is_some_and(|id| rules.items.contains(id));
            listed(subject.weapon_item) || listed(subject.ammo_item)
        }
    }
}
