#[cfg(test)]
mod tests {
    use rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    use firelord_core::agent::{AgentView, TeamView, WeaponView};
    use firelord_core::config::FireLordConfig;
    use firelord_core::enums::*;
    use firelord_core::types::{AgentId, EquipmentIndex, GameEntityId};

    use crate::eligibility::*;
    use crate::flame_layout::*;
    use crate::ranged::*;

    fn bow(item: &str) -> WeaponView {
        WeaponView::new(EquipmentIndex(1), GameEntityId(500), item, WeaponClass::Bow, 110.0)
    }

    fn soldier(id: u32) -> AgentView {
        AgentView::human(AgentId(id), "imperial_archer")
            .on_team(TeamView::hostile(BattleSide::Defender))
    }

    fn companion(id: u32) -> AgentView {
        AgentView::human(AgentId(id), "spc_companion")
            .hero()
            .on_team(TeamView::player_team(BattleSide::Attacker))
    }

    // ---- Unit filter ----

    #[test]
    fn test_unit_filter_roles() {
        let enemy = soldier(1);
        let friend = companion(2);
        let ally = AgentView::human(AgentId(3), "allied_levy")
            .on_team(TeamView::allied(BattleSide::Attacker));

        let enemy_s = EligibilitySubject::melee(&enemy, false);
        let friend_s = EligibilitySubject::melee(&friend, false);
        let ally_s = EligibilitySubject::melee(&ally, false);
        let player_s = EligibilitySubject::melee(&ally, true);

        assert!(unit_type_matches(UnitType::All, &enemy_s));
        assert!(unit_type_matches(UnitType::Player, &player_s));
        assert!(!unit_type_matches(UnitType::Player, &ally_s));
        assert!(unit_type_matches(UnitType::Heroes, &friend_s));
        assert!(!unit_type_matches(UnitType::Heroes, &enemy_s));
        assert!(unit_type_matches(UnitType::Companions, &friend_s));
        assert!(!unit_type_matches(UnitType::Companions, &ally_s));
        assert!(unit_type_matches(UnitType::Allies, &ally_s));
        assert!(!unit_type_matches(UnitType::Allies, &enemy_s));
        assert!(unit_type_matches(UnitType::Enemies, &enemy_s));
        assert!(!unit_type_matches(UnitType::Enemies, &friend_s));
    }

    #[test]
    fn test_teamless_agent_is_not_an_enemy() {
        let stray = AgentView::human(AgentId(7), "looter");
        let subject = EligibilitySubject::melee(&stray, false);
        assert!(!unit_type_matches(UnitType::Enemies, &subject));
        assert!(!unit_type_matches(UnitType::Allies, &subject));
    }

    // ---- Whitelists ----

    #[test]
    fn test_troop_whitelist_admits_listed_character() {
        let mut config = FireLordConfig::default();
        config.fire_sword.whitelist_type = WhitelistType::Troops;
        config.fire_sword.troops_whitelist.insert("imperial_archer".into());
        let rules = rules_for(&config, TriggerKind::Melee);

        let listed = soldier(1);
        let other = AgentView::human(AgentId(2), "sturgian_warrior");
        assert!(is_allowed(&rules, &EligibilitySubject::melee(&listed, false)));
        assert!(!is_allowed(&rules, &EligibilitySubject::melee(&other, false)));
    }

    #[test]
    fn test_item_whitelist_matches_weapon_or_ammo() {
        let mut config = FireLordConfig::default();
        config.fire_arrow.allowed_unit_type = UnitType::Player;
        config.fire_arrow.whitelist_type = WhitelistType::Items;
        config.fire_arrow.items_whitelist.insert("fire_arrows".into());
        let rules = rules_for(&config, TriggerKind::Ranged);

        let with_ammo = soldier(1).wielding(bow("hunting_bow").with_ammo("fire_arrows"));
        let listed_bow = soldier(2).wielding(bow("fire_arrows"));
        let plain = soldier(3).wielding(bow("hunting_bow").with_ammo("bodkin_arrows"));
        let unarmed = soldier(4);

        assert!(is_allowed(&rules, &EligibilitySubject::ranged(&with_ammo, false)));
        assert!(is_allowed(&rules, &EligibilitySubject::ranged(&listed_bow, false)));
        assert!(!is_allowed(&rules, &EligibilitySubject::ranged(&plain, false)));
        assert!(!is_allowed(&rules, &EligibilitySubject::ranged(&unarmed, false)));
        // A melee subject never looks at ammunition.
        assert!(!is_allowed(&rules, &EligibilitySubject::melee(&with_ammo, false)));
    }

    #[test]
    fn test_disabled_whitelist_admits_nobody() {
        let mut config = FireLordConfig::default();
        config.fire_sword.items_whitelist.insert("fire_sword".into());
        let rules = rules_for(&config, TriggerKind::Melee);
        let agent = soldier(1).wielding(WeaponView::new(
            EquipmentIndex(0),
            GameEntityId(1),
            "fire_sword",
            WeaponClass::OneHandedSword,
            95.0,
        ));
        assert!(!whitelist_admits(&rules, &EligibilitySubject::melee(&agent, false)));
    }

    #[test]
    fn test_rules_for_selects_trigger_section() {
        let mut config = FireLordConfig::default();
        config.fire_sword.allowed_unit_type = UnitType::Heroes;
        config.fire_arrow.allowed_unit_type = UnitType::Enemies;
        assert_eq!(rules_for(&config, TriggerKind::Melee).unit_type, UnitType::Heroes);
        assert_eq!(rules_for(&config, TriggerKind::Ranged).unit_type, UnitType::Enemies);
    }

    // ---- Ranged gates ----

    #[test]
    fn test_weapon_class_gate() {
        assert!(weapon_class_admits(WeaponClass::Crossbow, false));
        assert!(weapon_class_admits(WeaponClass::Arrow, false));
        assert!(!weapon_class_admits(WeaponClass::Javelin, false));
        assert!(weapon_class_admits(WeaponClass::Javelin, true));
        assert!(weapon_class_admits(WeaponClass::ThrowingKnife, true));
        assert!(!weapon_class_admits(WeaponClass::Musket, true));
        assert!(!weapon_class_admits(WeaponClass::OneHandedSword, true));
    }

    #[test]
    fn test_zero_chance_never_admits_other_shooters() {
        let mut config = FireLordConfig::default();
        config.fire_arrow.chance_percent = 0.0;
        let rules = rules_for(&config, TriggerKind::Ranged);
        let archer = soldier(1).wielding(bow("hunting_bow"));
        let subject = EligibilitySubject::ranged(&archer, false);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..500 {
            let verdict =
                evaluate_launch(&config.fire_arrow, &rules, WeaponClass::Bow, &subject, &mut rng);
            assert_eq!(verdict, LaunchVerdict::Rejected);
        }
    }

    #[test]
    fn test_main_agent_skips_chance_roll() {
        let mut config = FireLordConfig::default();
        config.fire_arrow.chance_percent = 0.0;
        let rules = rules_for(&config, TriggerKind::Ranged);
        let player = companion(1).wielding(bow("noble_bow"));
        let subject = EligibilitySubject::ranged(&player, true);
        let mut rng = ChaCha8Rng::seed_from_u64(7);

        for _ in 0..50 {
            let verdict =
                evaluate_launch(&config.fire_arrow, &rules, WeaponClass::Bow, &subject, &mut rng);
            assert_eq!(verdict, LaunchVerdict::Admitted);
        }
    }

    #[test]
    fn test_full_chance_admits_everyone_eligible() {
        let mut config = FireLordConfig::default();
        config.fire_arrow.chance_percent = 100.0;
        let rules = rules_for(&config, TriggerKind::Ranged);
        let archer = soldier(1).wielding(bow("hunting_bow"));
        let subject = EligibilitySubject::ranged(&archer, false);
        let mut rng = ChaCha8Rng::seed_from_u64(99);

        for _ in 0..200 {
            assert!(
                evaluate_launch(&config.fire_arrow, &rules, WeaponClass::Arrow, &subject, &mut rng)
                    .is_admitted()
            );
        }
    }

    #[test]
    fn test_chance_roll_rate_roughly_matches_percentage() {
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let hits = (0..10_000).filter(|_| roll_chance(&mut rng, 25.0)).count();
        assert!(
            (2_200..2_800).contains(&hits),
            "25% chance produced {hits} hits out of 10000"
        );
    }

    #[test]
    fn test_whitelist_overrides_failed_class_gate() {
        let mut config = FireLordConfig::default();
        config.fire_arrow.chance_percent = 100.0;
        config.fire_arrow.whitelist_type = WhitelistType::Items;
        config.fire_arrow.items_whitelist.insert("greek_fire_jar".into());
        let rules = rules_for(&config, TriggerKind::Ranged);
        let thrower = soldier(1).wielding(WeaponView::new(
            EquipmentIndex(2),
            GameEntityId(9),
            "greek_fire_jar",
            WeaponClass::Stone,
            20.0,
        ));
        let subject = EligibilitySubject::ranged(&thrower, false);
        let mut rng = ChaCha8Rng::seed_from_u64(1);

        let verdict =
            evaluate_launch(&config.fire_arrow, &rules, WeaponClass::Stone, &subject, &mut rng);
        assert_eq!(verdict, LaunchVerdict::Whitelisted);
    }

    // ---- Flame layout ----

    #[test]
    fn test_sword_flames_span_the_blade() {
        // 95 cm rounds to 10 sections: particles at sections 1..=9.
        let elevations = flame_elevations(WeaponClass::OneHandedSword, 95.0);
        assert_eq!(elevations.len(), 9);
        assert!((elevations[0] - 0.1).abs() < 1e-6);
        assert!((elevations[8] - 0.9).abs() < 1e-6);
    }

    #[test]
    fn test_head_flame_length_steps() {
        assert_eq!(head_flame_length(25), 9);
        assert_eq!(head_flame_length(20), 9);
        assert_eq!(head_flame_length(19), 6);
        assert_eq!(head_flame_length(16), 6);
        assert_eq!(head_flame_length(15), 5);
        assert_eq!(head_flame_length(13), 5);
        assert_eq!(head_flame_length(12), 4);
        assert_eq!(head_flame_length(11), 4);
        assert_eq!(head_flame_length(10), 3);
        assert_eq!(head_flame_length(2), 3);
    }

    #[test]
    fn test_polearm_flames_cluster_at_the_head() {
        // 250 cm → 25 sections, cluster of 9 → sections 24 down to 17.
        let elevations = flame_elevations(WeaponClass::TwoHandedPolearm, 250.0);
        assert_eq!(elevations.len(), 8);
        assert!((elevations[0] - 2.4).abs() < 1e-5);
        assert!((elevations[7] - 1.7).abs() < 1e-5);

        // Short axe: 6 sections, cluster of 3 → sections 5 and 4.
        let axe = flame_elevations(WeaponClass::OneHandedAxe, 60.0);
        assert_eq!(axe.len(), 2);
        assert!((axe[0] - 0.5).abs() < 1e-6);
        assert!((axe[1] - 0.4).abs() < 1e-6);
    }

    #[test]
    fn test_tiny_hafted_weapon_never_goes_below_first_section() {
        // 2 sections: the cluster would reach past the grip; only section 1 burns.
        let elevations = flame_elevations(WeaponClass::OneHandedAxe, 20.0);
        assert_eq!(elevations.len(), 1);
    }

    #[test]
    fn test_non_burning_classes_have_no_flames() {
        assert!(flame_elevations(WeaponClass::Dagger, 40.0).is_empty());
        assert!(flame_elevations(WeaponClass::Bow, 120.0).is_empty());
        assert!(flame_elevations(WeaponClass::OneHandedSword, 4.0).is_empty());
    }
}
