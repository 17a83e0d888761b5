//! Property tests for derived formulas and ledger reversibility

use proptest::prelude::*;
use sheet_core::derived::{ability_modifier, calculate_proficiency_bonus};
use sheet_core::leveling::{aggregate_spell_slots, effective_caster_level, slots_for_caster_level};
use sheet_core::prelude::*;
use sheet_core::types::CasterType;

/// Grants that never touch the ability cap or the HP/speed floors
#[derive(Debug, Clone)]
enum Grant {
    Ability(usize, i32),
    Speed(i32),
    HitPoints(i32),
    Initiative(i32),
    ArmorClass(i32),
    Language(String),
    Passive(i32),
}

fn grant_strategy() -> impl Strategy<Value = Grant> {
    prop_oneof![
        (0usize..6, 1i32..=2).prop_map(|(index, amount)| Grant::Ability(index, amount)),
        (1i32..=10).prop_map(Grant::Speed),
        (1i32..=12).prop_map(Grant::HitPoints),
        (1i32..=5).prop_map(Grant::Initiative),
        (1i32..=2).prop_map(Grant::ArmorClass),
        prop::sample::select(vec!["Elvish", "Dwarvish", "Draconic"])
            .prop_map(|name| Grant::Language(name.to_string())),
        (1i32..=5).prop_map(Grant::Passive),
    ]
}

fn apply(character: &mut Character, source: &BenefitSource, grant: &Grant) {
    match grant {
        Grant::Ability(index, amount) => {
            character.grant_ability_score(source, Ability::all()[*index], *amount)
        }
        Grant::Speed(amount) => character.grant_speed(source, *amount),
        Grant::HitPoints(amount) => character.grant_hit_points(source, *amount),
        Grant::Initiative(amount) => character.grant_initiative(source, *amount),
        Grant::ArmorClass(amount) => character.grant_armor_class(source, *amount),
        Grant::Language(name) => character.grant_language(source, name),
        Grant::Passive(amount) => character.grant_passive_bonus(source, "Perception", *amount),
    }
}

proptest! {
    #[test]
    fn proficiency_bonus_never_drops(level in 1u32..20) {
        let here = calculate_proficiency_bonus(level);
        let next = calculate_proficiency_bonus(level + 1);
        prop_assert!(next >= here);
        prop_assert!((2..=6).contains(&here));
    }

    #[test]
    fn modifier_tracks_score(score in 1i32..=30) {
        let modifier = ability_modifier(score);
        prop_assert!(modifier * 2 + 10 <= score);
        prop_assert!(score <= modifier * 2 + 11);
    }

    #[test]
    fn uncapped_grants_reverse_exactly(
        scores in prop::array::uniform6(3i32..=8),
        hp in 1i32..=40,
        grants in prop::collection::vec(grant_strategy(), 0..6),
    ) {
        let mut character = Character::new(
            "Subject",
            AbilityScores::new(scores[0], scores[1], scores[2], scores[3], scores[4], scores[5]),
        );
        character.max_hp = hp;
        character.current_hp = hp;
        character.recalculate();
        let before = character.clone();

        let source = BenefitSource::feat("Trial");
        for grant in &grants {
            apply(&mut character, &source, grant);
        }
        prop_assert_eq!(character.ledger.len(), grants.len());

        let removed = character.remove_all_benefits(SourceKind::Feat, "Trial");
        prop_assert_eq!(removed, grants.len());
        prop_assert_eq!(character, before);
    }

    #[test]
    fn single_class_pool_matches_table(level in 1u32..=20) {
        let slots = aggregate_spell_slots(&[(CasterType::Full, level)]);
        prop_assert_eq!(slots.counts(), slots_for_caster_level(level));
    }

    #[test]
    fn caster_level_is_capped(
        full in 0u32..=20,
        half in 0u32..=20,
        third in 0u32..=20,
        pact in 0u32..=20,
    ) {
        let classes = [
            (CasterType::Full, full),
            (CasterType::Half, half),
            (CasterType::Third, third),
            (CasterType::Pact, pact),
        ];
        let level = effective_caster_level(&classes);
        prop_assert!(level <= 20);
        prop_assert!(level >= full.min(20));
    }
}
