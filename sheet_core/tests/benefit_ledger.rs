//! Integration test: grant -> remove round trips through the benefit ledger

use sheet_core::prelude::*;
use sheet_core::BenefitGrant;

fn fighter() -> (Character, RuleTables) {
    let tables = RuleTables::srd();
    let mut character = Character::new("Brannoc", AbilityScores::new(15, 14, 14, 10, 12, 8));
    let mut roller = ScriptedRoller::always(5);
    for _ in 0..3 {
        character
            .level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();
    }
    (character, tables)
}

#[test]
fn feat_apply_then_remove_restores_sheet() {
    let (mut character, tables) = fighter();
    let before = character.clone();

    character.apply_feat("Tough", &GrantChoices::new(), &tables).unwrap();
    assert_eq!(character.max_hp, before.max_hp + 6);
    assert_eq!(character.current_hp, character.max_hp);

    assert!(character.remove_feat("Tough"));
    assert_eq!(character, before);
}

#[test]
fn choice_feat_round_trips() {
    let (mut character, mut tables) = fighter();
    // Skip the level 4 prerequisite so the fighter can take it at level 3
    let mut observant = tables.feat("Observant").unwrap().clone();
    observant.prerequisite = None;
    tables.feats.insert(observant);
    let before = character.clone();

    let choices = GrantChoices::new().ability(Ability::Wisdom);
    character.apply_feat("Observant", &choices, &tables).unwrap();
    assert_eq!(character.abilities.wisdom, 13);
    assert_eq!(character.passive_bonus("Perception"), 5);
    let passive_with_feat = character.passive_score(Skill::Perception);

    character.remove_feat("Observant");
    assert_eq!(character.passive_score(Skill::Perception), passive_with_feat - 5);
    assert_eq!(character, before);
}

#[test]
fn removal_at_ability_cap_under_restores() {
    let mut character = Character::new("Capped", AbilityScores::new(19, 10, 10, 10, 10, 10));
    let source = BenefitSource::feat("Heavy Lifter");

    character.grant_ability_score(&source, Ability::Strength, 2);
    assert_eq!(character.abilities.strength, 20);
    assert_eq!(character.ledger.entries()[0].value, 2);

    character.remove_all_benefits(SourceKind::Feat, "Heavy Lifter");
    // The requested +2 comes off, not the +1 that actually landed
    assert_eq!(character.abilities.strength, 18);
}

#[test]
fn overlapping_sources_are_reference_counted() {
    let mut character = Character::new("Linguist", AbilityScores::default());
    let elf = BenefitSource::species("Elf");
    let sage = BenefitSource::origin("Sage");

    character.grant_language(&elf, "Elvish");
    character.grant_language(&sage, "elvish");
    character.grant_resistance(&elf, "Fire");
    character.grant_resistance(&sage, "Fire");
    character.grant_tool(&sage, "Calligrapher's Supplies");
    assert_eq!(character.languages, vec!["Elvish".to_string()]);
    assert_eq!(character.ledger.len(), 5);

    character.remove_all_benefits(SourceKind::Species, "Elf");
    assert!(character.speaks("Elvish"));
    assert!(character.resists("fire"));

    character.remove_all_benefits(SourceKind::Origin, "Sage");
    assert!(!character.speaks("Elvish"));
    assert!(!character.resists("fire"));
    assert!(!character.has_tool("Calligrapher's Supplies"));
    assert!(character.ledger.is_empty());
}

#[test]
fn skill_removal_restores_prior_at_grant_time() {
    let mut character = Character::new("Scout", AbilityScores::default());
    let first = BenefitSource::origin("Guard");
    let second = BenefitSource::feat("Skill Expert");

    character.grant_skill(&first, Skill::Perception);
    character.grant_skill(&second, Skill::Perception);
    assert_eq!(character.skill_proficiency(Skill::Perception), Proficiency::Expertise);

    // The first grant recorded None as its prior level, so removing it
    // wipes the proficiency even though the second source is still held
    character.remove_all_benefits(SourceKind::Origin, "Guard");
    assert_eq!(character.skill_proficiency(Skill::Perception), Proficiency::None);

    // The second grant recorded Proficient
    character.remove_all_benefits(SourceKind::Feat, "Skill Expert");
    assert_eq!(character.skill_proficiency(Skill::Perception), Proficiency::Proficient);
}

#[test]
fn regrant_appends_entries_but_sets_stay_unique() {
    let mut character = Character::new("Twice", AbilityScores::new(10, 10, 12, 10, 10, 10));
    let source = BenefitSource::new(SourceKind::Custom, "Blessing");
    let grants: Vec<BenefitGrant> = serde_json::from_str(
        r#"[
            {"type": "language", "name": "Celestial"},
            {"type": "tool", "name": "Herbalism Kit"},
            {"type": "ability_score", "ability": "constitution", "amount": 1}
        ]"#,
    )
    .unwrap();
    let tables = RuleTables::new();

    character.apply_grants(&source, &grants, &GrantChoices::new(), &tables).unwrap();
    character.apply_grants(&source, &grants, &GrantChoices::new(), &tables).unwrap();

    assert_eq!(character.ledger.len(), 6);
    assert_eq!(character.languages, vec!["Celestial".to_string()]);
    assert_eq!(character.tool_proficiencies, vec!["Herbalism Kit".to_string()]);
    // Ability grants are plain additions and stack
    assert_eq!(character.abilities.constitution, 14);

    assert_eq!(character.remove_all_benefits(SourceKind::Custom, "Blessing"), 6);
    assert_eq!(character.abilities.constitution, 12);
    assert!(character.languages.is_empty());
}

#[test]
fn removing_unknown_source_is_noop() {
    let (mut character, _) = fighter();
    let before = character.clone();
    assert_eq!(character.remove_all_benefits(SourceKind::Feat, "Nonexistent"), 0);
    assert_eq!(character, before);
}

#[test]
fn origin_grants_are_recorded_and_removed_with_replacement() {
    let tables = RuleTables::srd();
    let mut character = Character::new("Recruit", AbilityScores::new(14, 12, 13, 10, 10, 8));

    character
        .apply_origin(
            "Soldier",
            &[(Ability::Strength, 2), (Ability::Constitution, 1)],
            &GrantChoices::new(),
            &tables,
        )
        .unwrap();
    assert_eq!(character.abilities.strength, 16);
    assert_eq!(character.skill_proficiency(Skill::Athletics), Proficiency::Proficient);
    assert!(character.has_tool("Gaming Set"));
    assert!(character.has_feat("Savage Attacker"));
    assert!(character.inventory.get("Spear").is_some());
    assert_eq!(character.inventory.gold, 14);

    character
        .apply_origin(
            "Farmer",
            &[(Ability::Strength, 1), (Ability::Constitution, 1), (Ability::Wisdom, 1)],
            &GrantChoices::new(),
            &tables,
        )
        .unwrap();
    assert_eq!(character.abilities.strength, 15);
    assert_eq!(character.abilities.constitution, 14);
    assert_eq!(character.skill_proficiency(Skill::Athletics), Proficiency::None);
    assert_eq!(character.skill_proficiency(Skill::Nature), Proficiency::Proficient);
    assert!(!character.has_feat("Savage Attacker"));
    assert!(character.has_feat("Tough"));
    assert!(character.inventory.get("Spear").is_none());
    assert_eq!(character.inventory.gold, 30);
}

#[test]
fn species_replacement_swaps_grants() {
    let tables = RuleTables::srd();
    let mut character = Character::new("Wanderer", AbilityScores::default());

    let choices = GrantChoices::new().skill(Skill::Perception);
    character.apply_species("Elf", &choices, &tables).unwrap();
    assert!(character.speaks("Elvish"));
    assert!(character.has_feature("Fey Ancestry"));
    assert_eq!(character.skill_proficiency(Skill::Perception), Proficiency::Proficient);

    character.apply_species("Goliath", &GrantChoices::new(), &tables).unwrap();
    assert!(!character.speaks("Elvish"));
    assert!(character.speaks("Common"));
    assert!(!character.has_feature("Fey Ancestry"));
    assert_eq!(character.skill_proficiency(Skill::Perception), Proficiency::None);
    assert_eq!(character.speed, 35);
    assert_eq!(character.species.as_deref(), Some("Goliath"));
}

#[test]
fn sheet_survives_json_round_trip() {
    let (mut character, tables) = fighter();
    character.apply_feat("Alert", &GrantChoices::new(), &tables).unwrap();
    character.use_feature("Second Wind");

    let json = character.to_json().unwrap();
    let restored = Character::from_json(&json).unwrap();
    assert_eq!(restored, character);
    assert_eq!(restored.ledger.len(), character.ledger.len());

    let mut restored = restored;
    restored.remove_feat("Alert");
    assert_eq!(restored.initiative, restored.modifier(Ability::Dexterity));
}
