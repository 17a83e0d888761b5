//! Leveling - class advancement and multiclassing
//!
//! `Character::level_up` validates everything first and only then mutates,
//! so a failed level-up leaves the sheet exactly as it was.

mod multiclass;
mod spell_slots;

pub use multiclass::check_multiclass_prerequisites;
pub use spell_slots::{
    aggregate_spell_slots, effective_caster_level, pact_magic, pact_slots,
    slots_for_caster_level,
};

use crate::benefit::BenefitSource;
use crate::character::{push_unique, Character, ClassLevel};
use crate::derived::{max_hp_for_level, roll_hp};
use crate::dice::DiceRoller;
use crate::error::{Result, SheetError};
use crate::rules::{ClassDefinition, FeatureDefinition, RuleTables};
use crate::types::{Ability, CasterType, HpGain, Skill, SourceKind};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Player decisions supplied with a level-up
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpOptions {
    /// Overrides the configured HP gain
    #[serde(default)]
    pub hp_gain: Option<HpGain>,
    #[serde(default)]
    pub subclass: Option<String>,
    #[serde(default)]
    pub fighting_style: Option<String>,
}

impl LevelUpOptions {
    pub fn with_hp_gain(hp_gain: HpGain) -> Self {
        LevelUpOptions {
            hp_gain: Some(hp_gain),
            ..Default::default()
        }
    }
}

/// What changed, and what the caller still has to ask the player
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelUpResult {
    pub class_name: String,
    pub class_level: u32,
    pub total_level: u32,
    pub hp_gained: i32,
    pub features_gained: Vec<String>,
    /// Class level reached the subclass level with no subclass chosen
    pub requires_subclass: bool,
    /// Known or spellbook casters pick their new spells
    pub requires_spell_selection: bool,
    /// Skills to pick, and the list they come from (empty means any)
    pub skill_choices: u32,
    pub skill_options: Vec<Skill>,
    pub cantrips_known: u32,
    pub asi_available: bool,
}

impl Character {
    /// Gain one level in `class_name`
    pub fn level_up(
        &mut self,
        class_name: &str,
        options: &LevelUpOptions,
        tables: &RuleTables,
        roller: &mut dyn DiceRoller,
    ) -> Result<LevelUpResult> {
        let class = tables
            .class(class_name)
            .ok_or_else(|| SheetError::ClassNotFound(class_name.to_string()))?;
        let leveling = &tables.config.leveling;

        // === Validate ===
        let previous = self.class(&class.name).map(|c| c.level);
        let class_level = previous.map_or(1, |level| level + 1);
        if class_level > leveling.max_level || self.level >= leveling.max_level {
            return Err(SheetError::LevelCap(class.name.clone()));
        }
        let first_class = self.classes.is_empty();
        if previous.is_none() && !first_class {
            check_multiclass_prerequisites(self, class, leveling.multiclass_minimum)?;
        }

        let current_subclass = self.class(&class.name).and_then(|c| c.subclass.clone());
        let new_subclass = match (&options.subclass, &current_subclass) {
            (Some(requested), None) => {
                let subclass = class.subclass(requested).ok_or_else(|| {
                    SheetError::SubclassNotFound {
                        class: class.name.clone(),
                        subclass: requested.clone(),
                    }
                })?;
                if class_level < class.subclass_level {
                    return Err(SheetError::SubclassTooEarly {
                        class: class.name.clone(),
                        level: class.subclass_level,
                    });
                }
                Some(subclass.name.clone())
            }
            _ => None,
        };

        let fighting_style = match &options.fighting_style {
            Some(requested) => Some(validate_fighting_style(class, requested, tables)?),
            None => None,
        };

        // === Mutate ===
        match self.class_mut(&class.name) {
            Some(entry) => entry.level = class_level,
            None => self.classes.push(ClassLevel::new(class.name.clone())),
        }
        if let Some(entry) = self.class_mut(&class.name) {
            if new_subclass.is_some() {
                entry.subclass = new_subclass.clone();
            }
            if fighting_style.is_some() {
                entry.fighting_style = fighting_style;
            }
        }
        let subclass_chosen = new_subclass.is_some();
        let subclass = new_subclass.or(current_subclass);
        self.recalculate();

        let hp_gained = self.gain_hit_points(class, first_class, options, leveling.default_hp_gain, roller);

        let (skill_choices, skill_options) = if first_class {
            self.grant_class_proficiencies(class);
            (class.skill_choices.count, class.skill_choices.options.clone())
        } else if previous.is_none() {
            self.grant_multiclass_proficiencies(class);
            let choices = &class.multiclass.skill_choices;
            (choices.count, choices.options.clone())
        } else {
            (0, Vec::new())
        };

        let mut features_gained = self.grant_class_features(class, class_level, tables);
        if let Some(name) = subclass.as_deref() {
            // A subclass picked late still gets its earlier features
            let from_level = if subclass_chosen { 1 } else { class_level };
            features_gained.extend(self.grant_subclass_features(class, name, from_level, class_level, tables));
        }
        self.rescale_features(tables);

        let spellcasting = class.spellcasting_for(subclass.as_deref());
        if let Some(spellcasting) = spellcasting {
            if self.spellbook.ability.is_none() {
                self.spellbook.ability = Some(spellcasting.ability);
                self.spellbook.casting_class = Some(class.name.clone());
                self.spellbook.preparation = Some(spellcasting.preparation);
                self.spellbook.preparation_formula = spellcasting.preparation_formula.clone();
            }
            let casting_class = self.spellbook.casting_class.as_deref();
            if casting_class.is_some_and(|c| c.eq_ignore_ascii_case(&class.name)) {
                self.spellbook.cantrips_known = spellcasting.cantrips_at(class_level);
                self.spellbook.spells_known = spellcasting.spells_known_at(class_level);
            }
        }
        self.rebuild_spell_slots(tables);

        let requires_subclass = class_level == class.subclass_level && subclass.is_none();
        let asi_available = class.is_asi_level(class_level);

        self.recalculate();

        info!(
            character = %self.name,
            class = %class.name,
            class_level,
            total_level = self.level,
            hp_gained,
            "level up"
        );

        Ok(LevelUpResult {
            class_name: class.name.clone(),
            class_level,
            total_level: self.level,
            hp_gained,
            features_gained,
            requires_subclass,
            requires_spell_selection: spellcasting
                .map(|s| s.preparation.requires_selection())
                .unwrap_or(false),
            skill_choices,
            skill_options,
            cantrips_known: spellcasting.map(|s| s.cantrips_at(class_level)).unwrap_or(0),
            asi_available,
        })
    }

    fn gain_hit_points(
        &mut self,
        class: &ClassDefinition,
        first_class: bool,
        options: &LevelUpOptions,
        default_gain: HpGain,
        roller: &mut dyn DiceRoller,
    ) -> i32 {
        let con_mod = self.modifier(Ability::Constitution);
        let gain = options.hp_gain.unwrap_or(if first_class {
            HpGain::Maximum
        } else {
            default_gain
        });
        let hp = match gain {
            HpGain::Maximum => max_hp_for_level(class.hit_die, con_mod),
            HpGain::Average => roll_hp(roller, class.hit_die, con_mod, true),
            HpGain::Roll => roll_hp(roller, class.hit_die, con_mod, false),
        };
        self.max_hp += hp;
        self.current_hp += hp;
        hp
    }

    fn grant_class_proficiencies(&mut self, class: &ClassDefinition) {
        for ability in &class.saving_throws {
            if !self.saving_throws.contains(ability) {
                self.saving_throws.push(*ability);
            }
        }
        for armor in &class.proficiencies.armor {
            push_unique(&mut self.armor_proficiencies, armor);
        }
        for weapon in &class.proficiencies.weapons {
            push_unique(&mut self.weapon_proficiencies, weapon);
        }
        let source = BenefitSource::class(class.name.clone());
        for tool in &class.proficiencies.tools {
            self.grant_tool(&source, tool);
        }
    }

    fn grant_multiclass_proficiencies(&mut self, class: &ClassDefinition) {
        let proficiencies = &class.multiclass.proficiencies;
        for armor in &proficiencies.armor {
            push_unique(&mut self.armor_proficiencies, armor);
        }
        for weapon in &proficiencies.weapons {
            push_unique(&mut self.weapon_proficiencies, weapon);
        }
        let source = BenefitSource::class(class.name.clone());
        for tool in &proficiencies.tools {
            self.grant_tool(&source, tool);
        }
    }

    /// Level 1 features are attached directly; later ones go through the ledger
    fn grant_class_features(
        &mut self,
        class: &ClassDefinition,
        class_level: u32,
        tables: &RuleTables,
    ) -> Vec<String> {
        let source = BenefitSource::class(class.name.clone());
        let mut gained = Vec::new();
        for definition in class.features_at(class_level) {
            if class_level == 1 {
                let feature =
                    self.build_feature(&source, definition, Some(&class.name), &tables.feature_scaling);
                self.features.push(feature);
            } else {
                self.grant_feature(&source, definition, Some(&class.name), &tables.feature_scaling);
            }
            gained.push(definition.name.clone());
        }
        gained
    }

    fn grant_subclass_features(
        &mut self,
        class: &ClassDefinition,
        subclass: &str,
        from_level: u32,
        to_level: u32,
        tables: &RuleTables,
    ) -> Vec<String> {
        let Some(definition) = class.subclass(subclass) else {
            return Vec::new();
        };
        let source = BenefitSource::new(SourceKind::Subclass, definition.name.clone());
        let features: Vec<&FeatureDefinition> = (from_level..=to_level)
            .flat_map(|level| definition.features_at(level))
            .collect();
        let mut gained = Vec::new();
        for feature in features {
            self.grant_feature(&source, feature, Some(&class.name), &tables.feature_scaling);
            gained.push(feature.name.clone());
        }
        gained
    }

    /// Re-evaluate max uses of every formula-driven feature
    fn rescale_features(&mut self, tables: &RuleTables) {
        let updates: Vec<(usize, i32)> = self
            .features
            .iter()
            .enumerate()
            .filter_map(|(index, feature)| {
                let formula = feature.uses.as_ref()?;
                let max_uses = formula
                    .evaluate(self, feature.class.as_deref(), &feature.name, &tables.feature_scaling)
                    .max(0);
                (max_uses != feature.max_uses).then_some((index, max_uses))
            })
            .collect();
        for (index, max_uses) in updates {
            self.features[index].rescale(max_uses);
        }
    }

    /// Rebuild the shared slot pool and Pact Magic from every class
    pub fn rebuild_spell_slots(&mut self, tables: &RuleTables) {
        let casters: Vec<(CasterType, u32)> = self
            .classes
            .iter()
            .filter_map(|entry| {
                let class = tables.class(&entry.class_name)?;
                let spellcasting = class.spellcasting_for(entry.subclass.as_deref())?;
                Some((spellcasting.caster_type, entry.level))
            })
            .collect();
        self.spellbook.slots = aggregate_spell_slots(&casters);
        self.spellbook.pact_magic = pact_magic(&casters);
    }
}

fn validate_fighting_style(
    class: &ClassDefinition,
    requested: &str,
    tables: &RuleTables,
) -> Result<String> {
    if class.fighting_style_level.is_none() {
        return Err(SheetError::NoFightingStyle {
            class: class.name.clone(),
        });
    }
    tables
        .fighting_styles
        .get_by_name(requested)
        .map(|style| style.name.clone())
        .ok_or_else(|| SheetError::FightingStyleNotFound(requested.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::character::AbilityScores;
    use crate::dice::ScriptedRoller;
    use crate::rules::{FightingStyleDefinition, Table};
    use serde_json::json;

    fn tables() -> RuleTables {
        let mut tables = RuleTables::new();
        let classes = json!([
            {
                "name": "Fighter",
                "hit_die": 10,
                "saving_throws": ["strength", "constitution"],
                "proficiencies": {"armor": ["Light", "Medium", "Heavy", "Shields"], "weapons": ["Simple", "Martial"]},
                "skill_choices": {"count": 2, "options": ["athletics", "perception"]},
                "multiclass": {
                    "requirement": {"any_of": ["strength", "dexterity"]},
                    "proficiencies": {"armor": ["Light", "Medium", "Shields"], "weapons": ["Martial"]}
                },
                "features": [
                    {"level": 1, "name": "Second Wind", "uses": "scaling", "rest_type": "short"},
                    {"level": 2, "name": "Action Surge", "uses": "1", "rest_type": "short"}
                ],
                "fighting_style_level": 1,
                "subclasses": [
                    {
                        "name": "Eldritch Knight",
                        "features": [{"level": 3, "name": "Weapon Bond"}],
                        "spellcasting": {"ability": "intelligence", "caster_type": "third", "preparation": "known", "cantrips_known": [0, 0, 2]}
                    }
                ]
            },
            {
                "name": "Wizard",
                "hit_die": 6,
                "saving_throws": ["intelligence", "wisdom"],
                "skill_choices": {"count": 2},
                "multiclass": {"requirement": {"all_of": ["intelligence"]}},
                "features": [{"level": 1, "name": "Arcane Recovery", "uses": "1", "rest_type": "long"}],
                "subclass_level": 2,
                "spellcasting": {
                    "ability": "intelligence",
                    "caster_type": "full",
                    "preparation": "spellbook",
                    "cantrips_known": [3, 3, 3, 4],
                    "preparation_formula": "level + intelligence"
                }
            },
            {
                "name": "Monk",
                "hit_die": 8,
                "multiclass": {"requirement": {"all_of": ["dexterity", "wisdom"]}}
            },
            {
                "name": "Cleric",
                "hit_die": 8,
                "multiclass": {"requirement": {"all_of": ["wisdom"]}},
                "subclass_level": 1,
                "subclasses": [
                    {"name": "Life Domain", "features": [{"level": 1, "name": "Disciple of Life"}]}
                ]
            }
        ]);
        tables.classes = Table::new(serde_json::from_value(classes).unwrap());
        tables.fighting_styles = Table::new(vec![FightingStyleDefinition {
            name: "Defense".to_string(),
            description: String::new(),
        }]);
        tables.feature_scaling = serde_json::from_value(json!([
            {"class": "Fighter", "feature": "Second Wind", "progression": [[1, 2], [4, 3]]}
        ]))
        .unwrap();
        tables
    }

    fn fighter() -> Character {
        Character::new("Brom", AbilityScores::new(16, 12, 14, 13, 10, 8))
    }

    #[test]
    fn test_first_level_takes_max_hp_and_full_proficiencies() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        let result = character
            .level_up("fighter", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();

        assert_eq!(result.class_name, "Fighter");
        assert_eq!(result.hp_gained, 12);
        assert_eq!(character.max_hp, 12);
        assert_eq!(character.current_hp, 12);
        assert_eq!(character.saving_throws, vec![Ability::Strength, Ability::Constitution]);
        assert!(character.armor_proficiencies.contains(&"Heavy".to_string()));
        assert_eq!(result.skill_choices, 2);
        assert_eq!(result.skill_options, vec![Skill::Athletics, Skill::Perception]);
        assert_eq!(result.features_gained, vec!["Second Wind".to_string()]);
        // Level 1 features bypass the ledger
        assert!(character.ledger.is_empty());
        assert_eq!(character.feature("Second Wind").unwrap().max_uses, 2);
    }

    #[test]
    fn test_later_levels_use_configured_gain_and_ledger() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        let result = character
            .level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();
        // d10 average 6 + Con 2
        assert_eq!(result.hp_gained, 8);
        assert_eq!(result.skill_choices, 0);
        assert!(character
            .ledger
            .has_source(SourceKind::Class, "Fighter"));

        let rolled = character
            .level_up("Fighter", &LevelUpOptions::with_hp_gain(HpGain::Roll), &tables, &mut roller)
            .unwrap();
        assert_eq!(rolled.hp_gained, 3);
        assert!(rolled.requires_subclass);
    }

    #[test]
    fn test_scaling_features_rescale() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(5);
        for _ in 0..4 {
            character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        }
        assert_eq!(character.feature("Second Wind").unwrap().max_uses, 3);
    }

    #[test]
    fn test_multiclass_prerequisite_blocks_without_mutation() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        let before = character.clone();
        let err = character
            .level_up("Monk", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap_err();
        assert!(matches!(err, SheetError::MulticlassPrerequisite { .. }));
        assert_eq!(character, before);
    }

    #[test]
    fn test_multiclass_wizard_gets_limited_set() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        let result = character
            .level_up("Wizard", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();
        assert_eq!(character.saving_throws.len(), 2);
        assert_eq!(result.skill_choices, 0);
        assert!(result.requires_spell_selection);
        assert_eq!(result.cantrips_known, 3);
        assert_eq!(character.spellbook.ability, Some(Ability::Intelligence));
        assert_eq!(character.spellbook.slots.max_at(1), 2);
        assert_eq!(character.class_summary, "Fighter 1 / Wizard 1");
        // Average d6 (4) + Con 2
        assert_eq!(result.hp_gained, 6);
    }

    #[test]
    fn test_unknown_class_subclass_and_style() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        assert!(matches!(
            character.level_up("Artificer", &LevelUpOptions::default(), &tables, &mut roller),
            Err(SheetError::ClassNotFound(_))
        ));
        let style = LevelUpOptions {
            fighting_style: Some("Archery".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            character.level_up("Fighter", &style, &tables, &mut roller),
            Err(SheetError::FightingStyleNotFound(_))
        ));
        let early = LevelUpOptions {
            subclass: Some("Eldritch Knight".to_string()),
            ..Default::default()
        };
        assert!(matches!(
            character.level_up("Fighter", &early, &tables, &mut roller),
            Err(SheetError::SubclassTooEarly { .. })
        ));
        assert!(character.classes.is_empty());
    }

    #[test]
    fn test_first_level_subclass_flag() {
        let tables = tables();
        let mut roller = ScriptedRoller::always(1);

        let mut character = fighter();
        let result = character
            .level_up("Cleric", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();
        assert!(result.requires_subclass);

        let mut character = fighter();
        let options = LevelUpOptions {
            subclass: Some("Life Domain".to_string()),
            ..Default::default()
        };
        let result = character.level_up("Cleric", &options, &tables, &mut roller).unwrap();
        assert!(!result.requires_subclass);
        assert!(result.features_gained.contains(&"Disciple of Life".to_string()));
        assert!(character.has_feature("Disciple of Life"));
    }

    #[test]
    fn test_second_level_subclass_flag() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        let first = character
            .level_up("Wizard", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();
        assert!(!first.requires_subclass);
        let second = character
            .level_up("Wizard", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();
        assert!(second.requires_subclass);
        let third = character
            .level_up("Wizard", &LevelUpOptions::default(), &tables, &mut roller)
            .unwrap();
        assert!(!third.requires_subclass);
    }

    #[test]
    fn test_fighting_style_recorded() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        let options = LevelUpOptions {
            fighting_style: Some("defense".to_string()),
            ..Default::default()
        };
        character.level_up("Fighter", &options, &tables, &mut roller).unwrap();
        assert_eq!(
            character.class("Fighter").unwrap().fighting_style.as_deref(),
            Some("Defense")
        );
    }

    #[test]
    fn test_subclass_turns_on_spellcasting() {
        let tables = tables();
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        let options = LevelUpOptions {
            subclass: Some("eldritch knight".to_string()),
            ..Default::default()
        };
        let result = character.level_up("Fighter", &options, &tables, &mut roller).unwrap();
        assert!(!result.requires_subclass);
        assert!(result.features_gained.contains(&"Weapon Bond".to_string()));
        assert!(character.ledger.has_source(SourceKind::Subclass, "Eldritch Knight"));
        assert_eq!(character.spellbook.cantrips_known, 2);
        // Third caster 3 / 3 = 1
        assert_eq!(character.spellbook.slots.max_at(1), 2);
    }

    #[test]
    fn test_level_cap() {
        let mut tables = tables();
        tables.config.leveling.max_level = 2;
        let mut character = fighter();
        let mut roller = ScriptedRoller::always(1);
        character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller).unwrap();
        assert!(matches!(
            character.level_up("Fighter", &LevelUpOptions::default(), &tables, &mut roller),
            Err(SheetError::LevelCap(_))
        ));
        assert!(matches!(
            character.level_up("Wizard", &LevelUpOptions::default(), &tables, &mut roller),
            Err(SheetError::LevelCap(_))
        ));
    }
}
