//! Class definitions: hit dice, proficiencies, features, spellcasting

use crate::benefit::PreparationFormula;
use crate::rules::{FeatureDefinition, Named};
use crate::types::{Ability, CasterType, Preparation, Skill};
use serde::{Deserialize, Serialize};

/// Armor, weapon and tool proficiencies granted together
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ProficiencySet {
    #[serde(default)]
    pub armor: Vec<String>,
    #[serde(default)]
    pub weapons: Vec<String>,
    #[serde(default)]
    pub tools: Vec<String>,
}

/// Skills the player picks on taking a class
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SkillChoices {
    #[serde(default)]
    pub count: u32,
    /// Empty means any skill
    #[serde(default)]
    pub options: Vec<Skill>,
}

/// Ability scores needed to multiclass into a class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AbilityRequirement {
    /// Every listed ability must meet the minimum
    AllOf(Vec<Ability>),
    /// Any one listed ability must meet the minimum
    AnyOf(Vec<Ability>),
}

impl AbilityRequirement {
    /// Check scores against `minimum`
    pub fn is_met(&self, score: impl Fn(Ability) -> i32, minimum: i32) -> bool {
        match self {
            AbilityRequirement::AllOf(abilities) => {
                abilities.iter().all(|ability| score(*ability) >= minimum)
            }
            AbilityRequirement::AnyOf(abilities) => {
                abilities.iter().any(|ability| score(*ability) >= minimum)
            }
        }
    }

    /// Human-readable form, e.g. "Strength 13 or Dexterity 13"
    pub fn describe(&self, minimum: i32) -> String {
        let (abilities, joiner) = match self {
            AbilityRequirement::AllOf(abilities) => (abilities, " and "),
            AbilityRequirement::AnyOf(abilities) => (abilities, " or "),
        };
        abilities
            .iter()
            .map(|ability| format!("{} {}", ability.name(), minimum))
            .collect::<Vec<_>>()
            .join(joiner)
    }
}

/// What a class hands out when taken as a second (or later) class
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MulticlassDefinition {
    pub requirement: AbilityRequirement,
    #[serde(default)]
    pub proficiencies: ProficiencySet,
    #[serde(default)]
    pub skill_choices: SkillChoices,
}

/// Spellcasting rules for a class or subclass
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpellcastingDefinition {
    pub ability: Ability,
    pub caster_type: CasterType,
    #[serde(default)]
    pub preparation: Preparation,
    /// Cantrips known, indexed by class level - 1
    #[serde(default)]
    pub cantrips_known: Vec<u32>,
    /// Spells known for known casters, indexed by class level - 1
    #[serde(default)]
    pub spells_known: Vec<u32>,
    /// Prepared casters only
    #[serde(default)]
    pub preparation_formula: Option<PreparationFormula>,
}

impl SpellcastingDefinition {
    pub fn cantrips_at(&self, level: u32) -> u32 {
        table_at(&self.cantrips_known, level)
    }

    pub fn spells_known_at(&self, level: u32) -> u32 {
        table_at(&self.spells_known, level)
    }
}

/// Read a level-indexed table, holding the last value past its end
fn table_at(table: &[u32], level: u32) -> u32 {
    if level == 0 || table.is_empty() {
        return 0;
    }
    let index = (level as usize - 1).min(table.len() - 1);
    table[index]
}

/// A feature unlocked at a class level
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassFeature {
    pub level: u32,
    #[serde(flatten)]
    pub feature: FeatureDefinition,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SubclassDefinition {
    pub name: String,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
    /// Subclasses such as Eldritch Knight turn a martial class into a caster
    #[serde(default)]
    pub spellcasting: Option<SpellcastingDefinition>,
}

impl SubclassDefinition {
    pub fn features_at(&self, level: u32) -> impl Iterator<Item = &FeatureDefinition> {
        self.features
            .iter()
            .filter(move |f| f.level == level)
            .map(|f| &f.feature)
    }
}

/// A class as loaded from `classes.json`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ClassDefinition {
    pub name: String,
    pub hit_die: u32,
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    #[serde(default)]
    pub proficiencies: ProficiencySet,
    #[serde(default)]
    pub skill_choices: SkillChoices,
    pub multiclass: MulticlassDefinition,
    #[serde(default)]
    pub features: Vec<ClassFeature>,
    #[serde(default)]
    pub spellcasting: Option<SpellcastingDefinition>,
    #[serde(default = "default_subclass_level")]
    pub subclass_level: u32,
    #[serde(default)]
    pub subclasses: Vec<SubclassDefinition>,
    #[serde(default = "default_asi_levels")]
    pub asi_levels: Vec<u32>,
    /// Class level that grants a fighting style, if any
    #[serde(default)]
    pub fighting_style_level: Option<u32>,
}

fn default_subclass_level() -> u32 {
    3
}

fn default_asi_levels() -> Vec<u32> {
    vec![4, 8, 12, 16, 19]
}

impl ClassDefinition {
    pub fn features_at(&self, level: u32) -> impl Iterator<Item = &FeatureDefinition> {
        self.features
            .iter()
            .filter(move |f| f.level == level)
            .map(|f| &f.feature)
    }

    pub fn subclass(&self, name: &str) -> Option<&SubclassDefinition> {
        self.subclasses
            .iter()
            .find(|s| s.name.eq_ignore_ascii_case(name))
    }

    /// Spellcasting from the class itself, or from the chosen subclass
    pub fn spellcasting_for(&self, subclass: Option<&str>) -> Option<&SpellcastingDefinition> {
        self.spellcasting.as_ref().or_else(|| {
            subclass
                .and_then(|name| self.subclass(name))
                .and_then(|s| s.spellcasting.as_ref())
        })
    }

    pub fn is_asi_level(&self, level: u32) -> bool {
        self.asi_levels.contains(&level)
    }
}

impl Named for ClassDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_requirement_any_vs_all() {
        let scores = |ability: Ability| match ability {
            Ability::Strength => 8,
            Ability::Dexterity => 14,
            Ability::Wisdom => 12,
            _ => 10,
        };
        let fighter = AbilityRequirement::AnyOf(vec![Ability::Strength, Ability::Dexterity]);
        let monk = AbilityRequirement::AllOf(vec![Ability::Dexterity, Ability::Wisdom]);
        assert!(fighter.is_met(scores, 13));
        assert!(!monk.is_met(scores, 13));
        assert_eq!(monk.describe(13), "Dexterity 13 and Wisdom 13");
    }

    #[test]
    fn test_table_at_holds_last_value() {
        assert_eq!(table_at(&[3, 3, 4], 1), 3);
        assert_eq!(table_at(&[3, 3, 4], 3), 4);
        assert_eq!(table_at(&[3, 3, 4], 20), 4);
        assert_eq!(table_at(&[3, 3, 4], 0), 0);
        assert_eq!(table_at(&[], 5), 0);
    }

    #[test]
    fn test_parse_class() {
        let json = r#"{
            "name": "Paladin",
            "hit_die": 10,
            "saving_throws": ["wisdom", "charisma"],
            "multiclass": {
                "requirement": {"all_of": ["strength", "charisma"]},
                "proficiencies": {"armor": ["Light", "Medium", "Shields"], "weapons": ["Martial"]}
            },
            "features": [{"level": 1, "name": "Lay on Hands", "uses": "1", "rest_type": "long"}],
            "spellcasting": {
                "ability": "charisma",
                "caster_type": "half",
                "preparation": "prepared",
                "preparation_formula": "half level + charisma"
            }
        }"#;
        let class: ClassDefinition = serde_json::from_str(json).unwrap();
        assert_eq!(class.subclass_level, 3);
        assert!(class.is_asi_level(4));
        assert_eq!(class.features_at(1).count(), 1);
        assert_eq!(
            class.spellcasting_for(None).map(|s| s.caster_type),
            Some(CasterType::Half)
        );
    }
}
