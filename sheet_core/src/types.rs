//! Closed vocabularies shared across the engine
//!
//! Free-text names (from user input or rule tables) are parsed into these
//! enums once, at the boundary, so business logic never matches on strings.

use crate::error::SheetError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// The six ability scores
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Ability {
    Strength,
    Dexterity,
    Constitution,
    Intelligence,
    Wisdom,
    Charisma,
}

impl Ability {
    /// Get all abilities in sheet order
    pub fn all() -> &'static [Ability] {
        &[
            Ability::Strength,
            Ability::Dexterity,
            Ability::Constitution,
            Ability::Intelligence,
            Ability::Wisdom,
            Ability::Charisma,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Ability::Strength => "Strength",
            Ability::Dexterity => "Dexterity",
            Ability::Constitution => "Constitution",
            Ability::Intelligence => "Intelligence",
            Ability::Wisdom => "Wisdom",
            Ability::Charisma => "Charisma",
        }
    }

    pub fn abbreviation(&self) -> &'static str {
        match self {
            Ability::Strength => "STR",
            Ability::Dexterity => "DEX",
            Ability::Constitution => "CON",
            Ability::Intelligence => "INT",
            Ability::Wisdom => "WIS",
            Ability::Charisma => "CHA",
        }
    }
}

impl fmt::Display for Ability {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Ability {
    type Err = SheetError;

    /// Accepts the full name or any text containing the abbreviation,
    /// case-insensitively ("Wisdom", "wis", "+1 STR").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if lowered.is_empty() {
            return Err(SheetError::UnknownAbility(s.to_string()));
        }
        Ability::all()
            .iter()
            .copied()
            .find(|ability| {
                lowered.contains(&ability.abbreviation().to_lowercase())
                    || ability.name().to_lowercase().starts_with(&lowered)
            })
            .ok_or_else(|| SheetError::UnknownAbility(s.to_string()))
    }
}

/// The eighteen skills, each governed by one ability
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Skill {
    Acrobatics,
    AnimalHandling,
    Arcana,
    Athletics,
    Deception,
    History,
    Insight,
    Intimidation,
    Investigation,
    Medicine,
    Nature,
    Perception,
    Performance,
    Persuasion,
    Religion,
    SleightOfHand,
    Stealth,
    Survival,
}

impl Skill {
    /// Get all skills in alphabetical order
    pub fn all() -> &'static [Skill] {
        &[
            Skill::Acrobatics,
            Skill::AnimalHandling,
            Skill::Arcana,
            Skill::Athletics,
            Skill::Deception,
            Skill::History,
            Skill::Insight,
            Skill::Intimidation,
            Skill::Investigation,
            Skill::Medicine,
            Skill::Nature,
            Skill::Perception,
            Skill::Performance,
            Skill::Persuasion,
            Skill::Religion,
            Skill::SleightOfHand,
            Skill::Stealth,
            Skill::Survival,
        ]
    }

    pub fn name(&self) -> &'static str {
        match self {
            Skill::Acrobatics => "Acrobatics",
            Skill::AnimalHandling => "Animal Handling",
            Skill::Arcana => "Arcana",
            Skill::Athletics => "Athletics",
            Skill::Deception => "Deception",
            Skill::History => "History",
            Skill::Insight => "Insight",
            Skill::Intimidation => "Intimidation",
            Skill::Investigation => "Investigation",
            Skill::Medicine => "Medicine",
            Skill::Nature => "Nature",
            Skill::Perception => "Perception",
            Skill::Performance => "Performance",
            Skill::Persuasion => "Persuasion",
            Skill::Religion => "Religion",
            Skill::SleightOfHand => "Sleight of Hand",
            Skill::Stealth => "Stealth",
            Skill::Survival => "Survival",
        }
    }

    /// The ability that governs this skill
    pub fn ability(&self) -> Ability {
        match self {
            Skill::Athletics => Ability::Strength,
            Skill::Acrobatics | Skill::SleightOfHand | Skill::Stealth => Ability::Dexterity,
            Skill::Arcana
            | Skill::History
            | Skill::Investigation
            | Skill::Nature
            | Skill::Religion => Ability::Intelligence,
            Skill::AnimalHandling
            | Skill::Insight
            | Skill::Medicine
            | Skill::Perception
            | Skill::Survival => Ability::Wisdom,
            Skill::Deception | Skill::Intimidation | Skill::Performance | Skill::Persuasion => {
                Ability::Charisma
            }
        }
    }
}

impl fmt::Display for Skill {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Strip everything but letters so "Sleight of Hand", "sleight_of_hand" and
/// "SleightOfHand" compare equal.
fn normalize_name(s: &str) -> String {
    s.chars()
        .filter(|c| c.is_ascii_alphabetic())
        .map(|c| c.to_ascii_lowercase())
        .collect()
}

impl FromStr for Skill {
    type Err = SheetError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = normalize_name(s);
        Skill::all()
            .iter()
            .copied()
            .find(|skill| normalize_name(skill.name()) == wanted)
            .ok_or_else(|| SheetError::UnknownSkill(s.to_string()))
    }
}

/// Tri-state skill proficiency
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Proficiency {
    #[default]
    None,
    Proficient,
    Expertise,
}

impl Proficiency {
    /// One step up; Expertise is terminal
    pub fn upgraded(self) -> Proficiency {
        match self {
            Proficiency::None => Proficiency::Proficient,
            Proficiency::Proficient | Proficiency::Expertise => Proficiency::Expertise,
        }
    }

    /// How many times the proficiency bonus applies
    pub fn multiplier(self) -> i32 {
        match self {
            Proficiency::None => 0,
            Proficiency::Proficient => 1,
            Proficiency::Expertise => 2,
        }
    }

    /// Numeric form stored in ledger entries
    pub fn as_value(self) -> i32 {
        self.multiplier()
    }

    pub fn from_value(value: i32) -> Proficiency {
        match value {
            v if v <= 0 => Proficiency::None,
            1 => Proficiency::Proficient,
            _ => Proficiency::Expertise,
        }
    }
}

/// When a limited-use feature recharges
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RestType {
    Short,
    #[default]
    Long,
    /// Passive or never recharges
    None,
}

/// Every kind of mechanical grant the ledger tracks
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BenefitKind {
    AbilityScore,
    SkillProficiency,
    Language,
    Resistance,
    ToolProficiency,
    Speed,
    HitPoints,
    Initiative,
    ArmorClass,
    PassiveBonus,
    Feature,
    Spell,
    Item,
}

impl BenefitKind {
    /// Kinds whose underlying list entry is shared between sources
    pub fn is_reference_counted(&self) -> bool {
        matches!(
            self,
            BenefitKind::Language
                | BenefitKind::Resistance
                | BenefitKind::ToolProficiency
                | BenefitKind::Spell
        )
    }
}

impl fmt::Display for BenefitKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BenefitKind::AbilityScore => "ability score",
            BenefitKind::SkillProficiency => "skill proficiency",
            BenefitKind::Language => "language",
            BenefitKind::Resistance => "resistance",
            BenefitKind::ToolProficiency => "tool proficiency",
            BenefitKind::Speed => "speed",
            BenefitKind::HitPoints => "hit points",
            BenefitKind::Initiative => "initiative",
            BenefitKind::ArmorClass => "armor class",
            BenefitKind::PassiveBonus => "passive bonus",
            BenefitKind::Feature => "feature",
            BenefitKind::Spell => "spell",
            BenefitKind::Item => "item",
        };
        f.write_str(label)
    }
}

/// What granted a benefit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Feat,
    Species,
    Origin,
    Class,
    Subclass,
    AbilityScoreImprovement,
    FightingStyle,
    Custom,
}

impl SourceKind {
    pub fn label(&self) -> &'static str {
        match self {
            SourceKind::Feat => "feat",
            SourceKind::Species => "species",
            SourceKind::Origin => "origin",
            SourceKind::Class => "class",
            SourceKind::Subclass => "subclass",
            SourceKind::AbilityScoreImprovement => "asi",
            SourceKind::FightingStyle => "fighting_style",
            SourceKind::Custom => "custom",
        }
    }
}

impl fmt::Display for SourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// How a class's levels feed the shared spell-slot pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CasterType {
    Full,
    Half,
    Third,
    /// Warlock Pact Magic, tracked outside the shared pool
    Pact,
}

impl CasterType {
    /// Contribution of `level` class levels to the effective caster level
    pub fn effective_levels(&self, level: u32) -> u32 {
        match self {
            CasterType::Full => level,
            CasterType::Half => level / 2,
            CasterType::Third => level / 3,
            CasterType::Pact => 0,
        }
    }
}

/// How a spellcasting class chooses its spells
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Preparation {
    /// Prepares from the full class list each day
    #[default]
    Prepared,
    /// Picks a fixed set of known spells
    Known,
    /// Copies spells into a spellbook
    Spellbook,
}

impl Preparation {
    /// Whether a level-up asks the player to pick spells
    pub fn requires_selection(&self) -> bool {
        matches!(self, Preparation::Known | Preparation::Spellbook)
    }
}

/// Armor weight category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ArmorCategory {
    Light,
    Medium,
    Heavy,
}

/// How hit points are gained on level-up
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HpGain {
    #[default]
    Roll,
    Average,
    /// Full hit die, used for a character's first level
    Maximum,
}
