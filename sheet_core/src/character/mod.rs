//! Character - the aggregate root of a character sheet
//!
//! Every mutation in the crate goes through `Character` and finishes with
//! `recalculate()`, so derived fields are always consistent with the rest of
//! the sheet.

mod abilities;
mod features;
mod inventory;
mod resources;
mod skills;
mod spellbook;

pub use abilities::AbilityScores;
pub use features::Feature;
pub use inventory::{Inventory, InventoryItem};
pub use skills::SkillSet;
pub use spellbook::{PactMagic, SlotPool, SpellBook, SpellSlots};

use crate::benefit::{BenefitLedger, GrantedBenefit};
use crate::error::Result;
use crate::types::{Ability, Proficiency, Skill};
use serde::{Deserialize, Serialize};

/// Base walking speed before species is applied
pub const DEFAULT_SPEED: i32 = 30;

/// Progress in one class
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassLevel {
    pub class_name: String,
    pub level: u32,
    #[serde(default)]
    pub subclass: Option<String>,
    #[serde(default)]
    pub fighting_style: Option<String>,
}

impl ClassLevel {
    /// First level in a class
    pub fn new(class_name: impl Into<String>) -> Self {
        ClassLevel {
            class_name: class_name.into(),
            level: 1,
            subclass: None,
            fighting_style: None,
        }
    }

    pub fn is(&self, class_name: &str) -> bool {
        self.class_name.eq_ignore_ascii_case(class_name)
    }
}

/// Complete character sheet state
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Character {
    // === Identity ===
    pub name: String,
    #[serde(default)]
    pub species: Option<String>,
    #[serde(default)]
    pub origin: Option<String>,

    // === Abilities & classes ===
    pub abilities: AbilityScores,
    #[serde(default)]
    pub classes: Vec<ClassLevel>,
    /// Total level (derived)
    pub level: u32,
    /// e.g. "Fighter 3 / Wizard 2" (derived)
    #[serde(default)]
    pub class_summary: String,

    // === Hit points ===
    pub max_hp: i32,
    pub current_hp: i32,
    #[serde(default)]
    pub temp_hp: i32,

    // === Movement & defense ===
    /// Stored base speed; transient bonuses only touch `effective_speed`
    pub speed: i32,
    pub effective_speed: i32,
    pub armor_class: i32,
    #[serde(default)]
    pub ac_bonus: i32,
    pub initiative: i32,
    #[serde(default)]
    pub initiative_bonus: i32,

    // === Derived numbers ===
    pub proficiency_bonus: i32,
    pub carry_capacity: i32,

    // === Proficiencies ===
    #[serde(default)]
    pub skills: SkillSet,
    #[serde(default)]
    pub saving_throws: Vec<Ability>,
    #[serde(default)]
    pub armor_proficiencies: Vec<String>,
    #[serde(default)]
    pub weapon_proficiencies: Vec<String>,
    #[serde(default)]
    pub tool_proficiencies: Vec<String>,
    #[serde(default)]
    pub languages: Vec<String>,
    #[serde(default)]
    pub resistances: Vec<String>,
    /// Keyed by lowercase target, e.g. "perception"
    #[serde(default)]
    pub passive_bonuses: std::collections::BTreeMap<String, i32>,

    // === Grants ===
    #[serde(default)]
    pub feats: Vec<String>,
    #[serde(default)]
    pub features: Vec<Feature>,
    #[serde(default)]
    pub spellbook: SpellBook,
    #[serde(default)]
    pub inventory: Inventory,
    #[serde(default)]
    pub ledger: BenefitLedger,
    /// Entries added by the current origin's feat, reversed on replacement
    #[serde(default)]
    pub origin_feat_grants: Vec<GrantedBenefit>,
}

impl Character {
    /// Create a level-0 character with the given scores
    pub fn new(name: impl Into<String>, abilities: AbilityScores) -> Self {
        let mut character = Character {
            name: name.into(),
            species: None,
            origin: None,
            abilities,
            classes: Vec::new(),
            level: 0,
            class_summary: String::new(),
            max_hp: 0,
            current_hp: 0,
            temp_hp: 0,
            speed: DEFAULT_SPEED,
            effective_speed: DEFAULT_SPEED,
            armor_class: 10,
            ac_bonus: 0,
            initiative: 0,
            initiative_bonus: 0,
            proficiency_bonus: 2,
            carry_capacity: 0,
            skills: SkillSet::new(),
            saving_throws: Vec::new(),
            armor_proficiencies: Vec::new(),
            weapon_proficiencies: Vec::new(),
            tool_proficiencies: Vec::new(),
            languages: Vec::new(),
            resistances: Vec::new(),
            passive_bonuses: Default::default(),
            feats: Vec::new(),
            features: Vec::new(),
            spellbook: SpellBook::default(),
            inventory: Inventory::new(),
            ledger: BenefitLedger::new(),
            origin_feat_grants: Vec::new(),
        };
        character.recalculate();
        character
    }

    // === Abilities ===

    pub fn score(&self, ability: Ability) -> i32 {
        self.abilities.get(ability)
    }

    pub fn modifier(&self, ability: Ability) -> i32 {
        self.abilities.modifier(ability)
    }

    // === Classes ===

    pub fn class(&self, class_name: &str) -> Option<&ClassLevel> {
        self.classes.iter().find(|c| c.is(class_name))
    }

    pub fn class_mut(&mut self, class_name: &str) -> Option<&mut ClassLevel> {
        self.classes.iter_mut().find(|c| c.is(class_name))
    }

    /// Level in one class, `None` if the class hasn't been taken
    pub fn class_level(&self, class_name: &str) -> Option<u32> {
        self.class(class_name).map(|c| c.level)
    }

    pub fn has_class(&self, class_name: &str) -> bool {
        self.class(class_name).is_some()
    }

    pub fn is_multiclassed(&self) -> bool {
        self.classes.len() > 1
    }

    // === Proficiencies & grants ===

    pub fn skill_proficiency(&self, skill: Skill) -> Proficiency {
        self.skills.get(skill)
    }

    pub fn has_feat(&self, feat: &str) -> bool {
        contains_ignore_case(&self.feats, feat)
    }

    pub fn has_feature(&self, feature: &str) -> bool {
        self.features
            .iter()
            .any(|f| f.name.eq_ignore_ascii_case(feature))
    }

    pub fn feature(&self, feature: &str) -> Option<&Feature> {
        self.features
            .iter()
            .find(|f| f.name.eq_ignore_ascii_case(feature))
    }

    pub fn speaks(&self, language: &str) -> bool {
        contains_ignore_case(&self.languages, language)
    }

    pub fn resists(&self, damage_type: &str) -> bool {
        contains_ignore_case(&self.resistances, damage_type)
    }

    pub fn has_tool(&self, tool: &str) -> bool {
        contains_ignore_case(&self.tool_proficiencies, tool)
    }

    pub fn passive_bonus(&self, target: &str) -> i32 {
        self.passive_bonuses
            .get(&target.to_lowercase())
            .copied()
            .unwrap_or(0)
    }

    // === Persistence ===

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}

pub(crate) fn contains_ignore_case(list: &[String], value: &str) -> bool {
    list.iter().any(|entry| entry.eq_ignore_ascii_case(value))
}

/// Push `value` unless an equal entry (ignoring case) is already present
pub(crate) fn push_unique(list: &mut Vec<String>, value: &str) -> bool {
    if contains_ignore_case(list, value) {
        return false;
    }
    list.push(value.to_string());
    true
}
