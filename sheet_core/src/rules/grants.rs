//! Benefit grants as they appear in rule tables

use crate::rules::FeatureDefinition;
use crate::types::{Ability, Skill};
use serde::{Deserialize, Serialize};

/// One mechanical effect a feat, species or origin hands out
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum BenefitGrant {
    AbilityScore {
        ability: Ability,
        amount: i32,
    },
    /// Player picks one of `options`
    AbilityChoice {
        options: Vec<Ability>,
        amount: i32,
    },
    Skill {
        skill: Skill,
    },
    /// Player picks `count` skills from `options` (any skill when empty)
    SkillChoice {
        #[serde(default)]
        options: Vec<Skill>,
        count: u32,
    },
    Language {
        name: String,
    },
    Resistance {
        damage_type: String,
    },
    Tool {
        name: String,
    },
    Speed {
        amount: i32,
    },
    HitPoints {
        amount: i32,
        /// Multiply by total level at grant time
        #[serde(default)]
        per_level: bool,
    },
    Initiative {
        amount: i32,
        /// Add the proficiency bonus instead of a flat amount
        #[serde(default)]
        proficiency: bool,
    },
    ArmorClass {
        amount: i32,
    },
    PassiveBonus {
        target: String,
        amount: i32,
    },
    Feature {
        feature: FeatureDefinition,
    },
    Spell {
        name: String,
    },
    Item {
        name: String,
    },
}

impl BenefitGrant {
    /// Whether applying this grant needs a player choice
    pub fn needs_choice(&self) -> bool {
        matches!(
            self,
            BenefitGrant::AbilityChoice { .. } | BenefitGrant::SkillChoice { .. }
        )
    }
}
