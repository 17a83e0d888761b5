//! Feat definitions

use crate::rules::{BenefitGrant, Named};
use crate::types::Ability;
use serde::{Deserialize, Serialize};

/// Requirements checked before a feat can be taken
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatPrerequisite {
    /// Minimum total character level
    #[serde(default)]
    pub min_level: Option<u32>,
    /// Any one of these abilities must reach `min_score`
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub min_score: Option<i32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeatDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// "origin", "general", "fighting_style", "epic_boon"
    #[serde(default)]
    pub category: String,
    #[serde(default)]
    pub repeatable: bool,
    #[serde(default)]
    pub prerequisite: Option<FeatPrerequisite>,
    #[serde(default)]
    pub benefits: Vec<BenefitGrant>,
}

impl Named for FeatDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}
