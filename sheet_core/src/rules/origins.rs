//! Origin (background) definitions

use crate::rules::{BenefitGrant, Named};
use crate::types::{Ability, Skill};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OriginDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// The three abilities the origin's boosts may go to
    #[serde(default)]
    pub ability_scores: Vec<Ability>,
    #[serde(default)]
    pub skills: Vec<Skill>,
    #[serde(default)]
    pub tool: Option<String>,
    /// Origin feat granted on application
    #[serde(default)]
    pub feat: Option<String>,
    /// Item names or gold strings such as "50 GP"
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub benefits: Vec<BenefitGrant>,
}

impl Named for OriginDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}
