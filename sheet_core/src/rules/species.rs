//! Species definitions

use crate::rules::{BenefitGrant, Named};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SpeciesDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
    /// Base walking speed in feet
    #[serde(default = "default_speed")]
    pub speed: i32,
    #[serde(default = "default_size")]
    pub size: String,
    #[serde(default)]
    pub benefits: Vec<BenefitGrant>,
}

fn default_speed() -> i32 {
    30
}

fn default_size() -> String {
    "Medium".to_string()
}

impl Named for SpeciesDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}
