//! Fighting style definitions

use crate::rules::Named;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FightingStyleDefinition {
    pub name: String,
    #[serde(default)]
    pub description: String,
}

impl Named for FightingStyleDefinition {
    fn name(&self) -> &str {
        &self.name
    }
}
