//! Error types for character sheet operations

use crate::types::Ability;
use thiserror::Error;

/// Errors surfaced to callers of the engine
///
/// Every variant is raised before the character is mutated.
#[derive(Error, Debug)]
pub enum SheetError {
    #[error("unknown ability: {0}")]
    UnknownAbility(String),

    #[error("unknown skill: {0}")]
    UnknownSkill(String),

    /// Ability boost amounts don't add up to an allowed pattern
    #[error("invalid ability boost: {0}")]
    InvalidAbilityBoost(String),

    #[error("cannot multiclass into {class}: requires {requirement}")]
    MulticlassPrerequisite { class: String, requirement: String },

    #[error("prerequisite not met for feat {feat}: {reason}")]
    FeatPrerequisite { feat: String, reason: String },

    #[error("character already has feat {0}")]
    AlreadyHasFeat(String),

    #[error("missing choice: {0}")]
    MissingChoice(String),

    #[error("{0} is already at the maximum level")]
    LevelCap(String),

    #[error("ability {ability} cannot be boosted by {amount}")]
    BoostOutOfRange { ability: Ability, amount: i32 },

    #[error("class not found: {0}")]
    ClassNotFound(String),

    #[error("subclass {subclass} not found for class {class}")]
    SubclassNotFound { class: String, subclass: String },

    #[error("feat not found: {0}")]
    FeatNotFound(String),

    #[error("species not found: {0}")]
    SpeciesNotFound(String),

    #[error("origin not found: {0}")]
    OriginNotFound(String),

    #[error("{class} chooses a subclass at level {level}")]
    SubclassTooEarly { class: String, level: u32 },

    #[error("fighting style not found: {0}")]
    FightingStyleNotFound(String),

    #[error("{class} does not grant a fighting style")]
    NoFightingStyle { class: String },

    /// Saved character could not be encoded or decoded
    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, SheetError>;
