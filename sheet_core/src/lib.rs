//! sheet_core - Rules engine for tabletop character sheets
//!
//! This library provides:
//! - Character: the sheet itself, with every derived stat kept in sync
//! - BenefitLedger: a reversible record of every mechanical grant
//! - Leveling: class advancement, multiclassing and spell-slot aggregation
//! - Benefit sources: feats, species, origins and ability score improvements
//! - RuleTables: name-keyed rule data loaded from JSON

pub mod benefit;
pub mod character;
pub mod config;
pub mod derived;
pub mod dice;
pub mod error;
pub mod leveling;
pub mod prelude;
pub mod rules;
pub mod source;
pub mod types;

// Re-export core types for convenience
pub use benefit::{BenefitLedger, BenefitSource, GrantedBenefit, UsesFormula};
pub use character::{AbilityScores, Character, ClassLevel, Feature, Inventory, SpellBook};
pub use config::{default_config, ConfigError, SheetConfig};
pub use dice::{DiceRoller, ScriptedRoller, StdDiceRoller};
pub use error::{Result, SheetError};
pub use leveling::{LevelUpOptions, LevelUpResult};
pub use rules::{BenefitGrant, RuleTables, Table};
pub use source::{BenefitProvider, GrantChoices};
pub use types::{Ability, BenefitKind, HpGain, Proficiency, RestType, Skill, SourceKind};
