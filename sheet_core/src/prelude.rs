//! Prelude module for convenient imports
//!
//! ```rust
//! use sheet_core::prelude::*;
//! ```

// Character state
pub use crate::character::{AbilityScores, Character, ClassLevel, Feature, InventoryItem};

// Ledger
pub use crate::benefit::{BenefitLedger, BenefitSource, GrantedBenefit};

// Leveling
pub use crate::leveling::{LevelUpOptions, LevelUpResult};

// Sources
pub use crate::source::{BenefitProvider, GrantChoices};

// Rules and dice
pub use crate::dice::{DiceRoller, ScriptedRoller, StdDiceRoller};
pub use crate::rules::RuleTables;

// Errors and vocabularies
pub use crate::error::{Result, SheetError};
pub use crate::types::{Ability, BenefitKind, HpGain, Proficiency, RestType, Skill, SourceKind};
