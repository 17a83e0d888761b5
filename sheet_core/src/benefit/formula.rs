//! Uses and spell-preparation formulas
//!
//! Rule tables spell these as short strings ("proficiency", "wisdom",
//! "level + intelligence"). They are parsed once into the enums below.

use crate::character::Character;
use crate::rules::FeatureScaling;
use crate::types::Ability;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// How many uses a limited feature gets
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum UsesFormula {
    Constant(i32),
    ProficiencyBonus,
    /// Level in the granting class, or total level when no class applies
    Level,
    /// Ability modifier, minimum 1
    AbilityModifier(Ability),
    /// Looked up in the per-class feature scaling table
    Scaling,
}

/// Formula parse failure
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unrecognised formula: {0}")]
pub struct FormulaParseError(pub String);

impl FromStr for UsesFormula {
    type Err = FormulaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let lowered = s.trim().to_lowercase();
        if let Ok(value) = lowered.parse::<i32>() {
            return Ok(UsesFormula::Constant(value));
        }
        match lowered.as_str() {
            "proficiency" | "proficiency bonus" | "proficiency_bonus" | "pb" => {
                Ok(UsesFormula::ProficiencyBonus)
            }
            "level" | "class level" | "class_level" => Ok(UsesFormula::Level),
            "scaling" | "table" => Ok(UsesFormula::Scaling),
            other => {
                let stripped = other
                    .trim_end_matches("modifier")
                    .trim_end_matches("mod")
                    .trim();
                stripped
                    .parse::<Ability>()
                    .map(UsesFormula::AbilityModifier)
                    .map_err(|_| FormulaParseError(s.to_string()))
            }
        }
    }
}

impl TryFrom<String> for UsesFormula {
    type Error = FormulaParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for UsesFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UsesFormula::Constant(value) => write!(f, "{}", value),
            UsesFormula::ProficiencyBonus => f.write_str("proficiency"),
            UsesFormula::Level => f.write_str("level"),
            UsesFormula::AbilityModifier(ability) => {
                f.write_str(&ability.name().to_lowercase())
            }
            UsesFormula::Scaling => f.write_str("scaling"),
        }
    }
}

impl From<UsesFormula> for String {
    fn from(value: UsesFormula) -> Self {
        value.to_string()
    }
}

impl UsesFormula {
    /// Evaluate max uses for `feature` against the character
    pub fn evaluate(
        &self,
        character: &Character,
        class_name: Option<&str>,
        feature: &str,
        scaling: &FeatureScaling,
    ) -> i32 {
        let class_level = class_name
            .and_then(|name| character.class_level(name))
            .unwrap_or(character.level);

        match self {
            UsesFormula::Constant(value) => *value,
            UsesFormula::ProficiencyBonus => character.proficiency_bonus,
            UsesFormula::Level => class_level as i32,
            UsesFormula::AbilityModifier(ability) => character.modifier(*ability).max(1),
            UsesFormula::Scaling => class_name
                .and_then(|name| scaling.lookup(name, feature, class_level))
                .unwrap_or(0),
        }
    }
}

/// One additive term of a preparation formula
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FormulaTerm {
    Level,
    HalfLevel,
    Ability(Ability),
    Constant(i32),
}

/// Sum of named terms, e.g. "level + wisdom"
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct PreparationFormula {
    terms: Vec<FormulaTerm>,
}

impl PreparationFormula {
    pub fn new(terms: Vec<FormulaTerm>) -> Self {
        PreparationFormula { terms }
    }

    pub fn terms(&self) -> &[FormulaTerm] {
        &self.terms
    }

    /// Sum the terms; `class_level` is the casting class's level
    pub fn evaluate(&self, character: &Character, class_level: u32) -> i32 {
        self.terms
            .iter()
            .map(|term| match term {
                FormulaTerm::Level => class_level as i32,
                FormulaTerm::HalfLevel => (class_level / 2) as i32,
                FormulaTerm::Ability(ability) => character.modifier(*ability),
                FormulaTerm::Constant(value) => *value,
            })
            .sum()
    }
}

impl FromStr for PreparationFormula {
    type Err = FormulaParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut terms = Vec::new();
        for raw in s.split('+') {
            let term = raw.trim().to_lowercase();
            if term.is_empty() {
                continue;
            }
            let parsed = match term.as_str() {
                "level" | "class level" => FormulaTerm::Level,
                "half level" | "half_level" | "level/2" | "level / 2" => FormulaTerm::HalfLevel,
                other => match other.parse::<i32>() {
                    Ok(value) => FormulaTerm::Constant(value),
                    Err(_) => other
                        .trim_end_matches("modifier")
                        .trim()
                        .parse::<Ability>()
                        .map(FormulaTerm::Ability)
                        .map_err(|_| FormulaParseError(s.to_string()))?,
                },
            };
            terms.push(parsed);
        }
        if terms.is_empty() {
            return Err(FormulaParseError(s.to_string()));
        }
        Ok(PreparationFormula { terms })
    }
}

impl TryFrom<String> for PreparationFormula {
    type Error = FormulaParseError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl fmt::Display for PreparationFormula {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self
            .terms
            .iter()
            .map(|term| match term {
                FormulaTerm::Level => "level".to_string(),
                FormulaTerm::HalfLevel => "half level".to_string(),
                FormulaTerm::Ability(ability) => ability.name().to_lowercase(),
                FormulaTerm::Constant(value) => value.to_string(),
            })
            .collect();
        f.write_str(&parts.join(" + "))
    }
}

impl From<PreparationFormula> for String {
    fn from(value: PreparationFormula) -> Self {
        value.to_string()
    }
}
