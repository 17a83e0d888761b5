//! BenefitProvider - Trait and implementations for benefit sources
//!
//! Feats, species and origins hand out lists of `BenefitGrant`s. Applying a
//! list resolves every player choice up front, then routes each grant
//! through the benefit applier under the provider's source so it can be
//! removed again later.

mod asi;
mod feats;
mod origins;
mod species;
mod styles;

pub use asi::ASI_TOTAL;
pub use origins::validate_origin_boosts;

use crate::benefit::BenefitSource;
use crate::character::Character;
use crate::error::{Result, SheetError};
use crate::rules::{BenefitGrant, RuleTables};
use crate::types::{Ability, Skill};
use serde::{Deserialize, Serialize};

/// Trait for anything that grants benefits to a character
pub trait BenefitProvider {
    /// Ledger source every grant is recorded under
    fn source(&self) -> BenefitSource;

    /// Grants in application order
    fn grants(&self) -> &[BenefitGrant];
}

/// Player picks for the choice grants in a list
///
/// Choices are consumed in grant order: one ability per `AbilityChoice`,
/// `count` skills per `SkillChoice`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GrantChoices {
    #[serde(default)]
    pub abilities: Vec<Ability>,
    #[serde(default)]
    pub skills: Vec<Skill>,
}

impl GrantChoices {
    pub fn new() -> Self {
        GrantChoices::default()
    }

    pub fn ability(mut self, ability: Ability) -> Self {
        self.abilities.push(ability);
        self
    }

    pub fn skill(mut self, skill: Skill) -> Self {
        self.skills.push(skill);
        self
    }
}

/// Walks a `GrantChoices` across one or more grant lists
pub(crate) struct ChoiceCursor<'c> {
    choices: &'c GrantChoices,
    next_ability: usize,
    next_skill: usize,
}

impl<'c> ChoiceCursor<'c> {
    pub(crate) fn new(choices: &'c GrantChoices) -> Self {
        ChoiceCursor {
            choices,
            next_ability: 0,
            next_skill: 0,
        }
    }

    fn take_ability(&mut self, options: &[Ability]) -> Result<Ability> {
        let ability = *self
            .choices
            .abilities
            .get(self.next_ability)
            .ok_or_else(|| SheetError::MissingChoice(format!("ability from {}", list(options))))?;
        if !options.is_empty() && !options.contains(&ability) {
            return Err(SheetError::MissingChoice(format!(
                "{} is not one of {}",
                ability,
                list(options)
            )));
        }
        self.next_ability += 1;
        Ok(ability)
    }

    fn take_skills(&mut self, options: &[Skill], count: u32) -> Result<Vec<Skill>> {
        let mut picked = Vec::new();
        for _ in 0..count {
            let skill = *self.choices.skills.get(self.next_skill).ok_or_else(|| {
                SheetError::MissingChoice(format!("{} skill(s) from {}", count, list(options)))
            })?;
            if !options.is_empty() && !options.contains(&skill) {
                return Err(SheetError::MissingChoice(format!(
                    "{} is not one of {}",
                    skill,
                    list(options)
                )));
            }
            if picked.contains(&skill) {
                return Err(SheetError::MissingChoice(format!("{} picked twice", skill)));
            }
            picked.push(skill);
            self.next_skill += 1;
        }
        Ok(picked)
    }
}

fn list<T: std::fmt::Display>(options: &[T]) -> String {
    if options.is_empty() {
        return "any".to_string();
    }
    options
        .iter()
        .map(|option| option.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// A grant with its choices filled in
#[derive(Debug)]
pub(crate) enum ResolvedGrant<'g> {
    Fixed(&'g BenefitGrant),
    Ability(Ability, i32),
    Skills(Vec<Skill>),
}

/// Fill in every choice, failing before anything is applied
pub(crate) fn resolve_grants<'g>(
    grants: &'g [BenefitGrant],
    cursor: &mut ChoiceCursor<'_>,
) -> Result<Vec<ResolvedGrant<'g>>> {
    grants
        .iter()
        .map(|grant| match grant {
            BenefitGrant::AbilityChoice { options, amount } => {
                Ok(ResolvedGrant::Ability(cursor.take_ability(options)?, *amount))
            }
            BenefitGrant::SkillChoice { options, count } => {
                Ok(ResolvedGrant::Skills(cursor.take_skills(options, *count)?))
            }
            fixed => Ok(ResolvedGrant::Fixed(fixed)),
        })
        .collect()
}

impl Character {
    /// Resolve choices for `grants`, then apply them all under `source`
    ///
    /// Returns the number of ledger entries added. Nothing is applied if any
    /// choice is missing or invalid.
    pub fn apply_grants(
        &mut self,
        source: &BenefitSource,
        grants: &[BenefitGrant],
        choices: &GrantChoices,
        tables: &RuleTables,
    ) -> Result<usize> {
        let resolved = resolve_grants(grants, &mut ChoiceCursor::new(choices))?;
        Ok(self.apply_resolved(source, resolved, tables))
    }

    /// `apply_grants` for a provider's own source and grants
    pub fn apply_provider(
        &mut self,
        provider: &impl BenefitProvider,
        choices: &GrantChoices,
        tables: &RuleTables,
    ) -> Result<usize> {
        self.apply_grants(&provider.source(), provider.grants(), choices, tables)
    }

    pub(crate) fn apply_resolved(
        &mut self,
        source: &BenefitSource,
        resolved: Vec<ResolvedGrant<'_>>,
        tables: &RuleTables,
    ) -> usize {
        let before = self.ledger.len();
        for grant in resolved {
            match grant {
                ResolvedGrant::Ability(ability, amount) => {
                    self.grant_ability_score(source, ability, amount)
                }
                ResolvedGrant::Skills(skills) => {
                    for skill in skills {
                        self.grant_skill(source, skill);
                    }
                }
                ResolvedGrant::Fixed(grant) => self.apply_fixed(source, grant, tables),
            }
        }
        self.recalculate();
        self.ledger.len() - before
    }

    fn apply_fixed(&mut self, source: &BenefitSource, grant: &BenefitGrant, tables: &RuleTables) {
        match grant {
            BenefitGrant::AbilityScore { ability, amount } => {
                self.grant_ability_score(source, *ability, *amount)
            }
            BenefitGrant::Skill { skill } => self.grant_skill(source, *skill),
            BenefitGrant::Language { name } => self.grant_language(source, name),
            BenefitGrant::Resistance { damage_type } => self.grant_resistance(source, damage_type),
            BenefitGrant::Tool { name } => self.grant_tool(source, name),
            BenefitGrant::Speed { amount } => self.grant_speed(source, *amount),
            BenefitGrant::HitPoints { amount, per_level } => {
                let total = if *per_level {
                    amount * self.level.max(1) as i32
                } else {
                    *amount
                };
                self.grant_hit_points(source, total)
            }
            BenefitGrant::Initiative {
                amount,
                proficiency,
            } => {
                let total = if *proficiency {
                    self.proficiency_bonus
                } else {
                    *amount
                };
                self.grant_initiative(source, total)
            }
            BenefitGrant::ArmorClass { amount } => self.grant_armor_class(source, *amount),
            BenefitGrant::PassiveBonus { target, amount } => {
                self.grant_passive_bonus(source, target, *amount)
            }
            BenefitGrant::Feature { feature } => {
                self.grant_feature(source, feature, None, &tables.feature_scaling);
            }
            BenefitGrant::Spell { name } => self.grant_spell(source, name),
            BenefitGrant::Item { name } => self.grant_item(source, name, &tables.items),
            // Resolved before reaching here
            BenefitGrant::AbilityChoice { .. } | BenefitGrant::SkillChoice { .. } => {}
        }
    }
}
