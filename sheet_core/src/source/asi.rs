//! Ability Score Improvements

use crate::benefit::BenefitSource;
use crate::character::Character;
use crate::error::{Result, SheetError};
use crate::types::{Ability, SourceKind};
use tracing::info;

/// Points an improvement hands out
pub const ASI_TOTAL: i32 = 2;

impl Character {
    /// Apply +2 to one ability or +1 to two, recorded under `label`
    ///
    /// `label` names the improvement (e.g. "Fighter 4") so it can be
    /// removed later with `remove_ability_score_improvement`.
    pub fn apply_ability_score_improvement(
        &mut self,
        label: &str,
        boosts: &[(Ability, i32)],
    ) -> Result<()> {
        for (index, (ability, amount)) in boosts.iter().enumerate() {
            if *amount <= 0 || *amount > ASI_TOTAL {
                return Err(SheetError::BoostOutOfRange {
                    ability: *ability,
                    amount: *amount,
                });
            }
            if boosts[..index].iter().any(|(other, _)| other == ability) {
                return Err(SheetError::InvalidAbilityBoost(format!(
                    "{} boosted twice",
                    ability
                )));
            }
        }
        let total: i32 = boosts.iter().map(|(_, amount)| amount).sum();
        if total != ASI_TOTAL {
            return Err(SheetError::InvalidAbilityBoost(format!(
                "improvement must total +{}, got +{}",
                ASI_TOTAL, total
            )));
        }

        let source = BenefitSource::new(SourceKind::AbilityScoreImprovement, label);
        for (ability, amount) in boosts {
            self.grant_ability_score(&source, *ability, *amount);
        }
        info!(character = %self.name, label, "ability score improvement applied");
        Ok(())
    }

    pub fn remove_ability_score_improvement(&mut self, label: &str) -> usize {
        self.remove_all_benefits(SourceKind::AbilityScoreImprovement, label)
    }
}
