//! Origins (backgrounds) - ability boosts, skills, tool, origin feat, gear

use super::{resolve_grants, BenefitProvider, ChoiceCursor, GrantChoices};
use crate::benefit::BenefitSource;
use crate::character::Character;
use crate::error::{Result, SheetError};
use crate::rules::{BenefitGrant, OriginDefinition, RuleTables};
use crate::types::{Ability, SourceKind};
use tracing::info;

impl BenefitProvider for OriginDefinition {
    fn source(&self) -> BenefitSource {
        BenefitSource::origin(self.name.clone())
    }

    fn grants(&self) -> &[BenefitGrant] {
        &self.benefits
    }
}

/// Check origin boosts: +2/+1 or +1/+1/+1 across distinct listed abilities
pub fn validate_origin_boosts(origin: &OriginDefinition, boosts: &[(Ability, i32)]) -> Result<()> {
    for (index, (ability, _)) in boosts.iter().enumerate() {
        if !origin.ability_scores.is_empty() && !origin.ability_scores.contains(ability) {
            return Err(SheetError::InvalidAbilityBoost(format!(
                "{} can't boost {}",
                origin.name, ability
            )));
        }
        if boosts[..index].iter().any(|(other, _)| other == ability) {
            return Err(SheetError::InvalidAbilityBoost(format!(
                "{} boosted twice",
                ability
            )));
        }
    }
    let mut amounts: Vec<i32> = boosts.iter().map(|(_, amount)| *amount).collect();
    amounts.sort_unstable_by(|a, b| b.cmp(a));
    match amounts.as_slice() {
        [2, 1] | [1, 1, 1] => Ok(()),
        _ => Err(SheetError::InvalidAbilityBoost(format!(
            "expected +2/+1 or +1/+1/+1, got {:?}",
            amounts
        ))),
    }
}

impl Character {
    /// Apply an origin, replacing any previous one
    ///
    /// `choices` covers the origin's own choice grants followed by those of
    /// its origin feat.
    pub fn apply_origin(
        &mut self,
        name: &str,
        boosts: &[(Ability, i32)],
        choices: &GrantChoices,
        tables: &RuleTables,
    ) -> Result<()> {
        let origin = tables
            .origins
            .get_by_name(name)
            .ok_or_else(|| SheetError::OriginNotFound(name.to_string()))?;
        validate_origin_boosts(origin, boosts)?;

        let previous_feat = self
            .origin
            .as_deref()
            .and_then(|previous| tables.origins.get_by_name(previous))
            .and_then(|previous| previous.feat.clone());
        let feat = match &origin.feat {
            Some(feat_name) => {
                let feat = tables
                    .feat(feat_name)
                    .ok_or_else(|| SheetError::FeatNotFound(feat_name.clone()))?;
                let replaced = previous_feat
                    .as_deref()
                    .is_some_and(|previous| previous.eq_ignore_ascii_case(&feat.name));
                if self.has_feat(&feat.name) && !feat.repeatable && !replaced {
                    return Err(SheetError::AlreadyHasFeat(feat.name.clone()));
                }
                Some(feat)
            }
            None => None,
        };

        let mut cursor = ChoiceCursor::new(choices);
        let resolved = resolve_grants(origin.grants(), &mut cursor)?;
        let feat_resolved = match feat {
            Some(feat) => Some((feat, resolve_grants(feat.grants(), &mut cursor)?)),
            None => None,
        };

        // === Mutate ===
        if let Some(previous) = self.origin.take() {
            self.remove_all_benefits(SourceKind::Origin, &previous);
            if let Some(previous_feat) = &previous_feat {
                self.remove_origin_feat(previous_feat);
            }
        }

        let source = origin.source();
        for (ability, amount) in boosts {
            self.grant_ability_score(&source, *ability, *amount);
        }
        for skill in &origin.skills {
            self.grant_skill(&source, *skill);
        }
        if let Some(tool) = &origin.tool {
            self.grant_tool(&source, tool);
        }
        for item in &origin.equipment {
            self.grant_item(&source, item, &tables.items);
        }
        let mut added = self.apply_resolved(&source, resolved, tables);

        if let Some((feat, feat_resolved)) = feat_resolved {
            let start = self.ledger.len();
            added += self.apply_resolved(&feat.source(), feat_resolved, tables);
            self.origin_feat_grants = self.ledger.iter().skip(start).cloned().collect();
            self.feats.push(feat.name.clone());
        }
        self.origin = Some(origin.name.clone());

        info!(character = %self.name, origin = %origin.name, benefits = added, "origin applied");
        Ok(())
    }

    /// Drop the one copy of `feat` the outgoing origin granted
    ///
    /// Copies of a repeatable feat taken on their own stay on the sheet.
    fn remove_origin_feat(&mut self, feat: &str) {
        if let Some(index) = self
            .feats
            .iter()
            .position(|held| held.eq_ignore_ascii_case(feat))
        {
            self.feats.remove(index);
        }
        let grants = std::mem::take(&mut self.origin_feat_grants);
        let removed = self.remove_entries(&grants);
        info!(character = %self.name, feat = %feat, benefits = removed, "origin feat removed");
    }
}
