//! Feats - prerequisites, application and removal

use super::{resolve_grants, BenefitProvider, ChoiceCursor, GrantChoices};
use crate::benefit::BenefitSource;
use crate::character::Character;
use crate::error::{Result, SheetError};
use crate::rules::{BenefitGrant, FeatDefinition, RuleTables};
use crate::types::SourceKind;
use tracing::info;

impl BenefitProvider for FeatDefinition {
    fn source(&self) -> BenefitSource {
        BenefitSource::feat(self.name.clone())
    }

    fn grants(&self) -> &[BenefitGrant] {
        &self.benefits
    }
}

impl Character {
    /// Check level and ability prerequisites for `feat`
    pub fn check_feat_prerequisites(&self, feat: &FeatDefinition) -> Result<()> {
        let Some(prerequisite) = &feat.prerequisite else {
            return Ok(());
        };
        if let Some(min_level) = prerequisite.min_level {
            if self.level < min_level {
                return Err(SheetError::FeatPrerequisite {
                    feat: feat.name.clone(),
                    reason: format!("requires level {}", min_level),
                });
            }
        }
        if let Some(min_score) = prerequisite.min_score {
            let met = prerequisite.abilities.is_empty()
                || prerequisite
                    .abilities
                    .iter()
                    .any(|ability| self.score(*ability) >= min_score);
            if !met {
                let names: Vec<&str> = prerequisite.abilities.iter().map(|a| a.name()).collect();
                return Err(SheetError::FeatPrerequisite {
                    feat: feat.name.clone(),
                    reason: format!("requires {} {}", names.join(" or "), min_score),
                });
            }
        }
        Ok(())
    }

    /// Take a feat from the tables
    pub fn apply_feat(
        &mut self,
        name: &str,
        choices: &GrantChoices,
        tables: &RuleTables,
    ) -> Result<()> {
        let feat = tables
            .feat(name)
            .ok_or_else(|| SheetError::FeatNotFound(name.to_string()))?;
        if self.has_feat(&feat.name) && !feat.repeatable {
            return Err(SheetError::AlreadyHasFeat(feat.name.clone()));
        }
        self.check_feat_prerequisites(feat)?;
        let resolved = resolve_grants(feat.grants(), &mut ChoiceCursor::new(choices))?;

        let added = self.apply_resolved(&feat.source(), resolved, tables);
        self.feats.push(feat.name.clone());
        info!(character = %self.name, feat = %feat.name, benefits = added, "feat applied");
        Ok(())
    }

    /// Drop a feat and reverse everything it granted
    ///
    /// Returns false if the feat isn't held. A repeatable feat taken more
    /// than once shares one source, so all copies go together. Replacing an
    /// origin removes only that origin's copy.
    pub fn remove_feat(&mut self, name: &str) -> bool {
        let Some(index) = self
            .feats
            .iter()
            .position(|feat| feat.eq_ignore_ascii_case(name))
        else {
            return false;
        };
        let feat = self.feats.remove(index);
        self.feats.retain(|held| !held.eq_ignore_ascii_case(&feat));
        let removed = self.remove_all_benefits(SourceKind::Feat, &feat);
        info!(character = %self.name, feat = %feat, benefits = removed, "feat removed");
        true
    }
}
