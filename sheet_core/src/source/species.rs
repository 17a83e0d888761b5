//! Species - base speed and innate traits

use super::{resolve_grants, BenefitProvider, ChoiceCursor, GrantChoices};
use crate::benefit::BenefitSource;
use crate::character::{Character, DEFAULT_SPEED};
use crate::error::{Result, SheetError};
use crate::rules::{BenefitGrant, RuleTables, SpeciesDefinition};
use crate::types::SourceKind;
use tracing::info;

impl BenefitProvider for SpeciesDefinition {
    fn source(&self) -> BenefitSource {
        BenefitSource::species(self.name.clone())
    }

    fn grants(&self) -> &[BenefitGrant] {
        &self.benefits
    }
}

impl Character {
    /// Set the character's species, replacing any previous one
    ///
    /// Base speed moves to the species' speed; bonuses from other sources
    /// stay on top of it.
    pub fn apply_species(
        &mut self,
        name: &str,
        choices: &GrantChoices,
        tables: &RuleTables,
    ) -> Result<()> {
        let species = tables
            .species
            .get_by_name(name)
            .ok_or_else(|| SheetError::SpeciesNotFound(name.to_string()))?;
        let resolved = resolve_grants(species.grants(), &mut ChoiceCursor::new(choices))?;

        let old_speed = match self.species.take() {
            Some(previous) => {
                self.remove_all_benefits(SourceKind::Species, &previous);
                tables
                    .species
                    .get_by_name(&previous)
                    .map(|s| s.speed)
                    .unwrap_or(DEFAULT_SPEED)
            }
            None => DEFAULT_SPEED,
        };
        self.speed = (self.speed - old_speed + species.speed).max(0);
        self.species = Some(species.name.clone());

        let added = self.apply_resolved(&species.source(), resolved, tables);
        info!(character = %self.name, species = %species.name, benefits = added, "species applied");
        Ok(())
    }
}
