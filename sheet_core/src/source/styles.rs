//! Fighting styles

use crate::character::Character;
use crate::error::{Result, SheetError};
use crate::rules::RuleTables;
use tracing::info;

impl Character {
    /// Pick (or swap) the fighting style for a class the character has
    pub fn set_fighting_style(
        &mut self,
        class_name: &str,
        style: &str,
        tables: &RuleTables,
    ) -> Result<()> {
        let class = tables
            .class(class_name)
            .ok_or_else(|| SheetError::ClassNotFound(class_name.to_string()))?;
        if class.fighting_style_level.is_none() {
            return Err(SheetError::NoFightingStyle {
                class: class.name.clone(),
            });
        }
        let style = tables
            .fighting_styles
            .get_by_name(style)
            .ok_or_else(|| SheetError::FightingStyleNotFound(style.to_string()))?;
        let entry = self
            .class_mut(&class.name)
            .ok_or_else(|| SheetError::ClassNotFound(class.name.clone()))?;
        entry.fighting_style = Some(style.name.clone());
        self.recalculate();
        info!(character = %self.name, class = %class.name, style = %style.name, "fighting style set");
        Ok(())
    }
}
