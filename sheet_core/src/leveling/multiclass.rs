//! Multiclass prerequisites

use crate::character::Character;
use crate::error::{Result, SheetError};
use crate::rules::ClassDefinition;

/// Check the ability requirement for taking `class` as an additional class
///
/// Only the incoming class is checked; classes already held are not
/// re-validated.
pub fn check_multiclass_prerequisites(
    character: &Character,
    class: &ClassDefinition,
    minimum: i32,
) -> Result<()> {
    let requirement = &class.multiclass.requirement;
    if requirement.is_met(|ability| character.score(ability), minimum) {
        Ok(())
    } else {
        Err(SheetError::MulticlassPrerequisite {
            class: class.name.clone(),
            requirement: requirement.describe(minimum),
        })
    }
}
