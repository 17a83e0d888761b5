//! SkillSet - proficiency level for each of the eighteen skills

use crate::types::{Proficiency, Skill};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SkillSet {
    levels: BTreeMap<Skill, Proficiency>,
}

impl SkillSet {
    /// Every skill at `Proficiency::None`
    pub fn new() -> Self {
        SkillSet {
            levels: Skill::all()
                .iter()
                .map(|skill| (*skill, Proficiency::None))
                .collect(),
        }
    }

    pub fn get(&self, skill: Skill) -> Proficiency {
        self.levels.get(&skill).copied().unwrap_or_default()
    }

    pub fn set(&mut self, skill: Skill, proficiency: Proficiency) {
        self.levels.insert(skill, proficiency);
    }

    /// Skills at Proficient or better
    pub fn proficient(&self) -> impl Iterator<Item = (Skill, Proficiency)> + '_ {
        self.levels
            .iter()
            .filter(|(_, level)| **level != Proficiency::None)
            .map(|(skill, level)| (*skill, *level))
    }

    pub fn iter(&self) -> impl Iterator<Item = (Skill, Proficiency)> + '_ {
        self.levels.iter().map(|(skill, level)| (*skill, *level))
    }
}

impl Default for SkillSet {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_has_all_skills() {
        let skills = SkillSet::new();
        assert_eq!(skills.iter().count(), 18);
        assert_eq!(skills.proficient().count(), 0);
    }

    #[test]
    fn test_set_and_list() {
        let mut skills = SkillSet::new();
        skills.set(Skill::Stealth, Proficiency::Expertise);
        assert_eq!(skills.get(Skill::Stealth), Proficiency::Expertise);
        assert_eq!(
            skills.proficient().collect::<Vec<_>>(),
            vec![(Skill::Stealth, Proficiency::Expertise)]
        );
    }
}
