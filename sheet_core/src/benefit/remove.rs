//! Benefit Remover - reverse everything one source granted

use crate::benefit::{parse_gold, GrantedBenefit};
use crate::character::Character;
use crate::types::{Ability, BenefitKind, Proficiency, Skill, SourceKind};
use tracing::debug;

/// Lowest score a removal can leave behind
pub const ABILITY_SCORE_FLOOR: i32 = 1;

impl Character {
    /// Remove and reverse every ledger entry granted by `(kind, name)`
    ///
    /// Derived stats are recomputed once at the end. Returns the number of
    /// entries reversed; 0 means the source granted nothing.
    pub fn remove_all_benefits(&mut self, kind: SourceKind, name: &str) -> usize {
        let removed = self.ledger.remove_by_source(kind, name);
        for entry in &removed {
            self.reverse(entry);
        }
        if !removed.is_empty() {
            debug!(source = %format!("{}: {}", kind, name), count = removed.len(), "benefits removed");
        }
        self.recalculate();
        removed.len()
    }

    /// Remove and reverse one copy of each listed entry
    ///
    /// Entries no longer in the ledger are skipped.
    pub(crate) fn remove_entries(&mut self, entries: &[GrantedBenefit]) -> usize {
        let removed: Vec<GrantedBenefit> = entries
            .iter()
            .filter_map(|entry| self.ledger.remove_entry(entry))
            .collect();
        for entry in &removed {
            self.reverse(entry);
        }
        self.recalculate();
        removed.len()
    }

    fn reverse(&mut self, entry: &GrantedBenefit) {
        match entry.benefit {
            BenefitKind::AbilityScore => {
                if let Ok(ability) = entry.target.parse::<Ability>() {
                    let current = self.abilities.get(ability);
                    self.abilities
                        .set(ability, (current - entry.value).max(ABILITY_SCORE_FLOOR));
                }
            }
            BenefitKind::SkillProficiency => {
                if let Ok(skill) = entry.target.parse::<Skill>() {
                    self.skills.set(skill, Proficiency::from_value(entry.value));
                }
            }
            BenefitKind::Language
            | BenefitKind::Resistance
            | BenefitKind::ToolProficiency
            | BenefitKind::Spell => {
                // Another source still grants it
                if self.ledger.count_matching(entry.benefit, &entry.target) > 0 {
                    return;
                }
                match entry.benefit {
                    BenefitKind::Language => remove_ignore_case(&mut self.languages, &entry.target),
                    BenefitKind::Resistance => {
                        remove_ignore_case(&mut self.resistances, &entry.target)
                    }
                    BenefitKind::ToolProficiency => {
                        remove_ignore_case(&mut self.tool_proficiencies, &entry.target)
                    }
                    _ => {
                        self.spellbook.forget(&entry.target);
                    }
                }
            }
            BenefitKind::Speed => self.speed = (self.speed - entry.value).max(0),
            BenefitKind::HitPoints => {
                self.max_hp = (self.max_hp - entry.value).max(1);
                self.current_hp = self.current_hp.min(self.max_hp);
            }
            BenefitKind::Initiative => {
                self.initiative_bonus = (self.initiative_bonus - entry.value).max(0)
            }
            BenefitKind::ArmorClass => self.ac_bonus = (self.ac_bonus - entry.value).max(0),
            BenefitKind::PassiveBonus => {
                let key = entry.target.to_lowercase();
                if let Some(bonus) = self.passive_bonuses.get_mut(&key) {
                    *bonus = (*bonus - entry.value).max(0);
                    if *bonus == 0 {
                        self.passive_bonuses.remove(&key);
                    }
                }
            }
            BenefitKind::Feature => {
                let tag = entry.source.tag();
                if let Some(index) = self
                    .features
                    .iter()
                    .position(|f| f.name == entry.target && f.source == tag)
                {
                    self.features.remove(index);
                }
            }
            BenefitKind::Item => match parse_gold(&entry.target) {
                Some(gold) => self.inventory.gold = (self.inventory.gold - gold).max(0),
                None => {
                    self.inventory
                        .remove(&entry.target, entry.value.max(0) as u32);
                }
            },
        }
    }
}

fn remove_ignore_case(list: &mut Vec<String>, value: &str) {
    list.retain(|entry| !entry.eq_ignore_ascii_case(value));
}
