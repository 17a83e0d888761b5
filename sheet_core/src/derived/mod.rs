//! Derived stats - everything computed from the rest of the sheet
//!
//! `Character::recalculate` rebuilds every derived field from stored state
//! and is safe to call any number of times. The free functions in
//! `calculations` and `armor` hold the formulas themselves.

mod armor;
mod calculations;

pub use armor::{
    calculate_armor_class, dual_wielder_ac_bonus, fighting_style_ac_bonus, AcModifiers,
    UnarmoredDefense, WornArmor, MEDIUM_ARMOR_DEX_CAP,
};
pub use calculations::{
    ability_modifier, calculate_proficiency_bonus, carry_capacity, max_hp_for_level, roll_hp,
    unarmored_movement_bonus,
};

use crate::character::Character;
use crate::rules::ItemKind;
use crate::types::{Ability, Skill};
use tracing::debug;

const MONK: &str = "Monk";
const BARBARIAN: &str = "Barbarian";
const UNARMORED_DEFENSE: &str = "Unarmored Defense";
const UNARMORED_MOVEMENT: &str = "Unarmored Movement";
const DUAL_WIELDER: &str = "Dual Wielder";

impl Character {
    /// Recompute every derived field
    pub fn recalculate(&mut self) {
        // Multiclass aggregate
        self.level = self.classes.iter().map(|c| c.level).sum();
        self.class_summary = self
            .classes
            .iter()
            .map(|c| format!("{} {}", c.class_name, c.level))
            .collect::<Vec<_>>()
            .join(" / ");

        self.initiative = self.modifier(Ability::Dexterity) + self.initiative_bonus;
        self.carry_capacity = carry_capacity(self.abilities.strength);
        self.proficiency_bonus = calculate_proficiency_bonus(self.level);

        self.recalculate_spellcasting();

        self.armor_class = self.compute_armor_class();
        self.effective_speed = self.speed + self.movement_bonus();

        self.current_hp = self.current_hp.min(self.max_hp);

        debug!(
            character = %self.name,
            level = self.level,
            ac = self.armor_class,
            speed = self.effective_speed,
            "derived stats recalculated"
        );
    }

    fn recalculate_spellcasting(&mut self) {
        let Some(ability) = self.spellbook.ability else {
            return;
        };
        let modifier = self.modifier(ability);
        self.spellbook.spell_save_dc = 8 + self.proficiency_bonus + modifier;
        self.spellbook.spell_attack_bonus = self.proficiency_bonus + modifier;

        if self.spellbook.is_prepared_caster() {
            let class_level = self
                .spellbook
                .casting_class
                .as_deref()
                .and_then(|class| self.class_level(class))
                .unwrap_or(self.level);
            let prepared = match &self.spellbook.preparation_formula {
                Some(formula) => formula.evaluate(self, class_level),
                None => class_level as i32 + modifier,
            };
            self.spellbook.max_prepared_spells = prepared.max(1);
        }
    }

    fn unarmored_defense(&self) -> UnarmoredDefense {
        if self.has_class(MONK) && self.has_feature(UNARMORED_DEFENSE) {
            UnarmoredDefense::Monk
        } else if self.has_class(BARBARIAN) {
            UnarmoredDefense::Barbarian
        } else {
            UnarmoredDefense::Standard
        }
    }

    fn compute_armor_class(&self) -> i32 {
        let armor = self
            .inventory
            .equipped_armor()
            .and_then(|item| match item.kind {
                ItemKind::Armor { category, base_ac } => Some(WornArmor { category, base_ac }),
                _ => None,
            });
        let shield_bonus = self
            .inventory
            .equipped_shield()
            .and_then(|item| match item.kind {
                ItemKind::Shield { bonus } => Some(bonus),
                _ => None,
            });
        let mods = AcModifiers {
            dexterity: self.modifier(Ability::Dexterity),
            constitution: self.modifier(Ability::Constitution),
            wisdom: self.modifier(Ability::Wisdom),
        };

        let mut ac = calculate_armor_class(armor, shield_bonus, self.unarmored_defense(), mods);
        ac += self.ac_bonus;

        // Styles from different classes don't stack
        ac += self
            .classes
            .iter()
            .filter_map(|c| c.fighting_style.as_deref())
            .map(|style| fighting_style_ac_bonus(style, armor.is_some()))
            .max()
            .unwrap_or(0);

        if self.has_feat(DUAL_WIELDER) {
            ac += dual_wielder_ac_bonus(
                self.inventory.equipped_melee_weapons(),
                shield_bonus.is_some(),
            );
        }
        ac
    }

    fn movement_bonus(&self) -> i32 {
        let Some(monk_level) = self.class_level(MONK) else {
            return 0;
        };
        let unencumbered =
            self.inventory.equipped_armor().is_none() && self.inventory.equipped_shield().is_none();
        if unencumbered && self.has_feature(UNARMORED_MOVEMENT) {
            unarmored_movement_bonus(monk_level)
        } else {
            0
        }
    }

    // === Read-only helpers ===

    /// Ability modifier plus proficiency (doubled for Expertise)
    pub fn skill_modifier(&self, skill: Skill) -> i32 {
        self.modifier(skill.ability())
            + self.proficiency_bonus * self.skills.get(skill).multiplier()
    }

    /// 10 + skill modifier + any passive bonus, e.g. passive Perception
    pub fn passive_score(&self, skill: Skill) -> i32 {
        10 + self.skill_modifier(skill) + self.passive_bonus(skill.name())
    }

    pub fn saving_throw_modifier(&self, ability: Ability) -> i32 {
        let proficient = self.saving_throws.contains(&ability);
        self.modifier(ability) + if proficient { self.proficiency_bonus } else { 0 }
    }
}
