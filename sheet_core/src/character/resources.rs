//! Spending and recovering resources: feature uses, slots, hit points, rests
//!
//! These are steady-state calls from a UI; running out is reported as
//! `false`, never as an error.

use super::{Character, InventoryItem};
use crate::types::RestType;
use tracing::debug;

impl Character {
    /// Spend one use of a feature
    pub fn use_feature(&mut self, name: &str) -> bool {
        self.features
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.use_once())
            .unwrap_or(false)
    }

    /// Restore uses of a feature; false if missing or already full
    pub fn restore_feature(&mut self, name: &str, amount: i32) -> bool {
        self.features
            .iter_mut()
            .find(|f| f.name.eq_ignore_ascii_case(name))
            .map(|f| f.restore(amount))
            .unwrap_or(false)
    }

    pub fn spend_spell_slot(&mut self, level: u32) -> bool {
        self.spellbook.slots.spend(level)
    }

    pub fn spend_pact_slot(&mut self) -> bool {
        self.spellbook
            .pact_magic
            .as_mut()
            .map(|pact| pact.spend())
            .unwrap_or(false)
    }

    /// Recharge short-rest features and pact slots
    pub fn short_rest(&mut self) {
        for feature in &mut self.features {
            if feature.rest_type == RestType::Short {
                feature.recharge();
            }
        }
        if let Some(pact) = self.spellbook.pact_magic.as_mut() {
            pact.recover();
        }
        debug!(character = %self.name, "short rest");
    }

    /// Recharge everything, restore hit points and drop temporary HP
    pub fn long_rest(&mut self) {
        for feature in &mut self.features {
            if feature.rest_type != RestType::None {
                feature.recharge();
            }
        }
        self.spellbook.slots.recover_all();
        if let Some(pact) = self.spellbook.pact_magic.as_mut() {
            pact.recover();
        }
        self.current_hp = self.max_hp;
        self.temp_hp = 0;
        debug!(character = %self.name, "long rest");
    }

    /// Heal up to max HP; returns the amount actually healed
    pub fn heal(&mut self, amount: i32) -> i32 {
        if amount <= 0 {
            return 0;
        }
        let before = self.current_hp;
        self.current_hp = (self.current_hp + amount).min(self.max_hp);
        self.current_hp - before
    }

    /// Apply damage, temporary HP first; current HP floors at 0
    pub fn take_damage(&mut self, amount: i32) {
        if amount <= 0 {
            return;
        }
        let absorbed = amount.min(self.temp_hp);
        self.temp_hp -= absorbed;
        self.current_hp = (self.current_hp - (amount - absorbed)).max(0);
    }

    /// Temporary HP don't stack; the higher value wins
    pub fn set_temp_hp(&mut self, amount: i32) {
        self.temp_hp = self.temp_hp.max(amount);
    }

    // === Equipment ===

    pub fn add_item(&mut self, item: InventoryItem) {
        self.inventory.add(item);
        self.recalculate();
    }

    pub fn remove_item(&mut self, name: &str, quantity: u32) -> u32 {
        let removed = self.inventory.remove(name, quantity);
        if removed > 0 {
            self.recalculate();
        }
        removed
    }

    /// Equip an item, swapping out conflicting armor or shield
    pub fn equip(&mut self, name: &str) -> bool {
        let equipped = self.inventory.equip(name);
        if equipped {
            self.recalculate();
        }
        equipped
    }

    pub fn unequip(&mut self, name: &str) -> bool {
        let unequipped = self.inventory.unequip(name);
        if unequipped {
            self.recalculate();
        }
        unequipped
    }
}

#[cfg(test)]
mod tests {
    use crate::benefit::UsesFormula;
    use crate::character::{AbilityScores, Character, Feature, PactMagic, SpellSlots};
    use crate::types::RestType;

    fn feature(name: &str, uses: i32, rest_type: RestType) -> Feature {
        Feature {
            name: name.to_string(),
            description: String::new(),
            max_uses: uses,
            current_uses: uses,
            rest_type,
            source: "custom: test".to_string(),
            uses: Some(UsesFormula::Constant(uses)),
            class: None,
        }
    }

    fn rested() -> Character {
        let mut character = Character::new("Rest", AbilityScores::default());
        character.max_hp = 20;
        character.current_hp = 20;
        character.features.push(feature("Second Wind", 1, RestType::Short));
        character.features.push(feature("Lay on Hands", 1, RestType::Long));
        character.spellbook.slots = SpellSlots::from_counts([2, 0, 0, 0, 0, 0, 0, 0, 0]);
        character.spellbook.pact_magic = Some(PactMagic::new(1, 1));
        character
    }

    #[test]
    fn test_short_rest_only_short_features() {
        let mut character = rested();
        assert!(character.use_feature("second wind"));
        assert!(character.use_feature("Lay on Hands"));
        assert!(character.spend_pact_slot());
        assert!(character.spend_spell_slot(1));

        character.short_rest();
        assert_eq!(character.feature("Second Wind").unwrap().current_uses, 1);
        assert_eq!(character.feature("Lay on Hands").unwrap().current_uses, 0);
        assert_eq!(character.spellbook.pact_magic.unwrap().current, 1);
        assert_eq!(character.spellbook.slots.current_at(1), 1);
    }

    #[test]
    fn test_long_rest_restores_everything() {
        let mut character = rested();
        character.use_feature("Lay on Hands");
        character.spend_spell_slot(1);
        character.take_damage(15);
        character.set_temp_hp(5);

        character.long_rest();
        assert_eq!(character.feature("Lay on Hands").unwrap().current_uses, 1);
        assert_eq!(character.spellbook.slots.current_at(1), 2);
        assert_eq!(character.current_hp, 20);
        assert_eq!(character.temp_hp, 0);
    }

    #[test]
    fn test_spending_unavailable_is_silent() {
        let mut character = rested();
        assert!(!character.use_feature("Rage"));
        assert!(!character.restore_feature("Second Wind", 1));
        assert!(!character.spend_spell_slot(5));
    }

    #[test]
    fn test_temp_hp_absorbs_damage() {
        let mut character = rested();
        character.set_temp_hp(5);
        character.set_temp_hp(3);
        assert_eq!(character.temp_hp, 5);
        character.take_damage(8);
        assert_eq!(character.temp_hp, 0);
        assert_eq!(character.current_hp, 17);
        assert_eq!(character.heal(10), 3);
        character.take_damage(100);
        assert_eq!(character.current_hp, 0);
    }
}
