//! Inventory - carried items, equipment state and gold

use crate::rules::{ItemKind, ItemTemplate};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InventoryItem {
    pub name: String,
    pub kind: ItemKind,
    pub quantity: u32,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub equipped: bool,
}

impl InventoryItem {
    /// Untyped item used when no template matches
    pub fn generic(name: &str, quantity: u32) -> Self {
        InventoryItem {
            name: name.to_string(),
            kind: ItemKind::Gear,
            quantity,
            weight: 0.0,
            equipped: false,
        }
    }

    pub fn from_template(template: &ItemTemplate, quantity: u32) -> Self {
        InventoryItem {
            name: template.name.clone(),
            kind: template.kind.clone(),
            quantity,
            weight: template.weight,
            equipped: false,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Inventory {
    pub items: Vec<InventoryItem>,
    /// Gold pieces
    pub gold: i64,
}

impl Inventory {
    pub fn new() -> Self {
        Inventory::default()
    }

    fn position(&self, name: &str) -> Option<usize> {
        self.items
            .iter()
            .position(|item| item.name.eq_ignore_ascii_case(name))
    }

    pub fn get(&self, name: &str) -> Option<&InventoryItem> {
        self.position(name).map(|index| &self.items[index])
    }

    /// Add an item, stacking onto an existing row with the same name
    pub fn add(&mut self, item: InventoryItem) {
        match self.position(&item.name) {
            Some(index) => self.items[index].quantity += item.quantity,
            None => self.items.push(item),
        }
    }

    /// Remove up to `quantity`; returns how many were removed
    ///
    /// A row that reaches zero is dropped.
    pub fn remove(&mut self, name: &str, quantity: u32) -> u32 {
        let Some(index) = self.position(name) else {
            return 0;
        };
        let row = &mut self.items[index];
        let removed = quantity.min(row.quantity);
        row.quantity -= removed;
        if row.quantity == 0 {
            self.items.remove(index);
        }
        removed
    }

    /// Equip an item, unequipping any conflicting armor or shield
    ///
    /// Returns false if the item is missing or can't be equipped.
    pub fn equip(&mut self, name: &str) -> bool {
        let Some(index) = self.position(name) else {
            return false;
        };
        let kind = self.items[index].kind.clone();
        if !kind.is_equippable() {
            return false;
        }
        for (other_index, other) in self.items.iter_mut().enumerate() {
            if other_index == index || !other.equipped {
                continue;
            }
            let conflicts = (kind.is_armor() && other.kind.is_armor())
                || (kind.is_shield() && other.kind.is_shield());
            if conflicts {
                other.equipped = false;
            }
        }
        self.items[index].equipped = true;
        true
    }

    pub fn unequip(&mut self, name: &str) -> bool {
        match self.position(name) {
            Some(index) if self.items[index].equipped => {
                self.items[index].equipped = false;
                true
            }
            _ => false,
        }
    }

    pub fn equipped_armor(&self) -> Option<&InventoryItem> {
        self.items
            .iter()
            .find(|item| item.equipped && item.kind.is_armor())
    }

    pub fn equipped_shield(&self) -> Option<&InventoryItem> {
        self.items
            .iter()
            .find(|item| item.equipped && item.kind.is_shield())
    }

    pub fn equipped_melee_weapons(&self) -> usize {
        self.items
            .iter()
            .filter(|item| item.equipped && item.kind.is_melee_weapon())
            .count()
    }

    pub fn total_weight(&self) -> f64 {
        self.items
            .iter()
            .map(|item| item.weight * item.quantity as f64)
            .sum()
    }

    pub fn add_gold(&mut self, amount: i64) {
        self.gold += amount;
    }

    /// Spend gold; false (and no change) if there isn't enough
    pub fn spend_gold(&mut self, amount: i64) -> bool {
        if amount < 0 || amount > self.gold {
            return false;
        }
        self.gold -= amount;
        true
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ArmorCategory;

    fn stocked() -> Inventory {
        let mut inventory = Inventory::new();
        inventory.add(InventoryItem::from_template(
            &ItemTemplate::armor("Leather Armor", ArmorCategory::Light, 11),
            1,
        ));
        inventory.add(InventoryItem::from_template(
            &ItemTemplate::armor("Chain Mail", ArmorCategory::Heavy, 16),
            1,
        ));
        inventory.add(InventoryItem::from_template(&ItemTemplate::shield("Shield"), 1));
        inventory.add(InventoryItem::generic("Torch", 5));
        inventory
    }

    #[test]
    fn test_equip_swaps_armor() {
        let mut inventory = stocked();
        assert!(inventory.equip("Leather Armor"));
        assert!(inventory.equip("chain mail"));
        assert_eq!(inventory.equipped_armor().unwrap().name, "Chain Mail");
        assert!(!inventory.get("Leather Armor").unwrap().equipped);
    }

    #[test]
    fn test_shield_and_armor_coexist() {
        let mut inventory = stocked();
        assert!(inventory.equip("Chain Mail"));
        assert!(inventory.equip("Shield"));
        assert!(inventory.equipped_armor().is_some());
        assert!(inventory.equipped_shield().is_some());
    }

    #[test]
    fn test_gear_not_equippable() {
        let mut inventory = stocked();
        assert!(!inventory.equip("Torch"));
        assert!(!inventory.equip("Lantern"));
    }

    #[test]
    fn test_stack_and_remove() {
        let mut inventory = stocked();
        inventory.add(InventoryItem::generic("torch", 2));
        assert_eq!(inventory.get("Torch").unwrap().quantity, 7);
        assert_eq!(inventory.remove("Torch", 10), 7);
        assert!(inventory.get("Torch").is_none());
        assert_eq!(inventory.remove("Torch", 1), 0);
    }

    #[test]
    fn test_gold() {
        let mut inventory = Inventory::new();
        inventory.add_gold(15);
        assert!(!inventory.spend_gold(20));
        assert!(inventory.spend_gold(5));
        assert_eq!(inventory.gold, 10);
    }
}
