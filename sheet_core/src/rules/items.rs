//! Item templates

use crate::rules::Named;
use crate::types::ArmorCategory;
use serde::{Deserialize, Serialize};

/// Mechanical category of an item
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ItemKind {
    Armor {
        category: ArmorCategory,
        base_ac: i32,
    },
    Shield {
        #[serde(default = "default_shield_bonus")]
        bonus: i32,
    },
    Weapon {
        #[serde(default = "default_melee")]
        melee: bool,
        #[serde(default)]
        two_handed: bool,
    },
    Gear,
}

fn default_shield_bonus() -> i32 {
    2
}

fn default_melee() -> bool {
    true
}

impl ItemKind {
    pub fn is_armor(&self) -> bool {
        matches!(self, ItemKind::Armor { .. })
    }

    pub fn is_shield(&self) -> bool {
        matches!(self, ItemKind::Shield { .. })
    }

    pub fn is_melee_weapon(&self) -> bool {
        matches!(self, ItemKind::Weapon { melee: true, .. })
    }

    /// Whether the item can be equipped at all
    pub fn is_equippable(&self) -> bool {
        !matches!(self, ItemKind::Gear)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemTemplate {
    pub name: String,
    #[serde(flatten)]
    pub kind: ItemKind,
    #[serde(default)]
    pub weight: f64,
    #[serde(default)]
    pub cost_gp: f64,
}

impl ItemTemplate {
    pub fn armor(name: &str, category: ArmorCategory, base_ac: i32) -> Self {
        ItemTemplate {
            name: name.to_string(),
            kind: ItemKind::Armor { category, base_ac },
            weight: 0.0,
            cost_gp: 0.0,
        }
    }

    pub fn shield(name: &str) -> Self {
        ItemTemplate {
            name: name.to_string(),
            kind: ItemKind::Shield {
                bonus: default_shield_bonus(),
            },
            weight: 0.0,
            cost_gp: 0.0,
        }
    }

    pub fn melee_weapon(name: &str) -> Self {
        ItemTemplate {
            name: name.to_string(),
            kind: ItemKind::Weapon {
                melee: true,
                two_handed: false,
            },
            weight: 0.0,
            cost_gp: 0.0,
        }
    }
}

impl Named for ItemTemplate {
    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_items() {
        let json = r#"[
            {"name": "Scale Mail", "kind": "armor", "category": "medium", "base_ac": 14, "weight": 45},
            {"name": "Shield", "kind": "shield"},
            {"name": "Longbow", "kind": "weapon", "melee": false, "two_handed": true},
            {"name": "Rope", "kind": "gear"}
        ]"#;
        let items: Vec<ItemTemplate> = serde_json::from_str(json).unwrap();
        assert_eq!(
            items[0].kind,
            ItemKind::Armor {
                category: ArmorCategory::Medium,
                base_ac: 14
            }
        );
        assert_eq!(items[1].kind, ItemKind::Shield { bonus: 2 });
        assert!(!items[2].kind.is_melee_weapon());
        assert!(!items[3].kind.is_equippable());
    }
}
