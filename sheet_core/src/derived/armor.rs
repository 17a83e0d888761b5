//! Armor Class
//!
//! Base AC comes from the single equipped armor, or from an unarmored
//! formula when none is worn. Shield, flat bonuses, fighting style and feat
//! bonuses stack on top.

use crate::types::ArmorCategory;

/// Class feature that replaces the plain 10 + Dex unarmored base
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnarmoredDefense {
    /// 10 + Dex
    Standard,
    /// 10 + Dex + Wis
    Monk,
    /// 10 + Dex + Con
    Barbarian,
}

/// Worn armor: category and base AC
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WornArmor {
    pub category: ArmorCategory,
    pub base_ac: i32,
}

/// Modifiers that feed into AC
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct AcModifiers {
    pub dexterity: i32,
    pub constitution: i32,
    pub wisdom: i32,
}

/// Highest Dex bonus medium armor allows
pub const MEDIUM_ARMOR_DEX_CAP: i32 = 2;

/// Base AC plus shield
///
/// # Arguments
/// * `armor` - Equipped armor, if any
/// * `shield_bonus` - Bonus of the equipped shield, if any
/// * `unarmored` - Which unarmored formula applies when no armor is worn
/// * `mods` - Dex, Con and Wis modifiers
pub fn calculate_armor_class(
    armor: Option<WornArmor>,
    shield_bonus: Option<i32>,
    unarmored: UnarmoredDefense,
    mods: AcModifiers,
) -> i32 {
    let base = match armor {
        Some(WornArmor {
            category: ArmorCategory::Light,
            base_ac,
        }) => base_ac + mods.dexterity,
        Some(WornArmor {
            category: ArmorCategory::Medium,
            base_ac,
        }) => base_ac + mods.dexterity.min(MEDIUM_ARMOR_DEX_CAP),
        Some(WornArmor {
            category: ArmorCategory::Heavy,
            base_ac,
        }) => base_ac,
        None => match unarmored {
            UnarmoredDefense::Monk => 10 + mods.dexterity + mods.wisdom,
            UnarmoredDefense::Barbarian => 10 + mods.dexterity + mods.constitution,
            UnarmoredDefense::Standard => 10 + mods.dexterity,
        },
    };
    base + shield_bonus.unwrap_or(0)
}

/// AC bonus from a fighting style
///
/// Defense gives +1 while wearing armor; other styles give nothing.
pub fn fighting_style_ac_bonus(style: &str, armored: bool) -> i32 {
    if armored && style.eq_ignore_ascii_case("defense") {
        1
    } else {
        0
    }
}

/// Dual Wielder: +1 with exactly two melee weapons and no shield
pub fn dual_wielder_ac_bonus(melee_weapons: usize, has_shield: bool) -> i32 {
    if melee_weapons == 2 && !has_shield {
        1
    } else {
        0
    }
}
