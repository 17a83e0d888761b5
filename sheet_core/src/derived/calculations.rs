//! Core number formulas: modifiers, proficiency, hit points, movement

use crate::dice::DiceRoller;

/// Ability modifier, rounding toward negative infinity
///
/// `(score - 10) / 2` floored, so 9 gives -1 and 11 gives 0.
pub fn ability_modifier(score: i32) -> i32 {
    (score - 10).div_euclid(2)
}

/// Proficiency bonus for a total character level
///
/// +2 at levels 1-4, rising by one every four levels to +6 at 17-20.
/// Levels of zero or below (a fresh sheet) use +2.
pub fn calculate_proficiency_bonus(level: u32) -> i32 {
    if level == 0 {
        return 2;
    }
    2 + (level as i32 - 1) / 4
}

/// Hit points for one level of a class
///
/// `average` takes the fixed value `hit_die / 2 + 1`, otherwise one die is
/// rolled. Either way the result is at least 1.
pub fn roll_hp(roller: &mut dyn DiceRoller, hit_die: u32, con_mod: i32, average: bool) -> i32 {
    let base = if average {
        hit_die as i32 / 2 + 1
    } else {
        roller.roll(hit_die)
    };
    (base + con_mod).max(1)
}

/// Full hit die plus Constitution, at least 1
pub fn max_hp_for_level(hit_die: u32, con_mod: i32) -> i32 {
    (hit_die as i32 + con_mod).max(1)
}

/// Monk Unarmored Movement bonus in feet
pub fn unarmored_movement_bonus(monk_level: u32) -> i32 {
    match monk_level {
        0..=1 => 0,
        2..=5 => 10,
        6..=9 => 15,
        10..=13 => 20,
        14..=17 => 25,
        _ => 30,
    }
}

/// Carrying capacity in pounds
pub fn carry_capacity(strength: i32) -> i32 {
    strength * 15
}
