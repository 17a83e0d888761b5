//! Multiclass spell-slot aggregation and Pact Magic

use crate::character::{PactMagic, SpellSlots};
use crate::types::CasterType;

/// Standard slot table, indexed by effective caster level - 1
const SPELL_SLOTS: [[u32; 9]; 20] = [
    [2, 0, 0, 0, 0, 0, 0, 0, 0],
    [3, 0, 0, 0, 0, 0, 0, 0, 0],
    [4, 2, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 0, 0, 0, 0, 0, 0, 0],
    [4, 3, 2, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 0, 0, 0, 0, 0, 0],
    [4, 3, 3, 1, 0, 0, 0, 0, 0],
    [4, 3, 3, 2, 0, 0, 0, 0, 0],
    [4, 3, 3, 3, 1, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 0, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 0, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 0, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 0],
    [4, 3, 3, 3, 2, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 1, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 1, 1, 1],
    [4, 3, 3, 3, 3, 2, 2, 1, 1],
];

/// Slot counts for levels 1-9 at an effective caster level
///
/// Level 0 has no slots; anything above 20 uses the level 20 row.
pub fn slots_for_caster_level(caster_level: u32) -> [u32; 9] {
    if caster_level == 0 {
        return [0; 9];
    }
    SPELL_SLOTS[caster_level.min(20) as usize - 1]
}

/// Sum of every non-pact class's contribution
pub fn effective_caster_level(classes: &[(CasterType, u32)]) -> u32 {
    classes
        .iter()
        .map(|(caster_type, level)| caster_type.effective_levels(*level))
        .sum::<u32>()
        .min(20)
}

/// Shared slot pool for a set of `(caster type, class level)` pairs
///
/// Pools come back full; pact casters contribute nothing here.
pub fn aggregate_spell_slots(classes: &[(CasterType, u32)]) -> SpellSlots {
    SpellSlots::from_counts(slots_for_caster_level(effective_caster_level(classes)))
}

/// Pact Magic slot count and slot level for a pact caster level
pub fn pact_slots(pact_level: u32) -> Option<(u32, u32)> {
    let slots = match pact_level {
        0 => return None,
        1 => 1,
        2..=10 => 2,
        11..=16 => 3,
        _ => 4,
    };
    let slot_level = ((pact_level + 1) / 2).min(5);
    Some((slots, slot_level))
}

/// Fresh Pact Magic for the combined level of all pact classes
pub fn pact_magic(classes: &[(CasterType, u32)]) -> Option<PactMagic> {
    let pact_level: u32 = classes
        .iter()
        .filter(|(caster_type, _)| *caster_type == CasterType::Pact)
        .map(|(_, level)| *level)
        .sum();
    pact_slots(pact_level).map(|(slots, slot_level)| PactMagic::new(slots, slot_level))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fighter_wizard_multiclass() {
        // Fighter contributes nothing without a caster subclass
        let slots = aggregate_spell_slots(&[(CasterType::Full, 3)]);
        assert_eq!(slots.max_at(1), 4);
        assert_eq!(slots.max_at(2), 2);
        assert_eq!(slots.max_at(3), 0);
    }

    #[test]
    fn test_half_caster_rounds_down() {
        let slots = aggregate_spell_slots(&[(CasterType::Half, 2)]);
        assert_eq!(slots.counts(), [2, 0, 0, 0, 0, 0, 0, 0, 0]);
        assert!(aggregate_spell_slots(&[(CasterType::Half, 1)]).is_empty());
    }

    #[test]
    fn test_mixed_casters() {
        // Cleric 3 + Paladin 4 + Eldritch Knight 6 = 3 + 2 + 2
        let classes = [
            (CasterType::Full, 3),
            (CasterType::Half, 4),
            (CasterType::Third, 6),
        ];
        assert_eq!(effective_caster_level(&classes), 7);
        assert_eq!(aggregate_spell_slots(&classes).max_at(4), 1);
    }

    #[test]
    fn test_pact_excluded_from_pool() {
        let classes = [(CasterType::Pact, 5), (CasterType::Full, 1)];
        assert_eq!(effective_caster_level(&classes), 1);
        let pact = pact_magic(&classes).unwrap();
        assert_eq!((pact.slots, pact.slot_level, pact.current), (2, 3, 2));
    }

    #[test]
    fn test_pact_table() {
        assert_eq!(pact_slots(0), None);
        assert_eq!(pact_slots(1), Some((1, 1)));
        assert_eq!(pact_slots(2), Some((2, 1)));
        assert_eq!(pact_slots(3), Some((2, 2)));
        assert_eq!(pact_slots(9), Some((2, 5)));
        assert_eq!(pact_slots(11), Some((3, 5)));
        assert_eq!(pact_slots(17), Some((4, 5)));
        assert_eq!(pact_slots(20), Some((4, 5)));
    }

    #[test]
    fn test_caster_level_clamped() {
        assert_eq!(slots_for_caster_level(0), [0; 9]);
        assert_eq!(slots_for_caster_level(25), slots_for_caster_level(20));
        assert_eq!(
            effective_caster_level(&[(CasterType::Full, 15), (CasterType::Full, 10)]),
            20
        );
    }
}
