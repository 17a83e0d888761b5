//! SpellBook - slots, pact magic and known/prepared spells

use crate::benefit::PreparationFormula;
use crate::types::{Ability, Preparation};
use serde::{Deserialize, Serialize};

/// Max and remaining slots for one spell level
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotPool {
    pub max: u32,
    pub current: u32,
}

/// Shared spell-slot pool, levels 1 through 9
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpellSlots {
    levels: [SlotPool; 9],
}

impl SpellSlots {
    /// Full pools from per-level counts
    pub fn from_counts(counts: [u32; 9]) -> Self {
        let mut slots = SpellSlots::default();
        for (pool, count) in slots.levels.iter_mut().zip(counts) {
            *pool = SlotPool {
                max: count,
                current: count,
            };
        }
        slots
    }

    /// Pool for spell level 1..=9
    pub fn get(&self, level: u32) -> Option<&SlotPool> {
        if (1..=9).contains(&level) {
            self.levels.get(level as usize - 1)
        } else {
            None
        }
    }

    pub fn max_at(&self, level: u32) -> u32 {
        self.get(level).map(|pool| pool.max).unwrap_or(0)
    }

    pub fn current_at(&self, level: u32) -> u32 {
        self.get(level).map(|pool| pool.current).unwrap_or(0)
    }

    /// Max counts for levels 1..=9
    pub fn counts(&self) -> [u32; 9] {
        let mut counts = [0; 9];
        for (count, pool) in counts.iter_mut().zip(self.levels.iter()) {
            *count = pool.max;
        }
        counts
    }

    pub fn spend(&mut self, level: u32) -> bool {
        if !(1..=9).contains(&level) {
            return false;
        }
        let pool = &mut self.levels[level as usize - 1];
        if pool.current == 0 {
            return false;
        }
        pool.current -= 1;
        true
    }

    pub fn recover_all(&mut self) {
        for pool in &mut self.levels {
            pool.current = pool.max;
        }
    }

    pub fn is_empty(&self) -> bool {
        self.levels.iter().all(|pool| pool.max == 0)
    }
}

/// Warlock Pact Magic, tracked apart from the shared pool
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PactMagic {
    pub slots: u32,
    pub slot_level: u32,
    pub current: u32,
}

impl PactMagic {
    pub fn new(slots: u32, slot_level: u32) -> Self {
        PactMagic {
            slots,
            slot_level,
            current: slots,
        }
    }

    pub fn spend(&mut self) -> bool {
        if self.current == 0 {
            return false;
        }
        self.current -= 1;
        true
    }

    pub fn recover(&mut self) {
        self.current = self.slots;
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpellBook {
    /// Set by the first spellcasting class taken
    pub ability: Option<Ability>,
    pub casting_class: Option<String>,
    pub preparation: Option<Preparation>,
    pub preparation_formula: Option<PreparationFormula>,
    pub cantrips_known: u32,
    /// Spells-known limit for known casters
    pub spells_known: u32,
    pub known_spells: Vec<String>,
    pub prepared_spells: Vec<String>,
    pub slots: SpellSlots,
    pub pact_magic: Option<PactMagic>,

    // === Derived ===
    pub spell_save_dc: i32,
    pub spell_attack_bonus: i32,
    pub max_prepared_spells: i32,
}

impl SpellBook {
    pub fn is_spellcaster(&self) -> bool {
        self.ability.is_some()
    }

    pub fn is_prepared_caster(&self) -> bool {
        self.preparation == Some(Preparation::Prepared)
    }

    pub fn knows(&self, spell: &str) -> bool {
        self.known_spells
            .iter()
            .any(|known| known.eq_ignore_ascii_case(spell))
    }

    /// Add to known spells; false if already known
    pub fn learn(&mut self, spell: &str) -> bool {
        if self.knows(spell) {
            return false;
        }
        self.known_spells.push(spell.to_string());
        true
    }

    /// Drop from known and prepared spells; false if it wasn't known
    pub fn forget(&mut self, spell: &str) -> bool {
        let before = self.known_spells.len();
        self.known_spells.retain(|known| !known.eq_ignore_ascii_case(spell));
        self.prepared_spells
            .retain(|prepared| !prepared.eq_ignore_ascii_case(spell));
        self.known_spells.len() != before
    }

    /// Prepare a spell, respecting the derived limit
    pub fn prepare(&mut self, spell: &str) -> bool {
        let already = self
            .prepared_spells
            .iter()
            .any(|prepared| prepared.eq_ignore_ascii_case(spell));
        if already || self.prepared_spells.len() as i32 >= self.max_prepared_spells {
            return false;
        }
        self.prepared_spells.push(spell.to_string());
        true
    }

    pub fn unprepare(&mut self, spell: &str) -> bool {
        let before = self.prepared_spells.len();
        self.prepared_spells
            .retain(|prepared| !prepared.eq_ignore_ascii_case(spell));
        self.prepared_spells.len() != before
    }
}
