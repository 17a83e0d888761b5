//! Dice rolling behind an injectable trait

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::VecDeque;

/// Anything that can roll dice for the engine
///
/// Leveling takes a `&mut dyn DiceRoller`, so tests can substitute a seeded or
/// scripted roller.
pub trait DiceRoller {
    /// Roll one die, returning a value in `1..=sides`
    fn roll(&mut self, sides: u32) -> i32;

    /// Roll `count` dice of the same size
    fn roll_multiple(&mut self, count: u32, sides: u32) -> Vec<i32> {
        (0..count).map(|_| self.roll(sides)).collect()
    }
}

/// Roller backed by a `StdRng`
#[derive(Debug, Clone)]
pub struct StdDiceRoller {
    rng: StdRng,
}

impl StdDiceRoller {
    /// Create a roller seeded from OS entropy
    pub fn new() -> Self {
        StdDiceRoller {
            rng: StdRng::from_entropy(),
        }
    }

    /// Create a deterministic roller
    pub fn seeded(seed: u64) -> Self {
        StdDiceRoller {
            rng: StdRng::seed_from_u64(seed),
        }
    }
}

impl Default for StdDiceRoller {
    fn default() -> Self {
        Self::new()
    }
}

impl DiceRoller for StdDiceRoller {
    fn roll(&mut self, sides: u32) -> i32 {
        if sides == 0 {
            return 0;
        }
        self.rng.gen_range(1..=sides) as i32
    }
}

/// Replays a fixed list of results, then falls back to `fallback`
///
/// Values are clamped to the die being rolled.
#[derive(Debug, Clone, Default)]
pub struct ScriptedRoller {
    queue: VecDeque<i32>,
    fallback: i32,
}

impl ScriptedRoller {
    pub fn new(results: impl IntoIterator<Item = i32>) -> Self {
        ScriptedRoller {
            queue: results.into_iter().collect(),
            fallback: 1,
        }
    }

    /// Roller that always returns the same face
    pub fn always(value: i32) -> Self {
        ScriptedRoller {
            queue: VecDeque::new(),
            fallback: value,
        }
    }
}

impl DiceRoller for ScriptedRoller {
    fn roll(&mut self, sides: u32) -> i32 {
        let value = self.queue.pop_front().unwrap_or(self.fallback);
        value.clamp(1, sides.max(1) as i32)
    }
}
