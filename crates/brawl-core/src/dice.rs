//! Injectable randomness for contests and catalog draws.
//!
//! Every roll the engine makes goes through a [`Dice`] implementation handed
//! to the controller at construction. Nothing else in the crate touches a
//! random number generator, so a fixed source reproduces a brawl exactly.
//!
//! - [`SeededDice`]: `ChaCha8Rng` seeded from a `u64`, for real play and replays
//! - [`ScriptedDice`]: replays a fixed sequence, for tests

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

/// Highest face of the contest die.
pub const DIE_MAX: u8 = 20;

/// Source of uniformly distributed rolls and catalog picks.
pub trait Dice {
    /// Rolls a d20, returning a value in `1..=20`.
    fn d20(&mut self) -> u8;

    /// Picks an index uniformly from `0..len`.
    ///
    /// Callers never pass `len == 0`; implementations return 0 in that case.
    fn pick(&mut self, len: usize) -> usize;
}

impl<D: Dice + ?Sized> Dice for &mut D {
    fn d20(&mut self) -> u8 {
        (**self).d20()
    }

    fn pick(&mut self, len: usize) -> usize {
        (**self).pick(len)
    }
}

/// Deterministic dice backed by `ChaCha8Rng`.
///
/// # Example
///
/// ```
/// use brawl_core::dice::{Dice, SeededDice};
///
/// let mut a = SeededDice::new(42);
/// let mut b = SeededDice::new(42);
/// assert_eq!(a.d20(), b.d20());
/// ```
#[derive(Debug, Clone)]
pub struct SeededDice {
    rng: ChaCha8Rng,
    seed: u64,
}

impl SeededDice {
    /// Creates dice seeded from `seed`.
    #[must_use]
    pub fn new(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Returns the seed these dice were created with.
    #[must_use]
    pub const fn seed(&self) -> u64 {
        self.seed
    }
}

impl Dice for SeededDice {
    fn d20(&mut self) -> u8 {
        self.rng.gen_range(1..=DIE_MAX)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 {
            return 0;
        }
        self.rng.gen_range(0..len)
    }
}

/// Dice that replay a fixed script.
///
/// Rolls and picks are two independent sequences, each cycling once
/// exhausted. An empty roll script yields 10s, an empty pick script yields 0.
/// Rolls outside `1..=20` are clamped.
#[derive(Debug, Clone, Default)]
pub struct ScriptedDice {
    rolls: Vec<u8>,
    picks: Vec<usize>,
    roll_cursor: usize,
    pick_cursor: usize,
}

impl ScriptedDice {
    /// Dice that return `rolls` in order, cycling.
    #[must_use]
    pub fn new(rolls: impl IntoIterator<Item = u8>) -> Self {
        Self {
            rolls: rolls.into_iter().collect(),
            ..Self::default()
        }
    }

    /// Sets the pick script.
    #[must_use]
    pub fn with_picks(mut self, picks: impl IntoIterator<Item = usize>) -> Self {
        self.picks = picks.into_iter().collect();
        self
    }

    /// Number of d20 rolls consumed so far.
    #[must_use]
    pub const fn rolls_made(&self) -> usize {
        self.roll_cursor
    }
}

impl Dice for ScriptedDice {
    fn d20(&mut self) -> u8 {
        if self.rolls.is_empty() {
            self.roll_cursor += 1;
            return 10;
        }
        let value = self.rolls[self.roll_cursor % self.rolls.len()];
        self.roll_cursor += 1;
        value.clamp(1, DIE_MAX)
    }

    fn pick(&mut self, len: usize) -> usize {
        if len == 0 || self.picks.is_empty() {
            return 0;
        }
        let value = self.picks[self.pick_cursor % self.picks.len()];
        self.pick_cursor += 1;
        value % len
    }
}
