//! Deterministic random number generation for battles.
//!
//! A battle owns exactly one generator. Every random decision in a battle (accuracy rolls,
//! damage rolls, speed ties, secondary effect chances) draws from it in a fixed order, so two
//! battles created with the same seed and fed the same choices replay identically.

mod random_ext;

use std::any::Any;

use rand::Rng;
pub use random_ext::RandomExt;

/// A seedable source of pseudo-random integers.
pub trait PseudoRandomNumberGenerator {
    /// The seed the generator was created with, for replaying a battle.
    fn initial_seed(&self) -> u64;

    /// Advances the generator and returns the next value.
    fn next(&mut self) -> u64;

    /// Mutable cast to [`Any`], so tests can reach a concrete generator inside a battle.
    fn as_any_mut(&mut self) -> &mut dyn Any;
}

/// Linear congruential generator using the constants of the handheld games.
///
/// Only the upper 32 bits of the internal state are handed out.
#[derive(Debug, Clone)]
pub struct LinearCongruentialGenerator {
    initial_seed: u64,
    state: u64,
}

impl LinearCongruentialGenerator {
    const MULTIPLIER: u64 = 0x5D588B656C078965;
    const INCREMENT: u64 = 0x269EC3;

    /// Creates a generator from the given seed, or from a freshly generated seed.
    pub fn new(seed: Option<u64>) -> Self {
        let seed = seed.unwrap_or_else(|| rand::rng().random());
        Self {
            initial_seed: seed,
            state: seed,
        }
    }

    fn advance(state: u64) -> u64 {
        state
            .wrapping_mul(Self::MULTIPLIER)
            .wrapping_add(Self::INCREMENT)
    }
}

impl PseudoRandomNumberGenerator for LinearCongruentialGenerator {
    fn initial_seed(&self) -> u64 {
        self.initial_seed
    }

    fn next(&mut self) -> u64 {
        self.state = Self::advance(self.state);
        self.state >> 32
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}
