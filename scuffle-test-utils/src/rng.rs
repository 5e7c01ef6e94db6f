use std::any::Any;

use hashbrown::HashMap;
use scuffle::battle::Battle;
use scuffle_prng::{
    LinearCongruentialGenerator,
    PseudoRandomNumberGenerator,
};

/// A controlled random number generator, for tests that need fine-grained control over battle
/// RNG.
///
/// Values can be faked at specific positions in the sequence, or for every position at once.
/// The underlying generator is always advanced, so faking one value does not shift the rest of
/// the sequence.
pub struct ControlledRandomNumberGenerator {
    count: usize,
    fake_values: HashMap<usize, u64>,
    fallback: Option<u64>,
    real: LinearCongruentialGenerator,
}

impl ControlledRandomNumberGenerator {
    pub fn new(seed: Option<u64>) -> Self {
        Self {
            count: 0,
            fake_values: HashMap::new(),
            fallback: None,
            real: LinearCongruentialGenerator::new(seed),
        }
    }

    /// Creates a generator that returns the same value every time, unless a fake value is
    /// inserted for a position.
    pub fn fixed(seed: Option<u64>, value: u64) -> Self {
        let mut rng = Self::new(seed);
        rng.fallback = Some(value);
        rng
    }

    pub fn sequence_count(&self) -> usize {
        self.count
    }

    pub fn set_fallback_value(&mut self, value: Option<u64>) {
        self.fallback = value;
    }

    pub fn insert_fake_value(&mut self, count: usize, value: u64) {
        self.fake_values.insert(count, value);
    }

    pub fn insert_fake_values<I>(&mut self, iterable: I)
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        self.fake_values.extend(iterable);
    }

    /// Inserts fake values, counting positions from the next value to be drawn.
    pub fn insert_fake_values_relative_to_sequence_count<I>(&mut self, iterable: I)
    where
        I: IntoIterator<Item = (usize, u64)>,
    {
        let count = self.count;
        self.fake_values.extend(
            iterable
                .into_iter()
                .map(|(offset, value)| (count + offset, value)),
        );
    }
}

impl PseudoRandomNumberGenerator for ControlledRandomNumberGenerator {
    fn initial_seed(&self) -> u64 {
        self.real.initial_seed()
    }

    fn next(&mut self) -> u64 {
        // Roll the underlying generator even if the value is faked.
        let next = self.real.next();
        self.count += 1;
        match self.fake_values.remove(&self.count) {
            Some(fake) => fake,
            None => self.fallback.unwrap_or(next),
        }
    }

    fn as_any_mut(&mut self) -> &mut dyn Any {
        self
    }
}

/// Reaches the controlled generator inside a battle built with one.
pub fn get_controlled_rng_for_battle<'b>(
    battle: &'b mut Battle,
) -> Option<&'b mut ControlledRandomNumberGenerator> {
    battle
        .prng_mut()
        .as_any_mut()
        .downcast_mut::<ControlledRandomNumberGenerator>()
}

#[cfg(test)]
mod rng_test {
    use scuffle_prng::{
        LinearCongruentialGenerator,
        PseudoRandomNumberGenerator,
    };

    use crate::ControlledRandomNumberGenerator;

    #[test]
    fn fakes_values_without_shifting_sequence() {
        let mut real = LinearCongruentialGenerator::new(Some(5));
        let mut controlled = ControlledRandomNumberGenerator::new(Some(5));
        controlled.insert_fake_value(2, 1000);
        assert_eq!(controlled.next(), real.next());
        real.next();
        assert_eq!(controlled.next(), 1000);
        assert_eq!(controlled.next(), real.next());
        assert_eq!(controlled.sequence_count(), 3);
    }

    #[test]
    fn fixed_generator_prefers_inserted_values() {
        let mut controlled = ControlledRandomNumberGenerator::fixed(None, 1);
        controlled.insert_fake_values_relative_to_sequence_count([(2, 7)]);
        assert_eq!(controlled.next(), 1);
        assert_eq!(controlled.next(), 7);
        assert_eq!(controlled.next(), 1);
    }
}
