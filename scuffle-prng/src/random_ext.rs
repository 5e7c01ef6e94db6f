use crate::PseudoRandomNumberGenerator;

/// Derived random operations available on every [`PseudoRandomNumberGenerator`].
///
/// Each operation consumes a fixed number of values from the generator, which keeps replays
/// stable as long as callers make the same calls in the same order.
pub trait RandomExt: PseudoRandomNumberGenerator {
    /// Returns true with probability `numerator / denominator`.
    fn chance(&mut self, numerator: u64, denominator: u64) -> bool {
        self.next() % denominator < numerator
    }

    /// Returns an integer in `[min, max)`.
    fn range(&mut self, min: u64, max: u64) -> u64 {
        self.next() % (max - min) + min
    }

    /// Returns a random element of the slice.
    ///
    /// Single-element slices do not consume a value.
    fn sample<'a, T>(&mut self, items: &'a [T]) -> Option<&'a T> {
        match items.len() {
            0 => None,
            1 => items.first(),
            len => items.get(self.range(0, len as u64) as usize),
        }
    }

    /// Fisher-Yates shuffle.
    fn shuffle<T>(&mut self, items: &mut [T]) {
        let len = items.len() as u64;
        if len < 2 {
            return;
        }
        for start in 0..len - 1 {
            let swap = self.range(start, len);
            items.swap(start as usize, swap as usize);
        }
    }
}

impl<R> RandomExt for R where R: PseudoRandomNumberGenerator + ?Sized {}
