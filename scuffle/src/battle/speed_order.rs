use std::cmp::Ordering;

use scuffle_prng::{
    PseudoRandomNumberGenerator,
    RandomExt,
};

use crate::config::SpeedSortTieResolution;

/// An object that can be ordered by speed.
pub trait SpeedOrderable {
    /// Order. Lowest order goes first.
    fn order(&self) -> u32;
    /// Priority. Highest priority goes first.
    fn priority(&self) -> i32;
    /// Speed. Highest speed goes first.
    fn speed(&self) -> u64;
}

/// Compares two objects by order, then priority, then speed.
///
/// `Less` means `a` goes first.
pub fn compare_speed_order<T>(a: &T, b: &T) -> Ordering
where
    T: SpeedOrderable,
{
    a.order()
        .cmp(&b.order())
        .then_with(|| b.priority().cmp(&a.priority()))
        .then_with(|| b.speed().cmp(&a.speed()))
}

fn stable_move_to_position<T>(items: &mut [T], index: usize, target: usize) {
    if index > target {
        items[target..=index].rotate_right(1);
    }
}

/// Selection sort that resolves each run of tied elements separately.
///
/// Ties are only resolved with the generator under [`SpeedSortTieResolution::Random`], in which
/// case each run of ties draws from it in sorted order.
pub fn sort_with_ties<T, C>(
    items: &mut [T],
    compare: C,
    prng: &mut dyn PseudoRandomNumberGenerator,
    tie_resolution: SpeedSortTieResolution,
) where
    C: Fn(&T, &T) -> Ordering,
{
    let mut sorted = 0;
    while sorted + 1 < items.len() {
        // Find every element tied for first among the unsorted elements.
        let mut first = Vec::from([sorted]);
        for i in (sorted + 1)..items.len() {
            match compare(&items[first[0]], &items[i]) {
                Ordering::Less => continue,
                Ordering::Greater => first = Vec::from([i]),
                Ordering::Equal => first.push(i),
            }
        }
        let ties = first.len();
        for (i, index) in first.into_iter().enumerate() {
            stable_move_to_position(items, index, sorted + i);
        }
        if ties > 1 {
            let tied = &mut items[sorted..(sorted + ties)];
            match tie_resolution {
                SpeedSortTieResolution::Random => prng.shuffle(tied),
                SpeedSortTieResolution::Keep => (),
                SpeedSortTieResolution::Reverse => tied.reverse(),
            }
        }
        sorted += ties;
    }
}

/// Sorts the given items by speed order.
pub fn speed_sort<T>(
    items: &mut [T],
    prng: &mut dyn PseudoRandomNumberGenerator,
    tie_resolution: SpeedSortTieResolution,
) where
    T: SpeedOrderable,
{
    sort_with_ties(items, compare_speed_order, prng, tie_resolution);
}
