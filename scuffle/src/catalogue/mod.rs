//! The standard behavior catalogue.
//!
//! A representative set of moves, abilities, items, statuses, and effects that together use
//! every hook in the contract. Anything not registered here falls back to the base behavior of
//! its family.

mod abilities;
mod conditions;
mod items;
mod moves;
mod side;
mod volatiles;
mod weather;

use anyhow::Result;
use scuffle_data::Fraction;

use crate::{
    battle::MonHandle,
    effect::HookContext,
    registry::Registries,
};

pub use side::{
    LIGHT_SCREEN,
    REFLECT,
    SAFEGUARD,
    SPIKES,
    STEALTH_ROCK,
    TAILWIND,
};
pub use volatiles::{
    CONFUSION,
    FLINCH,
    LEECH_SEED,
    PARTIALLY_TRAPPED,
};
pub use weather::{
    ELECTRIC_TERRAIN,
    HAIL,
    RAIN,
    SANDSTORM,
    SUN,
};

/// Registers the whole catalogue.
pub fn register_all(registries: &mut Registries) {
    moves::register(&mut registries.moves);
    abilities::register(&mut registries.abilities);
    items::register(&mut registries.items);
    conditions::register(&mut registries.effects);
    volatiles::register(&mut registries.effects);
    side::register(&mut registries.effects);
    weather::register(&mut registries.effects);
}

/// A fraction of a battler's maximum HP, at least 1.
fn fraction_of_max_hp(ctx: &HookContext, mon: MonHandle, fraction: Fraction) -> Result<u32> {
    Ok((fraction.apply(ctx.mon(mon)?.max_hp as u64) as u32).max(1))
}
