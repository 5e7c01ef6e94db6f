//! Handlers: the only code that mutates battle state.
//!
//! Every handler runs the same three phases. A prevention phase asks each relevant object for
//! a veto, and the first veto stops the mutation. A value phase lets objects override or
//! scale the proposed value. The mutation is then committed and logged, and a post-event
//! phase notifies every object in the same order. Hooks that request further mutations nest
//! one cascade level deeper.

mod ability;
mod damage;
mod effects;
mod field;
mod item;
mod residual;
mod stats;
mod status;
mod switch;

pub use ability::change_ability;
pub use damage::{
    damage,
    heal,
};
pub use effects::{
    add_effect,
    remove_effect,
};
pub use field::{
    set_terrain,
    set_weather,
};
pub use item::{
    take_item,
    use_item,
};
pub use residual::end_of_turn;
pub use stats::change_stat;
pub use status::{
    cure_status,
    inflict_status,
};
pub use switch::{
    can_switch,
    faint,
    place_mon,
    run_switch_in_events,
    switch_in,
};
