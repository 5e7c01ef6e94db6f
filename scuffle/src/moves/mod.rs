//! Move mechanics.
//!
//! A move's data says what it is; its [`MoveBehavior`] says how it works. Most moves use
//! [`BasicMove`]. The families here cover moves whose mechanics differ in a single step.

mod behavior;
mod families;
mod instance;
pub mod shared;

pub use behavior::{
    BasicMove,
    MoveBehavior,
    MoveFailure,
};
pub use families::{
    CounterMove,
    CrashOnMiss,
    DELAYED_HIT,
    DelayedHitMove,
    FixedAmount,
    FixedDamage,
    OneHitKnockOut,
    PROTECT,
    ProtectMove,
    RandomStatusMove,
    RemoveItemMove,
    ReplaceAbilityMove,
    STALL,
    SideConditionMove,
    StatusBoostedPower,
    TWO_TURN_MOVE,
    TerrainMove,
    TwoTurnMove,
    WeatherMove,
};
pub use instance::{
    ActiveMove,
    MoveInstance,
};
