//! Battle and engine configuration.

mod battle_options;
mod engine_options;
mod team;

pub use battle_options::{
    BattleOptions,
    BattleType,
    PlayerData,
    SideData,
};
pub use engine_options::{
    EngineOptions,
    RandomizeBaseDamage,
    SpeedSortTieResolution,
};
pub use team::{
    MonData,
    TeamData,
};
