//! Static data for scuffle battles.
//!
//! Everything in this crate is immutable metadata: identifiers, types, stats, and the data
//! records for moves, abilities, items, and species. Battles read these through the
//! [`DataStore`] trait and never write back.

extern crate alloc;

mod abilities;
mod datastore;
mod fraction;
mod id;
mod items;
mod moves;
mod species;
mod stats;
mod status;
mod types;

pub use abilities::{
    AbilityData,
    AbilityFlag,
};
pub use datastore::{
    DataStore,
    LocalDataStore,
    NotFoundError,
};
pub use fraction::Fraction;
pub use id::{
    Id,
    Identifiable,
};
pub use items::{
    ItemData,
    ItemFlag,
};
pub use moves::{
    Accuracy,
    HitEffect,
    MoveCategory,
    MoveData,
    MoveFlag,
    MoveTarget,
    MultihitType,
    SecondaryEffect,
};
pub use species::SpeciesData;
pub use stats::{
    Boost,
    BoostTable,
    Nature,
    Stat,
    StatTable,
};
pub use status::Status;
pub use types::{
    Type,
    TypeChart,
    TypeEffectiveness,
};
