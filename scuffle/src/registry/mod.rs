//! Capability registries: symbol to behavior constructor tables.

mod capability_registry;
mod registries;

pub use capability_registry::{
    CapabilityRegistry,
    Constructor,
};
pub use registries::{
    AbilityRegistry,
    EffectRegistry,
    ItemRegistry,
    MoveRegistry,
    Registries,
};
