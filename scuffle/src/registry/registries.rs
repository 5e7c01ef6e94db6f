use std::rc::Rc;

use scuffle_data::{
    AbilityData,
    Id,
    ItemData,
    MoveData,
};

use crate::{
    catalogue,
    effect::{
        AbilityBehavior,
        EffectBehavior,
        InertAbility,
        InertEffect,
        InertItem,
        ItemBehavior,
    },
    moves::{
        BasicMove,
        MoveBehavior,
    },
    registry::CapabilityRegistry,
};

pub type MoveRegistry = CapabilityRegistry<dyn MoveBehavior, MoveData>;
pub type AbilityRegistry = CapabilityRegistry<dyn AbilityBehavior, AbilityData>;
pub type ItemRegistry = CapabilityRegistry<dyn ItemBehavior, ItemData>;
pub type EffectRegistry = CapabilityRegistry<dyn EffectBehavior, Id>;

/// Every capability registry a battle needs.
///
/// Built once, before any battle starts, and shared by reference with every battle. Each
/// family has its own namespace, so a move and an effect may share a symbol.
pub struct Registries {
    pub moves: MoveRegistry,
    pub abilities: AbilityRegistry,
    pub items: ItemRegistry,
    /// Statuses, battler effects, side and position effects, weather, terrain, and field
    /// effects.
    pub effects: EffectRegistry,
}

impl Registries {
    /// Creates registries with no entries. Every lookup resolves to a base behavior.
    pub fn new() -> Self {
        Self {
            moves: MoveRegistry::new("moves", |_: &MoveData| Rc::new(BasicMove)),
            abilities: AbilityRegistry::new("abilities", |_: &AbilityData| Rc::new(InertAbility)),
            items: ItemRegistry::new("items", |_: &ItemData| Rc::new(InertItem)),
            effects: EffectRegistry::new("effects", |id: &Id| Rc::new(InertEffect::new(id))),
        }
    }

    /// Creates registries holding the standard behavior catalogue.
    pub fn standard() -> Self {
        let mut registries = Self::new();
        catalogue::register_all(&mut registries);
        registries
    }
}

impl Default for Registries {
    fn default() -> Self {
        Self::new()
    }
}
