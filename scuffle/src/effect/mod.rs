//! Behavior and effect objects, and the hook contract they implement.
//!
//! Every object that can influence a battle (an active move, a battler's ability, its held
//! item, its status, and every battler, side, position, or field effect) implements [`Hooks`].
//! Handlers walk these objects in a fixed order and compose their answers. Objects never touch
//! battle state directly: they read through a [`HookContext`] and request mutations through
//! it, which routes the request back through the matching handler.

mod ability;
mod condition;
mod context;
mod events;
mod hooks;
mod item;
mod origin;
mod state;
mod store;

pub use ability::{
    AbilityBehavior,
    AbilityEffect,
    InertAbility,
};
pub use condition::{
    EffectBehavior,
    EffectEndReason,
    ForcedAction,
    InertEffect,
};
pub use context::HookContext;
pub use events::{
    BoostRequest,
    DamageKind,
    DamageRequest,
    EffectRequest,
    EffectTarget,
    HealRequest,
    MoveHit,
    StatusRequest,
};
pub use hooks::{
    Hooks,
    Veto,
};
pub use item::{
    HeldItem,
    InertItem,
    ItemBehavior,
};
pub use origin::{
    HookOrigin,
    LoadedBehavior,
};
pub use state::{
    EffectDuration,
    EffectState,
    StackPolicy,
};
pub use store::{
    EffectInstance,
    EffectStore,
    StatusCondition,
};
