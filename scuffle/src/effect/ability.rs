use std::{
    fmt,
    fmt::Debug,
    rc::Rc,
};

use anyhow::Result;
use scuffle_data::{
    AbilityData,
    Id,
};

use crate::effect::{
    EffectState,
    HookContext,
    Hooks,
};

/// Behavior of a passive ability.
pub trait AbilityBehavior: Hooks {
    /// Runs when the ability becomes active: on switch in, after an ability change, or when
    /// suppression ends.
    ///
    /// By default, an ability reacts to becoming active the same way it reacts to its owner
    /// entering the field.
    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        let owner = ctx.owner();
        self.on_switch_event(ctx, None, owner)
    }

    /// Hides the weather from every hook while the owner is active.
    fn suppresses_weather(&self) -> bool {
        false
    }

    /// Hides every other ability while the owner is active.
    fn suppresses_abilities(&self) -> bool {
        false
    }

    /// Keeps the owner off the ground.
    fn grants_levitation(&self) -> bool {
        false
    }
}

/// The ability used when no behavior is registered. Does nothing.
pub struct InertAbility;

impl Hooks for InertAbility {}

impl AbilityBehavior for InertAbility {}

/// The active ability of one battler.
#[derive(Clone)]
pub struct AbilityEffect {
    pub id: Id,
    pub data: AbilityData,
    pub behavior: Rc<dyn AbilityBehavior>,
    pub state: EffectState,
    /// Hidden from dispatch by another active battler's ability, but kept so it can be restored.
    pub suppressed: bool,
}

impl AbilityEffect {
    pub fn new(id: Id, data: AbilityData, behavior: Rc<dyn AbilityBehavior>) -> Self {
        Self {
            id,
            data,
            behavior,
            state: EffectState::default(),
            suppressed: false,
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }

    /// Checks if the ability currently takes part in dispatch.
    pub fn active(&self) -> bool {
        !self.suppressed
    }
}

impl Debug for AbilityEffect {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AbilityEffect")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("suppressed", &self.suppressed)
            .finish()
    }
}
