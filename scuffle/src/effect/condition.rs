use anyhow::Result;
use scuffle_data::Id;

use crate::{
    battle::MonHandle,
    effect::{
        EffectDuration,
        EffectTarget,
        HookContext,
        Hooks,
        StackPolicy,
    },
};

/// Why an effect is ending.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EffectEndReason {
    /// The duration ran out at the end of a turn.
    Expired,
    /// Something removed the effect explicitly.
    Removed,
    /// The battler the effect is tied to left the field.
    SwitchOut,
    /// The battler the effect is tied to fainted.
    Faint,
}

/// An action that replaces the one a player submitted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ForcedAction {
    /// Use the given move, without spending PP.
    Move {
        mov: Id,
        target: Option<MonHandle>,
    },
    /// Lose the turn.
    Skip,
}

/// Behavior of an effect tied to a battler, a position, a side, or the field.
///
/// Statuses, weather, and terrain are effects too.
#[allow(unused_variables)]
pub trait EffectBehavior: Hooks {
    /// Display name for the event log.
    fn name(&self) -> &str;

    /// What happens when the effect is added to a target that already has it.
    fn stack_policy(&self) -> StackPolicy {
        StackPolicy::Reject
    }

    /// How long a fresh instance lasts.
    fn duration(&self, ctx: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Indefinite)
    }

    /// Skips the start and end events, for effects that announce themselves.
    fn silent(&self) -> bool {
        false
    }

    /// Keeps a battler-tied effect when its battler switches out.
    fn survives_switch(&self) -> bool {
        false
    }

    /// Checks if the effect can exist on the target at all, such as leech seed on a grass
    /// type. An effect that does not apply is a no-effect outcome, not a prevention.
    fn applies_to(&self, ctx: &mut HookContext, target: &EffectTarget) -> Result<bool> {
        Ok(true)
    }

    /// Runs once the new instance is stored.
    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        Ok(())
    }

    /// Runs when the effect is added again under [`StackPolicy::Restart`].
    ///
    /// Returns false if the restart had no effect, such as a hazard at its layer limit.
    fn on_restart(&self, ctx: &mut HookContext) -> Result<bool> {
        Ok(false)
    }

    /// Runs before the instance is removed.
    fn on_end(&self, ctx: &mut HookContext, reason: EffectEndReason) -> Result<()> {
        Ok(())
    }

    /// Overrides the action submitted for a battler this turn.
    fn forced_action(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Option<ForcedAction>> {
        Ok(None)
    }
}

/// The effect used when no behavior is registered. Exists, but does nothing.
pub struct InertEffect {
    name: String,
}

impl InertEffect {
    pub fn new(id: &Id) -> Self {
        Self {
            name: id.to_string(),
        }
    }
}

impl Hooks for InertEffect {}

impl EffectBehavior for InertEffect {
    fn name(&self) -> &str {
        &self.name
    }
}
