use anyhow::Result;
use scuffle_data::{
    Accuracy,
    MoveData,
};

use crate::{
    battle::MonHandle,
    effect::{
        HookContext,
        Hooks,
    },
    moves::shared,
};

/// Why a move failed against its targets.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveFailure {
    /// The accuracy check failed.
    Missed,
    /// A target-side effect blocked the move.
    Blocked,
    /// The target was immune.
    Immune,
    /// No target was left to hit.
    NoTarget,
    /// The move could not be used at all.
    Unusable,
}

/// Mechanics of a move.
///
/// Every method has a default implementing the standard mechanics, so a move family only
/// overrides the step it changes. Families that need a variation of a standard step delegate
/// to the matching function in [`shared`][crate::moves::shared] rather than re-implementing it.
///
/// Move behaviors are also [`Hooks`], consulted as the first object of every mutation the move
/// causes.
#[allow(unused_variables)]
pub trait MoveBehavior: Hooks {
    /// Vetoes the move before it reaches any target. A move that is not usable still spends
    /// PP.
    fn usable_by_user(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        mov: &MoveData,
    ) -> Result<bool> {
        Ok(true)
    }

    /// Spends this use charging instead of hitting.
    fn charge_turn(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        mov: &MoveData,
    ) -> Result<bool> {
        Ok(false)
    }

    /// Removes one target from the move without failing it against the others.
    ///
    /// By default, a target is blocked if any object vetoes the hit in
    /// [`Hooks::on_try_hit`].
    fn blocked_by_target(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<bool> {
        shared::hit_vetoed(ctx, user, target, mov)
    }

    fn base_accuracy(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<Accuracy> {
        Ok(mov.accuracy)
    }

    /// Checks if the target is immune, after the accuracy check and before damage.
    fn target_immune(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<bool> {
        shared::type_immune(ctx, target, mov)
    }

    /// Base power fed into the damage formula.
    fn real_base_power(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<u32> {
        Ok(mov.base_power)
    }

    /// Custom damage that bypasses the damage formula.
    fn damages(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<Option<u32>> {
        Ok(None)
    }

    /// Checks if the move deals its damage when used. Moves that deal damage later skip the
    /// damage step entirely.
    fn damages_on_use(&self) -> bool {
        true
    }

    /// Applies the non-damage payload to every target that was hit.
    ///
    /// Returns false if the payload changed nothing.
    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        mov: &MoveData,
    ) -> Result<bool> {
        shared::apply_move_payload(ctx, user, targets, mov)
    }

    /// Runs when the move fails against its targets.
    fn on_move_failure(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        reason: MoveFailure,
    ) -> Result<()> {
        Ok(())
    }
}

/// A move with standard mechanics: the damage formula plus the payload in its data.
pub struct BasicMove;

impl Hooks for BasicMove {}

impl MoveBehavior for BasicMove {}
