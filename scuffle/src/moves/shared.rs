//! Standard move algorithms, shared by every move family that only changes part of a step.

use anyhow::Result;
use scuffle_data::{
    HitEffect,
    MoveData,
    Type,
};

use crate::{
    battle::{
        MonHandle,
        dispatch,
    },
    effect::{
        BoostRequest,
        EffectRequest,
        EffectTarget,
        HookContext,
        StatusRequest,
    },
};

/// Checks if any object vetoes the move hitting the target, such as protection.
pub fn hit_vetoed(
    ctx: &mut HookContext,
    user: MonHandle,
    target: MonHandle,
    mov: &MoveData,
) -> Result<bool> {
    let battle = ctx.battle_mut();
    let origins = dispatch::origins_for(battle, Some(user), Some(target), false);
    let vetoed_by = dispatch::prevention(battle, &origins, |hooks, context| {
        hooks.on_try_hit(context, user, target, mov)
    })?;
    Ok(vetoed_by.is_some())
}

/// Type-chart immunity for damaging moves, plus ground moves against battlers off the ground.
pub fn type_immune(ctx: &mut HookContext, target: MonHandle, mov: &MoveData) -> Result<bool> {
    if !mov.is_damaging() {
        return Ok(false);
    }
    let types = ctx.mon(target)?.types.clone();
    if ctx.type_chart().immune(mov.primary_type, &types) {
        return Ok(true);
    }
    if mov.primary_type == Type::Ground && !ctx.is_grounded(target)? {
        return Ok(true);
    }
    Ok(false)
}

/// Applies a data-driven payload to one battler.
///
/// Returns true if any part of the payload was applied.
pub fn apply_hit_effect(
    ctx: &mut HookContext,
    user: MonHandle,
    target: MonHandle,
    effect: &HitEffect,
) -> Result<bool> {
    if ctx.mon(target)?.hp == 0 {
        return Ok(false);
    }
    let mov = ctx.active_move_data();
    let mut applied = false;
    if let Some(status) = effect.status {
        let request = StatusRequest::new(target, status)
            .with_source(Some(user))
            .with_move(mov.clone());
        applied |= ctx.inflict_status(request)?.applied();
    }
    if let Some(boosts) = &effect.boosts {
        for (boost, delta) in boosts.non_zero() {
            let request = BoostRequest::new(target, boost, delta)
                .with_source(Some(user))
                .with_move(mov.clone());
            applied |= ctx.change_stat(request)?.applied();
        }
    }
    if let Some(volatile) = &effect.volatile {
        let request = EffectRequest::new(EffectTarget::Mon(target), volatile.clone())
            .with_source(Some(user))
            .with_move(mov.clone());
        applied |= ctx.add_effect(request)?.applied();
    }
    Ok(applied)
}

/// Applies the move's payload to every target hit, then the user's payload to the user.
pub fn apply_move_payload(
    ctx: &mut HookContext,
    user: MonHandle,
    targets: &[MonHandle],
    mov: &MoveData,
) -> Result<bool> {
    let mut applied = false;
    if !mov.hit_effect.is_empty() {
        for target in targets {
            applied |= apply_hit_effect(ctx, user, *target, &mov.hit_effect)?;
        }
    }
    if !mov.user_effect.is_empty() {
        applied |= apply_hit_effect(ctx, user, user, &mov.user_effect)?;
    }
    Ok(applied)
}
