//! Non-volatile statuses.

use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    Fraction,
    Id,
    MoveCategory,
    MoveData,
    Status,
    Type,
};

use crate::{
    battle::MonHandle,
    catalogue::fraction_of_max_hp,
    effect::{
        DamageKind,
        DamageRequest,
        EffectBehavior,
        HookContext,
        Hooks,
        MoveHit,
        Veto,
    },
    registry::EffectRegistry,
};

fn log_cant(ctx: &mut HookContext, mon: MonHandle, status: Status) -> Result<()> {
    let event = log_event!(
        "cant",
        mon: ctx.mon(mon)?.position_details(),
        from: status.code()
    );
    ctx.log(event);
    Ok(())
}

fn residual_damage(ctx: &mut HookContext, fraction: Fraction, status: Status) -> Result<()> {
    let Some(owner) = ctx.owner() else {
        return Ok(());
    };
    let amount = fraction_of_max_hp(ctx, owner, fraction)?;
    ctx.damage(DamageRequest::indirect(
        owner,
        amount,
        DamageKind::Effect(status.code().to_owned()),
    ))?;
    Ok(())
}

/// Halves the owner's physical damage and hurts it every turn.
struct Burn;

impl Hooks for Burn {
    fn mod3_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit, _: i8) -> Result<Fraction> {
        if ctx.is_owner(hit.user) && hit.mov.category == MoveCategory::Physical {
            Ok(Fraction::new(1, 2))
        } else {
            Ok(Fraction::ONE)
        }
    }

    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        residual_damage(ctx, Fraction::new(1, 16), Status::Burn)
    }
}

impl EffectBehavior for Burn {
    fn name(&self) -> &str {
        "Burn"
    }
}

/// Halves the owner's speed and sometimes keeps it from moving.
struct Paralysis;

impl Hooks for Paralysis {
    fn speed_multiplier(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Fraction> {
        if ctx.is_owner(mon) {
            Ok(Fraction::new(1, 2))
        } else {
            Ok(Fraction::ONE)
        }
    }

    fn on_move_prevention(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &MoveData,
    ) -> Result<Veto> {
        if !ctx.is_owner(user) || !ctx.chance(1, 4) {
            return Ok(Veto::Allow);
        }
        log_cant(ctx, user, Status::Paralysis)?;
        Ok(Veto::Prevent)
    }
}

impl EffectBehavior for Paralysis {
    fn name(&self) -> &str {
        "Paralysis"
    }
}

/// Hurts the owner by a fixed fraction every turn.
struct Poison;

impl Hooks for Poison {
    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        residual_damage(ctx, Fraction::new(1, 8), Status::Poison)
    }
}

impl EffectBehavior for Poison {
    fn name(&self) -> &str {
        "Poison"
    }
}

/// Hurts the owner by a growing fraction every turn.
struct BadPoison;

impl Hooks for BadPoison {
    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        let stage = (ctx.state().counter + 1).min(15);
        ctx.state_mut().counter = stage;
        residual_damage(ctx, Fraction::new(stage as u64, 16), Status::BadPoison)
    }
}

impl EffectBehavior for BadPoison {
    fn name(&self) -> &str {
        "Bad Poison"
    }
}

/// Keeps the owner from moving for one to three of its turns.
struct Sleep;

impl Hooks for Sleep {
    fn on_move_prevention(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &MoveData,
    ) -> Result<Veto> {
        if !ctx.is_owner(user) {
            return Ok(Veto::Allow);
        }
        let remaining = ctx.state().counter.saturating_sub(1);
        ctx.state_mut().counter = remaining;
        if remaining == 0 {
            ctx.remove_self()?;
            return Ok(Veto::Allow);
        }
        log_cant(ctx, user, Status::Sleep)?;
        Ok(Veto::Prevent)
    }
}

impl EffectBehavior for Sleep {
    fn name(&self) -> &str {
        "Sleep"
    }

    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        let turns = ctx.random_range(2, 5) as u32;
        ctx.state_mut().counter = turns;
        Ok(())
    }
}

/// Keeps the owner from moving until it thaws, by chance or from a fire hit.
struct Freeze;

impl Hooks for Freeze {
    fn on_move_prevention(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &MoveData,
    ) -> Result<Veto> {
        if !ctx.is_owner(user) {
            return Ok(Veto::Allow);
        }
        if ctx.chance(1, 5) {
            ctx.remove_self()?;
            return Ok(Veto::Allow);
        }
        log_cant(ctx, user, Status::Freeze)?;
        Ok(Veto::Prevent)
    }

    fn on_post_damage(
        &self,
        ctx: &mut HookContext,
        request: &DamageRequest,
        _: u32,
    ) -> Result<()> {
        let thawing = ctx.is_owner(request.target)
            && request
                .mov
                .as_ref()
                .is_some_and(|mov| mov.primary_type == Type::Fire);
        if thawing && ctx.mon(request.target)?.hp > 0 {
            ctx.remove_self()?;
        }
        Ok(())
    }
}

impl EffectBehavior for Freeze {
    fn name(&self) -> &str {
        "Freeze"
    }
}

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register(Status::Burn.id(), |_: &Id| Rc::new(Burn));
    registry.register(Status::Paralysis.id(), |_: &Id| Rc::new(Paralysis));
    registry.register(Status::Poison.id(), |_: &Id| Rc::new(Poison));
    registry.register(Status::BadPoison.id(), |_: &Id| Rc::new(BadPoison));
    registry.register(Status::Sleep.id(), |_: &Id| Rc::new(Sleep));
    registry.register(Status::Freeze.id(), |_: &Id| Rc::new(Freeze));
}
