use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    Fraction,
    ItemData,
};

use crate::{
    catalogue::fraction_of_max_hp,
    effect::{
        DamageKind,
        DamageRequest,
        HealRequest,
        HookContext,
        Hooks,
        ItemBehavior,
        MoveHit,
    },
    registry::ItemRegistry,
};

/// Restores a sixteenth of the holder's HP every turn.
struct Leftovers;

impl Hooks for Leftovers {
    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        let Some(owner) = ctx.owner() else {
            return Ok(());
        };
        let amount = fraction_of_max_hp(ctx, owner, Fraction::new(1, 16))?;
        let from = ctx.describe_origin();
        ctx.heal(HealRequest {
            target: owner,
            amount,
            source: Some(owner),
            from,
        })?;
        Ok(())
    }
}

impl ItemBehavior for Leftovers {}

/// Powers up the holder's moves, at the cost of a tenth of its HP once per turn.
struct LifeOrb;

impl Hooks for LifeOrb {
    fn mod3_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit, _: i8) -> Result<Fraction> {
        if ctx.is_owner(hit.user) {
            Ok(Fraction::new(13, 10))
        } else {
            Ok(Fraction::ONE)
        }
    }

    fn on_post_damage(&self, ctx: &mut HookContext, request: &DamageRequest, _: u32) -> Result<()> {
        let Some(owner) = request.source.filter(|source| ctx.is_owner(*source)) else {
            return Ok(());
        };
        if !request.kind.is_direct() || owner == request.target {
            return Ok(());
        }
        let turn = ctx.turn() as u32;
        if ctx.state().counter == turn || !ctx.mon(owner)?.can_act() {
            return Ok(());
        }
        ctx.state_mut().counter = turn;
        let amount = fraction_of_max_hp(ctx, owner, Fraction::new(1, 10))?;
        ctx.damage(
            DamageRequest::indirect(owner, amount, DamageKind::Effect("Life Orb".to_owned()))
                .with_source(Some(owner)),
        )?;
        Ok(())
    }
}

impl ItemBehavior for LifeOrb {}

/// Powers up the holder's physical moves, but locks it into the first move it uses.
struct ChoiceBand;

impl Hooks for ChoiceBand {
    fn atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        if ctx.is_owner(hit.user) {
            Ok(Fraction::new(3, 2))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl ItemBehavior for ChoiceBand {
    fn locks_move(&self) -> bool {
        true
    }
}

/// Powers up the holder's super-effective hits.
struct ExpertBelt;

impl Hooks for ExpertBelt {
    fn mod3_multiplier(
        &self,
        ctx: &mut HookContext,
        hit: &MoveHit,
        type_modifier: i8,
    ) -> Result<Fraction> {
        if ctx.is_owner(hit.user) && type_modifier > 0 {
            Ok(Fraction::new(6, 5))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl ItemBehavior for ExpertBelt {}

/// Survives a knockout hit from full HP once, and is used up.
struct FocusSash;

impl Hooks for FocusSash {
    fn on_damage_cap(
        &self,
        ctx: &mut HookContext,
        request: &DamageRequest,
        damage: u32,
    ) -> Result<Option<u32>> {
        if !ctx.is_owner(request.target) || !request.kind.is_direct() {
            return Ok(None);
        }
        let mon = ctx.mon(request.target)?;
        if mon.hp != mon.max_hp || damage < mon.hp {
            return Ok(None);
        }
        let capped = mon.hp - 1;
        ctx.use_item(request.target)?;
        Ok(Some(capped))
    }
}

impl ItemBehavior for FocusSash {}

/// Restores a quarter of the holder's HP once it falls to half or lower, and is used up.
struct SitrusBerry;

impl Hooks for SitrusBerry {
    fn on_post_damage(&self, ctx: &mut HookContext, request: &DamageRequest, _: u32) -> Result<()> {
        if !ctx.is_owner(request.target) {
            return Ok(());
        }
        let mon = ctx.mon(request.target)?;
        if mon.hp == 0 || mon.hp > mon.max_hp / 2 {
            return Ok(());
        }
        let amount = fraction_of_max_hp(ctx, request.target, Fraction::new(1, 4))?;
        let from = ctx.describe_origin();
        if !ctx.use_item(request.target)?.applied() {
            return Ok(());
        }
        ctx.heal(HealRequest {
            target: request.target,
            amount,
            source: Some(request.target),
            from,
        })?;
        Ok(())
    }
}

impl ItemBehavior for SitrusBerry {}

pub(super) fn register(registry: &mut ItemRegistry) {
    registry.register("leftovers", |_: &ItemData| Rc::new(Leftovers));
    registry.register("lifeorb", |_: &ItemData| Rc::new(LifeOrb));
    registry.register("choiceband", |_: &ItemData| Rc::new(ChoiceBand));
    registry.register("expertbelt", |_: &ItemData| Rc::new(ExpertBelt));
    registry.register("focussash", |_: &ItemData| Rc::new(FocusSash));
    registry.register("sitrusberry", |_: &ItemData| Rc::new(SitrusBerry));
}
