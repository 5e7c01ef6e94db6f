//! Effects on one side of the field, and on single positions of a side.

use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    Fraction,
    Id,
    MoveCategory,
    Type,
};

use crate::{
    battle::{
        MonHandle,
        apply_type_modifier,
        land_delayed_hit,
    },
    catalogue::{
        CONFUSION,
        fraction_of_max_hp,
    },
    config::BattleType,
    effect::{
        DamageKind,
        DamageRequest,
        EffectBehavior,
        EffectDuration,
        EffectEndReason,
        EffectRequest,
        EffectTarget,
        HookContext,
        HookOrigin,
        Hooks,
        MoveHit,
        StackPolicy,
        StatusRequest,
        Veto,
    },
    moves::DELAYED_HIT,
    registry::EffectRegistry,
};

pub const STEALTH_ROCK: &str = "stealthrock";
pub const SPIKES: &str = "spikes";
pub const REFLECT: &str = "reflect";
pub const LIGHT_SCREEN: &str = "lightscreen";
pub const SAFEGUARD: &str = "safeguard";
pub const TAILWIND: &str = "tailwind";

const SCREEN_TURNS: u8 = 5;

fn entering_own_side(ctx: &HookContext, who_in: Option<MonHandle>) -> Result<Option<MonHandle>> {
    let Some(mon) = who_in else {
        return Ok(None);
    };
    if Some(ctx.mon(mon)?.side) == ctx.owner_side() {
        Ok(Some(mon))
    } else {
        Ok(None)
    }
}

fn on_owner_side(ctx: &HookContext, mon: MonHandle) -> Result<bool> {
    Ok(Some(ctx.mon(mon)?.side) == ctx.owner_side())
}

/// Hurts every battler entering the side, scaled by how effective rock is against it.
struct StealthRock;

impl Hooks for StealthRock {
    fn on_switch_event(
        &self,
        ctx: &mut HookContext,
        _: Option<MonHandle>,
        who_in: Option<MonHandle>,
    ) -> Result<()> {
        let Some(mon) = entering_own_side(ctx, who_in)? else {
            return Ok(());
        };
        let data = ctx.mon(mon)?;
        let type_modifier = ctx.type_chart().modifier(Type::Rock, &data.types);
        let amount = (apply_type_modifier(data.max_hp as u64, type_modifier) / 8).max(1) as u32;
        ctx.damage(DamageRequest::indirect(
            mon,
            amount,
            DamageKind::Effect("Stealth Rock".to_owned()),
        ))?;
        Ok(())
    }
}

impl EffectBehavior for StealthRock {
    fn name(&self) -> &str {
        "Stealth Rock"
    }
}

/// Hurts grounded battlers entering the side. Stacks up to three layers.
struct Spikes;

impl Spikes {
    const MAX_LAYERS: u8 = 3;

    fn damage_fraction(layers: u8) -> Fraction {
        match layers {
            0 | 1 => Fraction::new(1, 8),
            2 => Fraction::new(1, 6),
            _ => Fraction::new(1, 4),
        }
    }
}

impl Hooks for Spikes {
    fn on_switch_event(
        &self,
        ctx: &mut HookContext,
        _: Option<MonHandle>,
        who_in: Option<MonHandle>,
    ) -> Result<()> {
        let Some(mon) = entering_own_side(ctx, who_in)? else {
            return Ok(());
        };
        if !ctx.is_grounded(mon)? {
            return Ok(());
        }
        let fraction = Self::damage_fraction(ctx.state().layers);
        let amount = fraction_of_max_hp(ctx, mon, fraction)?;
        ctx.damage(DamageRequest::indirect(
            mon,
            amount,
            DamageKind::Effect("Spikes".to_owned()),
        ))?;
        Ok(())
    }
}

impl EffectBehavior for Spikes {
    fn name(&self) -> &str {
        "Spikes"
    }

    fn stack_policy(&self) -> StackPolicy {
        StackPolicy::Restart
    }

    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        ctx.state_mut().layers = 1;
        Ok(())
    }

    fn on_restart(&self, ctx: &mut HookContext) -> Result<bool> {
        let state = ctx.state_mut();
        if state.layers >= Self::MAX_LAYERS {
            return Ok(false);
        }
        state.layers += 1;
        Ok(true)
    }
}

/// Weakens non-critical hits of one category against the side.
struct Screen {
    name: &'static str,
    category: MoveCategory,
}

impl Hooks for Screen {
    fn mod3_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit, _: i8) -> Result<Fraction> {
        if hit.crit || hit.mov.category != self.category || !on_owner_side(ctx, hit.target)? {
            return Ok(Fraction::ONE);
        }
        match ctx.battle().battle_type() {
            BattleType::Singles => Ok(Fraction::new(1, 2)),
            BattleType::Doubles => Ok(Fraction::new(2, 3)),
        }
    }
}

impl EffectBehavior for Screen {
    fn name(&self) -> &str {
        self.name
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(SCREEN_TURNS))
    }
}

/// Protects the side from statuses and confusion caused by other battlers.
struct Safeguard;

impl Safeguard {
    fn guard(ctx: &mut HookContext, target: MonHandle, source: Option<MonHandle>) -> Result<Veto> {
        let from_other = source.is_some_and(|source| source != target);
        if !from_other || !on_owner_side(ctx, target)? {
            return Ok(Veto::Allow);
        }
        let event = log_event!("activate", mon: ctx.mon(target)?.position_details())
            .with("effect", "Safeguard");
        ctx.log(event);
        Ok(Veto::Prevent)
    }
}

impl Hooks for Safeguard {
    fn on_status_prevention(&self, ctx: &mut HookContext, request: &StatusRequest) -> Result<Veto> {
        Self::guard(ctx, request.target, request.source)
    }

    fn on_effect_prevention(&self, ctx: &mut HookContext, request: &EffectRequest) -> Result<Veto> {
        match request.target {
            EffectTarget::Mon(target) if request.id == *CONFUSION => {
                Self::guard(ctx, target, request.source)
            }
            _ => Ok(Veto::Allow),
        }
    }
}

impl EffectBehavior for Safeguard {
    fn name(&self) -> &str {
        "Safeguard"
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(5))
    }
}

/// Doubles the speed of the side.
struct Tailwind;

impl Hooks for Tailwind {
    fn speed_multiplier(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Fraction> {
        if on_owner_side(ctx, mon)? {
            Ok(Fraction::new(2, 1))
        } else {
            Ok(Fraction::ONE)
        }
    }
}

impl EffectBehavior for Tailwind {
    fn name(&self) -> &str {
        "Tailwind"
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(4))
    }
}

/// A delayed hit waiting on a position. Lands on whoever holds the position when it expires.
struct DelayedHit;

impl Hooks for DelayedHit {}

impl EffectBehavior for DelayedHit {
    fn name(&self) -> &str {
        "Future Sight"
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(3))
    }

    fn silent(&self) -> bool {
        true
    }

    fn on_end(&self, ctx: &mut HookContext, reason: EffectEndReason) -> Result<()> {
        if reason != EffectEndReason::Expired {
            return Ok(());
        }
        let HookOrigin::SlotEffect(side, slot, _) = *ctx.origin() else {
            return Ok(());
        };
        let (Some(source), Some(mov)) = (ctx.state().source, ctx.state().move_id.clone()) else {
            return Ok(());
        };
        let Some(target) = ctx.battle().active_mon(side, slot) else {
            return Ok(());
        };
        let event = log_event!("end", mon: ctx.mon(target)?.position_details())
            .with("effect", self.name());
        ctx.log(event);
        land_delayed_hit(ctx.battle_mut(), source, target, &mov)?;
        Ok(())
    }
}

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register(STEALTH_ROCK, |_: &Id| Rc::new(StealthRock));
    registry.register(SPIKES, |_: &Id| Rc::new(Spikes));
    registry.register(REFLECT, |_: &Id| {
        Rc::new(Screen {
            name: "Reflect",
            category: MoveCategory::Physical,
        })
    });
    registry.register(LIGHT_SCREEN, |_: &Id| {
        Rc::new(Screen {
            name: "Light Screen",
            category: MoveCategory::Special,
        })
    });
    registry.register(SAFEGUARD, |_: &Id| Rc::new(Safeguard));
    registry.register(TAILWIND, |_: &Id| Rc::new(Tailwind));
    registry.register(DELAYED_HIT, |_: &Id| Rc::new(DelayedHit));
}
