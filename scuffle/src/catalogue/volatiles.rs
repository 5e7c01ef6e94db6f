//! Effects tied to a single battler, removed when it leaves the field.

use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    Boost,
    Fraction,
    Id,
    MoveData,
    MoveFlag,
    Stat,
    Type,
};

use crate::{
    battle::{
        MonHandle,
        base_damage,
        boosted_stat,
    },
    catalogue::fraction_of_max_hp,
    effect::{
        DamageKind,
        DamageRequest,
        EffectBehavior,
        EffectDuration,
        EffectTarget,
        ForcedAction,
        HealRequest,
        HookContext,
        Hooks,
        StackPolicy,
        Veto,
    },
    moves::{
        PROTECT,
        STALL,
        TWO_TURN_MOVE,
    },
    registry::EffectRegistry,
};

pub const CONFUSION: &str = "confusion";
pub const FLINCH: &str = "flinch";
pub const LEECH_SEED: &str = "leechseed";
pub const PARTIALLY_TRAPPED: &str = "partiallytrapped";

/// Base power of the typeless hit a confused battler deals itself.
const CONFUSION_BASE_POWER: u64 = 40;

/// Makes the owner hurt itself a third of the time, for two to five of its turns.
struct Confusion;

impl Confusion {
    fn self_hit_damage(ctx: &HookContext, mon: MonHandle) -> Result<u32> {
        let data = ctx.mon(mon)?;
        let attack = boosted_stat(data.stats.get(Stat::Atk) as u64, data.boosts.get(Boost::Atk));
        let defense = boosted_stat(data.stats.get(Stat::Def) as u64, data.boosts.get(Boost::Def));
        let damage = base_damage(data.level, CONFUSION_BASE_POWER, attack, defense) + 2;
        Ok(damage as u32)
    }
}

impl Hooks for Confusion {
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

        let event =
            log_event!("activate", mon: ctx.mon(user)?.position_details()).with("effect", "Confusion");
        ctx.log(event);
        if !ctx.chance(1, 3) {
            return Ok(Veto::Allow);
        }
        let amount = Self::self_hit_damage(ctx, user)?;
        ctx.damage(DamageRequest::indirect(user, amount, DamageKind::Confusion).with_source(Some(user)))?;
        Ok(Veto::Prevent)
    }
}

impl EffectBehavior for Confusion {
    fn name(&self) -> &str {
        "Confusion"
    }

    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        let turns = ctx.random_range(2, 6) as u32;
        ctx.state_mut().counter = turns + 1;
        Ok(())
    }
}

/// Drains the owner every turn to heal the battler that planted it.
struct LeechSeed;

impl Hooks for LeechSeed {
    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        let Some(owner) = ctx.owner() else {
            return Ok(());
        };
        let amount = fraction_of_max_hp(ctx, owner, Fraction::new(1, 8))?;
        let source = ctx.state().source;
        let dealt = ctx
            .damage(
                DamageRequest::indirect(owner, amount, DamageKind::Effect("Leech Seed".to_owned()))
                    .with_source(source),
            )?
            .value()
            .unwrap_or(0);
        let Some(source) = source else {
            return Ok(());
        };
        if dealt > 0 && ctx.mon(source)?.can_act() {
            ctx.heal(HealRequest {
                target: source,
                amount: dealt,
                source: Some(owner),
                from: Some("Leech Seed".to_owned()),
            })?;
        }
        Ok(())
    }
}

impl EffectBehavior for LeechSeed {
    fn name(&self) -> &str {
        "Leech Seed"
    }

    fn applies_to(&self, ctx: &mut HookContext, target: &EffectTarget) -> Result<bool> {
        match target {
            EffectTarget::Mon(mon) => Ok(!ctx.mon(*mon)?.has_type(Type::Grass)),
            _ => Ok(false),
        }
    }
}

/// Keeps the owner from switching and hurts it every turn, while the binding battler stays.
struct PartiallyTrapped;

impl Hooks for PartiallyTrapped {
    fn on_switch_prevention(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Veto> {
        Ok(Veto::from_prevent(ctx.is_owner(mon)))
    }

    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        let Some(owner) = ctx.owner() else {
            return Ok(());
        };
        let source_active = match ctx.state().source {
            Some(source) => ctx.mon(source)?.can_act(),
            None => false,
        };
        if !source_active {
            ctx.remove_self()?;
            return Ok(());
        }
        let amount = fraction_of_max_hp(ctx, owner, Fraction::new(1, 8))?;
        let source = ctx.state().source;
        ctx.damage(
            DamageRequest::indirect(owner, amount, DamageKind::Effect("Bind".to_owned()))
                .with_source(source),
        )?;
        Ok(())
    }
}

impl EffectBehavior for PartiallyTrapped {
    fn name(&self) -> &str {
        "Bind"
    }

    fn duration(&self, ctx: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(4 + ctx.random_range(0, 2) as u8))
    }
}

/// Keeps the owner from moving for the rest of the turn.
struct Flinch;

impl Hooks for Flinch {
    fn on_move_prevention(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &MoveData,
    ) -> Result<Veto> {
        if !ctx.is_owner(user) {
            return Ok(Veto::Allow);
        }
        let event = log_event!("cant", mon: ctx.mon(user)?.position_details(), from: "flinch");
        ctx.log(event);
        Ok(Veto::Prevent)
    }
}

impl EffectBehavior for Flinch {
    fn name(&self) -> &str {
        "Flinch"
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(1))
    }

    fn silent(&self) -> bool {
        true
    }
}

/// Blocks moves aimed at the owner for the rest of the turn.
struct Protect;

impl Hooks for Protect {
    fn on_try_hit(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<Veto> {
        if !ctx.is_owner(target) || user == target || !mov.has_flag(MoveFlag::Protect) {
            return Ok(Veto::Allow);
        }
        let event = log_event!("activate", mon: ctx.mon(target)?.position_details())
            .with("effect", "Protect");
        ctx.log(event);
        Ok(Veto::Prevent)
    }
}

impl EffectBehavior for Protect {
    fn name(&self) -> &str {
        "Protect"
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(1))
    }

    fn silent(&self) -> bool {
        true
    }

    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        if let Some(owner) = ctx.owner() {
            let event = log_event!("singleturn", mon: ctx.mon(owner)?.position_details())
                .with("effect", "Protect");
            ctx.log(event);
        }
        Ok(())
    }
}

/// Counts consecutive uses of protection. Lapses if the owner does not protect again the next
/// turn.
struct Stall;

impl Hooks for Stall {}

impl EffectBehavior for Stall {
    fn name(&self) -> &str {
        "Stall"
    }

    fn stack_policy(&self) -> StackPolicy {
        StackPolicy::Restart
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(2))
    }

    fn silent(&self) -> bool {
        true
    }

    fn on_start(&self, ctx: &mut HookContext) -> Result<()> {
        ctx.state_mut().layers = 1;
        Ok(())
    }

    fn on_restart(&self, ctx: &mut HookContext) -> Result<bool> {
        let state = ctx.state_mut();
        state.layers = state.layers.saturating_add(1);
        state.duration = EffectDuration::Turns(2);
        Ok(true)
    }
}

/// Marks a move being charged, and makes the owner use it on its next turn.
struct TwoTurnMove;

impl Hooks for TwoTurnMove {}

impl EffectBehavior for TwoTurnMove {
    fn name(&self) -> &str {
        "Charging"
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(2))
    }

    fn silent(&self) -> bool {
        true
    }

    fn forced_action(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Option<ForcedAction>> {
        if !ctx.is_owner(mon) {
            return Ok(None);
        }
        Ok(ctx.state().move_id.clone().map(|mov| ForcedAction::Move {
            mov,
            target: ctx.state().target,
        }))
    }
}

pub(super) fn register(registry: &mut EffectRegistry) {
    registry.register(CONFUSION, |_: &Id| Rc::new(Confusion));
    registry.register(LEECH_SEED, |_: &Id| Rc::new(LeechSeed));
    registry.register(PARTIALLY_TRAPPED, |_: &Id| Rc::new(PartiallyTrapped));
    registry.register(FLINCH, |_: &Id| Rc::new(Flinch));
    registry.register(PROTECT, |_: &Id| Rc::new(Protect));
    registry.register(STALL, |_: &Id| Rc::new(Stall));
    registry.register(TWO_TURN_MOVE, |_: &Id| Rc::new(TwoTurnMove));
}
