//! Move families: one small customization value each, on top of the standard mechanics.

use anyhow::Result;
use scuffle_data::{
    Accuracy,
    Id,
    MoveCategory,
    MoveData,
    MoveTarget,
    Status,
};

use crate::{
    battle::MonHandle,
    effect::{
        DamageKind,
        DamageRequest,
        EffectRequest,
        EffectTarget,
        HookContext,
        Hooks,
        StatusRequest,
    },
    moves::{
        MoveBehavior,
        MoveFailure,
        shared,
    },
};

/// Battler effect marking a move being charged.
pub const TWO_TURN_MOVE: &str = "twoturnmove";
/// Battler effect blocking moves for the rest of the turn.
pub const PROTECT: &str = "protect";
/// Battler effect counting consecutive protection.
pub const STALL: &str = "stall";
/// Position effect holding a delayed hit.
pub const DELAYED_HIT: &str = "futuresight";

/// Damage a [`FixedDamage`] move deals, regardless of stats.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FixedAmount {
    Constant(u32),
    /// Equal to the user's level.
    Level,
    /// Half of the target's current HP, at least 1.
    HalfCurrentHp,
}

/// A move dealing a fixed amount of damage.
pub struct FixedDamage(pub FixedAmount);

impl Hooks for FixedDamage {}

impl MoveBehavior for FixedDamage {
    fn damages(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        _: &MoveData,
    ) -> Result<Option<u32>> {
        let amount = match self.0 {
            FixedAmount::Constant(amount) => amount,
            FixedAmount::Level => ctx.mon(user)?.level as u32,
            FixedAmount::HalfCurrentHp => (ctx.mon(target)?.hp / 2).max(1),
        };
        Ok(Some(amount))
    }
}

/// A move that knocks the target out in one hit.
///
/// Accuracy rises with the level difference, and targets of a higher level are immune.
pub struct OneHitKnockOut;

impl Hooks for OneHitKnockOut {}

impl MoveBehavior for OneHitKnockOut {
    fn base_accuracy(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<Accuracy> {
        let base = match mov.accuracy {
            Accuracy::Chance(chance) => chance,
            Accuracy::Exempt => return Ok(Accuracy::Exempt),
        };
        let difference = ctx
            .mon(user)?
            .level
            .saturating_sub(ctx.mon(target)?.level);
        Ok(Accuracy::Chance(base.saturating_add(difference).min(100)))
    }

    fn target_immune(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<bool> {
        if ctx.mon(target)?.level > ctx.mon(user)?.level {
            return Ok(true);
        }
        shared::type_immune(ctx, target, mov)
    }

    fn damages(
        &self,
        ctx: &mut HookContext,
        _: MonHandle,
        target: MonHandle,
        _: &MoveData,
    ) -> Result<Option<u32>> {
        Ok(Some(ctx.mon(target)?.hp))
    }
}

/// A move that charges on its first turn and hits on the second.
pub struct TwoTurnMove {
    /// Weather in which the move skips its charging turn.
    pub skip_in_weather: Option<&'static str>,
}

impl Hooks for TwoTurnMove {}

impl MoveBehavior for TwoTurnMove {
    fn charge_turn(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        mov: &MoveData,
    ) -> Result<bool> {
        let charge = Id::from(TWO_TURN_MOVE);
        if ctx.mon(user)?.effects.contains_key(&charge) {
            ctx.remove_effect(EffectTarget::Mon(user), &charge)?;
            return Ok(false);
        }
        if let Some(weather) = self.skip_in_weather {
            if ctx.weather().is_some_and(|current| *current == weather) {
                return Ok(false);
            }
        }

        let event =
            log_event!("prepare", mon: ctx.mon(user)?.position_details()).with("move", &mov.name);
        ctx.log(event);
        let request = EffectRequest::new(EffectTarget::Mon(user), charge)
            .with_source(Some(user))
            .with_move(ctx.active_move_data())
            .with_move_target(targets.first().copied());
        ctx.add_effect(request)?;
        Ok(true)
    }
}

/// A move returning double the damage the user took from a foe this turn.
pub struct CounterMove {
    /// The category of hit the move counters.
    pub category: MoveCategory,
}

impl CounterMove {
    fn countered_damage(&self, ctx: &HookContext, user: MonHandle) -> Result<Option<u32>> {
        let turn = ctx.turn();
        let mon = ctx.mon(user)?;
        Ok(mon
            .last_hit
            .as_ref()
            .filter(|hit| hit.turn == turn && hit.category == self.category)
            .filter(|hit| ctx.mon(hit.source).is_ok_and(|source| source.side != mon.side))
            .map(|hit| hit.damage))
    }
}

impl Hooks for CounterMove {}

impl MoveBehavior for CounterMove {
    fn usable_by_user(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &[MonHandle],
        _: &MoveData,
    ) -> Result<bool> {
        Ok(self
            .countered_damage(ctx, user)?
            .is_some_and(|damage| damage > 0))
    }

    fn damages(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: MonHandle,
        _: &MoveData,
    ) -> Result<Option<u32>> {
        let damage = self.countered_damage(ctx, user)?.unwrap_or(0);
        Ok(Some(damage.saturating_mul(2).max(1)))
    }
}

/// A move that hurts its user for half its maximum HP when it fails to connect.
pub struct CrashOnMiss;

impl Hooks for CrashOnMiss {}

impl MoveBehavior for CrashOnMiss {
    fn on_move_failure(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &[MonHandle],
        reason: MoveFailure,
    ) -> Result<()> {
        if !matches!(
            reason,
            MoveFailure::Missed | MoveFailure::Blocked | MoveFailure::Immune
        ) {
            return Ok(());
        }
        let amount = (ctx.mon(user)?.max_hp / 2).max(1);
        ctx.damage(DamageRequest::indirect(user, amount, DamageKind::Crash).with_source(Some(user)))?;
        Ok(())
    }
}

/// A move setting the weather.
pub struct WeatherMove(pub &'static str);

impl Hooks for WeatherMove {}

impl MoveBehavior for WeatherMove {
    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        _: MonHandle,
        _: &[MonHandle],
        _: &MoveData,
    ) -> Result<bool> {
        Ok(ctx.set_weather(Some(Id::from(self.0)))?.applied())
    }
}

/// A move setting the terrain.
pub struct TerrainMove(pub &'static str);

impl Hooks for TerrainMove {}

impl MoveBehavior for TerrainMove {
    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        _: MonHandle,
        _: &[MonHandle],
        _: &MoveData,
    ) -> Result<bool> {
        Ok(ctx.set_terrain(Some(Id::from(self.0)))?.applied())
    }
}

/// A move adding an effect to a side: the foe's side if the move targets it, otherwise the
/// user's.
pub struct SideConditionMove(pub &'static str);

impl Hooks for SideConditionMove {}

impl MoveBehavior for SideConditionMove {
    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &[MonHandle],
        mov: &MoveData,
    ) -> Result<bool> {
        let side = ctx.mon(user)?.side;
        let side = if mov.target == MoveTarget::FoeSide {
            ctx.battle().side(side)?.foe_index()
        } else {
            side
        };
        let request = EffectRequest::new(EffectTarget::Side(side), self.0)
            .with_source(Some(user))
            .with_move(ctx.active_move_data());
        Ok(ctx.add_effect(request)?.applied())
    }
}

/// A move that hits the target's position a few turns later.
///
/// Damage is calculated when the hit lands, against whoever holds the position then.
pub struct DelayedHitMove;

impl Hooks for DelayedHitMove {}

impl MoveBehavior for DelayedHitMove {
    fn target_immune(
        &self,
        _: &mut HookContext,
        _: MonHandle,
        _: MonHandle,
        _: &MoveData,
    ) -> Result<bool> {
        Ok(false)
    }

    fn damages_on_use(&self) -> bool {
        false
    }

    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        mov: &MoveData,
    ) -> Result<bool> {
        let Some(target) = targets.first() else {
            return Ok(false);
        };
        let target = ctx.mon(*target)?;
        let Some(position) = target.active_position else {
            return Ok(false);
        };
        let request = EffectRequest::new(EffectTarget::Slot(target.side, position), DELAYED_HIT)
            .with_source(Some(user))
            .with_move(ctx.active_move_data());
        let applied = ctx.add_effect(request)?.applied();
        if applied {
            let event =
                log_event!("activate", mon: ctx.mon(user)?.position_details()).with("move", &mov.name);
            ctx.log(event);
        }
        Ok(applied)
    }
}

/// A move that knocks the target's item away, hitting harder if there is one.
pub struct RemoveItemMove;

impl Hooks for RemoveItemMove {}

impl MoveBehavior for RemoveItemMove {
    fn real_base_power(
        &self,
        ctx: &mut HookContext,
        _: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<u32> {
        if ctx.mon(target)?.item.is_some() {
            Ok(mov.base_power * 3 / 2)
        } else {
            Ok(mov.base_power)
        }
    }

    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        _: &MoveData,
    ) -> Result<bool> {
        let mut applied = false;
        for target in targets {
            if ctx.mon(user)?.hp == 0 {
                break;
            }
            if ctx.mon(*target)?.item.is_some() {
                applied |= ctx.take_item(*target)?.applied();
            }
        }
        Ok(applied)
    }
}

/// A move replacing the target's ability: with a fixed ability, or with the user's own.
pub struct ReplaceAbilityMove(pub Option<&'static str>);

impl Hooks for ReplaceAbilityMove {}

impl MoveBehavior for ReplaceAbilityMove {
    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        _: &MoveData,
    ) -> Result<bool> {
        let ability = match self.0 {
            Some(ability) => Id::from(ability),
            None => ctx.mon(user)?.ability.id.clone(),
        };
        let mut applied = false;
        for target in targets {
            applied |= ctx.change_ability(*target, ability.clone())?.applied();
        }
        Ok(applied)
    }
}

/// A move protecting the user for the rest of the turn.
///
/// Each consecutive success makes the next one three times less likely.
pub struct ProtectMove;

impl Hooks for ProtectMove {}

impl MoveBehavior for ProtectMove {
    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: &[MonHandle],
        _: &MoveData,
    ) -> Result<bool> {
        let stall = Id::from(STALL);
        let layers = ctx
            .mon(user)?
            .effects
            .get(&stall)
            .map(|stall| stall.state.layers)
            .unwrap_or(0);
        if layers > 0 && !ctx.chance(1, 3u64.pow(layers.min(6) as u32)) {
            ctx.remove_effect(EffectTarget::Mon(user), &stall)?;
            return Ok(false);
        }
        let request = EffectRequest::new(EffectTarget::Mon(user), PROTECT).with_source(Some(user));
        if !ctx.add_effect(request)?.applied() {
            return Ok(false);
        }
        let request = EffectRequest::new(EffectTarget::Mon(user), stall).with_source(Some(user));
        ctx.add_effect(request)?;
        Ok(true)
    }
}

/// A move with double base power while the user has a status.
pub struct StatusBoostedPower;

impl Hooks for StatusBoostedPower {}

impl MoveBehavior for StatusBoostedPower {
    fn real_base_power(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        _: MonHandle,
        mov: &MoveData,
    ) -> Result<u32> {
        if ctx.mon(user)?.status.is_some() {
            Ok(mov.base_power * 2)
        } else {
            Ok(mov.base_power)
        }
    }
}

/// A move with a chance to inflict one status picked at random.
pub struct RandomStatusMove {
    /// Percent chance to inflict a status.
    pub chance: u64,
    pub statuses: &'static [Status],
}

impl Hooks for RandomStatusMove {}

impl MoveBehavior for RandomStatusMove {
    fn deal_effect(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        targets: &[MonHandle],
        _: &MoveData,
    ) -> Result<bool> {
        let mut applied = false;
        for target in targets {
            if ctx.mon(*target)?.hp == 0 || !ctx.chance(self.chance, 100) {
                continue;
            }
            let index = ctx.random_range(0, self.statuses.len() as u64) as usize;
            let Some(status) = self.statuses.get(index) else {
                continue;
            };
            let request = StatusRequest::new(*target, *status)
                .with_source(Some(user))
                .with_move(ctx.active_move_data());
            applied |= ctx.inflict_status(request)?.applied();
        }
        Ok(applied)
    }
}
