use anyhow::Result;
use scuffle_data::{
    Fraction,
    Id,
    MoveData,
};

use crate::{
    battle::MonHandle,
    effect::{
        BoostRequest,
        DamageRequest,
        EffectRequest,
        HealRequest,
        HookContext,
        MoveHit,
        StatusRequest,
    },
};

/// Answer of a prevention hook.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum Veto {
    #[default]
    Allow,
    Prevent,
}

impl Veto {
    pub fn prevents(&self) -> bool {
        matches!(self, Self::Prevent)
    }

    pub fn from_prevent(prevent: bool) -> Self {
        if prevent { Self::Prevent } else { Self::Allow }
    }
}

/// The hook contract.
///
/// Every hook has a neutral default: prevention hooks allow, override hooks return `None`,
/// multiplier hooks return one, and post-event hooks do nothing. Implementors override only
/// what they react to.
///
/// A hook runs for every relevant object, not only for objects owned by the battlers involved.
/// An ability's `atk_multiplier` runs whether its owner is attacking or defending, so
/// implementations compare [`HookContext::owner`] against the roles in the event.
#[allow(unused_variables)]
pub trait Hooks {
    /// Orders modifiers within the same stage. Higher priority folds first.
    fn modifier_priority(&self) -> i32 {
        0
    }

    // Prevention.

    /// Vetoes a battler acting this turn, such as sleep or flinching.
    fn on_move_prevention(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        mov: &MoveData,
    ) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    /// Vetoes a move reaching one target, such as protection.
    fn on_try_hit(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    /// Grants immunity to a move after the accuracy check.
    fn on_move_ability_immunity(
        &self,
        ctx: &mut HookContext,
        user: MonHandle,
        target: MonHandle,
        mov: &MoveData,
    ) -> Result<bool> {
        Ok(false)
    }

    fn on_damage_prevention(&self, ctx: &mut HookContext, request: &DamageRequest) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    fn on_heal_prevention(&self, ctx: &mut HookContext, request: &HealRequest) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    fn on_status_prevention(&self, ctx: &mut HookContext, request: &StatusRequest) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    fn on_effect_prevention(&self, ctx: &mut HookContext, request: &EffectRequest) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    /// Vetoes a voluntary switch out, such as trapping.
    fn on_switch_prevention(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    fn on_item_change_prevention(
        &self,
        ctx: &mut HookContext,
        target: MonHandle,
        source: Option<MonHandle>,
    ) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    fn on_ability_change_prevention(
        &self,
        ctx: &mut HookContext,
        target: MonHandle,
        ability: &Id,
        source: Option<MonHandle>,
    ) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    fn on_weather_prevention(&self, ctx: &mut HookContext, weather: Option<&Id>) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    fn on_terrain_prevention(&self, ctx: &mut HookContext, terrain: Option<&Id>) -> Result<Veto> {
        Ok(Veto::Allow)
    }

    // Value overrides.

    /// Overrides a proposed stat stage change.
    ///
    /// Overrides chain: each hook sees the delta produced by the ones before it. A delta of zero
    /// means the change was prevented, and no later hook is asked.
    fn on_stat_change(
        &self,
        ctx: &mut HookContext,
        request: &BoostRequest,
        delta: i8,
    ) -> Result<Option<i8>> {
        Ok(None)
    }

    /// Caps incoming damage, such as surviving at 1 HP. The first cap wins.
    fn on_damage_cap(
        &self,
        ctx: &mut HookContext,
        request: &DamageRequest,
        damage: u32,
    ) -> Result<Option<u32>> {
        Ok(None)
    }

    // Multipliers.

    fn base_power_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    fn atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    fn sp_atk_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    fn def_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    fn sp_def_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    /// Applied before the `+2` constant of the damage formula.
    fn mod1_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    /// Applied after critical hits and before the random roll.
    fn mod2_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    /// Applied last, with the summed type effectiveness exponent of the hit.
    fn mod3_multiplier(
        &self,
        ctx: &mut HookContext,
        hit: &MoveHit,
        type_modifier: i8,
    ) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    fn chance_of_hit_multiplier(&self, ctx: &mut HookContext, hit: &MoveHit) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    fn speed_multiplier(&self, ctx: &mut HookContext, mon: MonHandle) -> Result<Fraction> {
        Ok(Fraction::ONE)
    }

    // Post events.

    fn on_switch_event(
        &self,
        ctx: &mut HookContext,
        who_out: Option<MonHandle>,
        who_in: Option<MonHandle>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_post_damage(&self, ctx: &mut HookContext, request: &DamageRequest, dealt: u32) -> Result<()> {
        Ok(())
    }

    /// Runs after [`Hooks::on_post_damage`] when the damage knocked the target out.
    fn on_post_damage_death(
        &self,
        ctx: &mut HookContext,
        request: &DamageRequest,
        dealt: u32,
    ) -> Result<()> {
        Ok(())
    }

    fn on_post_status(&self, ctx: &mut HookContext, request: &StatusRequest) -> Result<()> {
        Ok(())
    }

    fn on_post_stat_change(
        &self,
        ctx: &mut HookContext,
        request: &BoostRequest,
        applied: i8,
    ) -> Result<()> {
        Ok(())
    }

    fn on_post_ability_change(
        &self,
        ctx: &mut HookContext,
        target: MonHandle,
        old: &Id,
        new: &Id,
    ) -> Result<()> {
        Ok(())
    }

    fn on_post_item_change(
        &self,
        ctx: &mut HookContext,
        target: MonHandle,
        old: Option<&Id>,
        new: Option<&Id>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_post_weather_change(
        &self,
        ctx: &mut HookContext,
        old: Option<&Id>,
        new: Option<&Id>,
    ) -> Result<()> {
        Ok(())
    }

    fn on_post_terrain_change(
        &self,
        ctx: &mut HookContext,
        old: Option<&Id>,
        new: Option<&Id>,
    ) -> Result<()> {
        Ok(())
    }

    /// Runs once per turn for objects still in play, after duration bookkeeping.
    fn on_end_of_turn(&self, ctx: &mut HookContext) -> Result<()> {
        Ok(())
    }
}
