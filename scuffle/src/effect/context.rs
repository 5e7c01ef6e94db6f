use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    Id,
    MoveData,
    TypeChart,
};
use scuffle_prng::RandomExt;

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        Mon,
        MonHandle,
    },
    effect::{
        BoostRequest,
        DamageRequest,
        EffectEndReason,
        EffectRequest,
        EffectState,
        EffectTarget,
        HealRequest,
        HookOrigin,
        StatusRequest,
    },
    handlers,
    log::Event,
};

/// The view a hook has of the battle.
///
/// Hooks read battle state through the context and request every mutation through it. A
/// request runs the full handler for that mutation, including its own prevention and
/// post-event phases, before returning.
pub struct HookContext<'b, 'd> {
    battle: &'b mut Battle<'d>,
    state: &'b mut EffectState,
    origin: HookOrigin,
}

impl<'b, 'd> HookContext<'b, 'd> {
    pub(crate) fn new(
        battle: &'b mut Battle<'d>,
        state: &'b mut EffectState,
        origin: HookOrigin,
    ) -> Self {
        Self {
            battle,
            state,
            origin,
        }
    }

    /// Where the running hook lives.
    pub fn origin(&self) -> &HookOrigin {
        &self.origin
    }

    /// The battler owning the running hook, if any.
    pub fn owner(&self) -> Option<MonHandle> {
        self.origin.owner()
    }

    pub fn is_owner(&self, mon: MonHandle) -> bool {
        self.owner() == Some(mon)
    }

    /// The side owning the running hook, if any.
    pub fn owner_side(&self) -> Option<usize> {
        self.origin.side(self.battle)
    }

    /// State of the object the hook belongs to.
    pub fn state(&self) -> &EffectState {
        self.state
    }

    pub fn state_mut(&mut self) -> &mut EffectState {
        self.state
    }

    pub fn battle(&self) -> &Battle<'d> {
        self.battle
    }

    pub(crate) fn battle_mut(&mut self) -> &mut Battle<'d> {
        self.battle
    }

    pub fn mon(&self, mon: MonHandle) -> Result<&Mon> {
        self.battle.mon(mon)
    }

    pub fn turn(&self) -> u64 {
        self.battle.turn()
    }

    /// Active, non-fainted foes adjacent to the battler.
    pub fn foes_of(&self, mon: MonHandle) -> Result<Vec<MonHandle>> {
        self.battle.adjacent_foes(mon)
    }

    /// The weather as hooks see it, which is nothing while the weather is suppressed.
    pub fn weather(&self) -> Option<&Id> {
        self.battle.effective_weather()
    }

    pub fn terrain(&self) -> Option<&Id> {
        self.battle.terrain()
    }

    pub fn type_chart(&self) -> &TypeChart {
        self.battle.type_chart()
    }

    pub fn is_grounded(&self, mon: MonHandle) -> Result<bool> {
        self.battle.is_grounded(mon)
    }

    /// Data of the move currently being used, if any.
    pub fn active_move_data(&self) -> Option<Rc<MoveData>> {
        self.battle
            .active_move
            .as_ref()
            .map(|active| active.data.clone())
    }

    /// Rolls a `numerator / denominator` chance on the battle's generator.
    pub fn chance(&mut self, numerator: u64, denominator: u64) -> bool {
        self.battle.prng.chance(numerator, denominator)
    }

    /// Rolls an integer in `[min, max)` on the battle's generator.
    pub fn random_range(&mut self, min: u64, max: u64) -> u64 {
        self.battle.prng.range(min, max)
    }

    pub fn log(&mut self, event: Event) {
        self.battle.log(event)
    }

    /// Describes the running hook's object for the `from` argument of an event.
    pub fn describe_origin(&self) -> Option<String> {
        self.origin.describe(self.battle)
    }

    /// Logs an ability activation, such as `ability|mon:...|ability:Intimidate`.
    pub fn log_ability_activation(&mut self) -> Result<()> {
        if let Some(owner) = self.owner() {
            let mon = self.battle.mon(owner)?;
            let event = log_event!(
                "ability",
                mon: mon.position_details(),
                ability: mon.ability.name()
            );
            self.log(event);
        }
        Ok(())
    }

    pub fn damage(&mut self, request: DamageRequest) -> Result<HandlerOutcome<u32>> {
        handlers::damage(self.battle, request)
    }

    pub fn heal(&mut self, request: HealRequest) -> Result<HandlerOutcome<u32>> {
        handlers::heal(self.battle, request)
    }

    pub fn inflict_status(&mut self, request: StatusRequest) -> Result<HandlerOutcome> {
        handlers::inflict_status(self.battle, request)
    }

    pub fn cure_status(&mut self, mon: MonHandle) -> Result<HandlerOutcome> {
        let from = self.describe_origin();
        handlers::cure_status(self.battle, mon, from)
    }

    pub fn change_stat(&mut self, request: BoostRequest) -> Result<HandlerOutcome<i8>> {
        handlers::change_stat(self.battle, request)
    }

    pub fn add_effect(&mut self, request: EffectRequest) -> Result<HandlerOutcome> {
        handlers::add_effect(self.battle, request)
    }

    pub fn remove_effect(&mut self, target: EffectTarget, id: &Id) -> Result<HandlerOutcome> {
        handlers::remove_effect(self.battle, target, id, EffectEndReason::Removed)
    }

    /// Removes the effect the running hook belongs to.
    pub fn remove_self(&mut self) -> Result<HandlerOutcome> {
        match (&self.origin, self.origin.effect_target()) {
            (HookOrigin::Status(mon), _) => {
                let mon = *mon;
                handlers::cure_status(self.battle, mon, None)
            }
            (HookOrigin::Weather, _) => handlers::set_weather(self.battle, None, None),
            (HookOrigin::Terrain, _) => handlers::set_terrain(self.battle, None, None),
            (
                HookOrigin::MonEffect(_, id)
                | HookOrigin::SideEffect(_, id)
                | HookOrigin::SlotEffect(_, _, id)
                | HookOrigin::FieldEffect(id),
                Some(target),
            ) => {
                let id = id.clone();
                handlers::remove_effect(self.battle, target, &id, EffectEndReason::Removed)
            }
            _ => Ok(HandlerOutcome::NoEffect),
        }
    }

    pub fn set_weather(&mut self, weather: Option<Id>) -> Result<HandlerOutcome> {
        let source = self.owner();
        handlers::set_weather(self.battle, weather, source)
    }

    pub fn set_terrain(&mut self, terrain: Option<Id>) -> Result<HandlerOutcome> {
        let source = self.owner();
        handlers::set_terrain(self.battle, terrain, source)
    }

    /// Replaces a battler's ability. Returns the id of the replaced ability.
    pub fn change_ability(&mut self, target: MonHandle, ability: Id) -> Result<HandlerOutcome<Id>> {
        let source = self.owner();
        handlers::change_ability(self.battle, target, ability, source)
    }

    /// Takes a battler's item away. Returns the id of the taken item.
    pub fn take_item(&mut self, target: MonHandle) -> Result<HandlerOutcome<Id>> {
        let source = self.owner();
        handlers::take_item(self.battle, target, source)
    }

    /// Consumes a battler's own item. Returns the id of the used item.
    pub fn use_item(&mut self, target: MonHandle) -> Result<HandlerOutcome<Id>> {
        handlers::use_item(self.battle, target)
    }
}
