use std::{
    fmt,
    fmt::Display,
    rc::Rc,
};

use scuffle_data::Id;

use crate::{
    battle::{
        Battle,
        MonHandle,
    },
    effect::{
        AbilityBehavior,
        EffectBehavior,
        EffectInstance,
        EffectState,
        EffectTarget,
        Hooks,
        ItemBehavior,
    },
    moves::MoveBehavior,
};

/// A behavior object loaded out of the battle for one hook call.
#[derive(Clone)]
pub enum LoadedBehavior {
    Move(Rc<dyn MoveBehavior>),
    Ability(Rc<dyn AbilityBehavior>),
    Item(Rc<dyn ItemBehavior>),
    Effect(Rc<dyn EffectBehavior>),
}

impl LoadedBehavior {
    pub fn hooks(&self) -> &dyn Hooks {
        match self {
            Self::Move(behavior) => behavior.as_ref(),
            Self::Ability(behavior) => behavior.as_ref(),
            Self::Item(behavior) => behavior.as_ref(),
            Self::Effect(behavior) => behavior.as_ref(),
        }
    }

    /// Identity of the shared behavior object.
    pub fn ptr(&self) -> *const () {
        match self {
            Self::Move(behavior) => Rc::as_ptr(behavior) as *const (),
            Self::Ability(behavior) => Rc::as_ptr(behavior) as *const (),
            Self::Item(behavior) => Rc::as_ptr(behavior) as *const (),
            Self::Effect(behavior) => Rc::as_ptr(behavior) as *const (),
        }
    }
}

/// Where a hook implementation lives in the battle.
///
/// Origins are addresses, not references: an origin stays valid while the object it points to
/// is removed, in which case loading it yields nothing.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum HookOrigin {
    /// The move currently being used by the battler.
    ActiveMove(MonHandle),
    Ability(MonHandle),
    Item(MonHandle),
    Status(MonHandle),
    MonEffect(MonHandle, Id),
    SideEffect(usize, Id),
    SlotEffect(usize, usize, Id),
    Weather,
    Terrain,
    FieldEffect(Id),
}

impl HookOrigin {
    /// The battler that owns the object, if any.
    pub fn owner(&self) -> Option<MonHandle> {
        match self {
            Self::ActiveMove(mon)
            | Self::Ability(mon)
            | Self::Item(mon)
            | Self::Status(mon)
            | Self::MonEffect(mon, _) => Some(*mon),
            _ => None,
        }
    }

    /// The side the object belongs to, if any.
    pub fn side(&self, battle: &Battle) -> Option<usize> {
        match self {
            Self::SideEffect(side, _) | Self::SlotEffect(side, _, _) => Some(*side),
            _ => self
                .owner()
                .and_then(|mon| battle.mon(mon).ok())
                .map(|mon| mon.side),
        }
    }

    /// The target an effect at this origin is stored on.
    pub fn effect_target(&self) -> Option<EffectTarget> {
        match self {
            Self::Status(mon) | Self::MonEffect(mon, _) => Some(EffectTarget::Mon(*mon)),
            Self::SideEffect(side, _) => Some(EffectTarget::Side(*side)),
            Self::SlotEffect(side, slot, _) => Some(EffectTarget::Slot(*side, *slot)),
            Self::Weather | Self::Terrain | Self::FieldEffect(_) => Some(EffectTarget::Field),
            _ => None,
        }
    }

    /// Loads the behavior and a copy of its state, if the object is present and not
    /// suppressed.
    pub fn load(&self, battle: &Battle) -> Option<(LoadedBehavior, EffectState)> {
        match self {
            Self::Ability(mon) => {
                if battle.ability_suppressed(*mon) {
                    return None;
                }
            }
            Self::Weather => {
                if battle.weather_suppressed() {
                    return None;
                }
            }
            _ => (),
        }
        self.load_unsuppressed(battle)
    }

    /// Loads the behavior and a copy of its state, ignoring suppression.
    ///
    /// Lifecycle hooks such as starting and ending an effect run even while the effect is
    /// hidden from dispatch.
    pub fn load_unsuppressed(&self, battle: &Battle) -> Option<(LoadedBehavior, EffectState)> {
        let effect = |instance: &EffectInstance| {
            (
                LoadedBehavior::Effect(instance.behavior.clone()),
                instance.state.clone(),
            )
        };
        match self {
            Self::ActiveMove(user) => battle
                .active_move
                .as_ref()
                .filter(|active| active.user == *user)
                .map(|active| {
                    (
                        LoadedBehavior::Move(active.behavior.clone()),
                        active.state.clone(),
                    )
                }),
            Self::Ability(mon) => battle.mon(*mon).ok().map(|mon| {
                (
                    LoadedBehavior::Ability(mon.ability.behavior.clone()),
                    mon.ability.state.clone(),
                )
            }),
            Self::Item(mon) => battle.mon(*mon).ok()?.item.as_ref().map(|item| {
                (
                    LoadedBehavior::Item(item.behavior.clone()),
                    item.state.clone(),
                )
            }),
            Self::Status(mon) => battle
                .mon(*mon)
                .ok()?
                .status
                .as_ref()
                .map(|status| effect(&status.effect)),
            Self::MonEffect(mon, id) => battle.mon(*mon).ok()?.effects.get(id).map(effect),
            Self::SideEffect(side, id) => battle.side(*side).ok()?.effects.get(id).map(effect),
            Self::SlotEffect(side, slot, id) => battle
                .side(*side)
                .ok()?
                .slot_effects
                .get(*slot)?
                .get(id)
                .map(effect),
            Self::Weather => battle.field.weather.as_ref().map(effect),
            Self::Terrain => battle.field.terrain.as_ref().map(effect),
            Self::FieldEffect(id) => battle.field.effects.get(id).map(effect),
        }
    }

    /// Writes state back to the object, if the same object is still in place.
    ///
    /// An object replaced during its own hook (for example, an ability swapped out by the
    /// ability it triggered) keeps the replacement's state.
    pub fn save(&self, battle: &mut Battle, behavior: *const (), state: EffectState) {
        let slot = match self {
            Self::ActiveMove(user) => battle
                .active_move
                .as_mut()
                .filter(|active| {
                    active.user == *user
                        && Rc::as_ptr(&active.behavior) as *const () == behavior
                })
                .map(|active| &mut active.state),
            Self::Ability(mon) => battle
                .mon_mut(*mon)
                .ok()
                .map(|mon| &mut mon.ability)
                .filter(|ability| Rc::as_ptr(&ability.behavior) as *const () == behavior)
                .map(|ability| &mut ability.state),
            Self::Item(mon) => battle
                .mon_mut(*mon)
                .ok()
                .and_then(|mon| mon.item.as_mut())
                .filter(|item| Rc::as_ptr(&item.behavior) as *const () == behavior)
                .map(|item| &mut item.state),
            _ => self
                .instance_mut(battle)
                .filter(|instance| instance.holds(behavior))
                .map(|instance| &mut instance.state),
        };
        if let Some(slot) = slot {
            *slot = state;
        }
    }

    /// The stored effect instance at this origin.
    pub fn instance<'b>(&self, battle: &'b Battle) -> Option<&'b EffectInstance> {
        match self {
            Self::Status(mon) => battle.mon(*mon).ok()?.status.as_ref().map(|status| &status.effect),
            Self::MonEffect(mon, id) => battle.mon(*mon).ok()?.effects.get(id),
            Self::SideEffect(side, id) => battle.side(*side).ok()?.effects.get(id),
            Self::SlotEffect(side, slot, id) => {
                battle.side(*side).ok()?.slot_effects.get(*slot)?.get(id)
            }
            Self::Weather => battle.field.weather.as_ref(),
            Self::Terrain => battle.field.terrain.as_ref(),
            Self::FieldEffect(id) => battle.field.effects.get(id),
            _ => None,
        }
    }

    /// The stored effect instance at this origin, mutably.
    pub fn instance_mut<'b>(&self, battle: &'b mut Battle) -> Option<&'b mut EffectInstance> {
        match self {
            Self::Status(mon) => battle
                .mon_mut(*mon)
                .ok()?
                .status
                .as_mut()
                .map(|status| &mut status.effect),
            Self::MonEffect(mon, id) => battle.mon_mut(*mon).ok()?.effects.get_mut(id),
            Self::SideEffect(side, id) => battle.side_mut(*side).ok()?.effects.get_mut(id),
            Self::SlotEffect(side, slot, id) => battle
                .side_mut(*side)
                .ok()?
                .slot_effects
                .get_mut(*slot)?
                .get_mut(id),
            Self::Weather => battle.field.weather.as_mut(),
            Self::Terrain => battle.field.terrain.as_mut(),
            Self::FieldEffect(id) => battle.field.effects.get_mut(id),
            _ => None,
        }
    }

    /// Describes the object for the `from` argument of an event, such as `ability:Static`.
    pub fn describe(&self, battle: &Battle) -> Option<String> {
        match self {
            Self::ActiveMove(_) => battle
                .active_move
                .as_ref()
                .map(|active| format!("move:{}", active.data.name)),
            Self::Ability(mon) => battle
                .mon(*mon)
                .ok()
                .map(|mon| format!("ability:{}", mon.ability.name())),
            Self::Item(mon) => battle
                .mon(*mon)
                .ok()?
                .item
                .as_ref()
                .map(|item| format!("item:{}", item.name())),
            _ => self
                .instance(battle)
                .map(|instance| instance.name().to_owned()),
        }
    }
}

impl Display for HookOrigin {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ActiveMove(mon) => write!(f, "active move of {mon}"),
            Self::Ability(mon) => write!(f, "ability of {mon}"),
            Self::Item(mon) => write!(f, "item of {mon}"),
            Self::Status(mon) => write!(f, "status of {mon}"),
            Self::MonEffect(mon, id) => write!(f, "{id} on {mon}"),
            Self::SideEffect(side, id) => write!(f, "{id} on side {side}"),
            Self::SlotEffect(side, slot, id) => write!(f, "{id} on side {side} slot {slot}"),
            Self::Weather => write!(f, "weather"),
            Self::Terrain => write!(f, "terrain"),
            Self::FieldEffect(id) => write!(f, "{id} on field"),
        }
    }
}
