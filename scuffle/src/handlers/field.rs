use anyhow::Result;
use scuffle_data::Id;

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        MonHandle,
        dispatch,
    },
    effect::{
        EffectEndReason,
        EffectInstance,
        EffectState,
        HookOrigin,
    },
    log::Event,
};

/// The two single-occupant field conditions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum FieldCondition {
    Weather,
    Terrain,
}

impl FieldCondition {
    fn origin(&self) -> HookOrigin {
        match self {
            Self::Weather => HookOrigin::Weather,
            Self::Terrain => HookOrigin::Terrain,
        }
    }

    fn slot<'b>(&self, battle: &'b mut Battle) -> &'b mut Option<EffectInstance> {
        match self {
            Self::Weather => &mut battle.field.weather,
            Self::Terrain => &mut battle.field.terrain,
        }
    }

    pub(super) fn instance<'b>(&self, battle: &'b mut Battle) -> Option<&'b mut EffectInstance> {
        self.slot(battle).as_mut()
    }

    fn current(&self, battle: &Battle) -> Option<Id> {
        let current = match self {
            Self::Weather => battle.field.weather(),
            Self::Terrain => battle.field.terrain(),
        };
        current.cloned()
    }

    fn start_event(&self, name: &str) -> Event {
        match self {
            Self::Weather => log_event!("weather", weather: name),
            Self::Terrain => log_event!("fieldstart", field: name),
        }
    }

    fn end_event(&self, name: &str) -> Event {
        match self {
            Self::Weather => log_event!("weather", weather: "Clear"),
            Self::Terrain => log_event!("fieldend", field: name),
        }
    }
}

/// Takes the current condition off the field and runs its end hook.
///
/// Returns the id of the condition that ended.
pub(super) fn end_condition(
    battle: &mut Battle,
    condition: FieldCondition,
    reason: EffectEndReason,
) -> Result<Option<Id>> {
    let Some(mut old) = condition.slot(battle).take() else {
        return Ok(None);
    };
    battle.log(condition.end_event(old.name()));
    let behavior = old.behavior.clone();
    dispatch::run_detached(
        battle,
        behavior.as_ref(),
        &mut old.state,
        condition.origin(),
        |behavior, context| behavior.on_end(context, reason),
    )?;
    Ok(Some(old.id))
}

/// Notifies every object that a condition changed.
pub(super) fn notify_change(
    battle: &mut Battle,
    condition: FieldCondition,
    source: Option<MonHandle>,
    old: Option<&Id>,
    new: Option<&Id>,
) -> Result<()> {
    let origins = dispatch::origins_for(battle, source, None, false);
    dispatch::broadcast(battle, &origins, |hooks, context| match condition {
        FieldCondition::Weather => hooks.on_post_weather_change(context, old, new),
        FieldCondition::Terrain => hooks.on_post_terrain_change(context, old, new),
    })
}

fn set_condition(
    battle: &mut Battle,
    condition: FieldCondition,
    id: Option<Id>,
    source: Option<MonHandle>,
) -> Result<HandlerOutcome> {
    if condition.current(battle) == id {
        return Ok(HandlerOutcome::NoEffect);
    }

    let origins = dispatch::origins_for(battle, source, None, false);
    let prevented_by = dispatch::prevention(battle, &origins, |hooks, context| match condition {
        FieldCondition::Weather => hooks.on_weather_prevention(context, id.as_ref()),
        FieldCondition::Terrain => hooks.on_terrain_prevention(context, id.as_ref()),
    })?;
    if let Some(origin) = prevented_by {
        ::log::trace!("{condition:?} change prevented by {origin}");
        return Ok(HandlerOutcome::Prevented);
    }

    let old = end_condition(battle, condition, EffectEndReason::Removed)?;
    if let Some(id) = &id {
        let behavior = battle.registries.effects.create(id, id);
        let mut state = EffectState {
            source,
            source_side: source
                .and_then(|source| battle.mon(source).ok())
                .map(|source| source.side),
            created_turn: battle.turn(),
            ..Default::default()
        };
        state.duration = dispatch::run_detached(
            battle,
            behavior.as_ref(),
            &mut state.clone(),
            condition.origin(),
            |behavior, context| behavior.duration(context),
        )?;
        let event = condition.start_event(behavior.name());
        *condition.slot(battle) = Some(EffectInstance::new(id.clone(), behavior, state));
        battle.log(event);
        dispatch::run_effect(battle, &condition.origin(), |behavior, context| {
            behavior.on_start(context)
        })?;
    }

    notify_change(battle, condition, source, old.as_ref(), id.as_ref())?;
    Ok(HandlerOutcome::Applied(()))
}

/// Replaces the weather. `None` clears it.
pub fn set_weather(
    battle: &mut Battle,
    weather: Option<Id>,
    source: Option<MonHandle>,
) -> Result<HandlerOutcome> {
    dispatch::with_cascade(battle, "weather", |battle| {
        set_condition(battle, FieldCondition::Weather, weather, source)
    })
}

/// Replaces the terrain. `None` clears it.
pub fn set_terrain(
    battle: &mut Battle,
    terrain: Option<Id>,
    source: Option<MonHandle>,
) -> Result<HandlerOutcome> {
    dispatch::with_cascade(battle, "terrain", |battle| {
        set_condition(battle, FieldCondition::Terrain, terrain, source)
    })
}
