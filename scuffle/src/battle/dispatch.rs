//! Hook dispatch: which objects a handler consults, in what order, and how their answers are
//! composed.

use anyhow::Result;
use scuffle_data::Fraction;

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        ModifierChain,
        ModifierStage,
        MonHandle,
    },
    effect::{
        AbilityBehavior,
        EffectBehavior,
        EffectState,
        HookContext,
        HookOrigin,
        Hooks,
        LoadedBehavior,
        Veto,
    },
    error::general_error,
    moves::MoveBehavior,
};

fn run_loaded<'d, R, F>(
    battle: &mut Battle<'d>,
    origin: &HookOrigin,
    loaded: Option<(LoadedBehavior, EffectState)>,
    f: F,
) -> Result<Option<R>>
where
    F: FnOnce(&LoadedBehavior, &mut HookContext<'_, 'd>) -> Result<R>,
{
    let Some((behavior, mut state)) = loaded else {
        return Ok(None);
    };
    ::log::trace!("dispatching hook to {origin}");
    let result = {
        let mut context = HookContext::new(battle, &mut state, origin.clone());
        f(&behavior, &mut context)?
    };
    origin.save(battle, behavior.ptr(), state);
    Ok(Some(result))
}

/// Runs a hook on one object.
///
/// The object's state is copied out for the duration of the call and written back afterwards,
/// so the hook can freely request mutations that reach back into the battle. Returns `None` if
/// the object is missing or suppressed.
pub fn run_hook<'d, R, F>(battle: &mut Battle<'d>, origin: &HookOrigin, f: F) -> Result<Option<R>>
where
    F: FnOnce(&dyn Hooks, &mut HookContext<'_, 'd>) -> Result<R>,
{
    let loaded = origin.load(battle);
    run_loaded(battle, origin, loaded, |behavior, context| {
        f(behavior.hooks(), context)
    })
}

/// Runs a move behavior method on the move the battler is using.
pub fn run_move<'d, R, F>(battle: &mut Battle<'d>, user: MonHandle, f: F) -> Result<Option<R>>
where
    F: FnOnce(&dyn MoveBehavior, &mut HookContext<'_, 'd>) -> Result<R>,
{
    let origin = HookOrigin::ActiveMove(user);
    let loaded = origin.load_unsuppressed(battle);
    run_loaded(battle, &origin, loaded, |behavior, context| match behavior {
        LoadedBehavior::Move(behavior) => f(behavior.as_ref(), context),
        _ => Err(general_error("active move origin loaded a non-move behavior")),
    })
}

/// Runs an ability behavior method. Suppressed abilities are skipped.
pub fn run_ability<'d, R, F>(battle: &mut Battle<'d>, mon: MonHandle, f: F) -> Result<Option<R>>
where
    F: FnOnce(&dyn AbilityBehavior, &mut HookContext<'_, 'd>) -> Result<R>,
{
    let origin = HookOrigin::Ability(mon);
    let loaded = origin.load(battle);
    run_loaded(battle, &origin, loaded, |behavior, context| match behavior {
        LoadedBehavior::Ability(behavior) => f(behavior.as_ref(), context),
        _ => Err(general_error("ability origin loaded a non-ability behavior")),
    })
}

/// Runs an effect behavior method, ignoring suppression.
pub fn run_effect<'d, R, F>(battle: &mut Battle<'d>, origin: &HookOrigin, f: F) -> Result<Option<R>>
where
    F: FnOnce(&dyn EffectBehavior, &mut HookContext<'_, 'd>) -> Result<R>,
{
    let loaded = origin.load_unsuppressed(battle);
    run_loaded(battle, origin, loaded, |behavior, context| match behavior {
        LoadedBehavior::Effect(behavior) => f(behavior.as_ref(), context),
        _ => Err(general_error(format!(
            "effect origin {origin} loaded a non-effect behavior"
        ))),
    })
}

/// Runs an effect behavior method on an instance that is not stored in the battle, such as one
/// being created or one that was just removed.
pub fn run_detached<'d, R, F>(
    battle: &mut Battle<'d>,
    behavior: &dyn EffectBehavior,
    state: &mut EffectState,
    origin: HookOrigin,
    f: F,
) -> Result<R>
where
    F: FnOnce(&dyn EffectBehavior, &mut HookContext<'_, 'd>) -> Result<R>,
{
    ::log::trace!("dispatching detached hook to {origin}");
    let mut context = HookContext::new(battle, state, origin);
    f(behavior, &mut context)
}

/// Prevention phase: asks each object in order for a veto.
///
/// Returns the first object that prevented the mutation. Objects after it are not asked.
pub fn prevention<'d, F>(
    battle: &mut Battle<'d>,
    origins: &[HookOrigin],
    mut f: F,
) -> Result<Option<HookOrigin>>
where
    F: FnMut(&dyn Hooks, &mut HookContext<'_, 'd>) -> Result<Veto>,
{
    for origin in origins {
        if run_hook(battle, origin, &mut f)?.is_some_and(|veto| veto.prevents()) {
            ::log::trace!("{origin} prevented the mutation");
            return Ok(Some(origin.clone()));
        }
    }
    Ok(None)
}

/// Returns the first override produced by any object.
pub fn first_override<'d, T, F>(
    battle: &mut Battle<'d>,
    origins: &[HookOrigin],
    mut f: F,
) -> Result<Option<T>>
where
    F: FnMut(&dyn Hooks, &mut HookContext<'_, 'd>) -> Result<Option<T>>,
{
    for origin in origins {
        if let Some(Some(value)) = run_hook(battle, origin, &mut f)? {
            return Ok(Some(value));
        }
    }
    Ok(None)
}

/// Folds a value through every object in order. Each object sees the previous result.
///
/// Stops as soon as `done` holds for the current value. Objects after that point are not asked.
pub fn fold_until<'d, T, D, F>(
    battle: &mut Battle<'d>,
    origins: &[HookOrigin],
    init: T,
    done: D,
    mut f: F,
) -> Result<T>
where
    T: Copy,
    D: Fn(T) -> bool,
    F: FnMut(&dyn Hooks, &mut HookContext<'_, 'd>, T) -> Result<Option<T>>,
{
    let mut value = init;
    for origin in origins {
        if done(value) {
            ::log::trace!("fold settled before {origin}");
            break;
        }
        if let Some(Some(next)) = run_hook(battle, origin, |hooks, context| f(hooks, context, value))? {
            value = next;
        }
    }
    Ok(value)
}

/// Checks if any object answers true.
pub fn any<'d, F>(battle: &mut Battle<'d>, origins: &[HookOrigin], mut f: F) -> Result<bool>
where
    F: FnMut(&dyn Hooks, &mut HookContext<'_, 'd>) -> Result<bool>,
{
    for origin in origins {
        if run_hook(battle, origin, &mut f)?.unwrap_or(false) {
            return Ok(true);
        }
    }
    Ok(false)
}

/// Post-event phase: runs a hook on every object in order.
pub fn broadcast<'d, F>(battle: &mut Battle<'d>, origins: &[HookOrigin], mut f: F) -> Result<()>
where
    F: FnMut(&dyn Hooks, &mut HookContext<'_, 'd>) -> Result<()>,
{
    for origin in origins {
        run_hook(battle, origin, &mut f)?;
    }
    Ok(())
}

/// Value phase: collects one stage's multipliers from every object into the chain.
pub fn collect_modifiers<'d, F>(
    battle: &mut Battle<'d>,
    origins: &[HookOrigin],
    stage: ModifierStage,
    chain: &mut ModifierChain,
    mut f: F,
) -> Result<()>
where
    F: FnMut(&dyn Hooks, &mut HookContext<'_, 'd>) -> Result<Fraction>,
{
    for origin in origins {
        if let Some((priority, modifier)) = run_hook(battle, origin, |hooks, context| {
            Ok((hooks.modifier_priority(), f(hooks, context)?))
        })? {
            chain.push(stage, priority, modifier);
        }
    }
    Ok(())
}

fn push_mon_origins(battle: &Battle, mon: MonHandle, origins: &mut Vec<HookOrigin>) {
    let Ok(data) = battle.mon(mon) else {
        return;
    };
    origins.push(HookOrigin::Ability(mon));
    if data.item.is_some() {
        origins.push(HookOrigin::Item(mon));
    }
    if data.status.is_some() {
        origins.push(HookOrigin::Status(mon));
    }
    origins.extend(
        data.effects
            .keys()
            .map(|id| HookOrigin::MonEffect(mon, id.clone())),
    );
}

fn push_side_origins(battle: &Battle, side: usize, origins: &mut Vec<HookOrigin>) {
    let Ok(data) = battle.side(side) else {
        return;
    };
    origins.extend(
        data.effects
            .keys()
            .map(|id| HookOrigin::SideEffect(side, id.clone())),
    );
    for (slot, effects) in data.slot_effects.iter().enumerate() {
        origins.extend(
            effects
                .keys()
                .map(|id| HookOrigin::SlotEffect(side, slot, id.clone())),
        );
    }
}

fn push_field_origins(battle: &Battle, origins: &mut Vec<HookOrigin>) {
    if battle.field.weather.is_some() {
        origins.push(HookOrigin::Weather);
    }
    if battle.field.terrain.is_some() {
        origins.push(HookOrigin::Terrain);
    }
    origins.extend(
        battle
            .field
            .effects
            .keys()
            .map(|id| HookOrigin::FieldEffect(id.clone())),
    );
}

/// Every object relevant to a mutation, in dispatch order:
///
/// 1. The active move of the acting battler, if requested.
/// 1. The acting battler's ability, item, status, and effects.
/// 1. The affected battler's ability, item, status, and effects.
/// 1. Every other active battler's objects, in position order.
/// 1. The affected battler's side effects and position effects, then the acting battler's side,
///    then any other side.
/// 1. The weather, the terrain, and other field effects.
pub fn origins_for(
    battle: &Battle,
    acting: Option<MonHandle>,
    affected: Option<MonHandle>,
    include_move: bool,
) -> Vec<HookOrigin> {
    let mut origins = Vec::new();
    if let Some(user) = acting.filter(|_| include_move) {
        if battle
            .active_move
            .as_ref()
            .is_some_and(|active| active.user == user)
        {
            origins.push(HookOrigin::ActiveMove(user));
        }
    }

    let mut mons = Vec::new();
    for mon in acting.into_iter().chain(affected) {
        if !mons.contains(&mon) {
            mons.push(mon);
        }
    }
    for mon in battle.active_mons() {
        if !mons.contains(&mon) {
            mons.push(mon);
        }
    }
    for mon in &mons {
        push_mon_origins(battle, *mon, &mut origins);
    }

    let mut sides = Vec::new();
    for mon in affected.into_iter().chain(acting) {
        if let Ok(mon) = battle.mon(mon) {
            if !sides.contains(&mon.side) {
                sides.push(mon.side);
            }
        }
    }
    for side in 0..battle.sides.len() {
        if !sides.contains(&side) {
            sides.push(side);
        }
    }
    for side in sides {
        push_side_origins(battle, side, &mut origins);
    }

    push_field_origins(battle, &mut origins);
    origins
}

/// Every object in the battle, with battlers in the given order, for battle-wide events.
pub fn origins_in_order(battle: &Battle, mons: &[MonHandle]) -> Vec<HookOrigin> {
    let mut origins = Vec::new();
    for mon in mons {
        push_mon_origins(battle, *mon, &mut origins);
    }
    for side in 0..battle.sides.len() {
        push_side_origins(battle, side, &mut origins);
    }
    push_field_origins(battle, &mut origins);
    origins
}

/// Runs a handler body one cascade level deeper.
///
/// A hook that requests a mutation from inside a handler nests one level. Once the nesting
/// limit is reached, the mutation is dropped without running any phase.
pub fn with_cascade<'d, T, F>(battle: &mut Battle<'d>, handler: &str, f: F) -> Result<HandlerOutcome<T>>
where
    F: FnOnce(&mut Battle<'d>) -> Result<HandlerOutcome<T>>,
{
    if battle.cascade_depth >= battle.engine_options.max_cascade_depth {
        ::log::debug!(
            "dropping {handler} at cascade depth {}",
            battle.cascade_depth
        );
        return Ok(HandlerOutcome::Dropped);
    }
    battle.cascade_depth += 1;
    let mut battle = scopeguard::guard(battle, |battle| battle.cascade_depth -= 1);
    f(&mut battle)
}
