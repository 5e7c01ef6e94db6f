use anyhow::Result;
use scuffle_data::Id;

use crate::{
    battle::{
        Battle,
        MonHandle,
        dispatch,
    },
    effect::{
        EffectEndReason,
        EffectTarget,
        HookOrigin,
    },
    handlers::{
        effects::remove_effect,
        field::{
            FieldCondition,
            end_condition,
            notify_change,
        },
        status::cure_status,
    },
};

/// Ticks one stored effect. Expired effects end; the rest run their end-of-turn hook.
fn tick_effect(battle: &mut Battle, target: EffectTarget, id: &Id) -> Result<()> {
    let origin = target.origin(id);
    let Some(instance) = origin.instance_mut(battle) else {
        return Ok(());
    };
    if instance.state.duration.tick() {
        remove_effect(battle, target, id, EffectEndReason::Expired)?;
    } else {
        dispatch::run_hook(battle, &origin, |hooks, context| hooks.on_end_of_turn(context))?;
    }
    Ok(())
}

fn tick_condition(battle: &mut Battle, condition: FieldCondition) -> Result<()> {
    let Some(instance) = condition.instance(battle) else {
        return Ok(());
    };
    if instance.state.duration.tick() {
        let old = end_condition(battle, condition, EffectEndReason::Expired)?;
        return notify_change(battle, condition, None, old.as_ref(), None);
    }
    if condition == FieldCondition::Weather {
        let name = instance.name().to_owned();
        battle.log(log_event!("weather", weather: name).flag("residual"));
    }
    let origin = match condition {
        FieldCondition::Weather => HookOrigin::Weather,
        FieldCondition::Terrain => HookOrigin::Terrain,
    };
    dispatch::run_hook(battle, &origin, |hooks, context| hooks.on_end_of_turn(context))?;
    Ok(())
}

fn tick_mon(battle: &mut Battle, mon: MonHandle) -> Result<()> {
    if !battle.mon(mon)?.can_act() {
        return Ok(());
    }
    let origin = HookOrigin::Status(mon);
    if let Some(status) = origin.instance_mut(battle) {
        if status.state.duration.tick() {
            cure_status(battle, mon, None)?;
        } else {
            dispatch::run_hook(battle, &origin, |hooks, context| hooks.on_end_of_turn(context))?;
        }
    }

    for origin in [HookOrigin::Ability(mon), HookOrigin::Item(mon)] {
        if !battle.mon(mon)?.can_act() {
            return Ok(());
        }
        dispatch::run_hook(battle, &origin, |hooks, context| hooks.on_end_of_turn(context))?;
    }

    let ids = battle.mon(mon)?.effects.keys().cloned().collect::<Vec<_>>();
    for id in ids {
        if !battle.mon(mon)?.can_act() {
            return Ok(());
        }
        tick_effect(battle, EffectTarget::Mon(mon), &id)?;
    }
    Ok(())
}

/// Runs end-of-turn bookkeeping.
///
/// The field goes first, then each side and its positions, then every active battler in speed
/// order. Each object's duration ticks before its end-of-turn hook runs; an object whose
/// duration runs out ends instead.
pub fn end_of_turn(battle: &mut Battle) -> Result<()> {
    tick_condition(battle, FieldCondition::Weather)?;
    tick_condition(battle, FieldCondition::Terrain)?;
    let ids = battle.field.effects.keys().cloned().collect::<Vec<_>>();
    for id in ids {
        tick_effect(battle, EffectTarget::Field, &id)?;
    }

    for side in 0..battle.sides.len() {
        let ids = battle.side(side)?.effects.keys().cloned().collect::<Vec<_>>();
        for id in ids {
            tick_effect(battle, EffectTarget::Side(side), &id)?;
        }
        for slot in 0..battle.side(side)?.slot_effects.len() {
            let ids = battle.side(side)?.slot_effects[slot]
                .keys()
                .cloned()
                .collect::<Vec<_>>();
            for id in ids {
                tick_effect(battle, EffectTarget::Slot(side, slot), &id)?;
            }
        }
    }

    for mon in battle.active_mons_by_speed()? {
        tick_mon(battle, mon)?;
    }
    Ok(())
}
