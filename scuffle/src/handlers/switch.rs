use anyhow::Result;
use scuffle_data::BoostTable;

use crate::{
    battle::{
        Battle,
        Mon,
        MonHandle,
        dispatch,
    },
    effect::{
        EffectEndReason,
        EffectTarget,
        HookOrigin,
    },
    error::WrapOptionError,
    handlers::{
        ability::update_suppression,
        effects::remove_effect,
    },
};

/// Checks if the battler may leave the field voluntarily.
pub fn can_switch(battle: &mut Battle, mon: MonHandle) -> Result<bool> {
    let origins = dispatch::origins_for(battle, Some(mon), None, false);
    let trapped_by = dispatch::prevention(battle, &origins, |hooks, context| {
        hooks.on_switch_prevention(context, mon)
    })?;
    Ok(trapped_by.is_none())
}

/// Puts a battler into an active position, without running any switch-in events.
pub fn place_mon(battle: &mut Battle, side: usize, position: usize, mon: MonHandle) -> Result<()> {
    *battle
        .side_mut(side)?
        .active
        .get_mut(position)
        .wrap_not_found_error_with_format(format_args!("position {position} on side {side}"))? =
        Some(mon);
    let data = battle.mon_mut(mon)?;
    data.active_position = Some(position);
    data.active_turns = 0;
    let event = log_event!(
        "switch",
        mon: data.position_details(),
        species: &data.species,
        level: data.level,
        health: data.health()
    );
    battle.log(event);
    update_suppression(battle)
}

/// Announces a battler's arrival to every object, then starts its ability.
///
/// The entrant's own ability reacts through its start hook rather than the switch event.
pub fn run_switch_in_events(
    battle: &mut Battle,
    mon: MonHandle,
    out: Option<MonHandle>,
) -> Result<()> {
    let origins = dispatch::origins_for(battle, Some(mon), None, false)
        .into_iter()
        .filter(|origin| *origin != HookOrigin::Ability(mon))
        .collect::<Vec<_>>();
    dispatch::broadcast(battle, &origins, |hooks, context| {
        hooks.on_switch_event(context, out, Some(mon))
    })?;
    if battle.mon(mon)?.can_act() {
        dispatch::run_ability(battle, mon, |behavior, context| behavior.on_start(context))?;
    }
    Ok(())
}

fn clear_position(battle: &mut Battle, mon: MonHandle) -> Result<()> {
    let data = battle.mon_mut(mon)?;
    let side = data.side;
    let Some(position) = data.active_position.take() else {
        return Ok(());
    };
    if let Some(slot) = battle.side_mut(side)?.active.get_mut(position) {
        *slot = None;
    }
    Ok(())
}

/// Removes battler-tied effects and resets everything that only lasts while on the field.
fn reset_volatile_state(battle: &mut Battle, mon: MonHandle, reason: EffectEndReason) -> Result<()> {
    let ids = battle
        .mon(mon)?
        .effects
        .iter()
        .filter(|(_, effect)| {
            reason == EffectEndReason::Faint || !effect.behavior.survives_switch()
        })
        .map(|(id, _)| id.clone())
        .collect::<Vec<_>>();
    for id in ids {
        remove_effect(battle, EffectTarget::Mon(mon), &id, reason)?;
    }

    let restore = {
        let data = battle.mon(mon)?;
        (data.ability.id != data.base_ability).then(|| data.base_ability.clone())
    };
    if let Some(base) = restore {
        let ability = Mon::create_ability(&base, battle.data, battle.registries)?;
        battle.mon_mut(mon)?.ability = ability;
    }

    let data = battle.mon_mut(mon)?;
    data.boosts = BoostTable::default();
    data.locked_move = None;
    data.active_turns = 0;
    Ok(())
}

fn switch_out(battle: &mut Battle, mon: MonHandle) -> Result<()> {
    let origins = dispatch::origins_for(battle, Some(mon), None, false);
    dispatch::broadcast(battle, &origins, |hooks, context| {
        hooks.on_switch_event(context, Some(mon), None)
    })?;

    reset_volatile_state(battle, mon, EffectEndReason::SwitchOut)?;
    clear_position(battle, mon)?;
    update_suppression(battle)
}

/// Switches a battler into a position, withdrawing whoever is there.
pub fn switch_in(battle: &mut Battle, side: usize, position: usize, mon: MonHandle) -> Result<()> {
    let out = battle.active_mon(side, position);
    if let Some(out) = out {
        if battle.mon(out)?.can_act() {
            switch_out(battle, out)?;
        } else {
            clear_position(battle, out)?;
        }
    }
    place_mon(battle, side, position, mon)?;
    run_switch_in_events(battle, mon, out)
}

/// Faints a battler at zero HP, taking it off the field.
///
/// Every effect tied to the battler ends silently. Position and side effects stay.
pub fn faint(battle: &mut Battle, mon: MonHandle) -> Result<()> {
    let data = battle.mon_mut(mon)?;
    data.fainted = true;
    let event = log_event!("faint", mon: data.position_details());
    battle.log(event);

    reset_volatile_state(battle, mon, EffectEndReason::Faint)?;
    if let Some(mut status) = battle.mon_mut(mon)?.status.take() {
        let behavior = status.effect.behavior.clone();
        dispatch::run_detached(
            battle,
            behavior.as_ref(),
            &mut status.effect.state,
            HookOrigin::Status(mon),
            |behavior, context| behavior.on_end(context, EffectEndReason::Faint),
        )?;
    }
    clear_position(battle, mon)?;
    update_suppression(battle)
}
