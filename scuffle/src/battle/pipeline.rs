//! The move resolution pipeline: one use of one move, from the before-move veto to the last
//! post-event hook.

use std::rc::Rc;

use anyhow::Result;
use scuffle_data::{
    Accuracy,
    Boost,
    Id,
    MoveData,
    MoveFlag,
    MoveTarget,
    MultihitType,
};
use scuffle_prng::RandomExt;

use crate::{
    battle::{
        Battle,
        ModifierChain,
        ModifierStage,
        MonHandle,
        MoveOutcome,
        calculate_damage,
        dispatch,
    },
    effect::{
        DamageKind,
        DamageRequest,
        HealRequest,
        MoveHit,
    },
    error::{
        WrapOptionError,
        WrapResultError,
    },
    handlers,
    moves::{
        ActiveMove,
        MoveFailure,
        MoveInstance,
        shared,
    },
};

fn move_instance(battle: &Battle, user: MonHandle, id: &Id) -> Result<MoveInstance> {
    let mon = battle.mon(user)?;
    if let Some(instance) = mon.move_slot(id).and_then(|slot| mon.moves.get(slot)) {
        return Ok(instance.clone());
    }
    let data = battle
        .data
        .get_move(id)?
        .wrap_not_found_error_with_format(format_args!("move {id}"))?;
    Ok(MoveInstance::new(id.clone(), data, battle.registries))
}

/// Uses a move.
///
/// The move is the battle's active move for the duration of the call, so its behavior takes
/// part in dispatch as the first object of every mutation it causes. Forced moves spend no PP.
pub fn use_move(
    battle: &mut Battle,
    user: MonHandle,
    id: &Id,
    target: Option<MonHandle>,
    forced: bool,
) -> Result<MoveOutcome> {
    let instance = move_instance(battle, user, id)?;
    let previous = battle
        .active_move
        .replace(ActiveMove::new(&instance, user, forced));
    let outcome = use_active_move(battle, user, id, target, forced);
    battle.active_move = previous;
    let outcome =
        outcome.wrap_error_with_format(format_args!("failed to use {id} for mon {user}"))?;
    ::log::debug!("mon {user} used {id}: {outcome:?}");
    Ok(outcome)
}

fn use_active_move(
    battle: &mut Battle,
    user: MonHandle,
    id: &Id,
    chosen: Option<MonHandle>,
    forced: bool,
) -> Result<MoveOutcome> {
    let (mov, damages_on_use) = battle
        .active_move
        .as_ref()
        .map(|active| (active.data.clone(), active.behavior.damages_on_use()))
        .wrap_expectation("active move disappeared")?;

    let origins = dispatch::origins_for(battle, Some(user), None, true);
    if dispatch::prevention(battle, &origins, |hooks, context| {
        hooks.on_move_prevention(context, user, &mov)
    })?
    .is_some()
    {
        return Ok(MoveOutcome::Skipped);
    }

    let target_details = chosen
        .filter(|_| mov.target.choosable())
        .and_then(|target| battle.mon(target).ok())
        .map(|target| target.position_details());
    let event = log_event!(
        "move",
        mon: battle.mon(user)?.position_details(),
        name: &mov.name
    )
    .with_opt("target", target_details);
    battle.log(event);
    record_use(battle, user, id, forced)?;

    let targets = resolve_targets(battle, user, chosen, &mov)?;

    let usable = dispatch::run_move(battle, user, |behavior, context| {
        behavior.usable_by_user(context, user, &targets, &mov)
    })?
    .unwrap_or(true);
    if !usable {
        log_failure(battle, user)?;
        move_failed(battle, user, &targets, MoveFailure::Unusable)?;
        return Ok(MoveOutcome::UsageFailure);
    }

    if targets.is_empty() && !mov.target.affects_place() {
        let event = log_event!("notarget", mon: battle.mon(user)?.position_details());
        battle.log(event);
        move_failed(battle, user, &targets, MoveFailure::NoTarget)?;
        return Ok(MoveOutcome::TargetFailure);
    }

    if dispatch::run_move(battle, user, |behavior, context| {
        behavior.charge_turn(context, user, &targets, &mov)
    })?
    .unwrap_or(false)
    {
        return Ok(MoveOutcome::Charging);
    }

    if mov.target.affects_place() {
        let applied = deal_effect(battle, user, &[], &mov)?;
        if !applied {
            log_failure(battle, user)?;
            return Ok(MoveOutcome::NoEffect);
        }
        return Ok(MoveOutcome::Success);
    }

    let spread = mov.target.is_spread() && targets.len() > 1;
    let mut hit = Vec::new();
    for target in targets {
        if !battle.mon(target)?.can_act() {
            continue;
        }
        if dispatch::run_move(battle, user, |behavior, context| {
            behavior.blocked_by_target(context, user, target, &mov)
        })?
        .unwrap_or(false)
        {
            move_failed(battle, user, &[target], MoveFailure::Blocked)?;
            continue;
        }
        if !accuracy_check(battle, user, target, &mov, spread)? {
            let event = log_event!(
                "miss",
                mon: battle.mon(user)?.position_details(),
                target: battle.mon(target)?.position_details()
            );
            battle.log(event);
            move_failed(battle, user, &[target], MoveFailure::Missed)?;
            continue;
        }
        if target_immune(battle, user, target, &mov)? {
            let event = log_event!("immune", mon: battle.mon(target)?.position_details());
            battle.log(event);
            move_failed(battle, user, &[target], MoveFailure::Immune)?;
            continue;
        }
        hit.push(target);
    }
    if hit.is_empty() {
        return Ok(MoveOutcome::TargetFailure);
    }

    if mov.is_damaging() && damages_on_use {
        let hits = match mov.multihit {
            None => 1,
            Some(MultihitType::Static(hits)) => hits,
            Some(MultihitType::Range(min, max)) => {
                battle.prng.range(min as u64, max as u64 + 1) as u8
            }
        };
        for target in &hit {
            hit_target_repeatedly(battle, user, *target, &mov, hits, spread)?;
        }
    }

    let applied = deal_effect(battle, user, &hit, &mov)?;
    if (!mov.is_damaging() || !damages_on_use) && !applied {
        log_failure(battle, user)?;
        return Ok(MoveOutcome::NoEffect);
    }
    Ok(MoveOutcome::Success)
}

/// Spends PP and remembers the move, locking the user into it if its item says so.
fn record_use(battle: &mut Battle, user: MonHandle, id: &Id, forced: bool) -> Result<()> {
    let mon = battle.mon_mut(user)?;
    if !forced {
        if let Some(slot) = mon.move_slot(id) {
            if let Some(instance) = mon.moves.get_mut(slot) {
                instance.pp = instance.pp.saturating_sub(1);
            }
        }
    }
    mon.last_move = Some(id.clone());
    let locks = mon
        .item
        .as_ref()
        .is_some_and(|item| item.behavior.locks_move());
    if locks && mon.locked_move.is_none() && mon.move_slot(id).is_some() {
        mon.locked_move = Some(id.clone());
    }
    Ok(())
}

fn resolve_targets(
    battle: &mut Battle,
    user: MonHandle,
    chosen: Option<MonHandle>,
    mov: &MoveData,
) -> Result<Vec<MonHandle>> {
    match mov.target {
        MoveTarget::User => Ok(vec![user]),
        MoveTarget::Normal => {
            if let Some(chosen) = chosen {
                if chosen != user && battle.mon(chosen)?.can_act() {
                    return Ok(vec![chosen]);
                }
            }
            let foes = battle.adjacent_foes(user)?;
            Ok(battle.prng.sample(&foes).copied().into_iter().collect())
        }
        MoveTarget::AllAdjacentFoes => battle.adjacent_foes(user),
        MoveTarget::AllAdjacent => {
            let mut targets = battle.adjacent_foes(user)?;
            targets.extend(battle.adjacent_allies(user)?);
            Ok(targets)
        }
        MoveTarget::AllySide | MoveTarget::FoeSide | MoveTarget::Field => Ok(Vec::new()),
    }
}

fn log_failure(battle: &mut Battle, user: MonHandle) -> Result<()> {
    let event = log_event!("fail", mon: battle.mon(user)?.position_details());
    battle.log(event);
    Ok(())
}

fn move_failed(
    battle: &mut Battle,
    user: MonHandle,
    targets: &[MonHandle],
    reason: MoveFailure,
) -> Result<()> {
    ::log::trace!("move of mon {user} failed: {reason:?}");
    dispatch::run_move(battle, user, |behavior, context| {
        behavior.on_move_failure(context, user, targets, reason)
    })?;
    Ok(())
}

fn accuracy_check(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    mov: &MoveData,
    spread: bool,
) -> Result<bool> {
    let accuracy = dispatch::run_move(battle, user, |behavior, context| {
        behavior.base_accuracy(context, user, target, mov)
    })?
    .unwrap_or(mov.accuracy);
    let Accuracy::Chance(chance) = accuracy else {
        return Ok(true);
    };
    if user == target {
        return Ok(true);
    }

    let mut accuracy = chance as u64;
    if !mov.has_flag(MoveFlag::OneHitKnockOut) {
        let stage = battle
            .mon(user)?
            .boosts
            .get(Boost::Accuracy)
            .saturating_sub(battle.mon(target)?.boosts.get(Boost::Evasion));
        accuracy = Boost::accuracy_multiplier(stage).apply(accuracy);

        let hit = MoveHit {
            user,
            target,
            mov,
            crit: false,
            spread,
        };
        let origins = dispatch::origins_for(battle, Some(user), Some(target), true);
        let mut chain = ModifierChain::new();
        dispatch::collect_modifiers(
            battle,
            &origins,
            ModifierStage::Accuracy,
            &mut chain,
            |hooks, context| hooks.chance_of_hit_multiplier(context, &hit),
        )?;
        accuracy = chain.apply(ModifierStage::Accuracy, accuracy);
    }
    Ok(battle.prng.range(0, 100) < accuracy)
}

fn target_immune(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    mov: &MoveData,
) -> Result<bool> {
    if dispatch::run_move(battle, user, |behavior, context| {
        behavior.target_immune(context, user, target, mov)
    })?
    .unwrap_or(false)
    {
        return Ok(true);
    }
    let origins = dispatch::origins_for(battle, Some(user), Some(target), true);
    dispatch::any(battle, &origins, |hooks, context| {
        hooks.on_move_ability_immunity(context, user, target, mov)
    })
}

fn deal_effect(
    battle: &mut Battle,
    user: MonHandle,
    targets: &[MonHandle],
    mov: &MoveData,
) -> Result<bool> {
    Ok(dispatch::run_move(battle, user, |behavior, context| {
        behavior.deal_effect(context, user, targets, mov)
    })?
    .unwrap_or(false))
}

/// Hits one target up to `hits` times, then applies drain, recoil, and secondary effects for
/// the total damage dealt.
fn hit_target_repeatedly(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    mov: &Rc<MoveData>,
    hits: u8,
    spread: bool,
) -> Result<()> {
    let mut count = 0;
    let mut total = 0u32;
    for _ in 0..hits {
        if battle.mon(target)?.hp == 0 || battle.mon(user)?.hp == 0 {
            break;
        }
        total = total.saturating_add(hit_target(battle, user, target, mov, spread)?);
        count += 1;
    }
    if hits > 1 {
        let event = log_event!(
            "hitcount",
            mon: battle.mon(target)?.position_details(),
            hits: count
        );
        battle.log(event);
    }
    if mov.has_flag(MoveFlag::OneHitKnockOut) && battle.mon(target)?.hp == 0 {
        let event = log_event!("ohko", mon: battle.mon(target)?.position_details());
        battle.log(event);
    }
    if total == 0 {
        return Ok(());
    }

    if let Some(drain) = mov.drain {
        let amount = drain.apply(total as u64).max(1) as u32;
        handlers::heal(
            battle,
            HealRequest {
                target: user,
                amount,
                source: Some(target),
                from: Some("drain".to_owned()),
            },
        )?;
    }
    if let Some(recoil) = mov.recoil {
        let amount = recoil.apply(total as u64).max(1) as u32;
        handlers::damage(
            battle,
            DamageRequest::indirect(user, amount, DamageKind::Recoil).with_source(Some(user)),
        )?;
    }
    if let Some(secondary) = &mov.secondary {
        if battle.mon(target)?.hp > 0 && battle.prng.chance(secondary.chance as u64, 100) {
            dispatch::run_move(battle, user, |_, context| {
                shared::apply_hit_effect(context, user, target, &secondary.target)
            })?;
            dispatch::run_move(battle, user, |_, context| {
                shared::apply_hit_effect(context, user, user, &secondary.user)
            })?;
        }
    }
    Ok(())
}

fn hit_target(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    mov: &Rc<MoveData>,
    spread: bool,
) -> Result<u32> {
    let custom = dispatch::run_move(battle, user, |behavior, context| {
        behavior.damages(context, user, target, mov)
    })?
    .flatten();
    let amount = match custom {
        Some(amount) => amount,
        None => {
            let calculation = calculate_damage(battle, user, target, mov, spread)?;
            let target_details = battle.mon(target)?.position_details();
            if calculation.crit {
                battle.log(log_event!("crit", mon: &target_details));
            }
            if calculation.type_modifier > 0 {
                battle.log(log_event!("supereffective", mon: &target_details));
            } else if calculation.type_modifier < 0 {
                battle.log(log_event!("resisted", mon: &target_details));
            }
            calculation.damage
        }
    };
    let request = DamageRequest::from_move(target, amount, user, mov.clone());
    Ok(handlers::damage(battle, request)?.value().unwrap_or(0))
}

/// Lands a delayed hit from a move used on an earlier turn.
///
/// The move is the active move for the hit, so damage modifiers apply as if it were used now,
/// against whoever holds the position.
pub(crate) fn land_delayed_hit(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    id: &Id,
) -> Result<u32> {
    let instance = move_instance(battle, user, id)?;
    let previous = battle
        .active_move
        .replace(ActiveMove::new(&instance, user, true));
    let result = land_active_delayed_hit(battle, user, target, &instance.data);
    battle.active_move = previous;
    result
}

fn land_active_delayed_hit(
    battle: &mut Battle,
    user: MonHandle,
    target: MonHandle,
    mov: &Rc<MoveData>,
) -> Result<u32> {
    if !battle.mon(target)?.can_act() {
        return Ok(0);
    }
    let immune = dispatch::run_move(battle, user, |_, context| {
        shared::type_immune(context, target, mov)
    })?
    .unwrap_or(false);
    if immune {
        let event = log_event!("immune", mon: battle.mon(target)?.position_details());
        battle.log(event);
        return Ok(0);
    }
    hit_target(battle, user, target, mov, false)
}
