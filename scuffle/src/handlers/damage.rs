use anyhow::Result;

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        HitRecord,
        dispatch,
    },
    effect::{
        DamageRequest,
        HealRequest,
    },
};

/// Reduces a battler's HP.
///
/// Returns the damage actually dealt, which never exceeds the target's remaining HP. A target
/// brought to zero HP is queued for its faint message, which is logged once the current action
/// finishes.
pub fn damage(battle: &mut Battle, request: DamageRequest) -> Result<HandlerOutcome<u32>> {
    dispatch::with_cascade(battle, "damage", |battle| damage_internal(battle, request))
}

fn damage_internal(battle: &mut Battle, request: DamageRequest) -> Result<HandlerOutcome<u32>> {
    let hp = battle.mon(request.target)?.hp;
    if hp == 0 || request.amount == 0 {
        return Ok(HandlerOutcome::NoEffect);
    }

    let origins = dispatch::origins_for(
        battle,
        request.source,
        Some(request.target),
        request.kind.is_direct(),
    );
    if let Some(origin) = dispatch::prevention(battle, &origins, |hooks, context| {
        hooks.on_damage_prevention(context, &request)
    })? {
        ::log::trace!("damage to mon {} prevented by {origin}", request.target);
        return Ok(HandlerOutcome::Prevented);
    }

    let mut amount = request.amount.min(hp);
    if let Some(capped) = dispatch::first_override(battle, &origins, |hooks, context| {
        hooks.on_damage_cap(context, &request, amount)
    })? {
        amount = capped.min(amount);
    }
    if amount == 0 {
        return Ok(HandlerOutcome::NoEffect);
    }

    let turn = battle.turn();
    let of = request
        .source
        .filter(|source| *source != request.target && !request.kind.is_direct())
        .and_then(|source| battle.mon(source).ok())
        .map(|source| source.position_details());
    let target = battle.mon_mut(request.target)?;
    target.hp -= amount;
    let fainted = target.hp == 0;
    if request.kind.is_direct() {
        if let (Some(source), Some(mov)) = (request.source, &request.mov) {
            target.last_hit = Some(HitRecord {
                source,
                category: mov.category,
                damage: amount,
                turn,
            });
        }
    }
    let event = log_event!(
        "damage",
        mon: target.position_details(),
        health: target.health()
    )
    .with_opt("from", request.log_source())
    .with_opt("of", of);
    battle.log(event);
    if fainted {
        battle.faint_queue.push_back(request.target);
    }

    dispatch::broadcast(battle, &origins, |hooks, context| {
        hooks.on_post_damage(context, &request, amount)
    })?;
    if fainted {
        dispatch::broadcast(battle, &origins, |hooks, context| {
            hooks.on_post_damage_death(context, &request, amount)
        })?;
    }
    Ok(HandlerOutcome::Applied(amount))
}

/// Restores a battler's HP, up to its maximum.
///
/// Returns the HP actually restored.
pub fn heal(battle: &mut Battle, request: HealRequest) -> Result<HandlerOutcome<u32>> {
    dispatch::with_cascade(battle, "heal", |battle| {
        let target = battle.mon(request.target)?;
        if target.hp == 0 || target.hp >= target.max_hp || request.amount == 0 {
            return Ok(HandlerOutcome::NoEffect);
        }

        let origins = dispatch::origins_for(battle, request.source, Some(request.target), false);
        if dispatch::prevention(battle, &origins, |hooks, context| {
            hooks.on_heal_prevention(context, &request)
        })?
        .is_some()
        {
            return Ok(HandlerOutcome::Prevented);
        }

        let target = battle.mon_mut(request.target)?;
        let amount = request.amount.min(target.max_hp - target.hp);
        target.hp += amount;
        let event = log_event!(
            "heal",
            mon: target.position_details(),
            health: target.health()
        )
        .with_opt("from", request.from.as_ref());
        battle.log(event);
        Ok(HandlerOutcome::Applied(amount))
    })
}
