use anyhow::Result;
use scuffle_data::Id;

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        dispatch,
    },
    effect::{
        EffectEndReason,
        EffectInstance,
        EffectRequest,
        EffectState,
        EffectStore,
        EffectTarget,
        StackPolicy,
    },
    error::WrapOptionError,
    log::Event,
};

fn effect_store_mut<'b>(battle: &'b mut Battle, target: EffectTarget) -> Result<&'b mut EffectStore> {
    match target {
        EffectTarget::Mon(mon) => Ok(&mut battle.mon_mut(mon)?.effects),
        EffectTarget::Side(side) => Ok(&mut battle.side_mut(side)?.effects),
        EffectTarget::Slot(side, slot) => battle
            .side_mut(side)?
            .slot_effects
            .get_mut(slot)
            .wrap_not_found_error_with_format(format_args!("slot {slot} on side {side}")),
        EffectTarget::Field => Ok(&mut battle.field.effects),
    }
}

/// The start or end event for an effect. Position effects announce themselves.
fn lifecycle_event(
    battle: &Battle,
    target: EffectTarget,
    name: &str,
    starting: bool,
) -> Result<Option<Event>> {
    let event = match target {
        EffectTarget::Mon(mon) => log_event!(
            if starting { "start" } else { "end" },
            mon: battle.mon(mon)?.position_details(),
            effect: name
        ),
        EffectTarget::Side(side) => log_event!(
            if starting { "sidestart" } else { "sideend" },
            side: side,
            effect: name
        ),
        EffectTarget::Field => log_event!(
            if starting { "fieldstart" } else { "fieldend" },
            effect: name
        ),
        EffectTarget::Slot(..) => return Ok(None),
    };
    Ok(Some(event))
}

/// Adds an effect to a battler, a side, a position, or the field.
///
/// Effects are unique per target. Adding an effect the target already has follows the
/// effect's [`StackPolicy`]: rejected, refreshed, or restarted.
pub fn add_effect(battle: &mut Battle, request: EffectRequest) -> Result<HandlerOutcome> {
    dispatch::with_cascade(battle, "addeffect", |battle| {
        let affected = match request.target {
            EffectTarget::Mon(mon) => {
                if !battle.mon(mon)?.can_act() {
                    return Ok(HandlerOutcome::NoEffect);
                }
                Some(mon)
            }
            EffectTarget::Slot(side, slot) => battle.active_mon(side, slot),
            EffectTarget::Side(_) | EffectTarget::Field => None,
        };

        let origins =
            dispatch::origins_for(battle, request.source, affected, request.mov.is_some());
        if let Some(origin) = dispatch::prevention(battle, &origins, |hooks, context| {
            hooks.on_effect_prevention(context, &request)
        })? {
            ::log::trace!("{} prevented by {origin}", request.id);
            return Ok(HandlerOutcome::Prevented);
        }

        let origin = request.target.origin(&request.id);
        if let Some(existing) = origin.instance(battle) {
            let behavior = existing.behavior.clone();
            return match behavior.stack_policy() {
                StackPolicy::Reject => Ok(HandlerOutcome::NoEffect),
                StackPolicy::Refresh => {
                    dispatch::run_effect(battle, &origin, |behavior, context| {
                        let duration = match request.duration {
                            Some(duration) => duration,
                            None => behavior.duration(context)?,
                        };
                        context.state_mut().duration = duration;
                        Ok(())
                    })?;
                    Ok(HandlerOutcome::Applied(()))
                }
                StackPolicy::Restart => {
                    let restarted = dispatch::run_effect(battle, &origin, |behavior, context| {
                        behavior.on_restart(context)
                    })?;
                    if restarted.unwrap_or(false) {
                        Ok(HandlerOutcome::Applied(()))
                    } else {
                        Ok(HandlerOutcome::NoEffect)
                    }
                }
            };
        }

        let behavior = battle.registries.effects.create(&request.id, &request.id);
        let mut state = EffectState {
            source: request.source,
            source_side: request
                .source
                .and_then(|source| battle.mon(source).ok())
                .map(|source| source.side),
            created_turn: battle.turn(),
            move_id: request.mov.as_ref().map(|mov| Id::from(mov.name.as_str())),
            target: request.move_target,
            ..Default::default()
        };
        let applies = dispatch::run_detached(
            battle,
            behavior.as_ref(),
            &mut state,
            origin.clone(),
            |behavior, context| behavior.applies_to(context, &request.target),
        )?;
        if !applies {
            return Ok(HandlerOutcome::NoEffect);
        }
        state.duration = match request.duration {
            Some(duration) => duration,
            None => dispatch::run_detached(
                battle,
                behavior.as_ref(),
                &mut state.clone(),
                origin.clone(),
                |behavior, context| behavior.duration(context),
            )?,
        };

        let silent = behavior.silent();
        let name = behavior.name().to_owned();
        effect_store_mut(battle, request.target)?.insert(
            request.id.clone(),
            EffectInstance::new(request.id.clone(), behavior, state),
        );
        if !silent {
            if let Some(event) = lifecycle_event(battle, request.target, &name, true)? {
                battle.log(event);
            }
        }
        dispatch::run_effect(battle, &origin, |behavior, context| {
            behavior.on_start(context)
        })?;
        Ok(HandlerOutcome::Applied(()))
    })
}

/// Removes an effect, running its end hook.
///
/// Effects removed because their battler left the field or fainted end without an event.
pub fn remove_effect(
    battle: &mut Battle,
    target: EffectTarget,
    id: &Id,
    reason: EffectEndReason,
) -> Result<HandlerOutcome> {
    dispatch::with_cascade(battle, "removeeffect", |battle| {
        let Some(mut instance) = effect_store_mut(battle, target)?.shift_remove(id) else {
            return Ok(HandlerOutcome::NoEffect);
        };
        let behavior = instance.behavior.clone();
        if !behavior.silent() && !matches!(reason, EffectEndReason::SwitchOut | EffectEndReason::Faint)
        {
            if let Some(event) = lifecycle_event(battle, target, behavior.name(), false)? {
                battle.log(event);
            }
        }
        dispatch::run_detached(
            battle,
            behavior.as_ref(),
            &mut instance.state,
            target.origin(id),
            |behavior, context| behavior.on_end(context, reason),
        )?;
        Ok(HandlerOutcome::Applied(()))
    })
}
