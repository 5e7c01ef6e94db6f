use anyhow::Result;

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
        StatusCondition,
        StatusRequest,
    },
};

/// Inflicts a non-volatile status.
///
/// A battler that already has a status, has fainted, or has a type immune to the status is
/// unaffected. None of those count as a prevention.
pub fn inflict_status(battle: &mut Battle, request: StatusRequest) -> Result<HandlerOutcome> {
    dispatch::with_cascade(battle, "status", |battle| {
        let target = battle.mon(request.target)?;
        if target.hp == 0
            || target.status.is_some()
            || request
                .status
                .immune_types()
                .iter()
                .any(|typ| target.has_type(*typ))
        {
            return Ok(HandlerOutcome::NoEffect);
        }

        let origins = dispatch::origins_for(
            battle,
            request.source,
            Some(request.target),
            request.mov.is_some(),
        );
        if let Some(origin) = dispatch::prevention(battle, &origins, |hooks, context| {
            hooks.on_status_prevention(context, &request)
        })? {
            ::log::trace!(
                "{} on mon {} prevented by {origin}",
                request.status,
                request.target
            );
            return Ok(HandlerOutcome::Prevented);
        }

        let id = request.status.id();
        let behavior = battle.registries.effects.create(&id, &id);
        let origin = HookOrigin::Status(request.target);
        let mut state = EffectState {
            source: request.source,
            source_side: request
                .source
                .and_then(|source| battle.mon(source).ok())
                .map(|source| source.side),
            created_turn: battle.turn(),
            ..Default::default()
        };
        state.duration = dispatch::run_detached(
            battle,
            behavior.as_ref(),
            &mut state.clone(),
            origin.clone(),
            |behavior, context| behavior.duration(context),
        )?;

        let target = battle.mon_mut(request.target)?;
        target.status = Some(StatusCondition {
            status: request.status,
            effect: EffectInstance::new(id, behavior, state),
        });
        let event = log_event!(
            "status",
            mon: target.position_details(),
            status: request.status.code()
        )
        .with_opt("from", request.from.as_ref());
        battle.log(event);

        dispatch::run_effect(battle, &origin, |behavior, context| {
            behavior.on_start(context)
        })?;
        dispatch::broadcast(battle, &origins, |hooks, context| {
            hooks.on_post_status(context, &request)
        })?;
        Ok(HandlerOutcome::Applied(()))
    })
}

/// Cures a battler's non-volatile status.
pub fn cure_status(
    battle: &mut Battle,
    mon: MonHandle,
    from: Option<String>,
) -> Result<HandlerOutcome> {
    dispatch::with_cascade(battle, "curestatus", |battle| {
        let target = battle.mon_mut(mon)?;
        let Some(mut status) = target.status.take() else {
            return Ok(HandlerOutcome::NoEffect);
        };
        let event = log_event!(
            "curestatus",
            mon: target.position_details(),
            status: status.status.code()
        )
        .with_opt("from", from);
        battle.log(event);

        let behavior = status.effect.behavior.clone();
        dispatch::run_detached(
            battle,
            behavior.as_ref(),
            &mut status.effect.state,
            HookOrigin::Status(mon),
            |behavior, context| behavior.on_end(context, EffectEndReason::Removed),
        )?;
        Ok(HandlerOutcome::Applied(()))
    })
}
