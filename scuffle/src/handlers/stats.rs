use anyhow::Result;

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        dispatch,
    },
    effect::BoostRequest,
};

/// Changes one stat stage of a battler.
///
/// Hooks may rewrite the proposed change, such as reversing or doubling it. A change rewritten
/// to zero counts as prevented. Returns the change actually applied after clamping.
pub fn change_stat(battle: &mut Battle, request: BoostRequest) -> Result<HandlerOutcome<i8>> {
    dispatch::with_cascade(battle, "boost", |battle| {
        if battle.mon(request.target)?.hp == 0 || request.delta == 0 {
            return Ok(HandlerOutcome::NoEffect);
        }

        let origins = dispatch::origins_for(
            battle,
            request.source,
            Some(request.target),
            request.mov.is_some(),
        );
        let delta = dispatch::fold_until(
            battle,
            &origins,
            request.delta,
            |delta| delta == 0,
            |hooks, context, delta| hooks.on_stat_change(context, &request, delta),
        )?;
        if delta == 0 {
            return Ok(HandlerOutcome::Prevented);
        }

        let target = battle.mon_mut(request.target)?;
        let applied = target.boosts.add(request.boost, delta);
        let title = if delta > 0 { "boost" } else { "unboost" };
        let event = log_event!(
            title,
            mon: target.position_details(),
            stat: request.boost,
            by: applied.abs()
        )
        .with_opt("from", request.from.as_ref());
        battle.log(event);
        if applied == 0 {
            return Ok(HandlerOutcome::NoEffect);
        }

        dispatch::broadcast(battle, &origins, |hooks, context| {
            hooks.on_post_stat_change(context, &request, applied)
        })?;
        Ok(HandlerOutcome::Applied(applied))
    })
}
