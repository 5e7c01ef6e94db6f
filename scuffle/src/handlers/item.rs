use anyhow::Result;
use scuffle_data::Id;

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        MonHandle,
        dispatch,
    },
    error::WrapOptionError,
};

/// Takes a battler's item away.
///
/// Returns the id of the item taken.
pub fn take_item(
    battle: &mut Battle,
    target: MonHandle,
    source: Option<MonHandle>,
) -> Result<HandlerOutcome<Id>> {
    dispatch::with_cascade(battle, "takeitem", |battle| {
        if battle.mon(target)?.item.is_none() {
            return Ok(HandlerOutcome::NoEffect);
        }

        let origins = dispatch::origins_for(battle, source, Some(target), source.is_some());
        if let Some(origin) = dispatch::prevention(battle, &origins, |hooks, context| {
            hooks.on_item_change_prevention(context, target, source)
        })? {
            ::log::trace!("item removal from mon {target} prevented by {origin}");
            return Ok(HandlerOutcome::Prevented);
        }

        let from = battle
            .active_move
            .as_ref()
            .filter(|active| Some(active.user) == source)
            .map(|active| format!("move:{}", active.data.name));
        let of = source
            .filter(|source| *source != target)
            .and_then(|source| battle.mon(source).ok())
            .map(|source| source.position_details());
        let mon = battle.mon_mut(target)?;
        let item = mon.item.take().wrap_expectation("item disappeared")?;
        mon.locked_move = None;
        let event = log_event!(
            "itemend",
            mon: mon.position_details(),
            item: item.name()
        )
        .with_opt("from", from)
        .with_opt("of", of);
        battle.log(event);

        let origins = dispatch::origins_for(battle, source, Some(target), false);
        dispatch::broadcast(battle, &origins, |hooks, context| {
            hooks.on_post_item_change(context, target, Some(&item.id), None)
        })?;
        Ok(HandlerOutcome::Applied(item.id))
    })
}

/// Uses up a battler's own item, such as eating a berry.
///
/// Returns the id of the item used.
pub fn use_item(battle: &mut Battle, target: MonHandle) -> Result<HandlerOutcome<Id>> {
    dispatch::with_cascade(battle, "useitem", |battle| {
        let mon = battle.mon_mut(target)?;
        let Some(item) = mon.item.take() else {
            return Ok(HandlerOutcome::NoEffect);
        };
        mon.locked_move = None;
        let event = log_event!(
            "itemend",
            mon: mon.position_details(),
            item: item.name()
        )
        .flag("consumed");
        battle.log(event);

        let origins = dispatch::origins_for(battle, Some(target), None, false);
        dispatch::broadcast(battle, &origins, |hooks, context| {
            hooks.on_post_item_change(context, target, Some(&item.id), None)
        })?;
        Ok(HandlerOutcome::Applied(item.id))
    })
}
