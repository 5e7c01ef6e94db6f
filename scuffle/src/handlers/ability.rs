use anyhow::Result;
use scuffle_data::{
    AbilityFlag,
    Id,
};

use crate::{
    battle::{
        Battle,
        HandlerOutcome,
        Mon,
        MonHandle,
        dispatch,
    },
};

/// Updates which abilities are suppressed and starts every ability that is visible again.
pub(super) fn update_suppression(battle: &mut Battle) -> Result<()> {
    let restored = battle.refresh_ability_suppression();
    start_restored_abilities(battle, &restored)
}

fn start_restored_abilities(battle: &mut Battle, restored: &[MonHandle]) -> Result<()> {
    if restored.is_empty() {
        return Ok(());
    }
    for mon in battle.active_mons_by_speed()? {
        if !restored.contains(&mon) || !battle.mon(mon)?.can_act() {
            continue;
        }
        ::log::debug!("ability suppression on mon {mon} ended");
        dispatch::run_ability(battle, mon, |behavior, context| behavior.on_start(context))?;
    }
    Ok(())
}

/// Replaces a battler's active ability.
///
/// Abilities flagged as irreplaceable stay. Returns the id of the replaced ability.
pub fn change_ability(
    battle: &mut Battle,
    target: MonHandle,
    ability: Id,
    source: Option<MonHandle>,
) -> Result<HandlerOutcome<Id>> {
    dispatch::with_cascade(battle, "ability", |battle| {
        let mon = battle.mon(target)?;
        if mon.hp == 0 || mon.ability.id == ability || mon.ability.data.has_flag(AbilityFlag::NoReplace)
        {
            return Ok(HandlerOutcome::NoEffect);
        }

        let origins = dispatch::origins_for(battle, source, Some(target), source.is_some());
        if let Some(origin) = dispatch::prevention(battle, &origins, |hooks, context| {
            hooks.on_ability_change_prevention(context, target, &ability, source)
        })? {
            ::log::trace!("ability change on mon {target} prevented by {origin}");
            return Ok(HandlerOutcome::Prevented);
        }

        let new = Mon::create_ability(&ability, battle.data, battle.registries)?;
        let mon = battle.mon_mut(target)?;
        let old = std::mem::replace(&mut mon.ability, new);
        let event = log_event!(
            "ability",
            mon: mon.position_details(),
            ability: mon.ability.name()
        )
        .with("old", old.name());
        battle.log(event);
        let restored = battle.refresh_ability_suppression();

        if battle.mon(target)?.can_act() {
            dispatch::run_ability(battle, target, |behavior, context| behavior.on_start(context))?;
        }
        let origins = dispatch::origins_for(battle, source, Some(target), false);
        dispatch::broadcast(battle, &origins, |hooks, context| {
            hooks.on_post_ability_change(context, target, &old.id, &ability)
        })?;
        start_restored_abilities(battle, &restored)?;
        Ok(HandlerOutcome::Applied(old.id))
    })
}
