use std::{
    cell::RefCell,
    rc::Rc,
};

use anyhow::Result;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scuffle::{
    battle::{
        Battle,
        HandlerOutcome,
    },
    config::{
        SpeedSortTieResolution,
        TeamData,
    },
    effect::{
        AbilityBehavior,
        DamageKind,
        DamageRequest,
        HookContext,
        Hooks,
    },
    handlers,
    registry::Registries,
};
use scuffle_data::{
    AbilityData,
    DataStore,
};
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
};

type Outcomes = Rc<RefCell<Vec<HandlerOutcome<u32>>>>;

/// Hurts its owner again every time the owner takes damage.
struct Echo(Outcomes);

impl Hooks for Echo {
    fn on_post_damage(&self, ctx: &mut HookContext, request: &DamageRequest, _: u32) -> Result<()> {
        if !ctx.is_owner(request.target) {
            return Ok(());
        }
        let outcome = ctx.damage(DamageRequest::indirect(
            request.target,
            1,
            DamageKind::Effect("Echo".to_owned()),
        ))?;
        self.0.borrow_mut().push(outcome);
        Ok(())
    }
}

impl AbilityBehavior for Echo {}

fn registries(outcomes: &Outcomes) -> Registries {
    let mut registries = Registries::standard();
    let outcomes = outcomes.clone();
    registries.abilities.register("echo", move |_: &AbilityData| {
        Rc::new(Echo(outcomes.clone()))
    });
    registries
}

fn team(name: &str, ability: &str) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": "Splashling",
                "ability": ability,
                "moves": ["Test Strike"],
                "nature": "Hardy",
                "level": 100,
                "ivs": { "hp": 31, "atk": 31, "def": 31, "spa": 31, "spd": 31, "spe": 31 }
            }
        ]
    });
    Ok(serde_json::from_value(team)?)
}

fn make_battle<'d>(
    data: &'d dyn DataStore,
    registries: &'d Registries,
    max_cascade_depth: u8,
) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_max_cascade_depth(max_cascade_depth)
        .with_team_1(team("Alpha", "No Ability")?)
        .with_team_2(team("Beta", "Echo")?)
        .build(data, registries)
}

#[test]
fn recursive_hook_is_dropped_at_cascade_limit() {
    let data = TestDataStore::new().unwrap();
    let outcomes = Outcomes::default();
    let registries = registries(&outcomes);
    let mut battle = make_battle(&data, &registries, 3).unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    let beta = battle.active_mon(1, 0).unwrap();
    assert_matches!(
        handlers::damage(
            &mut battle,
            DamageRequest::indirect(beta, 10, DamageKind::Effect("Test".to_owned()))
        ),
        Ok(HandlerOutcome::Applied(10))
    );

    // Innermost call returns first.
    assert_eq!(
        *outcomes.borrow(),
        vec![
            HandlerOutcome::Dropped,
            HandlerOutcome::Applied(1),
            HandlerOutcome::Applied(1),
        ]
    );
    assert_eq!(battle.mon(beta).unwrap().hp, 193);
    assert_eq!(
        battle.new_logs(),
        vec![
            "damage|mon:Beta,player-2,1|health:195/205|from:Test",
            "damage|mon:Beta,player-2,1|health:194/205|from:Echo",
            "damage|mon:Beta,player-2,1|health:193/205|from:Echo",
        ]
    );
}

#[test]
fn cascade_depth_resets_after_each_mutation() {
    let data = TestDataStore::new().unwrap();
    let outcomes = Outcomes::default();
    let registries = registries(&outcomes);
    let mut battle = make_battle(&data, &registries, 2).unwrap();
    assert_matches!(battle.start(), Ok(()));

    let beta = battle.active_mon(1, 0).unwrap();
    for _ in 0..2 {
        assert_matches!(
            handlers::damage(
                &mut battle,
                DamageRequest::indirect(beta, 10, DamageKind::Effect("Test".to_owned()))
            ),
            Ok(HandlerOutcome::Applied(10))
        );
    }
    assert_eq!(
        *outcomes.borrow(),
        vec![
            HandlerOutcome::Dropped,
            HandlerOutcome::Applied(1),
            HandlerOutcome::Dropped,
            HandlerOutcome::Applied(1),
        ]
    );
    assert_eq!(battle.mon(beta).unwrap().hp, 183);
}

#[test]
fn battle_keeps_running_after_dropped_mutation() {
    let data = TestDataStore::new().unwrap();
    let outcomes = Outcomes::default();
    let registries = registries(&outcomes);
    let mut battle = make_battle(&data, &registries, 2).unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_eq!(battle.turn(), 2);
    assert!(outcomes.borrow().contains(&HandlerOutcome::Dropped));

    let beta = battle.active_mon(1, 0).unwrap();
    // 85 from the hit at a 99% roll, 1 from the echo it allowed.
    assert_eq!(battle.mon(beta).unwrap().hp, 119);
}
