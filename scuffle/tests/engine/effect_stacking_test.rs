use std::rc::Rc;

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
        EffectBehavior,
        EffectDuration,
        EffectEndReason,
        EffectRequest,
        EffectTarget,
        HookContext,
        Hooks,
        StackPolicy,
    },
    handlers,
    registry::Registries,
};
use scuffle_data::{
    DataStore,
    Id,
};
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
    assert_new_logs_eq,
};

/// Field effect whose duration resets when it is added again.
struct Aura;

impl Hooks for Aura {}

impl EffectBehavior for Aura {
    fn name(&self) -> &str {
        "Test Aura"
    }

    fn stack_policy(&self) -> StackPolicy {
        StackPolicy::Refresh
    }

    fn duration(&self, _: &mut HookContext) -> Result<EffectDuration> {
        Ok(EffectDuration::Turns(3))
    }
}

fn registries() -> Registries {
    let mut registries = Registries::standard();
    registries.effects.register("testaura", |_: &Id| Rc::new(Aura));
    registries
}

fn team(name: &str) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": "Splashling",
                "moves": ["Splash"],
                "nature": "Hardy",
                "level": 100,
                "ivs": { "hp": 31, "atk": 31, "def": 31, "spa": 31, "spd": 31, "spe": 31 }
            }
        ]
    });
    Ok(serde_json::from_value(team)?)
}

fn make_battle<'d>(data: &'d dyn DataStore, registries: &'d Registries) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team("Alpha")?)
        .with_team_2(team("Beta")?)
        .build(data, registries)
}

fn aura_duration(battle: &Battle) -> Option<EffectDuration> {
    battle
        .field()
        .effects
        .get(&Id::from("testaura"))
        .map(|aura| aura.state.duration)
}

fn pass_turn(battle: &mut Battle) {
    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
}

#[test]
fn refresh_resets_duration_without_restarting() {
    let data = TestDataStore::new().unwrap();
    let registries = registries();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(
        handlers::add_effect(&mut battle, EffectRequest::new(EffectTarget::Field, "testaura")),
        Ok(HandlerOutcome::Applied(()))
    );
    assert_new_logs_eq(&mut battle, &["fieldstart|effect:Test Aura"]);

    pass_turn(&mut battle);
    assert_eq!(aura_duration(&battle), Some(EffectDuration::Turns(2)));
    battle.new_logs();

    assert_matches!(
        handlers::add_effect(&mut battle, EffectRequest::new(EffectTarget::Field, "testaura")),
        Ok(HandlerOutcome::Applied(()))
    );
    assert_eq!(aura_duration(&battle), Some(EffectDuration::Turns(3)));
    assert_new_logs_eq(&mut battle, &[]);
}

#[test]
fn expired_effect_ends_with_event() {
    let data = TestDataStore::new().unwrap();
    let registries = registries();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    assert_matches!(
        handlers::add_effect(&mut battle, EffectRequest::new(EffectTarget::Field, "testaura")),
        Ok(HandlerOutcome::Applied(()))
    );
    pass_turn(&mut battle);
    pass_turn(&mut battle);
    battle.new_logs();

    pass_turn(&mut battle);
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Splash",
            "fail|mon:Alpha,player-1,1",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "fieldend|effect:Test Aura",
            "turn|turn:4",
        ],
    );
    assert_eq!(aura_duration(&battle), None);
}

#[test]
fn unregistered_effect_is_inert_and_rejects_second_application() {
    let data = TestDataStore::new().unwrap();
    let registries = registries();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    let alpha = battle.active_mon(0, 0).unwrap();
    let request = EffectRequest::new(EffectTarget::Mon(alpha), "mystery");
    assert_matches!(
        handlers::add_effect(&mut battle, request.clone()),
        Ok(HandlerOutcome::Applied(()))
    );
    assert_matches!(
        handlers::add_effect(&mut battle, request),
        Ok(HandlerOutcome::NoEffect)
    );
    assert_new_logs_eq(&mut battle, &["start|mon:Alpha,player-1,1|effect:mystery"]);

    assert_matches!(
        handlers::remove_effect(
            &mut battle,
            EffectTarget::Mon(alpha),
            &Id::from("mystery"),
            EffectEndReason::Removed
        ),
        Ok(HandlerOutcome::Applied(()))
    );
    assert_new_logs_eq(&mut battle, &["end|mon:Alpha,player-1,1|effect:mystery"]);
    assert_matches!(
        handlers::remove_effect(
            &mut battle,
            EffectTarget::Mon(alpha),
            &Id::from("mystery"),
            EffectEndReason::Removed
        ),
        Ok(HandlerOutcome::NoEffect)
    );
}
