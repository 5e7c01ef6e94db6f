use std::{
    cell::RefCell,
    rc::Rc,
};

use anyhow::Result;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scuffle::{
    battle::Battle,
    config::{
        SpeedSortTieResolution,
        TeamData,
    },
    effect::{
        BoostRequest,
        HookContext,
        Hooks,
        ItemBehavior,
    },
    registry::Registries,
};
use scuffle_data::{
    Boost,
    DataStore,
    ItemData,
};
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
    assert_logs_contain,
};

/// Item that records every stat change it is asked to override.
struct StatChangeRecorder(Rc<RefCell<Vec<i8>>>);

impl Hooks for StatChangeRecorder {
    fn on_stat_change(
        &self,
        _: &mut HookContext,
        _: &BoostRequest,
        delta: i8,
    ) -> Result<Option<i8>> {
        self.0.borrow_mut().push(delta);
        Ok(Some(-1))
    }
}

impl ItemBehavior for StatChangeRecorder {}

fn team(name: &str, species: &str, ability: &str) -> Result<TeamData> {
    team_with_item(name, species, ability, None)
}

fn team_with_item(
    name: &str,
    species: &str,
    ability: &str,
    item: Option<&str>,
) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": species,
                "ability": ability,
                "item": item,
                "moves": ["Splash"],
                "nature": "Hardy",
                "level": 100
            }
        ]
    });
    Ok(serde_json::from_value(team)?)
}

fn make_battle<'d>(
    data: &'d dyn DataStore,
    registries: &'d Registries,
    team_2: TeamData,
) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team("Gary", "Gyarados", "Intimidate")?)
        .with_team_2(team_2)
        .build(data, registries)
}

#[test]
fn intimidate_lowers_foe_attack_on_entry() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Beta", "Splashling", "No Ability").unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_logs_contain(&battle, &["ability|mon:Gary,player-1,1|ability:Intimidate"]);
    let beta = battle.active_mon(1, 0).unwrap();
    assert_eq!(battle.mon(beta).unwrap().boosts.get(Boost::Atk), -1);
    let gary = battle.active_mon(0, 0).unwrap();
    assert_eq!(battle.mon(gary).unwrap().boosts.get(Boost::Atk), 0);
}

#[test]
fn clear_body_rejects_intimidate() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Beta", "Splashling", "Clear Body").unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    let beta = battle.active_mon(1, 0).unwrap();
    assert_eq!(battle.mon(beta).unwrap().boosts.get(Boost::Atk), 0);
}

#[test]
fn clear_body_veto_skips_later_stat_change_hooks() {
    let data = TestDataStore::new().unwrap();
    let seen = Rc::new(RefCell::new(Vec::new()));
    let mut registries = Registries::standard();
    let recorder = seen.clone();
    registries.items.register("leftovers", move |_: &ItemData| {
        Rc::new(StatChangeRecorder(recorder.clone()))
    });
    let mut battle = make_battle(
        &data,
        &registries,
        team_with_item("Beta", "Splashling", "Clear Body", Some("Leftovers")).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    // The item comes after the ability and would turn the change back into a drop.
    assert_eq!(*seen.borrow(), Vec::<i8>::new());
    let beta = battle.active_mon(1, 0).unwrap();
    assert_eq!(battle.mon(beta).unwrap().boosts.get(Boost::Atk), 0);
}
