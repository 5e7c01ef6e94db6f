use anyhow::Result;
use assert_matches::assert_matches;
use scuffle::{
    battle::Battle,
    config::{
        SpeedSortTieResolution,
        TeamData,
    },
    registry::Registries,
};
use scuffle_data::{
    DataStore,
    Id,
};
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
    assert_logs_contain,
    assert_new_logs_eq,
};

fn member(name: &str, species: &str, moves: &[&str]) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "species": species,
        "moves": moves,
        "nature": "Hardy",
        "level": 100,
        "ivs": { "hp": 31, "atk": 31, "def": 31, "spa": 31, "spd": 31, "spe": 31 }
    })
}

fn team_1() -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            member("Alpha", "Splashling", &["Stealth Rock"]),
            member("Alpha2", "Splashling", &["Splash"]),
        ]
    });
    Ok(serde_json::from_value(team)?)
}

fn team_2() -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            member("Beta", "Splashling", &["Splash"]),
            member("Beta2", "Featherling", &["Splash"]),
            member("Beta3", "Ironling", &["Splash"]),
        ]
    });
    Ok(serde_json::from_value(team)?)
}

fn make_battle<'d>(data: &'d dyn DataStore, registries: &'d Registries) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team_1()?)
        .with_team_2(team_2()?)
        .build(data, registries)
}

#[test]
fn stealth_rock_outlives_its_setter_and_hurts_entrants() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Stealth Rock",
            "sidestart|side:1|effect:Stealth Rock",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:2",
        ],
    );

    // The setter leaves; the rocks stay with the side they were set on.
    assert_matches!(battle.set_player_choice("player-1", "switch 1"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert!(
        battle
            .side(1)
            .unwrap()
            .effects
            .contains_key(&Id::from("stealthrock"))
    );
    battle.new_logs();

    // Rock is super effective against a flying type: 2/8 of 205.
    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "switch 1"), Ok(()));
    assert_logs_contain(
        &battle,
        &[
            "switch|mon:Beta2,player-2,1|species:Featherling|level:100|health:205/205",
            "damage|mon:Beta2,player-2,1|health:154/205|from:Stealth Rock",
            "turn|turn:4",
        ],
    );

    // Steel resists rock: 1/16 of 205.
    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "switch 2"), Ok(()));
    assert_logs_contain(
        &battle,
        &["damage|mon:Beta3,player-2,1|health:193/205|from:Stealth Rock"],
    );
}

#[test]
fn stealth_rock_cannot_be_set_twice() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Stealth Rock",
            "fail|mon:Alpha,player-1,1",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:3",
        ],
    );
}
