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
    assert_new_logs_eq,
};

fn team(name: &str, ability: &str, moves: &[&str]) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": "Splashling",
                "ability": ability,
                "moves": moves,
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
    team_2: TeamData,
) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team("Alpha", "No Ability", &["Confuse Ray"])?)
        .with_team_2(team_2)
        .build(data, registries)
}

#[test]
fn confusion_cannot_be_added_twice() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Beta", "No Ability", &["Splash"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Confuse Ray",
            "start|mon:Beta,player-2,1|effect:Confusion",
            "activate|mon:Beta,player-2,1|effect:Confusion",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:2",
        ],
    );

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Confuse Ray",
            "fail|mon:Alpha,player-1,1",
            "activate|mon:Beta,player-2,1|effect:Confusion",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:3",
        ],
    );
}

#[test]
fn confusion_ends_after_its_turns_run_out() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Beta", "No Ability", &["Splash"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    // Three confused turns with every draw fixed to 1.
    for _ in 0..3 {
        assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
        assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    }
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Confuse Ray",
            "fail|mon:Alpha,player-1,1",
            "end|mon:Beta,player-2,1|effect:Confusion",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:5",
        ],
    );
    let beta = battle.active_mon(1, 0).unwrap();
    assert!(
        !battle
            .mon(beta)
            .unwrap()
            .effects
            .contains_key(&Id::from("confusion"))
    );
}

#[test]
fn own_tempo_prevents_confusion() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Beta", "Own Tempo", &["Splash"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    let beta = battle.active_mon(1, 0).unwrap();
    assert!(battle.mon(beta).unwrap().effects.is_empty());
}

#[test]
fn switching_out_ends_confusion_silently() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let team_2: TeamData = serde_json::from_value(serde_json::json!({
        "members": [
            { "name": "Beta", "species": "Splashling", "moves": ["Splash"], "level": 100 },
            { "name": "Beta2", "species": "Splashling", "moves": ["Splash"], "level": 100 },
        ]
    }))
    .unwrap();
    let mut battle = TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team("Alpha", "No Ability", &["Confuse Ray", "Splash"]).unwrap())
        .with_team_2(team_2)
        .build(&data, &registries)
        .unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    let beta = battle.active_mon(1, 0).unwrap();
    assert!(
        battle
            .mon(beta)
            .unwrap()
            .effects
            .contains_key(&Id::from("confusion"))
    );
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 1"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "switch 1"), Ok(()));
    assert!(battle.mon(beta).unwrap().effects.is_empty());
    assert!(
        !battle
            .new_logs()
            .iter()
            .any(|log| log.starts_with("end|"))
    );
}
