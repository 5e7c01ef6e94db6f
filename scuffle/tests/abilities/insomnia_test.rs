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
    Status,
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
    moves_1: &[&str],
    team_2: TeamData,
) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team("Alpha", "No Ability", moves_1)?)
        .with_team_2(team_2)
        .build(data, registries)
}

#[test]
fn insomnia_blocks_sleep_and_move_fails() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        &["Spore"],
        team("Beta", "Insomnia", &["Splash"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Spore",
            "immune|mon:Beta,player-2,1|from:ability:Insomnia",
            "fail|mon:Alpha,player-1,1",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:2",
        ],
    );
    let beta = battle.active_mon(1, 0).unwrap();
    assert!(battle.mon(beta).unwrap().status.is_none());
}

#[test]
fn sleep_lands_without_insomnia() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        &["Spore"],
        team("Beta", "No Ability", &["Splash"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    // Sleep lasts three turns with every draw fixed to 1, so the first turn is lost.
    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Spore",
            "status|mon:Beta,player-2,1|status:slp",
            "cant|mon:Beta,player-2,1|from:slp",
            "turn|turn:2",
        ],
    );
    let beta = battle.active_mon(1, 0).unwrap();
    assert_matches!(
        battle.mon(beta).unwrap().status.as_ref().map(|status| status.status),
        Some(Status::Sleep)
    );
}

#[test]
fn insomnia_blocks_sleep_on_confused_target() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        &["Confuse Ray", "Spore"],
        team("Beta", "Insomnia", &["Splash"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 1"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Spore",
            "immune|mon:Beta,player-2,1|from:ability:Insomnia",
            "fail|mon:Alpha,player-1,1",
            "activate|mon:Beta,player-2,1|effect:Confusion",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:3",
        ],
    );
    let beta = battle.active_mon(1, 0).unwrap();
    let beta = battle.mon(beta).unwrap();
    assert!(beta.status.is_none());
    assert!(beta.effects.contains_key(&Id::from("confusion")));
}
