use anyhow::Result;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
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

fn make_battle<'d>(data: &'d dyn DataStore, registries: &'d Registries) -> Result<Battle<'d>> {
    let team_1: TeamData = serde_json::from_value(serde_json::json!({
        "members": [member("Alpha", "Splashling", &["Spikes", "Splash"])]
    }))?;
    let team_2: TeamData = serde_json::from_value(serde_json::json!({
        "members": [
            member("Beta", "Splashling", &["Splash"]),
            member("Beta2", "Featherling", &["Splash"]),
            member("Beta3", "Splashling", &["Splash"]),
        ]
    }))?;
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team_1)
        .with_team_2(team_2)
        .build(data, registries)
}

fn spikes_layers(battle: &Battle) -> Option<u8> {
    battle
        .side(1)
        .unwrap()
        .effects
        .get(&Id::from("spikes"))
        .map(|spikes| spikes.state.layers)
}

#[test]
fn spikes_stack_to_three_layers() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_logs_contain(&battle, &["sidestart|side:1|effect:Spikes"]);
    assert_eq!(spikes_layers(&battle), Some(1));

    for layers in 2..=3 {
        assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
        assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
        assert_eq!(spikes_layers(&battle), Some(layers));
    }
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Spikes",
            "fail|mon:Alpha,player-1,1",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:5",
        ],
    );
    assert_eq!(spikes_layers(&battle), Some(3));
}

#[test]
fn spikes_hurt_grounded_entrants_only() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    battle.new_logs();

    // Flying types are not grounded.
    assert_matches!(battle.set_player_choice("player-1", "move 1"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "switch 1"), Ok(()));
    assert!(
        !battle
            .new_logs()
            .iter()
            .any(|log| log.starts_with("damage"))
    );

    // One layer takes an eighth.
    assert_matches!(battle.set_player_choice("player-1", "move 1"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "switch 2"), Ok(()));
    assert_logs_contain(
        &battle,
        &["damage|mon:Beta3,player-2,1|health:180/205|from:Spikes"],
    );
}
