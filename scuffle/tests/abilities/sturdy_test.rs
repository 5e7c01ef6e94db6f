use anyhow::Result;
use assert_matches::assert_matches;
use scuffle::{
    battle::Battle,
    config::{
        RandomizeBaseDamage,
        SpeedSortTieResolution,
        TeamData,
    },
    registry::Registries,
};
use scuffle_data::DataStore;
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
    assert_new_logs_eq,
};

fn attacker() -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": "Alpha",
                "species": "Splashling",
                "moves": ["Test Strike", "Fissure"],
                "nature": "Hardy",
                "level": 100,
                "ivs": { "hp": 31, "atk": 31, "def": 31, "spa": 31, "spd": 31, "spe": 31 }
            }
        ]
    });
    Ok(serde_json::from_value(team)?)
}

fn defender() -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": "Rocky",
                "species": "Geodude",
                "ability": "Sturdy",
                "moves": ["Splash"],
                "nature": "Hardy",
                "level": 5,
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
        .with_base_damage_randomization(RandomizeBaseDamage::Max)
        .with_team_1(attacker()?)
        .with_team_2(defender()?)
        .build(data, registries)
}

#[test]
fn sturdy_survives_knockout_hit_from_full_health() {
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
            "move|mon:Alpha,player-1,1|name:Test Strike",
            "resisted|mon:Rocky,player-2,1",
            "activate|mon:Rocky,player-2,1|from:ability:Sturdy",
            "damage|mon:Rocky,player-2,1|health:1/20",
            "move|mon:Rocky,player-2,1|name:Splash",
            "fail|mon:Rocky,player-2,1",
            "turn|turn:2",
        ],
    );
}

#[test]
fn sturdy_blocks_one_hit_knockout_moves() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 1"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    let rocky = battle.active_mon(1, 0).unwrap();
    assert_matches!(battle.mon(rocky).map(|mon| mon.hp), Ok(20));
}
