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

fn team(name: &str, species: &str, moves: &[&str]) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": species,
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
    team_1: TeamData,
    team_2: TeamData,
) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_base_damage_randomization(RandomizeBaseDamage::Max)
        .with_team_1(team_1)
        .with_team_2(team_2)
        .build(data, registries)
}

#[test]
fn neutral_hit_with_equal_stats_deals_canonical_damage() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Alpha", "Splashling", &["Test Strike"]).unwrap(),
        team("Beta", "Splashling", &["Test Strike"]).unwrap(),
    )
    .unwrap();

    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Test Strike",
            "damage|mon:Beta,player-2,1|health:119/205",
            "move|mon:Beta,player-2,1|name:Test Strike",
            "damage|mon:Alpha,player-1,1|health:119/205",
            "turn|turn:2",
        ],
    );
}

#[test]
fn special_hit_uses_special_stats() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Alpha", "Splashling", &["Test Beam"]).unwrap(),
        team("Beta", "Splashling", &["Splash"]).unwrap(),
    )
    .unwrap();

    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Test Beam",
            "damage|mon:Beta,player-2,1|health:119/205",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:2",
        ],
    );
}

#[test]
fn same_type_bonus_and_effectiveness_apply_in_order() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Alpha", "Splashling", &["Water Gun"]).unwrap(),
        team("Beta", "Emberling", &["Splash"]).unwrap(),
    )
    .unwrap();

    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    // 35 base, 52 with the same-type bonus, 104 super effective.
    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Water Gun",
            "supereffective|mon:Beta,player-2,1",
            "damage|mon:Beta,player-2,1|health:101/205",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:2",
        ],
    );
}
