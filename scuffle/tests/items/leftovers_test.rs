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

fn team(name: &str, item: Option<&str>) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": "Splashling",
                "item": item,
                "moves": ["Test Strike"],
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
        .with_base_damage_randomization(RandomizeBaseDamage::Max)
        .with_team_1(team("Alpha", Some("Leftovers"))?)
        .with_team_2(team("Beta", None)?)
        .build(data, registries)
}

#[test]
fn leftovers_heals_at_end_of_turn() {
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
            "damage|mon:Beta,player-2,1|health:119/205",
            "move|mon:Beta,player-2,1|name:Test Strike",
            "damage|mon:Alpha,player-1,1|health:119/205",
            "heal|mon:Alpha,player-1,1|health:131/205|from:item:Leftovers",
            "turn|turn:2",
        ],
    );
}

#[test]
fn leftovers_does_nothing_at_full_health() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));

    let alpha = battle.active_mon(0, 0).unwrap();
    assert_matches!(scuffle::handlers::end_of_turn(&mut battle), Ok(()));
    assert_matches!(battle.mon(alpha).map(|mon| mon.hp), Ok(205));
    assert!(
        !battle
            .new_logs()
            .iter()
            .any(|log| log.starts_with("heal"))
    );
}
