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

fn team(name: &str, ability: &str, item: Option<&str>, moves: &[&str]) -> Result<TeamData> {
    let team = serde_json::json!({
        "members": [
            {
                "name": name,
                "species": "Splashling",
                "ability": ability,
                "item": item,
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
) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_base_damage_randomization(RandomizeBaseDamage::Max)
        .with_team_1(team_1)
        .with_team_2(team("Beta", "No Ability", None, &["Splash"])?)
        .build(data, registries)
}

#[test]
fn life_orb_boosts_damage_and_costs_health() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Alpha", "Huge Power", Some("Life Orb"), &["Tackle"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    // Attack doubles to 200 for a 69 damage hit, which the orb raises to 89.
    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_new_logs_eq(
        &mut battle,
        &[
            "move|mon:Alpha,player-1,1|name:Tackle",
            "damage|mon:Beta,player-2,1|health:116/205",
            "damage|mon:Alpha,player-1,1|health:185/205|from:Life Orb",
            "move|mon:Beta,player-2,1|name:Splash",
            "fail|mon:Beta,player-2,1",
            "turn|turn:2",
        ],
    );
}

#[test]
fn life_orb_costs_nothing_for_status_moves() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Alpha", "No Ability", Some("Life Orb"), &["Swords Dance"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    let alpha = battle.active_mon(0, 0).unwrap();
    assert_matches!(battle.mon(alpha).map(|mon| mon.hp), Ok(205));
}
