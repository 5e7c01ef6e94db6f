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
    Boost,
    DataStore,
};
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
    assert_logs_contain,
};

fn member(name: &str, ability: &str) -> serde_json::Value {
    serde_json::json!({
        "name": name,
        "species": "Splashling",
        "ability": ability,
        "moves": ["Splash"],
        "nature": "Hardy",
        "level": 100
    })
}

fn make_battle<'d>(data: &'d dyn DataStore, registries: &'d Registries) -> Result<Battle<'d>> {
    let team_1: TeamData = serde_json::from_value(serde_json::json!({
        "members": [
            member("Alpha", "Neutralizing Gas"),
            member("Alpha2", "No Ability"),
        ]
    }))?;
    let team_2: TeamData = serde_json::from_value(serde_json::json!({
        "members": [member("Beta", "Intimidate")]
    }))?;
    TestBattleBuilder::new()
        .with_seed(0)
        .with_fixed_rng(1)
        .with_speed_sort_tie_resolution(SpeedSortTieResolution::Keep)
        .with_team_1(team_1)
        .with_team_2(team_2)
        .build(data, registries)
}

#[test]
fn neutralizing_gas_hides_abilities_until_it_leaves() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries).unwrap();
    assert_matches!(battle.start(), Ok(()));

    let alpha = battle.active_mon(0, 0).unwrap();
    let beta = battle.active_mon(1, 0).unwrap();
    assert!(battle.ability_suppressed(beta));
    assert!(!battle.mon(beta).unwrap().has_ability("intimidate"));
    assert!(!battle.ability_suppressed(alpha));
    assert_eq!(battle.mon(alpha).unwrap().boosts.get(Boost::Atk), 0);
    assert!(
        !battle
            .new_logs()
            .iter()
            .any(|log| log.contains("ability:Intimidate"))
    );

    assert_matches!(battle.set_player_choice("player-1", "switch 1"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert!(!battle.ability_suppressed(beta));
    assert!(battle.mon(beta).unwrap().has_ability("intimidate"));
    assert_logs_contain(&battle, &["ability|mon:Beta,player-2,1|ability:Intimidate"]);
}
