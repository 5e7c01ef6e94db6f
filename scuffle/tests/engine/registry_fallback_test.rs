use std::rc::Rc;

use anyhow::Result;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scuffle::{
    battle::Battle,
    config::{
        RandomizeBaseDamage,
        SpeedSortTieResolution,
        TeamData,
    },
    moves::BasicMove,
    registry::Registries,
};
use scuffle_data::{
    DataStore,
    Id,
    MoveData,
};
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
fn empty_registries_fall_back_to_base_behaviors() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::new();
    assert!(registries.items.is_empty());
    assert!(!registries.items.contains(&Id::from("leftovers")));

    let mut battle = make_battle(
        &data,
        &registries,
        team("Alpha", "No Ability", Some("Leftovers"), &["Test Strike"]).unwrap(),
        team("Beta", "No Ability", None, &["Test Strike"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));
    battle.new_logs();

    // Leftovers has no behavior here, so nothing heals at the end of the turn.
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
fn unknown_ability_is_created_with_placeholder_data() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(
        &data,
        &registries,
        team("Alpha", "Mystery Power", None, &["Test Strike"]).unwrap(),
        team("Beta", "No Ability", None, &["Test Strike"]).unwrap(),
    )
    .unwrap();
    assert_matches!(battle.start(), Ok(()));

    let alpha = battle.mon(battle.team_mon(0, 0).unwrap()).unwrap();
    assert_eq!(alpha.ability.id, Id::from("mysterypower"));
    assert!(!registries.abilities.contains(&alpha.ability.id));

    assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
    assert_matches!(battle.set_player_choice("player-2", "move 0"), Ok(()));
    assert_eq!(battle.turn(), 2);
}

#[test]
fn registering_a_symbol_again_replaces_the_behavior() {
    let mut registries = Registries::standard();
    let before = registries.moves.len();
    registries.moves.register("teststrike", |_: &MoveData| Rc::new(BasicMove));
    registries.moves.register("teststrike", |_: &MoveData| Rc::new(BasicMove));
    assert_eq!(registries.moves.len(), before + 1);
    assert!(registries.moves.contains(&Id::from("Test Strike")));
}
