use anyhow::Result;
use assert_matches::assert_matches;
use pretty_assertions::assert_eq;
use scuffle::{
    battle::Battle,
    config::TeamData,
    registry::Registries,
};
use scuffle_data::DataStore;
use scuffle_prng::PseudoRandomNumberGenerator;
use scuffle_test_utils::{
    TestBattleBuilder,
    TestDataStore,
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
    seed: u64,
) -> Result<Battle<'d>> {
    TestBattleBuilder::new()
        .with_seed(seed)
        .with_team_1(team("Alpha", "Splashling", &["Tackle"])?)
        .with_team_2(team("Beta", "Emberling", &["Tackle", "Ember"])?)
        .build(data, registries)
}

fn play(battle: &mut Battle) {
    assert_matches!(battle.start(), Ok(()));
    for choice in ["move 0", "move 1", "move 1"] {
        assert_matches!(battle.set_player_choice("player-1", "move 0"), Ok(()));
        assert_matches!(battle.set_player_choice("player-2", choice), Ok(()));
    }
}

#[test]
fn same_seed_and_choices_produce_identical_logs() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();

    let mut first = make_battle(&data, &registries, 123456).unwrap();
    let mut second = make_battle(&data, &registries, 123456).unwrap();
    play(&mut first);
    play(&mut second);

    assert_eq!(first.turn(), 4);
    assert_eq!(first.all_logs(), second.all_logs());
    for side in 0..2 {
        let first_mon = first.mon(first.team_mon(side, 0).unwrap()).unwrap();
        let second_mon = second.mon(second.team_mon(side, 0).unwrap()).unwrap();
        assert_eq!(first_mon.hp, second_mon.hp);
    }
}

#[test]
fn generator_reports_battle_seed() {
    let data = TestDataStore::new().unwrap();
    let registries = Registries::standard();
    let mut battle = make_battle(&data, &registries, 98765).unwrap();
    assert_eq!(battle.prng_mut().initial_seed(), 98765);
}
