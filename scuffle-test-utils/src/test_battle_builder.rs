use anyhow::Result;
use scuffle::{
    battle::Battle,
    config::{
        BattleOptions,
        BattleType,
        EngineOptions,
        PlayerData,
        RandomizeBaseDamage,
        SideData,
        SpeedSortTieResolution,
        TeamData,
    },
    registry::Registries,
};
use scuffle_data::DataStore;

use crate::{
    ControlledRandomNumberGenerator,
    get_controlled_rng_for_battle,
};

/// Battle builder object for integration tests.
pub struct TestBattleBuilder {
    options: BattleOptions,
    engine_options: EngineOptions,
    controlled_rng: bool,
    fixed_rng_value: Option<u64>,
}

impl TestBattleBuilder {
    /// Creates a new [`TestBattleBuilder`] for a singles battle between `player-1` and
    /// `player-2`.
    pub fn new() -> Self {
        Self {
            options: BattleOptions {
                seed: None,
                battle_type: BattleType::Singles,
                side_1: SideData {
                    name: "Side 1".to_owned(),
                    player: PlayerData {
                        id: "player-1".to_owned(),
                        name: "Player 1".to_owned(),
                        team: TeamData::default(),
                    },
                },
                side_2: SideData {
                    name: "Side 2".to_owned(),
                    player: PlayerData {
                        id: "player-2".to_owned(),
                        name: "Player 2".to_owned(),
                        team: TeamData::default(),
                    },
                },
            },
            engine_options: EngineOptions::default(),
            controlled_rng: false,
            fixed_rng_value: None,
        }
    }

    /// Builds a new [`Battle`] from the battle builder.
    pub fn build<'d>(
        mut self,
        data: &'d dyn DataStore,
        registries: &'d Registries,
    ) -> Result<Battle<'d>> {
        if self.controlled_rng || self.fixed_rng_value.is_some() {
            self.engine_options.rng_factory =
                |seed: Option<u64>| Box::new(ControlledRandomNumberGenerator::new(seed));
        }
        let mut battle = Battle::new(self.options, self.engine_options, data, registries)?;
        if let Some(value) = self.fixed_rng_value {
            if let Some(rng) = get_controlled_rng_for_battle(&mut battle) {
                rng.set_fallback_value(Some(value));
            }
        }
        Ok(battle)
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.options.seed = Some(seed);
        self
    }

    pub fn with_battle_type(mut self, battle_type: BattleType) -> Self {
        self.options.battle_type = battle_type;
        self
    }

    pub fn with_player_1(mut self, id: &str, name: &str) -> Self {
        self.options.side_1.player.id = id.to_owned();
        self.options.side_1.player.name = name.to_owned();
        self
    }

    pub fn with_player_2(mut self, id: &str, name: &str) -> Self {
        self.options.side_2.player.id = id.to_owned();
        self.options.side_2.player.name = name.to_owned();
        self
    }

    pub fn with_team_1(mut self, team: TeamData) -> Self {
        self.options.side_1.player.team = team;
        self
    }

    pub fn with_team_2(mut self, team: TeamData) -> Self {
        self.options.side_2.player.team = team;
        self
    }

    pub fn with_auto_continue(mut self, auto_continue: bool) -> Self {
        self.engine_options.auto_continue = auto_continue;
        self
    }

    pub fn with_pass_allowed(mut self, pass_allowed: bool) -> Self {
        self.engine_options.allow_pass = pass_allowed;
        self
    }

    pub fn with_max_cascade_depth(mut self, depth: u8) -> Self {
        self.engine_options.max_cascade_depth = depth;
        self
    }

    pub fn with_controlled_rng(mut self, controlled_rng: bool) -> Self {
        self.controlled_rng = controlled_rng;
        self
    }

    /// Uses a controlled generator that returns the same value for every draw.
    ///
    /// A value of 1 hits every move with a percent accuracy, never lands a critical hit, and
    /// passes every percent chance above 1.
    pub fn with_fixed_rng(mut self, value: u64) -> Self {
        self.fixed_rng_value = Some(value);
        self
    }

    pub fn with_base_damage_randomization(mut self, randomize: RandomizeBaseDamage) -> Self {
        self.engine_options.randomize_base_damage = randomize;
        self
    }

    pub fn with_speed_sort_tie_resolution(
        mut self,
        tie_resolution: SpeedSortTieResolution,
    ) -> Self {
        self.engine_options.speed_sort_tie_resolution = tie_resolution;
        self
    }
}

impl Default for TestBattleBuilder {
    fn default() -> Self {
        Self::new()
    }
}
