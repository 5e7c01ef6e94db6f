use anyhow::Result;
use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::{
    config::TeamData,
    error::general_error,
};

/// The shape of a battle.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum BattleType {
    /// One active battler per side.
    #[string = "Singles"]
    #[default]
    Singles,
    /// Two active battlers per side.
    #[string = "Doubles"]
    Doubles,
}

impl BattleType {
    pub fn active_per_side(&self) -> usize {
        match self {
            Self::Singles => 1,
            Self::Doubles => 2,
        }
    }
}

/// A player controlling one side.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlayerData {
    /// Unique identifier used when submitting choices.
    pub id: String,
    /// Display name.
    pub name: String,
    pub team: TeamData,
}

/// One side of the battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SideData {
    pub name: String,
    pub player: PlayerData,
}

/// Options for a single battle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BattleOptions {
    /// Seed for the battle's random number generator. A fresh seed is generated if unset.
    #[serde(default)]
    pub seed: Option<u64>,
    #[serde(default)]
    pub battle_type: BattleType,
    pub side_1: SideData,
    pub side_2: SideData,
}

impl BattleOptions {
    /// Checks that the options describe a battle that can be started.
    pub fn validate(&self) -> Result<()> {
        if self.side_1.player.id == self.side_2.player.id {
            return Err(general_error(format!(
                "players must have unique ids, but both sides use {}",
                self.side_1.player.id
            )));
        }
        for side in [&self.side_1, &self.side_2] {
            if side.player.team.members.is_empty() {
                return Err(general_error(format!(
                    "player {} has an empty team",
                    side.player.id
                )));
            }
            for mon in &side.player.team.members {
                if mon.moves.is_empty() {
                    return Err(general_error(format!("{} has no moves", mon.name)));
                }
                if !(1..=100).contains(&mon.level) {
                    return Err(general_error(format!(
                        "{} has invalid level {}",
                        mon.name, mon.level
                    )));
                }
            }
        }
        Ok(())
    }
}
