use scuffle_data::{
    Nature,
    StatTable,
};
use serde::{
    Deserialize,
    Serialize,
};

fn default_level() -> u8 {
    100
}

/// A single team member, as submitted by a player.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonData {
    pub name: String,
    pub species: String,
    /// Ability name. Falls back to the species default ability.
    #[serde(default)]
    pub ability: Option<String>,
    #[serde(default)]
    pub item: Option<String>,
    pub moves: Vec<String>,
    #[serde(default = "default_level")]
    pub level: u8,
    #[serde(default)]
    pub nature: Nature,
    #[serde(default)]
    pub ivs: StatTable,
    #[serde(default)]
    pub evs: StatTable,
}

/// A full team.
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
pub struct TeamData {
    pub members: Vec<MonData>,
}

#[cfg(test)]
mod team_test {
    use pretty_assertions::assert_eq;
    use scuffle_data::Nature;

    use crate::config::TeamData;

    #[test]
    fn deserializes_team_with_defaults() {
        let team: TeamData = serde_json::from_str(
            r#"{
                "members": [
                    {
                        "name": "Sparky",
                        "species": "Pikachu",
                        "ability": "Static",
                        "moves": ["Thunderbolt"],
                        "nature": "Timid"
                    }
                ]
            }"#,
        )
        .unwrap();
        let mon = &team.members[0];
        assert_eq!(mon.level, 100);
        assert_eq!(mon.nature, Nature::Timid);
        assert_eq!(mon.item, None);
        assert_eq!(mon.ivs.atk, 0);
    }
}
