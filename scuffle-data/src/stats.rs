use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::Fraction;

/// A permanent stat.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Stat {
    #[string = "hp"]
    HP,
    #[string = "atk"]
    #[alias = "Attack"]
    Atk,
    #[string = "def"]
    #[alias = "Defense"]
    Def,
    #[string = "spa"]
    #[alias = "Special Attack"]
    SpAtk,
    #[string = "spd"]
    #[alias = "Special Defense"]
    SpDef,
    #[string = "spe"]
    #[alias = "Speed"]
    Spe,
}

impl Stat {
    /// All stats, in table order.
    pub const ALL: [Stat; 6] = [
        Stat::HP,
        Stat::Atk,
        Stat::Def,
        Stat::SpAtk,
        Stat::SpDef,
        Stat::Spe,
    ];
}

/// A value for every stat.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatTable {
    #[serde(default)]
    pub hp: u16,
    #[serde(default)]
    pub atk: u16,
    #[serde(default)]
    pub def: u16,
    #[serde(default)]
    pub spa: u16,
    #[serde(default)]
    pub spd: u16,
    #[serde(default)]
    pub spe: u16,
}

impl StatTable {
    /// A table with the same value for every stat.
    pub fn uniform(value: u16) -> Self {
        Self {
            hp: value,
            atk: value,
            def: value,
            spa: value,
            spd: value,
            spe: value,
        }
    }

    pub fn get(&self, stat: Stat) -> u16 {
        match stat {
            Stat::HP => self.hp,
            Stat::Atk => self.atk,
            Stat::Def => self.def,
            Stat::SpAtk => self.spa,
            Stat::SpDef => self.spd,
            Stat::Spe => self.spe,
        }
    }

    pub fn set(&mut self, stat: Stat, value: u16) {
        match stat {
            Stat::HP => self.hp = value,
            Stat::Atk => self.atk = value,
            Stat::Def => self.def = value,
            Stat::SpAtk => self.spa = value,
            Stat::SpDef => self.spd = value,
            Stat::Spe => self.spe = value,
        }
    }
}

/// A battle-only stat stage.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Boost {
    #[string = "atk"]
    #[alias = "Attack"]
    Atk,
    #[string = "def"]
    #[alias = "Defense"]
    Def,
    #[string = "spa"]
    #[alias = "Special Attack"]
    SpAtk,
    #[string = "spd"]
    #[alias = "Special Defense"]
    SpDef,
    #[string = "spe"]
    #[alias = "Speed"]
    Spe,
    #[string = "acc"]
    #[alias = "Accuracy"]
    Accuracy,
    #[string = "eva"]
    #[alias = "Evasion"]
    Evasion,
}

impl Boost {
    /// All boosts, in table order.
    pub const ALL: [Boost; 7] = [
        Boost::Atk,
        Boost::Def,
        Boost::SpAtk,
        Boost::SpDef,
        Boost::Spe,
        Boost::Accuracy,
        Boost::Evasion,
    ];

    /// The permanent stat the boost applies to, if any.
    pub fn stat(&self) -> Option<Stat> {
        match self {
            Self::Atk => Some(Stat::Atk),
            Self::Def => Some(Stat::Def),
            Self::SpAtk => Some(Stat::SpAtk),
            Self::SpDef => Some(Stat::SpDef),
            Self::Spe => Some(Stat::Spe),
            Self::Accuracy | Self::Evasion => None,
        }
    }

    /// The multiplier for a stat at the given stage.
    pub fn stat_multiplier(stage: i8) -> Fraction {
        let stage = stage.clamp(BoostTable::MIN, BoostTable::MAX) as i64;
        if stage >= 0 {
            Fraction::new((2 + stage) as u64, 2)
        } else {
            Fraction::new(2, (2 - stage) as u64)
        }
    }

    /// The multiplier for accuracy at the given combined accuracy and evasion stage.
    pub fn accuracy_multiplier(stage: i8) -> Fraction {
        let stage = stage.clamp(BoostTable::MIN, BoostTable::MAX) as i64;
        if stage >= 0 {
            Fraction::new((3 + stage) as u64, 3)
        } else {
            Fraction::new(3, (3 - stage) as u64)
        }
    }
}

/// Stat stages for every boost, each in `[-6, 6]`.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BoostTable {
    #[serde(default)]
    pub atk: i8,
    #[serde(default)]
    pub def: i8,
    #[serde(default)]
    pub spa: i8,
    #[serde(default)]
    pub spd: i8,
    #[serde(default)]
    pub spe: i8,
    #[serde(default)]
    pub acc: i8,
    #[serde(default)]
    pub eva: i8,
}

impl BoostTable {
    pub const MIN: i8 = -6;
    pub const MAX: i8 = 6;

    pub fn get(&self, boost: Boost) -> i8 {
        match boost {
            Boost::Atk => self.atk,
            Boost::Def => self.def,
            Boost::SpAtk => self.spa,
            Boost::SpDef => self.spd,
            Boost::Spe => self.spe,
            Boost::Accuracy => self.acc,
            Boost::Evasion => self.eva,
        }
    }

    fn get_mut(&mut self, boost: Boost) -> &mut i8 {
        match boost {
            Boost::Atk => &mut self.atk,
            Boost::Def => &mut self.def,
            Boost::SpAtk => &mut self.spa,
            Boost::SpDef => &mut self.spd,
            Boost::Spe => &mut self.spe,
            Boost::Accuracy => &mut self.acc,
            Boost::Evasion => &mut self.eva,
        }
    }

    /// Adds to a stage, clamping to the allowed range.
    ///
    /// Returns the change that was actually applied.
    pub fn add(&mut self, boost: Boost, delta: i8) -> i8 {
        let value = self.get_mut(boost);
        let before = *value;
        *value = before
            .saturating_add(delta)
            .clamp(Self::MIN, Self::MAX);
        *value - before
    }

    /// Iterates over all non-zero stages.
    pub fn non_zero(&self) -> impl Iterator<Item = (Boost, i8)> + '_ {
        Boost::ALL
            .into_iter()
            .map(|boost| (boost, self.get(boost)))
            .filter(|(_, value)| *value != 0)
    }
}

/// A nature, which raises one stat by 10% and lowers another by 10%.
///
/// Natures are laid out on a five-by-five grid: the row is the raised stat and the column is
/// the lowered stat. Natures on the diagonal are neutral.
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
pub enum Nature {
    #[string = "Hardy"]
    #[default]
    Hardy,
    #[string = "Lonely"]
    Lonely,
    #[string = "Brave"]
    Brave,
    #[string = "Adamant"]
    Adamant,
    #[string = "Naughty"]
    Naughty,
    #[string = "Bold"]
    Bold,
    #[string = "Docile"]
    Docile,
    #[string = "Relaxed"]
    Relaxed,
    #[string = "Impish"]
    Impish,
    #[string = "Lax"]
    Lax,
    #[string = "Timid"]
    Timid,
    #[string = "Hasty"]
    Hasty,
    #[string = "Serious"]
    Serious,
    #[string = "Jolly"]
    Jolly,
    #[string = "Naive"]
    Naive,
    #[string = "Modest"]
    Modest,
    #[string = "Mild"]
    Mild,
    #[string = "Quiet"]
    Quiet,
    #[string = "Bashful"]
    Bashful,
    #[string = "Rash"]
    Rash,
    #[string = "Calm"]
    Calm,
    #[string = "Gentle"]
    Gentle,
    #[string = "Sassy"]
    Sassy,
    #[string = "Careful"]
    Careful,
    #[string = "Quirky"]
    Quirky,
}

impl Nature {
    const GRID: [Stat; 5] = [Stat::Atk, Stat::Def, Stat::Spe, Stat::SpAtk, Stat::SpDef];

    /// The stat raised by the nature.
    pub fn raises(&self) -> Stat {
        Self::GRID[*self as usize / 5]
    }

    /// The stat lowered by the nature.
    pub fn lowers(&self) -> Stat {
        Self::GRID[*self as usize % 5]
    }

    /// The multiplier applied to the given stat.
    pub fn multiplier(&self, stat: Stat) -> Fraction {
        let (raises, lowers) = (self.raises(), self.lowers());
        if raises == lowers {
            Fraction::ONE
        } else if stat == raises {
            Fraction::new(11, 10)
        } else if stat == lowers {
            Fraction::new(9, 10)
        } else {
            Fraction::ONE
        }
    }
}
