use std::fmt;

use hashbrown::HashMap;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de::{
        self,
        Visitor,
    },
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

/// The elemental type of a species or move.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum Type {
    #[string = "Normal"]
    #[default]
    Normal,
    #[string = "Fighting"]
    Fighting,
    #[string = "Flying"]
    Flying,
    #[string = "Poison"]
    Poison,
    #[string = "Ground"]
    Ground,
    #[string = "Rock"]
    Rock,
    #[string = "Bug"]
    Bug,
    #[string = "Ghost"]
    Ghost,
    #[string = "Steel"]
    Steel,
    #[string = "Fire"]
    Fire,
    #[string = "Water"]
    Water,
    #[string = "Grass"]
    Grass,
    #[string = "Electric"]
    Electric,
    #[string = "Psychic"]
    Psychic,
    #[string = "Ice"]
    Ice,
    #[string = "Dragon"]
    Dragon,
    #[string = "Dark"]
    Dark,
    #[string = "Fairy"]
    Fairy,
    /// Typeless damage, which is never effective or resisted.
    #[string = "None"]
    #[alias = "???"]
    None,
}

/// Effectiveness of one attacking type against one defending type.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum TypeEffectiveness {
    /// No effect.
    None,
    /// Not very effective.
    Weak,
    /// Normal effectiveness.
    #[default]
    Normal,
    /// Super effective.
    Strong,
}

impl TypeEffectiveness {
    /// The effectiveness as a power-of-two exponent. [`TypeEffectiveness::None`] has no exponent.
    pub fn modifier(&self) -> Option<i8> {
        match self {
            Self::None => None,
            Self::Weak => Some(-1),
            Self::Normal => Some(0),
            Self::Strong => Some(1),
        }
    }

    fn from_multiplier(value: f64) -> Self {
        if value <= 0f64 {
            Self::None
        } else if value < 1f64 {
            Self::Weak
        } else if value > 1f64 {
            Self::Strong
        } else {
            Self::Normal
        }
    }
}

impl Serialize for TypeEffectiveness {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::None => serializer.serialize_u64(0),
            Self::Weak => serializer.serialize_f64(0.5),
            Self::Normal => serializer.serialize_u64(1),
            Self::Strong => serializer.serialize_u64(2),
        }
    }
}

struct TypeEffectivenessVisitor;

impl<'de> Visitor<'de> for TypeEffectivenessVisitor {
    type Value = TypeEffectiveness;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        formatter.write_str("one of the following values: 0, 0.5, 1, 2")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TypeEffectiveness::from_multiplier(v as f64))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TypeEffectiveness::from_multiplier(v as f64))
    }

    fn visit_f64<E>(self, v: f64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        Ok(TypeEffectiveness::from_multiplier(v))
    }
}

impl<'de> Deserialize<'de> for TypeEffectiveness {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(TypeEffectivenessVisitor)
    }
}

/// Type effectiveness of every attacking type against every defending type.
///
/// Missing entries are [`TypeEffectiveness::Normal`].
#[derive(Debug, Default, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeChart {
    types: HashMap<Type, HashMap<Type, TypeEffectiveness>>,
}

impl TypeChart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Effectiveness of a single attacking type against a single defending type.
    pub fn effectiveness(&self, attacking: Type, defending: Type) -> TypeEffectiveness {
        self.types
            .get(&attacking)
            .and_then(|row| row.get(&defending))
            .copied()
            .unwrap_or_default()
    }

    /// Checks if the attacking type has no effect on any of the defending types.
    pub fn immune(&self, attacking: Type, defending: &[Type]) -> bool {
        defending
            .iter()
            .any(|defending| self.effectiveness(attacking, *defending) == TypeEffectiveness::None)
    }

    /// The summed effectiveness exponent against all defending types, ignoring immunities.
    ///
    /// A value of 2 means four times as effective.
    pub fn modifier(&self, attacking: Type, defending: &[Type]) -> i8 {
        defending
            .iter()
            .filter_map(|defending| self.effectiveness(attacking, *defending).modifier())
            .sum()
    }
}
