use std::fmt;

use hashbrown::HashSet;
use serde::{
    Deserialize,
    Deserializer,
    Serialize,
    Serializer,
    de::{
        self,
        Unexpected,
        Visitor,
    },
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::{
    BoostTable,
    Fraction,
    Id,
    Identifiable,
    Status,
    Type,
};

/// The damage category of a move.
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
pub enum MoveCategory {
    #[string = "Physical"]
    Physical,
    #[string = "Special"]
    Special,
    #[string = "Status"]
    Status,
}

/// The base accuracy of a move.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Accuracy {
    /// Percent chance to hit before stages and modifiers.
    Chance(u8),
    /// The move skips the accuracy check entirely.
    Exempt,
}

impl Default for Accuracy {
    fn default() -> Self {
        Self::Chance(100)
    }
}

impl Serialize for Accuracy {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Chance(n) => serializer.serialize_u8(*n),
            Self::Exempt => serializer.serialize_str("exempt"),
        }
    }
}

struct AccuracyVisitor;

impl<'de> Visitor<'de> for AccuracyVisitor {
    type Value = Accuracy;

    fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
        write!(formatter, "an integer percentage or \"exempt\"")
    }

    fn visit_u64<E>(self, v: u64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u8::try_from(v)
            .map(Accuracy::Chance)
            .map_err(|_| E::invalid_value(Unexpected::Unsigned(v), &self))
    }

    fn visit_i64<E>(self, v: i64) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        u8::try_from(v)
            .map(Accuracy::Chance)
            .map_err(|_| E::invalid_value(Unexpected::Signed(v), &self))
    }

    fn visit_bool<E>(self, v: bool) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        if v {
            Ok(Accuracy::Exempt)
        } else {
            Err(E::invalid_value(Unexpected::Bool(v), &self))
        }
    }

    fn visit_str<E>(self, v: &str) -> Result<Self::Value, E>
    where
        E: de::Error,
    {
        match v {
            "exempt" => Ok(Accuracy::Exempt),
            _ => Err(E::invalid_value(Unexpected::Str(v), &self)),
        }
    }
}

impl<'de> Deserialize<'de> for Accuracy {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        deserializer.deserialize_any(AccuracyVisitor)
    }
}

/// Which battlers or places a move can affect.
#[derive(
    Debug,
    Default,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    SerializeLabeledStringEnum,
    DeserializeLabeledStringEnum,
)]
pub enum MoveTarget {
    /// One adjacent battler, chosen by the user.
    #[string = "Normal"]
    #[default]
    Normal,
    /// The user only.
    #[string = "User"]
    User,
    /// Every adjacent foe.
    #[string = "AllAdjacentFoes"]
    AllAdjacentFoes,
    /// Every adjacent battler, allies included.
    #[string = "AllAdjacent"]
    AllAdjacent,
    /// The user's side of the field.
    #[string = "AllySide"]
    AllySide,
    /// The opposing side of the field.
    #[string = "FoeSide"]
    FoeSide,
    /// The whole field.
    #[string = "Field"]
    Field,
}

impl MoveTarget {
    /// Checks if the user picks a specific target.
    pub fn choosable(&self) -> bool {
        matches!(self, Self::Normal)
    }

    /// Checks if the move affects a side or the field rather than individual battlers.
    pub fn affects_place(&self) -> bool {
        matches!(self, Self::AllySide | Self::FoeSide | Self::Field)
    }

    /// Checks if the move can hit more than one battler.
    pub fn is_spread(&self) -> bool {
        matches!(self, Self::AllAdjacentFoes | Self::AllAdjacent)
    }
}

/// A property of a move that other effects may react to.
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
pub enum MoveFlag {
    /// Makes contact with the target.
    #[string = "Contact"]
    Contact,
    /// Blocked by protection effects.
    #[string = "Protect"]
    Protect,
    #[string = "Sound"]
    Sound,
    #[string = "Punch"]
    Punch,
    /// Knocks out the target in one hit.
    #[string = "OneHitKnockOut"]
    #[alias = "OHKO"]
    OneHitKnockOut,
    /// Spends a turn charging before hitting.
    #[string = "Charge"]
    Charge,
}

/// How many times a move strikes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MultihitType {
    Static(u8),
    Range(u8, u8),
}

impl Serialize for MultihitType {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            Self::Static(n) => serializer.serialize_u8(*n),
            Self::Range(min, max) => [*min, *max].serialize(serializer),
        }
    }
}

impl<'de> Deserialize<'de> for MultihitType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Static(u8),
            Range([u8; 2]),
        }
        match Repr::deserialize(deserializer)? {
            Repr::Static(n) => Ok(Self::Static(n)),
            Repr::Range([min, max]) if min <= max => Ok(Self::Range(min, max)),
            Repr::Range([min, max]) => Err(de::Error::custom(format!(
                "invalid multihit range [{min}, {max}]"
            ))),
        }
    }
}

/// A data-driven payload applied to a battler.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HitEffect {
    /// Status to inflict.
    #[serde(default)]
    pub status: Option<Status>,
    /// Stat stage changes to apply.
    #[serde(default)]
    pub boosts: Option<BoostTable>,
    /// Battler-tied effect to add.
    #[serde(default)]
    pub volatile: Option<Id>,
}

impl HitEffect {
    pub fn is_empty(&self) -> bool {
        self.status.is_none() && self.boosts.is_none() && self.volatile.is_none()
    }
}

/// A payload that applies with some percent chance after a damaging hit.
#[derive(Debug, Default, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SecondaryEffect {
    pub chance: u8,
    /// Applied to the target.
    #[serde(default)]
    pub target: HitEffect,
    /// Applied to the user.
    #[serde(default)]
    pub user: HitEffect,
}

fn default_pp() -> u8 {
    10
}

/// Static metadata for a move.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MoveData {
    pub name: String,
    pub category: MoveCategory,
    #[serde(rename = "type")]
    pub primary_type: Type,
    #[serde(default)]
    pub base_power: u32,
    #[serde(default)]
    pub accuracy: Accuracy,
    #[serde(default = "default_pp")]
    pub pp: u8,
    #[serde(default)]
    pub priority: i8,
    #[serde(default)]
    pub target: MoveTarget,
    #[serde(default)]
    pub flags: HashSet<MoveFlag>,
    /// Critical hit stage the move starts at.
    #[serde(default)]
    pub crit_ratio: u8,
    #[serde(default)]
    pub multihit: Option<MultihitType>,
    /// Fraction of damage dealt that the user takes back.
    #[serde(default)]
    pub recoil: Option<Fraction>,
    /// Fraction of damage dealt that the user recovers.
    #[serde(default)]
    pub drain: Option<Fraction>,
    /// Payload applied to each target that was hit.
    #[serde(default)]
    pub hit_effect: HitEffect,
    /// Payload applied to the user after the move hits.
    #[serde(default)]
    pub user_effect: HitEffect,
    #[serde(default)]
    pub secondary: Option<SecondaryEffect>,
}

impl MoveData {
    pub fn has_flag(&self, flag: MoveFlag) -> bool {
        self.flags.contains(&flag)
    }

    pub fn is_damaging(&self) -> bool {
        self.category != MoveCategory::Status
    }
}

impl Identifiable for MoveData {
    fn id(&self) -> Id {
        Id::from(self.name.as_str())
    }
}

#[cfg(test)]
mod moves_test {
    use assert_matches::assert_matches;

    use crate::{
        Accuracy,
        MoveCategory,
        MoveData,
        MoveFlag,
        MoveTarget,
        MultihitType,
        Status,
        Type,
    };

    #[test]
    fn deserializes_move_with_defaults() {
        let data: MoveData = serde_json::from_str(
            r#"{
                "name": "Thunderbolt",
                "category": "Special",
                "type": "Electric",
                "base_power": 90,
                "pp": 15,
                "secondary": { "chance": 10, "target": { "status": "par" } }
            }"#,
        )
        .unwrap();
        assert_eq!(data.category, MoveCategory::Special);
        assert_eq!(data.primary_type, Type::Electric);
        assert_eq!(data.accuracy, Accuracy::Chance(100));
        assert_eq!(data.target, MoveTarget::Normal);
        assert_eq!(data.priority, 0);
        assert_matches!(data.secondary, Some(secondary) => {
            assert_eq!(secondary.chance, 10);
            assert_eq!(secondary.target.status, Some(Status::Paralysis));
        });
    }

    #[test]
    fn deserializes_exempt_accuracy_and_multihit() {
        let data: MoveData = serde_json::from_str(
            r#"{
                "name": "Double Kick",
                "category": "Physical",
                "type": "Fighting",
                "base_power": 30,
                "accuracy": "exempt",
                "flags": ["Contact", "Protect"],
                "multihit": [2, 5]
            }"#,
        )
        .unwrap();
        assert_eq!(data.accuracy, Accuracy::Exempt);
        assert_eq!(data.multihit, Some(MultihitType::Range(2, 5)));
        assert!(data.has_flag(MoveFlag::Contact));
        assert!(!data.has_flag(MoveFlag::Sound));
    }
}
