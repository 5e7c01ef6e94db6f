use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::{
    Id,
    Type,
};

/// A non-volatile status condition.
///
/// A battler has at most one at a time, and it persists through switching.
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
pub enum Status {
    #[string = "brn"]
    #[alias = "Burn"]
    Burn,
    #[string = "frz"]
    #[alias = "Freeze"]
    Freeze,
    #[string = "par"]
    #[alias = "Paralysis"]
    Paralysis,
    #[string = "psn"]
    #[alias = "Poison"]
    Poison,
    #[string = "tox"]
    #[alias = "Bad Poison"]
    BadPoison,
    #[string = "slp"]
    #[alias = "Sleep"]
    Sleep,
}

impl Status {
    /// The identifier of the effect that implements the status.
    pub fn id(&self) -> Id {
        Id::from(self.code())
    }

    /// The short code used in event logs.
    pub fn code(&self) -> &'static str {
        match self {
            Self::Burn => "brn",
            Self::Freeze => "frz",
            Self::Paralysis => "par",
            Self::Poison => "psn",
            Self::BadPoison => "tox",
            Self::Sleep => "slp",
        }
    }

    /// Types that can never receive the status.
    pub fn immune_types(&self) -> &'static [Type] {
        match self {
            Self::Burn => &[Type::Fire],
            Self::Freeze => &[Type::Ice],
            Self::Paralysis => &[Type::Electric],
            Self::Poison | Self::BadPoison => &[Type::Poison, Type::Steel],
            Self::Sleep => &[],
        }
    }

    /// Looks up a status by its effect identifier.
    pub fn from_id(id: &Id) -> Option<Self> {
        [
            Self::Burn,
            Self::Freeze,
            Self::Paralysis,
            Self::Poison,
            Self::BadPoison,
            Self::Sleep,
        ]
        .into_iter()
        .find(|status| status.code() == id.as_str())
    }
}
