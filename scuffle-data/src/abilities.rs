use hashbrown::HashSet;
use serde::{
    Deserialize,
    Serialize,
};
use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

use crate::{
    Id,
    Identifiable,
};

/// A property of an ability that the engine itself enforces.
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
pub enum AbilityFlag {
    /// The ability cannot be overwritten by another ability.
    #[string = "NoReplace"]
    NoReplace,
    /// The ability cannot be suppressed.
    #[string = "NoSuppress"]
    NoSuppress,
}

/// Static metadata for an ability.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AbilityData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub flags: HashSet<AbilityFlag>,
}

impl AbilityData {
    /// Placeholder data for an ability with no entry in the data store.
    pub fn unknown(id: &Id) -> Self {
        Self {
            name: id.to_string(),
            description: String::new(),
            flags: HashSet::new(),
        }
    }

    pub fn has_flag(&self, flag: AbilityFlag) -> bool {
        self.flags.contains(&flag)
    }
}

impl Identifiable for AbilityData {
    fn id(&self) -> Id {
        Id::from(self.name.as_str())
    }
}
