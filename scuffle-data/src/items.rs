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

/// A property of an item.
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
pub enum ItemFlag {
    /// The item is used up when it activates.
    #[string = "Consumable"]
    Consumable,
    /// Locks the holder into its first move.
    #[string = "Choice"]
    Choice,
}

/// Static metadata for a held item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ItemData {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub flags: HashSet<ItemFlag>,
}

impl ItemData {
    pub fn has_flag(&self, flag: ItemFlag) -> bool {
        self.flags.contains(&flag)
    }
}

impl Identifiable for ItemData {
    fn id(&self) -> Id {
        Id::from(self.name.as_str())
    }
}
