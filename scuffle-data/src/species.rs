use serde::{
    Deserialize,
    Serialize,
};

use crate::{
    Id,
    Identifiable,
    StatTable,
    Type,
};

/// Static metadata for a species.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SpeciesData {
    pub name: String,
    pub primary_type: Type,
    #[serde(default)]
    pub secondary_type: Option<Type>,
    pub base_stats: StatTable,
    /// Ability used when a team does not pick one.
    #[serde(default)]
    pub default_ability: Option<String>,
}

impl SpeciesData {
    pub fn types(&self) -> Vec<Type> {
        let mut types = vec![self.primary_type];
        types.extend(self.secondary_type);
        types
    }
}

impl Identifiable for SpeciesData {
    fn id(&self) -> Id {
        Id::from(self.name.as_str())
    }
}
