use std::{
    fs,
    path::Path,
};

use anyhow::{
    Context,
    Result,
};
use hashbrown::HashMap;
use serde::de::DeserializeOwned;
use thiserror::Error;

use crate::{
    AbilityData,
    Id,
    ItemData,
    MoveData,
    SpeciesData,
    TypeChart,
};

/// Error for a resource that does not exist in a [`DataStore`].
#[derive(Debug, Error)]
#[error("{kind} not found: {id}")]
pub struct NotFoundError {
    pub kind: &'static str,
    pub id: Id,
}

impl NotFoundError {
    pub fn new(kind: &'static str, id: Id) -> Self {
        Self { kind, id }
    }
}

/// Read-only lookup of static battle data.
///
/// Implementations may read from disk, memory, or an external service. Lookups return
/// `Ok(None)` for resources that do not exist and `Err` only when the store itself fails.
pub trait DataStore {
    fn get_type_chart(&self) -> Result<TypeChart>;
    fn get_ability(&self, id: &Id) -> Result<Option<AbilityData>>;
    fn get_item(&self, id: &Id) -> Result<Option<ItemData>>;
    fn get_move(&self, id: &Id) -> Result<Option<MoveData>>;
    fn get_species(&self, id: &Id) -> Result<Option<SpeciesData>>;
}

/// A [`DataStore`] held fully in memory, loaded from JSON.
///
/// A data directory contains one JSON object per resource kind, keyed by resource name:
///
/// - `type-chart.json`
/// - `abilities.json`
/// - `items.json`
/// - `moves.json`
/// - `species.json`
#[derive(Debug, Default, Clone)]
pub struct LocalDataStore {
    pub type_chart: TypeChart,
    pub abilities: HashMap<Id, AbilityData>,
    pub items: HashMap<Id, ItemData>,
    pub moves: HashMap<Id, MoveData>,
    pub species: HashMap<Id, SpeciesData>,
}

impl LocalDataStore {
    pub const TYPE_CHART_FILE: &str = "type-chart.json";
    pub const ABILITIES_FILE: &str = "abilities.json";
    pub const ITEMS_FILE: &str = "items.json";
    pub const MOVES_FILE: &str = "moves.json";
    pub const SPECIES_FILE: &str = "species.json";

    /// Reads all data files from the given directory.
    pub fn from_dir<P: AsRef<Path>>(root: P) -> Result<Self> {
        let root = root.as_ref();
        if !root.is_dir() {
            anyhow::bail!("data directory {} does not exist", root.display());
        }
        let read = |file: &str| {
            let path = root.join(file);
            fs::read_to_string(&path).with_context(|| format!("failed to read {}", path.display()))
        };
        Self::from_json(
            &read(Self::TYPE_CHART_FILE)?,
            &read(Self::ABILITIES_FILE)?,
            &read(Self::ITEMS_FILE)?,
            &read(Self::MOVES_FILE)?,
            &read(Self::SPECIES_FILE)?,
        )
    }

    /// Parses all data from JSON strings.
    pub fn from_json(
        type_chart: &str,
        abilities: &str,
        items: &str,
        moves: &str,
        species: &str,
    ) -> Result<Self> {
        Ok(Self {
            type_chart: serde_json::from_str(type_chart).context("failed to parse type chart")?,
            abilities: Self::parse_table(abilities, "abilities")?,
            items: Self::parse_table(items, "items")?,
            moves: Self::parse_table(moves, "moves")?,
            species: Self::parse_table(species, "species")?,
        })
    }

    fn parse_table<T: DeserializeOwned>(json: &str, kind: &str) -> Result<HashMap<Id, T>> {
        let table: HashMap<String, T> =
            serde_json::from_str(json).with_context(|| format!("failed to parse {kind}"))?;
        Ok(table
            .into_iter()
            .map(|(name, value)| (Id::from(name), value))
            .collect())
    }
}

impl DataStore for LocalDataStore {
    fn get_type_chart(&self) -> Result<TypeChart> {
        Ok(self.type_chart.clone())
    }

    fn get_ability(&self, id: &Id) -> Result<Option<AbilityData>> {
        Ok(self.abilities.get(id).cloned())
    }

    fn get_item(&self, id: &Id) -> Result<Option<ItemData>> {
        Ok(self.items.get(id).cloned())
    }

    fn get_move(&self, id: &Id) -> Result<Option<MoveData>> {
        Ok(self.moves.get(id).cloned())
    }

    fn get_species(&self, id: &Id) -> Result<Option<SpeciesData>> {
        Ok(self.species.get(id).cloned())
    }
}

#[cfg(test)]
mod datastore_test {
    use assert_matches::assert_matches;

    use crate::{
        DataStore,
        Id,
        LocalDataStore,
        Type,
    };

    #[test]
    fn looks_up_by_normalized_id() {
        let store = LocalDataStore::from_json(
            r#"{ "Water": { "Fire": 2 } }"#,
            r#"{ "Clear Body": { "name": "Clear Body" } }"#,
            r#"{}"#,
            r#"{ "Water Gun": { "name": "Water Gun", "category": "Special", "type": "Water", "base_power": 40 } }"#,
            r#"{ "Squirtle": { "name": "Squirtle", "primary_type": "Water", "base_stats": { "hp": 44, "atk": 48, "def": 65, "spa": 50, "spd": 64, "spe": 43 } } }"#,
        )
        .unwrap();
        assert_matches!(store.get_ability(&Id::from("clearbody")), Ok(Some(ability)) => {
            assert_eq!(ability.name, "Clear Body");
        });
        assert_matches!(store.get_move(&Id::from("watergun")), Ok(Some(data)) => {
            assert_eq!(data.base_power, 40);
        });
        assert_matches!(store.get_species(&Id::from("SQUIRTLE")), Ok(Some(species)) => {
            assert_eq!(species.types(), vec![Type::Water]);
        });
        assert_matches!(store.get_item(&Id::from("leftovers")), Ok(None));
    }

    #[test]
    fn fails_for_missing_directory() {
        assert!(LocalDataStore::from_dir("/definitely/not/a/real/data/dir").is_err());
    }
}
