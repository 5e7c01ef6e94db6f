use anyhow::Result;
use hashbrown::HashMap;
use scuffle_data::{
    AbilityData,
    DataStore,
    Id,
    ItemData,
    LocalDataStore,
    MoveData,
    SpeciesData,
    TypeChart,
};

/// Wrapper around a [`LocalDataStore`] for testing.
///
/// Loads the fixture data shipped with this crate. Fake moves can be inserted exclusively for
/// one test, which keeps tests that focus on the engine independent of real move data.
pub struct TestDataStore {
    local: LocalDataStore,
    fake_moves: HashMap<Id, MoveData>,
}

impl TestDataStore {
    /// The directory holding the fixture data.
    pub const DATA_DIR: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/data");

    pub fn new() -> Result<Self> {
        Self::from_dir(Self::DATA_DIR)
    }

    pub fn from_dir(dir: &str) -> Result<Self> {
        Ok(Self {
            local: LocalDataStore::from_dir(dir)?,
            fake_moves: HashMap::new(),
        })
    }

    pub fn add_fake_move(&mut self, id: Id, move_data: MoveData) {
        self.fake_moves.insert(id, move_data);
    }
}

impl DataStore for TestDataStore {
    fn get_type_chart(&self) -> Result<TypeChart> {
        self.local.get_type_chart()
    }

    fn get_ability(&self, id: &Id) -> Result<Option<AbilityData>> {
        self.local.get_ability(id)
    }

    fn get_item(&self, id: &Id) -> Result<Option<ItemData>> {
        self.local.get_item(id)
    }

    fn get_move(&self, id: &Id) -> Result<Option<MoveData>> {
        match self.fake_moves.get(id) {
            Some(mov) => Ok(Some(mov.clone())),
            None => self.local.get_move(id),
        }
    }

    fn get_species(&self, id: &Id) -> Result<Option<SpeciesData>> {
        self.local.get_species(id)
    }
}
