mod data_store;
mod log_assert;
mod rng;
mod test_battle_builder;

pub use data_store::TestDataStore;
pub use log_assert::{
    assert_logs_contain,
    assert_new_logs_eq,
};
pub use rng::{
    ControlledRandomNumberGenerator,
    get_controlled_rng_for_battle,
};
pub use test_battle_builder::TestBattleBuilder;
