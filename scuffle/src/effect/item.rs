use std::{
    fmt,
    fmt::Debug,
    rc::Rc,
};

use scuffle_data::{
    Id,
    ItemData,
};

use crate::effect::{
    EffectState,
    Hooks,
};

/// Behavior of a held item.
pub trait ItemBehavior: Hooks {
    /// Locks the holder into the first move it uses after switching in.
    fn locks_move(&self) -> bool {
        false
    }
}

/// The item used when no behavior is registered. Does nothing.
pub struct InertItem;

impl Hooks for InertItem {}

impl ItemBehavior for InertItem {}

/// The item a battler is holding.
#[derive(Clone)]
pub struct HeldItem {
    pub id: Id,
    pub data: ItemData,
    pub behavior: Rc<dyn ItemBehavior>,
    pub state: EffectState,
}

impl HeldItem {
    pub fn new(id: Id, data: ItemData, behavior: Rc<dyn ItemBehavior>) -> Self {
        Self {
            id,
            data,
            behavior,
            state: EffectState::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.data.name
    }
}

impl Debug for HeldItem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("HeldItem")
            .field("id", &self.id)
            .field("state", &self.state)
            .finish()
    }
}
