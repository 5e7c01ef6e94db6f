use std::{
    fmt,
    fmt::Debug,
    rc::Rc,
};

use scuffle_data::{
    Id,
    MoveData,
};

use crate::{
    battle::MonHandle,
    effect::EffectState,
    moves::MoveBehavior,
    registry::Registries,
};

/// A move in one of a battler's move slots.
#[derive(Clone)]
pub struct MoveInstance {
    pub id: Id,
    pub data: Rc<MoveData>,
    pub pp: u8,
    pub max_pp: u8,
    pub behavior: Rc<dyn MoveBehavior>,
}

impl MoveInstance {
    /// Creates the move, resolving its behavior through the registry.
    pub fn new(id: Id, data: MoveData, registries: &Registries) -> Self {
        let behavior = registries.moves.create(&id, &data);
        Self {
            id,
            pp: data.pp,
            max_pp: data.pp,
            data: Rc::new(data),
            behavior,
        }
    }
}

impl Debug for MoveInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MoveInstance")
            .field("id", &self.id)
            .field("pp", &self.pp)
            .field("max_pp", &self.max_pp)
            .finish()
    }
}

/// A move in the middle of being used.
#[derive(Clone)]
pub struct ActiveMove {
    pub id: Id,
    pub data: Rc<MoveData>,
    pub behavior: Rc<dyn MoveBehavior>,
    pub user: MonHandle,
    /// State for the duration of this use only.
    pub state: EffectState,
    /// Forced moves, such as the second turn of a charging move, spend no PP.
    pub forced: bool,
}

impl ActiveMove {
    pub fn new(instance: &MoveInstance, user: MonHandle, forced: bool) -> Self {
        Self {
            id: instance.id.clone(),
            data: instance.data.clone(),
            behavior: instance.behavior.clone(),
            user,
            state: EffectState::default(),
            forced,
        }
    }
}

impl Debug for ActiveMove {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ActiveMove")
            .field("id", &self.id)
            .field("user", &self.user)
            .field("forced", &self.forced)
            .finish()
    }
}
