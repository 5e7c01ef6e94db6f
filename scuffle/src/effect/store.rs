use std::{
    fmt,
    fmt::Debug,
    rc::Rc,
};

use indexmap::IndexMap;
use scuffle_data::{
    Id,
    Status,
};

use crate::effect::{
    EffectBehavior,
    EffectState,
};

/// A live effect: a shared behavior plus the state of this one application.
#[derive(Clone)]
pub struct EffectInstance {
    pub id: Id,
    pub behavior: Rc<dyn EffectBehavior>,
    pub state: EffectState,
}

impl EffectInstance {
    pub fn new(id: Id, behavior: Rc<dyn EffectBehavior>, state: EffectState) -> Self {
        Self {
            id,
            behavior,
            state,
        }
    }

    /// Display name for the event log.
    pub fn name(&self) -> &str {
        self.behavior.name()
    }

    /// Checks if the instance holds exactly this behavior object.
    pub fn holds(&self, behavior: *const ()) -> bool {
        Rc::as_ptr(&self.behavior) as *const () == behavior
    }
}

impl Debug for EffectInstance {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EffectInstance")
            .field("id", &self.id)
            .field("name", &self.behavior.name())
            .field("state", &self.state)
            .finish()
    }
}

/// Effects on a single target, keyed by id and kept in insertion order.
///
/// Keying by id is what makes every effect unique per target.
pub type EffectStore = IndexMap<Id, EffectInstance>;

/// A battler's non-volatile status.
#[derive(Debug, Clone)]
pub struct StatusCondition {
    pub status: Status,
    pub effect: EffectInstance,
}
