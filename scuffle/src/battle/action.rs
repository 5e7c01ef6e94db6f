use scuffle_data::Id;

use crate::battle::{
    MonHandle,
    SpeedOrderable,
};

/// A move action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveAction {
    pub mon: MonHandle,
    pub mov: Id,
    /// The chosen target, before retargeting.
    pub target: Option<MonHandle>,
    /// Forced moves skip PP deduction.
    pub forced: bool,
    pub priority: i32,
    pub speed: u64,
}

/// A switch action.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SwitchAction {
    pub mon: MonHandle,
    pub switching_out: Option<MonHandle>,
    pub side: usize,
    pub position: usize,
    pub speed: u64,
}

/// A battler losing its turn to an effect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SkipAction {
    pub mon: MonHandle,
    pub from: Option<String>,
    pub speed: u64,
}

/// A single action in the turn queue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Action {
    Move(MoveAction),
    Switch(SwitchAction),
    Skip(SkipAction),
}

impl Action {
    /// The battler taking the action.
    pub fn mon(&self) -> MonHandle {
        match self {
            Self::Move(action) => action.mon,
            Self::Switch(action) => action.switching_out.unwrap_or(action.mon),
            Self::Skip(action) => action.mon,
        }
    }

    pub fn set_speed(&mut self, speed: u64) {
        match self {
            Self::Move(action) => action.speed = speed,
            Self::Switch(action) => action.speed = speed,
            Self::Skip(action) => action.speed = speed,
        }
    }
}

impl SpeedOrderable for Action {
    fn order(&self) -> u32 {
        match self {
            Self::Switch(_) => 0,
            Self::Move(_) | Self::Skip(_) => 1,
        }
    }

    fn priority(&self) -> i32 {
        match self {
            Self::Move(action) => action.priority,
            _ => 0,
        }
    }

    fn speed(&self) -> u64 {
        match self {
            Self::Move(action) => action.speed,
            Self::Switch(action) => action.speed,
            Self::Skip(action) => action.speed,
        }
    }
}
