use std::rc::Rc;

use scuffle_data::{
    Boost,
    Id,
    MoveData,
    Status,
};

use crate::{
    battle::MonHandle,
    effect::{
        EffectDuration,
        HookOrigin,
    },
};

/// One hit of a move against one target, as seen by modifier hooks.
#[derive(Debug, Clone, Copy)]
pub struct MoveHit<'m> {
    pub user: MonHandle,
    pub target: MonHandle,
    pub mov: &'m MoveData,
    pub crit: bool,
    pub spread: bool,
}

/// Why damage is being dealt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DamageKind {
    /// A move hitting its target.
    Move,
    /// Recoil from the user's own move.
    Recoil,
    /// Crash damage from a missed move.
    Crash,
    /// A battler hurting itself in confusion.
    Confusion,
    /// Residual or indirect damage from a named effect.
    Effect(String),
}

impl DamageKind {
    /// Direct damage comes from a move striking its target.
    pub fn is_direct(&self) -> bool {
        matches!(self, Self::Move)
    }

    fn log_source(&self) -> Option<String> {
        match self {
            Self::Move => None,
            Self::Recoil => Some("Recoil".to_owned()),
            Self::Crash => Some("Crash".to_owned()),
            Self::Confusion => Some("Confusion".to_owned()),
            Self::Effect(name) => Some(name.clone()),
        }
    }
}

/// Request to reduce a battler's HP.
#[derive(Debug, Clone)]
pub struct DamageRequest {
    pub target: MonHandle,
    pub amount: u32,
    pub source: Option<MonHandle>,
    pub mov: Option<Rc<MoveData>>,
    pub kind: DamageKind,
}

impl DamageRequest {
    /// Damage from a move hitting its target.
    pub fn from_move(target: MonHandle, amount: u32, user: MonHandle, mov: Rc<MoveData>) -> Self {
        Self {
            target,
            amount,
            source: Some(user),
            mov: Some(mov),
            kind: DamageKind::Move,
        }
    }

    /// Indirect damage.
    pub fn indirect(target: MonHandle, amount: u32, kind: DamageKind) -> Self {
        Self {
            target,
            amount,
            source: None,
            mov: None,
            kind,
        }
    }

    pub fn with_source(mut self, source: Option<MonHandle>) -> Self {
        self.source = source;
        self
    }

    /// The `from` argument for the damage event.
    pub fn log_source(&self) -> Option<String> {
        self.kind.log_source()
    }
}

/// Request to restore a battler's HP.
#[derive(Debug, Clone)]
pub struct HealRequest {
    pub target: MonHandle,
    pub amount: u32,
    pub source: Option<MonHandle>,
    /// Name of the effect causing the heal, for the event log.
    pub from: Option<String>,
}

/// Request to inflict a non-volatile status.
#[derive(Debug, Clone)]
pub struct StatusRequest {
    pub target: MonHandle,
    pub status: Status,
    pub source: Option<MonHandle>,
    pub mov: Option<Rc<MoveData>>,
    /// Name of the effect causing the status, for the event log.
    pub from: Option<String>,
}

impl StatusRequest {
    pub fn new(target: MonHandle, status: Status) -> Self {
        Self {
            target,
            status,
            source: None,
            mov: None,
            from: None,
        }
    }

    pub fn with_source(mut self, source: Option<MonHandle>) -> Self {
        self.source = source;
        self
    }

    pub fn with_move(mut self, mov: Option<Rc<MoveData>>) -> Self {
        self.mov = mov;
        self
    }

    pub fn with_from(mut self, from: Option<String>) -> Self {
        self.from = from;
        self
    }
}

/// Request to change one stat stage.
#[derive(Debug, Clone)]
pub struct BoostRequest {
    pub target: MonHandle,
    pub boost: Boost,
    pub delta: i8,
    pub source: Option<MonHandle>,
    pub mov: Option<Rc<MoveData>>,
    /// Name of the effect causing the change, for the event log.
    pub from: Option<String>,
}

impl BoostRequest {
    pub fn new(target: MonHandle, boost: Boost, delta: i8) -> Self {
        Self {
            target,
            boost,
            delta,
            source: None,
            mov: None,
            from: None,
        }
    }

    pub fn with_source(mut self, source: Option<MonHandle>) -> Self {
        self.source = source;
        self
    }

    pub fn with_move(mut self, mov: Option<Rc<MoveData>>) -> Self {
        self.mov = mov;
        self
    }

    pub fn with_from(mut self, from: Option<String>) -> Self {
        self.from = from;
        self
    }

    /// Checks if the change was caused by some battler other than the target.
    pub fn caused_by_other(&self) -> bool {
        self.source.is_some_and(|source| source != self.target)
    }
}

/// Where an effect lives.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EffectTarget {
    /// Tied to a battler; removed when it leaves the field.
    Mon(MonHandle),
    /// Tied to a side of the field.
    Side(usize),
    /// Tied to a position on a side, whoever occupies it.
    Slot(usize, usize),
    /// Tied to the whole field.
    Field,
}

impl EffectTarget {
    /// The origin an effect with the given id at this target dispatches from.
    pub fn origin(&self, id: &Id) -> HookOrigin {
        match self {
            Self::Mon(mon) => HookOrigin::MonEffect(*mon, id.clone()),
            Self::Side(side) => HookOrigin::SideEffect(*side, id.clone()),
            Self::Slot(side, slot) => HookOrigin::SlotEffect(*side, *slot, id.clone()),
            Self::Field => HookOrigin::FieldEffect(id.clone()),
        }
    }
}

/// Request to add an effect.
#[derive(Debug, Clone)]
pub struct EffectRequest {
    pub target: EffectTarget,
    pub id: Id,
    pub source: Option<MonHandle>,
    pub mov: Option<Rc<MoveData>>,
    /// The battler targeted by the creating move, remembered in the effect's state.
    pub move_target: Option<MonHandle>,
    /// Overrides the effect's own duration.
    pub duration: Option<EffectDuration>,
}

impl EffectRequest {
    pub fn new<I>(target: EffectTarget, id: I) -> Self
    where
        I: Into<Id>,
    {
        Self {
            target,
            id: id.into(),
            source: None,
            mov: None,
            move_target: None,
            duration: None,
        }
    }

    pub fn with_source(mut self, source: Option<MonHandle>) -> Self {
        self.source = source;
        self
    }

    pub fn with_move(mut self, mov: Option<Rc<MoveData>>) -> Self {
        self.mov = mov;
        self
    }

    pub fn with_move_target(mut self, target: Option<MonHandle>) -> Self {
        self.move_target = target;
        self
    }

    pub fn with_duration(mut self, duration: EffectDuration) -> Self {
        self.duration = Some(duration);
        self
    }
}
