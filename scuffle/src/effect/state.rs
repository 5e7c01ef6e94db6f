use scuffle_data::Id;

use crate::battle::MonHandle;

/// How long an effect lasts.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum EffectDuration {
    /// Remaining end-of-turn ticks.
    Turns(u8),
    /// Lasts until explicitly removed.
    #[default]
    Indefinite,
}

impl EffectDuration {
    /// Ticks the duration down by one turn.
    ///
    /// Returns true if the effect has expired.
    pub fn tick(&mut self) -> bool {
        match self {
            Self::Turns(turns) => {
                *turns = turns.saturating_sub(1);
                *turns == 0
            }
            Self::Indefinite => false,
        }
    }

    pub fn remaining(&self) -> Option<u8> {
        match self {
            Self::Turns(turns) => Some(*turns),
            Self::Indefinite => None,
        }
    }
}

/// What happens when an effect is added to a target that already has it.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub enum StackPolicy {
    /// The second application does nothing.
    #[default]
    Reject,
    /// The second application resets the duration.
    Refresh,
    /// The second application runs the effect's restart hook, such as adding a layer.
    Restart,
}

/// Mutable state owned by a single ability, item, or effect instance.
///
/// Behavior objects are shared definitions; anything that changes over an instance's lifetime
/// lives here instead.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct EffectState {
    pub duration: EffectDuration,
    /// The battler that caused the effect.
    pub source: Option<MonHandle>,
    /// The side of the battler that caused the effect.
    pub source_side: Option<usize>,
    /// Layer count for stacking effects.
    pub layers: u8,
    /// General-purpose counter, such as turns asleep or stored damage.
    pub counter: u32,
    /// Whether a one-shot trigger has already fired.
    pub triggered: bool,
    /// Turn the effect was created on.
    pub created_turn: u64,
    /// The move that created the effect, such as the move being charged.
    pub move_id: Option<Id>,
    /// The battler the creating move targeted.
    pub target: Option<MonHandle>,
}

impl EffectState {
    pub fn new(duration: EffectDuration) -> Self {
        Self {
            duration,
            ..Default::default()
        }
    }
}

#[cfg(test)]
mod state_test {
    use crate::effect::EffectDuration;

    #[test]
    fn counts_down_to_expiry() {
        let mut duration = EffectDuration::Turns(2);
        assert!(!duration.tick());
        assert_eq!(duration.remaining(), Some(1));
        assert!(duration.tick());
        assert!(duration.tick());
        assert_eq!(duration.remaining(), Some(0));
    }

    #[test]
    fn indefinite_never_expires() {
        let mut duration = EffectDuration::Indefinite;
        assert!((0..100).all(|_| !duration.tick()));
    }
}
