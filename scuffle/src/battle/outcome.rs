use serde_string_enum::{
    DeserializeLabeledStringEnum,
    SerializeLabeledStringEnum,
};

/// The outcome of a single use of a move.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, SerializeLabeledStringEnum, DeserializeLabeledStringEnum,
)]
pub enum MoveOutcome {
    /// The move ran against at least one target.
    #[string = "Success"]
    Success,
    /// The move could not be used at all. PP is still spent.
    #[string = "UsageFailure"]
    UsageFailure,
    /// Every target was blocked, missed, or immune.
    #[string = "TargetFailure"]
    TargetFailure,
    /// The move connected, but its payload changed nothing.
    #[string = "NoEffect"]
    NoEffect,
    /// The user spent the turn charging.
    #[string = "Charging"]
    Charging,
    /// The user could not act, such as being asleep.
    #[string = "Skipped"]
    Skipped,
}

impl MoveOutcome {
    pub fn success(&self) -> bool {
        matches!(self, Self::Success)
    }
}

impl From<MoveOutcome> for bool {
    fn from(value: MoveOutcome) -> Self {
        value.success()
    }
}

/// The outcome of a handler call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandlerOutcome<T = ()> {
    /// The mutation was committed.
    Applied(T),
    /// A hook vetoed the mutation.
    Prevented,
    /// The mutation could not change anything, such as a status on an already statused battler.
    NoEffect,
    /// The cascade limit was reached and the mutation was dropped.
    Dropped,
}

impl<T> HandlerOutcome<T> {
    pub fn applied(&self) -> bool {
        matches!(self, Self::Applied(_))
    }

    pub fn value(self) -> Option<T> {
        match self {
            Self::Applied(value) => Some(value),
            _ => None,
        }
    }

    /// Maps the applied value, keeping every other outcome.
    pub fn map<U, F>(self, f: F) -> HandlerOutcome<U>
    where
        F: FnOnce(T) -> U,
    {
        match self {
            Self::Applied(value) => HandlerOutcome::Applied(f(value)),
            Self::Prevented => HandlerOutcome::Prevented,
            Self::NoEffect => HandlerOutcome::NoEffect,
            Self::Dropped => HandlerOutcome::Dropped,
        }
    }

    /// Drops the applied value.
    pub fn discard(self) -> HandlerOutcome {
        self.map(|_| ())
    }
}
