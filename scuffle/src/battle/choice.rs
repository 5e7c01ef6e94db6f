use std::{
    collections::VecDeque,
    fmt,
    fmt::Display,
    str::FromStr,
};

use anyhow::{
    Context,
    Error,
    Result,
};

use crate::error::choice_error;

/// An action a player must make before the battle can continue.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Request {
    /// Every active battler must act.
    Turn,
    /// The active positions listed must be filled with a switch.
    Switch { positions: Vec<usize> },
}

/// A choice to use a move.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MoveChoice {
    /// The move slot to use.
    pub slot: usize,
    /// Target position. Positive values are foe positions, negative values are ally positions,
    /// both counted from 1.
    pub target: Option<isize>,
}

impl Display for MoveChoice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.slot)?;
        if let Some(target) = self.target {
            write!(f, ",{target}")?;
        }
        Ok(())
    }
}

impl FromStr for MoveChoice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut args = s.split(',').map(|arg| arg.trim()).collect::<VecDeque<_>>();
        let slot = args
            .pop_front()
            .context("missing move slot")?
            .parse()
            .context("invalid move slot")?;
        let target = match args.pop_front() {
            Some(target) => Some(target.parse().context("invalid move target")?),
            None => None,
        };
        if let Some(arg) = args.pop_front() {
            return Err(choice_error(format!("unexpected argument in move choice: {arg}")));
        }
        Ok(Self { slot, target })
    }
}

/// A choice for a single active position.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Choice {
    Move(MoveChoice),
    /// Switch in the battler at the given team position.
    Switch(usize),
    Pass,
}

impl Display for Choice {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Move(choice) => write!(f, "move {choice}"),
            Self::Switch(position) => write!(f, "switch {position}"),
            Self::Pass => write!(f, "pass"),
        }
    }
}

impl FromStr for Choice {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let (kind, data) = match s.split_once(' ') {
            Some((kind, data)) => (kind, data.trim()),
            None => (s, ""),
        };
        match kind {
            "move" => Ok(Self::Move(data.parse()?)),
            "switch" => Ok(Self::Switch(
                data.parse().context("invalid switch position")?,
            )),
            "pass" if data.is_empty() => Ok(Self::Pass),
            _ => Err(choice_error(format!("unknown choice: {s}"))),
        }
    }
}

/// Parses the choices for every active position, separated by semicolons.
pub fn parse_choices(input: &str) -> Result<Vec<Choice>> {
    input
        .split(';')
        .map(|choice| choice.trim())
        .filter(|choice| !choice.is_empty())
        .map(Choice::from_str)
        .collect()
}
