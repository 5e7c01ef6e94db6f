//! A capability-dispatch engine for turn-based creature battles.
//!
//! Moves, abilities, items, and effects are looked up by identifier in [`registry::Registries`]
//! and implement the hook contract in [`effect::Hooks`]. Every state change goes through a
//! handler in [`handlers`], which asks the relevant objects to prevent, modify, and react to
//! it. A [`battle::Battle`] drives turns through these handlers and reports everything that
//! happens through its event log.

extern crate alloc;

#[macro_use]
pub mod log;

pub mod battle;
pub mod catalogue;
pub mod config;
pub mod effect;
pub mod error;
pub mod handlers;
pub mod moves;
pub mod registry;
