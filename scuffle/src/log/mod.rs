//! The battle event log.
//!
//! The event log is the only channel from the engine to a presentation layer. Every event is a
//! message identifier (its title) plus named interpolation arguments, rendered as a
//! pipe-separated line such as `damage|mon:Pikachu,player-1,1|health:64/120`.

#[macro_use]
mod event;
mod event_log;

pub use event::Event;
pub use event_log::EventLog;
