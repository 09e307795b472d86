//! Core model – scroll geometry, thumbnail state, refresh policy and timers.
//!
//! Nothing in this module depends on any TUI or rendering crate, and nothing
//! here reads a clock: callers pass `now` in.

pub mod document;
pub mod geometry;
pub mod probe;
pub mod thumbnail;
pub mod timer;
pub mod trigger;
pub mod viewport;
pub mod visibility;
