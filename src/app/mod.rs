//! Application orchestration: the scrollbar engine, its background capture
//! runtime, the event loop plumbing and input handling.

pub mod capture;
pub mod drag;
pub mod engine;
pub mod event;
pub mod handler;
pub mod state;
pub mod sync;
pub mod thumbnail_cache;
pub mod watcher;
pub mod wheel;
