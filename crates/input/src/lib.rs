//! Terminal input.
//!
//! Maps `crossterm` key events to game controls and tracks which controls are
//! held, producing one [`types::InputSnapshot`] per tick. Terminals without
//! key-release events are handled with a release timeout.

pub mod handler;
pub mod map;

pub use blockfall_types as types;

pub use handler::InputTracker;
pub use map::{map_key, should_quit, Control};
