//! Terminal presentation for the game.
//!
//! The view draws a [`core::GameSnapshot`] into a character framebuffer;
//! the renderer flushes framebuffers to the terminal as minimal diffs. Only
//! the renderer does I/O.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use blockfall_core as core;
pub use blockfall_types as types;

pub use fb::{FrameBuffer, Glyph, Rgb, Style};
pub use game_view::{piece_color, GameView, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
