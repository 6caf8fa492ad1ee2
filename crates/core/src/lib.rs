//! Core game logic - pure, deterministic, and testable
//!
//! This crate contains the board simulation and the rules around it. It has
//! no dependencies on terminals, files or clocks: the host feeds it one
//! [`InputSnapshot`](types::InputSnapshot) per tick and reads back a
//! [`TickOutcome`] and a [`GameSnapshot`].
//!
//! # Module Structure
//!
//! - [`pieces`]: the seven tetromino shapes and their rotation tables
//! - [`grid`]: the 10x20 playfield of empty / locked / active cells
//! - [`board`]: spawn, movement, rotation, locking and line clears on the grid
//! - [`gravity`]: per-tick accumulator that forces the piece down
//! - [`scoring`]: line-clear points and the best-score record
//! - [`game`]: one simulation step per tick, tying the above together
//! - [`rng`]: seeded uniform piece selection
//! - [`snapshot`]: read-only copy of the game for rendering
//!
//! # Example
//!
//! ```
//! use blockfall_core::{Game, Record};
//! use blockfall_core::types::InputSnapshot;
//!
//! let mut game = Game::new(12345, Record::default(), "Player 1");
//!
//! // The first tick spawns a piece.
//! let outcome = game.tick(InputSnapshot::default());
//! assert!(!outcome.spawn_failed);
//!
//! // Hold soft drop until something lands.
//! let drop = InputSnapshot { soft_drop: true, ..Default::default() };
//! for _ in 0..25 {
//!     game.tick(drop);
//! }
//! assert!(game.board().grid().cells().iter().any(|c| c.is_locked()));
//! ```

pub mod board;
pub mod game;
pub mod gravity;
pub mod grid;
pub mod pieces;
pub mod rng;
pub mod scoring;
pub mod snapshot;

pub use blockfall_types as types;

// Re-export commonly used types for convenience
pub use board::{ActivePiece, Board, DropOutcome};
pub use game::{Game, TickOutcome};
pub use gravity::GravityClock;
pub use grid::Grid;
pub use pieces::get_shape;
pub use rng::{PieceRandomizer, SimpleRng};
pub use scoring::{line_clear_points, Record, Score};
pub use snapshot::GameSnapshot;
