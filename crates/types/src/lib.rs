//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental types used throughout the application.
//! All types are pure data structures with no external dependencies, making them
//! usable from the board engine, the terminal view and the input layer alike.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, row 0 is the top)
//! - **Spawn anchor**: (3, 0)
//!
//! # Timing and Gravity
//!
//! The simulation advances one step per rendered frame at a fixed rate.
//! Gravity is a fractional cells-per-tick rate stored in thousandths so that
//! repeated accumulation stays exact:
//!
//! | Constant | Value | Description |
//! |----------|-------|-------------|
//! | `TICK_MS` | 100 | Fixed timestep interval (10 steps/second) |
//! | `GRAVITY_SCALE` | 1000 | Fixed-point denominator for speed and accumulator |
//! | `INITIAL_SPEED_MILLI` | 100 | Starting speed (0.1 cells/tick, level 1) |
//! | `SPEED_INCREMENT_MILLI` | 5 | Added once per tick that clears lines |
//!
//! # Examples
//!
//! ```
//! use blockfall_types::{Cell, PieceKind, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! assert_eq!(PieceKind::from_color_id(2), Some(PieceKind::I));
//! assert_eq!(Rotation::R3.next(), Rotation::R0);
//! assert!(Cell::Locked(PieceKind::T).is_locked());
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: u8 = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: u8 = 20;

/// Fixed timestep interval in milliseconds (10 steps per second)
pub const TICK_MS: u32 = 100;

/// Fixed-point denominator for gravity speed and accumulator.
pub const GRAVITY_SCALE: u32 = 1000;

/// Starting gravity speed in thousandths of a cell per tick.
pub const INITIAL_SPEED_MILLI: u32 = 100;

/// Speed added on every tick that clears at least one line.
pub const SPEED_INCREMENT_MILLI: u32 = 5;

/// Column of the spawn anchor (top-center for a 4-wide bounding box).
pub const SPAWN_X: i8 = 3;

/// Row of the spawn anchor.
pub const SPAWN_Y: i8 = 0;

/// Name stored in a fresh best-score record.
pub const DEFAULT_PLAYER: &str = "Player 1";


/// The seven tetromino piece kinds
///
/// Color ids follow the sprite order of the block texture and are what the
/// renderer uses to pick a color:
/// O=1, I=2, J=3, L=4, S=5, Z=6, T=7. Id 0 means "empty".
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PieceKind {
    O,
    I,
    J,
    L,
    S,
    Z,
    T,
}

impl PieceKind {
    /// All kinds, in color-id order.
    pub const ALL: [PieceKind; 7] = [
        PieceKind::O,
        PieceKind::I,
        PieceKind::J,
        PieceKind::L,
        PieceKind::S,
        PieceKind::Z,
        PieceKind::T,
    ];

    /// Color id used in u8 grid snapshots (1..=7)
    pub fn color_id(self) -> u8 {
        match self {
            PieceKind::O => 1,
            PieceKind::I => 2,
            PieceKind::J => 3,
            PieceKind::L => 4,
            PieceKind::S => 5,
            PieceKind::Z => 6,
            PieceKind::T => 7,
        }
    }

    /// Inverse of [`PieceKind::color_id`]
    ///
    /// ```
    /// use blockfall_types::PieceKind;
    ///
    /// assert_eq!(PieceKind::from_color_id(7), Some(PieceKind::T));
    /// assert_eq!(PieceKind::from_color_id(0), None);
    /// ```
    pub fn from_color_id(id: u8) -> Option<Self> {
        match id {
            1 => Some(PieceKind::O),
            2 => Some(PieceKind::I),
            3 => Some(PieceKind::J),
            4 => Some(PieceKind::L),
            5 => Some(PieceKind::S),
            6 => Some(PieceKind::Z),
            7 => Some(PieceKind::T),
            _ => None,
        }
    }

    /// Single-letter name
    pub fn as_str(&self) -> &'static str {
        match self {
            PieceKind::O => "O",
            PieceKind::I => "I",
            PieceKind::J => "J",
            PieceKind::L => "L",
            PieceKind::S => "S",
            PieceKind::Z => "Z",
            PieceKind::T => "T",
        }
    }
}

/// Rotation index of a piece (0-3), advanced clockwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Rotation {
    #[default]
    R0,
    R1,
    R2,
    R3,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [Rotation::R0, Rotation::R1, Rotation::R2, Rotation::R3];

    /// Next rotation, wrapping 3 -> 0
    pub fn next(self) -> Self {
        match self {
            Rotation::R0 => Rotation::R1,
            Rotation::R1 => Rotation::R2,
            Rotation::R2 => Rotation::R3,
            Rotation::R3 => Rotation::R0,
        }
    }

    pub fn index(self) -> usize {
        match self {
            Rotation::R0 => 0,
            Rotation::R1 => 1,
            Rotation::R2 => 2,
            Rotation::R3 => 3,
        }
    }
}

/// A cell on the game board
///
/// The grid is the single source of truth for occupancy: the falling piece is
/// the set of `Active` cells, landed pieces are `Locked`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Cell {
    #[default]
    Empty,
    Locked(PieceKind),
    Active(PieceKind),
}

impl Cell {
    pub fn is_empty(self) -> bool {
        matches!(self, Cell::Empty)
    }

    pub fn is_locked(self) -> bool {
        matches!(self, Cell::Locked(_))
    }

    pub fn is_active(self) -> bool {
        matches!(self, Cell::Active(_))
    }

    /// Piece kind occupying the cell, if any
    pub fn kind(self) -> Option<PieceKind> {
        match self {
            Cell::Empty => None,
            Cell::Locked(kind) | Cell::Active(kind) => Some(kind),
        }
    }
}

/// Discrete input signals sampled by the host once per tick.
///
/// Movement and rotation are level-detected (held = act this tick).
/// `pause` is reported as held/not-held; the toggle fires on release,
/// which the game detects by comparing consecutive snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct InputSnapshot {
    pub move_left: bool,
    pub move_right: bool,
    pub soft_drop: bool,
    pub rotate: bool,
    pub pause: bool,
    pub quit: bool,
}

impl InputSnapshot {
    /// True when `pause` was held in `prev` and is released now.
    pub fn pause_released(&self, prev: &InputSnapshot) -> bool {
        prev.pause && !self.pause
    }
}
