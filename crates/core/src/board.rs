//! Board module - the board engine
//!
//! Owns the [`Grid`] and drives everything that mutates it: spawning, movement,
//! rotation, locking and line clears.
//!
//! The grid is authoritative. The falling piece exists on the board only as
//! its four `Active` cells, which is what the renderer reads. Alongside them the
//! engine tracks the piece's kind, rotation and anchor, because several
//! rotation states of the same shape cover identical cells (a flat I in
//! rotation 0 or 2, say) and the next rotation depends on which one it is.
//! Every mutation updates both together.
//!
//! Collision rule shared by translate, rotate and spawn: a candidate cell is
//! acceptable when it is on the board and not `Locked`. The current piece's
//! own `Active` cells never block it.

use arrayvec::ArrayVec;

use crate::grid::Grid;
use crate::pieces::{cells_at, get_shape, rotations, PieceShape, SPAWN_POSITION};
use crate::rng::PieceRandomizer;
use crate::types::{Cell, PieceKind, Rotation, BOARD_HEIGHT};

/// The falling piece, as derived from (and kept in step with) the grid
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ActivePiece {
    pub kind: PieceKind,
    pub rotation: Rotation,
    pub x: i8,
    pub y: i8,
}

impl ActivePiece {
    /// A new piece in rotation 0 at the spawn anchor
    pub fn new(kind: PieceKind) -> Self {
        Self {
            kind,
            rotation: Rotation::R0,
            x: SPAWN_POSITION.0,
            y: SPAWN_POSITION.1,
        }
    }

    /// Get the shape (mino offsets) for current rotation
    pub fn shape(&self) -> PieceShape {
        get_shape(self.kind, self.rotation)
    }

    /// Absolute cells covered on the board
    pub fn cells(&self) -> PieceShape {
        cells_at(&self.shape(), self.x, self.y)
    }

    /// Lowest board row the piece covers
    pub fn bottom(&self) -> i8 {
        self.cells().iter().map(|&(_, y)| y).max().unwrap_or(self.y)
    }
}

/// Result of a downward move that may land the piece
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct DropOutcome {
    /// The piece moved down one row.
    pub moved: bool,
    /// The move was rejected and the piece was locked in place.
    pub locked: bool,
    /// Rows cleared by the line-clear pass that follows a lock.
    pub lines_cleared: u32,
}

/// The board engine
#[derive(Debug, Clone)]
pub struct Board {
    grid: Grid,
    active: Option<ActivePiece>,
    randomizer: PieceRandomizer,
}

impl Board {
    /// Create an empty board whose spawns are drawn from `seed`
    pub fn new(seed: u32) -> Self {
        Self {
            grid: Grid::new(),
            active: None,
            randomizer: PieceRandomizer::new(seed),
        }
    }

    /// Adopt an existing grid, deriving the falling piece from its active cells.
    pub fn from_grid(grid: Grid, seed: u32) -> Self {
        let active = scan_active(&grid, None);
        Self {
            grid,
            active,
            randomizer: PieceRandomizer::new(seed),
        }
    }

    pub fn grid(&self) -> &Grid {
        &self.grid
    }

    pub fn seed(&self) -> u32 {
        self.randomizer.seed()
    }

    /// Scan the grid for the falling piece.
    ///
    /// Returns `None` when no active cells exist: nothing is falling and a new
    /// piece must be spawned. Otherwise reports the piece's kind, rotation and
    /// anchor.
    pub fn locate_active_piece(&mut self) -> Option<ActivePiece> {
        self.active = scan_active(&self.grid, self.active);
        self.active
    }

    /// Spawn a uniformly random piece at the top of the board.
    ///
    /// Returns `false` when the spawn cells are blocked (game over); the grid
    /// is left untouched in that case.
    pub fn spawn_piece(&mut self) -> bool {
        let kind = self.randomizer.draw();
        self.spawn_kind(kind)
    }

    /// Spawn a specific piece kind at the top of the board.
    ///
    /// A piece still falling at this point is locked first.
    pub fn spawn_kind(&mut self, kind: PieceKind) -> bool {
        if self.active.is_some() {
            self.lock_active_piece();
        }

        let piece = ActivePiece::new(kind);
        let cells = piece.cells();
        if !self.fits(&cells) {
            log::debug!("spawn of {} blocked", kind.as_str());
            return false;
        }

        for &(x, y) in &cells {
            self.grid.set(x, y, Cell::Active(kind));
        }
        self.active = Some(piece);
        true
    }

    /// Try to shift the falling piece by `(dx, dy)`.
    ///
    /// Commits only when every target cell is on the board and not locked.
    /// A rejected move leaves the grid exactly as it was.
    pub fn attempt_translate(&mut self, dx: i8, dy: i8) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let (Some(x), Some(y)) = (active.x.checked_add(dx), active.y.checked_add(dy)) else {
            return false;
        };
        self.try_commit(active, ActivePiece { x, y, ..active })
    }

    /// Rotate the falling piece to its next rotation state about the same anchor.
    ///
    /// No wall kicks: if the rotated cells collide the piece stays as it is.
    pub fn rotate_active_piece(&mut self) -> bool {
        let Some(active) = self.active else {
            return false;
        };

        let rotated = ActivePiece {
            rotation: active.rotation.next(),
            ..active
        };
        self.try_commit(active, rotated)
    }

    /// Move the falling piece down one row; on rejection lock it and clear lines.
    pub fn move_down(&mut self) -> DropOutcome {
        if self.active.is_none() {
            return DropOutcome::default();
        }

        if self.attempt_translate(0, 1) {
            return DropOutcome {
                moved: true,
                ..DropOutcome::default()
            };
        }

        self.lock_active_piece();
        DropOutcome {
            moved: false,
            locked: true,
            lines_cleared: self.clear_completed_lines(),
        }
    }

    /// Convert the falling piece's cells from active to locked.
    ///
    /// Returns `false` when nothing was falling.
    pub fn lock_active_piece(&mut self) -> bool {
        let Some(active) = self.active.take() else {
            return false;
        };

        for (x, y) in active.cells() {
            self.grid.set(x, y, Cell::Locked(active.kind));
        }
        true
    }

    /// Remove every fully locked row, compacting the rows above it.
    ///
    /// Rows are scanned top to bottom. Removing a row only moves rows above
    /// it, so rows not yet scanned keep their index. Returns the number of
    /// rows removed.
    pub fn clear_completed_lines(&mut self) -> u32 {
        let mut cleared = 0;
        for y in 0..BOARD_HEIGHT as usize {
            if !self.grid.is_row_locked(y) {
                continue;
            }
            self.grid.remove_row(y);
            cleared += 1;

            // A falling piece entirely above the removed row moved down with it.
            if let Some(active) = self.active.as_mut() {
                if (active.bottom() as usize) < y {
                    active.y += 1;
                }
            }
        }
        cleared
    }

    /// Empty the board and forget the falling piece
    pub fn reset(&mut self) {
        self.grid.reset();
        self.active = None;
    }

    /// Collision check: every cell on the board and not locked
    fn fits(&self, cells: &PieceShape) -> bool {
        cells
            .iter()
            .all(|&(x, y)| Grid::in_bounds(x, y) && !self.grid.get(x, y).is_locked())
    }

    fn try_commit(&mut self, from: ActivePiece, to: ActivePiece) -> bool {
        let target = to.cells();
        if !self.fits(&target) {
            return false;
        }

        for (x, y) in from.cells() {
            self.grid.set(x, y, Cell::Empty);
        }
        for &(x, y) in &target {
            self.grid.set(x, y, Cell::Active(to.kind));
        }
        self.active = Some(to);
        true
    }
}

/// Derive the falling piece from the grid's active cells.
///
/// `hint` is the tracked piece; it is returned when it still covers exactly
/// the active cells, which resolves rotations that cover identical cells.
/// Otherwise the first rotation in catalog order that matches is reported.
fn scan_active(grid: &Grid, hint: Option<ActivePiece>) -> Option<ActivePiece> {
    let mut found: ArrayVec<(i8, i8), 4> = ArrayVec::new();
    for pos in grid.active_positions() {
        assert!(!found.is_full(), "more than four active cells on the grid");
        found.push(pos);
    }

    let &(first_x, first_y) = found.first()?;
    assert!(found.len() == 4, "active cell set is not a tetromino");
    let Some(kind) = grid.get(first_x, first_y).kind() else {
        unreachable!("active cell without a piece kind");
    };
    let found = into_shape(&found);

    if let Some(piece) = hint {
        if piece.kind == kind && sorted(piece.cells()) == found {
            return Some(piece);
        }
    }

    let min_x = found.iter().map(|&(x, _)| x).min().unwrap_or(0);
    let min_y = found.iter().map(|&(_, y)| y).min().unwrap_or(0);

    for rotation in Rotation::ALL {
        let shape = &rotations(kind)[rotation.index()];
        let box_x = shape.iter().map(|&(dx, _)| dx).min().unwrap_or(0);
        let box_y = shape.iter().map(|&(_, dy)| dy).min().unwrap_or(0);
        let piece = ActivePiece {
            kind,
            rotation,
            x: min_x - box_x,
            y: min_y - box_y,
        };
        if sorted(piece.cells()) == found {
            return Some(piece);
        }
    }

    panic!("active cells do not match any {} rotation", kind.as_str());
}

fn into_shape(cells: &[(i8, i8)]) -> PieceShape {
    let mut shape = [(0, 0); 4];
    shape.copy_from_slice(cells);
    sorted(shape)
}

/// Row-major order, matching the grid scan
fn sorted(mut cells: PieceShape) -> PieceShape {
    cells.sort_by_key(|&(x, y)| (y, x));
    cells
}
