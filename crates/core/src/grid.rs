//! Grid module - the playfield
//!
//! The grid is a 10x20 array of cells, stored flat in row-major order for cache
//! locality and zero allocation. Coordinates are `(x, y)` where x ranges 0..9
//! (left to right) and y ranges 0..19 (top to bottom).
//!
//! Reads and writes are bounds-checked with `assert!`: every caller validates
//! positions through [`Grid::in_bounds`] first, so an out-of-range access is
//! a logic defect in the collision checker, never a recoverable condition.

use crate::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

/// Total number of cells on the board
const GRID_SIZE: usize = (BOARD_WIDTH as usize) * (BOARD_HEIGHT as usize);

const WIDTH: usize = BOARD_WIDTH as usize;
const HEIGHT: usize = BOARD_HEIGHT as usize;

/// The playfield - 10 columns x 20 rows using flat array storage
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Grid {
    /// Flat array of cells, row-major order (y * WIDTH + x)
    cells: [Cell; GRID_SIZE],
}

impl Grid {
    /// Create a new all-empty grid
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; GRID_SIZE],
        }
    }

    #[inline(always)]
    fn index(x: i8, y: i8) -> usize {
        assert!(
            Self::in_bounds(x, y),
            "grid access out of bounds: ({x}, {y})"
        );
        (y as usize) * WIDTH + (x as usize)
    }

    pub fn width(&self) -> u8 {
        BOARD_WIDTH
    }

    pub fn height(&self) -> u8 {
        BOARD_HEIGHT
    }

    /// Whether `(x, y)` lies on the board
    #[inline(always)]
    pub fn in_bounds(x: i8, y: i8) -> bool {
        x >= 0 && (x as usize) < WIDTH && y >= 0 && (y as usize) < HEIGHT
    }

    /// Get cell at position (x, y). Panics when out of bounds.
    pub fn get(&self, x: i8, y: i8) -> Cell {
        self.cells[Self::index(x, y)]
    }

    /// Set cell at position (x, y). Panics when out of bounds.
    pub fn set(&mut self, x: i8, y: i8, cell: Cell) {
        let idx = Self::index(x, y);
        self.cells[idx] = cell;
    }

    /// Check whether every cell of row `y` is locked
    pub fn is_row_locked(&self, y: usize) -> bool {
        assert!(y < HEIGHT, "row out of bounds: {y}");
        self.row(y).iter().all(|cell| cell.is_locked())
    }

    /// Remove row `y`, shift every row above it down by one and insert an
    /// empty row at the top.
    pub fn remove_row(&mut self, y: usize) {
        assert!(y < HEIGHT, "row out of bounds: {y}");
        // copy_within handles the overlapping ranges
        self.cells.copy_within(0..y * WIDTH, WIDTH);
        self.cells[..WIDTH].fill(Cell::Empty);
    }

    /// Borrow row `y`
    pub fn row(&self, y: usize) -> &[Cell] {
        let start = y * WIDTH;
        &self.cells[start..start + WIDTH]
    }

    /// Iterate rows top to bottom
    pub fn rows(&self) -> impl Iterator<Item = &[Cell]> {
        self.cells.chunks_exact(WIDTH)
    }

    /// Get a reference to the internal cells array
    pub fn cells(&self) -> &[Cell] {
        &self.cells
    }

    /// Positions of all active cells, top to bottom, left to right
    pub fn active_positions(&self) -> impl Iterator<Item = (i8, i8)> + '_ {
        self.cells
            .iter()
            .enumerate()
            .filter(|(_, cell)| cell.is_active())
            .map(|(idx, _)| ((idx % WIDTH) as i8, (idx / WIDTH) as i8))
    }

    /// Reset every cell to empty
    pub fn reset(&mut self) {
        self.cells.fill(Cell::Empty);
    }

    /// Build a grid from text rows: `.` empty, `#` locked, `@` active.
    ///
    /// Locked and active cells take the given kind. Rows are bottom-aligned so
    /// tests only need to spell out the interesting part of the board.
    pub fn from_rows(rows: &[&str], kind: PieceKind) -> Self {
        assert!(rows.len() <= HEIGHT);
        let mut grid = Self::new();
        let top = HEIGHT - rows.len();
        for (i, row) in rows.iter().enumerate() {
            assert_eq!(row.len(), WIDTH, "row {i} must be {WIDTH} wide");
            for (x, ch) in row.chars().enumerate() {
                let cell = match ch {
                    '#' => Cell::Locked(kind),
                    '@' => Cell::Active(kind),
                    _ => Cell::Empty,
                };
                grid.set(x as i8, (top + i) as i8, cell);
            }
        }
        grid
    }
}

impl Default for Grid {
    fn default() -> Self {
        Self::new()
    }
}
