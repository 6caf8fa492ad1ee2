//! Property tests for the board engine.
//!
//! Invariants covered:
//! - Line clears remove exactly the fully locked rows and keep the remaining
//!   rows in order, bottom-aligned.
//! - A rejected translate or rotate leaves the grid bit-for-bit unchanged.
//! - Four successful rotations restore the original cells.
//! - Spawning succeeds iff no spawn cell is locked.
//! - Score for n lines matches the closed form.

use proptest::prelude::*;

use blockfall::core::pieces::{cells_at, get_spawn_shape, SPAWN_POSITION};
use blockfall::core::{line_clear_points, Board, Grid};
use blockfall::types::{Cell, PieceKind, BOARD_HEIGHT, BOARD_WIDTH};

const W: usize = BOARD_WIDTH as usize;
const H: usize = BOARD_HEIGHT as usize;

fn kind_strategy() -> impl Strategy<Value = PieceKind> {
    prop::sample::select(PieceKind::ALL.to_vec())
}

/// Rows of locked/empty flags, with a bias toward full rows.
fn rows_strategy() -> impl Strategy<Value = Vec<[bool; W]>> {
    let row = prop_oneof![
        2 => Just([true; W]),
        3 => prop::array::uniform10(any::<bool>()),
    ];
    prop::collection::vec(row, H)
}

fn grid_from_flags(rows: &[[bool; W]]) -> Grid {
    let mut grid = Grid::new();
    for (y, row) in rows.iter().enumerate() {
        for (x, &locked) in row.iter().enumerate() {
            if locked {
                grid.set(x as i8, y as i8, Cell::Locked(PieceKind::L));
            }
        }
    }
    grid
}

fn active_cells(board: &Board) -> Vec<(i8, i8)> {
    board.grid().active_positions().collect()
}

proptest! {
    #[test]
    fn clear_removes_exactly_full_rows(rows in rows_strategy()) {
        let mut board = Board::from_grid(grid_from_flags(&rows), 1);
        let cleared = board.clear_completed_lines();

        let survivors: Vec<[bool; W]> = rows
            .iter()
            .copied()
            .filter(|r| !r.iter().all(|&c| c))
            .collect();
        prop_assert_eq!(cleared as usize, H - survivors.len());

        let mut expected = vec![[false; W]; H - survivors.len()];
        expected.extend(survivors);
        prop_assert_eq!(board.grid(), &grid_from_flags(&expected));
    }

    #[test]
    fn rejected_moves_leave_grid_identical(
        rows in prop::collection::vec(prop::array::uniform10(prop::bool::weighted(0.3)), 12),
        kind in kind_strategy(),
        moves in prop::collection::vec((-1i8..=1, 0i8..=1, any::<bool>()), 1..40),
    ) {
        // Locked clutter in the lower 12 rows only, leaving the spawn area free.
        let mut flags = vec![[false; W]; H - rows.len()];
        flags.extend(rows);
        let mut board = Board::from_grid(grid_from_flags(&flags), 1);
        prop_assume!(board.spawn_kind(kind));

        for (dx, dy, rotate) in moves {
            let before = board.grid().clone();
            let ok = if rotate {
                board.rotate_active_piece()
            } else {
                board.attempt_translate(dx, dy)
            };
            if !ok {
                prop_assert_eq!(board.grid(), &before);
            }
            prop_assert_eq!(active_cells(&board).len(), 4);
            let locked_before = before.cells().iter().filter(|c| c.is_locked()).count();
            let locked_after = board.grid().cells().iter().filter(|c| c.is_locked()).count();
            prop_assert_eq!(locked_before, locked_after);
        }
    }

    #[test]
    fn four_rotations_restore_cells(kind in kind_strategy(), dx in -2i8..=3, dy in 0i8..=14) {
        let mut board = Board::new(1);
        prop_assert!(board.spawn_kind(kind));
        prop_assume!(board.attempt_translate(dx, dy) || (dx == 0 && dy == 0));

        let start = active_cells(&board);
        let mut all_ok = true;
        for _ in 0..4 {
            all_ok &= board.rotate_active_piece();
        }
        prop_assume!(all_ok);
        prop_assert_eq!(active_cells(&board), start);
    }

    #[test]
    fn o_rotation_never_moves_cells(dy in 0i8..=17) {
        let mut board = Board::new(1);
        board.spawn_kind(PieceKind::O);
        board.attempt_translate(0, dy);
        let start = active_cells(&board);
        prop_assert!(board.rotate_active_piece());
        prop_assert_eq!(active_cells(&board), start);
    }

    #[test]
    fn spawn_succeeds_iff_spawn_cells_unlocked(
        top in prop::collection::vec(prop::array::uniform10(prop::bool::weighted(0.2)), 2),
        kind in kind_strategy(),
    ) {
        let mut flags = top;
        flags.extend(vec![[false; W]; H - 2]);
        let grid = grid_from_flags(&flags);
        let (sx, sy) = SPAWN_POSITION;
        let blocked = cells_at(&get_spawn_shape(kind), sx, sy)
            .iter()
            .any(|&(x, y)| grid.get(x, y).is_locked());

        let mut board = Board::from_grid(grid.clone(), 1);
        let spawned = board.spawn_kind(kind);
        prop_assert_eq!(spawned, !blocked);
        if !spawned {
            prop_assert_eq!(board.grid(), &grid);
        }
    }

    #[test]
    fn points_match_closed_form(n in 0u32..=40) {
        let expected = (2.5f64 * n as f64 * (n as f64 + 3.0)).ceil() as u32;
        prop_assert_eq!(line_clear_points(n), expected);
    }
}
