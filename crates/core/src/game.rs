//! Game module - one simulation step per tick
//!
//! Ties the board engine, gravity clock and scoring together. The host samples
//! its input once per tick and calls [`Game::tick`]; everything the tick does
//! to the grid happens inside that call, so a renderer never sees a half-applied
//! step.
//!
//! Order within a tick:
//!
//! 1. Pause toggles on the release edge of the pause signal. While paused the
//!    rest of the tick is skipped.
//! 2. With nothing falling: clear completed lines, then spawn. A blocked spawn
//!    ends the game: the record is updated if beaten and everything resets.
//! 3. Held inputs apply in order: left, right, soft drop, rotate.
//! 4. Gravity advances; on overflow the piece is forced down one row.
//!
//! A rejected move down locks the piece and runs the line-clear pass
//! immediately. All lines cleared during the tick are scored together and
//! bump gravity once.

use crate::board::Board;
use crate::gravity::GravityClock;
use crate::scoring::{Record, Score};
use crate::snapshot::GameSnapshot;
use crate::types::InputSnapshot;

/// What a tick produced, for the host to forward to display and persistence
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct TickOutcome {
    pub lines_cleared: u32,
    /// The spawn was blocked: the game ended and the board has been reset.
    pub spawn_failed: bool,
    /// Set when the finished game beat the stored best score.
    pub new_record: Option<Record>,
}

/// Complete game state
#[derive(Debug, Clone)]
pub struct Game {
    board: Board,
    gravity: GravityClock,
    score: Score,
    player: String,
    paused: bool,
    prev_input: InputSnapshot,
    games_played: u32,
}

impl Game {
    /// Create a new game.
    ///
    /// `record` is the best score loaded by the host; `player` is the name
    /// written into a record this session sets.
    pub fn new(seed: u32, record: Record, player: impl Into<String>) -> Self {
        Self::with_board(Board::new(seed), record, player)
    }

    /// Start from a prepared board
    pub fn with_board(board: Board, record: Record, player: impl Into<String>) -> Self {
        Self {
            board,
            gravity: GravityClock::new(),
            score: Score::new(record),
            player: player.into(),
            paused: false,
            prev_input: InputSnapshot::default(),
            games_played: 0,
        }
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn gravity(&self) -> &GravityClock {
        &self.gravity
    }

    pub fn score(&self) -> &Score {
        &self.score
    }

    pub fn paused(&self) -> bool {
        self.paused
    }

    pub fn games_played(&self) -> u32 {
        self.games_played
    }

    /// Advance the simulation by one step
    pub fn tick(&mut self, input: InputSnapshot) -> TickOutcome {
        let pause_toggled = input.pause_released(&self.prev_input);
        self.prev_input = input;
        if pause_toggled {
            self.paused = !self.paused;
            log::info!("{}", if self.paused { "paused" } else { "resumed" });
        }
        if self.paused {
            return TickOutcome::default();
        }

        let mut lines = 0;

        if self.board.locate_active_piece().is_none() {
            lines += self.board.clear_completed_lines();
            if !self.board.spawn_piece() {
                self.award(lines);
                return self.game_over(lines);
            }
        }

        if input.move_left {
            self.board.attempt_translate(-1, 0);
        }
        if input.move_right {
            self.board.attempt_translate(1, 0);
        }
        if input.soft_drop {
            lines += self.board.move_down().lines_cleared;
        }
        if input.rotate {
            self.board.rotate_active_piece();
        }

        if self.gravity.advance() {
            lines += self.board.move_down().lines_cleared;
        }

        self.award(lines);
        TickOutcome {
            lines_cleared: lines,
            ..TickOutcome::default()
        }
    }

    fn award(&mut self, lines: u32) {
        if lines == 0 {
            return;
        }
        let points = self.score.add_lines(lines);
        self.gravity.on_lines_cleared(lines);
        log::debug!(
            "cleared {lines} line(s) for {points} points, speed now {:.3}",
            self.gravity.speed()
        );
    }

    fn game_over(&mut self, lines: u32) -> TickOutcome {
        let final_score = self.score.value();
        let new_record = self.score.finish_game(&self.player);
        self.games_played = self.games_played.wrapping_add(1);
        log::info!(
            "game over: score {final_score}, best {} ({})",
            self.score.record().score,
            self.score.record().player
        );

        self.board.reset();
        self.gravity.reset();

        TickOutcome {
            lines_cleared: lines,
            spawn_failed: true,
            new_record,
        }
    }

    pub fn snapshot_into(&self, out: &mut GameSnapshot) {
        out.grid.iter_mut().zip(self.board.grid().rows()).for_each(|(dst, src)| {
            dst.copy_from_slice(src);
        });
        out.score = self.score.value();
        out.level = self.gravity.level();
        out.speed_milli = self.gravity.speed_milli();
        out.record_score = self.score.record().score;
        if out.record_player != self.score.record().player {
            out.record_player.clone_from(&self.score.record().player);
        }
        out.paused = self.paused;
        out.games_played = self.games_played;
    }

    pub fn snapshot(&self) -> GameSnapshot {
        let mut s = GameSnapshot::default();
        self.snapshot_into(&mut s);
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::types::{Cell, PieceKind};

    const IDLE: InputSnapshot = InputSnapshot {
        move_left: false,
        move_right: false,
        soft_drop: false,
        rotate: false,
        pause: false,
        quit: false,
    };

    fn active_cells(game: &Game) -> Vec<(i8, i8)> {
        game.board().grid().active_positions().collect()
    }

    #[test]
    fn test_first_tick_spawns_a_piece() {
        let mut game = Game::new(12345, Record::default(), "Tester");
        assert!(active_cells(&game).is_empty());
        let outcome = game.tick(IDLE);
        assert_eq!(outcome, TickOutcome::default());
        assert_eq!(active_cells(&game).len(), 4);
    }

    #[test]
    fn test_pause_toggles_on_release() {
        let mut game = Game::new(1, Record::default(), "Tester");
        game.tick(IDLE);

        let held = InputSnapshot {
            pause: true,
            ..IDLE
        };
        game.tick(held);
        assert!(!game.paused(), "press alone must not toggle");
        game.tick(held);
        assert!(!game.paused());
        game.tick(IDLE);
        assert!(game.paused(), "release toggles");

        let before = game.board().grid().clone();
        for _ in 0..30 {
            game.tick(InputSnapshot {
                soft_drop: true,
                ..IDLE
            });
        }
        assert_eq!(game.board().grid(), &before, "paused game must not move");

        game.tick(held);
        game.tick(IDLE);
        assert!(!game.paused());
    }

    #[test]
    fn test_held_left_moves_every_tick() {
        let mut game = Game::new(3, Record::default(), "Tester");
        game.tick(IDLE);
        let x0 = game.board.locate_active_piece().unwrap().x;
        game.tick(InputSnapshot {
            move_left: true,
            ..IDLE
        });
        assert_eq!(game.board.locate_active_piece().unwrap().x, x0 - 1);
    }

    #[test]
    fn test_gravity_drops_piece_after_ten_ticks() {
        let mut game = Game::new(5, Record::default(), "Tester");
        game.tick(IDLE);
        let y0 = game.board.locate_active_piece().unwrap().y;
        // First tick already advanced gravity once.
        for _ in 0..8 {
            game.tick(IDLE);
        }
        assert_eq!(game.board.locate_active_piece().unwrap().y, y0);
        game.tick(IDLE);
        assert_eq!(game.board.locate_active_piece().unwrap().y, y0 + 1);
    }

    #[test]
    fn test_line_clear_scores_and_speeds_up() {
        let grid = Grid::from_rows(&["####.#####"], PieceKind::J);
        let mut board = Board::from_grid(grid, 9);
        // Vertical I (rotation 1) covers column anchor+2; anchor 2 -> column 4.
        assert!(board.spawn_kind(PieceKind::I));
        assert!(board.rotate_active_piece());
        assert!(board.attempt_translate(-1, 0));
        let mut game = Game::with_board(board, Record::default(), "Tester");

        let drop = InputSnapshot {
            soft_drop: true,
            ..IDLE
        };
        let mut total = 0;
        for _ in 0..40 {
            let outcome = game.tick(drop);
            total += outcome.lines_cleared;
            if total > 0 {
                break;
            }
        }
        assert_eq!(total, 1);
        assert_eq!(game.score().value(), 10);
        assert_eq!(game.gravity().speed_milli(), 105);
        // Remaining I cells sit in column 4 above the cleared row.
        assert_eq!(game.board().grid().get(4, 19), Cell::Locked(PieceKind::I));
    }

    /// Locked cells across the spawn row, blocking every spawn shape
    fn blocked_spawn_board() -> Board {
        let mut grid = Grid::new();
        for x in 2..7 {
            grid.set(x, 0, Cell::Locked(PieceKind::Z));
        }
        Board::from_grid(grid, 2)
    }

    #[test]
    fn test_blocked_spawn_ends_game_and_reports_record() {
        let mut game = Game::with_board(blocked_spawn_board(), Record::new("Old", 0), "Tester");
        game.score.add_lines(1);

        let outcome = game.tick(IDLE);
        assert!(outcome.spawn_failed);
        assert_eq!(outcome.new_record, Some(Record::new("Tester", 10)));
        assert_eq!(game.score().value(), 0);
        assert_eq!(game.score().record().score, 10);
        assert_eq!(game.board().grid(), &Grid::new());
        assert_eq!(game.games_played(), 1);

        // The next tick starts a fresh game.
        let outcome = game.tick(IDLE);
        assert!(!outcome.spawn_failed);
        assert_eq!(active_cells(&game).len(), 4);
    }

    #[test]
    fn test_game_over_without_new_record() {
        let mut game = Game::with_board(blocked_spawn_board(), Record::new("Old", 500), "Tester");
        let outcome = game.tick(IDLE);
        assert!(outcome.spawn_failed);
        assert_eq!(outcome.new_record, None);
        assert_eq!(game.score().record(), &Record::new("Old", 500));
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let mut game = Game::new(11, Record::new("Best", 99), "Tester");
        game.tick(IDLE);
        let snap = game.snapshot();
        let active = snap
            .grid
            .iter()
            .flatten()
            .filter(|cell| cell.is_active())
            .count();
        assert_eq!(active, 4);
        assert_eq!(snap.record_player, "Best");
        assert_eq!(snap.record_score, 99);
        assert_eq!(snap.level, 1);
        assert!(!snap.paused);
    }
}
