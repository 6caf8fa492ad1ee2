//! Read-only view of a game for rendering.
//!
//! The host copies the game into a snapshot once per tick and draws from it,
//! so the renderer never touches the live grid.

use crate::types::{
    Cell, BOARD_HEIGHT, BOARD_WIDTH, DEFAULT_PLAYER, GRAVITY_SCALE, INITIAL_SPEED_MILLI,
};

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct GameSnapshot {
    /// Grid rows top to bottom, including the falling piece's active cells
    pub grid: [[Cell; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
    pub score: u32,
    pub level: u32,
    pub speed_milli: u32,
    pub record_player: String,
    pub record_score: u32,
    pub paused: bool,
    pub games_played: u32,
}

impl GameSnapshot {
    /// Color-id view of the grid (0 = empty), for hosts that pick block
    /// colors from a palette lookup
    pub fn color_ids(&self) -> [[u8; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize] {
        self.grid
            .map(|row| row.map(|cell| cell.kind().map_or(0, |kind| kind.color_id())))
    }
}

impl Default for GameSnapshot {
    fn default() -> Self {
        Self {
            grid: [[Cell::Empty; BOARD_WIDTH as usize]; BOARD_HEIGHT as usize],
            score: 0,
            level: INITIAL_SPEED_MILLI * 10 / GRAVITY_SCALE,
            speed_milli: INITIAL_SPEED_MILLI,
            record_player: DEFAULT_PLAYER.to_string(),
            record_score: 0,
            paused: false,
            games_played: 0,
        }
    }
}
