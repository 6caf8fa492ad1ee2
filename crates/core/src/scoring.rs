//! Scoring module - line-clear points and the best-score record
//!
//! Points for clearing `n` lines in one tick are `ceil(2.5 * n * (n + 3))`,
//! which rewards multi-line clears super-linearly:
//!
//! | Lines | Points |
//! |-------|--------|
//! | 1 | 10 |
//! | 2 | 25 |
//! | 3 | 45 |
//! | 4 | 70 |
//!
//! The best-score record is an explicit value owned by [`Score`]; the host
//! persists it whenever [`Score::finish_game`] reports a new one.

use crate::types::DEFAULT_PLAYER;

/// Points for clearing `lines` rows in a single tick.
///
/// Integer form of `ceil(5 * n * (n + 3) / 2)`.
///
/// ```
/// use blockfall_core::scoring::line_clear_points;
///
/// assert_eq!(line_clear_points(0), 0);
/// assert_eq!(line_clear_points(1), 10);
/// assert_eq!(line_clear_points(4), 70);
/// ```
pub fn line_clear_points(lines: u32) -> u32 {
    let n = lines;
    (5 * n * (n + 3)).div_ceil(2)
}

/// Best score and the player who set it
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Record {
    pub player: String,
    pub score: u32,
}

impl Record {
    /// Line breaks in `player` become spaces; the record file keeps the name
    /// on a single line.
    pub fn new(player: impl Into<String>, score: u32) -> Self {
        let mut player = player.into();
        if player.contains(LINE_BREAKS) {
            player = player.replace(LINE_BREAKS, " ");
        }
        Self { player, score }
    }
}

const LINE_BREAKS: &[char] = &['\r', '\n'];

impl Default for Record {
    fn default() -> Self {
        Self::new(DEFAULT_PLAYER, 0)
    }
}

/// Score of the current run plus the best-score record
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct Score {
    value: u32,
    record: Record,
}

impl Score {
    pub fn new(record: Record) -> Self {
        Self { value: 0, record }
    }

    /// Current run's score
    pub fn value(&self) -> u32 {
        self.value
    }

    pub fn record(&self) -> &Record {
        &self.record
    }

    /// Add the points for `lines` cleared this tick; returns the points added.
    pub fn add_lines(&mut self, lines: u32) -> u32 {
        let points = line_clear_points(lines);
        self.value = self.value.saturating_add(points);
        points
    }

    /// End the current run.
    ///
    /// If the run beat the stored best (strictly), the record is replaced with
    /// `player` and the run's score, and the new record is returned so the
    /// host can persist it. The run score then resets to zero either way.
    pub fn finish_game(&mut self, player: &str) -> Option<Record> {
        let beaten = self.value > self.record.score;
        if beaten {
            self.record = Record::new(player, self.value);
        }
        self.value = 0;
        beaten.then(|| self.record.clone())
    }
}
