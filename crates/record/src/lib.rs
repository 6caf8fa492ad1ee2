//! Best-score record file.
//!
//! Plain text, two lines:
//!
//! ```text
//! <player-name>
//! <integer-score>
//! ```
//!
//! Loading never fails: a missing, unreadable or malformed file yields the
//! defaults (`"Player 1"`, `0`) field by field, and the problem is logged.
//! Saving returns an error for the host to log; a failed save never stops
//! the game.

use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::Path;

use anyhow::{Context, Result};

pub use blockfall_core::Record;

/// Create an empty record file if none exists yet.
pub fn ensure_exists(path: &Path) -> Result<()> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .with_context(|| format!("creating record file {}", path.display()))?;
    Ok(())
}

/// Load the record, falling back to defaults for anything missing or invalid.
pub fn load(path: &Path) -> Record {
    match fs::read_to_string(path) {
        Ok(text) => parse(&text),
        Err(e) => {
            log::warn!("record file {} unreadable: {e}", path.display());
            Record::default()
        }
    }
}

/// Parse record text.
///
/// Line 1 is the player name, taken as written; an absent or blank line keeps
/// the default name.
/// Line 2 is the score; if it does not parse the default of 0 is kept.
pub fn parse(text: &str) -> Record {
    let mut record = Record::default();
    let mut lines = text.lines();

    if let Some(name) = lines
        .next()
        .map(|s| s.strip_suffix('\r').unwrap_or(s))
        .filter(|s| !s.trim().is_empty())
    {
        record.player = name.to_string();
    }

    match lines.next().map(str::trim) {
        Some(raw) => match raw.parse::<u32>() {
            Ok(score) => record.score = score,
            Err(e) => log::warn!("record score {raw:?} ignored: {e}"),
        },
        None => log::debug!("record file has no score line"),
    }

    record
}

/// Render a record in file format.
///
/// Line breaks in the name are written as spaces so the score stays on line 2.
pub fn format(record: &Record) -> String {
    let player = record.player.replace(&['\r', '\n'][..], " ");
    format!("{player}\n{}\n", record.score)
}

/// Write the record, replacing the file's contents.
pub fn save(path: &Path, record: &Record) -> Result<()> {
    let mut file = fs::File::create(path)
        .with_context(|| format!("opening record file {}", path.display()))?;
    file.write_all(format(record).as_bytes())
        .with_context(|| format!("writing record file {}", path.display()))?;
    file.flush()?;
    log::info!(
        "saved record {} ({}) to {}",
        record.score,
        record.player,
        path.display()
    );
    Ok(())
}
