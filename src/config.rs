//! Runtime configuration, read from the environment.

use std::path::PathBuf;
use std::time::{SystemTime, UNIX_EPOCH};

use crate::types::DEFAULT_PLAYER;

pub const DEFAULT_RECORD_PATH: &str = "record.dat";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameConfig {
    /// Best-score file, created at startup if missing
    pub record_path: PathBuf,
    /// Name stored with a new best score
    pub player: String,
    pub seed: u32,
    /// Log file; logging is off when unset
    pub log_path: Option<PathBuf>,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            record_path: PathBuf::from(DEFAULT_RECORD_PATH),
            player: DEFAULT_PLAYER.to_string(),
            seed: clock_seed(),
            log_path: None,
        }
    }
}

impl GameConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build from any key lookup. Blank values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let get = |key: &str| {
            lookup(key)
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
        };

        let record_path = get("BLOCKFALL_RECORD_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_RECORD_PATH));
        let player = get("BLOCKFALL_PLAYER").unwrap_or_else(|| DEFAULT_PLAYER.to_string());
        let seed = get("BLOCKFALL_SEED")
            .and_then(|s| s.parse().ok())
            .unwrap_or_else(clock_seed);
        let log_path = get("BLOCKFALL_LOG_PATH").map(PathBuf::from);

        Self {
            record_path,
            player,
            seed,
            log_path,
        }
    }
}

fn clock_seed() -> u32 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.subsec_nanos() ^ d.as_secs() as u32)
        .unwrap_or(1)
}
