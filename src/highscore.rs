/// Arcade-style high-score table: top ten `{initials, score}` entries,
/// persisted as JSON.

use std::fs;
use std::io::ErrorKind;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::GameError;

pub const MAX_HIGH_SCORES: usize = 10;
const DEFAULT_INITIALS: &str = "AAA";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct HighScoreEntry {
    pub initials: String,
    pub score: u32,
}

/// Always sorted by descending score and never longer than `MAX_HIGH_SCORES`.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct HighScoreTable {
    entries: Vec<HighScoreEntry>,
}

/// Uppercase, letters only, at most three; empty input becomes "AAA".
pub fn normalize_initials(raw: &str) -> String {
    let initials: String = raw
        .chars()
        .map(|c| c.to_ascii_uppercase())
        .filter(|c| c.is_ascii_uppercase())
        .take(3)
        .collect();
    if initials.is_empty() {
        DEFAULT_INITIALS.to_string()
    } else {
        initials
    }
}

impl HighScoreTable {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[HighScoreEntry] {
        &self.entries
    }

    /// Would `score` make it onto the table?
    pub fn qualifies(&self, score: u32) -> bool {
        self.entries.len() < MAX_HIGH_SCORES
            || self.entries.last().map_or(true, |lowest| score > lowest.score)
    }

    /// Insert and return the 0-based rank, or None if the entry fell off the
    /// bottom. Equal scores keep their arrival order.
    pub fn insert(&mut self, initials: &str, score: u32) -> Option<usize> {
        let rank = self.entries.partition_point(|e| e.score >= score);
        if rank >= MAX_HIGH_SCORES {
            return None;
        }
        self.entries.insert(
            rank,
            HighScoreEntry {
                initials: normalize_initials(initials),
                score,
            },
        );
        self.entries.truncate(MAX_HIGH_SCORES);
        Some(rank)
    }

    /// Read a table from disk. A missing file is an empty table; an
    /// unreadable or corrupt one is an error the caller may downgrade.
    pub fn load(path: &Path) -> Result<Self, GameError> {
        let raw = match fs::read_to_string(path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(Self::new()),
            Err(source) => {
                return Err(GameError::HighScoreIo {
                    path: path.to_path_buf(),
                    source,
                })
            }
        };
        let mut table: Self =
            serde_json::from_str(&raw).map_err(|source| GameError::HighScoreFormat {
                path: path.to_path_buf(),
                source,
            })?;
        table.entries.sort_by(|a, b| b.score.cmp(&a.score));
        table.entries.truncate(MAX_HIGH_SCORES);
        Ok(table)
    }

    /// Like [`load`](Self::load), but any failure yields an empty table.
    pub fn load_or_default(path: &Path) -> Self {
        Self::load(path).unwrap_or_else(|e| {
            tracing::warn!(error = %e, "ignoring unreadable high score table");
            Self::new()
        })
    }

    pub fn save(&self, path: &Path) -> Result<(), GameError> {
        let io_err = |source| GameError::HighScoreIo {
            path: path.to_path_buf(),
            source,
        };
        let json = serde_json::to_string_pretty(self).map_err(|source| {
            GameError::HighScoreFormat {
                path: path.to_path_buf(),
                source,
            }
        })?;
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent).map_err(io_err)?;
        }
        fs::write(path, json).map_err(io_err)
    }
}
