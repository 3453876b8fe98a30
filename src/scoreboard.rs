//! Score leaderboard
//!
//! Persisted as a plain text file, one score per line, best first.
//! Tracks the top 10 scores.

use std::io;
use std::path::Path;

/// Maximum number of scores to keep
pub const MAX_SCORES: usize = 10;
/// Placeholder entries for a fresh board
pub const DEFAULT_SCORES: usize = 5;

/// Score leaderboard, sorted descending
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScoreBoard {
    pub scores: Vec<u32>,
}

impl Default for ScoreBoard {
    fn default() -> Self {
        Self {
            scores: vec![0; DEFAULT_SCORES],
        }
    }
}

impl ScoreBoard {
    /// Parse file contents. Any malformed line rejects the whole file;
    /// entries are sorted on load so a hand-edited file still behaves.
    pub fn parse(data: &str) -> Option<Self> {
        let mut scores = Vec::new();
        for line in data.lines() {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            scores.push(line.parse::<u32>().ok()?);
        }
        scores.sort_unstable_by(|a, b| b.cmp(a));
        scores.truncate(MAX_SCORES);
        Some(Self { scores })
    }

    /// Load the board from `path`, falling back to defaults when the
    /// file is missing or unreadable
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(data) => match Self::parse(&data) {
                Some(board) => {
                    log::info!("loaded {} scores from {}", board.scores.len(), path.display());
                    board
                }
                None => {
                    log::warn!("malformed score file {}, starting fresh", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no score file at {}, starting fresh", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("could not read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Insert a score at its sorted position.
    /// Returns the rank achieved (1-indexed) or None if the board is
    /// full and the score does not place.
    pub fn append(&mut self, score: u32) -> Option<usize> {
        let pos = self.scores.iter().position(|&s| score > s);
        let rank = match pos {
            Some(i) => {
                self.scores.insert(i, score);
                i + 1
            }
            None => {
                if self.scores.len() >= MAX_SCORES {
                    return None;
                }
                self.scores.push(score);
                self.scores.len()
            }
        };
        self.scores.truncate(MAX_SCORES);
        Some(rank)
    }

    /// The best score (if any)
    pub fn top(&self) -> Option<u32> {
        self.scores.first().copied()
    }

    /// Serialize to the newline-delimited file format
    pub fn to_file_format(&self) -> String {
        let mut out = String::new();
        for score in &self.scores {
            out.push_str(&score.to_string());
            out.push('\n');
        }
        out
    }

    /// Write the board to `path`
    pub fn save(&self, path: &Path) -> io::Result<()> {
        std::fs::write(path, self.to_file_format())?;
        log::info!("saved {} scores to {}", self.scores.len(), path.display());
        Ok(())
    }
}
