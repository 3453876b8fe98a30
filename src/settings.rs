//! Player preferences
//!
//! Persisted as JSON next to the score file. Only the paddle skin is
//! configurable; rendering quality belongs to the frontend.

use std::io;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::PADDLE_TOTAL;

/// Game settings/preferences
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct Settings {
    /// Selected paddle skin index, 0..PADDLE_TOTAL
    pub paddle_skin: usize,
}

impl Settings {
    /// Select the next skin. Returns false at the end of the row.
    pub fn cycle_right(&mut self) -> bool {
        if self.paddle_skin + 1 < PADDLE_TOTAL {
            self.paddle_skin += 1;
            true
        } else {
            false
        }
    }

    /// Select the previous skin. Returns false at the start of the row.
    pub fn cycle_left(&mut self) -> bool {
        if self.paddle_skin > 0 {
            self.paddle_skin -= 1;
            true
        } else {
            false
        }
    }

    /// Load settings from `path`, falling back to defaults when the file
    /// is missing, malformed or holds an out-of-range skin
    pub fn load(path: &Path) -> Self {
        match std::fs::read_to_string(path) {
            Ok(json) => match serde_json::from_str::<Settings>(&json) {
                Ok(settings) if settings.paddle_skin < PADDLE_TOTAL => {
                    log::info!("loaded settings from {}", path.display());
                    settings
                }
                Ok(settings) => {
                    log::warn!(
                        "settings skin {} out of range, using defaults",
                        settings.paddle_skin
                    );
                    Self::default()
                }
                Err(err) => {
                    log::warn!("malformed settings file {}: {err}", path.display());
                    Self::default()
                }
            },
            Err(err) if err.kind() == io::ErrorKind::NotFound => {
                log::info!("no settings file at {}, using defaults", path.display());
                Self::default()
            }
            Err(err) => {
                log::warn!("could not read {}: {err}", path.display());
                Self::default()
            }
        }
    }

    /// Write settings to `path`
    pub fn save(&self, path: &Path) -> io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        std::fs::write(path, json)?;
        log::info!("settings saved to {}", path.display());
        Ok(())
    }
}
