use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};

use crate::snake::Snake;

/// Persistent storage of a single integer per path.
pub trait ScoreStore {
    fn read_int(&self, path: &Path) -> Option<u32>;
    fn write_int(&mut self, path: &Path, value: u32) -> Result<()>;
}

// Persistent storage
#[derive(Serialize, Deserialize, Default)]
#[serde(default)]
struct SaveData {
    best_score: u32,
}

/// Stores the value as a small JSON document.
#[derive(Debug, Default)]
pub struct JsonFileStore;

impl ScoreStore for JsonFileStore {
    fn read_int(&self, path: &Path) -> Option<u32> {
        let text = match fs::read_to_string(path) {
            Ok(text) => text,
            Err(err) => {
                log::debug!("no saved score at {}: {err}", path.display());
                return None;
            }
        };
        match serde_json::from_str::<SaveData>(&text) {
            Ok(data) => Some(data.best_score),
            Err(err) => {
                log::warn!("ignoring corrupt score file {}: {err}", path.display());
                None
            }
        }
    }

    fn write_int(&mut self, path: &Path, value: u32) -> Result<()> {
        if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
            fs::create_dir_all(dir)
                .with_context(|| format!("creating directory {}", dir.display()))?;
        }
        let text = serde_json::to_string_pretty(&SaveData { best_score: value })?;
        fs::write(path, text).with_context(|| format!("writing {}", path.display()))?;
        Ok(())
    }
}

/// Best score across runs. The in-memory value is authoritative for the
/// session even when a write fails.
#[derive(Debug)]
pub struct HighScore {
    best: u32,
    path: PathBuf,
}

impl HighScore {
    pub fn load(store: &impl ScoreStore, path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let best = store.read_int(&path).unwrap_or(0);
        log::info!("best score {best} (from {})", path.display());
        Self { best, path }
    }

    pub fn best(&self) -> u32 {
        self.best
    }

    /// Records the result of a finished round. Returns `true` when the score
    /// beat the stored best; only then is a write requested.
    pub fn finalize(&mut self, score: u32, store: &mut impl ScoreStore) -> bool {
        if score <= self.best {
            return false;
        }
        log::info!("new best score {score} (was {})", self.best);
        self.best = score;
        if let Err(err) = store.write_int(&self.path, score) {
            log::warn!("could not save best score: {err:#}");
        }
        true
    }
}

/// Awards standard food: points plus growth.
pub fn on_food_consumed(snake: &mut Snake, reward: u32) {
    snake.add_score(reward);
    snake.grow(1);
}

/// Awards bonus food: points only.
pub fn on_bonus_consumed(snake: &mut Snake, reward: u32) {
    snake.add_score(reward);
}

/// One-shot bonus trigger per score milestone.
#[derive(Debug)]
pub struct BonusTrigger {
    milestone: u32,
    last_fired: u32,
}

impl BonusTrigger {
    pub fn new(milestone: u32) -> Self {
        Self { milestone, last_fired: 0 }
    }

    pub fn reset(&mut self) {
        self.last_fired = 0;
    }

    /// Fires when `score` is a positive multiple of the milestone that has
    /// not fired yet and no bonus is on the board.
    pub fn maybe_activate(&mut self, score: u32, bonus_active: bool) -> bool {
        if bonus_active || score == 0 || score % self.milestone != 0 || score == self.last_fired {
            return false;
        }
        self.last_fired = score;
        true
    }
}
