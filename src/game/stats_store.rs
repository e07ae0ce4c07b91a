use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, warn};
use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, PlayerStats, RoundOutcome, StorageError};

const STATS_FILE: &str = "stats.json";
const HISTORY_FILE: &str = "history.json";
const BEST_SCORES_FILE: &str = "best_scores.json";

const CURRENT_VERSION: u32 = 2;
const HISTORY_CAP: usize = 100;

/// Per-tier personal best, only ever replaced by a strictly higher score.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BestScore {
    pub score: i64,
    pub date: DateTime<Utc>,
    pub attempts: u32,
    pub elapsed: Duration,
}

/// The stats blob is wrapped in a version tag on disk so the layout can
/// change without stranding old installs.
#[derive(Debug, Serialize, Deserialize)]
struct StatsBlob {
    version: u32,
    stats: serde_json::Value,
}

/// File-backed store for player statistics, round history and best scores.
/// Missing or corrupt data is never an error: it degrades to defaults. A
/// failed write prunes history and retries once before giving up, and even
/// then gameplay continues in memory.
#[derive(Debug)]
pub struct StatsStore {
    data_dir: PathBuf,
    stats: PlayerStats,
    history: Vec<RoundOutcome>,
    best_scores: HashMap<Difficulty, BestScore>,
}

impl StatsStore {
    pub fn new() -> Self {
        let data_dir = dirs::data_local_dir()
            .unwrap_or_else(std::env::temp_dir)
            .join("secret-number");
        Self::with_data_dir(data_dir)
    }

    pub fn with_data_dir(data_dir: PathBuf) -> Self {
        if let Err(error) = fs::create_dir_all(&data_dir) {
            warn!(
                target: "stats_store",
                "Could not create {:?}: {}; continuing in memory", data_dir, error
            );
        }

        let mut store = Self {
            data_dir,
            stats: PlayerStats::default(),
            history: Vec::new(),
            best_scores: HashMap::new(),
        };
        store.load_all();
        store
    }

    pub fn stats(&self) -> &PlayerStats {
        &self.stats
    }

    pub fn history(&self, limit: usize) -> &[RoundOutcome] {
        &self.history[..limit.min(self.history.len())]
    }

    pub fn best_score(&self, difficulty: Difficulty) -> Option<&BestScore> {
        self.best_scores.get(&difficulty)
    }

    /// Folds a finished round into stats, history and best scores, then
    /// persists. Call exactly once per round.
    pub fn record(&mut self, outcome: &RoundOutcome) -> Result<&PlayerStats, StorageError> {
        self.stats = self.stats.record_outcome(outcome);

        // newest first, bounded
        self.history.insert(0, outcome.clone());
        self.history.truncate(HISTORY_CAP);

        if outcome.won {
            let beats_existing = self
                .best_scores
                .get(&outcome.difficulty)
                .map(|best| outcome.score > best.score)
                .unwrap_or(true);
            if beats_existing {
                info!(
                    target: "stats_store",
                    "New best score on {}: {}", outcome.difficulty, outcome.score
                );
                self.best_scores.insert(
                    outcome.difficulty,
                    BestScore {
                        score: outcome.score,
                        date: outcome.timestamp,
                        attempts: outcome.attempts,
                        elapsed: outcome.elapsed,
                    },
                );
            }
        }

        self.save()?;
        Ok(&self.stats)
    }

    /// Writes all files; on failure prunes the history log to half the cap
    /// and retries once.
    pub fn save(&mut self) -> Result<(), StorageError> {
        if let Err(error) = self.try_save() {
            warn!(
                target: "stats_store",
                "Save failed ({}); pruning history and retrying", error
            );
            self.history.truncate(HISTORY_CAP / 2);
            self.try_save().map_err(|_| StorageError::QuotaExceeded)?;
        }
        Ok(())
    }

    fn try_save(&self) -> Result<(), StorageError> {
        let blob = StatsBlob {
            version: CURRENT_VERSION,
            stats: serde_json::to_value(&self.stats)?,
        };
        self.write_json(STATS_FILE, &blob)?;
        self.write_json(HISTORY_FILE, &self.history)?;
        self.write_json(BEST_SCORES_FILE, &self.best_scores)?;
        Ok(())
    }

    fn write_json<T: Serialize>(&self, file: &str, value: &T) -> Result<(), StorageError> {
        let contents = serde_json::to_string_pretty(value)?;
        fs::write(self.data_dir.join(file), contents)?;
        Ok(())
    }

    fn load_all(&mut self) {
        if let Some(contents) = self.read_file(STATS_FILE) {
            match parse_stats(&contents) {
                Some(stats) => self.stats = stats,
                None => {
                    warn!(
                        target: "stats_store",
                        "Unreadable stats blob; starting from defaults"
                    );
                }
            }
        }
        if let Some(contents) = self.read_file(HISTORY_FILE) {
            if let Ok(history) = serde_json::from_str::<Vec<RoundOutcome>>(&contents) {
                self.history = history;
                self.history.truncate(HISTORY_CAP);
            }
        }
        if let Some(contents) = self.read_file(BEST_SCORES_FILE) {
            if let Ok(best_scores) = serde_json::from_str(&contents) {
                self.best_scores = best_scores;
            }
        }
    }

    fn read_file(&self, file: &str) -> Option<String> {
        fs::read_to_string(self.data_dir.join(file)).ok()
    }
}

/// Parses and migrates a versioned stats blob. Anything unrecognized maps to
/// `None`; the caller falls back to defaults instead of failing.
fn parse_stats(contents: &str) -> Option<PlayerStats> {
    let blob: StatsBlob = serde_json::from_str(contents).ok()?;
    let blob = migrate(blob)?;
    serde_json::from_value(blob.stats).ok()
}

/// Pure schema migration, stepping one version at a time up to current.
fn migrate(mut blob: StatsBlob) -> Option<StatsBlob> {
    loop {
        match blob.version {
            1 => {
                // v1 kept total_time as integer milliseconds
                if let Some(millis) = blob.stats.get("total_time").and_then(|v| v.as_u64()) {
                    blob.stats["total_time"] =
                        serde_json::to_value(Duration::from_millis(millis)).ok()?;
                }
                blob.version = 2;
            }
            CURRENT_VERSION => return Some(blob),
            _ => return None,
        }
    }
}
