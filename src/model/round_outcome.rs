use std::time::Duration;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::model::Difficulty;

/// Immutable summary of a finished round. This is what the persistence
/// subscriber consumes; the engine itself never touches storage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RoundOutcome {
    pub round_id: Uuid,
    pub difficulty: Difficulty,
    pub won: bool,
    pub attempts: u32,
    pub elapsed: Duration,
    /// Display score, already clamped at zero.
    pub score: i64,
    pub secret_number: i64,
    pub timestamp: DateTime<Utc>,
}
