use thiserror::Error;

/// Engine command failures. All of these are recoverable: the round state is
/// left untouched and the caller turns them into user-facing messaging.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum EngineError {
    #[error("unknown difficulty '{0}'")]
    InvalidDifficulty(String),

    #[error("no round is in progress")]
    RoundNotActive,

    #[error("guess must be between {min} and {max}")]
    GuessOutOfRange { min: i64, max: i64 },

    /// Covers all hint preconditions (round active, hint budget, score to
    /// spend). Callers that want to explain which one failed inspect the
    /// engine's current state.
    #[error("no hint available")]
    HintUnavailable,
}

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(#[from] std::io::Error),

    #[error("storage quota exceeded")]
    QuotaExceeded,

    #[error("failed to serialize persisted data: {0}")]
    Serialization(#[from] serde_json::Error),
}
