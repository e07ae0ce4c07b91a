use crate::model::{Difficulty, Direction, EngineError, Hint, PlayerStats, Proximity, RoundOutcome};

/// Domain events emitted by the round engine. The presentation layer renders
/// them; the stats recorder persists the terminal ones.
#[derive(Debug, Clone)]
pub enum EngineEvent {
    RoundStarted {
        difficulty: Difficulty,
    },
    GuessFeedback {
        guess: i64,
        direction: Direction,
        proximity: Proximity,
    },
    RoundWon {
        outcome: RoundOutcome,
        streak: u32,
    },
    RoundLost {
        outcome: RoundOutcome,
    },
    HintGiven {
        /// 1-based position on the hint ladder.
        hint_index: u32,
        hint: Hint,
        score: i64,
    },
    DifficultyChanged {
        difficulty: Difficulty,
    },
    /// A channel-dispatched command failed its preconditions; round state is
    /// unchanged.
    CommandRejected(EngineError),
}

/// Emitted by the stats recorder after a round outcome has been applied.
#[derive(Debug, Clone)]
pub enum StatsEvent {
    StatsUpdated(PlayerStats),
}
