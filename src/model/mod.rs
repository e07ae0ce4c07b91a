mod difficulty;
mod engine_command;
mod engine_event;
mod error;
mod feedback;
mod hint;
mod player_stats;
mod round_outcome;
mod round_status;
mod timer_state;

pub use difficulty::Difficulty;
pub use engine_command::EngineCommand;
pub use engine_event::{EngineEvent, StatsEvent};
pub use error::{EngineError, StorageError};
pub use feedback::{Direction, Proximity};
pub use hint::Hint;
pub use player_stats::{DifficultyStats, PlayerStats};
pub use round_outcome::RoundOutcome;
pub use round_status::RoundStatus;
pub use timer_state::TimerState;
