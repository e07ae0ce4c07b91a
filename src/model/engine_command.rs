use crate::model::Difficulty;

/// Commands issued by the presentation layer into the round engine.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Start a fresh round, optionally switching tier first.
    NewGame(Option<Difficulty>),
    Guess(i64),
    RequestHint,
    /// Select the tier for subsequent rounds; restarts immediately if a
    /// round is in progress.
    ChangeDifficulty(Difficulty),
}
