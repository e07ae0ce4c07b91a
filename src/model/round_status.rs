/// Round lifecycle. `Won` and `Lost` are terminal; only starting a new game
/// leaves them.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoundStatus {
    NotStarted,
    InProgress,
    Won,
    Lost,
}
