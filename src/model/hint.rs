use serde::{Deserialize, Serialize};

/// Hint ladder content. Each rung depends only on the secret number and how
/// many hints were taken this round, never on the guesses made so far.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Hint {
    /// First hint: whether the secret is even.
    Parity { even: bool },
    /// Second hint: the quartile of the tier range containing the secret.
    Quartile { low: i64, high: i64 },
    /// Third and later hints: divisibility by a small randomly chosen
    /// divisor.
    Divisibility { divisor: i64, divisible: bool },
    /// Fallback when the tier range is too narrow for any divisor.
    Encouragement,
}

impl std::fmt::Display for Hint {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Hint::Parity { even: true } => write!(f, "The number is even!"),
            Hint::Parity { even: false } => write!(f, "The number is odd!"),
            Hint::Quartile { low, high } => {
                write!(f, "The number is between {} and {}!", low, high)
            }
            Hint::Divisibility {
                divisor,
                divisible: true,
            } => write!(f, "The number is divisible by {}!", divisor),
            Hint::Divisibility {
                divisor,
                divisible: false,
            } => write!(f, "The number is NOT divisible by {}!", divisor),
            Hint::Encouragement => write!(f, "You are very close! Keep trying!"),
        }
    }
}
