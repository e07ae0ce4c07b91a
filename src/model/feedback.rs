use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Direction {
    Higher,
    Lower,
}

/// Classification of a wrong guess by its normalized distance from the
/// secret: `|guess - secret| / (max - min)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Proximity {
    /// Ratio <= 0.05
    VeryClose,
    /// Ratio <= 0.15
    Close,
    /// Anything wider; `far` is set above 0.5.
    Directional { far: bool },
}

impl Proximity {
    pub fn classify(guess: i64, secret: i64, span: i64) -> Proximity {
        let ratio = (guess - secret).abs() as f64 / span as f64;
        if ratio <= 0.05 {
            Proximity::VeryClose
        } else if ratio <= 0.15 {
            Proximity::Close
        } else {
            Proximity::Directional { far: ratio > 0.5 }
        }
    }
}
