use std::ops::RangeInclusive;

use serde::{Deserialize, Serialize};

use crate::model::EngineError;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum Difficulty {
    Easy,
    Medium,
    Hard,
    Expert,
}

impl Default for Difficulty {
    fn default() -> Self {
        Difficulty::Easy
    }
}

impl Difficulty {
    pub fn all() -> Vec<Difficulty> {
        vec![
            Difficulty::Easy,
            Difficulty::Medium,
            Difficulty::Hard,
            Difficulty::Expert,
        ]
    }

    /// Stable identifier used in persisted data and at the command boundary.
    pub fn id(&self) -> &'static str {
        match self {
            Difficulty::Easy => "easy",
            Difficulty::Medium => "medium",
            Difficulty::Hard => "hard",
            Difficulty::Expert => "expert",
        }
    }

    /// Unknown ids are rejected here, at the boundary, so the engine only
    /// ever sees a valid tier.
    pub fn from_id(id: &str) -> Result<Difficulty, EngineError> {
        match id {
            "easy" => Ok(Difficulty::Easy),
            "medium" => Ok(Difficulty::Medium),
            "hard" => Ok(Difficulty::Hard),
            "expert" => Ok(Difficulty::Expert),
            _ => Err(EngineError::InvalidDifficulty(id.to_string())),
        }
    }

    pub fn range(&self) -> RangeInclusive<i64> {
        match self {
            Difficulty::Easy => 1..=10,
            Difficulty::Medium => 1..=100,
            Difficulty::Hard => 1..=1000,
            Difficulty::Expert => 1..=5000,
        }
    }

    pub fn max_attempts(&self) -> u32 {
        match self {
            Difficulty::Easy => 5,
            Difficulty::Medium => 8,
            Difficulty::Hard => 12,
            Difficulty::Expert => 15,
        }
    }

    pub fn score_multiplier(&self) -> i64 {
        match self {
            Difficulty::Easy => 1,
            Difficulty::Medium => 2,
            Difficulty::Hard => 3,
            Difficulty::Expert => 5,
        }
    }

    pub fn span(&self) -> i64 {
        let range = self.range();
        range.end() - range.start()
    }
}

impl std::fmt::Display for Difficulty {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_tier_has_a_sane_range() {
        for difficulty in Difficulty::all() {
            let range = difficulty.range();
            assert!(range.start() < range.end(), "{:?}", difficulty);
            assert!(difficulty.max_attempts() >= 1, "{:?}", difficulty);
            assert!(difficulty.score_multiplier() >= 1, "{:?}", difficulty);
        }
    }

    #[test]
    fn test_id_round_trip() {
        for difficulty in Difficulty::all() {
            assert_eq!(Difficulty::from_id(difficulty.id()).unwrap(), difficulty);
        }
    }

    #[test]
    fn test_unknown_id_is_rejected() {
        assert!(matches!(
            Difficulty::from_id("nightmare"),
            Err(EngineError::InvalidDifficulty(_))
        ));
    }

    #[test]
    fn test_default_is_lowest_tier() {
        assert_eq!(Difficulty::default(), Difficulty::Easy);
    }
}
