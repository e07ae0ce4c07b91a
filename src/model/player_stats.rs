use std::collections::HashMap;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::model::{Difficulty, RoundOutcome};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DifficultyStats {
    pub played: u32,
    pub won: u32,
    pub best_score: i64,
}

/// Lifetime player statistics. Owned by the stats store; the engine only
/// ever produces `RoundOutcome`s that are folded in via `record_outcome`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PlayerStats {
    #[serde(default)]
    pub games_played: u32,
    #[serde(default)]
    pub games_won: u32,
    #[serde(default)]
    pub total_attempts: u64,
    #[serde(default)]
    pub total_time: Duration,
    #[serde(default)]
    pub best_score: i64,
    #[serde(default)]
    pub current_streak: u32,
    #[serde(default)]
    pub longest_streak: u32,
    /// Rounds won on the first guess.
    #[serde(default)]
    pub perfect_games: u32,
    #[serde(default)]
    pub by_difficulty: HashMap<Difficulty, DifficultyStats>,
}

impl PlayerStats {
    /// Folds one terminal round outcome into the stats. Pure: repeated calls
    /// with the same inputs give the same result, and `self` is untouched.
    /// Call it exactly once per finished round or games get double-counted.
    pub fn record_outcome(&self, outcome: &RoundOutcome) -> PlayerStats {
        let mut next = self.clone();
        next.games_played += 1;
        next.total_attempts += outcome.attempts as u64;
        next.total_time += outcome.elapsed;

        if outcome.won {
            next.games_won += 1;
            next.current_streak += 1;
            next.longest_streak = next.longest_streak.max(next.current_streak);
            next.best_score = next.best_score.max(outcome.score);
            if outcome.attempts == 1 {
                next.perfect_games += 1;
            }
        } else {
            next.current_streak = 0;
        }

        let tier = next.by_difficulty.entry(outcome.difficulty).or_default();
        tier.played += 1;
        if outcome.won {
            tier.won += 1;
            tier.best_score = tier.best_score.max(outcome.score);
        }

        next
    }

    pub fn win_rate(&self) -> f64 {
        if self.games_played == 0 {
            return 0.0;
        }
        self.games_won as f64 / self.games_played as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    fn outcome(won: bool, attempts: u32, score: i64) -> RoundOutcome {
        RoundOutcome {
            round_id: Uuid::new_v4(),
            difficulty: Difficulty::Easy,
            won,
            attempts,
            elapsed: Duration::from_secs(12),
            score,
            secret_number: 7,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_win_updates_streak_and_best_score() {
        let stats = PlayerStats::default().record_outcome(&outcome(true, 3, 850));
        assert_eq!(stats.games_played, 1);
        assert_eq!(stats.games_won, 1);
        assert_eq!(stats.current_streak, 1);
        assert_eq!(stats.longest_streak, 1);
        assert_eq!(stats.best_score, 850);
        assert_eq!(stats.by_difficulty[&Difficulty::Easy].won, 1);
    }

    #[test]
    fn test_loss_resets_streak_but_keeps_longest() {
        let mut stats = PlayerStats::default();
        for _ in 0..3 {
            stats = stats.record_outcome(&outcome(true, 2, 500));
        }
        assert_eq!(stats.current_streak, 3);

        stats = stats.record_outcome(&outcome(false, 5, 0));
        assert_eq!(stats.current_streak, 0);
        assert_eq!(stats.longest_streak, 3);
        assert_eq!(stats.games_played, 4);
        assert_eq!(stats.games_won, 3);
    }

    #[test]
    fn test_first_guess_win_counts_as_perfect() {
        let stats = PlayerStats::default().record_outcome(&outcome(true, 1, 1450));
        assert_eq!(stats.perfect_games, 1);
    }

    #[test]
    fn test_record_outcome_is_pure() {
        let prior = PlayerStats::default().record_outcome(&outcome(true, 2, 600));
        let o = outcome(false, 5, 0);
        let a = prior.record_outcome(&o);
        let b = prior.record_outcome(&o);
        assert_eq!(a, b);
        // prior is untouched
        assert_eq!(prior.games_played, 1);
    }

    #[test]
    fn test_invariants_hold() {
        let mut stats = PlayerStats::default();
        let outcomes = [
            outcome(true, 1, 900),
            outcome(false, 5, 0),
            outcome(true, 4, 300),
            outcome(true, 2, 700),
        ];
        for o in &outcomes {
            stats = stats.record_outcome(o);
            assert!(stats.games_won <= stats.games_played);
            assert!(stats.current_streak <= stats.longest_streak);
        }
    }
}
