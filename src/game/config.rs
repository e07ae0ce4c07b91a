use std::time::Duration;

/// Scoring constants. Thresholds live here, not in engine logic, so the
/// engine only ever asks "what bonus for this elapsed time / streak".
#[derive(Debug, Clone)]
pub struct ScoringConfig {
    pub base_score: i64,
    pub penalty_per_attempt: i64,
    /// Sorted ascending by threshold; the first bucket the elapsed time fits
    /// under wins.
    pub time_bonuses: Vec<(Duration, i64)>,
    /// Every threshold the streak meets pays out, additively. Intentional:
    /// a 10-streak collects the 3, 5 and 10 bonuses at once.
    pub streak_bonuses: Vec<(u32, i64)>,
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            base_score: 1000,
            penalty_per_attempt: 50,
            time_bonuses: vec![
                (Duration::from_secs(10), 500),
                (Duration::from_secs(30), 300),
                (Duration::from_secs(60), 100),
            ],
            streak_bonuses: vec![(3, 200), (5, 500), (10, 1000)],
        }
    }
}

impl ScoringConfig {
    pub fn time_bonus(&self, elapsed: Duration) -> i64 {
        self.time_bonuses
            .iter()
            .find(|(threshold, _)| elapsed < *threshold)
            .map(|(_, bonus)| *bonus)
            .unwrap_or(0)
    }

    pub fn streak_bonus(&self, streak: u32) -> i64 {
        self.streak_bonuses
            .iter()
            .filter(|(threshold, _)| streak >= *threshold)
            .map(|(_, bonus)| *bonus)
            .sum()
    }
}

#[derive(Debug, Clone)]
pub struct HintConfig {
    pub max_hints: u32,
    pub hint_cost: i64,
    /// Candidates for the divisibility hint, filtered per tier to those
    /// smaller than the range span.
    pub divisor_candidates: Vec<i64>,
}

impl Default for HintConfig {
    fn default() -> Self {
        Self {
            max_hints: 3,
            hint_cost: 100,
            divisor_candidates: vec![3, 5, 7, 11],
        }
    }
}

/// Easter egg: occasionally the secret is drawn from a fixed set of special
/// numbers instead of uniformly.
#[derive(Debug, Clone)]
pub struct EasterEggConfig {
    pub enabled: bool,
    pub probability: f64,
    pub special_numbers: Vec<i64>,
}

impl Default for EasterEggConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            probability: 0.05,
            special_numbers: vec![42, 1337, 2023],
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct GameConfig {
    pub scoring: ScoringConfig,
    pub hints: HintConfig,
    pub easter_eggs: EasterEggConfig,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_time_bonus_buckets() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.time_bonus(Duration::from_secs(5)), 500);
        assert_eq!(scoring.time_bonus(Duration::from_secs(20)), 300);
        assert_eq!(scoring.time_bonus(Duration::from_secs(45)), 100);
        assert_eq!(scoring.time_bonus(Duration::from_secs(90)), 0);
    }

    #[test]
    fn test_streak_bonuses_stack() {
        let scoring = ScoringConfig::default();
        assert_eq!(scoring.streak_bonus(1), 0);
        assert_eq!(scoring.streak_bonus(3), 200);
        assert_eq!(scoring.streak_bonus(5), 700);
        assert_eq!(scoring.streak_bonus(10), 1700);
    }
}
