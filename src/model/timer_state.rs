use std::time::{Duration, SystemTime};

/// Wall-clock span of one round. Time is always passed in by the caller (via
/// the engine's injected clock) so tests can pin it.
#[derive(Debug, Clone, PartialEq)]
pub struct TimerState {
    pub started: SystemTime,
    pub ended: Option<SystemTime>,
}

impl TimerState {
    pub fn started_at(now: SystemTime) -> Self {
        Self {
            started: now,
            ended: None,
        }
    }

    pub fn ended(&self, now: SystemTime) -> TimerState {
        let mut new_state = self.clone();
        new_state.ended = Some(now);
        new_state
    }

    pub fn is_running(&self) -> bool {
        self.ended.is_none()
    }

    /// Elapsed time at `now`, frozen at the end timestamp once the round is
    /// over. A pure read; safe for the periodic display tick.
    pub fn elapsed(&self, now: SystemTime) -> Duration {
        self.ended
            .unwrap_or(now)
            .duration_since(self.started)
            .unwrap_or(Duration::default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_elapsed_while_running() {
        let start = SystemTime::UNIX_EPOCH;
        let timer = TimerState::started_at(start);
        assert_eq!(
            timer.elapsed(start + Duration::from_secs(5)),
            Duration::from_secs(5)
        );
    }

    #[test]
    fn test_elapsed_freezes_once_ended() {
        let start = SystemTime::UNIX_EPOCH;
        let timer = TimerState::started_at(start).ended(start + Duration::from_secs(10));
        assert!(!timer.is_running());
        assert_eq!(
            timer.elapsed(start + Duration::from_secs(60)),
            Duration::from_secs(10)
        );
    }

    #[test]
    fn test_elapsed_never_goes_negative() {
        let start = SystemTime::UNIX_EPOCH + Duration::from_secs(100);
        let timer = TimerState::started_at(start);
        assert_eq!(timer.elapsed(SystemTime::UNIX_EPOCH), Duration::default());
    }
}
