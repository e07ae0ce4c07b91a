use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use log::{info, trace, warn};
use uuid::Uuid;

use super::clock::Clock;
use super::config::GameConfig;
use super::random::RandomSource;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{
    Difficulty, Direction, EngineCommand, EngineError, EngineEvent, Hint, Proximity, RoundOutcome,
    RoundStatus, TimerState,
};

/// The round state machine. Owns one live round: the secret number, attempt
/// count, score, hint budget and win/loss transition. Commands come in over
/// a channel (or as direct calls), domain events go out over another; it
/// never touches storage or ambient globals.
pub struct RoundEngine {
    difficulty: Difficulty,
    status: RoundStatus,
    secret_number: i64,
    attempts: u32,
    /// Internal running score. May go negative from attempt penalties and
    /// hint costs; everything leaving the engine (events, outcomes, the
    /// `score()` accessor) is clamped at zero.
    score: i64,
    hints_used: u32,
    timer: TimerState,
    /// Consecutive wins, carried across rounds and seeded from persisted
    /// stats at construction. Reset on loss.
    streak: u32,
    round_id: Uuid,
    config: GameConfig,
    random: Box<dyn RandomSource>,
    clock: Rc<dyn Clock>,
    event_emitter: EventEmitter<EngineEvent>,
    command_subscription: Option<Unsubscriber<EngineCommand>>,
}

impl Destroyable for RoundEngine {
    fn destroy(&mut self) {
        if let Some(subscription) = self.command_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl RoundEngine {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        command_observer: EventObserver<EngineCommand>,
        event_emitter: EventEmitter<EngineEvent>,
        config: GameConfig,
        random: Box<dyn RandomSource>,
        clock: Rc<dyn Clock>,
        difficulty: Difficulty,
        initial_streak: u32,
    ) -> Rc<RefCell<Self>> {
        let now = clock.now();
        let engine = Self {
            difficulty,
            status: RoundStatus::NotStarted,
            secret_number: 0,
            attempts: 0,
            score: 0,
            hints_used: 0,
            timer: TimerState::started_at(now),
            streak: initial_streak,
            round_id: Uuid::new_v4(),
            config,
            random,
            clock,
            event_emitter,
            command_subscription: None,
        };
        let refcell = Rc::new(RefCell::new(engine));
        RoundEngine::wire_subscription(refcell.clone(), command_observer);
        refcell
    }

    fn wire_subscription(
        engine: Rc<RefCell<Self>>,
        command_observer: EventObserver<EngineCommand>,
    ) {
        let engine_handler = engine.clone();
        let subscription = command_observer.subscribe(move |command| {
            let mut engine = engine_handler.borrow_mut();
            engine.handle_command(command.clone());
        });
        engine.borrow_mut().command_subscription = Some(subscription);
    }

    fn handle_command(&mut self, command: EngineCommand) {
        trace!(target: "round_engine", "Handling command: {:?}", command);
        let result = match command {
            EngineCommand::NewGame(difficulty) => {
                self.new_game(difficulty);
                Ok(())
            }
            EngineCommand::Guess(value) => self.guess(value),
            EngineCommand::RequestHint => self.request_hint().map(|_| ()),
            EngineCommand::ChangeDifficulty(difficulty) => {
                self.change_difficulty(difficulty);
                Ok(())
            }
        };
        if let Err(error) = result {
            warn!(target: "round_engine", "Command rejected: {}", error);
            self.event_emitter.emit(&EngineEvent::CommandRejected(error));
        }
    }

    /// Starts a fresh round, discarding whatever came before. The only way
    /// out of a terminal state.
    pub fn new_game(&mut self, difficulty: Option<Difficulty>) {
        if let Some(difficulty) = difficulty {
            self.difficulty = difficulty;
        }
        self.secret_number = self.draw_secret();
        self.attempts = 0;
        self.hints_used = 0;
        self.score = self.config.scoring.base_score * self.difficulty.score_multiplier();
        self.status = RoundStatus::InProgress;
        self.timer = TimerState::started_at(self.clock.now());
        self.round_id = Uuid::new_v4();
        info!(
            target: "round_engine",
            "New round {}; difficulty: {}", self.round_id, self.difficulty
        );
        trace!(target: "round_engine", "Secret number: {}", self.secret_number);
        self.event_emitter.emit(&EngineEvent::RoundStarted {
            difficulty: self.difficulty,
        });
    }

    fn draw_secret(&mut self) -> i64 {
        let range = self.difficulty.range();
        let eggs = self.config.easter_eggs.clone();
        if eggs.enabled && self.random.chance(eggs.probability) {
            let specials: Vec<i64> = eggs
                .special_numbers
                .iter()
                .copied()
                .filter(|n| range.contains(n))
                .collect();
            if !specials.is_empty() {
                let index = self.random.uniform_int(0, specials.len() as i64 - 1) as usize;
                info!(target: "round_engine", "Special number drawn");
                return specials[index];
            }
        }
        self.random.uniform_int(*range.start(), *range.end())
    }

    /// Evaluates one guess. Out-of-range guesses are free: they consume no
    /// attempt and change nothing.
    pub fn guess(&mut self, value: i64) -> Result<(), EngineError> {
        if self.status != RoundStatus::InProgress {
            return Err(EngineError::RoundNotActive);
        }
        let range = self.difficulty.range();
        if !range.contains(&value) {
            return Err(EngineError::GuessOutOfRange {
                min: *range.start(),
                max: *range.end(),
            });
        }

        self.attempts += 1;
        self.score -= self.config.scoring.penalty_per_attempt;
        trace!(
            target: "round_engine",
            "Attempt {}/{}: {}", self.attempts, self.difficulty.max_attempts(), value
        );

        if value == self.secret_number {
            self.finish_won();
        } else if self.attempts >= self.difficulty.max_attempts() {
            self.finish_lost();
        } else {
            let direction = if value < self.secret_number {
                Direction::Higher
            } else {
                Direction::Lower
            };
            let proximity = Proximity::classify(value, self.secret_number, self.difficulty.span());
            self.event_emitter.emit(&EngineEvent::GuessFeedback {
                guess: value,
                direction,
                proximity,
            });
        }
        Ok(())
    }

    fn finish_won(&mut self) {
        let now = self.clock.now();
        self.timer = self.timer.ended(now);
        let elapsed = self.timer.elapsed(now);

        self.score += self.config.scoring.time_bonus(elapsed);
        self.streak += 1;
        self.score += self.config.scoring.streak_bonus(self.streak);
        self.status = RoundStatus::Won;

        let outcome = self.build_outcome(true, elapsed, now);
        info!(
            target: "round_engine",
            "Round {} won in {} attempts; score {}", self.round_id, self.attempts, outcome.score
        );
        self.event_emitter.emit(&EngineEvent::RoundWon {
            outcome,
            streak: self.streak,
        });
    }

    fn finish_lost(&mut self) {
        let now = self.clock.now();
        self.timer = self.timer.ended(now);
        let elapsed = self.timer.elapsed(now);

        self.streak = 0;
        self.status = RoundStatus::Lost;

        let outcome = self.build_outcome(false, elapsed, now);
        info!(
            target: "round_engine",
            "Round {} lost; secret was {}", self.round_id, self.secret_number
        );
        self.event_emitter.emit(&EngineEvent::RoundLost { outcome });
    }

    fn build_outcome(
        &self,
        won: bool,
        elapsed: Duration,
        now: std::time::SystemTime,
    ) -> RoundOutcome {
        RoundOutcome {
            round_id: self.round_id,
            difficulty: self.difficulty,
            won,
            attempts: self.attempts,
            elapsed,
            score: self.score.max(0),
            secret_number: self.secret_number,
            timestamp: DateTime::<Utc>::from(now),
        }
    }

    /// Buys the next rung of the hint ladder. Content depends only on the
    /// secret number and how many hints were already taken, never on the
    /// guesses made so far.
    pub fn request_hint(&mut self) -> Result<Hint, EngineError> {
        if self.status != RoundStatus::InProgress
            || self.hints_used >= self.config.hints.max_hints
            || self.score < self.config.hints.hint_cost
        {
            return Err(EngineError::HintUnavailable);
        }

        self.score -= self.config.hints.hint_cost;
        self.hints_used += 1;
        let hint = self.compute_hint();
        trace!(target: "round_engine", "Hint {}: {:?}", self.hints_used, hint);
        self.event_emitter.emit(&EngineEvent::HintGiven {
            hint_index: self.hints_used,
            hint: hint.clone(),
            score: self.score(),
        });
        Ok(hint)
    }

    fn compute_hint(&mut self) -> Hint {
        match self.hints_used {
            1 => Hint::Parity {
                even: self.secret_number % 2 == 0,
            },
            2 => self.quartile_hint(),
            _ => self.divisibility_hint(),
        }
    }

    fn quartile_hint(&self) -> Hint {
        let range = self.difficulty.range();
        let (min, max) = (*range.start(), *range.end());
        let quarter = (max - min) / 4;
        let bounds = [
            (min, min + quarter),
            (min + quarter + 1, min + 2 * quarter),
            (min + 2 * quarter + 1, min + 3 * quarter),
            (min + 3 * quarter + 1, max),
        ];
        let (low, high) = bounds
            .iter()
            .copied()
            .find(|(low, high)| (*low..=*high).contains(&self.secret_number))
            .unwrap_or(bounds[3]);
        Hint::Quartile { low, high }
    }

    fn divisibility_hint(&mut self) -> Hint {
        let span = self.difficulty.span();
        let divisors: Vec<i64> = self
            .config
            .hints
            .divisor_candidates
            .iter()
            .copied()
            .filter(|d| *d < span)
            .collect();
        if divisors.is_empty() {
            return Hint::Encouragement;
        }
        let index = self.random.uniform_int(0, divisors.len() as i64 - 1) as usize;
        let divisor = divisors[index];
        Hint::Divisibility {
            divisor,
            divisible: self.secret_number % divisor == 0,
        }
    }

    /// Selects the tier for subsequent rounds. A round already in progress
    /// is abandoned and restarted at the new tier; no pending state carries
    /// over.
    pub fn change_difficulty(&mut self, difficulty: Difficulty) {
        self.difficulty = difficulty;
        info!(target: "round_engine", "Difficulty changed to {}", difficulty);
        self.event_emitter
            .emit(&EngineEvent::DifficultyChanged { difficulty });
        if self.status == RoundStatus::InProgress {
            self.new_game(Some(difficulty));
        }
    }

    // Pure reads for the periodic elapsed-time display and status line.

    pub fn status(&self) -> RoundStatus {
        self.status
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    pub fn hints_used(&self) -> u32 {
        self.hints_used
    }

    pub fn streak(&self) -> u32 {
        self.streak
    }

    /// Display score, clamped at zero.
    pub fn score(&self) -> i64 {
        self.score.max(0)
    }

    pub fn elapsed(&self) -> Duration {
        self.timer.elapsed(self.clock.now())
    }
}
