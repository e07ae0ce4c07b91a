use std::cell::RefCell;
use std::path::PathBuf;
use std::rc::Rc;

use log::warn;

use super::settings::Settings;
use super::stats_store::StatsStore;
use crate::destroyable::Destroyable;
use crate::events::{EventEmitter, EventObserver, Unsubscriber};
use crate::model::{EngineEvent, PlayerStats, RoundOutcome, StatsEvent};

/// The storage subscriber: listens to engine events and applies terminal
/// round outcomes to the stats store, exactly once per round. The engine
/// stays unaware of storage; writes are fire-and-forget and failures only
/// log, with gameplay continuing on the in-memory copy.
pub struct StatsRecorder {
    store: StatsStore,
    settings: Settings,
    settings_path: PathBuf,
    stats_event_emitter: EventEmitter<StatsEvent>,
    engine_subscription: Option<Unsubscriber<EngineEvent>>,
}

impl Destroyable for StatsRecorder {
    fn destroy(&mut self) {
        if let Some(subscription) = self.engine_subscription.take() {
            subscription.unsubscribe();
        }
    }
}

impl StatsRecorder {
    pub fn new(
        engine_observer: EventObserver<EngineEvent>,
        stats_event_emitter: EventEmitter<StatsEvent>,
        store: StatsStore,
        settings: Settings,
        settings_path: PathBuf,
    ) -> Rc<RefCell<Self>> {
        let recorder = Self {
            store,
            settings,
            settings_path,
            stats_event_emitter,
            engine_subscription: None,
        };
        let refcell = Rc::new(RefCell::new(recorder));
        StatsRecorder::wire_subscription(refcell.clone(), engine_observer);
        refcell
    }

    fn wire_subscription(
        recorder: Rc<RefCell<Self>>,
        engine_observer: EventObserver<EngineEvent>,
    ) {
        let recorder_handler = recorder.clone();
        let subscription = engine_observer.subscribe(move |event| {
            let mut recorder = recorder_handler.borrow_mut();
            recorder.handle_event(event);
        });
        recorder.borrow_mut().engine_subscription = Some(subscription);
    }

    fn handle_event(&mut self, event: &EngineEvent) {
        match event {
            EngineEvent::RoundWon { outcome, .. } => self.apply_outcome(outcome),
            EngineEvent::RoundLost { outcome } => self.apply_outcome(outcome),
            EngineEvent::DifficultyChanged { difficulty } => {
                self.settings.difficulty = *difficulty;
                if let Err(error) = self.settings.save_to(self.settings_path.clone()) {
                    warn!(target: "stats_recorder", "Could not persist settings: {}", error);
                }
            }
            _ => (),
        }
    }

    fn apply_outcome(&mut self, outcome: &RoundOutcome) {
        if let Err(error) = self.store.record(outcome) {
            warn!(
                target: "stats_recorder",
                "Could not persist round outcome: {}; stats kept in memory", error
            );
        }
        self.stats_event_emitter
            .emit(&StatsEvent::StatsUpdated(self.store.stats().clone()));
    }

    pub fn stats(&self) -> &PlayerStats {
        self.store.stats()
    }

    pub fn store(&self) -> &StatsStore {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::Channel;
    use crate::model::{Difficulty, RoundOutcome};
    use chrono::Utc;
    use std::time::Duration;
    use uuid::Uuid;

    fn temp_dir() -> PathBuf {
        std::env::temp_dir()
            .join("secret-number-tests")
            .join(Uuid::new_v4().to_string())
    }

    fn won_outcome(score: i64) -> RoundOutcome {
        RoundOutcome {
            round_id: Uuid::new_v4(),
            difficulty: Difficulty::Easy,
            won: true,
            attempts: 2,
            elapsed: Duration::from_secs(8),
            score,
            secret_number: 4,
            timestamp: Utc::now(),
        }
    }

    #[test]
    fn test_round_won_event_is_recorded_and_republished() {
        let dir = temp_dir();
        let (engine_emitter, engine_observer) = Channel::<EngineEvent>::new();
        let (stats_emitter, stats_observer) = Channel::<StatsEvent>::new();
        let recorder = StatsRecorder::new(
            engine_observer,
            stats_emitter,
            StatsStore::with_data_dir(dir.clone()),
            Settings::default(),
            dir.join("settings.json"),
        );

        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = seen.clone();
        let _ = stats_observer.subscribe(move |event: &StatsEvent| {
            seen_clone.borrow_mut().push(event.clone());
        });

        engine_emitter.emit(&EngineEvent::RoundWon {
            outcome: won_outcome(850),
            streak: 1,
        });

        assert_eq!(recorder.borrow().stats().games_won, 1);
        let seen = seen.borrow();
        match seen.as_slice() {
            [StatsEvent::StatsUpdated(stats)] => assert_eq!(stats.best_score, 850),
            other => panic!("unexpected events: {:?}", other),
        }
    }

    #[test]
    fn test_difficulty_change_persists_settings() {
        let dir = temp_dir();
        let settings_path = dir.join("settings.json");
        let (engine_emitter, engine_observer) = Channel::<EngineEvent>::new();
        let (stats_emitter, _) = Channel::<StatsEvent>::new();
        let _recorder = StatsRecorder::new(
            engine_observer,
            stats_emitter,
            StatsStore::with_data_dir(dir.clone()),
            Settings::default(),
            settings_path.clone(),
        );

        engine_emitter.emit(&EngineEvent::DifficultyChanged {
            difficulty: Difficulty::Expert,
        });

        let reloaded = Settings::load_from(settings_path);
        assert_eq!(reloaded.difficulty, Difficulty::Expert);
    }

    #[test]
    fn test_destroy_detaches_from_engine_events() {
        let dir = temp_dir();
        let (engine_emitter, engine_observer) = Channel::<EngineEvent>::new();
        let (stats_emitter, _) = Channel::<StatsEvent>::new();
        let recorder = StatsRecorder::new(
            engine_observer,
            stats_emitter,
            StatsStore::with_data_dir(dir.clone()),
            Settings::default(),
            dir.join("settings.json"),
        );

        recorder.borrow_mut().destroy();
        engine_emitter.emit(&EngineEvent::RoundWon {
            outcome: won_outcome(500),
            streak: 1,
        });
        assert_eq!(recorder.borrow().stats().games_played, 0);
    }
}
