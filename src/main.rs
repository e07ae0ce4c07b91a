use std::io::{self, BufRead, Write};
use std::rc::Rc;

use secret_number::events::Channel;
use secret_number::game::clock::SystemClock;
use secret_number::game::config::GameConfig;
use secret_number::game::random::{RandomSource, SeededRandom, ThreadRandom};
use secret_number::game::settings::Settings;
use secret_number::game::{RoundEngine, StatsRecorder, StatsStore};
use secret_number::model::{
    Difficulty, Direction, EngineCommand, EngineEvent, PlayerStats, Proximity, RoundStatus,
    StatsEvent,
};

fn init_logging() {
    env_logger::init();
}

fn main() {
    init_logging();

    let settings = Settings::load();
    let store = StatsStore::new();
    let initial_streak = store.stats().current_streak;
    let initial_difficulty = settings.difficulty;

    let (command_emitter, command_observer) = Channel::<EngineCommand>::new();
    let (event_emitter, event_observer) = Channel::<EngineEvent>::new();
    let (stats_emitter, stats_observer) = Channel::<StatsEvent>::new();

    let random: Box<dyn RandomSource> = match SeededRandom::from_env() {
        Some(seeded) => Box::new(seeded),
        None => Box::new(ThreadRandom),
    };

    let engine = RoundEngine::new(
        command_observer,
        event_emitter,
        GameConfig::default(),
        random,
        Rc::new(SystemClock),
        initial_difficulty,
        initial_streak,
    );
    let recorder = StatsRecorder::new(
        event_observer.clone(),
        stats_emitter,
        store,
        settings,
        Settings::default_path(),
    );

    let _render_subscription = event_observer.subscribe(render_event);
    let _stats_subscription = stats_observer.subscribe(|event: &StatsEvent| {
        let StatsEvent::StatsUpdated(stats) = event;
        println!(
            "  [games: {}  wins: {}  streak: {}]",
            stats.games_played, stats.games_won, stats.current_streak
        );
    });

    println!("=== Secret Number ===");
    println!("Commands: <number>, hint, new, difficulty <easy|medium|hard|expert>, stats, best, quit");
    command_emitter.emit(&EngineCommand::NewGame(None));

    let stdin = io::stdin();
    loop {
        {
            let engine = engine.borrow();
            if engine.status() == RoundStatus::InProgress {
                print!(
                    "[{} | attempt {}/{} | score {} | {}s] > ",
                    engine.difficulty(),
                    engine.attempts(),
                    engine.difficulty().max_attempts(),
                    engine.score(),
                    engine.elapsed().as_secs()
                );
            } else {
                print!("> ");
            }
        }
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) | Err(_) => break,
            Ok(_) => (),
        }
        let input = line.trim();
        if input.is_empty() {
            continue;
        }

        if let Ok(value) = input.parse::<i64>() {
            command_emitter.emit(&EngineCommand::Guess(value));
            continue;
        }

        let mut words = input.split_whitespace();
        match words.next().unwrap_or_default() {
            "hint" | "h" => command_emitter.emit(&EngineCommand::RequestHint),
            "new" | "n" => command_emitter.emit(&EngineCommand::NewGame(None)),
            "difficulty" | "d" => match words.next().map(Difficulty::from_id) {
                Some(Ok(difficulty)) => {
                    command_emitter.emit(&EngineCommand::ChangeDifficulty(difficulty))
                }
                Some(Err(error)) => println!("{}", error),
                None => println!("Usage: difficulty <easy|medium|hard|expert>"),
            },
            "stats" | "s" => print_stats(recorder.borrow().stats()),
            "best" | "b" => {
                let recorder = recorder.borrow();
                for difficulty in Difficulty::all() {
                    if let Some(best) = recorder.store().best_score(difficulty) {
                        println!(
                            "  {:<8} {} ({} attempts, {}s, {})",
                            difficulty.id(),
                            best.score,
                            best.attempts,
                            best.elapsed.as_secs(),
                            best.date.format("%Y-%m-%d")
                        );
                    }
                }
            }
            "quit" | "q" => break,
            _ => println!("Commands: <number>, hint, new, difficulty <id>, stats, quit"),
        }
    }
}

fn render_event(event: &EngineEvent) {
    match event {
        EngineEvent::RoundStarted { difficulty } => {
            let range = difficulty.range();
            println!(
                "New game started! Guess a number between {} and {}. Good luck!",
                range.start(),
                range.end()
            );
        }
        EngineEvent::GuessFeedback {
            guess,
            direction,
            proximity,
        } => match proximity {
            Proximity::VeryClose => println!("Almost there! You are very hot!"),
            Proximity::Close => println!("You are very close!"),
            Proximity::Directional { far } => {
                match direction {
                    Direction::Higher => {
                        print!("The secret number is higher than {}!", guess)
                    }
                    Direction::Lower => {
                        print!("The secret number is lower than {}!", guess)
                    }
                }
                if *far {
                    print!(" You are far from the number!");
                }
                println!();
            }
        },
        EngineEvent::RoundWon { outcome, streak } => {
            println!(
                "Congratulations! You discovered the secret number {} in {} attempts!",
                outcome.secret_number, outcome.attempts
            );
            println!(
                "Score: {}  time: {}s  streak: {}",
                outcome.score,
                outcome.elapsed.as_secs(),
                streak
            );
        }
        EngineEvent::RoundLost { outcome } => {
            println!(
                "Game over! The secret number was {}. Try again!",
                outcome.secret_number
            );
        }
        EngineEvent::HintGiven {
            hint_index,
            hint,
            score,
        } => {
            println!("Hint {}: {} (score now {})", hint_index, hint, score);
        }
        EngineEvent::DifficultyChanged { difficulty } => {
            println!("Difficulty set to {}.", difficulty);
        }
        EngineEvent::CommandRejected(error) => {
            println!("{}", error);
        }
    }
}

fn print_stats(stats: &PlayerStats) {
    println!("Games played:   {}", stats.games_played);
    println!("Games won:      {}", stats.games_won);
    println!("Win rate:       {:.0}%", stats.win_rate() * 100.0);
    println!("Best score:     {}", stats.best_score);
    println!("Current streak: {}", stats.current_streak);
    println!("Longest streak: {}", stats.longest_streak);
    println!("Perfect games:  {}", stats.perfect_games);
    for difficulty in Difficulty::all() {
        if let Some(tier) = stats.by_difficulty.get(&difficulty) {
            println!(
                "  {:<8} played {:<4} won {:<4} best {}",
                difficulty.id(),
                tier.played,
                tier.won,
                tier.best_score
            );
        }
    }
}
