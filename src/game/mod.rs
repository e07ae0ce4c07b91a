pub mod clock;
pub mod config;
pub mod random;
pub mod round_engine;
pub mod settings;
pub mod stats_recorder;
pub mod stats_store;

pub use round_engine::RoundEngine;
pub use stats_recorder::StatsRecorder;
pub use stats_store::StatsStore;
