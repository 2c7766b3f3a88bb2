pub mod config;
pub mod controller;
pub mod score;

pub use config::{LevelConfig, LevelTable};
pub use controller::{LevelController, Outcome, Phase, TimerEvent};
pub use score::ScoreBand;
