use serde::{Deserialize, Serialize};

use crate::error::{GameError, Result};

/// One level: how many win-color connections it asks for, and how long the
/// player has.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LevelConfig {
    pub level: u32,
    #[serde(alias = "targetBlueDots")]
    pub target: u32,
    /// Countdown start, in whole seconds.
    #[serde(alias = "initialTime")]
    pub initial_time: u32,
}

impl LevelConfig {
    pub fn new(level: u32, target: u32, initial_time: u32) -> Self {
        Self {
            level,
            target,
            initial_time,
        }
    }
}

/// Ordered level list, numbered `1..=len` without gaps.
/// Loaded from JSON at runtime or taken from the built-in default.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LevelTable {
    levels: Vec<LevelConfig>,
}

impl LevelTable {
    pub fn new(mut levels: Vec<LevelConfig>) -> Result<Self> {
        levels.sort_by_key(|l| l.level);
        let table = Self { levels };
        table.validate()?;
        Ok(table)
    }

    /// Parse and validate a table such as
    /// `{"levels": [{"level": 1, "target": 10, "initial_time": 60}]}`.
    pub fn from_json(json: &str) -> Result<Self> {
        let parsed: LevelTable = serde_json::from_str(json)?;
        Self::new(parsed.levels)
    }

    fn validate(&self) -> Result<()> {
        let invalid = |reason: String| Err(GameError::InvalidLevelTable { reason });
        if self.levels.is_empty() {
            return invalid("no levels".into());
        }
        for (i, cfg) in self.levels.iter().enumerate() {
            let expected = i as u32 + 1;
            if cfg.level != expected {
                return invalid(format!("expected level {}, found {}", expected, cfg.level));
            }
            if cfg.target == 0 {
                return invalid(format!("level {} has a zero target", cfg.level));
            }
            if cfg.initial_time == 0 {
                return invalid(format!("level {} has no time", cfg.level));
            }
        }
        Ok(())
    }

    pub fn get(&self, level: u32) -> Result<&LevelConfig> {
        level
            .checked_sub(1)
            .and_then(|i| self.levels.get(i as usize))
            .ok_or(GameError::UnknownLevel(level))
    }

    /// Number of configured levels; also the last level number.
    pub fn level_count(&self) -> u32 {
        self.levels.len() as u32
    }

    pub fn iter(&self) -> impl Iterator<Item = &LevelConfig> {
        self.levels.iter()
    }
}

impl Default for LevelTable {
    fn default() -> Self {
        Self {
            levels: vec![
                LevelConfig::new(1, 10, 60),
                LevelConfig::new(2, 15, 60),
                LevelConfig::new(3, 20, 60),
            ],
        }
    }
}
