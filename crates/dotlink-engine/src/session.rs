/// Persistence for the current level number, surviving reloads.
pub trait LevelStore {
    fn get(&self) -> Option<u32>;
    fn set(&mut self, level: u32);
    fn clear(&mut self);
}

/// In-memory store for headless runs and tests.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MemoryStore {
    level: Option<u32>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(level: u32) -> Self {
        Self { level: Some(level) }
    }
}

impl LevelStore for MemoryStore {
    fn get(&self) -> Option<u32> {
        self.level
    }

    fn set(&mut self, level: u32) {
        self.level = Some(level);
    }

    fn clear(&mut self) {
        self.level = None;
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Progress {
    Playing(u32),
    /// Every configured level has been won.
    Complete,
}

/// Per-attempt counters, reset whenever a level starts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attempt {
    pub win_connections: u32,
    pub remaining_time: u32,
    /// Set on win or loss. Gameplay input is ignored while set.
    pub ended: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session {
    pub progress: Progress,
    pub attempt: Attempt,
}

impl Session {
    pub fn new(level: u32) -> Self {
        Self {
            progress: Progress::Playing(level),
            attempt: Attempt::default(),
        }
    }

    /// Resume from the persisted level. Missing or zero starts at level 1.
    pub fn load<S: LevelStore + ?Sized>(store: &S) -> Self {
        let level = store.get().filter(|&l| l > 0).unwrap_or(1);
        Self::new(level)
    }

    pub fn current_level(&self) -> Option<u32> {
        match self.progress {
            Progress::Playing(level) => Some(level),
            Progress::Complete => None,
        }
    }

    pub fn is_complete(&self) -> bool {
        self.progress == Progress::Complete
    }

    /// Move to the next level if one remains, else mark the session complete
    /// and clear the persisted level.
    pub fn advance_level<S: LevelStore + ?Sized>(
        &mut self,
        level_count: u32,
        store: &mut S,
    ) -> Progress {
        self.progress = match self.progress {
            Progress::Playing(level) if level < level_count => {
                store.set(level + 1);
                Progress::Playing(level + 1)
            }
            _ => {
                store.clear();
                Progress::Complete
            }
        };
        self.attempt = Attempt::default();
        self.progress
    }

    /// Clear the attempt, keep the level.
    pub fn reset_for_retry(&mut self) {
        self.attempt = Attempt::default();
    }

    /// Back to level 1 with a cleared store.
    pub fn restart_from_beginning<S: LevelStore + ?Sized>(&mut self, store: &mut S) {
        store.clear();
        self.progress = Progress::Playing(1);
        self.attempt = Attempt::default();
    }
}

impl Default for Session {
    fn default() -> Self {
        Self::new(1)
    }
}
