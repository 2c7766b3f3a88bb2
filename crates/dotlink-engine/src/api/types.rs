use bytemuck::{Pod, Zeroable};

/// Unique identifier for a shape entity in the scene.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EntityId(pub u32);

/// Identifier of a dot cell on the board.
///
/// Assigned row-major at grid creation and reused by the replacement dot that
/// spawns into a vacated cell, so it names a cell rather than a dot instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct DotId(pub u32);

impl DotId {
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

/// A game event communicated from Rust to TypeScript via the shared buffer.
/// Generic container: `kind` identifies the event, `a/b/c` carry payload.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct GameEvent {
    pub kind: f32,
    pub a: f32,
    pub b: f32,
    pub c: f32,
}

impl GameEvent {
    pub const FLOATS: usize = 4;

    /// A chain of `a` dots was cleared.
    pub const CHAIN_CLEARED: f32 = 1.0;
    /// A win-color connection was made; `a` = running count, `b` = target.
    pub const WIN_CONNECTION: f32 = 2.0;
    /// The countdown crossed the low-time threshold; `a` = seconds left.
    pub const LOW_TIME: f32 = 3.0;
    /// Level won; `a` = level, `b` = score, `c` = elapsed seconds.
    pub const LEVEL_WON: f32 = 4.0;
    /// Level lost; `a` = level.
    pub const LEVEL_LOST: f32 = 5.0;
    /// Level started; `a` = level, `b` = target, `c` = initial time.
    pub const LEVEL_STARTED: f32 = 6.0;

    pub fn new(kind: f32, a: f32, b: f32, c: f32) -> Self {
        Self { kind, a, b, c }
    }
}
