use serde::{Deserialize, Serialize};

use crate::api::types::{EntityId, GameEvent};
use crate::board::grid::{DotColor, Palette};
use crate::core::scene::Scene;
use crate::error::{GameError, Result};
use crate::extensions::tween::TweenState;
use crate::input::queue::InputQueue;

/// Configuration for the engine loop, provided by the game.
#[derive(Debug, Clone)]
pub struct GameConfig {
    /// Fixed timestep in seconds (default: 1/60).
    pub fixed_dt: f32,
    /// World width in game units.
    pub world_width: f32,
    /// World height in game units.
    pub world_height: f32,
    /// Maximum number of shapes in the frame buffer (default: 256).
    pub max_shapes: usize,
    /// Maximum number of game events per frame (default: 32).
    pub max_events: usize,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            fixed_dt: 1.0 / 60.0,
            world_width: 360.0,
            world_height: 360.0,
            max_shapes: 256,
            max_events: 32,
        }
    }
}

/// Board geometry, palette and animation timings.
/// Every field has a default, so a JSON override may name only what changes.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BoardConfig {
    pub rows: u32,
    pub cols: u32,
    /// Cell edge length in world units.
    pub grid_size: f32,
    pub dot_radius: f32,
    pub line_width: f32,
    /// Extra pick radius around a dot.
    pub hit_slop: f32,
    pub palette: Palette,
    /// Connections onto this color count toward the level target.
    pub win_color: DotColor,
    pub fade_out_secs: f32,
    pub drop_in_secs: f32,
    /// Replacement dots fall from this far above their cell.
    pub drop_height: f32,
    /// Seconds left at which the low-time cue fires.
    pub low_time_threshold: u32,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            rows: 6,
            cols: 6,
            grid_size: 60.0,
            dot_radius: 15.0,
            line_width: 12.0,
            hit_slop: 6.0,
            palette: Palette::default(),
            win_color: DotColor::Blue,
            fade_out_secs: 0.075,
            drop_in_secs: 0.95,
            drop_height: 20.0,
            low_time_threshold: 5,
        }
    }
}

impl BoardConfig {
    pub fn from_json(json: &str) -> Result<Self> {
        let config: BoardConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        let invalid = |reason: &str| Err(GameError::InvalidBoard { reason: reason.into() });
        if self.rows == 0 || self.cols == 0 {
            return invalid("board needs at least one row and column");
        }
        if self.grid_size <= 0.0 || self.dot_radius <= 0.0 {
            return invalid("grid size and dot radius must be positive");
        }
        if self.dot_radius * 2.0 > self.grid_size {
            return invalid("dots overlap their neighbours");
        }
        if !self.palette.contains(self.win_color) {
            return invalid("win color is not in the palette");
        }
        Ok(())
    }

    /// World-space edge lengths of the board.
    pub fn world_size(&self) -> (f32, f32) {
        (
            self.cols as f32 * self.grid_size,
            self.rows as f32 * self.grid_size,
        )
    }
}

/// The core contract every game must fulfill.
pub trait Game {
    /// Return engine configuration. Called once before init.
    fn config(&self) -> GameConfig {
        GameConfig::default()
    }

    /// Setup initial state and spawn the first shapes.
    fn init(&mut self, ctx: &mut EngineContext);

    /// One fixed step. `input` holds the events that arrived since the last step.
    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue);
}

/// Mutable access to engine state, passed to Game::init and Game::update.
pub struct EngineContext {
    pub scene: Scene,
    pub tweens: TweenState,
    pub events: Vec<GameEvent>,
    next_id: u32,
}

impl EngineContext {
    pub fn new() -> Self {
        Self {
            scene: Scene::new(),
            tweens: TweenState::new(),
            events: Vec::new(),
            next_id: 1,
        }
    }

    /// Generate the next unique entity ID.
    pub fn next_id(&mut self) -> EntityId {
        let id = EntityId(self.next_id);
        self.next_id += 1;
        id
    }

    /// Emit a game event to be forwarded to TypeScript.
    pub fn emit_event(&mut self, event: GameEvent) {
        self.events.push(event);
    }

    /// Clear per-frame transient data.
    pub fn clear_frame_data(&mut self) {
        self.events.clear();
    }

    /// Drop every shape and animation. Entity IDs keep counting up.
    pub fn clear_scene(&mut self) {
        self.scene.clear();
        self.tweens.clear();
    }
}

impl Default for EngineContext {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_board_is_valid() {
        let board = BoardConfig::default();
        assert!(board.validate().is_ok());
        assert_eq!(board.world_size(), (360.0, 360.0));
    }

    #[test]
    fn partial_json_keeps_defaults() {
        let board = BoardConfig::from_json(r#"{"rows": 4, "win_color": "red"}"#).unwrap();
        assert_eq!(board.rows, 4);
        assert_eq!(board.cols, 6);
        assert_eq!(board.win_color, DotColor::Red);
    }

    #[test]
    fn win_color_must_be_drawable() {
        let json = r#"{"palette": ["red", "green"], "win_color": "blue"}"#;
        assert!(matches!(
            BoardConfig::from_json(json),
            Err(GameError::InvalidBoard { .. })
        ));
    }

    #[test]
    fn ids_are_unique() {
        let mut ctx = EngineContext::new();
        let a = ctx.next_id();
        let b = ctx.next_id();
        ctx.clear_scene();
        let c = ctx.next_id();
        assert!(a != b && b != c);
    }
}
