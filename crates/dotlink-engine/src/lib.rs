pub mod api;
pub mod board;
pub mod bridge;
pub mod components;
pub mod core;
pub mod error;
pub mod extensions;
pub mod game;
pub mod input;
pub mod level;
pub mod present;
pub mod renderer;
pub mod session;
pub mod systems;

// Re-export key types at crate root for convenience
pub use api::game::{BoardConfig, EngineContext, Game, GameConfig};
pub use api::types::{DotId, EntityId, GameEvent};
pub use board::{
    resolve, BoardLayout, ChainBuilder, CompletedGesture, Dot, DotColor, DotRegistry, GridPos,
    Palette, Rejection, Resolution, Rng, Segment,
};
pub use bridge::protocol::ProtocolLayout;
pub use components::entity::{Entity, Shape};
pub use core::scene::Scene;
pub use core::time::{Countdown, FixedTimestep};
pub use error::{GameError, Result};
pub use game::DotLink;
pub use input::queue::{InputEvent, InputQueue, UiAction};
pub use level::{LevelConfig, LevelController, LevelTable, Outcome, Phase, ScoreBand, TimerEvent};
pub use present::{HeadlessPresenter, Modal, ModalButton, Presenter};
pub use renderer::instance::{ShapeBuffer, ShapeInstance};
pub use session::{Attempt, LevelStore, MemoryStore, Progress, Session};
pub use systems::render::build_shape_buffer;

// Extensions, decoupled animation helpers
pub use extensions::{ease, lerp, Easing, Tween, TweenState, TweenTarget};
