pub mod chain;
pub mod grid;
pub mod layout;
pub mod resolver;
pub mod rng;

pub use chain::{
    BeginRejected, Began, Chain, ChainBuilder, CompletedGesture, Extension, FreeSegment,
    GestureState, Rejection, Segment,
};
pub use grid::{Dot, DotColor, DotRegistry, GridPos, Palette};
pub use layout::BoardLayout;
pub use resolver::{resolve, Resolution, Vacancy};
pub use rng::Rng;
