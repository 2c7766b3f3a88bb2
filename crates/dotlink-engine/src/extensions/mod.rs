// extensions/mod.rs
//
// Animation helpers layered over Scene. The scene itself knows nothing
// about time; tweens drive entity properties from the outside.

pub mod easing;
pub mod tween;

pub use easing::{ease, lerp, Easing};
pub use tween::{Tween, TweenState, TweenTarget};
