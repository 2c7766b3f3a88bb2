pub mod instance;

pub use instance::{ShapeBuffer, ShapeInstance};
