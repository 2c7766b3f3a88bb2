pub mod render;

pub use render::build_shape_buffer;
