use bytemuck::{Pod, Zeroable};

/// Per-shape render data read by the TypeScript renderer.
/// Must match the TypeScript protocol: 12 floats = 48 bytes stride.
///
/// Circles use `(x, y)` as center and `size` as radius.
/// Lines run from `(x, y)` to `(x2, y2)` with `size` as stroke width.
#[repr(C)]
#[derive(Debug, Clone, Copy, Default, PartialEq, Pod, Zeroable)]
pub struct ShapeInstance {
    pub x: f32,
    pub y: f32,
    pub x2: f32,
    pub y2: f32,
    pub size: f32,
    /// `KIND_CIRCLE` or `KIND_LINE`.
    pub kind: f32,
    pub r: f32,
    pub g: f32,
    pub b: f32,
    pub alpha: f32,
    /// 1.0 draws the hover ring.
    pub outline: f32,
    pub _pad: f32,
}

impl ShapeInstance {
    pub const FLOATS: usize = 12;
    pub const STRIDE_BYTES: usize = Self::FLOATS * 4;

    pub const KIND_CIRCLE: f32 = 0.0;
    pub const KIND_LINE: f32 = 1.0;
}

/// Shape instances for one frame: circles first, lines from `line_split` on.
pub struct ShapeBuffer {
    pub instances: Vec<ShapeInstance>,
    pub line_split: u32,
}

impl ShapeBuffer {
    pub fn new() -> Self {
        Self::with_capacity(128)
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            instances: Vec::with_capacity(capacity),
            line_split: 0,
        }
    }

    pub fn clear(&mut self) {
        self.instances.clear();
        self.line_split = 0;
    }

    pub fn push(&mut self, instance: ShapeInstance) {
        self.instances.push(instance);
    }

    pub fn instance_count(&self) -> u32 {
        self.instances.len() as u32
    }

    /// Flat float view of all instances.
    pub fn as_floats(&self) -> &[f32] {
        bytemuck::cast_slice(&self.instances)
    }

    /// Raw pointer to instance data for wasm memory reads.
    pub fn instances_ptr(&self) -> *const f32 {
        self.instances.as_ptr() as *const f32
    }
}

impl Default for ShapeBuffer {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn shape_instance_is_12_floats() {
        assert_eq!(std::mem::size_of::<ShapeInstance>(), ShapeInstance::STRIDE_BYTES);
    }

    #[test]
    fn float_view_follows_field_order() {
        let mut buf = ShapeBuffer::new();
        buf.push(ShapeInstance {
            x: 1.0,
            y: 2.0,
            size: 15.0,
            kind: ShapeInstance::KIND_LINE,
            alpha: 0.5,
            ..Default::default()
        });
        let floats = buf.as_floats();
        assert_eq!(floats.len(), ShapeInstance::FLOATS);
        assert_eq!(&floats[..2], &[1.0, 2.0]);
        assert_eq!(floats[4], 15.0);
        assert_eq!(floats[5], ShapeInstance::KIND_LINE);
        assert_eq!(floats[9], 0.5);
    }
}
