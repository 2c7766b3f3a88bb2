use glam::Vec2;

use crate::api::types::EntityId;

/// What an entity draws as.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Shape {
    /// A filled dot centered on the entity position.
    Circle {
        radius: f32,
        color: [f32; 3],
        /// White ring while the pointer hovers the dot.
        outline: bool,
    },
    /// A stroke from the entity position to `to`.
    Line { to: Vec2, width: f32, color: [f32; 3] },
}

/// Fat entity: position, opacity and one shape.
#[derive(Debug, Clone)]
pub struct Entity {
    pub id: EntityId,
    /// Inactive entities are skipped by the render pass.
    pub active: bool,
    pub pos: Vec2,
    /// Opacity in [0, 1].
    pub alpha: f32,
    pub shape: Shape,
}

impl Entity {
    pub fn circle(id: EntityId, center: Vec2, radius: f32, color: [f32; 3]) -> Self {
        Self {
            id,
            active: true,
            pos: center,
            alpha: 1.0,
            shape: Shape::Circle {
                radius,
                color,
                outline: false,
            },
        }
    }

    pub fn line(id: EntityId, from: Vec2, to: Vec2, width: f32, color: [f32; 3]) -> Self {
        Self {
            id,
            active: true,
            pos: from,
            alpha: 1.0,
            shape: Shape::Line { to, width, color },
        }
    }

    // -- Builder pattern --

    pub fn with_pos(mut self, pos: Vec2) -> Self {
        self.pos = pos;
        self
    }

    pub fn with_alpha(mut self, alpha: f32) -> Self {
        self.alpha = alpha;
        self
    }

    /// Move a line's far end. No effect on circles.
    pub fn set_line_end(&mut self, end: Vec2) {
        if let Shape::Line { to, .. } = &mut self.shape {
            *to = end;
        }
    }

    /// Toggle a circle's hover ring. No effect on lines.
    pub fn set_outline(&mut self, on: bool) {
        if let Shape::Circle { outline, .. } = &mut self.shape {
            *outline = on;
        }
    }

    pub fn is_line(&self) -> bool {
        matches!(self.shape, Shape::Line { .. })
    }
}
