use crate::components::entity::{Entity, Shape};
use crate::renderer::instance::{ShapeBuffer, ShapeInstance};

/// Build the shape buffer from a set of entities.
/// Circles go first, then lines, so strokes draw over dots. `line_split`
/// marks the boundary. Inactive and fully transparent entities are skipped.
pub fn build_shape_buffer<'a>(entities: impl Iterator<Item = &'a Entity>, buffer: &mut ShapeBuffer) {
    buffer.clear();

    let mut lines: Vec<ShapeInstance> = Vec::new();

    for entity in entities {
        if !entity.active || entity.alpha <= 0.0 {
            continue;
        }
        match entity.shape {
            Shape::Circle {
                radius,
                color: [r, g, b],
                outline,
            } => buffer.push(ShapeInstance {
                x: entity.pos.x,
                y: entity.pos.y,
                x2: entity.pos.x,
                y2: entity.pos.y,
                size: radius,
                kind: ShapeInstance::KIND_CIRCLE,
                r,
                g,
                b,
                alpha: entity.alpha,
                outline: if outline { 1.0 } else { 0.0 },
                _pad: 0.0,
            }),
            Shape::Line {
                to,
                width,
                color: [r, g, b],
            } => lines.push(ShapeInstance {
                x: entity.pos.x,
                y: entity.pos.y,
                x2: to.x,
                y2: to.y,
                size: width,
                kind: ShapeInstance::KIND_LINE,
                r,
                g,
                b,
                alpha: entity.alpha,
                outline: 0.0,
                _pad: 0.0,
            }),
        }
    }

    buffer.line_split = buffer.instance_count();
    for inst in lines {
        buffer.push(inst);
    }
}
