use glam::Vec2;

use crate::api::types::DotId;
use crate::board::grid::{DotRegistry, GridPos};

/// Maps grid cells to world space. Cell `(col, row)` is centered at
/// `origin + (col + 0.5, row + 0.5) * grid_size`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoardLayout {
    pub origin: Vec2,
    pub grid_size: f32,
    pub dot_radius: f32,
    /// Extra pick radius around a dot, so fast drags still register hovers.
    pub hit_slop: f32,
}

impl BoardLayout {
    pub fn new(grid_size: f32, dot_radius: f32, hit_slop: f32) -> Self {
        Self {
            origin: Vec2::ZERO,
            grid_size,
            dot_radius,
            hit_slop,
        }
    }

    /// World-space center of a cell.
    pub fn center(&self, pos: GridPos) -> Vec2 {
        self.origin + (Vec2::new(pos.col as f32, pos.row as f32) + 0.5) * self.grid_size
    }

    /// The cell whose square contains `point`, if it lies on the board.
    pub fn cell_at(&self, point: Vec2, cols: u32, rows: u32) -> Option<GridPos> {
        let local = (point - self.origin) / self.grid_size;
        if local.x < 0.0 || local.y < 0.0 {
            return None;
        }
        let (col, row) = (local.x as u32, local.y as u32);
        (col < cols && row < rows).then_some(GridPos::new(col, row))
    }

    /// The occupied dot under `point`, within `dot_radius + hit_slop` of its center.
    pub fn dot_at(&self, dots: &DotRegistry, point: Vec2) -> Option<DotId> {
        let pos = self.cell_at(point, dots.cols(), dots.rows())?;
        let dot = dots.at(pos)?;
        let reach = self.dot_radius + self.hit_slop;
        (self.center(pos).distance_squared(point) <= reach * reach).then_some(dot.id)
    }
}
