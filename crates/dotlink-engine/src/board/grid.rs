use serde::{Deserialize, Serialize};

use crate::api::types::DotId;
use crate::board::rng::Rng;
use crate::error::{GameError, Result};

/// Dot colors. The board draws from a configured subset of these.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DotColor {
    Yellow,
    Green,
    Red,
    Blue,
}

impl DotColor {
    pub const ALL: [DotColor; 4] = [
        DotColor::Yellow,
        DotColor::Green,
        DotColor::Red,
        DotColor::Blue,
    ];

    pub fn hex(self) -> &'static str {
        match self {
            DotColor::Yellow => "#FFC300",
            DotColor::Green => "#039012",
            DotColor::Red => "#C70039",
            DotColor::Blue => "#05006C",
        }
    }

    /// Linear RGB in [0, 1] for the render buffer.
    pub fn rgb(self) -> [f32; 3] {
        match self {
            DotColor::Yellow => [1.0, 0.765, 0.0],
            DotColor::Green => [0.012, 0.565, 0.071],
            DotColor::Red => [0.780, 0.0, 0.224],
            DotColor::Blue => [0.020, 0.0, 0.424],
        }
    }
}

/// Non-empty set of colors new dots are drawn from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<DotColor>", into = "Vec<DotColor>")]
pub struct Palette(Vec<DotColor>);

impl Palette {
    pub fn new(colors: Vec<DotColor>) -> Result<Self> {
        if colors.is_empty() {
            return Err(GameError::InvalidBoard {
                reason: "palette must hold at least one color".into(),
            });
        }
        Ok(Self(colors))
    }

    pub fn colors(&self) -> &[DotColor] {
        &self.0
    }

    pub fn contains(&self, color: DotColor) -> bool {
        self.0.contains(&color)
    }

    /// Uniformly random palette color.
    pub fn random(&self, rng: &mut Rng) -> DotColor {
        rng.pick(&self.0).copied().unwrap_or(self.0[0])
    }
}

impl Default for Palette {
    fn default() -> Self {
        Self(DotColor::ALL.to_vec())
    }
}

impl TryFrom<Vec<DotColor>> for Palette {
    type Error = GameError;

    fn try_from(colors: Vec<DotColor>) -> Result<Self> {
        Palette::new(colors)
    }
}

impl From<Palette> for Vec<DotColor> {
    fn from(palette: Palette) -> Self {
        palette.0
    }
}

/// Cell coordinates in grid units.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GridPos {
    pub col: u32,
    pub row: u32,
}

impl GridPos {
    pub fn new(col: u32, row: u32) -> Self {
        Self { col, row }
    }

    /// Signed (dx, dy) from `self` to `other`.
    pub fn delta(self, other: GridPos) -> (i64, i64) {
        (
            other.col as i64 - self.col as i64,
            other.row as i64 - self.row as i64,
        )
    }
}

/// A single dot: cell identity, color and line-connection flags.
#[derive(Debug, Clone, PartialEq)]
pub struct Dot {
    pub id: DotId,
    pub pos: GridPos,
    pub color: DotColor,
    /// A committed line ends at this dot.
    pub has_incoming: bool,
    /// A line starts (or may start) from this dot.
    pub has_outgoing: bool,
}

impl Dot {
    pub fn new(id: DotId, pos: GridPos, color: DotColor) -> Self {
        Self {
            id,
            pos,
            color,
            has_incoming: false,
            has_outgoing: false,
        }
    }

    pub fn clear_flags(&mut self) {
        self.has_incoming = false;
        self.has_outgoing = false;
    }
}

/// Row-major registry of dot cells. A cell is `None` between the moment its
/// dot is consumed by a chain and the moment a replacement spawns.
#[derive(Debug, Clone)]
pub struct DotRegistry {
    rows: u32,
    cols: u32,
    cells: Vec<Option<Dot>>,
}

impl DotRegistry {
    /// A board with no cells, before the first level starts.
    pub fn empty() -> Self {
        Self {
            rows: 0,
            cols: 0,
            cells: Vec::new(),
        }
    }

    /// Fill a `rows × cols` grid with randomly colored dots, ids `0..rows*cols`.
    pub fn create_grid(rows: u32, cols: u32, palette: &Palette, rng: &mut Rng) -> Self {
        let mut cells = Vec::with_capacity((rows * cols) as usize);
        for row in 0..rows {
            for col in 0..cols {
                let id = DotId(row * cols + col);
                let color = palette.random(rng);
                cells.push(Some(Dot::new(id, GridPos::new(col, row), color)));
            }
        }
        Self { rows, cols, cells }
    }

    /// Build a registry from explicit colors (row-major). Used by scripted boards.
    pub fn from_colors(rows: u32, cols: u32, colors: &[DotColor]) -> Result<Self> {
        if colors.len() != (rows * cols) as usize {
            return Err(GameError::InvalidBoard {
                reason: format!(
                    "expected {} colors for a {}x{} grid, got {}",
                    rows * cols,
                    rows,
                    cols,
                    colors.len()
                ),
            });
        }
        let cells = colors
            .iter()
            .enumerate()
            .map(|(i, &color)| {
                let i = i as u32;
                Some(Dot::new(DotId(i), GridPos::new(i % cols, i / cols), color))
            })
            .collect();
        Ok(Self { rows, cols, cells })
    }

    /// Spawn a fresh dot at `pos`, reusing `id`. Random color, flags cleared.
    pub fn replace_dot(
        &mut self,
        id: DotId,
        pos: GridPos,
        palette: &Palette,
        rng: &mut Rng,
    ) -> Result<&Dot> {
        let cell = self
            .cells
            .get_mut(id.index())
            .ok_or(GameError::UnknownDot(id))?;
        Ok(cell.insert(Dot::new(id, pos, palette.random(rng))))
    }

    /// Vacate a cell, returning the dot that was there.
    pub fn remove(&mut self, id: DotId) -> Option<Dot> {
        self.cells.get_mut(id.index()).and_then(Option::take)
    }

    pub fn get(&self, id: DotId) -> Option<&Dot> {
        self.cells.get(id.index()).and_then(Option::as_ref)
    }

    pub fn get_mut(&mut self, id: DotId) -> Option<&mut Dot> {
        self.cells.get_mut(id.index()).and_then(Option::as_mut)
    }

    /// The dot occupying a grid position, if any.
    pub fn at(&self, pos: GridPos) -> Option<&Dot> {
        if pos.col >= self.cols || pos.row >= self.rows {
            return None;
        }
        self.get(DotId(pos.row * self.cols + pos.col))
    }

    /// Iterate over occupied cells in id order.
    pub fn iter(&self) -> impl Iterator<Item = &Dot> {
        self.cells.iter().flatten()
    }

    /// Number of occupied cells.
    pub fn len(&self) -> usize {
        self.iter().count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.cells.len()
    }

    pub fn rows(&self) -> u32 {
        self.rows
    }

    pub fn cols(&self) -> u32 {
        self.cols
    }
}
