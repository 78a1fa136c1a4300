//! The tile grid: dimensions, walls and position/cell conversions.
//!
//! # Coordinates
//!
//! World positions map to cells by `col = floor(x / cell_size)` and
//! `row = floor(y / cell_size)`.  Cells are numbered row-major:
//!
//! ```text
//! cell_id = row * width + col
//! ```
//!
//! so the id is a pure function of position.  Everything outside
//! `0..width × 0..height` is out of bounds and treated as impassable.

use colony_core::{CellId, GridConfig, Vec3};

use crate::{SpatialError, SpatialResult};

// ── CellCoord ─────────────────────────────────────────────────────────────────

/// Signed grid coordinate.  Signed so neighbor arithmetic can step off the
/// edge and be rejected by `TileGrid::in_bounds`.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CellCoord {
    pub col: i32,
    pub row: i32,
}

impl CellCoord {
    #[inline]
    pub const fn new(col: i32, row: i32) -> Self {
        Self { col, row }
    }

    #[inline]
    pub fn offset(self, dcol: i32, drow: i32) -> Self {
        Self::new(self.col + dcol, self.row + drow)
    }

    /// Squared straight-line distance in cells.
    #[inline]
    pub fn distance_squared(self, other: CellCoord) -> i64 {
        let dc = (self.col - other.col) as i64;
        let dr = (self.row - other.row) as i64;
        dc * dc + dr * dr
    }
}

impl std::fmt::Display for CellCoord {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.col, self.row)
    }
}

// ── TileGrid ──────────────────────────────────────────────────────────────────

/// Read-only map geometry shared by the spatial index, the pathfinder and
/// movement.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TileGrid {
    width:       u32,
    height:      u32,
    cell_size:   f32,
    cell_offset: f32,
    /// `true` = impassable.  Indexed by cell id.
    walls:       Vec<bool>,
}

impl TileGrid {
    /// An open grid of `width × height` square cells.
    pub fn new(width: u32, height: u32, cell_size: f32) -> SpatialResult<Self> {
        if width == 0 || height == 0 {
            return Err(SpatialError::EmptyGrid { width, height });
        }
        if !(cell_size > 0.0) || !cell_size.is_finite() {
            return Err(SpatialError::CellSize(cell_size));
        }
        Ok(Self {
            width,
            height,
            cell_size,
            cell_offset: cell_size * 0.5,
            walls: vec![false; width as usize * height as usize],
        })
    }

    pub fn from_config(cfg: &GridConfig) -> SpatialResult<Self> {
        Self::new(cfg.width, cfg.height, cfg.cell_size)
    }

    /// Replace the whole wall map.  `walls` must have one entry per cell,
    /// indexed by cell id.
    pub fn with_walls(mut self, walls: Vec<bool>) -> SpatialResult<Self> {
        if walls.len() != self.walls.len() {
            return Err(SpatialError::WallCount { expected: self.walls.len(), got: walls.len() });
        }
        self.walls = walls;
        Ok(self)
    }

    pub fn set_wall(&mut self, coord: CellCoord, wall: bool) -> SpatialResult<()> {
        let idx = self
            .index_of(coord)
            .ok_or(SpatialError::OutOfBounds { col: coord.col, row: coord.row })?;
        self.walls[idx] = wall;
        Ok(())
    }

    // ── Dimensions ────────────────────────────────────────────────────────

    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.cell_size
    }

    #[inline]
    pub fn cell_offset(&self) -> f32 {
        self.cell_offset
    }

    #[inline]
    pub fn cell_count(&self) -> usize {
        self.walls.len()
    }

    /// World extent along x and y.
    pub fn world_size(&self) -> (f32, f32) {
        (self.width as f32 * self.cell_size, self.height as f32 * self.cell_size)
    }

    // ── Cell math ─────────────────────────────────────────────────────────

    #[inline]
    pub fn in_bounds(&self, c: CellCoord) -> bool {
        c.col >= 0 && c.row >= 0 && (c.col as u32) < self.width && (c.row as u32) < self.height
    }

    #[inline]
    fn index_of(&self, c: CellCoord) -> Option<usize> {
        self.in_bounds(c)
            .then(|| c.row as usize * self.width as usize + c.col as usize)
    }

    /// Cell containing `pos`, or `None` when `pos` lies outside the grid.
    pub fn cell_of(&self, pos: Vec3) -> Option<CellCoord> {
        let c = self.cell_of_unchecked(pos);
        self.in_bounds(c).then_some(c)
    }

    /// Cell containing `pos`, clamped onto the nearest edge cell.
    pub fn cell_of_clamped(&self, pos: Vec3) -> CellCoord {
        let c = self.cell_of_unchecked(pos);
        CellCoord::new(
            c.col.clamp(0, self.width as i32 - 1),
            c.row.clamp(0, self.height as i32 - 1),
        )
    }

    #[inline]
    fn cell_of_unchecked(&self, pos: Vec3) -> CellCoord {
        CellCoord::new(
            (pos.x / self.cell_size).floor() as i32,
            (pos.y / self.cell_size).floor() as i32,
        )
    }

    /// Row-major id of an in-bounds cell.
    #[inline]
    pub fn cell_id(&self, c: CellCoord) -> Option<CellId> {
        self.index_of(c).map(|i| CellId(i as u32))
    }

    /// Inverse of [`cell_id`](Self::cell_id).
    pub fn coord_of(&self, id: CellId) -> Option<CellCoord> {
        let i = id.index();
        (i < self.walls.len()).then(|| {
            let w = self.width as usize;
            CellCoord::new((i % w) as i32, (i / w) as i32)
        })
    }

    /// World position of a cell's center.
    #[inline]
    pub fn center_of(&self, c: CellCoord) -> Vec3 {
        Vec3::xy(
            c.col as f32 * self.cell_size + self.cell_offset,
            c.row as f32 * self.cell_size + self.cell_offset,
        )
    }

    /// Out-of-bounds cells count as walls.
    #[inline]
    pub fn is_wall(&self, c: CellCoord) -> bool {
        self.index_of(c).is_none_or(|i| self.walls[i])
    }

    #[inline]
    pub fn is_open(&self, c: CellCoord) -> bool {
        !self.is_wall(c)
    }

    /// Keep `pos` strictly inside the world rectangle so that
    /// `cell_of(pos)` is always `Some`.
    pub fn clamp_to_world(&self, pos: Vec3) -> Vec3 {
        let (w, h) = self.world_size();
        let margin = self.cell_size * 1e-3;
        Vec3::new(pos.x.clamp(0.0, w - margin), pos.y.clamp(0.0, h - margin), pos.z)
    }

    /// Every open cell, ascending id order.
    pub fn open_cells(&self) -> impl Iterator<Item = CellCoord> + '_ {
        self.walls
            .iter()
            .enumerate()
            .filter(|(_, wall)| !**wall)
            .filter_map(|(i, _)| self.coord_of(CellId(i as u32)))
    }
}
