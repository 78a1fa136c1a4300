//! Spatial-subsystem error type.

use thiserror::Error;

/// Errors produced by `colony-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    #[error("grid must be at least 1x1, got {width}x{height}")]
    EmptyGrid { width: u32, height: u32 },

    #[error("cell size must be positive, got {0}")]
    CellSize(f32),

    #[error("wall map has {got} entries, grid has {expected} cells")]
    WallCount { expected: usize, got: usize },

    #[error("cell ({col}, {row}) is outside the grid")]
    OutOfBounds { col: i32, row: i32 },
}

pub type SpatialResult<T> = Result<T, SpatialError>;
