//! `colony-spatial` — tile grid, proximity indexes and grid pathfinding.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                     |
//! |-------------|--------------------------------------------------------------|
//! | [`grid`]    | `TileGrid` (walls, cell math), `CellCoord`                   |
//! | [`index`]   | `SpatialGrid` (cell buckets), `ResourceIndex` (R-tree)       |
//! | [`path`]    | `Pathfinder` trait, `BfsPathfinder`, `nearest_open_neighbor` |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag      | Effect                                                     |
//! |-----------|------------------------------------------------------------|
//! | `fx-hash` | `SpatialGrid` buckets use `FxHashMap` instead of `HashMap`. |
//! | `serde`   | Derives `Serialize`/`Deserialize` on public types.         |
//!
//! Both indexes are derived data.  They are rebuilt from the pool on the
//! orchestrator's stagger cadence and can lag behind agent positions by up to
//! one cadence window.

pub mod error;
pub mod grid;
pub mod index;
pub mod path;

#[cfg(test)]
mod tests;

pub use error::{SpatialError, SpatialResult};
pub use grid::{CellCoord, TileGrid};
pub use index::{ResourceIndex, SpatialGrid};
pub use path::{nearest_open_neighbor, BfsPathfinder, Pathfinder};
