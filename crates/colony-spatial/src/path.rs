//! Grid pathfinding trait and the default breadth-first search.
//!
//! # Pluggability
//!
//! `colony-mobility` requests paths through the [`Pathfinder`] trait, so an
//! application can swap in A* or a flow field without touching movement.
//!
//! # Determinism
//!
//! Neighbors are always expanded in the order down, up, left, right
//! (`row + 1`, `row - 1`, `col - 1`, `col + 1`).  Among equally short routes
//! the one found first under that order wins, so a given wall layout always
//! yields the same path.

use std::collections::VecDeque;

use crate::{CellCoord, TileGrid};

/// `(dcol, drow)` expansion order: down, up, left, right.
pub const NEIGHBOR_ORDER: [(i32, i32); 4] = [(0, 1), (0, -1), (-1, 0), (1, 0)];

// ── Pathfinder trait ──────────────────────────────────────────────────────────

/// Pluggable grid search.
pub trait Pathfinder {
    /// Cells to walk from `start` to `end`: excludes `start`, includes
    /// `end`.
    ///
    /// Empty when `start == end` (already there), when `end` is a wall or
    /// out of bounds, or when no route exists.  Only the first case means
    /// arrival; callers hold position on the others.
    fn find_path(&self, grid: &TileGrid, start: CellCoord, end: CellCoord) -> Vec<CellCoord>;
}

// ── BfsPathfinder ─────────────────────────────────────────────────────────────

/// Unweighted 4-connected breadth-first search.  O(cells) time and space.
#[derive(Copy, Clone, Debug, Default)]
pub struct BfsPathfinder;

impl Pathfinder for BfsPathfinder {
    fn find_path(&self, grid: &TileGrid, start: CellCoord, end: CellCoord) -> Vec<CellCoord> {
        bfs(grid, start, end)
    }
}

const NO_PARENT: u32 = u32::MAX;

fn bfs(grid: &TileGrid, start: CellCoord, end: CellCoord) -> Vec<CellCoord> {
    if start == end || grid.is_wall(end) {
        return Vec::new();
    }
    // A start on a wall tile is allowed: units can be pushed onto one by
    // clamping, and must still be able to walk off it.
    let (Some(start_id), Some(end_id)) = (grid.cell_id(start), grid.cell_id(end)) else {
        return Vec::new();
    };

    let n = grid.cell_count();
    let mut visited = vec![false; n];
    // parent[c] = cell id we reached c from.
    let mut parent = vec![NO_PARENT; n];
    let mut queue = VecDeque::new();

    visited[start_id.index()] = true;
    queue.push_back(start);

    while let Some(cur) = queue.pop_front() {
        if cur == end {
            return reconstruct(grid, &parent, start_id.0, end_id.0);
        }
        let Some(cur_id) = grid.cell_id(cur) else { continue };

        for (dc, dr) in NEIGHBOR_ORDER {
            let next = cur.offset(dc, dr);
            if grid.is_wall(next) {
                continue;
            }
            let Some(next_id) = grid.cell_id(next) else { continue };
            if visited[next_id.index()] {
                continue;
            }
            visited[next_id.index()] = true;
            parent[next_id.index()] = cur_id.0;
            queue.push_back(next);
        }
    }

    Vec::new()
}

fn reconstruct(grid: &TileGrid, parent: &[u32], start: u32, end: u32) -> Vec<CellCoord> {
    let mut path = Vec::new();
    let mut cur = end;
    while cur != start && cur != NO_PARENT {
        if let Some(c) = grid.coord_of(colony_core::CellId(cur)) {
            path.push(c);
        }
        cur = parent[cur as usize];
    }
    path.reverse();
    path
}

// ── Helpers ───────────────────────────────────────────────────────────────────

/// The open cell beside `target` closest to `from`, so a unit can path to
/// the side of something standing on a blocked tile.  Ties go to the earlier
/// neighbor in [`NEIGHBOR_ORDER`].  Returns `target` when no neighbor is
/// open.
pub fn nearest_open_neighbor(grid: &TileGrid, target: CellCoord, from: CellCoord) -> CellCoord {
    let mut best: Option<(i64, CellCoord)> = None;
    for (dc, dr) in NEIGHBOR_ORDER {
        let n = target.offset(dc, dr);
        if grid.is_wall(n) {
            continue;
        }
        let d = n.distance_squared(from);
        if best.is_none_or(|(bd, _)| d < bd) {
            best = Some((d, n));
        }
    }
    best.map_or(target, |(_, c)| c)
}
