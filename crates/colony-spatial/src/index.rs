//! Proximity indexes rebuilt from the agent pool.
//!
//! [`SpatialGrid`] buckets every active agent by the cell it stands in and
//! answers square-window neighborhood queries.  [`ResourceIndex`] keeps an
//! R-tree (via `rstar`) of harvestable food for nearest-item lookups.
//!
//! Neither index is authoritative.  Queries return candidates as of the last
//! rebuild; callers re-check liveness and true distance before acting.

use rstar::{PointDistance, RTree, RTreeObject, AABB};

use colony_agent::AgentPool;
use colony_core::{AgentId, CellId, Role, Vec3};

use crate::{CellCoord, TileGrid};

#[cfg(feature = "fx-hash")]
type BucketMap = rustc_hash::FxHashMap<CellId, Vec<AgentId>>;
#[cfg(not(feature = "fx-hash"))]
type BucketMap = std::collections::HashMap<CellId, Vec<AgentId>>;

// ── SpatialGrid ───────────────────────────────────────────────────────────────

/// Cell id → agents standing in that cell at the last rebuild.
#[derive(Default)]
pub struct SpatialGrid {
    buckets: BucketMap,
    indexed: usize,
}

impl SpatialGrid {
    pub fn new() -> Self {
        Self::default()
    }

    /// Clear and repopulate from every active agent.  O(active agents).
    ///
    /// Agents standing outside the grid are filed under the nearest edge
    /// cell, so each active agent lands in exactly one bucket.
    pub fn rebuild(&mut self, pool: &AgentPool, grid: &TileGrid) {
        for bucket in self.buckets.values_mut() {
            bucket.clear();
        }
        self.indexed = 0;

        for agent in pool.iter_active() {
            let coord = grid.cell_of_clamped(agent.pos);
            if let Some(cell) = grid.cell_id(coord) {
                self.buckets.entry(cell).or_default().push(agent.id);
                self.indexed += 1;
            }
        }
        self.buckets.retain(|_, bucket| !bucket.is_empty());
    }

    /// Agents filed under `cell`.
    pub fn bucket(&self, cell: CellId) -> &[AgentId] {
        self.buckets.get(&cell).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Members of every bucket in the `(2r+1)²` window of cells centered on
    /// the cell containing `pos`, clipped at the grid edge.  A superset of
    /// the agents within `r` cells; apply a precise range check afterwards.
    pub fn query_neighborhood<'a>(
        &'a self,
        grid: &'a TileGrid,
        pos: Vec3,
        cell_radius: i32,
    ) -> impl Iterator<Item = AgentId> + 'a {
        let center = grid.cell_of_clamped(pos);
        let r = cell_radius.max(0);
        (-r..=r)
            .flat_map(move |dr| (-r..=r).map(move |dc| center.offset(dc, dr)))
            .filter_map(move |c: CellCoord| grid.cell_id(c))
            .flat_map(move |cell| self.bucket(cell).iter().copied())
    }

    /// Every non-empty bucket, in no particular order.
    pub fn buckets(&self) -> impl Iterator<Item = (CellId, &[AgentId])> + '_ {
        self.buckets.iter().map(|(cell, ids)| (*cell, ids.as_slice()))
    }

    /// Number of agents filed by the last rebuild.
    pub fn len(&self) -> usize {
        self.indexed
    }

    pub fn is_empty(&self) -> bool {
        self.indexed == 0
    }
}

// ── ResourceIndex ─────────────────────────────────────────────────────────────

/// R-tree entry: a 2-D `[x, y]` point with the food item's slot.
#[derive(Clone)]
struct ResourceEntry {
    point: [f32; 2],
    id:    AgentId,
}

impl RTreeObject for ResourceEntry {
    type Envelope = AABB<[f32; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for ResourceEntry {
    fn distance_2(&self, point: &[f32; 2]) -> f32 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

/// Nearest-food lookup over the active `Food` items with portions left.
#[derive(Default)]
pub struct ResourceIndex {
    tree: RTree<ResourceEntry>,
}

impl ResourceIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bulk-load from the pool.  Called alongside `SpatialGrid::rebuild`.
    pub fn rebuild(&mut self, pool: &AgentPool) {
        let entries = pool
            .iter_active()
            .filter(|a| a.role == Role::Food && a.resource_count > 0)
            .map(|a| ResourceEntry { point: [a.pos.x, a.pos.y], id: a.id })
            .collect();
        self.tree = RTree::bulk_load(entries);
    }

    /// Closest indexed item to `pos` accepted by `keep`.  Walks the tree in
    /// distance order and stops at the first accepted item.
    pub fn nearest_where(&self, pos: Vec3, mut keep: impl FnMut(AgentId) -> bool) -> Option<AgentId> {
        self.tree
            .nearest_neighbor_iter(&[pos.x, pos.y])
            .map(|e| e.id)
            .find(|id| keep(*id))
    }

    pub fn len(&self) -> usize {
        self.tree.size()
    }

    pub fn is_empty(&self) -> bool {
        self.tree.size() == 0
    }
}
