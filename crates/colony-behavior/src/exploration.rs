//! Per-team shared knowledge: which cells scouts have seen, where the enemy
//! colony is, and which food items have been reported.

use colony_core::{AgentRef, CellId, Vec3};

/// What one colony knows about the map.
///
/// Owned by the `World`, one per team, and cleared with [`reset`](Self::reset)
/// when a simulation is rebuilt.
#[derive(Clone, Debug, Default)]
pub struct ExplorationMap {
    visited:         Vec<bool>,
    visited_count:   usize,
    enemy_colony:    Option<Vec3>,
    known_resources: Vec<(AgentRef, Vec3)>,
}

impl ExplorationMap {
    pub fn new(cell_count: usize) -> Self {
        Self { visited: vec![false; cell_count], ..Self::default() }
    }

    /// Record that a unit of this team stood in `cell`.  Returns `true` the
    /// first time.
    pub fn mark_visited(&mut self, cell: CellId) -> bool {
        match self.visited.get_mut(cell.index()) {
            Some(seen) if !*seen => {
                *seen = true;
                self.visited_count += 1;
                true
            }
            _ => false,
        }
    }

    #[inline]
    pub fn is_visited(&self, cell: CellId) -> bool {
        self.visited.get(cell.index()).copied().unwrap_or(false)
    }

    pub fn visited_count(&self) -> usize {
        self.visited_count
    }

    /// Fraction of cells visited, in `[0, 1]`.
    pub fn coverage(&self) -> f32 {
        if self.visited.is_empty() {
            0.0
        } else {
            self.visited_count as f32 / self.visited.len() as f32
        }
    }

    pub fn enemy_colony(&self) -> Option<Vec3> {
        self.enemy_colony
    }

    /// Remember the enemy colony.  Returns `true` if it was not known yet.
    pub fn set_enemy_colony(&mut self, pos: Vec3) -> bool {
        let first = self.enemy_colony.is_none();
        self.enemy_colony = Some(pos);
        first
    }

    /// Remember a reported food item.  Re-reporting the same item only
    /// refreshes its position.
    pub fn record_resource(&mut self, item: AgentRef, pos: Vec3) {
        match self.known_resources.iter_mut().find(|(r, _)| *r == item) {
            Some(entry) => entry.1 = pos,
            None => self.known_resources.push((item, pos)),
        }
    }

    pub fn forget_resource(&mut self, item: AgentRef) {
        self.known_resources.retain(|(r, _)| *r != item);
    }

    pub fn known_resources(&self) -> &[(AgentRef, Vec3)] {
        &self.known_resources
    }

    /// Forget everything.  The cell count is kept.
    pub fn reset(&mut self) {
        self.visited.fill(false);
        self.visited_count = 0;
        self.enemy_colony = None;
        self.known_resources.clear();
    }
}
