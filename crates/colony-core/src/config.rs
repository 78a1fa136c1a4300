//! Simulation configuration.
//!
//! Every field has a `Default` that reproduces the standard two-colony
//! match on a 30×30 grid.  Distances in `UnitStats` are world units; the
//! defaults are derived from multiples of the cell size so that changing the
//! grid resolution through [`StatTable::for_cell_size`] keeps unit reach
//! proportional.

use crate::{CoreError, CoreResult, Role};

// ── GridConfig ────────────────────────────────────────────────────────────────

/// Tile grid dimensions.  `cell_offset` is always `cell_size / 2`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct GridConfig {
    /// Cells per row.
    pub width: u32,
    /// Cells per column.
    pub height: u32,
    /// Side length of one square cell, in world units.
    pub cell_size: f32,
}

impl GridConfig {
    pub const DEFAULT_CELLS: u32 = 30;
    pub const DEFAULT_WORLD: f32 = 100.0;

    /// Offset from a cell's corner to its center.
    #[inline]
    pub fn cell_offset(&self) -> f32 {
        self.cell_size * 0.5
    }

    /// World extent along x and y.
    #[inline]
    pub fn world_size(&self) -> (f32, f32) {
        (self.width as f32 * self.cell_size, self.height as f32 * self.cell_size)
    }

    pub fn cell_count(&self) -> usize {
        self.width as usize * self.height as usize
    }
}

impl Default for GridConfig {
    fn default() -> Self {
        Self {
            width:     Self::DEFAULT_CELLS,
            height:    Self::DEFAULT_CELLS,
            cell_size: Self::DEFAULT_WORLD / Self::DEFAULT_CELLS as f32,
        }
    }
}

// ── UnitStats ─────────────────────────────────────────────────────────────────

/// Per-role combat and movement numbers applied by `AgentPool::fetch`.
#[derive(Copy, Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct UnitStats {
    pub max_health:      f32,
    /// Cruise speed in world units per second.  States scale this.
    pub base_speed:      f32,
    pub detection_range: f32,
    pub attack_range:    f32,
    pub attack_power:    f32,
    /// Seconds between two hits.
    pub attack_interval: f32,
}

impl UnitStats {
    /// Inert stats for resource items.
    pub const INERT: UnitStats = UnitStats {
        max_health:      1.0,
        base_speed:      0.0,
        detection_range: 0.0,
        attack_range:    0.0,
        attack_power:    0.0,
        attack_interval: 0.0,
    };
}

/// Stats for every role, indexed by `Role::index()`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct StatTable {
    stats: [UnitStats; Role::ALL.len()],
}

impl StatTable {
    /// Standard roster scaled to `cell` world units per tile.
    pub fn for_cell_size(cell: f32) -> Self {
        let mut stats = [UnitStats::INERT; Role::ALL.len()];

        stats[Role::Queen.index()] = UnitStats {
            max_health:      50.0,
            base_speed:      1.5,
            detection_range: cell * 8.0,
            attack_range:    0.0,
            attack_power:    0.0,
            attack_interval: 0.0,
        };
        stats[Role::Worker.index()] = UnitStats {
            max_health:      8.0,
            base_speed:      3.0,
            detection_range: cell * 6.0,
            attack_range:    cell * 0.8,
            attack_power:    0.5,
            attack_interval: 1.0,
        };
        stats[Role::Soldier.index()] = UnitStats {
            max_health:      15.0,
            base_speed:      4.0,
            detection_range: cell * 8.0,
            attack_range:    cell * 1.2,
            attack_power:    2.5,
            attack_interval: 0.5,
        };
        stats[Role::Healer.index()] = UnitStats {
            max_health:      6.0,
            base_speed:      3.5,
            detection_range: cell * 6.0,
            attack_range:    0.0,
            attack_power:    0.0,
            attack_interval: 0.0,
        };
        stats[Role::Scout.index()] = UnitStats {
            max_health:      6.0,
            base_speed:      5.0,
            detection_range: cell * 7.0,
            attack_range:    cell * 0.8,
            attack_power:    0.5,
            attack_interval: 1.0,
        };
        stats[Role::Tank.index()] = UnitStats {
            max_health:      30.0,
            base_speed:      2.0,
            detection_range: cell * 6.0,
            attack_range:    cell * 1.5,
            attack_power:    2.0,
            attack_interval: 1.5,
        };

        Self { stats }
    }

    #[inline]
    pub fn get(&self, role: Role) -> &UnitStats {
        &self.stats[role.index()]
    }

    pub fn set(&mut self, role: Role, stats: UnitStats) {
        self.stats[role.index()] = stats;
    }
}

impl Default for StatTable {
    fn default() -> Self {
        Self::for_cell_size(GridConfig::default().cell_size)
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically built in code or loaded from JSON by the application crate and
/// handed to `SimBuilder`.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct SimConfig {
    /// Master RNG seed.  The same seed and frame deltas replay identically.
    pub seed: u64,

    pub grid: GridConfig,

    /// Number of colonies.  Team ids run `0..teams`.
    pub teams: u8,

    /// Seconds between spatial rebuilds / detection bucket advances.
    pub stagger_interval: f32,

    /// Number of round-robin detection buckets.
    pub stagger_buckets: u32,

    /// Half-width, in cells, of the neighborhood scanned for enemies.
    pub detection_cells: i32,

    /// Match length in simulated seconds before the score decides.
    pub match_duration: f32,

    /// How long a unit with no reachable path waits before asking again.
    pub repath_interval: f32,

    /// Pool growth step when no free slot of a role exists.
    pub pool_batch: usize,

    /// Portions carried by a freshly spawned food item.
    pub food_portions: u32,

    /// Lifetime of a pheromone marker, in seconds.
    pub pheromone_ttl: f32,

    /// Seconds a worker must stay beside food before it picks up a portion.
    pub gather_time: f32,

    /// Seconds between two regular queen spawns.
    pub spawn_interval: f32,

    /// Seconds a queen rests after spawning.
    pub queen_cooldown: f32,

    pub stats: StatTable,
}

impl SimConfig {
    /// Check cross-field consistency.  Called by `SimBuilder::build`.
    pub fn validate(&self) -> CoreResult<()> {
        if self.grid.width == 0 || self.grid.height == 0 {
            return Err(CoreError::Config(format!(
                "grid must have at least one cell, got {}x{}",
                self.grid.width, self.grid.height
            )));
        }
        if !(self.grid.cell_size > 0.0) {
            return Err(CoreError::Config(format!(
                "cell size must be positive, got {}",
                self.grid.cell_size
            )));
        }
        if self.teams == 0 || self.teams > i8::MAX as u8 {
            return Err(CoreError::Config(format!("team count {} out of range", self.teams)));
        }
        if self.stagger_buckets == 0 {
            return Err(CoreError::Config("stagger_buckets must be at least 1".into()));
        }
        if self.detection_cells < 0 {
            return Err(CoreError::Config("detection_cells must not be negative".into()));
        }
        if self.pool_batch == 0 {
            return Err(CoreError::Config("pool_batch must be at least 1".into()));
        }
        for role in Role::SPAWNABLE.iter().copied().chain([Role::Queen]) {
            if !(self.stats.get(role).max_health > 0.0) {
                return Err(CoreError::MissingStats(role));
            }
        }
        Ok(())
    }

    /// Radius, in world units, inside which workers interact with food and
    /// their home base.
    #[inline]
    pub fn interact_range(&self) -> f32 {
        self.grid.cell_size * 2.0
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        let grid = GridConfig::default();
        let stats = StatTable::for_cell_size(grid.cell_size);
        Self {
            seed:             0,
            grid,
            teams:            2,
            stagger_interval: 0.033,
            stagger_buckets:  3,
            detection_cells:  2,
            match_duration:   300.0,
            repath_interval:  1.0,
            pool_batch:       10,
            food_portions:    3,
            pheromone_ttl:    8.0,
            gather_time:      2.0,
            spawn_interval:   3.0,
            queen_cooldown:   2.0,
            stats,
        }
    }
}
