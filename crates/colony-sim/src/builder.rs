//! Fluent builder for constructing a [`Sim`].

use colony_agent::AgentPoolBuilder;
use colony_behavior::{SimContext, World};
use colony_bus::{PostOffice, SCENE};
use colony_core::{Role, SimConfig, Team, Vec3};
use colony_mobility::MobilityEngine;
use colony_spatial::{BfsPathfinder, CellCoord, Pathfinder, TileGrid};
use tracing::info;

use crate::{SceneDirector, Sim, SimError, SimResult};

/// Cells between a colony and its map corner.
const COLONY_INSET: i32 = 3;
/// Draws before a food item that keeps landing on walls is skipped.
const FOOD_ATTEMPTS: usize = 8;

/// Units each colony starts with besides its queen.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(default))]
pub struct Roster {
    pub workers:  u32,
    pub soldiers: u32,
    pub scouts:   u32,
    pub healers:  u32,
    pub tanks:    u32,
}

impl Roster {
    /// Queen only.
    pub const EMPTY: Roster = Roster { workers: 0, soldiers: 0, scouts: 0, healers: 0, tanks: 0 };

    fn entries(&self) -> [(Role, u32, i32); 5] {
        [
            (Role::Worker, self.workers, 2),
            (Role::Soldier, self.soldiers, 3),
            (Role::Scout, self.scouts, 3),
            (Role::Healer, self.healers, 2),
            (Role::Tank, self.tanks, 2),
        ]
    }
}

impl Default for Roster {
    fn default() -> Self {
        Self { workers: 3, soldiers: 2, scouts: 1, healers: 0, tanks: 0 }
    }
}

/// Fluent builder for [`Sim<P>`].
///
/// # Optional inputs (have defaults)
///
/// | Method              | Default                                        |
/// |---------------------|------------------------------------------------|
/// | `.walls(v)`         | No walls                                       |
/// | `.colonies(v)`      | Three cells in from each team's corner         |
/// | `.roster(r)`        | `Roster::default()` (3 workers, 2 soldiers, 1 scout) |
/// | `.food(n)`          | 15 to 25 items, half in the central zone       |
/// | `.pathfinder(p)`    | `BfsPathfinder`                                |
///
/// # Example
///
/// ```rust,ignore
/// let mut sim = SimBuilder::new(SimConfig::default())
///     .walls(vec![CellCoord::new(10, 10)])
///     .food(20)
///     .build()?;
/// sim.run_for(60.0, 1.0 / 30.0, &mut NoopObserver)?;
/// ```
pub struct SimBuilder<P: Pathfinder = BfsPathfinder> {
    config:     SimConfig,
    walls:      Vec<CellCoord>,
    colonies:   Option<Vec<Vec3>>,
    roster:     Roster,
    food:       Option<u32>,
    pathfinder: P,
}

impl SimBuilder<BfsPathfinder> {
    pub fn new(config: SimConfig) -> Self {
        Self {
            config,
            walls: Vec::new(),
            colonies: None,
            roster: Roster::default(),
            food: None,
            pathfinder: BfsPathfinder,
        }
    }
}

impl<P: Pathfinder> SimBuilder<P> {
    /// Cells to mark as walls.
    pub fn walls(mut self, walls: Vec<CellCoord>) -> Self {
        self.walls = walls;
        self
    }

    /// Home position per team, in team order.  Must list exactly
    /// `config.teams` entries.
    pub fn colonies(mut self, homes: Vec<Vec3>) -> Self {
        self.colonies = Some(homes);
        self
    }

    pub fn roster(mut self, roster: Roster) -> Self {
        self.roster = roster;
        self
    }

    /// Number of food items to scatter.
    pub fn food(mut self, count: u32) -> Self {
        self.food = Some(count);
        self
    }

    /// Swap the search algorithm used for movement.
    pub fn pathfinder<Q: Pathfinder>(self, pathfinder: Q) -> SimBuilder<Q> {
        SimBuilder {
            config: self.config,
            walls: self.walls,
            colonies: self.colonies,
            roster: self.roster,
            food: self.food,
            pathfinder,
        }
    }

    /// Validate inputs, lay out the map and both colonies, and return a
    /// ready-to-run [`Sim`].
    pub fn build(self) -> SimResult<Sim<P>> {
        self.config.validate()?;

        // ── Grid ──────────────────────────────────────────────────────────
        let mut grid = TileGrid::from_config(&self.config.grid)?;
        for &cell in &self.walls {
            grid.set_wall(cell, true)?;
        }

        // ── Colonies ──────────────────────────────────────────────────────
        let teams = usize::from(self.config.teams);
        let homes = match self.colonies {
            Some(h) if h.len() != teams => {
                return Err(SimError::TeamCountMismatch { expected: teams, got: h.len(), what: "colonies" });
            }
            Some(h) => h,
            None => (0..teams).map(|t| default_home(&grid, t)).collect(),
        };

        let pool = AgentPoolBuilder::new(self.config.seed)
            .stats(self.config.stats.clone())
            .batch(self.config.pool_batch)
            .build();
        let mobility = MobilityEngine::new(self.pathfinder, self.config.repath_interval)?;
        let mut world = World::new(self.config, grid, pool);

        for (t, home) in homes.into_iter().enumerate() {
            let team = Team(i8::try_from(t).unwrap_or(i8::MAX));
            let home = world.grid.clamp_to_world(home);
            if world.grid.cell_of(home).is_none_or(|c| world.grid.is_wall(c)) {
                return Err(SimError::ColonyOnWall { team, pos: home });
            }
            world.set_colony(team, home);
            populate_colony(&mut world, team, home, &self.roster);
        }

        // ── Food ──────────────────────────────────────────────────────────
        let food = self.food.unwrap_or_else(|| world.rng.gen_range(15..=25));
        scatter_food(&mut world, food);

        world.spatial.rebuild(&world.agents, &world.grid);
        world.resources.rebuild(&world.agents);
        world.ledger.recount(&world.agents);

        let mut bus = PostOffice::new();
        bus.register(SCENE, Box::new(SceneDirector::new()));

        info!(
            teams,
            food,
            agents = world.agents.active_count(),
            cells = world.grid.cell_count(),
            "match ready"
        );
        Ok(Sim::new(SimContext::new(world, bus), mobility))
    }
}

/// Center of the cell `COLONY_INSET` cells in from team `t`'s corner:
/// team 0 the origin, team 1 the far corner, then the two others.
fn default_home(grid: &TileGrid, t: usize) -> Vec3 {
    let (w, h) = (grid.width() as i32, grid.height() as i32);
    let near = |extent: i32| COLONY_INSET.min(extent - 1);
    let far = |extent: i32| (extent - 1 - COLONY_INSET).max(0);
    let (col, row) = match t % 4 {
        0 => (near(w), near(h)),
        1 => (far(w), far(h)),
        2 => (near(w), far(h)),
        _ => (far(w), near(h)),
    };
    grid.center_of(CellCoord::new(col, row))
}

/// Queen at `home`, then the roster scattered around her.  A unit whose
/// jittered spot is a wall starts at `home` instead.
fn populate_colony(world: &mut World, team: Team, home: Vec3, roster: &Roster) {
    world.spawn(Role::Queen, team, home);
    let cell = world.cell_size();
    for (role, count, spread) in roster.entries() {
        for _ in 0..count {
            let spread = spread as f32 * cell;
            let dx = world.rng.gen_range(-spread..=spread);
            let dy = world.rng.gen_range(-spread..=spread);
            let spot = world.grid.clamp_to_world(home + Vec3::xy(dx, dy));
            let open = world.grid.cell_of(spot).is_some_and(|c| world.grid.is_open(c));
            let id = world.spawn(role, team, if open { spot } else { home });
            if let Some(unit) = world.agents.get_mut(id) {
                unit.home_base = home;
            }
        }
    }
}

/// Half the items in the central 30–70 % zone, the rest anywhere at least
/// two cells from the edge.
fn scatter_food(world: &mut World, count: u32) {
    let (w, h) = world.grid.world_size();
    let cell = world.cell_size();
    for i in 0..count {
        let central = i < count / 2;
        for _ in 0..FOOD_ATTEMPTS {
            let pos = if central {
                Vec3::xy(world.rng.gen_range(w * 0.3..=w * 0.7), world.rng.gen_range(h * 0.3..=h * 0.7))
            } else {
                let (x_hi, y_hi) = ((w - 2.0 * cell).max(2.0 * cell), (h - 2.0 * cell).max(2.0 * cell));
                Vec3::xy(world.rng.gen_range(2.0 * cell..=x_hi), world.rng.gen_range(2.0 * cell..=y_hi))
            };
            let pos = world.grid.clamp_to_world(pos);
            if world.grid.cell_of(pos).is_some_and(|c| world.grid.is_open(c)) {
                world.spawn(Role::Food, Team::NEUTRAL, pos);
                break;
            }
        }
    }
}
