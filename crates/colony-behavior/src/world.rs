//! `World` — everything a behavior or a message handler may read or write.

use colony_agent::{Agent, AgentPool};
use colony_core::{AgentId, Role, SimClock, SimConfig, SimRng, Team, Vec3};
use colony_spatial::{CellCoord, ResourceIndex, SpatialGrid, TileGrid};
use tracing::debug;

use crate::{ExplorationMap, TeamLedger};

/// Random exploration draws before settling for an already visited cell.
const EXPLORE_ATTEMPTS: usize = 8;

/// The shared simulation state.
///
/// Fields are public so that states, the scene director and the orchestrator
/// can borrow disjoint parts at once (e.g. `agents` mutably while reading
/// `grid`).
pub struct World {
    pub agents:      AgentPool,
    pub grid:        TileGrid,
    /// Cell buckets as of the last stagger rebuild.
    pub spatial:     SpatialGrid,
    /// Harvestable food as of the last stagger rebuild.
    pub resources:   ResourceIndex,
    /// One per team.
    pub exploration: Vec<ExplorationMap>,
    pub ledger:      TeamLedger,
    /// Home position of each team's colony.
    pub colonies:    Vec<Vec3>,
    pub config:      SimConfig,
    pub rng:         SimRng,
    pub clock:       SimClock,
}

impl World {
    pub fn new(config: SimConfig, grid: TileGrid, agents: AgentPool) -> Self {
        let teams = config.teams;
        let cells = grid.cell_count();
        Self {
            agents,
            grid,
            spatial: SpatialGrid::new(),
            resources: ResourceIndex::new(),
            exploration: (0..teams).map(|_| ExplorationMap::new(cells)).collect(),
            ledger: TeamLedger::new(teams),
            colonies: Vec::new(),
            rng: SimRng::new(config.seed),
            clock: SimClock::new(),
            config,
        }
    }

    #[inline]
    pub fn cell_size(&self) -> f32 {
        self.grid.cell_size()
    }

    // ── Spawning ──────────────────────────────────────────────────────────

    /// Fetch and place a unit or item, applying role-specific setup: food
    /// gets its portions, pheromones their lifetime.  The position is clamped
    /// into the world.
    pub fn spawn(&mut self, role: Role, team: Team, pos: Vec3) -> AgentId {
        let pos = self.grid.clamp_to_world(pos);
        let id = self.agents.spawn(role, team, pos);
        if let Some(agent) = self.agents.get_mut(id) {
            match role {
                Role::Food => agent.resource_count = self.config.food_portions,
                Role::Pheromone => agent.ttl = self.config.pheromone_ttl,
                Role::Queen => agent.move_speed = 0.0,
                _ => {}
            }
        }
        id
    }

    /// Record `home` as the colony position of `team`.
    pub fn set_colony(&mut self, team: Team, home: Vec3) {
        let Some(i) = team.index() else { return };
        if self.colonies.len() <= i {
            self.colonies.resize(i + 1, Vec3::ZERO);
        }
        self.colonies[i] = home;
        debug!(%team, %home, "colony placed");
    }

    pub fn colony(&self, team: Team) -> Option<Vec3> {
        team.index().and_then(|i| self.colonies.get(i)).copied()
    }

    /// Colonies of every other team.
    pub fn enemy_colonies(&self, team: Team) -> impl Iterator<Item = Vec3> + '_ {
        self.colonies
            .iter()
            .enumerate()
            .filter(move |(i, _)| team.index() != Some(*i))
            .map(|(_, p)| *p)
    }

    // ── Corners ───────────────────────────────────────────────────────────

    /// Retreat corner of `team`: team 0 the origin, team 1 the far corner,
    /// further teams the two remaining ones.
    pub fn corner(&self, team: Team) -> Vec3 {
        let (w, h) = self.grid.world_size();
        let p = match team.0.rem_euclid(4) {
            0 => Vec3::xy(0.0, 0.0),
            1 => Vec3::xy(w, h),
            2 => Vec3::xy(0.0, h),
            _ => Vec3::xy(w, 0.0),
        };
        self.grid.clamp_to_world(p)
    }

    /// Hiding spot of `team`: the corner on its flank, away from both bases.
    pub fn side_corner(&self, team: Team) -> Vec3 {
        self.corner(Team(team.0.rem_euclid(4) ^ 2))
    }

    pub fn exploration(&self, team: Team) -> Option<&ExplorationMap> {
        team.index().and_then(|i| self.exploration.get(i))
    }

    pub fn exploration_mut(&mut self, team: Team) -> Option<&mut ExplorationMap> {
        team.index().and_then(|i| self.exploration.get_mut(i))
    }

    // ── Lookups ───────────────────────────────────────────────────────────

    #[inline]
    pub fn agent(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id)
    }

    // ── Random targets ────────────────────────────────────────────────────

    /// Center of a random open cell within `radius` cells of `center`, drawn
    /// from `id`'s RNG.  Falls back to the center cell.
    pub fn random_cell_near(&mut self, id: AgentId, center: Vec3, radius: i32) -> Vec3 {
        let origin = self.grid.cell_of_clamped(center);
        let r = radius.max(0);
        if id.index() < self.agents.rngs.len() {
            let rng = self.agents.rngs.get_mut(id);
            for _ in 0..EXPLORE_ATTEMPTS {
                let c = origin.offset(rng.gen_range(-r..=r), rng.gen_range(-r..=r));
                if self.grid.is_open(c) {
                    return self.grid.center_of(c);
                }
            }
        }
        self.grid.center_of(origin)
    }

    /// A random open cell anywhere on the map, preferring cells `id`'s team
    /// has not visited yet.
    pub fn exploration_target(&mut self, id: AgentId) -> Vec3 {
        let Some(agent) = self.agents.get(id) else { return Vec3::ZERO };
        let (team, fallback) = (agent.team, agent.pos);
        if id.index() >= self.agents.rngs.len() {
            return fallback;
        }

        let World { agents, grid, exploration, .. } = self;
        let map = team.index().and_then(|i| exploration.get(i));
        let rng = agents.rngs.get_mut(id);
        let (w, h) = (grid.width() as i32, grid.height() as i32);

        let mut chosen: Option<CellCoord> = None;
        for _ in 0..EXPLORE_ATTEMPTS {
            let c = CellCoord::new(rng.gen_range(0..w), rng.gen_range(0..h));
            let Some(cell) = grid.cell_id(c) else { continue };
            if grid.is_wall(c) {
                continue;
            }
            chosen = Some(c);
            if map.is_none_or(|m| !m.is_visited(cell)) {
                break;
            }
        }
        chosen.map_or(fallback, |c| grid.center_of(c))
    }
}
