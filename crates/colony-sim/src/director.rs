//! `SceneDirector` — the recipient registered under `SCENE`.
//!
//! | Message             | Effect                                                      |
//! |---------------------|-------------------------------------------------------------|
//! | `SpawnUnit`         | spawn `role` for the spawner's team at `position`           |
//! | `ResourceDelivered` | credit the team's resource total                            |
//! | `UnitDied`          | record the casualty (and queen loss) in the ledger          |
//! | `ResourceFound`     | remember the item in the team's exploration map             |
//! | `EnemySpotted`      | soldiers and tanks near the enemy take it as their target   |
//! | `RequestHelp`       | soldiers within `HELP_CELLS` head for the caller            |
//! | `QueenThreat`       | every military unit of the team returns to the queen        |

use colony_bus::{Message, Recipient};
use colony_behavior::World;
use colony_core::{AgentRef, Role, Team, Vec3};
use tracing::{debug, trace};

/// Radius, in cells, within which soldiers answer a `RequestHelp`.
const HELP_CELLS: f32 = 8.0;

/// Applies scene-level consequences of every [`Message`] kind.
#[derive(Debug, Default)]
pub struct SceneDirector {
    handled: u64,
}

impl SceneDirector {
    pub fn new() -> Self {
        Self::default()
    }

    /// Messages handled so far.
    pub fn handled(&self) -> u64 {
        self.handled
    }

    fn spawn_unit(world: &mut World, spawner: AgentRef, role: Role, position: Vec3) -> bool {
        let Some(team) = world.agents.get_live(spawner).map(|a| a.team) else {
            trace!(%spawner, %role, "spawn request from a dead spawner dropped");
            return false;
        };
        let id = world.spawn(role, team, position);
        if role.is_resource() {
            return true;
        }
        if let Some(home) = world.colony(team) {
            if let Some(unit) = world.agents.get_mut(id) {
                unit.home_base = home;
            }
        }
        world.ledger.record_spawn(team);
        debug!(%id, %role, %team, "unit spawned on request");
        true
    }

    fn resource_found(world: &mut World, location: Vec3, team: Team) -> bool {
        let near = world.cell_size() * 0.5;
        let item = world
            .agents
            .iter_active()
            .filter(|a| a.role == Role::Food)
            .map(|a| (a.pos.distance_squared(location), a.agent_ref()))
            .filter(|(d, _)| *d <= near * near)
            .min_by(|a, b| a.0.total_cmp(&b.0))
            .map(|(_, r)| r);
        let (Some(item), Some(map)) = (item, world.exploration_mut(team)) else { return false };
        map.record_resource(item, location);
        true
    }

    fn enemy_spotted(world: &mut World, enemy: AgentRef, team: Team) -> bool {
        let Some(enemy_pos) = world.agents.get_live(enemy).map(|a| a.pos) else { return false };
        let mut alerted = 0usize;
        for unit in world.agents.iter_active_mut().filter(|a| a.team == team && a.role.is_military()) {
            let reach = unit.detection_range * unit.detection_range * 2.0;
            if unit.pos.distance_squared(enemy_pos) < reach {
                unit.target_enemy = Some(enemy);
                alerted += 1;
            }
        }
        trace!(%enemy, %team, alerted, "enemy sighting relayed");
        true
    }

    fn request_help(world: &mut World, location: Vec3, team: Team) -> bool {
        let radius = world.cell_size() * HELP_CELLS;
        for unit in world.agents.iter_active_mut().filter(|a| a.team == team && a.role == Role::Soldier) {
            if unit.pos.distance_squared(location) < radius * radius {
                unit.target = location;
            }
        }
        true
    }

    fn queen_threat(world: &mut World, queen: AgentRef, team: Team) -> bool {
        let Some((queen_pos, enemy)) = world.agents.get_live(queen).map(|q| (q.pos, q.target_enemy)) else {
            return false;
        };
        for unit in world.agents.iter_active_mut().filter(|a| a.team == team && a.role.is_military()) {
            unit.target = queen_pos;
            unit.target_enemy = enemy;
        }
        debug!(%queen, %team, "queen under threat, guard recalled");
        true
    }
}

impl Recipient<World> for SceneDirector {
    fn handle(&mut self, message: &Message, world: &mut World) -> bool {
        let handled = match *message {
            Message::SpawnUnit { spawner, role, position } => {
                Self::spawn_unit(world, spawner, role, position)
            }
            Message::ResourceDelivered { amount, team, .. } => {
                world.ledger.credit(team, amount);
                true
            }
            Message::UnitDied { unit, team, role } => {
                world.ledger.record_death(unit, team, role);
                true
            }
            Message::ResourceFound { location, team, .. } => Self::resource_found(world, location, team),
            Message::EnemySpotted { enemy, team, .. } => Self::enemy_spotted(world, enemy, team),
            Message::RequestHelp { location, team, .. } => Self::request_help(world, location, team),
            Message::QueenThreat { queen, team } => Self::queen_threat(world, queen, team),
        };
        if handled {
            self.handled += 1;
        }
        handled
    }
}
