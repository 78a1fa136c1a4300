//! Scout: explore, report food and the enemy colony, lay pheromone trails.
//!
//! Every cell a patrolling scout stands in is marked on its team's
//! `ExplorationMap`, and new exploration targets prefer unvisited cells.

use colony_bus::Message;
use colony_core::{AgentId, Role, Vec3};
use colony_fsm::{NextState, State, StateMachine};
use tracing::debug;

use super::{head_for, health_of, live_enemy, set_pace, within};
use crate::{SimContext, World};

pub const PATROLLING: &str = "Patrolling";
pub const RETURNING:  &str = "ReturnToColony";
pub const HIDING:     &str = "Hiding";

const FLEE_BELOW:    f32 = 0.4;
const RETARGET_SECS: f32 = 2.0;
const HIDE_SECS:     f32 = 5.0;
const RETURN_PACE:   f32 = 1.5;
/// An enemy colony this close, in cells, counts as found.
const FOUND_CELLS:   f32 = 5.0;
/// Reach, in cells, for marking a food item.
const MARK_CELLS:    f32 = 1.3;
/// Spacing, in cells, between trail markers on the way home.
const TRAIL_CELLS:   f32 = 0.45;

pub(crate) fn machine(id: AgentId) -> StateMachine<SimContext> {
    StateMachine::new(id)
        .with_state(PATROLLING, Box::new(Patrolling { id, retarget: 0.0 }))
        .with_state(RETURNING, Box::new(Returning { id, last_drop: Vec3::ZERO }))
        .with_state(HIDING, Box::new(Hiding { id, waited: 0.0 }))
}

fn drop_pheromone(ctx: &mut SimContext, id: AgentId) {
    let Some(me) = ctx.world.agents.get(id) else { return };
    let marker = Message::SpawnUnit { spawner: me.agent_ref(), role: Role::Pheromone, position: me.pos };
    ctx.send(marker);
}

/// Mark the scout's cell as visited and check for a nearby enemy colony.
/// Returns `true` when the colony was found just now.
fn survey(world: &mut World, id: AgentId) -> bool {
    let Some(me) = world.agents.get(id) else { return false };
    let (team, pos) = (me.team, me.pos);
    let cell = world.grid.cell_id(world.grid.cell_of_clamped(pos));
    let reach = world.cell_size() * FOUND_CELLS;
    let found = world.enemy_colonies(team).find(|c| within(pos, *c, reach));

    let Some(map) = world.exploration_mut(team) else { return false };
    if let Some(cell) = cell {
        map.mark_visited(cell);
    }
    match found {
        Some(colony) if map.enemy_colony().is_none() => {
            map.set_enemy_colony(colony);
            debug!(scout = %id, %team, %colony, "enemy colony found");
            true
        }
        _ => false,
    }
}

// ── Patrolling ────────────────────────────────────────────────────────────────

struct Patrolling {
    id:       AgentId,
    retarget: f32,
}

impl State<SimContext> for Patrolling {
    fn enter(&mut self, ctx: &mut SimContext) {
        self.retarget = RETARGET_SECS;
        set_pace(&mut ctx.world, self.id, 1.0);
        if let Some(me) = ctx.world.agents.get_mut(self.id) {
            me.target_food = None;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if survey(&mut ctx.world, self.id) {
            drop_pheromone(ctx, self.id);
        }

        if live_enemy(&mut ctx.world, self.id).is_some()
            && health_of(&ctx.world, self.id) < FLEE_BELOW
        {
            next.set(RETURNING);
            return;
        }

        let reach = ctx.world.cell_size() * MARK_CELLS;
        let Some(me) = ctx.world.agents.get(self.id) else { return };
        let (pos, team, scout) = (me.pos, me.team, me.agent_ref());
        if let Some(food_ref) = me.target_food {
            let item = ctx.world.agents.get_live(food_ref).filter(|f| !f.marked).map(|f| f.pos);
            match item {
                None => {
                    if let Some(me) = ctx.world.agents.get_mut(self.id) {
                        me.target_food = None;
                    }
                }
                Some(food_pos) if within(pos, food_pos, reach) => {
                    if let Some(food) = ctx.world.agents.get_live_mut(food_ref) {
                        food.marked = true;
                    }
                    drop_pheromone(ctx, self.id);
                    ctx.send(Message::ResourceFound { discoverer: scout, location: food_pos, team });
                    next.set(RETURNING);
                    return;
                }
                Some(food_pos) => {
                    head_for(&mut ctx.world, self.id, food_pos);
                    return;
                }
            }
        }

        let world = &mut ctx.world;
        let target = world.agents.get(self.id).map_or(pos, |a| a.target);
        self.retarget += dt;
        if self.retarget > RETARGET_SECS || within(pos, target, world.cell_size() * 0.3) {
            let spot = world.exploration_target(self.id);
            head_for(world, self.id, spot);
            self.retarget = 0.0;
        }
    }
}

// ── ReturnToColony ────────────────────────────────────────────────────────────

struct Returning {
    id:        AgentId,
    last_drop: Vec3,
}

impl State<SimContext> for Returning {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, RETURN_PACE);
        let enemy = live_enemy(&mut ctx.world, self.id);
        let Some(me) = ctx.world.agents.get(self.id) else { return };
        self.last_drop = me.pos;
        if let Some((enemy, _)) = enemy {
            let spotted = Message::EnemySpotted { scout: me.agent_ref(), enemy, team: me.team };
            ctx.send(spotted);
        }
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        let enemy = live_enemy(&mut ctx.world, self.id);
        let (near_home, spacing) = (ctx.world.cell_size(), ctx.world.cell_size() * TRAIL_CELLS);
        let Some(me) = ctx.world.agents.get_mut(self.id) else { return };
        me.target = me.home_base;
        let (pos, home, trail) = (me.pos, me.home_base, me.target_food.is_some());

        // An attacker between the scout and home cuts the way back.
        if let Some((_, enemy_pos)) = enemy {
            let blocking = enemy_pos.distance_squared(home) < pos.distance_squared(home);
            if blocking && within(pos, enemy_pos, me.detection_range) {
                next.set(HIDING);
                return;
            }
        }

        if within(pos, home, near_home) {
            me.target_enemy = None;
            next.set(PATROLLING);
            return;
        }
        if trail && !within(pos, self.last_drop, spacing) {
            self.last_drop = pos;
            drop_pheromone(ctx, self.id);
        }
    }
}

// ── Hiding ────────────────────────────────────────────────────────────────────

struct Hiding {
    id:     AgentId,
    waited: f32,
}

impl State<SimContext> for Hiding {
    fn enter(&mut self, ctx: &mut SimContext) {
        self.waited = 0.0;
        let world = &mut ctx.world;
        set_pace(world, self.id, 1.0);
        let Some(team) = world.agents.get(self.id).map(|a| a.team) else { return };
        let spot = world.side_corner(team);
        head_for(world, self.id, spot);
    }

    fn update(&mut self, _ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        self.waited += dt;
        if self.waited > HIDE_SECS {
            next.set(PATROLLING);
        }
    }
}
