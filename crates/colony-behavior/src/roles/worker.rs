//! Worker: forage food near home, carry portions back, flee when hurt.
//!
//! ```text
//!   Idle ──1 s──▶ Searching ──food seen──▶ Gathering ──delivered──▶ Idle
//!     │               │                        │
//!     └───────────────┴──── hurt + enemy ──────┴──▶ Fleeing ──safe──▶ Idle
//! ```
//!
//! On pickup the cells walked since entering Searching are replayed in
//! reverse as the route home.  A worker still carrying a portion when it
//! comes back from Fleeing goes straight to Gathering to deliver it.

use colony_bus::Message;
use colony_core::{AgentId, AgentRef, Role, Vec3};
use colony_fsm::{NextState, State, StateMachine};
use tracing::debug;

use super::{head_for, health_of, live_enemy, set_pace, within};
use crate::{SimContext, World};

pub const IDLE:      &str = "Idle";
pub const SEARCHING: &str = "Searching";
pub const GATHERING: &str = "Gathering";
pub const FLEEING:   &str = "Fleeing";

const FLEE_BELOW:   f32 = 0.4;
const IDLE_SECS:    f32 = 1.0;
const WANDER_SECS:  f32 = 3.0;
const WANDER_CELLS: i32 = 4;
const GATHER_PACE:  f32 = 0.66;
const FLEE_PACE:    f32 = 1.5;
/// Distance, in cells, a fleeing worker aims away from its attacker.
const FLEE_CELLS:   f32 = 3.0;

pub(crate) fn machine(id: AgentId) -> StateMachine<SimContext> {
    StateMachine::new(id)
        .with_state(IDLE, Box::new(Idle { id, waited: 0.0 }))
        .with_state(SEARCHING, Box::new(Searching { id, wander: 0.0 }))
        .with_state(GATHERING, Box::new(Gathering { id, reserved: None }))
        .with_state(FLEEING, Box::new(Fleeing { id }))
}

fn should_flee(world: &mut World, id: AgentId) -> bool {
    live_enemy(world, id).is_some() && health_of(world, id) < FLEE_BELOW
}

fn is_carrying(world: &World, id: AgentId) -> bool {
    world.agents.get(id).is_some_and(|a| a.carrying)
}

/// Position of a live food item with portions left.
fn harvestable(world: &World, food: AgentRef) -> Option<Vec3> {
    world
        .agents
        .get_live(food)
        .filter(|f| f.role == Role::Food && f.resource_count > 0)
        .map(|f| f.pos)
}

/// Closest item the team's scouts have reported that is still harvestable.
fn nearest_reported(world: &World, id: AgentId) -> Option<Vec3> {
    let me = world.agents.get(id)?;
    world
        .exploration(me.team)?
        .known_resources()
        .iter()
        .filter_map(|(r, _)| harvestable(world, *r))
        .min_by(|a, b| a.distance_squared(me.pos).total_cmp(&b.distance_squared(me.pos)))
}

// ── Idle ──────────────────────────────────────────────────────────────────────

struct Idle {
    id:     AgentId,
    waited: f32,
}

impl State<SimContext> for Idle {
    fn enter(&mut self, ctx: &mut SimContext) {
        self.waited = 0.0;
        set_pace(&mut ctx.world, self.id, 0.0);
        if let Some(me) = ctx.world.agents.get_mut(self.id) {
            me.record_path = false;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if should_flee(&mut ctx.world, self.id) {
            next.set(FLEEING);
            return;
        }
        if is_carrying(&ctx.world, self.id) {
            next.set(GATHERING);
            return;
        }
        self.waited += dt;
        if self.waited >= IDLE_SECS {
            next.set(SEARCHING);
        }
    }
}

// ── Searching ─────────────────────────────────────────────────────────────────

struct Searching {
    id:     AgentId,
    /// Seconds until a new wander point is drawn.
    wander: f32,
}

impl State<SimContext> for Searching {
    fn enter(&mut self, ctx: &mut SimContext) {
        self.wander = 0.0;
        set_pace(&mut ctx.world, self.id, 1.0);
        if let Some(me) = ctx.world.agents.get_mut(self.id) {
            me.target_food = None;
            me.path_history.clear();
            me.record_path = true;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        let world = &mut ctx.world;
        if should_flee(world, self.id) {
            next.set(FLEEING);
            return;
        }

        let Some(me) = world.agents.get(self.id) else { return };
        if me.carrying {
            next.set(GATHERING);
            return;
        }
        if let Some(food) = me.target_food {
            if harvestable(world, food).is_some() {
                next.set(GATHERING);
                return;
            }
            if let Some(me) = world.agents.get_mut(self.id) {
                me.target_food = None;
            }
        }

        if let Some(spot) = nearest_reported(world, self.id) {
            head_for(world, self.id, spot);
            return;
        }

        let Some(me) = world.agents.get(self.id) else { return };
        let (pos, target, home) = (me.pos, me.target, me.home_base);
        self.wander -= dt;
        if self.wander <= 0.0 || within(pos, target, world.cell_size() * 0.5) {
            let spot = world.random_cell_near(self.id, home, WANDER_CELLS);
            head_for(world, self.id, spot);
            self.wander = WANDER_SECS;
        }
    }
}

// ── Gathering ─────────────────────────────────────────────────────────────────

struct Gathering {
    id:       AgentId,
    /// Item whose `harvesters` count this worker has incremented.
    reserved: Option<AgentRef>,
}

impl Gathering {
    fn release(&mut self, world: &mut World) {
        if let Some(food) = self.reserved.take().and_then(|r| world.agents.get_live_mut(r)) {
            food.harvesters = food.harvesters.saturating_sub(1);
        }
    }

    /// Take one portion from `food` and turn around along the walked route.
    fn pick_up(&mut self, world: &mut World, food_ref: AgentRef) {
        self.release(world);
        let Some(food) = world.agents.get_live_mut(food_ref) else { return };
        food.resource_count = food.resource_count.saturating_sub(1);
        if food.resource_count == 0 {
            debug!(food = %food_ref, "food depleted");
            world.agents.deactivate(food_ref.id);
            for map in &mut world.exploration {
                map.forget_resource(food_ref);
            }
        }

        let grid = &world.grid;
        let Some(me) = world.agents.get_mut(self.id) else { return };
        me.carrying = true;
        me.carried = 1;
        me.target_food = None;
        me.gather_timer = 0.0;
        me.record_path = false;
        me.path = me.path_history.drain(..).rev().collect();
        me.target = me
            .path
            .back()
            .and_then(|c| grid.coord_of(*c))
            .map_or(me.home_base, |c| grid.center_of(c));
    }
}

impl State<SimContext> for Gathering {
    fn enter(&mut self, ctx: &mut SimContext) {
        let world = &mut ctx.world;
        set_pace(world, self.id, GATHER_PACE);
        let Some(me) = world.agents.get_mut(self.id) else { return };
        me.gather_timer = 0.0;
        if me.carrying {
            // Back from Fleeing with a portion: the old route is gone.
            me.path.clear();
            me.target = me.home_base;
            return;
        }
        let food = me.target_food;
        if let Some(item) = food.and_then(|r| world.agents.get_live_mut(r)) {
            item.harvesters += 1;
            self.reserved = food;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if should_flee(&mut ctx.world, self.id) {
            next.set(FLEEING);
            return;
        }

        let reach = ctx.world.config.interact_range();
        let gather_time = ctx.world.config.gather_time;
        let Some(me) = ctx.world.agents.get(self.id) else { return };

        if me.carrying {
            let (pos, home, carried, team) = (me.pos, me.home_base, me.carried, me.team);
            let (worker, path_done) = (me.agent_ref(), me.path.is_empty());
            if within(pos, home, reach) {
                if let Some(me) = ctx.world.agents.get_mut(self.id) {
                    me.carrying = false;
                    me.carried = 0;
                    me.path.clear();
                    me.path_history.clear();
                }
                ctx.send(Message::ResourceDelivered { worker, amount: carried, team });
                next.set(IDLE);
            } else if path_done {
                head_for(&mut ctx.world, self.id, home);
            }
            return;
        }

        let pos = me.pos;
        let Some(food_ref) = me.target_food else {
            next.set(SEARCHING);
            return;
        };
        let Some(food_pos) = harvestable(&ctx.world, food_ref) else {
            if let Some(me) = ctx.world.agents.get_mut(self.id) {
                me.target_food = None;
            }
            next.set(SEARCHING);
            return;
        };

        head_for(&mut ctx.world, self.id, food_pos);
        if !within(pos, food_pos, reach) {
            return;
        }
        let Some(me) = ctx.world.agents.get_mut(self.id) else { return };
        me.gather_timer += dt;
        if me.gather_timer >= gather_time {
            self.pick_up(&mut ctx.world, food_ref);
        }
    }

    fn exit(&mut self, ctx: &mut SimContext) {
        self.release(&mut ctx.world);
    }
}

// ── Fleeing ───────────────────────────────────────────────────────────────────

struct Fleeing {
    id: AgentId,
}

impl State<SimContext> for Fleeing {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, FLEE_PACE);
        let Some(me) = ctx.world.agents.get_mut(self.id) else { return };
        me.record_path = false;
        let help = Message::RequestHelp { caller: me.agent_ref(), location: me.pos, team: me.team };
        ctx.send(help);
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        let world = &mut ctx.world;
        let Some((_, enemy_pos)) = live_enemy(world, self.id) else {
            next.set(IDLE);
            return;
        };
        let step = world.cell_size() * FLEE_CELLS;
        let grid = &world.grid;
        let Some(me) = world.agents.get_mut(self.id) else { return };

        let safe = me.detection_range * 2.0;
        if me.pos.distance_squared(enemy_pos) > safe * safe {
            me.target_enemy = None;
            next.set(IDLE);
            return;
        }
        let away = (me.pos - enemy_pos).normalized();
        me.target = grid.clamp_to_world(me.pos + away * step);
    }
}
