//! Soldier: patrol, chase and fight enemies, fall back home to heal.

use colony_bus::Message;
use colony_core::AgentId;
use colony_fsm::{NextState, State, StateMachine};

use super::{head_for, health_of, live_enemy, set_pace, within};
use crate::combat::{strike, Strike};
use crate::{SimContext, World};

pub const PATROLLING: &str = "Patrolling";
pub const ATTACKING:  &str = "Attacking";
pub const RESTING:    &str = "Resting";
pub const RETREATING: &str = "Retreating";

const RETREAT_BELOW: f32 = 0.3;
const RESUME_ABOVE:  f32 = 0.9;
const MIN_REST_SECS: f32 = 2.0;
/// Health per second regained at a safe home.
const HEAL_RATE:     f32 = 1.0;
const PATROL_SECS:   f32 = 4.0;
const PATROL_CELLS:  i32 = 8;
const RETREAT_PACE:  f32 = 1.5;
/// An enemy this many cells from home makes the base unsafe for healing.
const SAFE_CELLS:    f32 = 3.0;

pub(crate) fn machine(id: AgentId) -> StateMachine<SimContext> {
    StateMachine::new(id)
        .with_state(PATROLLING, Box::new(Patrolling { id, retarget: 0.0 }))
        .with_state(ATTACKING, Box::new(Attacking { id }))
        .with_state(RESTING, Box::new(Resting { id, rested: 0.0 }))
        .with_state(RETREATING, Box::new(Retreating { id }))
}

/// No live enemy of `id` stands within `SAFE_CELLS` of its home.
pub(crate) fn base_is_safe(world: &mut World, id: AgentId) -> bool {
    let safe = world.cell_size() * SAFE_CELLS;
    let Some(home) = world.agents.get(id).map(|a| a.home_base) else { return true };
    live_enemy(world, id).is_none_or(|(_, pos)| !within(pos, home, safe))
}

fn call_for_help(ctx: &mut SimContext, id: AgentId) {
    let Some(me) = ctx.world.agents.get(id) else { return };
    let help = Message::RequestHelp { caller: me.agent_ref(), location: me.pos, team: me.team };
    ctx.send(help);
}

// ── Patrolling ────────────────────────────────────────────────────────────────

struct Patrolling {
    id:       AgentId,
    retarget: f32,
}

impl State<SimContext> for Patrolling {
    fn enter(&mut self, ctx: &mut SimContext) {
        self.retarget = 0.0;
        set_pace(&mut ctx.world, self.id, 1.0);
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if health_of(&ctx.world, self.id) < RETREAT_BELOW {
            next.set(RETREATING);
            return;
        }

        if let Some((enemy, _)) = live_enemy(&mut ctx.world, self.id) {
            let Some(me) = ctx.world.agents.get(self.id) else { return };
            let spotted = Message::EnemySpotted { scout: me.agent_ref(), enemy, team: me.team };
            ctx.send(spotted);
            next.set(ATTACKING);
            return;
        }

        let world = &mut ctx.world;
        let Some(me) = world.agents.get(self.id) else { return };
        let (team, home) = (me.team, me.home_base);
        if let Some(colony) = world.exploration(team).and_then(|m| m.enemy_colony()) {
            head_for(world, self.id, colony);
            return;
        }
        self.retarget -= dt;
        if self.retarget <= 0.0 {
            let spot = world.random_cell_near(self.id, home, PATROL_CELLS);
            head_for(world, self.id, spot);
            self.retarget = PATROL_SECS;
        }
    }
}

// ── Attacking ─────────────────────────────────────────────────────────────────

struct Attacking {
    id: AgentId,
}

impl State<SimContext> for Attacking {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 1.0);
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if health_of(&ctx.world, self.id) < RETREAT_BELOW {
            next.set(RETREATING);
            return;
        }
        let Some((_, enemy_pos)) = live_enemy(&mut ctx.world, self.id) else {
            next.set(RESTING);
            return;
        };
        head_for(&mut ctx.world, self.id, enemy_pos);
        if matches!(strike(ctx, self.id, dt, 1.0), Strike::Killed | Strike::NoTarget) {
            next.set(RESTING);
        }
    }
}

// ── Resting ───────────────────────────────────────────────────────────────────

struct Resting {
    id:     AgentId,
    rested: f32,
}

impl State<SimContext> for Resting {
    fn enter(&mut self, ctx: &mut SimContext) {
        self.rested = 0.0;
        let world = &mut ctx.world;
        set_pace(world, self.id, 1.0);
        if let Some(me) = world.agents.get_mut(self.id) {
            me.target = me.home_base;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        let world = &mut ctx.world;
        let health = health_of(world, self.id);
        if live_enemy(world, self.id).is_some() && health >= RETREAT_BELOW {
            next.set(ATTACKING);
            return;
        }

        self.rested += dt;
        let near_home = world.cell_size();
        let safe = base_is_safe(world, self.id);
        let Some(me) = world.agents.get_mut(self.id) else { return };
        if safe && within(me.pos, me.home_base, near_home) {
            me.heal(HEAL_RATE * dt);
        }
        if me.health_fraction() > RESUME_ABOVE && self.rested > MIN_REST_SECS {
            next.set(PATROLLING);
        }
    }
}

// ── Retreating ────────────────────────────────────────────────────────────────

struct Retreating {
    id: AgentId,
}

impl State<SimContext> for Retreating {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, RETREAT_PACE);
        if let Some(me) = ctx.world.agents.get_mut(self.id) {
            me.target = me.home_base;
        }
        call_for_help(ctx, self.id);
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        let near_home = ctx.world.cell_size();
        let Some(me) = ctx.world.agents.get_mut(self.id) else { return };
        me.target = me.home_base;
        if within(me.pos, me.home_base, near_home) {
            next.set(RESTING);
        }
    }
}
