//! Queen: periodic spawning, emergency defense, retreat to the corner.

use colony_bus::Message;
use colony_core::{AgentId, Role};
use colony_fsm::{NextState, State, StateMachine};

use super::{health_of, live_enemy, set_pace};
use crate::SimContext;

pub const SPAWNING:  &str = "Spawning";
pub const EMERGENCY: &str = "Emergency";
pub const COOLDOWN:  &str = "Cooldown";
pub const FLEEING:   &str = "Fleeing";

const FLEE_BELOW:      f32 = 0.2;
const RECOVER_ABOVE:   f32 = 0.5;
const FLEE_PACE:       f32 = 0.5;
/// Soldiers requested on entering Emergency.
const EMERGENCY_GUARD: usize = 3;

pub(crate) fn machine(id: AgentId) -> StateMachine<SimContext> {
    StateMachine::new(id)
        .with_state(SPAWNING, Box::new(Spawning { id }))
        .with_state(EMERGENCY, Box::new(Emergency { id }))
        .with_state(COOLDOWN, Box::new(Cooldown { id, waited: 0.0 }))
        .with_state(FLEEING, Box::new(Fleeing { id }))
}

fn request_spawn(ctx: &mut SimContext, id: AgentId, role: Role) {
    let Some(me) = ctx.world.agents.get_mut(id) else { return };
    me.units_spawned += 1;
    let spawn = Message::SpawnUnit { spawner: me.agent_ref(), role, position: me.pos };
    ctx.send(spawn);
}

// ── Spawning ──────────────────────────────────────────────────────────────────

struct Spawning {
    id: AgentId,
}

impl State<SimContext> for Spawning {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 0.0);
        if let Some(me) = ctx.world.agents.get_mut(self.id) {
            me.spawn_cooldown = 0.0;
            me.target = me.pos;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if health_of(&ctx.world, self.id) < FLEE_BELOW {
            next.set(FLEEING);
            return;
        }
        if live_enemy(&mut ctx.world, self.id).is_some() {
            let Some(me) = ctx.world.agents.get(self.id) else { return };
            let threat = Message::QueenThreat { queen: me.agent_ref(), team: me.team };
            ctx.send(threat);
            next.set(EMERGENCY);
            return;
        }

        let interval = ctx.world.config.spawn_interval;
        let Some((me, rng)) = ctx.world.agents.agent_and_rng_mut(self.id) else { return };
        me.spawn_cooldown += dt;
        if me.spawn_cooldown <= interval {
            return;
        }
        me.spawn_cooldown = 0.0;
        let role = rng.choose(&Role::SPAWNABLE).copied().unwrap_or(Role::Worker);
        request_spawn(ctx, self.id, role);
        next.set(COOLDOWN);
    }
}

// ── Emergency ─────────────────────────────────────────────────────────────────

struct Emergency {
    id: AgentId,
}

impl State<SimContext> for Emergency {
    fn enter(&mut self, ctx: &mut SimContext) {
        for _ in 0..EMERGENCY_GUARD {
            request_spawn(ctx, self.id, Role::Soldier);
        }
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        if health_of(&ctx.world, self.id) < FLEE_BELOW {
            next.set(FLEEING);
            return;
        }
        if live_enemy(&mut ctx.world, self.id).is_none() {
            next.set(COOLDOWN);
        }
    }
}

// ── Cooldown ──────────────────────────────────────────────────────────────────

struct Cooldown {
    id:     AgentId,
    waited: f32,
}

impl State<SimContext> for Cooldown {
    fn enter(&mut self, _ctx: &mut SimContext) {
        self.waited = 0.0;
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if health_of(&ctx.world, self.id) < FLEE_BELOW {
            next.set(FLEEING);
            return;
        }
        self.waited += dt;
        if self.waited >= ctx.world.config.queen_cooldown {
            next.set(SPAWNING);
        }
    }
}

// ── Fleeing ───────────────────────────────────────────────────────────────────

struct Fleeing {
    id: AgentId,
}

impl State<SimContext> for Fleeing {
    fn enter(&mut self, ctx: &mut SimContext) {
        let world = &mut ctx.world;
        set_pace(world, self.id, FLEE_PACE);
        let Some(team) = world.agents.get(self.id).map(|a| a.team) else { return };
        let corner = world.corner(team);
        if let Some(me) = world.agents.get_mut(self.id) {
            me.target = corner;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        if health_of(&ctx.world, self.id) > RECOVER_ABOVE {
            next.set(SPAWNING);
        }
    }

    fn exit(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 0.0);
    }
}
