//! Tank: hold the home base, block enemies that come into reach.

use colony_core::AgentId;
use colony_fsm::{NextState, State, StateMachine};

use super::soldier::base_is_safe;
use super::{head_for, health_of, live_enemy, set_pace, within};
use crate::combat::{strike, Strike};
use crate::SimContext;

pub const GUARDING:   &str = "Guarding";
pub const BLOCKING:   &str = "Blocking";
pub const RECOVERING: &str = "Recovering";

const RECOVER_BELOW: f32 = 0.4;
const BREAK_BELOW:   f32 = 0.3;
/// Health per second regained while the base is safe.
const HEAL_RATE:     f32 = 2.0;
/// Blocking holds while the enemy stays within this multiple of the
/// squared attack range.
const HOLD_FACTOR:   f32 = 1.5;

pub(crate) fn machine(id: AgentId) -> StateMachine<SimContext> {
    StateMachine::new(id)
        .with_state(GUARDING, Box::new(Guarding { id }))
        .with_state(BLOCKING, Box::new(Blocking { id }))
        .with_state(RECOVERING, Box::new(Recovering { id }))
}

fn go_home(ctx: &mut SimContext, id: AgentId) {
    let Some(home) = ctx.world.agents.get(id).map(|a| a.home_base) else { return };
    head_for(&mut ctx.world, id, home);
}

struct Guarding {
    id: AgentId,
}

impl State<SimContext> for Guarding {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 1.0);
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        go_home(ctx, self.id);
        if health_of(&ctx.world, self.id) < RECOVER_BELOW {
            next.set(RECOVERING);
            return;
        }
        let Some((_, enemy_pos)) = live_enemy(&mut ctx.world, self.id) else { return };
        let in_reach = ctx
            .world
            .agents
            .get(self.id)
            .is_some_and(|me| within(me.pos, enemy_pos, me.attack_range));
        if in_reach {
            next.set(BLOCKING);
        }
    }
}

struct Blocking {
    id: AgentId,
}

impl State<SimContext> for Blocking {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 0.0);
        if let Some(me) = ctx.world.agents.get_mut(self.id) {
            me.attack_cooldown = 0.0;
        }
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        if health_of(&ctx.world, self.id) < BREAK_BELOW {
            next.set(RECOVERING);
            return;
        }
        let hold = HOLD_FACTOR.sqrt();
        let Some((_, enemy_pos)) = live_enemy(&mut ctx.world, self.id) else {
            next.set(GUARDING);
            return;
        };
        let Some(me) = ctx.world.agents.get_mut(self.id) else { return };
        if !within(me.pos, enemy_pos, me.attack_range * hold) {
            me.target_enemy = None;
            next.set(GUARDING);
            return;
        }
        if strike(ctx, self.id, dt, hold) == Strike::Killed {
            next.set(GUARDING);
        }
    }
}

struct Recovering {
    id: AgentId,
}

impl State<SimContext> for Recovering {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 1.0);
        go_home(ctx, self.id);
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        let safe = base_is_safe(&mut ctx.world, self.id);
        let Some(me) = ctx.world.agents.get_mut(self.id) else { return };
        let full = if safe { me.heal(HEAL_RATE * dt) } else { !me.is_injured() };
        if full {
            next.set(GUARDING);
        }
    }
}
