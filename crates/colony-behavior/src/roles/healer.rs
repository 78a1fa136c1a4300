//! Healer: walk to an injured teammate and restore its health.

use colony_core::{AgentId, AgentRef, Vec3};
use colony_fsm::{NextState, State, StateMachine};

use super::{head_for, set_pace, within};
use crate::{SimContext, World};

pub const IDLE:      &str = "Idle";
pub const TRAVELING: &str = "Traveling";
pub const HEALING:   &str = "Healing";

/// Health per second given to the patient.
const HEAL_RATE:     f32 = 5.0;
/// Distance, in cells, at which healing starts.
const REACH_CELLS:   f32 = 1.5;
/// A patient further than this, in cells, has to be followed again.
const TETHER_CELLS:  f32 = 2.0;

pub(crate) fn machine(id: AgentId) -> StateMachine<SimContext> {
    StateMachine::new(id)
        .with_state(IDLE, Box::new(Idle { id }))
        .with_state(TRAVELING, Box::new(Traveling { id }))
        .with_state(HEALING, Box::new(Healing { id }))
}

/// The healer's patient and its position, if it is live and still injured.
/// Any other cached patient is dropped.
fn patient(world: &mut World, id: AgentId) -> Option<(AgentRef, Vec3)> {
    let r = world.agents.get(id)?.target_ally?;
    let found = world.agents.get_live(r).filter(|a| a.is_injured()).map(|a| (r, a.pos));
    if found.is_none() {
        if let Some(me) = world.agents.get_mut(id) {
            me.target_ally = None;
        }
    }
    found
}

struct Idle {
    id: AgentId,
}

impl State<SimContext> for Idle {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 0.0);
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        if patient(&mut ctx.world, self.id).is_some() {
            next.set(TRAVELING);
        }
    }
}

struct Traveling {
    id: AgentId,
}

impl State<SimContext> for Traveling {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 1.0);
    }

    fn update(&mut self, ctx: &mut SimContext, _dt: f32, next: &mut NextState) {
        let world = &mut ctx.world;
        let Some((_, ally_pos)) = patient(world, self.id) else {
            next.set(IDLE);
            return;
        };
        head_for(world, self.id, ally_pos);
        let reach = world.cell_size() * REACH_CELLS;
        if world.agents.get(self.id).is_some_and(|me| within(me.pos, ally_pos, reach)) {
            next.set(HEALING);
        }
    }
}

struct Healing {
    id: AgentId,
}

impl State<SimContext> for Healing {
    fn enter(&mut self, ctx: &mut SimContext) {
        set_pace(&mut ctx.world, self.id, 0.0);
    }

    fn update(&mut self, ctx: &mut SimContext, dt: f32, next: &mut NextState) {
        let world = &mut ctx.world;
        let Some((ally, ally_pos)) = patient(world, self.id) else {
            next.set(IDLE);
            return;
        };
        let tether = world.cell_size() * TETHER_CELLS;
        if world.agents.get(self.id).is_some_and(|me| !within(me.pos, ally_pos, tether)) {
            next.set(TRAVELING);
            return;
        }
        let full = world.agents.get_live_mut(ally).is_some_and(|a| a.heal(HEAL_RATE * dt));
        if full {
            if let Some(me) = world.agents.get_mut(self.id) {
                me.target_ally = None;
            }
            next.set(IDLE);
        }
    }
}
