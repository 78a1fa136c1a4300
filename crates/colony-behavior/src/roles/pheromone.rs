//! Pheromone marker: fades out after its lifetime.

use colony_core::AgentId;
use colony_fsm::{NextState, State, StateMachine};

use crate::SimContext;

pub const FADING: &str = "Fading";

pub(crate) fn machine(id: AgentId) -> StateMachine<SimContext> {
    StateMachine::new(id).with_state(FADING, Box::new(Fading { id }))
}

struct Fading {
    id: AgentId,
}

impl State<SimContext> for Fading {
    fn update(&mut self, ctx: &mut SimContext, dt: f32, _next: &mut NextState) {
        let Some(me) = ctx.world.agents.get_mut(self.id) else { return };
        me.ttl -= dt;
        if me.ttl <= 0.0 {
            ctx.world.agents.deactivate(self.id);
        }
    }
}
