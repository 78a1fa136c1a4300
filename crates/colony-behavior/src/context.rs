//! The context every state machine runs against.

use colony_bus::{Delivery, Message, PostOffice, SCENE};

use crate::World;

/// The world plus the post office that delivers into it.
///
/// Kept as two fields so a state can hold `&mut ctx.world` and still post
/// through `ctx.send`, which splits the borrow internally.
pub struct SimContext {
    pub world: World,
    pub bus:   PostOffice<World>,
}

impl SimContext {
    pub fn new(world: World, bus: PostOffice<World>) -> Self {
        Self { world, bus }
    }

    /// Deliver `message` to the scene recipient, synchronously.
    #[inline]
    pub fn send(&mut self, message: Message) -> Delivery {
        self.bus.send(SCENE, message, &mut self.world)
    }
}
