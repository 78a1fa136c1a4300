//! Per-role state sets and [`install_behavior`].
//!
//! Every state checks its triggers in the same order and acts on the first
//! one that fires:
//!
//! 1. survival (flee or retreat below a health threshold),
//! 2. a cached target that no longer resolves,
//! 3. engagement with a live enemy,
//! 4. the state's own task.
//!
//! | Role        | States                                            | Initial        |
//! |-------------|---------------------------------------------------|----------------|
//! | `Worker`    | Idle, Searching, Gathering, Fleeing               | Idle           |
//! | `Soldier`   | Patrolling, Attacking, Resting, Retreating        | Patrolling     |
//! | `Queen`     | Spawning, Emergency, Cooldown, Fleeing            | Spawning       |
//! | `Healer`    | Idle, Traveling, Healing                          | Idle           |
//! | `Scout`     | Patrolling, ReturnToColony, Hiding                | Patrolling     |
//! | `Tank`      | Guarding, Blocking, Recovering                    | Guarding       |
//! | `Pheromone` | Fading                                            | Fading         |
//!
//! Food items are passive and get an empty machine.

use colony_core::{AgentId, AgentRef, Role, Vec3};
use colony_fsm::StateMachine;

use crate::{BehaviorResult, SimContext, World};

pub mod healer;
pub mod pheromone;
pub mod queen;
pub mod scout;
pub mod soldier;
pub mod tank;
pub mod worker;

/// Build and start the state machine for a unit of `role` in slot `id`.
///
/// The initial state is entered on the machine's first update.
pub fn install_behavior(role: Role, id: AgentId) -> BehaviorResult<StateMachine<SimContext>> {
    let (mut machine, initial) = match role {
        Role::Worker    => (worker::machine(id), worker::IDLE),
        Role::Soldier   => (soldier::machine(id), soldier::PATROLLING),
        Role::Queen     => (queen::machine(id), queen::SPAWNING),
        Role::Healer    => (healer::machine(id), healer::IDLE),
        Role::Scout     => (scout::machine(id), scout::PATROLLING),
        Role::Tank      => (tank::machine(id), tank::GUARDING),
        Role::Pheromone => (pheromone::machine(id), pheromone::FADING),
        Role::Food      => return Ok(StateMachine::new(id)),
    };
    machine.start(initial)?;
    Ok(machine)
}

// ── Shared helpers ────────────────────────────────────────────────────────────

/// `id`'s enemy if it still resolves.  A stale reference is cleared.
pub(crate) fn live_enemy(world: &mut World, id: AgentId) -> Option<(AgentRef, Vec3)> {
    let r = world.agents.get(id)?.target_enemy?;
    match world.agents.get_live(r) {
        Some(enemy) => Some((r, enemy.pos)),
        None => {
            if let Some(me) = world.agents.get_mut(id) {
                me.target_enemy = None;
            }
            None
        }
    }
}

/// Health fraction of `id`, `0.0` when the slot does not exist.
#[inline]
pub(crate) fn health_of(world: &World, id: AgentId) -> f32 {
    world.agents.get(id).map_or(0.0, |a| a.health_fraction())
}

#[inline]
pub(crate) fn within(a: Vec3, b: Vec3, range: f32) -> bool {
    a.distance_squared(b) <= range * range
}

/// Set `id`'s speed to `factor` times its base speed.
pub(crate) fn set_pace(world: &mut World, id: AgentId, factor: f32) {
    if let Some(me) = world.agents.get_mut(id) {
        me.move_speed = me.base_speed * factor;
    }
}

/// Set `id`'s movement target.
pub(crate) fn head_for(world: &mut World, id: AgentId, target: Vec3) {
    if let Some(me) = world.agents.get_mut(id) {
        me.target = target;
    }
}
