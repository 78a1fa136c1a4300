//! Staggered detection: which enemy, food item and patient each agent sees.
//!
//! Each call senses one bucket of agents (slot index modulo the bucket
//! count), so every agent is refreshed once per full rotation.  Lookups go
//! through `World::spatial` and `World::resources` as of their last rebuild,
//! and every candidate is re-checked against the live pool.
//!
//! The enemy cache is overwritten on every pass, so a hostile that walked
//! out of range is dropped.  Food and patient targets are only replaced
//! once they stop resolving; states discard those themselves.

use colony_behavior::World;
use colony_core::{AgentId, AgentRef, Role};

/// Run detection for every active agent whose slot falls in `bucket`.
/// Returns how many agents were sensed.
pub fn sense_bucket(world: &mut World, bucket: u32, buckets: u32) -> usize {
    let buckets = buckets.max(1) as usize;
    let bucket = bucket as usize % buckets;
    let ids: Vec<AgentId> = world
        .agents
        .iter_active()
        .filter(|a| !a.role.is_resource() && a.id.index() % buckets == bucket)
        .map(|a| a.id)
        .collect();

    for &id in &ids {
        let enemy = nearest_enemy(world, id);
        if let Some(me) = world.agents.get_mut(id) {
            me.target_enemy = enemy;
        }
        let role = world.agents.get(id).map(|a| a.role);
        match role {
            Some(Role::Worker | Role::Scout) => sense_food(world, id),
            Some(Role::Healer) => sense_patient(world, id),
            _ => {}
        }
    }
    ids.len()
}

/// Closest live hostile unit within the agent's detection range, searched
/// in the `detection_cells` window around it.  Ties go to the lower slot.
pub fn nearest_enemy(world: &World, id: AgentId) -> Option<AgentRef> {
    let me = world.agents.get(id).filter(|a| a.active)?;
    let range_sq = me.detection_range * me.detection_range;
    world
        .spatial
        .query_neighborhood(&world.grid, me.pos, world.config.detection_cells)
        .filter(|other| *other != id)
        .filter_map(|other| world.agents.get(other))
        .filter(|o| o.active && !o.role.is_resource() && me.team.is_hostile_to(o.team))
        .map(|o| (o.pos.distance_squared(me.pos), o.id, o.agent_ref()))
        .filter(|(d, _, _)| *d < range_sq)
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, _, r)| r)
}

/// Give a forager with no live food target the nearest harvestable item in
/// detection range.  Scouts skip items already marked; carrying workers
/// are left alone.
fn sense_food(world: &mut World, id: AgentId) {
    let Some(me) = world.agents.get(id) else { return };
    if me.carrying || world.agents.resolve(me.target_food).is_some() {
        return;
    }
    let (pos, range_sq, scout) = (me.pos, me.detection_range * me.detection_range, me.role == Role::Scout);
    let pool = &world.agents;
    let found = world.resources.nearest_where(pos, |fid| {
        pool.get(fid).is_some_and(|f| {
            f.active
                && f.role == Role::Food
                && f.resource_count > 0
                && !(scout && f.marked)
                && f.pos.distance_squared(pos) < range_sq
        })
    });
    let found = found.and_then(|fid| world.agents.reference(fid));
    if let (Some(food), Some(me)) = (found, world.agents.get_mut(id)) {
        me.target_food = Some(food);
    }
}

/// Give a healer with no live, injured patient the nearest injured teammate
/// in detection range.
fn sense_patient(world: &mut World, id: AgentId) {
    let Some(me) = world.agents.get(id) else { return };
    if world.agents.resolve(me.target_ally).is_some_and(|a| a.is_injured()) {
        return;
    }
    let range_sq = me.detection_range * me.detection_range;
    let cells = (me.detection_range / world.cell_size()).ceil() as i32;
    let found = world
        .spatial
        .query_neighborhood(&world.grid, me.pos, cells)
        .filter(|other| *other != id)
        .filter_map(|other| world.agents.get(other))
        .filter(|a| a.active && a.team == me.team && !a.role.is_resource() && a.is_injured())
        .map(|a| (a.pos.distance_squared(me.pos), a.id, a.agent_ref()))
        .filter(|(d, _, _)| *d < range_sq)
        .min_by(|a, b| a.0.total_cmp(&b.0).then(a.1.cmp(&b.1)))
        .map(|(_, _, r)| r);
    if let (Some(ally), Some(me)) = (found, world.agents.get_mut(id)) {
        me.target_ally = Some(ally);
    }
}
