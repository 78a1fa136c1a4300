//! Melee resolution shared by every fighting role.
//!
//! An attack lands when the attacker's `attack_cooldown` has built up to its
//! `attack_interval` and the target is still live and within
//! `attack_range`.  The hit that takes a unit to zero health posts exactly
//! one `UnitDied` and then deactivates the victim, so later hits in the same
//! tick can no longer resolve it.

use colony_bus::Message;
use colony_core::AgentId;
use tracing::debug;

use crate::SimContext;

/// Result of one [`strike`] call.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Strike {
    /// No live enemy is targeted.  A stale reference has been cleared.
    NoTarget,
    /// The enemy is live but beyond `attack_range`.
    OutOfRange,
    /// In range, still cooling down.
    Cooling,
    /// Damage dealt; the enemy survived.
    Hit,
    /// Damage dealt; the enemy died and was deactivated.
    Killed,
}

/// Advance `attacker`'s cooldown by `dt` and hit its `target_enemy` if
/// possible.  `reach` scales the attack range (1.0 for plain melee).
pub fn strike(ctx: &mut SimContext, attacker: AgentId, dt: f32, reach: f32) -> Strike {
    let pool = &mut ctx.world.agents;
    let Some(me) = pool.get_mut(attacker) else { return Strike::NoTarget };
    me.attack_cooldown += dt;
    let (pos, power, ready) = (me.pos, me.attack_power, me.attack_cooldown >= me.attack_interval);
    let range = me.attack_range * reach;
    let Some(victim_ref) = me.target_enemy else { return Strike::NoTarget };

    let Some(victim_pos) = pool.get_live(victim_ref).map(|v| v.pos) else {
        if let Some(me) = pool.get_mut(attacker) {
            me.target_enemy = None;
        }
        return Strike::NoTarget;
    };
    if victim_pos.distance_squared(pos) > range * range {
        return Strike::OutOfRange;
    }
    if !ready {
        return Strike::Cooling;
    }

    if let Some(me) = pool.get_mut(attacker) {
        me.attack_cooldown = 0.0;
    }
    let Some(victim) = pool.get_live_mut(victim_ref) else { return Strike::NoTarget };
    if !victim.take_damage(power) {
        return Strike::Hit;
    }

    let (team, role) = (victim.team, victim.role);
    debug!(%attacker, victim = %victim_ref, %role, %team, "killed");
    ctx.send(Message::UnitDied { unit: victim_ref, team, role });
    ctx.world.agents.deactivate(victim_ref.id);
    if let Some(me) = ctx.world.agents.get_mut(attacker) {
        me.target_enemy = None;
    }
    Strike::Killed
}
