//! The pooled `Agent` record.
//!
//! One struct holds every field any role needs.  Fields that only matter for
//! some roles (resource portions, pheromone lifetime, queen spawn timer) stay
//! at their reset values for the others.

use std::collections::VecDeque;

use colony_core::{AgentId, AgentRef, CellId, Role, Team, UnitStats, Vec3};

/// One simulated unit or resource item.
#[derive(Clone, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Agent {
    /// Slot index.  Never changes.
    pub id: AgentId,
    /// Bumped every time the slot is handed out by `AgentPool::fetch`.
    pub generation: u32,
    /// Fixed for the life of the slot.
    pub role: Role,
    pub team: Team,
    pub active: bool,

    // ── Kinematics ────────────────────────────────────────────────────────
    pub pos: Vec3,
    pub vel: Vec3,
    /// Where the unit wants to go.  Movement paths toward this point.
    pub target: Vec3,
    pub home_base: Vec3,

    // ── Stats ─────────────────────────────────────────────────────────────
    pub health:          f32,
    pub max_health:      f32,
    /// Current speed.  States set this from `base_speed` on entry.
    pub move_speed:      f32,
    pub base_speed:      f32,
    pub detection_range: f32,
    pub attack_range:    f32,
    pub attack_power:    f32,
    pub attack_interval: f32,

    // ── Perception and task scratch ───────────────────────────────────────
    pub target_enemy: Option<AgentRef>,
    pub target_ally:  Option<AgentRef>,
    pub target_food:  Option<AgentRef>,
    pub carrying:     bool,
    pub carried:      u32,

    // ── Timers (seconds) ──────────────────────────────────────────────────
    pub gather_timer:    f32,
    pub spawn_cooldown:  f32,
    pub attack_cooldown: f32,
    /// General-purpose timer owned by whichever state is current.
    pub state_timer:     f32,

    // ── Resource items ────────────────────────────────────────────────────
    /// Portions left on a food item.
    pub resource_count: u32,
    /// Workers currently in Gathering toward this item.  Advisory only.
    pub harvesters:     u32,
    /// A scout has already reported this item.
    pub marked:         bool,
    /// Remaining lifetime of a pheromone marker.
    pub ttl:            f32,

    // ── Movement ──────────────────────────────────────────────────────────
    /// Remaining waypoints, next one first.
    pub path:            VecDeque<CellId>,
    /// Cells reached while following paths, oldest first.  Only appended to
    /// while `record_path` is set.
    pub path_history:    Vec<CellId>,
    /// Set by states that replay the walked route.
    pub record_path:     bool,
    /// Seconds before an unreachable target may be requested again.
    pub repath_cooldown: f32,
    /// Goal cell of the last failed path request.
    pub blocked_goal:    Option<CellId>,

    pub units_spawned: u32,
}

impl Agent {
    /// A fresh, inactive slot of `role`.
    pub fn vacant(id: AgentId, role: Role) -> Self {
        Self {
            id,
            generation: 0,
            role,
            team: Team::NEUTRAL,
            active: false,
            pos: Vec3::ZERO,
            vel: Vec3::ZERO,
            target: Vec3::ZERO,
            home_base: Vec3::ZERO,
            health: 0.0,
            max_health: 0.0,
            move_speed: 0.0,
            base_speed: 0.0,
            detection_range: 0.0,
            attack_range: 0.0,
            attack_power: 0.0,
            attack_interval: 0.0,
            target_enemy: None,
            target_ally: None,
            target_food: None,
            carrying: false,
            carried: 0,
            gather_timer: 0.0,
            spawn_cooldown: 0.0,
            attack_cooldown: 0.0,
            state_timer: 0.0,
            resource_count: 0,
            harvesters: 0,
            marked: false,
            ttl: 0.0,
            path: VecDeque::new(),
            path_history: Vec::new(),
            record_path: false,
            repath_cooldown: 0.0,
            blocked_goal: None,
            units_spawned: 0,
        }
    }

    /// Clear every per-life field and load `stats`.  Keeps id, role and
    /// generation; the caller activates the slot.
    pub(crate) fn reset(&mut self, stats: &UnitStats) {
        let (id, role, generation) = (self.id, self.role, self.generation);
        let mut path = std::mem::take(&mut self.path);
        let mut history = std::mem::take(&mut self.path_history);
        path.clear();
        history.clear();

        *self = Agent::vacant(id, role);
        self.generation = generation;
        self.path = path;
        self.path_history = history;

        self.health = stats.max_health;
        self.max_health = stats.max_health;
        self.base_speed = stats.base_speed;
        self.move_speed = stats.base_speed;
        self.detection_range = stats.detection_range;
        self.attack_range = stats.attack_range;
        self.attack_power = stats.attack_power;
        self.attack_interval = stats.attack_interval;
    }

    /// Generation-checked handle to this slot's current occupant.
    #[inline]
    pub fn agent_ref(&self) -> AgentRef {
        AgentRef::new(self.id, self.generation)
    }

    /// Fraction of max health, `0.0` for a unit with no max.
    #[inline]
    pub fn health_fraction(&self) -> f32 {
        if self.max_health > 0.0 { self.health / self.max_health } else { 0.0 }
    }

    #[inline]
    pub fn is_injured(&self) -> bool {
        self.health < self.max_health
    }

    /// Restore `amount` health, never past `max_health`.  Returns `true` once
    /// the unit is at full health.
    pub fn heal(&mut self, amount: f32) -> bool {
        self.health = (self.health + amount.max(0.0)).min(self.max_health);
        self.health >= self.max_health
    }

    /// Subtract `amount` health.  Returns `true` when this hit killed the
    /// unit.  Does not deactivate; the caller reports the death first.
    pub fn take_damage(&mut self, amount: f32) -> bool {
        let was_alive = self.health > 0.0;
        self.health = (self.health - amount).max(0.0);
        was_alive && self.health <= 0.0
    }
}
