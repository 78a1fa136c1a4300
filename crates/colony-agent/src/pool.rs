//! Agent storage: `AgentPool` (the slots) and `AgentRngs` (per-slot RNG).
//!
//! # Why two collections?
//!
//! A behavior that draws a random exploration target needs `&mut AgentRng`
//! for its own slot while it also writes its own `Agent`.  Keeping the RNGs
//! in a parallel `AgentRngs` lets callers borrow both at once through
//! [`AgentPool::agent_and_rng_mut`].
//!
//! # Slot lifecycle
//!
//! ```text
//!   vacant ──fetch──▶ active ──deactivate──▶ inactive ──fetch──▶ active …
//! ```
//!
//! Every `fetch` bumps the slot's generation, so an `AgentRef` taken before
//! the slot was recycled stops resolving through [`AgentPool::get_live`].

use colony_core::{AgentId, AgentRef, AgentRng, Role, StatTable, Team, Vec3};
use tracing::debug;

use crate::Agent;

// ── AgentRngs ─────────────────────────────────────────────────────────────────

/// Per-slot deterministic RNG state, parallel to the pool's slot vector.
pub struct AgentRngs {
    pub inner: Vec<AgentRng>,
    seed: u64,
}

impl AgentRngs {
    pub(crate) fn new(seed: u64) -> Self {
        Self { inner: Vec::new(), seed }
    }

    /// Seed the RNG for a newly created slot.
    fn push(&mut self, id: AgentId) {
        self.inner.push(AgentRng::new(self.seed, id));
    }

    /// Mutable reference to one slot's RNG.
    #[inline]
    pub fn get_mut(&mut self, agent: AgentId) -> &mut AgentRng {
        &mut self.inner[agent.index()]
    }

    pub fn len(&self) -> usize {
        self.inner.len()
    }

    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

// ── AgentPool ─────────────────────────────────────────────────────────────────

/// Batch-grown store of agent slots.  The `AgentId` is the index.
pub struct AgentPool {
    agents: Vec<Agent>,
    pub rngs: AgentRngs,
    stats: StatTable,
    batch: usize,
}

impl AgentPool {
    pub(crate) fn new(seed: u64, stats: StatTable, batch: usize, capacity: usize) -> Self {
        Self {
            agents: Vec::with_capacity(capacity),
            rngs: AgentRngs::new(seed),
            stats,
            batch: batch.max(1),
        }
    }

    /// Reactivate the first inactive slot of `role`, or grow the pool by one
    /// batch and take the first new slot.  Never fails.
    ///
    /// The returned slot is active with the role's stats, neutral team and
    /// zeroed position; its generation has been bumped.
    pub fn fetch(&mut self, role: Role) -> AgentId {
        let slot = match self.agents.iter().position(|a| !a.active && a.role == role) {
            Some(i) => i,
            None => {
                let first = self.agents.len();
                self.grow(role);
                first
            }
        };

        let stats = *self.stats.get(role);
        let agent = &mut self.agents[slot];
        agent.generation = agent.generation.wrapping_add(1);
        agent.reset(&stats);
        agent.active = true;
        agent.id
    }

    /// `fetch` a slot and place it: team, position, home base and movement
    /// target all set from the arguments.
    pub fn spawn(&mut self, role: Role, team: Team, pos: Vec3) -> AgentId {
        let id = self.fetch(role);
        let agent = &mut self.agents[id.index()];
        agent.team = team;
        agent.pos = pos;
        agent.target = pos;
        agent.home_base = pos;
        debug!(%id, %role, %team, %pos, "spawned");
        id
    }

    fn grow(&mut self, role: Role) {
        let start = self.agents.len();
        self.agents.reserve(self.batch);
        for i in start..start + self.batch {
            // The pool would need 4 billion slots before this saturates.
            let id = AgentId(u32::try_from(i).unwrap_or(u32::MAX - 1));
            self.agents.push(Agent::vacant(id, role));
            self.rngs.push(id);
        }
        debug!(%role, slots = self.agents.len(), "pool grown");
    }

    /// Mark a slot free.  Cached references to it stop resolving.
    pub fn deactivate(&mut self, id: AgentId) {
        if let Some(agent) = self.agents.get_mut(id.index()) {
            agent.active = false;
            agent.path.clear();
        }
    }

    // ── Lookup ────────────────────────────────────────────────────────────

    /// Slot by id, active or not.
    #[inline]
    pub fn get(&self, id: AgentId) -> Option<&Agent> {
        self.agents.get(id.index())
    }

    #[inline]
    pub fn get_mut(&mut self, id: AgentId) -> Option<&mut Agent> {
        self.agents.get_mut(id.index())
    }

    /// Resolve a cached reference.  `None` once the unit died or its slot
    /// was handed to someone else.
    #[inline]
    pub fn get_live(&self, r: AgentRef) -> Option<&Agent> {
        self.agents
            .get(r.id.index())
            .filter(|a| a.active && a.generation == r.generation)
    }

    #[inline]
    pub fn get_live_mut(&mut self, r: AgentRef) -> Option<&mut Agent> {
        self.agents
            .get_mut(r.id.index())
            .filter(|a| a.active && a.generation == r.generation)
    }

    /// Resolve an optional reference in one step.
    #[inline]
    pub fn resolve(&self, r: Option<AgentRef>) -> Option<&Agent> {
        r.and_then(|r| self.get_live(r))
    }

    #[inline]
    pub fn is_live(&self, r: AgentRef) -> bool {
        self.get_live(r).is_some()
    }

    /// Current reference for an active slot.
    pub fn reference(&self, id: AgentId) -> Option<AgentRef> {
        self.get(id).filter(|a| a.active).map(Agent::agent_ref)
    }

    /// The agent in slot `id` together with that slot's RNG.
    pub fn agent_and_rng_mut(&mut self, id: AgentId) -> Option<(&mut Agent, &mut AgentRng)> {
        let agent = self.agents.get_mut(id.index())?;
        let rng = self.rngs.inner.get_mut(id.index())?;
        Some((agent, rng))
    }

    // ── Iteration ─────────────────────────────────────────────────────────

    /// Every slot, ascending id order.
    pub fn agents(&self) -> &[Agent] {
        &self.agents
    }

    /// Active slots only, ascending id order.
    pub fn iter_active(&self) -> impl Iterator<Item = &Agent> + '_ {
        self.agents.iter().filter(|a| a.active)
    }

    pub fn iter_active_mut(&mut self) -> impl Iterator<Item = &mut Agent> + '_ {
        self.agents.iter_mut().filter(|a| a.active)
    }

    /// Ids of the currently active slots.
    pub fn active_ids(&self) -> Vec<AgentId> {
        self.iter_active().map(|a| a.id).collect()
    }

    /// Total slot count, active or not.
    #[inline]
    pub fn len(&self) -> usize {
        self.agents.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.agents.is_empty()
    }

    pub fn active_count(&self) -> usize {
        self.iter_active().count()
    }

    pub fn stats(&self) -> &StatTable {
        &self.stats
    }

    pub fn batch(&self) -> usize {
        self.batch
    }
}
