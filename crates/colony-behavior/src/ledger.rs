//! Per-team bookkeeping: delivered resources, live unit counts, deaths.
//!
//! Resource totals and casualties only change through the scene director's
//! message handling.  Unit counts and queen liveness are recomputed from the
//! pool once per tick by [`TeamLedger::recount`].

use colony_agent::AgentPool;
use colony_core::{AgentRef, Role, Team};

// ── TeamTally ─────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TeamTally {
    /// Food portions delivered home.
    pub resources:  u32,
    /// Live units per role, indexed by `Role::index()`.
    pub units:      [u32; Role::ALL.len()],
    pub casualties: u32,
    /// Units created through `SpawnUnit` requests.
    pub spawned:    u32,
    pub queen_alive: bool,
}

impl TeamTally {
    #[inline]
    pub fn count(&self, role: Role) -> u32 {
        self.units[role.index()]
    }

    /// Live units of every non-resource role, queen included.
    pub fn unit_count(&self) -> u32 {
        Role::ALL
            .iter()
            .filter(|r| !r.is_resource())
            .map(|r| self.count(*r))
            .sum()
    }

    /// Timeout score: live units plus delivered resources.
    pub fn score(&self) -> u32 {
        self.unit_count() + self.resources
    }
}

// ── Death ─────────────────────────────────────────────────────────────────────

/// One recorded `UnitDied`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct Death {
    pub unit: AgentRef,
    pub team: Team,
    pub role: Role,
}

// ── TeamLedger ────────────────────────────────────────────────────────────────

#[derive(Clone, Debug, Default)]
pub struct TeamLedger {
    tallies: Vec<TeamTally>,
    deaths:  Vec<Death>,
}

impl TeamLedger {
    pub fn new(teams: u8) -> Self {
        Self { tallies: vec![TeamTally::default(); teams as usize], deaths: Vec::new() }
    }

    pub fn get(&self, team: Team) -> Option<&TeamTally> {
        team.index().and_then(|i| self.tallies.get(i))
    }

    fn get_mut(&mut self, team: Team) -> Option<&mut TeamTally> {
        team.index().and_then(|i| self.tallies.get_mut(i))
    }

    /// Add `amount` delivered portions.  Neutral or unknown teams are
    /// ignored.
    pub fn credit(&mut self, team: Team, amount: u32) {
        if let Some(t) = self.get_mut(team) {
            t.resources = t.resources.saturating_add(amount);
        }
    }

    pub fn record_spawn(&mut self, team: Team) {
        if let Some(t) = self.get_mut(team) {
            t.spawned += 1;
        }
    }

    pub fn record_death(&mut self, unit: AgentRef, team: Team, role: Role) {
        if let Some(t) = self.get_mut(team) {
            t.casualties += 1;
            if role == Role::Queen {
                t.queen_alive = false;
            }
        }
        self.deaths.push(Death { unit, team, role });
    }

    /// Deaths recorded since the last drain, oldest first.
    pub fn drain_deaths(&mut self) -> std::vec::Drain<'_, Death> {
        self.deaths.drain(..)
    }

    /// Recompute live unit counts and queen liveness from the pool.
    pub fn recount(&mut self, pool: &AgentPool) {
        for t in &mut self.tallies {
            t.units = [0; Role::ALL.len()];
            t.queen_alive = false;
        }
        for agent in pool.iter_active() {
            let Some(t) = agent.team.index().and_then(|i| self.tallies.get_mut(i)) else {
                continue;
            };
            t.units[agent.role.index()] += 1;
            if agent.role == Role::Queen {
                t.queen_alive = true;
            }
        }
    }

    /// Every team's tally, in team order.
    pub fn tallies(&self) -> &[TeamTally] {
        &self.tallies
    }

    pub fn len(&self) -> usize {
        self.tallies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tallies.is_empty()
    }
}
