//! The `Sim` struct and its tick loop.

use colony_behavior::{install_behavior, SimContext, TeamLedger, World};
use colony_bus::{Delivery, Message, SCENE};
use colony_core::{AgentId, SimClock, Team};
use colony_fsm::StateMachine;
use colony_mobility::MobilityEngine;
use colony_spatial::{BfsPathfinder, Pathfinder};
use tracing::info;

use crate::perception::sense_bucket;
use crate::{EndReason, MatchOutcome, NoopObserver, SimError, SimObserver, SimResult, TickReport};

/// A slot's state machine, tagged with the generation it was built for.
struct Behavior {
    generation: u32,
    machine:    StateMachine<SimContext>,
}

// ── Sim ───────────────────────────────────────────────────────────────────────

/// The main simulation runner.
///
/// `Sim<P>` owns the world, the post office and the mobility engine, and
/// drives the four-phase tick:
///
/// 1. **Behavior**: every active agent's state machine advances by `dt`, in
///    ascending slot order.  A machine is (re)built when its slot's
///    generation changed since it was installed.
/// 2. **Perception**: the stagger timer accumulates `dt`; once it passes
///    `stagger_interval` the bucket advances and the spatial and resource
///    indexes are rebuilt.  Agents in the current bucket then detect
///    enemies, food and patients.
/// 3. **Movement**: [`MobilityEngine::advance`] for every active unit.
/// 4. **Bookkeeping**: ledger recount, queen liveness and match outcome.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<P: Pathfinder = BfsPathfinder> {
    /// The world and the bus delivering into it.
    pub ctx: SimContext,

    /// Path requests and path following.
    pub mobility: MobilityEngine<P>,

    /// Indexed by `AgentId`.  Taken out while the machine runs.
    behaviors: Vec<Option<Behavior>>,

    stagger_timer: f32,
    bucket:        u32,
    outcome:       Option<MatchOutcome>,
}

impl<P: Pathfinder> Sim<P> {
    pub(crate) fn new(ctx: SimContext, mobility: MobilityEngine<P>) -> Self {
        Self {
            ctx,
            mobility,
            behaviors: Vec::new(),
            stagger_timer: 0.0,
            bucket: 0,
            outcome: None,
        }
    }

    // ── Public API ────────────────────────────────────────────────────────

    /// Advance one frame of `dt` seconds.  Negative or NaN `dt` counts as 0.
    pub fn update(&mut self, dt: f32) -> SimResult<TickReport> {
        self.update_observed(dt, &mut NoopObserver)
    }

    /// [`update`](Self::update) with observer callbacks for deaths, the end
    /// of the tick and the end of the match.
    pub fn update_observed<O: SimObserver>(&mut self, dt: f32, observer: &mut O) -> SimResult<TickReport> {
        if let Some(outcome) = self.outcome {
            let tick = self.ctx.world.clock.ticks;
            return Ok(TickReport { tick, outcome: Some(outcome), ..TickReport::default() });
        }

        let dt = self.ctx.world.clock.advance(dt);
        let mut report = TickReport { tick: self.ctx.world.clock.ticks, dt, ..TickReport::default() };

        report.updated = self.run_behaviors(dt)?;
        report.sensed = self.perceive(dt);
        let world = &mut self.ctx.world;
        report.movement = self.mobility.advance(&mut world.agents, &world.grid, dt);

        // ── Bookkeeping ───────────────────────────────────────────────────
        world.ledger.recount(&world.agents);
        report.deaths = world.ledger.drain_deaths().collect();
        for death in &report.deaths {
            observer.on_unit_died(death, world);
        }
        if let Some(outcome) = judge(world) {
            let mail = self.ctx.bus.stats();
            info!(
                winner = ?outcome.winner,
                reason = ?outcome.reason,
                at_secs = outcome.at_secs,
                handled = mail.handled,
                ignored = mail.ignored,
                undelivered = mail.undelivered,
                "match over"
            );
            self.outcome = Some(outcome);
            report.outcome = Some(outcome);
            observer.on_match_end(&outcome, &world.ledger);
        }

        observer.on_tick_end(&report, &self.ctx.world);
        Ok(report)
    }

    /// Run fixed frames of `step` seconds until `seconds` of simulated time
    /// have passed or the match ends.  Returns the outcome, if any.
    pub fn run_for<O: SimObserver>(
        &mut self,
        seconds:  f32,
        step:     f32,
        observer: &mut O,
    ) -> SimResult<Option<MatchOutcome>> {
        if !(step > 0.0) || !step.is_finite() {
            return Err(SimError::InvalidStep(step));
        }
        let frames = (seconds.max(0.0) / step).ceil() as u64;
        for _ in 0..frames {
            if self.outcome.is_some() {
                break;
            }
            self.update_observed(step, observer)?;
        }
        Ok(self.outcome)
    }

    /// Post `message` to the scene recipient from outside the tick loop.
    pub fn send(&mut self, message: Message) -> Delivery {
        self.ctx.send(message)
    }

    // ── Introspection ─────────────────────────────────────────────────────

    #[inline]
    pub fn world(&self) -> &World {
        &self.ctx.world
    }

    #[inline]
    pub fn world_mut(&mut self) -> &mut World {
        &mut self.ctx.world
    }

    #[inline]
    pub fn ledger(&self) -> &TeamLedger {
        &self.ctx.world.ledger
    }

    #[inline]
    pub fn clock(&self) -> SimClock {
        self.ctx.world.clock
    }

    pub fn outcome(&self) -> Option<MatchOutcome> {
        self.outcome
    }

    pub fn is_over(&self) -> bool {
        self.outcome.is_some()
    }

    /// Current state name of `id`'s machine, if it has run at least once
    /// for the slot's current occupant.
    pub fn state_of(&self, id: AgentId) -> Option<&'static str> {
        let generation = self.ctx.world.agents.get(id)?.generation;
        self.behaviors
            .get(id.index())?
            .as_ref()
            .filter(|b| b.generation == generation)?
            .machine
            .current_state()
    }

    // ── Phases ────────────────────────────────────────────────────────────

    /// Phase 1.  Units spawned while this phase runs first update next tick.
    fn run_behaviors(&mut self, dt: f32) -> SimResult<usize> {
        let ids = self.ctx.world.agents.active_ids();
        if self.behaviors.len() < self.ctx.world.agents.len() {
            self.behaviors.resize_with(self.ctx.world.agents.len(), || None);
        }

        let mut updated = 0;
        for id in ids {
            // An earlier machine this tick may have killed or consumed it.
            let Some((generation, role)) = self
                .ctx
                .world
                .agents
                .get(id)
                .filter(|a| a.active)
                .map(|a| (a.generation, a.role))
            else {
                continue;
            };

            let mut behavior = match self.behaviors[id.index()].take() {
                Some(b) if b.generation == generation => b,
                _ => Behavior { generation, machine: install_behavior(role, id)? },
            };
            behavior.machine.update(&mut self.ctx, dt);
            self.behaviors[id.index()] = Some(behavior);
            updated += 1;
        }
        Ok(updated)
    }

    /// Phase 2.
    fn perceive(&mut self, dt: f32) -> usize {
        let world = &mut self.ctx.world;
        let buckets = world.config.stagger_buckets.max(1);
        self.stagger_timer += dt;
        if self.stagger_timer > world.config.stagger_interval {
            self.stagger_timer = 0.0;
            self.bucket = (self.bucket + 1) % buckets;
            world.spatial.rebuild(&world.agents, &world.grid);
            world.resources.rebuild(&world.agents);
        }
        sense_bucket(world, self.bucket, buckets)
    }
}

// ── Match rules ───────────────────────────────────────────────────────────────

/// Queen loss ends the match at once; otherwise the score decides once
/// `match_duration` has elapsed.  A tie is a draw.
fn judge(world: &World) -> Option<MatchOutcome> {
    let at_secs = world.clock.elapsed_secs;
    let tallies = world.ledger.tallies();
    let team_of = |i: usize| Team(i8::try_from(i).unwrap_or(i8::MAX));

    let crowned: Vec<usize> = (0..tallies.len()).filter(|&i| tallies[i].queen_alive).collect();
    if crowned.len() < tallies.len() && crowned.len() <= 1 {
        let winner = crowned.first().map(|&i| team_of(i));
        return Some(MatchOutcome { winner, reason: EndReason::QueenLost, at_secs });
    }

    if at_secs < world.config.match_duration {
        return None;
    }
    let best = tallies.iter().map(|t| t.score()).max()?;
    let mut leaders = (0..tallies.len()).filter(|&i| tallies[i].score() == best);
    let winner = match (leaders.next(), leaders.next()) {
        (Some(i), None) => Some(team_of(i)),
        _ => None,
    };
    Some(MatchOutcome { winner, reason: EndReason::TimeUp, at_secs })
}
