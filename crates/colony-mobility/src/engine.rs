//! `MobilityEngine` — turns `Agent::target` into motion along grid paths.

use colony_agent::{Agent, AgentPool};
use colony_core::{CellId, Vec3};
use colony_spatial::{nearest_open_neighbor, CellCoord, Pathfinder, TileGrid};
use tracing::{debug, trace};

use crate::{MobilityError, MobilityResult};

/// What one agent did during one [`MobilityEngine::step`].
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum StepOutcome {
    /// Zero speed, zero `dt`, or already standing on the target.
    Stationary,
    /// Moved toward the next waypoint or the target.
    Moved,
    /// Reached the target point this step.
    Arrived,
    /// No route to the goal cell.  The agent held position.
    Blocked,
}

/// Per-tick totals returned by [`MobilityEngine::advance`].
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct MoveReport {
    pub moved:   usize,
    pub arrived: usize,
    pub blocked: usize,
}

/// Wraps a [`Pathfinder`] and the retry cadence for unreachable goals.
///
/// # Type parameter
///
/// `P` must implement [`Pathfinder`] (e.g. [`colony_spatial::BfsPathfinder`]).
/// Swap it at compile time for another search with no runtime overhead.
pub struct MobilityEngine<P: Pathfinder> {
    /// The search algorithm.
    pub pathfinder: P,

    /// Seconds an agent waits before asking again for a goal that failed.
    repath_interval: f32,
}

impl<P: Pathfinder> MobilityEngine<P> {
    pub fn new(pathfinder: P, repath_interval: f32) -> MobilityResult<Self> {
        if !(repath_interval >= 0.0) || !repath_interval.is_finite() {
            return Err(MobilityError::InvalidInterval(repath_interval));
        }
        Ok(Self { pathfinder, repath_interval })
    }

    pub fn repath_interval(&self) -> f32 {
        self.repath_interval
    }

    /// Step every active agent with nonzero speed.
    pub fn advance(&self, pool: &mut AgentPool, grid: &TileGrid, dt: f32) -> MoveReport {
        let mut report = MoveReport::default();
        for agent in pool.iter_active_mut() {
            if agent.role.is_resource() {
                continue;
            }
            match self.step(agent, grid, dt) {
                StepOutcome::Moved => report.moved += 1,
                StepOutcome::Arrived => report.arrived += 1,
                StepOutcome::Blocked => report.blocked += 1,
                StepOutcome::Stationary => {}
            }
        }
        report
    }

    /// Move one agent toward `agent.target` for `dt` seconds.
    pub fn step(&self, agent: &mut Agent, grid: &TileGrid, dt: f32) -> StepOutcome {
        if agent.repath_cooldown > 0.0 {
            agent.repath_cooldown = (agent.repath_cooldown - dt).max(0.0);
        }
        if !(agent.move_speed > 0.0) || !(dt > 0.0) {
            agent.vel = Vec3::ZERO;
            return StepOutcome::Stationary;
        }

        let here = grid.cell_of_clamped(agent.pos);
        let (goal, aim) = self.goal_for(agent, grid, here);
        let reach = agent.move_speed * dt;

        if here == goal {
            agent.path.clear();
            agent.blocked_goal = None;
            return approach(agent, grid, aim, reach);
        }

        let Some(goal_id) = grid.cell_id(goal) else {
            agent.vel = Vec3::ZERO;
            return StepOutcome::Blocked;
        };

        // A path that no longer ends at the goal belongs to an old target.
        if agent.path.back() != Some(&goal_id) {
            agent.path.clear();
            if agent.blocked_goal == Some(goal_id) && agent.repath_cooldown > 0.0 {
                agent.vel = Vec3::ZERO;
                return StepOutcome::Blocked;
            }
            if let Err(err) = self.request_path(agent, grid, goal) {
                trace!(agent = %agent.id, %err, "holding position");
                agent.vel = Vec3::ZERO;
                return StepOutcome::Blocked;
            }
        }

        follow(agent, grid, reach)
    }

    /// Replace `agent.path` with a fresh route from its current cell to
    /// `goal`.  Returns the number of waypoints.
    ///
    /// On failure the path is left empty and the goal is remembered, so
    /// `step` waits `repath_interval` seconds before asking again.
    pub fn request_path(
        &self,
        agent: &mut Agent,
        grid:  &TileGrid,
        goal:  CellCoord,
    ) -> MobilityResult<usize> {
        let here = grid.cell_of_clamped(agent.pos);
        let goal_id = grid.cell_id(goal);
        let cells = self.pathfinder.find_path(grid, here, goal);

        agent.path.clear();
        if cells.is_empty() {
            let goal_id = goal_id.unwrap_or(CellId::INVALID);
            agent.blocked_goal = Some(goal_id);
            agent.repath_cooldown = self.repath_interval;
            debug!(agent = %agent.id, from = %here, to = %goal, "no path");
            return Err(MobilityError::Unreachable { agent: agent.id, goal: goal_id });
        }

        agent.path.extend(cells.iter().filter_map(|&c| grid.cell_id(c)));
        agent.blocked_goal = None;
        Ok(agent.path.len())
    }

    /// The cell to path to and the exact point to stop at.
    ///
    /// A target standing on a wall is replaced by the center of the open
    /// neighbor closest to `here`.
    fn goal_for(&self, agent: &Agent, grid: &TileGrid, here: CellCoord) -> (CellCoord, Vec3) {
        let target = grid.clamp_to_world(agent.target);
        let cell = grid.cell_of_clamped(target);
        if grid.is_open(cell) {
            return (cell, target);
        }
        let side = nearest_open_neighbor(grid, cell, here);
        (side, grid.center_of(side))
    }
}

/// Walk straight at `aim`, snapping onto it when within `reach`.
fn approach(agent: &mut Agent, grid: &TileGrid, aim: Vec3, reach: f32) -> StepOutcome {
    let to = aim - agent.pos;
    let dist = to.length();
    if dist <= f32::EPSILON {
        agent.vel = Vec3::ZERO;
        return StepOutcome::Stationary;
    }
    if dist <= reach {
        agent.pos += to;
        agent.pos = grid.clamp_to_world(agent.pos);
        agent.vel = Vec3::ZERO;
        return StepOutcome::Arrived;
    }
    let dir = to.normalized();
    agent.vel = dir * agent.move_speed;
    agent.pos += dir * reach;
    agent.pos = grid.clamp_to_world(agent.pos);
    StepOutcome::Moved
}

/// Advance along `agent.path`.  Reaching a waypoint's center pops it and,
/// for an agent with `record_path` set, appends it to `path_history`.
fn follow(agent: &mut Agent, grid: &TileGrid, reach: f32) -> StepOutcome {
    let Some(&next) = agent.path.front() else {
        agent.vel = Vec3::ZERO;
        return StepOutcome::Stationary;
    };
    let Some(cell) = grid.coord_of(next) else {
        agent.path.clear();
        agent.vel = Vec3::ZERO;
        return StepOutcome::Blocked;
    };

    let waypoint = grid.center_of(cell);
    let to = waypoint - agent.pos;
    let dir = to.normalized();
    agent.vel = dir * agent.move_speed;

    if to.length() <= reach {
        agent.pos += to;
        agent.path.pop_front();
        if agent.record_path {
            agent.path_history.push(next);
        }
    } else {
        agent.pos += dir * reach;
    }
    agent.pos = grid.clamp_to_world(agent.pos);
    StepOutcome::Moved
}
