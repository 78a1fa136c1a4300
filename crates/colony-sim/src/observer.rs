//! Simulation observer trait for progress reporting and data collection.

use colony_behavior::{Death, TeamLedger, World};

use crate::{MatchOutcome, TickReport};

/// Callbacks invoked by [`Sim::update_observed`][crate::Sim::update_observed]
/// and [`Sim::run_for`][crate::Sim::run_for].
///
/// All methods have default no-op implementations so implementors only need to
/// override what they care about.
///
/// # Example: death log
///
/// ```rust,ignore
/// struct Obituaries(Vec<String>);
///
/// impl SimObserver for Obituaries {
///     fn on_unit_died(&mut self, death: &Death, _world: &World) {
///         self.0.push(format!("{} {} died", death.team, death.role));
///     }
/// }
/// ```
pub trait SimObserver {
    /// Called once per recorded death, before `on_tick_end` of that tick.
    fn on_unit_died(&mut self, _death: &Death, _world: &World) {}

    /// Called at the end of each tick with read access to the world.
    fn on_tick_end(&mut self, _report: &TickReport, _world: &World) {}

    /// Called exactly once, on the tick the match ends.
    fn on_match_end(&mut self, _outcome: &MatchOutcome, _ledger: &TeamLedger) {}
}

/// A [`SimObserver`] that does nothing.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
