//! What one tick produced and how a match ended.

use colony_behavior::Death;
use colony_core::Team;
use colony_mobility::MoveReport;

/// Why a match stopped.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EndReason {
    /// A colony lost its queen.
    QueenLost,
    /// `match_duration` elapsed; the score decided.
    TimeUp,
}

/// Final result of a match.  `winner == None` is a draw.
#[derive(Copy, Clone, PartialEq, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MatchOutcome {
    pub winner:  Option<Team>,
    pub reason:  EndReason,
    /// Simulated seconds at which the match ended.
    pub at_secs: f32,
}

impl MatchOutcome {
    #[inline]
    pub fn is_draw(&self) -> bool {
        self.winner.is_none()
    }
}

/// Summary of one `Sim::update`.
#[derive(Clone, Debug, Default)]
pub struct TickReport {
    /// Frame number after this update.
    pub tick:      u64,
    /// The delta actually applied, after sanitizing.
    pub dt:        f32,
    /// Machines that ran this tick.
    pub updated:   usize,
    /// Agents whose detection ran this tick.
    pub sensed:    usize,
    pub movement:  MoveReport,
    /// Units that died this tick, in order of death.
    pub deaths:    Vec<Death>,
    /// Set on the tick the match ends and on every tick after it.
    pub outcome:   Option<MatchOutcome>,
}
