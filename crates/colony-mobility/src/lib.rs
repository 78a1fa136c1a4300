//! `colony-mobility` — moving agents along grid paths.
//!
//! # Crate layout
//!
//! | Module     | Contents                                                   |
//! |------------|------------------------------------------------------------|
//! | [`engine`] | `MobilityEngine<P>`, `StepOutcome`, `MoveReport`           |
//! | [`error`]  | `MobilityError`, `MobilityResult<T>`                       |
//!
//! # Movement model
//!
//! Each tick, for every active agent with nonzero speed:
//!
//! 1. The goal cell is the cell of `agent.target`.  If that cell is a wall,
//!    the open neighbor closest to the agent stands in for it.
//! 2. A path is requested from the [`Pathfinder`][colony_spatial::Pathfinder]
//!    when the agent has none or its path no longer ends at the goal cell.
//!    A stale path is discarded before the agent moves.
//! 3. The agent walks toward the center of the next waypoint and snaps onto
//!    it when the remaining distance is within one step.  Reached cells are
//!    appended to `path_history` when the agent has `record_path` set.
//! 4. Inside the goal cell the agent walks straight at `target`.
//!
//! An empty path for a different cell means the goal is unreachable.  The
//! agent holds position and does not ask again for the same goal until
//! `repath_interval` seconds have passed.

pub mod engine;
pub mod error;


pub use engine::{MobilityEngine, MoveReport, StepOutcome};
pub use error::{MobilityError, MobilityResult};
