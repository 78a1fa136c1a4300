//! `colony-core` — foundational types for the colony simulation.
//!
//! This crate is a dependency of every other `colony-*` crate.  It has no
//! `colony-*` dependencies and minimal external ones (only `rand` and
//! `thiserror`, plus optional `serde`).
//!
//! # What lives here
//!
//! | Module          | Contents                                              |
//! |-----------------|-------------------------------------------------------|
//! | [`ids`]         | `AgentId`, `AgentRef`, `CellId`, `Team`               |
//! | [`vec`]         | `Vec3` (z is carried but unused by the simulation)    |
//! | [`role`]        | `Role` enum                                           |
//! | [`time`]        | `SimClock`                                            |
//! | [`config`]      | `SimConfig`, `GridConfig`, `UnitStats`, `StatTable`   |
//! | [`rng`]         | `AgentRng` (per-slot), `SimRng` (global)              |
//! | [`error`]       | `CoreError`, `CoreResult`                             |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                     |
//! |---------|------------------------------------------------------------|
//! | `serde` | Adds `Serialize`/`Deserialize` to all public types.        |

pub mod config;
pub mod error;
pub mod ids;
pub mod rng;
pub mod role;
pub mod time;
pub mod vec;

#[cfg(test)]
mod tests;

// ── Re-exports ────────────────────────────────────────────────────────────────

pub use config::{GridConfig, SimConfig, StatTable, UnitStats};
pub use error::{CoreError, CoreResult};
pub use ids::{AgentId, AgentRef, CellId, Team};
pub use rng::{AgentRng, SimRng};
pub use role::Role;
pub use time::SimClock;
pub use vec::Vec3;
