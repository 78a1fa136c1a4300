//! `colony-agent` — pooled agent storage for the colony simulation.
//!
//! # Crate layout
//!
//! | Module        | Contents                                                   |
//! |---------------|------------------------------------------------------------|
//! | [`agent`]     | `Agent` (one unit or resource item)                        |
//! | [`pool`]      | `AgentPool` (batch-grown slots), `AgentRngs` (per-slot RNG) |
//! | [`builder`]   | `AgentPoolBuilder` (fluent construction)                   |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                                 |
//! |---------|--------------------------------------------------------|
//! | `serde` | Derives `Serialize` on `Agent` for snapshots.          |
//!
//! Agents are never freed individually.  A slot is either active (a live
//! unit) or inactive (free for reuse by `AgentPool::fetch` with the same
//! role), and the pool only ever grows.

pub mod agent;
pub mod builder;
pub mod pool;

#[cfg(test)]
mod tests;

pub use agent::Agent;
pub use builder::AgentPoolBuilder;
pub use colony_core::{StatTable, UnitStats};
pub use pool::{AgentPool, AgentRngs};
