//! `colony-sim` — tick orchestrator for the colony simulation.
//!
//! # Tick phases
//!
//! ```text
//! Sim::update(dt):
//!   ① Behavior    — each active agent's state machine, ascending slot order;
//!                   machines are rebuilt when a slot's generation changed.
//!   ② Perception  — stagger timer; on expiry advance the bucket and rebuild
//!                   SpatialGrid + ResourceIndex.  Agents in the bucket detect
//!                   enemies, food and patients.
//!   ③ Movement    — MobilityEngine::advance over every active unit.
//!   ④ Bookkeeping — ledger recount, deaths drained, match outcome judged.
//! ```
//!
//! Messages posted by states are handled synchronously by the
//! [`SceneDirector`] during phase ①.
//!
//! # Cargo features
//!
//! | Feature   | Effect                                                      |
//! |-----------|-------------------------------------------------------------|
//! | `serde`   | Derives on `MatchOutcome`, `EndReason`, `Roster`, config.   |
//! | `fx-hash` | FxHash for the spatial bucket map.                          |
//!
//! # Quick-start
//!
//! ```rust,ignore
//! use colony_core::SimConfig;
//! use colony_sim::{NoopObserver, SimBuilder};
//!
//! let mut sim = SimBuilder::new(SimConfig::default()).build()?;
//! let outcome = sim.run_for(300.0, 1.0 / 30.0, &mut NoopObserver)?;
//! ```

pub mod builder;
pub mod director;
pub mod error;
pub mod observer;
pub mod perception;
pub mod report;
pub mod sim;


pub use builder::{Roster, SimBuilder};
pub use colony_behavior::{Death, TeamLedger, TeamTally, World};
pub use colony_spatial::CellCoord;
pub use director::SceneDirector;
pub use error::{SimError, SimResult};
pub use observer::{NoopObserver, SimObserver};
pub use report::{EndReason, MatchOutcome, TickReport};
pub use sim::Sim;
