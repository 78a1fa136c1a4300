//! `colony-behavior` — the world model and what every role does in it.
//!
//! # Crate layout
//!
//! | Module          | Contents                                                       |
//! |-----------------|----------------------------------------------------------------|
//! | [`world`]       | `World`: pool, grid, indexes, team knowledge, config, clock    |
//! | [`context`]     | `SimContext`: the world plus the post office delivering into it |
//! | [`exploration`] | `ExplorationMap`: per-team visited cells and sightings         |
//! | [`ledger`]      | `TeamLedger`, `TeamTally`, `Death`                             |
//! | [`combat`]      | `strike`: cooldown, range check, damage, death reporting       |
//! | [`roles`]       | One state set per role, `install_behavior`                     |
//! | [`error`]       | `BehaviorError`, `BehaviorResult<T>`                           |
//!
//! # Feature flags
//!
//! | Flag    | Effect                                              |
//! |---------|-----------------------------------------------------|
//! | `serde` | Derives `Serialize`/`Deserialize` on `TeamTally`.   |
//!
//! # How states reach the world
//!
//! Each state stores the `AgentId` it drives and receives
//! `&mut SimContext` on every call.  The orchestrator takes the machine out
//! of its slot before running it, so a state may freely read and write any
//! agent, including its own, and post messages whose handlers mutate the
//! world before `send` returns.

pub mod combat;
pub mod context;
pub mod error;
pub mod exploration;
pub mod ledger;
pub mod roles;
pub mod world;


pub use combat::{strike, Strike};
pub use context::SimContext;
pub use error::{BehaviorError, BehaviorResult};
pub use exploration::ExplorationMap;
pub use ledger::{Death, TeamLedger, TeamTally};
pub use roles::install_behavior;
pub use world::World;
