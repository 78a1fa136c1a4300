//! Fluent builder for `AgentPool`.
//!
//! # Usage
//!
//! ```rust
//! use colony_agent::AgentPoolBuilder;
//! use colony_core::Role;
//!
//! let mut pool = AgentPoolBuilder::new(/*seed=*/ 42)
//!     .batch(10)
//!     .build();
//!
//! let worker = pool.fetch(Role::Worker);
//! assert_eq!(pool.len(), 10);
//! assert!(pool.get(worker).is_some_and(|a| a.active));
//! ```

use colony_core::StatTable;

use crate::AgentPool;

/// Fluent builder for [`AgentPool`].
pub struct AgentPoolBuilder {
    seed: u64,
    stats: StatTable,
    batch: usize,
    capacity: usize,
}

impl AgentPoolBuilder {
    pub const DEFAULT_BATCH: usize = 10;

    /// Create a builder using `seed` as the global RNG seed.
    pub fn new(seed: u64) -> Self {
        Self {
            seed,
            stats: StatTable::default(),
            batch: Self::DEFAULT_BATCH,
            capacity: 0,
        }
    }

    /// Stats applied to a slot each time it is fetched.
    pub fn stats(mut self, stats: StatTable) -> Self {
        self.stats = stats;
        self
    }

    /// Number of slots added when no free slot of a role exists.
    /// Values below 1 are raised to 1.
    pub fn batch(mut self, batch: usize) -> Self {
        self.batch = batch;
        self
    }

    /// Pre-reserve room for `capacity` slots.
    pub fn capacity(mut self, capacity: usize) -> Self {
        self.capacity = capacity;
        self
    }

    pub fn build(self) -> AgentPool {
        AgentPool::new(self.seed, self.stats, self.batch, self.capacity)
    }
}
