//! Unit role enum shared across the pool, the bus and the behavior layer.
//!
//! A slot keeps its role for its whole life: `AgentPool::fetch` only reuses
//! inactive slots of the requested role.

/// What an agent is.  Drives stats, behavior set and detection rules.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Role {
    Worker,
    Soldier,
    Queen,
    Healer,
    Scout,
    Tank,
    /// Static resource item harvested by workers.
    Food,
    /// Short-lived trail marker dropped by scouts.
    Pheromone,
}

impl Role {
    /// Every role, in declaration order.  Used to size per-role tables.
    pub const ALL: [Role; 8] = [
        Role::Worker,
        Role::Soldier,
        Role::Queen,
        Role::Healer,
        Role::Scout,
        Role::Tank,
        Role::Food,
        Role::Pheromone,
    ];

    /// Roles a queen may request when she spawns a regular unit.
    pub const SPAWNABLE: [Role; 5] = [
        Role::Worker,
        Role::Soldier,
        Role::Healer,
        Role::Scout,
        Role::Tank,
    ];

    /// Position of this role in [`Role::ALL`].
    #[inline]
    pub fn index(self) -> usize {
        self as usize
    }

    /// Items that are not units: never detected as enemies, never fight.
    #[inline]
    pub fn is_resource(self) -> bool {
        matches!(self, Role::Food | Role::Pheromone)
    }

    /// Units that answer help calls and defend the queen.
    #[inline]
    pub fn is_military(self) -> bool {
        matches!(self, Role::Soldier | Role::Tank)
    }

    /// Human-readable label, useful for logs and summaries.
    pub fn as_str(self) -> &'static str {
        match self {
            Role::Worker    => "worker",
            Role::Soldier   => "soldier",
            Role::Queen     => "queen",
            Role::Healer    => "healer",
            Role::Scout     => "scout",
            Role::Tank      => "tank",
            Role::Food      => "food",
            Role::Pheromone => "pheromone",
        }
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
