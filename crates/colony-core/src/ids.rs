//! Strongly typed, zero-cost identifier wrappers.
//!
//! All IDs are `Copy + Ord + Hash` so they can be used as map keys and sorted
//! collection elements without ceremony.  The inner integer is `pub` to allow
//! direct indexing into pool `Vec`s, but callers should prefer the
//! `.index()` helpers for clarity.

use std::fmt;

/// Generate a typed ID wrapper around a primitive integer.
macro_rules! typed_id {
    ($(#[$attr:meta])* $vis:vis struct $name:ident($inner:ty);) => {
        $(#[$attr])*
        #[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
        #[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
        $vis struct $name(pub $inner);

        impl $name {
            /// Sentinel meaning "no valid ID" (the inner type's `MAX`).
            pub const INVALID: $name = $name(<$inner>::MAX);

            /// Cast to `usize` for direct use as a `Vec` index.
            #[inline(always)]
            pub fn index(self) -> usize {
                self.0 as usize
            }
        }

        impl Default for $name {
            /// Returns the `INVALID` sentinel so uninitialized IDs are visibly invalid.
            #[inline(always)]
            fn default() -> Self {
                Self::INVALID
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.0)
            }
        }
    };
}

typed_id! {
    /// Index of an agent slot in the pool.  The slot is the agent's identity.
    pub struct AgentId(u32);
}

typed_id! {
    /// Row-major tile index: `row * grid_width + col`.
    pub struct CellId(u32);
}

// ── AgentRef ──────────────────────────────────────────────────────────────────

/// A slot id paired with the generation the slot had when the reference was
/// taken.
///
/// Pool slots are recycled, so a bare `AgentId` held across ticks may end up
/// naming a different unit.  `AgentPool::get_live` only resolves a reference
/// whose generation still matches and whose slot is active.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct AgentRef {
    pub id:         AgentId,
    pub generation: u32,
}

impl AgentRef {
    #[inline]
    pub fn new(id: AgentId, generation: u32) -> Self {
        Self { id, generation }
    }
}

impl fmt::Display for AgentRef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.id, self.generation)
    }
}

// ── Team ──────────────────────────────────────────────────────────────────────

/// Team affiliation.  Non-negative values are colonies; negative is neutral.
#[derive(Copy, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Team(pub i8);

impl Team {
    pub const NEUTRAL: Team = Team(-1);

    #[inline]
    pub fn is_neutral(self) -> bool {
        self.0 < 0
    }

    /// Index into per-team tables.  `None` for neutral.
    #[inline]
    pub fn index(self) -> Option<usize> {
        usize::try_from(self.0).ok()
    }

    /// Two teams fight when both are colonies and they differ.
    #[inline]
    pub fn is_hostile_to(self, other: Team) -> bool {
        !self.is_neutral() && !other.is_neutral() && self != other
    }
}

impl Default for Team {
    fn default() -> Self {
        Team::NEUTRAL
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_neutral() {
            f.write_str("neutral")
        } else {
            write!(f, "team {}", self.0)
        }
    }
}
