//! The closed set of events agents exchange.

use colony_core::{AgentRef, Role, Team, Vec3};

/// One event.  Actors are generation-checked references, so a handler that
/// runs after the sender died can tell.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Message {
    /// Ask the scene to create a unit of `role` at `position` on the
    /// spawner's team.
    SpawnUnit {
        spawner:  AgentRef,
        role:     Role,
        position: Vec3,
    },
    /// A food item was found at `location`.
    ResourceFound {
        discoverer: AgentRef,
        location:   Vec3,
        team:       Team,
    },
    /// A worker brought `amount` portions home.
    ResourceDelivered {
        worker: AgentRef,
        amount: u32,
        team:   Team,
    },
    /// `unit` was killed.  Sent exactly once per death, before the slot is
    /// freed.
    UnitDied {
        unit: AgentRef,
        team: Team,
        role: Role,
    },
    /// `scout` sees `enemy`; nearby military should engage it.
    EnemySpotted {
        scout: AgentRef,
        enemy: AgentRef,
        team:  Team,
    },
    /// `caller` is in trouble at `location`.
    RequestHelp {
        caller:   AgentRef,
        location: Vec3,
        team:     Team,
    },
    /// The queen is under attack; every military unit should fall back.
    QueenThreat {
        queen: AgentRef,
        team:  Team,
    },
}

/// Payload-free tag of a [`Message`], for logs and counters.
#[derive(Copy, Clone, PartialEq, Eq, Hash, Debug)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum MessageKind {
    SpawnUnit,
    ResourceFound,
    ResourceDelivered,
    UnitDied,
    EnemySpotted,
    RequestHelp,
    QueenThreat,
}

impl Message {
    pub fn kind(&self) -> MessageKind {
        match self {
            Message::SpawnUnit { .. }         => MessageKind::SpawnUnit,
            Message::ResourceFound { .. }     => MessageKind::ResourceFound,
            Message::ResourceDelivered { .. } => MessageKind::ResourceDelivered,
            Message::UnitDied { .. }          => MessageKind::UnitDied,
            Message::EnemySpotted { .. }      => MessageKind::EnemySpotted,
            Message::RequestHelp { .. }       => MessageKind::RequestHelp,
            Message::QueenThreat { .. }       => MessageKind::QueenThreat,
        }
    }

    /// Team the event concerns.  For `SpawnUnit` the team is looked up from
    /// the spawner by the handler, so this returns `None`.
    pub fn team(&self) -> Option<Team> {
        match *self {
            Message::SpawnUnit { .. } => None,
            Message::ResourceFound { team, .. }
            | Message::ResourceDelivered { team, .. }
            | Message::UnitDied { team, .. }
            | Message::EnemySpotted { team, .. }
            | Message::RequestHelp { team, .. }
            | Message::QueenThreat { team, .. } => Some(team),
        }
    }
}

impl MessageKind {
    pub fn as_str(self) -> &'static str {
        match self {
            MessageKind::SpawnUnit         => "spawn_unit",
            MessageKind::ResourceFound     => "resource_found",
            MessageKind::ResourceDelivered => "resource_delivered",
            MessageKind::UnitDied          => "unit_died",
            MessageKind::EnemySpotted      => "enemy_spotted",
            MessageKind::RequestHelp       => "request_help",
            MessageKind::QueenThreat       => "queen_threat",
        }
    }
}

impl std::fmt::Display for MessageKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
