use colony_core::{AgentId, CellId};
use colony_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum MobilityError {
    #[error("repath interval must be a non-negative number of seconds, got {0}")]
    InvalidInterval(f32),

    #[error("agent {agent} cannot reach cell {goal}")]
    Unreachable { agent: AgentId, goal: CellId },

    #[error("grid error: {0}")]
    Spatial(#[from] SpatialError),
}

pub type MobilityResult<T> = Result<T, MobilityError>;
