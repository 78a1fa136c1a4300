use colony_behavior::BehaviorError;
use colony_core::{CoreError, Team, Vec3};
use colony_mobility::MobilityError;
use colony_spatial::SpatialError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SimError {
    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("grid error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("behavior error: {0}")]
    Behavior(#[from] BehaviorError),

    #[error("mobility error: {0}")]
    Mobility(#[from] MobilityError),

    #[error("{what} lists {got} entries for {expected} teams")]
    TeamCountMismatch {
        expected: usize,
        got:      usize,
        what:     &'static str,
    },

    #[error("colony of {team} placed on a wall at {pos}")]
    ColonyOnWall { team: Team, pos: Vec3 },

    #[error("frame step must be positive and finite, got {0}")]
    InvalidStep(f32),
}

pub type SimResult<T> = Result<T, SimError>;
