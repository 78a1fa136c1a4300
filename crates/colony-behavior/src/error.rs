use colony_fsm::FsmError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BehaviorError {
    #[error("state machine error: {0}")]
    Fsm(#[from] FsmError),
}

pub type BehaviorResult<T> = Result<T, BehaviorError>;
