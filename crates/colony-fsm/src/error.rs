//! State-machine error type.

use thiserror::Error;

/// Errors produced by `colony-fsm`.
#[derive(Debug, Error)]
pub enum FsmError {
    #[error("no state named {0:?} is registered")]
    UnknownState(&'static str),
}

pub type FsmResult<T> = Result<T, FsmError>;
