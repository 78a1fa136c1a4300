//! Framework error type.
//!
//! Sub-crates define their own error enums and wrap `CoreError` as one
//! variant via `#[from]`, so configuration problems surface unchanged from
//! whichever crate validated them.

use thiserror::Error;

use crate::Role;

/// The top-level error type for `colony-core` and a common base for sub-crates.
#[derive(Debug, Error)]
pub enum CoreError {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("no unit stats configured for role {0}")]
    MissingStats(Role),
}

/// Shorthand result type for `colony-core`.
pub type CoreResult<T> = Result<T, CoreError>;
