//! `colony-fsm` — named-state machines with deferred transitions.
//!
//! # Crate layout
//!
//! | Module      | Contents                                              |
//! |-------------|-------------------------------------------------------|
//! | [`state`]   | `State<C>` trait, `NextState` transition slot         |
//! | [`machine`] | `StateMachine<C>`                                     |
//! | [`error`]   | `FsmError`, `FsmResult<T>`                            |
//!
//! # Transition protocol
//!
//! A state never switches the machine directly.  During `update` it writes
//! the name of the state it wants into a [`NextState`] slot (last write
//! wins).  The machine copies that into its pending slot after the call and
//! applies it at the start of its *next* `update`: `exit` on the old state,
//! then `enter` on the new one, then `update` on the new one.
//!
//! The context type `C` is whatever the states need to read and write.  In
//! the simulation it is the whole world plus the message bus, so states stay
//! free of references and can be stored by value.

pub mod error;
pub mod machine;
pub mod state;

#[cfg(test)]
mod tests;

pub use error::{FsmError, FsmResult};
pub use machine::StateMachine;
pub use state::{NextState, State};
