//! `colony-bus` — the message bus.
//!
//! # Crate layout
//!
//! | Module        | Contents                                              |
//! |---------------|-------------------------------------------------------|
//! | [`message`]   | `Message` (closed sum type), `MessageKind`            |
//! | [`post`]      | `Recipient<W>` trait, `PostOffice<W>`, `Delivery`     |
//!
//! # Delivery model
//!
//! `PostOffice::send` looks the recipient up by name and calls its handler
//! once, on the caller's stack, before returning.  Effects are visible to
//! code that runs later in the same tick but not to code that already ran.
//! There is no queue and no broadcast.
//!
//! The office is generic over the world type `W` the handlers mutate, so it
//! carries no dependency on the agent pool and can be driven by any state.

pub mod message;
pub mod post;

#[cfg(test)]
mod tests;

pub use message::{Message, MessageKind};
pub use post::{Delivery, DeliveryStats, PostOffice, Recipient, SCENE};
