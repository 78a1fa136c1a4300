//! Named-recipient synchronous delivery.

use std::collections::HashMap;

use tracing::trace;

use crate::Message;

/// Conventional name of the scene-level recipient.
pub const SCENE: &str = "Scene";

// ── Recipient ─────────────────────────────────────────────────────────────────

/// A message handler that may mutate the shared world `W`.
///
/// The message is lent for the duration of the call.  Return `true` when
/// the message kind was recognized and handled; unknown kinds return
/// `false` and must have no effect.
pub trait Recipient<W> {
    fn handle(&mut self, message: &Message, world: &mut W) -> bool;
}

impl<W, F> Recipient<W> for F
where
    F: FnMut(&Message, &mut W) -> bool,
{
    fn handle(&mut self, message: &Message, world: &mut W) -> bool {
        self(message, world)
    }
}

// ── Delivery ──────────────────────────────────────────────────────────────────

/// Outcome of one `send`.
#[derive(Copy, Clone, PartialEq, Eq, Debug)]
pub enum Delivery {
    /// The recipient recognized and processed the message.
    Handled,
    /// The recipient exists but did not recognize the message.
    Ignored,
    /// Nothing is registered under that name.  The message was dropped.
    NoRecipient,
}

impl Delivery {
    #[inline]
    pub fn is_handled(self) -> bool {
        self == Delivery::Handled
    }
}

/// Running totals of `send` outcomes.
#[derive(Copy, Clone, Default, Debug, PartialEq, Eq)]
pub struct DeliveryStats {
    pub handled:      u64,
    pub ignored:      u64,
    pub undelivered:  u64,
}

// ── PostOffice ────────────────────────────────────────────────────────────────

/// Directory from name to recipient.  Owned by the simulation, not global.
pub struct PostOffice<W> {
    recipients: HashMap<String, Box<dyn Recipient<W>>>,
    stats: DeliveryStats,
}

impl<W> Default for PostOffice<W> {
    fn default() -> Self {
        Self { recipients: HashMap::new(), stats: DeliveryStats::default() }
    }
}

impl<W> PostOffice<W> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Bind `name` to `recipient`.  A later registration under the same name
    /// replaces the earlier one.
    pub fn register(&mut self, name: impl Into<String>, recipient: Box<dyn Recipient<W>>) {
        self.recipients.insert(name.into(), recipient);
    }

    pub fn is_registered(&self, name: &str) -> bool {
        self.recipients.contains_key(name)
    }

    /// Deliver `message` to the recipient named `name`.
    ///
    /// The handler runs once, synchronously, with a borrow of the message.
    /// The office owns the message and drops it when the handler returns.
    /// Sending to an unknown name does nothing.
    pub fn send(&mut self, name: &str, message: Message, world: &mut W) -> Delivery {
        let kind = message.kind();
        let Some(recipient) = self.recipients.get_mut(name) else {
            self.stats.undelivered += 1;
            trace!(%name, %kind, "no recipient");
            return Delivery::NoRecipient;
        };

        let delivery = if recipient.handle(&message, world) {
            self.stats.handled += 1;
            Delivery::Handled
        } else {
            self.stats.ignored += 1;
            Delivery::Ignored
        };
        trace!(%name, %kind, ?delivery, "delivered");
        delivery
    }

    pub fn stats(&self) -> DeliveryStats {
        self.stats
    }

    pub fn len(&self) -> usize {
        self.recipients.len()
    }

    pub fn is_empty(&self) -> bool {
        self.recipients.is_empty()
    }
}
