//! The `State` trait — one behavior unit of one agent.

/// Single pending-transition slot handed to `State::update`.
///
/// Only one request survives: calling [`set`](Self::set) twice keeps the
/// second name.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct NextState(Option<&'static str>);

impl NextState {
    /// Request a switch to `name` on the machine's next update.
    #[inline]
    pub fn set(&mut self, name: &'static str) {
        self.0 = Some(name);
    }

    #[inline]
    pub fn get(&self) -> Option<&'static str> {
        self.0
    }

    #[inline]
    pub fn is_set(&self) -> bool {
        self.0.is_some()
    }

    #[inline]
    pub fn take(&mut self) -> Option<&'static str> {
        self.0.take()
    }
}

/// A named behavior bound to one agent.
///
/// Implementations store the id of the agent they drive and look it up in
/// the context on every call.  Local counters live in the state itself, so
/// two agents running the same kind of state never share them.
///
/// # Required methods
///
/// Only [`update`][Self::update] is required.  `enter` and `exit` default to
/// doing nothing.
pub trait State<C> {
    /// Run once when the state becomes current.
    fn enter(&mut self, _ctx: &mut C) {}

    /// Run every tick the state is current.  Write into `next` to request a
    /// transition; it takes effect on the machine's next update.
    fn update(&mut self, ctx: &mut C, dt: f32, next: &mut NextState);

    /// Run once when the state stops being current, before the next state's
    /// `enter`.
    fn exit(&mut self, _ctx: &mut C) {}
}
