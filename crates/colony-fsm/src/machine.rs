//! `StateMachine` — registry of named states with one current state.

use std::collections::HashMap;

use colony_core::AgentId;
use tracing::{debug, warn};

use crate::{FsmError, FsmResult, NextState, State};

/// Owns every state of one agent plus the current and pending names.
pub struct StateMachine<C> {
    owner:   AgentId,
    states:  HashMap<&'static str, Box<dyn State<C>>>,
    current: Option<&'static str>,
    pending: Option<&'static str>,
}

impl<C> StateMachine<C> {
    /// An empty machine.  `owner` only labels log lines.
    pub fn new(owner: AgentId) -> Self {
        Self { owner, states: HashMap::new(), current: None, pending: None }
    }

    /// Register `state` under `name`.  A later registration under the same
    /// name replaces the earlier one.
    pub fn add_state(&mut self, name: &'static str, state: Box<dyn State<C>>) {
        self.states.insert(name, state);
    }

    /// Builder-style [`add_state`](Self::add_state).
    pub fn with_state(mut self, name: &'static str, state: Box<dyn State<C>>) -> Self {
        self.add_state(name, state);
        self
    }

    /// Record a pending transition.  Nothing changes until the next
    /// [`update`](Self::update); repeated calls keep only the last name.
    pub fn set_next_state(&mut self, name: &'static str) {
        self.pending = Some(name);
    }

    /// Validated form of `set_next_state` for choosing the initial state.
    pub fn start(&mut self, name: &'static str) -> FsmResult<()> {
        if !self.states.contains_key(name) {
            return Err(FsmError::UnknownState(name));
        }
        self.pending = Some(name);
        Ok(())
    }

    /// Apply a pending transition, then update the current state.
    ///
    /// A pending name that is not registered is dropped with a warning and
    /// the current state keeps running.  A machine with no current state does
    /// nothing.
    pub fn update(&mut self, ctx: &mut C, dt: f32) {
        if let Some(next) = self.pending.take() {
            self.transition(ctx, next);
        }

        let Some(name) = self.current else { return };
        let Some(state) = self.states.get_mut(name) else { return };

        let mut next = NextState::default();
        state.update(ctx, dt, &mut next);
        if let Some(requested) = next.take() {
            self.pending = Some(requested);
        }
    }

    fn transition(&mut self, ctx: &mut C, next: &'static str) {
        if self.current == Some(next) {
            return;
        }
        if !self.states.contains_key(next) {
            warn!(agent = %self.owner, state = next, "transition to unregistered state ignored");
            return;
        }

        let prev = self.current;
        if let Some(old) = prev.and_then(|n| self.states.get_mut(n)) {
            old.exit(ctx);
        }
        self.current = Some(next);
        if let Some(new) = self.states.get_mut(next) {
            new.enter(ctx);
        }
        debug!(agent = %self.owner, from = prev.unwrap_or("-"), to = next, "state change");
    }

    // ── Introspection ─────────────────────────────────────────────────────

    pub fn current_state(&self) -> Option<&'static str> {
        self.current
    }

    pub fn pending_state(&self) -> Option<&'static str> {
        self.pending
    }

    pub fn has_state(&self, name: &str) -> bool {
        self.states.contains_key(name)
    }

    pub fn state_count(&self) -> usize {
        self.states.len()
    }

    pub fn owner(&self) -> AgentId {
        self.owner
    }
}
