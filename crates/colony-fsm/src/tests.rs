//! Unit tests for colony-fsm.

#[cfg(test)]
mod machine {
    use colony_core::AgentId;

    use crate::{FsmError, NextState, State, StateMachine};

    /// Context that records every hook call in order.
    #[derive(Default)]
    struct Log {
        events: Vec<String>,
        /// What the current state should request on its next update.
        request: Vec<&'static str>,
    }

    struct Probe(&'static str);

    impl State<Log> for Probe {
        fn enter(&mut self, ctx: &mut Log) {
            ctx.events.push(format!("enter {}", self.0));
        }

        fn update(&mut self, ctx: &mut Log, _dt: f32, next: &mut NextState) {
            ctx.events.push(format!("update {}", self.0));
            for name in ctx.request.drain(..) {
                next.set(name);
            }
        }

        fn exit(&mut self, ctx: &mut Log) {
            ctx.events.push(format!("exit {}", self.0));
        }
    }

    fn machine() -> StateMachine<Log> {
        StateMachine::new(AgentId(0))
            .with_state("Idle", Box::new(Probe("Idle")))
            .with_state("Busy", Box::new(Probe("Busy")))
            .with_state("Done", Box::new(Probe("Done")))
    }

    #[test]
    fn start_enters_on_first_update() {
        let mut sm = machine();
        let mut log = Log::default();
        sm.start("Idle").unwrap();
        assert_eq!(sm.current_state(), None);
        sm.update(&mut log, 0.1);
        assert_eq!(sm.current_state(), Some("Idle"));
        assert_eq!(log.events, ["enter Idle", "update Idle"]);
    }

    #[test]
    fn start_rejects_unknown_state() {
        let mut sm = machine();
        assert!(sm.has_state("Busy"));
        assert!(!sm.has_state("Nope"));
        assert!(matches!(sm.start("Nope"), Err(FsmError::UnknownState("Nope"))));
    }

    #[test]
    fn transition_is_deferred_to_next_update() {
        let mut sm = machine();
        let mut log = Log::default();
        sm.start("Idle").unwrap();
        sm.update(&mut log, 0.1);

        log.request.push("Busy");
        sm.update(&mut log, 0.1);
        // The requesting state finished its update as the current state.
        assert_eq!(sm.current_state(), Some("Idle"));
        assert_eq!(sm.pending_state(), Some("Busy"));

        log.events.clear();
        sm.update(&mut log, 0.1);
        assert_eq!(sm.current_state(), Some("Busy"));
        assert_eq!(log.events, ["exit Idle", "enter Busy", "update Busy"]);
    }

    #[test]
    fn last_request_wins() {
        let mut sm = machine();
        let mut log = Log::default();
        sm.start("Idle").unwrap();
        sm.update(&mut log, 0.1);
        log.request.extend(["Busy", "Done"]);
        sm.update(&mut log, 0.1);
        sm.update(&mut log, 0.1);
        assert_eq!(sm.current_state(), Some("Done"));
        assert!(!log.events.iter().any(|e| e == "enter Busy"));
    }

    #[test]
    fn unknown_pending_keeps_current() {
        let mut sm = machine();
        let mut log = Log::default();
        sm.start("Idle").unwrap();
        sm.update(&mut log, 0.1);
        sm.set_next_state("Missing");
        log.events.clear();
        sm.update(&mut log, 0.1);
        assert_eq!(sm.current_state(), Some("Idle"));
        assert_eq!(log.events, ["update Idle"]);
        assert_eq!(sm.pending_state(), None);
    }

    #[test]
    fn same_state_request_does_not_reenter() {
        let mut sm = machine();
        let mut log = Log::default();
        sm.start("Idle").unwrap();
        sm.update(&mut log, 0.1);
        sm.set_next_state("Idle");
        log.events.clear();
        sm.update(&mut log, 0.1);
        assert_eq!(log.events, ["update Idle"]);
    }

    #[test]
    fn empty_machine_does_nothing() {
        let mut sm: StateMachine<Log> = StateMachine::new(AgentId(3));
        let mut log = Log::default();
        sm.set_next_state("Idle");
        sm.update(&mut log, 0.1);
        assert_eq!(sm.current_state(), None);
        assert!(log.events.is_empty());
        assert_eq!(sm.state_count(), 0);
    }

    #[test]
    fn exactly_one_current_state_every_tick() {
        let mut sm = machine();
        let mut log = Log::default();
        sm.start("Idle").unwrap();
        let script = ["Busy", "", "Done", "Idle", "", "Busy"];
        for name in script {
            if !name.is_empty() {
                log.request.push(name);
            }
            sm.update(&mut log, 0.1);
            assert!(sm.current_state().is_some());
        }
        // Every exit is immediately followed by an enter.
        for pair in log.events.windows(2) {
            if pair[0].starts_with("exit") {
                assert!(pair[1].starts_with("enter"), "{pair:?}");
            }
        }
    }

    #[test]
    fn later_registration_replaces_state() {
        let mut sm = machine();
        sm.add_state("Idle", Box::new(Probe("Idle2")));
        assert_eq!(sm.state_count(), 3);
        let mut log = Log::default();
        sm.start("Idle").unwrap();
        sm.update(&mut log, 0.1);
        assert_eq!(log.events[0], "enter Idle2");
    }
}

#[cfg(test)]
mod next_state {
    use crate::NextState;

    #[test]
    fn set_overwrites() {
        let mut n = NextState::default();
        assert!(!n.is_set());
        n.set("A");
        n.set("B");
        assert_eq!(n.get(), Some("B"));
        assert_eq!(n.take(), Some("B"));
        assert!(!n.is_set());
    }
}
