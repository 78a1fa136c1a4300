//! Unit tests for colony-bus.

#[cfg(test)]
mod post {
    use colony_core::{AgentId, AgentRef, Role, Team, Vec3};

    use crate::{Delivery, Message, MessageKind, PostOffice, Recipient, SCENE};

    /// Records every message it sees into the world log.
    struct Logger;

    impl Recipient<Vec<Message>> for Logger {
        fn handle(&mut self, message: &Message, log: &mut Vec<Message>) -> bool {
            log.push(message.clone());
            true
        }
    }

    fn worker() -> AgentRef {
        AgentRef::new(AgentId(4), 1)
    }

    fn delivered() -> Message {
        Message::ResourceDelivered { worker: worker(), amount: 1, team: Team(0) }
    }

    #[test]
    fn send_invokes_handler_exactly_once() {
        let mut office: PostOffice<Vec<Message>> = PostOffice::new();
        office.register(SCENE, Box::new(Logger));
        let mut log = Vec::new();

        assert_eq!(office.send(SCENE, delivered(), &mut log), Delivery::Handled);
        assert_eq!(log, vec![delivered()]);
        assert_eq!(office.stats().handled, 1);
    }

    #[test]
    fn unknown_name_is_a_no_op() {
        let mut office: PostOffice<Vec<Message>> = PostOffice::new();
        let mut log = Vec::new();
        assert!(!office.is_registered("Nobody"));
        assert_eq!(office.send("Nobody", delivered(), &mut log), Delivery::NoRecipient);
        assert!(log.is_empty());
        assert_eq!(office.stats().undelivered, 1);
    }

    #[test]
    fn unrecognized_kind_is_ignored() {
        let mut office: PostOffice<u32> = PostOffice::new();
        office.register(
            SCENE,
            Box::new(|m: &Message, count: &mut u32| {
                if m.kind() == MessageKind::UnitDied {
                    *count += 1;
                    true
                } else {
                    false
                }
            }),
        );
        let mut count = 0u32;
        assert!(!office.send(SCENE, delivered(), &mut count).is_handled());
        let died = Message::UnitDied { unit: worker(), team: Team(0), role: Role::Worker };
        assert!(office.send(SCENE, died, &mut count).is_handled());
        assert_eq!(count, 1);
        assert_eq!(office.stats().ignored, 1);
    }

    #[test]
    fn last_registration_wins() {
        let mut office: PostOffice<Vec<&'static str>> = PostOffice::new();
        office.register(SCENE, Box::new(|_: &Message, w: &mut Vec<&'static str>| {
            w.push("first");
            true
        }));
        office.register(SCENE, Box::new(|_: &Message, w: &mut Vec<&'static str>| {
            w.push("second");
            true
        }));
        assert_eq!(office.len(), 1);
        let mut calls = Vec::new();
        office.send(SCENE, delivered(), &mut calls);
        assert_eq!(calls, vec!["second"]);
    }

    #[test]
    fn handler_effects_are_visible_after_send_returns() {
        let mut office: PostOffice<Vec3> = PostOffice::new();
        office.register(SCENE, Box::new(|m: &Message, pos: &mut Vec3| {
            if let Message::RequestHelp { location, .. } = m {
                *pos = *location;
                return true;
            }
            false
        }));
        let mut rally = Vec3::ZERO;
        let help = Message::RequestHelp { caller: worker(), location: Vec3::xy(3.0, 4.0), team: Team(1) };
        office.send(SCENE, help, &mut rally);
        assert_eq!(rally, Vec3::xy(3.0, 4.0));
    }
}

#[cfg(test)]
mod message {
    use colony_core::{AgentId, AgentRef, Role, Team, Vec3};

    use crate::{Message, MessageKind};

    #[test]
    fn kind_and_team() {
        let r = AgentRef::new(AgentId(1), 1);
        let spawn = Message::SpawnUnit { spawner: r, role: Role::Worker, position: Vec3::ZERO };
        assert_eq!(spawn.kind(), MessageKind::SpawnUnit);
        assert_eq!(spawn.team(), None);

        let threat = Message::QueenThreat { queen: r, team: Team(1) };
        assert_eq!(threat.kind(), MessageKind::QueenThreat);
        assert_eq!(threat.team(), Some(Team(1)));
        assert_eq!(MessageKind::EnemySpotted.to_string(), "enemy_spotted");
    }
}
