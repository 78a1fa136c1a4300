//! Unit tests for colony-agent.

#[cfg(test)]
mod pool {
    use colony_core::{AgentId, Role, Team, Vec3};

    use crate::AgentPoolBuilder;

    #[test]
    fn fetch_grows_in_batches() {
        let mut pool = AgentPoolBuilder::new(1).build();
        assert!(pool.is_empty());
        let first = pool.fetch(Role::Worker);
        assert_eq!(first, AgentId(0));
        assert_eq!(pool.len(), 10);
        assert_eq!(pool.rngs.len(), 10);
        for _ in 0..9 {
            pool.fetch(Role::Worker);
        }
        assert_eq!(pool.len(), 10);
        pool.fetch(Role::Worker);
        assert_eq!(pool.len(), 20);
    }

    #[test]
    fn fetch_never_returns_an_active_slot() {
        let mut pool = AgentPoolBuilder::new(1).batch(3).build();
        let mut seen = Vec::new();
        for _ in 0..7 {
            let id = pool.fetch(Role::Soldier);
            assert!(!seen.contains(&id));
            seen.push(id);
        }
        assert_eq!(pool.active_count(), 7);
    }

    #[test]
    fn fetch_matches_role() {
        let mut pool = AgentPoolBuilder::new(1).batch(2).build();
        let w = pool.fetch(Role::Worker);
        pool.deactivate(w);
        // A free worker slot exists but a soldier needs its own batch.
        let s = pool.fetch(Role::Soldier);
        assert_ne!(s, w);
        assert_eq!(pool.get(s).map(|a| a.role), Some(Role::Soldier));
        assert_eq!(pool.len(), 4);
    }

    #[test]
    fn deactivated_slot_is_reused() {
        let mut pool = AgentPoolBuilder::new(1).build();
        let a = pool.fetch(Role::Tank);
        let _b = pool.fetch(Role::Tank);
        pool.deactivate(a);
        assert_eq!(pool.fetch(Role::Tank), a);
    }

    #[test]
    fn reuse_invalidates_old_refs() {
        let mut pool = AgentPoolBuilder::new(1).build();
        let id = pool.fetch(Role::Worker);
        let old = pool.reference(id).unwrap();
        assert!(pool.is_live(old));

        pool.deactivate(id);
        assert!(!pool.is_live(old));
        assert!(pool.reference(id).is_none());

        let again = pool.fetch(Role::Worker);
        assert_eq!(again, id);
        assert!(!pool.is_live(old), "recycled slot must not satisfy a stale ref");
        assert!(pool.is_live(pool.reference(id).unwrap()));
    }

    #[test]
    fn fetch_resets_per_life_state() {
        let mut pool = AgentPoolBuilder::new(1).build();
        let id = pool.spawn(Role::Soldier, Team(1), Vec3::xy(5.0, 5.0));
        {
            let a = pool.get_mut(id).unwrap();
            a.health = 1.0;
            a.carrying = true;
            a.path.push_back(colony_core::CellId(3));
        }
        pool.deactivate(id);
        let again = pool.fetch(Role::Soldier);
        let a = pool.get(again).unwrap();
        assert_eq!(a.health, a.max_health);
        assert!(!a.carrying);
        assert!(a.path.is_empty());
        assert_eq!(a.team, Team::NEUTRAL);
    }

    #[test]
    fn spawn_places_unit() {
        let mut pool = AgentPoolBuilder::new(1).build();
        let pos = Vec3::xy(10.0, 20.0);
        let id = pool.spawn(Role::Queen, Team(0), pos);
        let q = pool.get(id).unwrap();
        assert_eq!(q.pos, pos);
        assert_eq!(q.home_base, pos);
        assert_eq!(q.team, Team(0));
        assert_eq!(q.max_health, 50.0);
    }

    #[test]
    fn iter_active_skips_free_slots() {
        let mut pool = AgentPoolBuilder::new(1).build();
        let a = pool.fetch(Role::Food);
        let b = pool.fetch(Role::Food);
        pool.deactivate(a);
        let ids: Vec<_> = pool.iter_active().map(|x| x.id).collect();
        assert_eq!(ids, vec![b]);
        assert_eq!(pool.active_ids(), vec![b]);
    }
}

#[cfg(test)]
mod agent {
    use colony_core::{AgentId, Role, UnitStats};

    use crate::Agent;

    fn soldier() -> Agent {
        let mut a = Agent::vacant(AgentId(0), Role::Soldier);
        a.max_health = 10.0;
        a.health = 10.0;
        a
    }

    #[test]
    fn heal_clamps_to_max() {
        let mut a = soldier();
        a.health = 8.0;
        assert!(a.heal(5.0));
        assert_eq!(a.health, 10.0);
    }

    #[test]
    fn damage_reports_the_killing_blow_once() {
        let mut a = soldier();
        assert!(!a.take_damage(4.0));
        assert!(a.take_damage(7.0));
        assert_eq!(a.health, 0.0);
        assert!(!a.take_damage(1.0));
    }

    #[test]
    fn health_fraction() {
        let mut a = soldier();
        a.health = 2.5;
        assert!((a.health_fraction() - 0.25).abs() < 1e-6);
        assert_eq!(Agent::vacant(AgentId(1), Role::Food).health_fraction(), 0.0);
        assert!(UnitStats::INERT.max_health > 0.0);
    }
}
