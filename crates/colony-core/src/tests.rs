//! Unit tests for colony-core primitives.

#[cfg(test)]
mod ids {
    use crate::{AgentId, AgentRef, CellId, Team};

    #[test]
    fn index_roundtrip() {
        let id = AgentId(42);
        assert_eq!(id.index(), 42);
        assert_eq!(AgentId::try_from(42usize).unwrap(), id);
    }

    #[test]
    fn invalid_sentinels_are_max() {
        assert_eq!(AgentId::INVALID.0, u32::MAX);
        assert_eq!(CellId::INVALID.0, u32::MAX);
        assert_eq!(AgentId::default(), AgentId::INVALID);
    }

    #[test]
    fn display() {
        assert_eq!(AgentId(7).to_string(), "AgentId(7)");
        assert_eq!(AgentRef::new(AgentId(7), 3).to_string(), "AgentId(7)#3");
    }

    #[test]
    fn neutral_is_never_hostile() {
        assert!(Team(0).is_hostile_to(Team(1)));
        assert!(!Team(0).is_hostile_to(Team(0)));
        assert!(!Team::NEUTRAL.is_hostile_to(Team(0)));
        assert!(!Team(1).is_hostile_to(Team::NEUTRAL));
    }

    #[test]
    fn team_index() {
        assert_eq!(Team(1).index(), Some(1));
        assert_eq!(Team::NEUTRAL.index(), None);
    }
}

#[cfg(test)]
mod vec {
    use crate::Vec3;

    #[test]
    fn distance_ignores_z() {
        let a = Vec3::new(0.0, 0.0, 5.0);
        let b = Vec3::new(3.0, 4.0, -2.0);
        assert_eq!(a.distance_squared(b), 25.0);
    }

    #[test]
    fn normalized_zero_stays_zero() {
        assert_eq!(Vec3::ZERO.normalized(), Vec3::ZERO);
        let n = Vec3::xy(10.0, 0.0).normalized();
        assert!((n.x - 1.0).abs() < 1e-6 && n.y == 0.0);
    }
}

#[cfg(test)]
mod role {
    use crate::Role;

    #[test]
    fn classification() {
        assert!(Role::Food.is_resource());
        assert!(Role::Pheromone.is_resource());
        assert!(!Role::Worker.is_resource());
        assert!(Role::Soldier.is_military());
        assert!(Role::Tank.is_military());
        assert!(!Role::Queen.is_military());
    }

    #[test]
    fn index_matches_all_order() {
        for (i, role) in Role::ALL.iter().enumerate() {
            assert_eq!(role.index(), i);
        }
    }
}

#[cfg(test)]
mod time {
    use crate::SimClock;

    #[test]
    fn advance_accumulates() {
        let mut clock = SimClock::new();
        clock.advance(0.5);
        clock.advance(0.25);
        assert_eq!(clock.ticks, 2);
        assert!((clock.elapsed_secs - 0.75).abs() < 1e-6);
    }

    #[test]
    fn negative_and_nan_dt_count_as_zero() {
        let mut clock = SimClock::new();
        assert_eq!(clock.advance(-1.0), 0.0);
        assert_eq!(clock.advance(f32::NAN), 0.0);
        assert_eq!(clock.elapsed_secs, 0.0);
        assert_eq!(clock.ticks, 2);
    }

    #[test]
    fn display_minutes() {
        let clock = SimClock { ticks: 10, elapsed_secs: 75.5 };
        assert_eq!(clock.elapsed_ms().0, 1);
        assert!(clock.to_string().starts_with("T10 (1:"));
    }
}

#[cfg(test)]
mod config {
    use crate::{CoreError, GridConfig, Role, SimConfig, StatTable, UnitStats};

    #[test]
    fn defaults_validate() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn default_grid_is_thirty_cells_over_hundred_units() {
        let g = GridConfig::default();
        assert_eq!(g.width, 30);
        assert!((g.world_size().0 - 100.0).abs() < 1e-3);
        assert!((g.cell_offset() - g.cell_size / 2.0).abs() < 1e-6);
    }

    #[test]
    fn stats_scale_with_cell_size() {
        let table = StatTable::for_cell_size(2.0);
        assert_eq!(table.get(Role::Soldier).detection_range, 16.0);
        assert_eq!(table.get(Role::Queen).max_health, 50.0);
        assert_eq!(table.get(Role::Food).base_speed, 0.0);
    }

    #[test]
    fn rejects_empty_grid() {
        let mut cfg = SimConfig::default();
        cfg.grid.width = 0;
        assert!(matches!(cfg.validate(), Err(CoreError::Config(_))));
    }

    #[test]
    fn rejects_zero_health_role() {
        let mut cfg = SimConfig::default();
        cfg.stats.set(Role::Tank, UnitStats { max_health: 0.0, ..UnitStats::INERT });
        assert!(matches!(cfg.validate(), Err(CoreError::MissingStats(Role::Tank))));
    }
}

#[cfg(test)]
mod rng {
    use crate::{AgentId, AgentRng, SimRng};

    #[test]
    fn same_seed_same_stream() {
        let mut a = AgentRng::new(9, AgentId(3));
        let mut b = AgentRng::new(9, AgentId(3));
        for _ in 0..8 {
            assert_eq!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
        }
    }

    #[test]
    fn slots_get_distinct_streams() {
        let mut a = AgentRng::new(9, AgentId(0));
        let mut b = AgentRng::new(9, AgentId(1));
        assert_ne!(a.gen_range(0..u64::MAX), b.gen_range(0..u64::MAX));
    }

    #[test]
    fn sim_rng_range() {
        let mut rng = SimRng::new(1);
        for _ in 0..32 {
            let v: i32 = rng.gen_range(-2..=2);
            assert!((-2..=2).contains(&v));
        }
    }
}
