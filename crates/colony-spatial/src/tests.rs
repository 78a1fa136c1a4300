//! Unit tests for colony-spatial.

/// Build a grid from an ASCII map: `#` = wall, anything else open.  Row 0 is
/// the first line.
#[cfg(test)]
fn grid_from(rows: &[&str], cell: f32) -> crate::TileGrid {
    let height = rows.len() as u32;
    let width = rows[0].len() as u32;
    let walls = rows.iter().flat_map(|r| r.chars().map(|c| c == '#')).collect();
    crate::TileGrid::new(width, height, cell).unwrap().with_walls(walls).unwrap()
}

#[cfg(test)]
mod grid {
    use colony_core::{CellId, Vec3};

    use crate::{CellCoord, SpatialError, TileGrid};

    #[test]
    fn rejects_bad_dimensions() {
        assert!(matches!(TileGrid::new(0, 5, 1.0), Err(SpatialError::EmptyGrid { .. })));
        assert!(matches!(TileGrid::new(5, 5, 0.0), Err(SpatialError::CellSize(_))));
        let g = TileGrid::new(2, 2, 1.0).unwrap();
        assert!(matches!(
            g.with_walls(vec![false; 3]),
            Err(SpatialError::WallCount { expected: 4, got: 3 })
        ));
    }

    #[test]
    fn cell_id_is_row_major() {
        let g = TileGrid::new(30, 30, 2.0).unwrap();
        let c = g.cell_of(Vec3::xy(7.0, 9.0)).unwrap();
        assert_eq!(c, CellCoord::new(3, 4));
        assert_eq!(g.cell_id(c), Some(CellId(4 * 30 + 3)));
        assert_eq!(g.coord_of(CellId(4 * 30 + 3)), Some(c));
    }

    #[test]
    fn outside_positions_have_no_cell() {
        let g = TileGrid::new(4, 4, 1.0).unwrap();
        assert!(g.cell_of(Vec3::xy(-0.5, 1.0)).is_none());
        assert!(g.cell_of(Vec3::xy(4.0, 1.0)).is_none());
        assert_eq!(g.cell_of_clamped(Vec3::xy(-3.0, 9.0)), CellCoord::new(0, 3));
    }

    #[test]
    fn center_uses_half_cell_offset() {
        let g = TileGrid::new(4, 4, 2.0).unwrap();
        assert_eq!(g.cell_offset(), 1.0);
        assert_eq!(g.center_of(CellCoord::new(1, 2)), Vec3::xy(3.0, 5.0));
    }

    #[test]
    fn out_of_bounds_is_wall() {
        let mut g = TileGrid::new(3, 3, 1.0).unwrap();
        assert!(g.is_wall(CellCoord::new(-1, 0)));
        assert!(g.is_wall(CellCoord::new(0, 3)));
        assert!(g.is_open(CellCoord::new(1, 1)));
        g.set_wall(CellCoord::new(1, 1), true).unwrap();
        assert!(g.is_wall(CellCoord::new(1, 1)));
        assert!(g.set_wall(CellCoord::new(5, 5), true).is_err());
        assert_eq!(g.open_cells().count(), 8);
    }

    #[test]
    fn clamp_keeps_position_in_grid() {
        let g = TileGrid::new(10, 10, 1.0).unwrap();
        let p = g.clamp_to_world(Vec3::xy(12.0, -1.0));
        assert!(g.cell_of(p).is_some());
    }
}

#[cfg(test)]
mod path {
    use crate::path::NEIGHBOR_ORDER;
    use crate::{nearest_open_neighbor, BfsPathfinder, CellCoord, Pathfinder, TileGrid};

    use super::grid_from;

    /// Shortest 4-connected distance by repeated relaxation.  Slow, obviously
    /// correct.
    fn reference_distance(g: &TileGrid, start: CellCoord, end: CellCoord) -> Option<usize> {
        let w = g.width() as i32;
        let h = g.height() as i32;
        let idx = |c: CellCoord| (c.row * w + c.col) as usize;
        let mut dist = vec![usize::MAX; (w * h) as usize];
        dist[idx(start)] = 0;
        loop {
            let mut changed = false;
            for row in 0..h {
                for col in 0..w {
                    let c = CellCoord::new(col, row);
                    if dist[idx(c)] == usize::MAX {
                        continue;
                    }
                    for (dc, dr) in NEIGHBOR_ORDER {
                        let n = c.offset(dc, dr);
                        if g.is_wall(n) {
                            continue;
                        }
                        if dist[idx(c)] + 1 < dist[idx(n)] {
                            dist[idx(n)] = dist[idx(c)] + 1;
                            changed = true;
                        }
                    }
                }
            }
            if !changed {
                break;
            }
        }
        let d = dist[idx(end)];
        (d != usize::MAX).then_some(d)
    }

    fn assert_valid_path(g: &TileGrid, start: CellCoord, path: &[CellCoord]) {
        let mut prev = start;
        for &c in path {
            assert!(g.is_open(c), "path crosses wall at {c}");
            assert_eq!(prev.distance_squared(c), 1, "non-adjacent step {prev} -> {c}");
            prev = c;
        }
    }

    const MAZE: [&str; 5] = [
        ".....",
        ".###.",
        "...#.",
        "##.#.",
        ".....",
    ];

    #[test]
    fn matches_reference_lengths_on_small_maze() {
        let g = grid_from(&MAZE, 1.0);
        let cells: Vec<_> = g.open_cells().collect();
        for &s in &cells {
            for &e in &cells {
                let path = BfsPathfinder.find_path(&g, s, e);
                let expected = reference_distance(&g, s, e);
                if s == e {
                    assert!(path.is_empty());
                    continue;
                }
                match expected {
                    Some(len) => {
                        assert_eq!(path.len(), len, "{s} -> {e}");
                        assert_eq!(path.last(), Some(&e));
                        assert_valid_path(&g, s, &path);
                    }
                    None => assert!(path.is_empty(), "{s} -> {e}"),
                }
            }
        }
    }

    #[test]
    fn excludes_start_includes_end() {
        let g = grid_from(&["...."], 1.0);
        let path = BfsPathfinder.find_path(&g, CellCoord::new(0, 0), CellCoord::new(3, 0));
        assert_eq!(path, vec![CellCoord::new(1, 0), CellCoord::new(2, 0), CellCoord::new(3, 0)]);
    }

    #[test]
    fn wall_or_outside_end_is_empty() {
        let g = grid_from(&MAZE, 1.0);
        assert!(BfsPathfinder.find_path(&g, CellCoord::new(0, 0), CellCoord::new(1, 1)).is_empty());
        assert!(BfsPathfinder.find_path(&g, CellCoord::new(0, 0), CellCoord::new(9, 0)).is_empty());
    }

    #[test]
    fn enclosed_target_is_empty() {
        let g = grid_from(&[".....", "..###", "..#.#", "..###"], 1.0);
        assert!(BfsPathfinder.find_path(&g, CellCoord::new(0, 0), CellCoord::new(3, 2)).is_empty());
    }

    #[test]
    fn ties_break_down_before_right() {
        // Both (0,0)->(0,1)->(1,1) and (0,0)->(1,0)->(1,1) are shortest; the
        // down step is expanded first.
        let g = grid_from(&["..", ".."], 1.0);
        let path = BfsPathfinder.find_path(&g, CellCoord::new(0, 0), CellCoord::new(1, 1));
        assert_eq!(path, vec![CellCoord::new(0, 1), CellCoord::new(1, 1)]);
        // Same query, same answer.
        assert_eq!(path, BfsPathfinder.find_path(&g, CellCoord::new(0, 0), CellCoord::new(1, 1)));
    }

    #[test]
    fn can_leave_a_wall_start() {
        let g = grid_from(&["#.."], 1.0);
        let path = BfsPathfinder.find_path(&g, CellCoord::new(0, 0), CellCoord::new(2, 0));
        assert_eq!(path.len(), 2);
    }

    #[test]
    fn nearest_open_neighbor_prefers_side_facing_origin() {
        let g = grid_from(&["...", ".#.", "..."], 1.0);
        let target = CellCoord::new(1, 1);
        assert_eq!(nearest_open_neighbor(&g, target, CellCoord::new(0, 1)), CellCoord::new(0, 1));
        assert_eq!(nearest_open_neighbor(&g, target, CellCoord::new(2, 2)), CellCoord::new(1, 2));
    }

    #[test]
    fn nearest_open_neighbor_without_open_side_returns_target() {
        let g = grid_from(&[".#.", "###", ".#."], 1.0);
        let target = CellCoord::new(1, 1);
        assert_eq!(nearest_open_neighbor(&g, target, CellCoord::new(0, 0)), target);
    }
}

#[cfg(test)]
mod index {
    use colony_agent::AgentPoolBuilder;
    use colony_core::{AgentId, Role, Team, Vec3};

    use crate::{ResourceIndex, SpatialGrid, TileGrid};

    #[test]
    fn every_active_agent_in_exactly_one_matching_bucket() {
        let g = TileGrid::new(10, 10, 1.0).unwrap();
        let mut pool = AgentPoolBuilder::new(3).build();
        let positions = [(0.5, 0.5), (0.7, 0.2), (5.5, 3.1), (9.9, 9.9), (4.0, 4.0)];
        for (x, y) in positions {
            pool.spawn(Role::Worker, Team(0), Vec3::xy(x, y));
        }
        let dead = pool.spawn(Role::Worker, Team(0), Vec3::xy(2.0, 2.0));
        pool.deactivate(dead);

        let mut sg = SpatialGrid::new();
        sg.rebuild(&pool, &g);
        assert_eq!(sg.len(), positions.len());

        for agent in pool.iter_active() {
            let expected = g.cell_id(g.cell_of(agent.pos).unwrap()).unwrap();
            let homes: Vec<_> = sg
                .buckets()
                .filter(|(_, ids)| ids.contains(&agent.id))
                .map(|(cell, _)| cell)
                .collect();
            assert_eq!(homes, vec![expected]);
        }
        assert!(sg.buckets().all(|(_, ids)| !ids.contains(&dead)));
    }

    #[test]
    fn neighborhood_window_is_clipped_at_edge() {
        let g = TileGrid::new(10, 10, 1.0).unwrap();
        let mut pool = AgentPoolBuilder::new(3).build();
        let near = pool.spawn(Role::Soldier, Team(0), Vec3::xy(1.5, 1.5));
        let corner = pool.spawn(Role::Soldier, Team(1), Vec3::xy(0.2, 0.2));
        let far = pool.spawn(Role::Soldier, Team(1), Vec3::xy(3.5, 0.5));

        let mut sg = SpatialGrid::new();
        sg.rebuild(&pool, &g);
        let mut found: Vec<AgentId> = sg.query_neighborhood(&g, Vec3::xy(0.1, 0.1), 2).collect();
        found.sort();
        assert_eq!(found, vec![near, corner]);
        assert!(!found.contains(&far));
    }

    #[test]
    fn rebuild_forgets_moved_agents() {
        let g = TileGrid::new(10, 10, 1.0).unwrap();
        let mut pool = AgentPoolBuilder::new(3).build();
        let id = pool.spawn(Role::Scout, Team(0), Vec3::xy(0.5, 0.5));
        let mut sg = SpatialGrid::new();
        sg.rebuild(&pool, &g);
        pool.get_mut(id).unwrap().pos = Vec3::xy(8.5, 8.5);
        // Stale until the next rebuild.
        assert_eq!(sg.query_neighborhood(&g, Vec3::xy(0.5, 0.5), 0).count(), 1);
        sg.rebuild(&pool, &g);
        assert_eq!(sg.query_neighborhood(&g, Vec3::xy(0.5, 0.5), 0).count(), 0);
        assert_eq!(sg.query_neighborhood(&g, Vec3::xy(8.5, 8.5), 0).count(), 1);
    }

    #[test]
    fn resource_index_finds_nearest_food_with_portions() {
        let mut pool = AgentPoolBuilder::new(3).build();
        let a = pool.spawn(Role::Food, Team::NEUTRAL, Vec3::xy(1.0, 1.0));
        let b = pool.spawn(Role::Food, Team::NEUTRAL, Vec3::xy(5.0, 5.0));
        let empty = pool.spawn(Role::Food, Team::NEUTRAL, Vec3::xy(0.0, 0.0));
        pool.spawn(Role::Worker, Team(0), Vec3::xy(0.1, 0.1));
        for id in [a, b] {
            pool.get_mut(id).unwrap().resource_count = 3;
        }

        let mut idx = ResourceIndex::new();
        idx.rebuild(&pool);
        assert_eq!(idx.len(), 2);
        assert_eq!(idx.nearest_where(Vec3::xy(0.0, 0.0), |_| true), Some(a));
        assert_eq!(idx.nearest_where(Vec3::xy(4.0, 4.0), |_| true), Some(b));
        assert_eq!(idx.nearest_where(Vec3::xy(0.0, 0.0), |id| id != a), Some(b));
        assert_eq!(idx.nearest_where(Vec3::xy(0.0, 0.0), |id| id == empty), None);
    }
}
