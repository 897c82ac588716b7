//! Property tests for maze generation invariants

use proptest::prelude::*;
use tilt_maze::sim::{Cell, MazeGenerator, SeededRandom};

fn generate(level: u32, width: f32, height: f32, seed: u32) -> MazeGenerator {
    let mut maze = MazeGenerator::default();
    maze.init_with_seed(level, width, height, seed);
    maze
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn rng_sequence_is_reproducible(seed in any::<u32>()) {
        let mut a = SeededRandom::new(seed);
        let mut b = SeededRandom::new(seed);
        for _ in 0..50 {
            prop_assert_eq!(a.next().to_bits(), b.next().to_bits());
        }
    }

    #[test]
    fn every_exit_reachable_from_entry(
        level in 1u32..=10,
        width in 200.0f32..1600.0,
        height in 300.0f32..1600.0,
        seed in any::<u32>(),
    ) {
        let maze = generate(level, width, height, seed);
        prop_assert!(maze.unreachable_exits().is_empty());
        prop_assert_eq!(maze.exit_columns().len(), 5);

        let grid = maze.grid();
        let last = grid.rows() - 1;
        for &col in maze.exit_columns() {
            prop_assert_eq!(grid.get(col as i32, last as i32), Some(Cell::Exit));
        }
    }

    #[test]
    fn dimensions_are_odd(level in 0u32..=40, seed in any::<u32>()) {
        let maze = generate(level, 800.0, 1000.0, seed);
        let dims = maze.dimensions();
        prop_assert_eq!(dims.cols % 2, 1);
        prop_assert_eq!(dims.rows % 2, 1);
        prop_assert!(dims.cell_size >= 20.0);
    }

    #[test]
    fn exit_zones_tile_the_bottom_edge(
        level in 1u32..=10,
        width in 200.0f32..1600.0,
        seed in any::<u32>(),
    ) {
        let maze = generate(level, width, 900.0, seed);
        let zones = maze.exit_zones();
        let maze_width = maze.dimensions().width;

        prop_assert_eq!(zones.len(), 5);
        prop_assert_eq!(zones[0].x, 0.0);
        for pair in zones.windows(2) {
            prop_assert_eq!(pair[0].x + pair[0].width, pair[1].x);
        }
        let last = &zones[4];
        prop_assert_eq!(last.x + last.width, maze_width);
        let total: f32 = zones.iter().map(|z| z.width).sum();
        prop_assert!((total - maze_width).abs() < 1e-3);
    }

    #[test]
    fn outside_points_are_walls(
        seed in any::<u32>(),
        dx in 0.0f32..500.0,
        dy in 0.0f32..500.0,
    ) {
        let maze = generate(3, 800.0, 1000.0, seed);
        let dims = maze.dimensions();
        prop_assert!(maze.is_wall(-dx - 0.01, dims.height / 2.0));
        prop_assert!(maze.is_wall(dims.width / 2.0, -dy - 0.01));
        prop_assert!(maze.is_wall(dims.width + dx, dims.height / 2.0));
        prop_assert!(maze.is_wall(dims.width / 2.0, dims.height + dy));
    }
}

#[test]
fn third_zone_scores_1000() {
    let maze = generate(2, 800.0, 1000.0, 31337);
    let zone = &maze.exit_zones()[2];
    let hit = maze.exit_zone_for_x(zone.x + zone.width / 2.0);
    assert_eq!(hit.map(|z| z.score), Some(1000));
    assert_eq!(hit.map(|z| z.column), Some(maze.exit_columns()[2]));
}

#[test]
fn large_maze_does_not_overflow_stack() {
    let maze = generate(200, 800.0, 1000.0, 7);
    assert!(maze.unreachable_exits().is_empty());
}

#[test]
fn layout_serializes_to_json() {
    let maze = generate(1, 800.0, 1000.0, 1);
    let json = serde_json::to_string(maze.layout()).unwrap();
    assert!(json.contains("\"exit_zones\""));
    assert!(json.contains("\"score\":1000"));
}
