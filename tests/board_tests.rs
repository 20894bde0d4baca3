//! Board tests - engine behaviour through the public API

use tetris_board::core::{line_clear_points, Board, BoardConfig, Grid, Motion};
use tetris_board::types::{Command, Direction, ShapeKind};

/// A config whose first spawned kind is `kind`.
fn config_starting_with(kind: ShapeKind) -> BoardConfig {
    (1..1000)
        .map(|seed| BoardConfig::default().with_seed(seed))
        .find(|config| {
            Board::with_config(*config)
                .unwrap()
                .active()
                .map(|p| p.kind)
                == Some(kind)
        })
        .expect("some seed spawns every kind first")
}

/// The middle character of every `|?|` triple, row by row.
fn symbols(render: &str) -> Vec<Vec<char>> {
    render
        .lines()
        .map(|line| line.chars().skip(1).step_by(3).collect())
        .collect()
}

#[test]
fn test_new_board_has_active_piece_and_next() {
    let board = Board::new(10, 20).unwrap();
    let active = board.active().unwrap();
    assert!(active.fits(board.grid()));
    assert_eq!(board.get_score(), 0);
    assert_eq!(board.preview(1), vec![board.get_next_shape_type()]);
}

#[test]
fn test_get_next_shape_type_does_not_advance() {
    let mut board = Board::new(10, 20).unwrap();
    let next = board.get_next_shape_type();
    assert_eq!(board.get_next_shape_type(), next);
    assert_eq!(board.get_next_shape_type(), next);
    board.hard_drop();
    assert_eq!(board.active().unwrap().kind, next);
}

#[test]
fn test_same_seed_same_sequence() {
    let config = BoardConfig::default().with_seed(42);
    let mut a = Board::with_config(config).unwrap();
    let mut b = Board::with_config(config).unwrap();
    for _ in 0..10 {
        assert_eq!(a.active(), b.active());
        assert_eq!(a.get_next_shape_type(), b.get_next_shape_type());
        a.hard_drop();
        b.hard_drop();
    }
    assert_eq!(a.render(), b.render());
}

#[test]
fn test_lateral_moves_stop_at_walls() {
    let mut board = Board::new(10, 20).unwrap();
    let y = board.active().unwrap().y;

    while board.move_shape(Direction::Left) == Motion::Moved {}
    let left = board.active().unwrap();
    assert_eq!(left.cells().iter().map(|c| c.0).min(), Some(0));
    assert_eq!(board.move_shape(Direction::Left), Motion::Blocked);
    assert_eq!(board.active().unwrap(), left);

    while board.move_shape(Direction::Right) == Motion::Moved {}
    let right = board.active().unwrap();
    assert_eq!(right.cells().iter().map(|c| c.0).max(), Some(9));
    assert_eq!(right.y, y);
    assert_eq!(board.grid().occupied_count(), 0);
}

#[test]
fn test_collides_is_pure() {
    let mut grid = Grid::new(10, 20).unwrap();
    grid.set(4, 5, Some(ShapeKind::L));
    let board = Board::with_grid(grid, BoardConfig::default()).unwrap();
    let before = board.render();

    for _ in 0..3 {
        assert!(board.collides(ShapeKind::O, 0, 3, 4));
        assert!(!board.collides(ShapeKind::O, 0, 5, 4));
        assert!(board.collides(ShapeKind::I, 0, 7, 0));
        assert!(board.collides(ShapeKind::T, 0, 0, 19));
    }
    assert_eq!(board.render(), before);
}

#[test]
fn test_tick_to_bottom_then_lock() {
    let mut board = Board::new(10, 20).unwrap();
    let first = board.active().unwrap();

    // Fall until the next tick would lock.
    while board.ghost_y() != Some(board.active().unwrap().y) {
        assert!(board.tick());
        assert_eq!(board.active().unwrap().x, first.x);
    }
    let resting = board.active().unwrap();
    let before = symbols(&board.render());

    assert!(board.tick());
    let after = symbols(&board.render());
    let spawned = board.active().unwrap();

    for y in 0..20 {
        for x in 0..10 {
            let cell = (x as i8, y as i8);
            let expected = if resting.cells().contains(&cell) {
                assert_eq!(before[y][x], '*');
                'x'
            } else if spawned.cells().contains(&cell) {
                '*'
            } else {
                before[y][x]
            };
            assert_eq!(after[y][x], expected, "cell ({}, {})", x, y);
        }
    }

    assert!(resting.cells().iter().any(|&(_, y)| y == 19));
    assert_eq!(board.grid().occupied_count(), 4);
    assert_eq!(board.get_score(), 0);
    assert_eq!(board.last_event().unwrap().lines_cleared, 0);
}

#[test]
fn test_render_format() {
    let board = Board::new(4, 4).unwrap();
    let render = board.render();
    assert_eq!(render.lines().count(), 4);
    for line in render.lines() {
        assert_eq!(line.len(), 12);
    }
    assert!(render.ends_with('\n'));
    assert_eq!(render.matches("|*|").count(), 4);
    assert_eq!(render.matches("|x|").count(), 0);
}

#[test]
fn test_spawn_collision_is_game_over() {
    let mut grid = Grid::new(10, 20).unwrap();
    for y in 0..2 {
        for x in 1..10 {
            grid.set(x, y, Some(ShapeKind::S));
        }
    }
    let mut board = Board::with_grid(grid, BoardConfig::default()).unwrap();

    assert!(board.is_game_over());
    assert!(board.active().is_none());
    assert!(!board.tick());
    assert!(!board.tick());
    assert_eq!(board.move_shape(Direction::Down), Motion::Halted);
    assert!(!board.rotate());
    assert!(!board.render().contains("|*|"));
}

#[test]
fn test_lock_path_reports_game_over() {
    // Everything but the top two rows is filled, minus one column so no row
    // can clear.
    let mut grid = Grid::new(10, 20).unwrap();
    for y in 2..20 {
        for x in 1..10 {
            grid.set(x, y, Some(ShapeKind::J));
        }
    }
    let mut board = Board::with_grid(grid, BoardConfig::default()).unwrap();
    assert!(!board.is_game_over());

    let mut ticks = 0;
    while board.tick() {
        ticks += 1;
        assert!(ticks < 50, "game never ended");
    }
    assert!(board.is_game_over());
    assert!(board.active().is_none());
    assert!(board.last_event().unwrap().game_over);
    assert_eq!(board.get_score(), 0);
}

#[test]
fn test_rotation_rejected_at_wall() {
    let mut board = Board::with_config(config_starting_with(ShapeKind::I)).unwrap();
    for _ in 0..3 {
        assert_eq!(board.move_shape(Direction::Down), Motion::Moved);
    }
    assert!(board.rotate());
    while board.move_shape(Direction::Left) == Motion::Moved {}

    let against_wall = board.active().unwrap();
    let grid = board.grid().clone();
    assert!(!board.rotate());
    assert_eq!(board.active().unwrap(), against_wall);
    assert_eq!(board.grid(), &grid);
}

#[test]
fn test_rotation_rejected_by_obstacle() {
    let config = config_starting_with(ShapeKind::T);
    let spawn = Board::with_config(config).unwrap().active().unwrap();

    // Block the cell the first rotation would move into.
    let target = spawn.rotated().cells()[3];
    let mut grid = Grid::new(10, 20).unwrap();
    grid.set(target.0, target.1, Some(ShapeKind::Z));
    let mut board = Board::with_grid(grid, config).unwrap();

    assert_eq!(board.active().unwrap(), spawn);
    assert!(!board.rotate());
    assert_eq!(board.active().unwrap(), spawn);
    assert_eq!(board.grid().occupied_count(), 1);
}

#[test]
fn test_rotation_cycles_back() {
    let mut board = Board::with_config(config_starting_with(ShapeKind::T)).unwrap();
    for _ in 0..2 {
        board.move_shape(Direction::Down);
    }
    let start = board.active().unwrap();
    for _ in 0..4 {
        assert!(board.rotate());
    }
    assert_eq!(board.active().unwrap(), start);
}

#[test]
fn test_double_line_clear_scores_schedule() {
    let config = config_starting_with(ShapeKind::O);
    let spawn = Board::with_config(config).unwrap().active().unwrap();
    let gap: Vec<i8> = spawn.cells().iter().map(|c| c.0).collect();

    let mut grid = Grid::new(10, 20).unwrap();
    for y in 18..20 {
        for x in 0..10 {
            if !gap.contains(&x) {
                grid.set(x, y, Some(ShapeKind::L));
            }
        }
    }
    let mut board = Board::with_grid(grid, config).unwrap();

    assert!(board.hard_drop());
    assert_eq!(board.get_score(), line_clear_points(2));
    assert_eq!(board.lines(), 2);
    assert_eq!(board.grid().occupied_count(), 0);
    let event = board.last_event().unwrap();
    assert_eq!(event.lines_cleared, 2);
    assert_eq!(event.points, 100);
}

#[test]
fn test_four_line_clear_scores_schedule() {
    let config = config_starting_with(ShapeKind::I);
    let mut board = Board::with_config(config).unwrap();
    for _ in 0..3 {
        board.move_shape(Direction::Down);
    }
    board.rotate();
    let column = board.active().unwrap().cells()[0].0;

    let mut grid = Grid::new(10, 20).unwrap();
    for y in 16..20 {
        for x in 0..10 {
            if x != column {
                grid.set(x, y, Some(ShapeKind::S));
            }
        }
    }
    let mut board = Board::with_grid(grid, config).unwrap();
    for _ in 0..3 {
        board.move_shape(Direction::Down);
    }
    assert!(board.rotate());

    board.apply(Command::HardDrop);
    assert_eq!(board.get_score(), 1200);
    assert_eq!(board.lines(), 4);
    assert!(board.grid().full_rows().is_empty());
}

#[test]
fn test_commands_after_game_over_change_nothing() {
    let mut grid = Grid::new(10, 20).unwrap();
    grid.fill_row(0, ShapeKind::I);
    let mut board = Board::with_grid(grid, BoardConfig::default()).unwrap();
    let before = board.render();

    for command in [
        Command::Move(Direction::Left),
        Command::Move(Direction::Down),
        Command::Rotate,
        Command::HardDrop,
    ] {
        assert!(!board.apply(command));
    }
    assert_eq!(board.render(), before);
}
