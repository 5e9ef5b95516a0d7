use pathtable_core::{
    CompiledPathfinder, Direction, DirectionTable, Offset, UNREACHED, UNSENSED_COST,
};
use pathtable_system_compiler::compile;
use pathtable_world::{Board, Host, Pathfinder, Position, Predecessor, RuntimeError};

fn open_board(side: u32, agent: Position) -> Board {
    Board::new(side, side, agent)
}

#[test]
fn standing_on_the_target_returns_center() {
    let compiled = compile(8).expect("radius 8 compiles");
    let board = open_board(21, Position::new(10, 10));
    let pathfinder = Pathfinder::new(&compiled);

    assert_eq!(
        pathfinder.pathfind_towards(&board, Position::new(10, 10), 0),
        Ok(Direction::Center)
    );
}

#[test]
fn diagonal_target_moves_diagonally() {
    let compiled = compile(8).expect("radius 8 compiles");
    let board = open_board(21, Position::new(10, 10));
    let pathfinder = Pathfinder::new(&compiled);

    let table = pathfinder.relax(&board, 0);
    let record = table
        .record_at(compiled.topology(), Offset::new(2, 2))
        .expect("(2,2) lies inside the window");
    assert_eq!(record.best_direction, Direction::SouthWest);
    assert_eq!(record.path_length, 30);
    assert_eq!(record.position, Some(Position::new(12, 12)));

    assert_eq!(
        pathfinder.pathfind_towards(&board, Position::new(12, 12), 0),
        Ok(Direction::NorthEast)
    );
}

#[test]
fn uniform_rubble_costs_follow_chebyshev_distance() {
    let compiled = compile(34).expect("radius 34 compiles");
    let mut board = open_board(41, Position::new(20, 20));
    board.fill_rubble(7);
    let table = Pathfinder::new(&compiled).relax(&board, 0);

    for (cell, offset) in compiled.topology().iter() {
        let record = table.record(cell).expect("record exists");
        let chebyshev = i32::try_from(offset.chebyshev_distance()).expect("small distance");
        assert_eq!(record.cost, 17, "cost of {offset}");
        assert_eq!(record.path_length, chebyshev * 17 + 10, "path length of {offset}");
    }
}

#[test]
fn extra_rounds_leave_an_open_board_unchanged() {
    let compiled = compile(34).expect("radius 34 compiles");
    let mut board = open_board(41, Position::new(20, 20));
    board.fill_rubble(3);
    let pathfinder = Pathfinder::new(&compiled);

    let initial = pathfinder.relax(&board, 0);
    for rounds in [1, 2, 5] {
        assert_eq!(pathfinder.relax(&board, rounds), initial, "{rounds} extra rounds");
    }
}

#[test]
fn occupied_cells_are_never_routed_through() {
    let compiled = compile(20).expect("radius 20 compiles");
    let board = open_board(41, Position::new(20, 20)).with_obstacle(Position::new(20, 21));
    let pathfinder = Pathfinder::new(&compiled);
    let blocked = compiled
        .topology()
        .index_of(Offset::new(0, 1))
        .expect("north neighbour lies inside the window");

    for rounds in [0, 1, 3] {
        let table = pathfinder.relax(&board, rounds);

        let blocked_record = table.record(blocked).expect("record exists");
        assert_eq!(blocked_record.position, None);
        assert_eq!(blocked_record.path_length, UNREACHED);
        assert_eq!(blocked_record.cost, UNSENSED_COST);
        assert_eq!(blocked_record.predecessor, None);

        for (cell, offset) in compiled.topology().iter() {
            let Some(route) = table.route(cell) else {
                continue;
            };
            assert!(
                !route.contains(&blocked),
                "route to {offset} passes through the occupied cell after {rounds} rounds"
            );
        }

        for y in 2..=4 {
            let beyond = table
                .record_at(compiled.topology(), Offset::new(0, y))
                .expect("cell lies inside the window");
            assert_eq!(
                beyond.best_direction,
                Direction::SouthEast,
                "(0,{y}) after {rounds} rounds"
            );
        }

        assert_eq!(
            pathfinder.pathfind_towards(&board, Position::new(20, 22), rounds),
            Ok(Direction::NorthWest)
        );
    }
}

#[test]
fn walled_targets_need_extra_rounds() {
    let compiled = compile(20).expect("radius 20 compiles");
    let mut board = open_board(41, Position::new(20, 20));
    for x in 17..=23 {
        board.set_blocked(Position::new(x, 22), true);
    }
    let pathfinder = Pathfinder::new(&compiled);
    let target = Position::new(20, 23);
    let behind_wall = Offset::new(0, 3);

    let initial = pathfinder.relax(&board, 0);
    let record = initial
        .record_at(compiled.topology(), behind_wall)
        .expect("(0,3) lies inside the window");
    assert!(!record.is_reached());
    assert_eq!(
        pathfinder.pathfind_towards(&board, target, 0),
        Ok(Direction::Center)
    );

    let relaxed = pathfinder.relax(&board, 3);
    let record = relaxed
        .record_at(compiled.topology(), behind_wall)
        .expect("(0,3) lies inside the window");
    assert_eq!(record.path_length, 90);

    let mut ticks = 0;
    while board.agent() != target {
        assert!(ticks < 20, "agent did not reach the target behind the wall");
        let direction = pathfinder
            .pathfind_towards(&board, target, 3)
            .expect("target is clamped into the window");
        assert!(board.step(direction), "moved {direction:?} into a wall");
        ticks += 1;
    }
    assert_eq!(ticks, 8);
}

#[test]
fn distant_targets_are_clamped_into_the_window() {
    let compiled = compile(20).expect("radius 20 compiles");
    let pathfinder = Pathfinder::new(&compiled);
    let origin = Position::new(30, 30);

    let cases = [
        (Position::new(55, 38), Position::new(34, 30)),
        (Position::new(2, 45), Position::new(27, 33)),
        (Position::new(30, 0), Position::new(30, 26)),
        (Position::new(40, 40), Position::new(33, 33)),
        (Position::new(32, 33), Position::new(32, 33)),
    ];
    for (target, expected) in cases {
        let clamped = pathfinder.clamp_target(origin, target);
        assert_eq!(clamped, expected, "clamping {target}");
        assert!(origin.distance_squared_to(clamped) <= 20);
    }
}

#[test]
fn distant_targets_are_reached_in_chebyshev_ticks() {
    let compiled = compile(20).expect("radius 20 compiles");
    let pathfinder = Pathfinder::new(&compiled);

    for (target, expected_ticks) in [
        (Position::new(55, 38), 25),
        (Position::new(2, 45), 28),
        (Position::new(30, 59), 29),
    ] {
        let mut board = open_board(60, Position::new(30, 30));
        let mut ticks = 0;
        while board.agent() != target {
            assert!(ticks < 100, "agent did not reach {target}");
            let direction = pathfinder
                .pathfind_towards(&board, target, 0)
                .expect("target is clamped into the window");
            assert!(board.step(direction));
            ticks += 1;
        }
        assert_eq!(ticks, expected_ticks, "ticks towards {target}");
    }
}

#[test]
fn missing_table_entries_surface_as_errors() {
    let compiled = compile(8).expect("radius 8 compiles");
    let broken = CompiledPathfinder::new(
        compiled.radius(),
        compiled.topology().clone(),
        compiled.schedule().clone(),
        DirectionTable::new(),
        compiled.clamp_steps(),
    );
    let board = open_board(21, Position::new(10, 10));

    assert_eq!(
        Pathfinder::new(&broken).pathfind_towards(&board, Position::new(12, 11), 0),
        Err(RuntimeError::TargetOutsideWindow { dx: 2, dy: 1 })
    );
}

#[test]
fn seeds_point_back_at_the_origin() {
    let compiled = compile(8).expect("radius 8 compiles");
    let board = open_board(21, Position::new(10, 10));
    let table = Pathfinder::new(&compiled).relax(&board, 0);

    for offset in Offset::ORIGIN.neighbors() {
        let record = table
            .record_at(compiled.topology(), offset)
            .expect("seed lies inside the window");
        assert_eq!(record.predecessor, Some(Predecessor::Origin));
        assert_eq!(record.path_length, 20);
        assert_eq!(Some(record.best_direction), offset.direction_to(Offset::ORIGIN));
        assert!(board.is_traversable(board.agent().translate(offset)));
    }
}
