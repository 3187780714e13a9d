//! Piece tests - spawn, kicks, gravity and locking through the controller

use puyo_rules::core::{try_rotate, Board, PieceController};
use puyo_rules::types::{Color, Direction, Pos, Rotation, GROUND_FRAMES, SPAWN_POSITION};

fn ground(board: &mut Board, ctl: &mut PieceController) {
    while ctl.ground_frames() == GROUND_FRAMES {
        assert!(ctl.fall(board, false));
    }
}

// ============== Spawn ==============

#[test]
fn test_spawn_onto_occupied_cell_fails_without_mutation() {
    let mut board = Board::new();
    board.settle(SPAWN_POSITION, Color::Yellow);
    let before = board.clone();

    let mut ctl = PieceController::new();
    assert!(!ctl.spawn(&board, Color::Red, Color::Red));
    assert!(!ctl.is_active());
    assert_eq!(board, before);
}

#[test]
fn test_spawn_blocked_in_buffer_row_fails() {
    let mut board = Board::new();
    board.settle(SPAWN_POSITION.up(), Color::Yellow);

    let mut ctl = PieceController::new();
    assert!(!ctl.spawn(&board, Color::Red, Color::Red));
}

// ============== Rotation kicks ==============

#[test]
fn test_rotation_down_kicks_up_when_floor_below_is_taken() {
    let mut board = Board::new();
    // Below the axis is taken; the below-right diagonal is free.
    board.settle(Pos::new(2, 4), Color::Blue);
    let axis = Pos::new(2, 5);

    let rotated = try_rotate(axis, Rotation::Right, Direction::Right, |p| board.occupy(p));
    assert_eq!(rotated, Some((Pos::new(2, 6), Rotation::Down)));
}

#[test]
fn test_rotation_fails_when_kicked_pose_is_blocked() {
    let mut board = Board::new();
    board.settle(Pos::new(2, 4), Color::Blue);
    board.settle(Pos::new(3, 4), Color::Blue);
    // The kick lifts the axis to row 6, which is taken too.
    board.settle(Pos::new(2, 6), Color::Blue);
    let axis = Pos::new(2, 5);

    let rotated = try_rotate(axis, Rotation::Right, Direction::Right, |p| board.occupy(p));
    assert_eq!(rotated, None);
}

#[test]
fn test_failed_rotate_leaves_pose_unchanged() {
    let mut board = Board::new();
    // Walls on both sides of the spawn column.
    for y in 0..14 {
        board.settle(Pos::new(1, y), Color::Green);
        board.settle(Pos::new(3, y), Color::Green);
    }

    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Blue));
    let before = ctl.piece();

    assert!(!ctl.rotate(&board, Direction::Right));
    assert!(!ctl.rotate(&board, Direction::Left));
    assert_eq!(ctl.piece(), before);
}

#[test]
fn test_full_turn_returns_to_up() {
    let mut board = Board::new();
    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Blue));
    // Drop a little so the Down pose fits without a kick.
    for _ in 0..30 {
        ctl.fall(&mut board, true);
    }

    for _ in 0..4 {
        assert!(ctl.rotate(&board, Direction::Right));
    }
    assert_eq!(ctl.piece().unwrap().rotation, Rotation::Up);
}

// ============== Movement ==============

#[test]
fn test_translate_stops_at_walls() {
    let board = Board::new();
    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Blue));

    assert!(ctl.translate(&board, Direction::Left));
    assert!(ctl.translate(&board, Direction::Left));
    assert!(!ctl.translate(&board, Direction::Left));
    assert_eq!(ctl.piece().unwrap().axis.x, 0);

    for _ in 0..5 {
        ctl.translate(&board, Direction::Right);
    }
    assert_eq!(ctl.piece().unwrap().axis.x, 5);
}

#[test]
fn test_quick_drop_lands_on_stack() {
    let mut board = Board::from_ascii(&["..g", "..b"]).unwrap();
    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Yellow));
    ctl.quick_drop(&mut board);

    assert!(!ctl.is_active());
    assert_eq!(board.get(Pos::new(2, 2)), Some(Some(Color::Red)));
    assert_eq!(board.get(Pos::new(2, 3)), Some(Some(Color::Yellow)));
}

#[test]
fn test_horizontal_pair_splits_on_lock() {
    let mut board = Board::from_ascii(&["..b"]).unwrap();
    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Green));
    assert!(ctl.rotate(&board, Direction::Right));
    ctl.quick_drop(&mut board);

    // The axis rests on the blue cell, the child hangs over an empty column.
    assert_eq!(board.get(Pos::new(2, 1)), Some(Some(Color::Red)));
    assert_eq!(board.get(Pos::new(3, 1)), Some(Some(Color::Green)));
    assert!(board.resolve_fall_plan());
    assert_eq!(board.get(Pos::new(3, 0)), Some(Some(Color::Green)));
}

// ============== Gravity ==============

#[test]
fn test_piece_locks_after_ground_countdown() {
    let mut board = Board::new();
    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Blue));

    let mut ticks = 0u32;
    while ctl.fall(&mut board, false) {
        ticks += 1;
        assert!(ticks < 10_000, "piece never locked");
    }

    // 12 rows of slow gravity, then the ground countdown.
    assert_eq!(ticks, 12 * 12 + GROUND_FRAMES - 1);
    assert_eq!(board.get(Pos::new(2, 0)), Some(Some(Color::Red)));
    assert_eq!(board.get(Pos::new(2, 1)), Some(Some(Color::Blue)));
}

#[test]
fn test_grounded_piece_stays_controllable() {
    let mut board = Board::new();
    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Blue));

    ground(&mut board, &mut ctl);
    for _ in 0..10 {
        assert!(ctl.fall(&mut board, false));
    }
    assert_eq!(ctl.piece().unwrap().axis, Pos::new(2, 0));

    assert!(ctl.translate(&board, Direction::Right));
    assert!(ctl.rotate(&board, Direction::Right));
    let piece = ctl.piece().unwrap();
    assert_eq!(piece.axis, Pos::new(3, 0));
    assert_eq!(piece.rotation, Rotation::Right);

    // Moving on the ground does not refill the countdown.
    let left = ctl.ground_frames();
    let mut ticks = 0u32;
    while ctl.fall(&mut board, false) {
        ticks += 1;
    }
    assert_eq!(ticks, left - 1);
    assert_eq!(board.get(Pos::new(3, 0)), Some(Some(Color::Red)));
    assert_eq!(board.get(Pos::new(4, 0)), Some(Some(Color::Blue)));
    assert_eq!(board.filled_count(), 2);
}

#[test]
fn test_soft_drop_awards_points() {
    let mut board = Board::new();
    let mut ctl = PieceController::new();
    assert!(ctl.spawn(&board, Color::Red, Color::Blue));

    while ctl.fall(&mut board, true) {}
    // One point per row actually descended.
    assert_eq!(ctl.pop_score(), 12);
    assert_eq!(ctl.pop_score(), 0);
}
