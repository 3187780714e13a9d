//! Board tests - gravity, group search, scoring and erase resolution

use puyo_rules::core::scoring::CHAIN_BONUS;
use puyo_rules::core::Board;
use puyo_rules::types::{
    BoardEvent, Color, Pos, ScoringMode, ALL_CLEAR_BONUS, BOARD_HEIGHT, BOARD_WIDTH,
    FALL_FRAMES_PER_CELL,
};

#[test]
fn test_board_new_empty() {
    let board = Board::new();
    assert_eq!(board.width(), BOARD_WIDTH);
    assert_eq!(board.height(), BOARD_HEIGHT);

    for y in 0..BOARD_HEIGHT as i8 {
        for x in 0..BOARD_WIDTH as i8 {
            let pos = Pos::new(x, y);
            assert!(board.occupy(pos), "Cell ({}, {}) should be free", x, y);
            assert_eq!(board.get(pos), Some(None));
        }
    }
}

#[test]
fn test_board_get_out_of_bounds() {
    let board = Board::new();

    assert_eq!(board.get(Pos::new(-1, 0)), None);
    assert_eq!(board.get(Pos::new(0, -1)), None);
    assert_eq!(board.get(Pos::new(BOARD_WIDTH as i8, 0)), None);
    assert_eq!(board.get(Pos::new(0, BOARD_HEIGHT as i8)), None);

    assert!(!board.occupy(Pos::new(-1, 0)));
    assert!(!board.occupy(Pos::new(0, BOARD_HEIGHT as i8)));
}

#[test]
fn test_settle_rejects_taken_and_outside() {
    let mut board = Board::new();
    assert!(board.settle(Pos::new(3, 4), Color::Purple));
    assert!(!board.settle(Pos::new(3, 4), Color::Green));
    assert_eq!(board.get(Pos::new(3, 4)), Some(Some(Color::Purple)));

    assert!(!board.settle(Pos::new(6, 0), Color::Green));
    assert!(!board.settle(Pos::new(0, -1), Color::Green));
    assert_eq!(board.filled_count(), 1);
}

#[test]
fn test_square_of_four_scores_first_chain() {
    let mut board = Board::new();
    board.settle(Pos::new(2, 0), Color::Red);
    board.settle(Pos::new(3, 0), Color::Red);
    board.settle(Pos::new(2, 1), Color::Red);
    board.settle(Pos::new(3, 1), Color::Red);

    assert!(board.find_groups(ScoringMode::Enabled(1)));
    assert_eq!(board.erase_set().len(), 4);
    assert!(board.pop_score() >= 10 * 4 * CHAIN_BONUS[1]);
}

#[test]
fn test_single_floating_cell_lands_on_floor() {
    let mut board = Board::new();
    board.settle(Pos::new(0, 5), Color::Green);

    assert!(board.resolve_fall_plan());
    assert_eq!(board.fall_plan().len(), 1);
    let fall = board.fall_plan()[0];
    assert_eq!((fall.column, fall.source_row, fall.dest_row), (0, 5, 0));
    assert_eq!(board.get(Pos::new(0, 0)), Some(Some(Color::Green)));

    let frames = 5 * FALL_FRAMES_PER_CELL;
    for i in 1..=frames {
        let still = board.advance_fall();
        assert_eq!(still, i < frames, "frame {}", i);
    }
    assert!(board.fall_plan().is_empty());
    assert_eq!(board.falling().count(), 0);
}

#[test]
fn test_fall_emits_moved_events() {
    let mut board = Board::from_ascii(&["b..", "...", ".y."]).unwrap();
    board.drain_events();

    assert!(board.resolve_fall_plan());
    assert_eq!(
        board.drain_events().collect::<Vec<_>>(),
        vec![BoardEvent::Moved {
            from: Pos::new(0, 2),
            to: Pos::new(0, 0)
        }]
    );
}

#[test]
fn test_gap_in_column_compacts() {
    // Column 1: floor cell, gap, two stacked cells, gap, one more.
    let mut board = Board::from_ascii(&[".r", "..", ".g", ".b", "..", ".y"]).unwrap();
    assert!(board.resolve_fall_plan());

    assert_eq!(board.get(Pos::new(1, 0)), Some(Some(Color::Yellow)));
    assert_eq!(board.get(Pos::new(1, 1)), Some(Some(Color::Blue)));
    assert_eq!(board.get(Pos::new(1, 2)), Some(Some(Color::Green)));
    assert_eq!(board.get(Pos::new(1, 3)), Some(Some(Color::Red)));
    assert_eq!(board.get(Pos::new(1, 4)), Some(None));

    assert!(!board.resolve_fall_plan());
}

#[test]
fn test_l_shape_and_separate_groups() {
    let mut board = Board::from_ascii(&[
        "g.....", //
        "g...bb",
        "gg..bb",
    ])
    .unwrap();
    assert!(board.find_groups(ScoringMode::Enabled(1)));
    assert_eq!(board.erase_set().len(), 8);
    let score = board.last_erase_score().unwrap();
    assert_eq!(score.color_bonus, 6);
    assert_eq!(score.connect_bonus, 0);
    assert!(score.all_clear);
}

#[test]
fn test_diagonal_does_not_connect() {
    let mut board = Board::from_ascii(&["r.r.", ".r.r"]).unwrap();
    assert!(!board.find_groups(ScoringMode::Enabled(1)));
}

#[test]
fn test_all_clear_only_when_board_ends_empty() {
    let mut board = Board::from_ascii(&["yyyy"]).unwrap();
    assert!(board.find_groups(ScoringMode::Enabled(1)));
    let clear = board.pop_score();
    assert_eq!(clear, 10 * 4 * (8 + 3) + ALL_CLEAR_BONUS);

    let mut board = Board::from_ascii(&["r...", "yyyy"]).unwrap();
    assert!(board.find_groups(ScoringMode::Enabled(1)));
    assert_eq!(board.pop_score(), 10 * 4 * (8 + 3));
}

#[test]
fn test_pop_score_drains_to_zero() {
    let mut board = Board::from_ascii(&["bbbb"]).unwrap();
    assert!(board.find_groups(ScoringMode::Enabled(2)));
    assert!(board.pop_score() > 0);
    assert_eq!(board.pop_score(), 0);
    assert_eq!(board.pop_score(), 0);
}

#[test]
fn test_two_step_chain_resolution() {
    // Clearing the green row drops the red on top into the red column.
    let mut board = Board::from_ascii(&[
        ".r....", //
        "gggg..",
        "rrr...",
    ])
    .unwrap();

    assert!(board.find_groups(ScoringMode::Enabled(1)));
    while board.advance_erase(1.0 / 60.0) {}
    assert!(board.resolve_fall_plan());
    while board.advance_fall() {}
    assert!(!board.resolve_fall_plan());

    assert!(board.find_groups(ScoringMode::Enabled(2)));
    assert_eq!(board.erase_set().len(), 4);
    while board.advance_erase(1.0 / 60.0) {}
    assert_eq!(board.filled_count(), 0);

    let first = 10 * 4 * (8 + 3);
    let second = 10 * 4 * (16 + 3) + ALL_CLEAR_BONUS;
    assert_eq!(board.pop_score(), first + second);
}

#[test]
fn test_erase_is_time_based() {
    let mut a = Board::from_ascii(&["gggg"]).unwrap();
    let mut b = a.clone();
    a.find_groups(ScoringMode::Suppressed);
    b.find_groups(ScoringMode::Suppressed);

    // Halving the step doubles the tick count for the same elapsed time.
    let mut ticks_a = 0;
    while a.advance_erase(1.0 / 60.0) {
        ticks_a += 1;
    }
    let mut ticks_b = 0;
    while b.advance_erase(1.0 / 30.0) {
        ticks_b += 1;
    }
    assert!(ticks_a > ticks_b);
    assert!((ticks_a as f32 / 60.0 - ticks_b as f32 / 30.0).abs() < 0.05);
}

#[test]
fn test_clear_board() {
    let mut board = Board::from_ascii(&["rgby"]).unwrap();
    board.clear();
    assert_eq!(board.filled_count(), 0);
    assert_eq!(board.drain_events().last(), Some(BoardEvent::Cleared));
}
