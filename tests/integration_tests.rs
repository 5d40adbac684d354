//! End-to-end board scenarios

use falling_blocks::core::{Board, BoardConfig, BoardState};
use falling_blocks::types::{Command, PieceShape, Point};
use falling_blocks::GameSession;

fn playing(pieces: &[PieceShape]) -> Board {
    let mut board = Board::new(BoardConfig::default().with_seed(12345)).unwrap();
    board.set_piece_sequence(pieces);
    board.new_game();
    board
}

#[test]
fn test_i_falls_to_the_floor_and_freezes() {
    let mut board = playing(&[PieceShape::I]);
    assert_eq!(board.current_piece().unwrap().position(), Point::new(3, 18));

    for _ in 0..20 {
        board.down();
    }
    let resting = board.current_piece().unwrap();
    assert_eq!(resting.position(), Point::new(3, -2));
    assert_eq!(board.snapshot().filled_count(), 0);

    board.down();
    for x in 3..7 {
        assert_eq!(board.cell(x, 0), Some(Some(PieceShape::I)));
    }
    assert_eq!(board.snapshot().filled_count(), 4);
    assert_eq!(board.current_piece().unwrap().position(), Point::new(3, 18));
    assert_eq!(board.state(), BoardState::Playing);
}

#[test]
fn test_single_line_clear_shifts_rows_down() {
    let mut board = playing(&[PieceShape::I]);
    for x in 0..9 {
        assert!(board.fill_cell(x, 0, PieceShape::T));
    }
    assert!(board.rotate_cw());
    for _ in 0..4 {
        assert!(board.right());
    }
    board.hard_drop();

    let rows = board.frozen_rows();
    assert_eq!(rows.len(), 20);
    for y in 0..3 {
        assert_eq!(board.cell(9, y), Some(Some(PieceShape::I)), "row {y}");
    }
    assert_eq!(board.snapshot().filled_count(), 3);
    assert_eq!(board.cell(0, 0), Some(None));
}

#[test]
fn test_top_out_ends_the_game() {
    let mut board = playing(&[PieceShape::O]);
    for y in 0..20 {
        for x in 3..7 {
            assert!(board.fill_cell(x, y, PieceShape::S));
        }
    }
    board.down();
    assert!(board.is_game_over());
    assert!(board.current_piece().is_none());

    let frozen = board.snapshot();
    board.down();
    board.apply(Command::Drop);
    board.apply(Command::RotateCw);
    assert_eq!(board.snapshot(), frozen);
}

#[test]
fn test_partial_freeze_above_the_top_keeps_visible_blocks() {
    let mut board = playing(&[PieceShape::T]);
    for y in 0..19 {
        for x in 3..6 {
            assert!(board.fill_cell(x, y, PieceShape::Z));
        }
    }
    // One row fits: cells (3..=5, 19) and the nub at (4, 20).
    board.down();
    assert_eq!(board.state(), BoardState::Playing);
    board.down();

    assert!(board.is_game_over());
    for x in 3..6 {
        assert_eq!(board.cell(x, 19), Some(Some(PieceShape::T)));
    }
}

#[test]
fn test_new_game_after_game_over_resets() {
    let mut board = playing(&[PieceShape::O, PieceShape::I]);
    while !board.is_game_over() {
        board.hard_drop();
    }
    board.apply(Command::NewGame);
    assert_eq!(board.state(), BoardState::Playing);
    assert_eq!(board.snapshot().filled_count(), 0);
    assert_eq!(board.current_piece().unwrap().shape(), PieceShape::O);
    assert_eq!(board.next_shape(), PieceShape::I);
}

#[test]
fn test_sequence_cycles() {
    let order = [PieceShape::S, PieceShape::Z, PieceShape::L];
    let mut board = playing(&order);
    let mut seen = Vec::new();
    for _ in 0..6 {
        seen.push(board.current_piece().unwrap().shape());
        board.hard_drop();
    }
    assert_eq!(seen, [order, order].concat());
}

#[test]
fn test_same_seed_same_pieces() {
    let run = |seed| {
        let mut board = Board::new(BoardConfig::default().with_seed(seed)).unwrap();
        board.new_game();
        let mut shapes = Vec::new();
        for _ in 0..10 {
            shapes.push(board.next_shape());
            board.hard_drop();
        }
        shapes
    };
    assert_eq!(run(77), run(77));
}

#[test]
fn test_session_replays_a_script() {
    let mut session = GameSession::new(BoardConfig::default().with_seed(1)).unwrap();
    session.set_piece_sequence(&[PieceShape::O]);
    session.start();
    // Five O pieces side by side clear two rows.
    let applied = session
        .run_script("LLLL X  LL X  X  RR X  RRRR X")
        .unwrap();
    assert_eq!(applied, 17);

    let card = session.score();
    assert_eq!(card.lines, 2);
    // 5 drops x 4 plus a double.
    assert_eq!(card.score, 20 + 100);
    assert_eq!(session.snapshot().filled_count(), 0);
}
