//! Score keeping from board notifications

use std::cell::RefCell;
use std::rc::Rc;

use falling_blocks::core::{Board, BoardEvent, BoardListener, MovableTetrisPiece};
use falling_blocks::types::{PieceShape, Point};
use falling_blocks::{step_interval_ms, ScoreKeeper};

#[test]
fn test_fresh_card() {
    let card = ScoreKeeper::new().card();
    assert_eq!((card.score, card.lines, card.level), (0, 0, 1));
    assert_eq!(card.lines_to_next_level, 5);
    assert!(!card.finished);
}

#[test]
fn test_line_scores() {
    for (rows, points) in [(1, 40), (2, 100), (3, 300), (4, 1200)] {
        let mut keeper = ScoreKeeper::new();
        keeper.on_event(&BoardEvent::RowFilled(rows));
        assert_eq!(keeper.card().score, points, "{rows} rows");
        assert_eq!(keeper.card().lines, u32::from(rows));
    }
}

#[test]
fn test_level_up_after_five_lines() {
    let mut keeper = ScoreKeeper::new();
    for _ in 0..4 {
        keeper.on_event(&BoardEvent::RowFilled(1));
    }
    assert_eq!(keeper.card().level, 1);
    keeper.on_event(&BoardEvent::RowFilled(1));
    let card = keeper.card();
    assert_eq!(card.level, 2);
    assert_eq!(card.lines_to_next_level, 5);
    assert_eq!(step_interval_ms(card.level), 600);
}

#[test]
fn test_new_game_resets_and_game_over_finishes() {
    let mut keeper = ScoreKeeper::new();
    keeper.on_event(&BoardEvent::RowFilled(3));
    keeper.on_event(&BoardEvent::GameOver(true));
    assert!(keeper.card().finished);

    let piece = MovableTetrisPiece::new(PieceShape::T, Point::new(3, 19));
    keeper.on_event(&BoardEvent::NewGame(piece));
    assert_eq!(keeper.card(), ScoreKeeper::new().card());
}

#[test]
fn test_keeper_follows_a_live_board() {
    let keeper = Rc::new(RefCell::new(ScoreKeeper::new()));
    let mut board = Board::seeded(2);
    board.set_piece_sequence(&[PieceShape::I]);
    let sink = Rc::clone(&keeper);
    board.subscribe_all(move |e: &BoardEvent| sink.borrow_mut().on_event(e));

    board.new_game();
    assert_eq!(keeper.borrow().card().score, 0);

    for y in 0..4 {
        for x in 0..9 {
            assert!(board.fill_cell(x, y, PieceShape::J));
        }
    }
    assert!(board.rotate_cw());
    while board.right() {}
    board.hard_drop();

    let card = keeper.borrow().card();
    assert_eq!(card.lines, 4);
    assert_eq!(card.score, 1200 + 4);
    assert_eq!(card.lines_to_next_level, 1);
}
