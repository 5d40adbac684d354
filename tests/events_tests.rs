//! Notification order and payload tests

use std::cell::RefCell;
use std::rc::Rc;

use falling_blocks::core::{Board, BoardEvent, EventKind};
use falling_blocks::types::{PieceShape, Point};

use EventKind::{BoardUpdate, CurrentPieceUpdate, GameOver, NewGame, NextPieceUpdate, RowFilled};

type Log = Rc<RefCell<Vec<BoardEvent>>>;

fn record(board: &mut Board) -> Log {
    let log: Log = Rc::default();
    let sink = Rc::clone(&log);
    board.subscribe_all(move |e: &BoardEvent| sink.borrow_mut().push(e.clone()));
    log
}

fn drain(log: &Log) -> Vec<EventKind> {
    log.borrow_mut().drain(..).map(|e| e.kind()).collect()
}

fn playing(pieces: &[PieceShape]) -> (Board, Log) {
    let mut board = Board::seeded(5);
    board.set_piece_sequence(pieces);
    let log = record(&mut board);
    board.new_game();
    (board, log)
}

#[test]
fn test_new_game_announces_preview_then_game() {
    let (_board, log) = playing(&[PieceShape::T, PieceShape::S]);
    let events = log.borrow().clone();
    assert_eq!(events.len(), 2);
    assert_eq!(events[0], BoardEvent::NextPieceUpdate(PieceShape::S));
    match &events[1] {
        BoardEvent::NewGame(piece) => {
            assert_eq!(piece.shape(), PieceShape::T);
            assert_eq!(piece.position(), Point::new(3, 19));
        }
        other => panic!("expected new-game, got {other:?}"),
    }
}

#[test]
fn test_down_notifies_move_and_step() {
    let (mut board, log) = playing(&[PieceShape::T]);
    drain(&log);
    board.down();
    assert_eq!(
        drain(&log),
        vec![CurrentPieceUpdate, BoardUpdate, BoardUpdate, CurrentPieceUpdate]
    );
}

#[test]
fn test_rejected_move_is_silent() {
    let (mut board, log) = playing(&[PieceShape::T]);
    while board.left() {}
    drain(&log);
    assert!(!board.left());
    assert!(drain(&log).is_empty());

    assert!(board.right());
    assert_eq!(drain(&log), vec![CurrentPieceUpdate, BoardUpdate]);
}

#[test]
fn test_hard_drop_is_quiet() {
    let (mut board, log) = playing(&[PieceShape::O]);
    drain(&log);
    board.hard_drop();
    let events = log.borrow().clone();
    assert_eq!(
        events.iter().map(BoardEvent::kind).collect::<Vec<_>>(),
        vec![NextPieceUpdate, BoardUpdate, CurrentPieceUpdate]
    );
    match &events[1] {
        BoardEvent::BoardUpdate(snap) => {
            assert_eq!(snap.cell(4, 0), Some(Some(PieceShape::O)));
            assert_eq!(snap.cell(5, 1), Some(Some(PieceShape::O)));
            assert!(snap.current.is_some());
        }
        other => panic!("expected board-update, got {other:?}"),
    }
}

#[test]
fn test_per_row_notifications_before_row_filled() {
    let (mut board, log) = playing(&[PieceShape::I]);
    for y in 0..4 {
        for x in 0..9 {
            assert!(board.fill_cell(x, y, PieceShape::L));
        }
    }
    assert!(board.rotate_cw());
    while board.right() {}
    drain(&log);
    board.hard_drop();

    let events = log.borrow().clone();
    let kinds: Vec<EventKind> = events.iter().map(BoardEvent::kind).collect();
    let mut expected = Vec::new();
    for _ in 0..4 {
        expected.extend([CurrentPieceUpdate, BoardUpdate]);
    }
    expected.extend([RowFilled, NextPieceUpdate, BoardUpdate, CurrentPieceUpdate]);
    assert_eq!(kinds, expected);

    assert_eq!(events[0], BoardEvent::CurrentPieceUpdate(None));
    assert_eq!(events[8], BoardEvent::RowFilled(4));
    assert_eq!(board.snapshot().filled_count(), 0);
}

#[test]
fn test_kind_filter_and_unsubscribe() {
    let mut board = Board::seeded(5);
    board.set_piece_sequence(&[PieceShape::O]);
    let previews = Rc::new(RefCell::new(Vec::new()));
    let sink = Rc::clone(&previews);
    let id = board.subscribe(NextPieceUpdate, move |e: &BoardEvent| {
        if let BoardEvent::NextPieceUpdate(shape) = e {
            sink.borrow_mut().push(*shape);
        }
    });

    board.new_game();
    board.hard_drop();
    assert_eq!(*previews.borrow(), vec![PieceShape::O, PieceShape::O]);

    assert!(board.unsubscribe(id));
    board.hard_drop();
    assert_eq!(previews.borrow().len(), 2);
}

#[test]
fn test_sequence_change_respawns_during_play() {
    let (mut board, log) = playing(&[PieceShape::O]);
    board.down();
    drain(&log);

    board.set_piece_sequence(&[PieceShape::L, PieceShape::J]);
    assert_eq!(
        drain(&log),
        vec![NextPieceUpdate, CurrentPieceUpdate, BoardUpdate]
    );
    let piece = board.current_piece().unwrap();
    assert_eq!(piece.shape(), PieceShape::L);
    assert_eq!(piece.position(), Point::new(3, 19));
    assert_eq!(board.next_shape(), PieceShape::J);
}

#[test]
fn test_sequence_change_before_start_is_silent() {
    let mut board = Board::seeded(5);
    let log = record(&mut board);
    board.set_piece_sequence(&[PieceShape::Z]);
    assert!(drain(&log).is_empty());
}

#[test]
fn test_game_over_fires_once_then_goes_quiet() {
    let (mut board, log) = playing(&[PieceShape::O]);
    for y in 0..20 {
        for x in 3..7 {
            assert!(board.fill_cell(x, y, PieceShape::S));
        }
    }
    drain(&log);
    board.down();

    let events = log.borrow().clone();
    assert_eq!(
        events.iter().map(BoardEvent::kind).collect::<Vec<_>>(),
        vec![GameOver, BoardUpdate, CurrentPieceUpdate]
    );
    assert_eq!(events[0], BoardEvent::GameOver(true));
    assert_eq!(events[2], BoardEvent::CurrentPieceUpdate(None));
    drain(&log);

    board.down();
    board.left();
    board.hard_drop();
    assert!(drain(&log).is_empty());

    board.new_game();
    assert_eq!(drain(&log), vec![NextPieceUpdate, NewGame]);
}
