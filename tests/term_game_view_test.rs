use falling_blocks::core::Board;
use falling_blocks::term::{AnchorY, FrameBuffer, GameView, SidePanel, Viewport};
use falling_blocks::types::PieceShape;

fn screen_text(fb: &FrameBuffer) -> String {
    (0..fb.height())
        .map(|y| fb.row_text(y))
        .collect::<Vec<_>>()
        .join("\n")
}

fn started(pieces: &[PieceShape]) -> Board {
    let mut board = Board::seeded(1);
    board.set_piece_sequence(pieces);
    board.new_game();
    board
}

#[test]
fn term_view_renders_border_corners() {
    let snap = Board::seeded(1).snapshot();
    let view = GameView::default();

    // With cell_w=2 and cell_h=1: 10*2 by (20+4)*1, plus border => 22x26.
    assert_eq!(view.frame_size(&snap), (22, 26));
    let fb = view.render(&snap, &SidePanel::default(), Viewport::new(22, 26));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
    assert_eq!(fb.get(21, 0).unwrap().ch, '┐');
    assert_eq!(fb.get(0, 25).unwrap().ch, '└');
    assert_eq!(fb.get(21, 25).unwrap().ch, '┘');
}

#[test]
fn term_view_renders_frozen_cell_as_two_chars_wide() {
    let mut board = started(&[PieceShape::O]);
    assert!(board.fill_cell(0, 0, PieceShape::I));

    let fb = GameView::default().render(
        &board.snapshot(),
        &SidePanel::default(),
        Viewport::new(22, 26),
    );

    // Board row 0 is the last row inside the border.
    assert_eq!(fb.get(1, 24).unwrap().ch, '█');
    assert_eq!(fb.get(2, 24).unwrap().ch, '█');
    assert_eq!(fb.get(3, 24).unwrap().ch, '·');
}

#[test]
fn term_view_shows_spawned_piece_in_headroom() {
    let board = started(&[PieceShape::O]);
    let fb = GameView::default().render(
        &board.snapshot(),
        &SidePanel::default(),
        Viewport::new(22, 26),
    );

    // O blocks at board rows 20 and 21, columns 4 and 5.
    assert_eq!(fb.row_text(3), "│        ████        │");
    assert_eq!(fb.row_text(4), "│        ████        │");
}

#[test]
fn term_view_draws_side_panel_when_wide_enough() {
    let board = started(&[PieceShape::T]);
    let panel = SidePanel {
        score: 1234,
        level: 2,
        lines: 10,
        next: Some(board.next_shape()),
        ..SidePanel::default()
    };

    let all = screen_text(&GameView::default().render(&board.snapshot(), &panel, Viewport::new(60, 26)));
    assert!(all.contains("SCORE"));
    assert!(all.contains("1234"));
    assert!(all.contains("LEVEL"));
    assert!(all.contains("NEXT"));
}

#[test]
fn term_view_overlays_game_over() {
    let panel = SidePanel {
        game_over: true,
        ..SidePanel::default()
    };
    let fb = GameView::default().render(&Board::seeded(1).snapshot(), &panel, Viewport::new(22, 26));
    assert!(screen_text(&fb).contains("GAME OVER"));

    let paused = SidePanel {
        game_over: true,
        paused: true,
        ..SidePanel::default()
    };
    let fb = GameView::default().render(&Board::seeded(1).snapshot(), &paused, Viewport::new(22, 26));
    let text = screen_text(&fb);
    assert!(text.contains("PAUSED"));
    assert!(!text.contains("GAME OVER"));
}

#[test]
fn term_view_centers_board_by_default_on_tall_viewports() {
    let snap = Board::seeded(1).snapshot();
    let fb = GameView::default().render(&snap, &SidePanel::default(), Viewport::new(22, 34));

    // start_y = (34 - 26) / 2 = 4.
    assert_eq!(fb.get(0, 4).unwrap().ch, '┌');
}

#[test]
fn term_view_can_anchor_board_to_top() {
    let snap = Board::seeded(1).snapshot();
    let view = GameView::default().with_anchor_y(AnchorY::Top);
    let fb = view.render(&snap, &SidePanel::default(), Viewport::new(22, 34));

    assert_eq!(fb.get(0, 0).unwrap().ch, '┌');
}
