//! GameView: maps a [`BoardSnapshot`] into a terminal framebuffer.
//!
//! Pure (no I/O), so it can be unit-tested. Board rows grow upward while
//! terminal rows grow downward; the view flips them and shows the spawn
//! headroom above the playfield so a freshly spawned piece is visible.

use crate::core::BoardSnapshot;
use crate::fb::{FrameBuffer, GlyphStyle, Rgb};
use crate::types::{PieceShape, HEADROOM_ROWS};

/// Terminal viewport dimensions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub width: u16,
    pub height: u16,
}

impl Viewport {
    pub fn new(width: u16, height: u16) -> Self {
        Self { width, height }
    }
}

/// Everything drawn beside the board that the board itself does not know.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct SidePanel {
    pub score: u32,
    pub level: u32,
    pub lines: u32,
    pub next: Option<PieceShape>,
    pub game_over: bool,
    pub paused: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AnchorY {
    Center,
    Top,
}

const FIELD_BG: Rgb = Rgb::new(30, 30, 40);
const HEADROOM_BG: Rgb = Rgb::new(16, 16, 22);
const BLACK: Rgb = Rgb::new(0, 0, 0);

/// A lightweight terminal view of a board.
#[derive(Debug, Clone, Copy)]
pub struct GameView {
    /// Board cell width in terminal columns.
    cell_w: u16,
    /// Board cell height in terminal rows.
    cell_h: u16,
    anchor_y: AnchorY,
}

impl Default for GameView {
    fn default() -> Self {
        // 2x1 compensates for the usual glyph aspect ratio.
        Self::new(2, 1)
    }
}

/// Screen placement of one rendered board.
struct Frame {
    x: u16,
    y: u16,
    w: u16,
    h: u16,
    rows: usize,
}

impl GameView {
    pub fn new(cell_w: u16, cell_h: u16) -> Self {
        Self {
            cell_w: cell_w.max(1),
            cell_h: cell_h.max(1),
            anchor_y: AnchorY::Center,
        }
    }

    pub fn with_anchor_y(mut self, anchor_y: AnchorY) -> Self {
        self.anchor_y = anchor_y;
        self
    }

    /// Terminal size needed for the board frame alone.
    pub fn frame_size(&self, snap: &BoardSnapshot) -> (u16, u16) {
        let rows = snap.height + HEADROOM_ROWS;
        let w = (snap.width as u16).saturating_mul(self.cell_w).saturating_add(2);
        let h = (rows as u16).saturating_mul(self.cell_h).saturating_add(2);
        (w, h)
    }

    /// Render into an existing framebuffer, resizing it to the viewport.
    pub fn render_into(
        &self,
        snap: &BoardSnapshot,
        panel: &SidePanel,
        viewport: Viewport,
        fb: &mut FrameBuffer,
    ) {
        fb.resize(viewport.width, viewport.height);
        fb.clear(GlyphStyle::default().glyph(' '));

        let (w, h) = self.frame_size(snap);
        let frame = Frame {
            x: viewport.width.saturating_sub(w) / 2,
            y: match self.anchor_y {
                AnchorY::Center => viewport.height.saturating_sub(h) / 2,
                AnchorY::Top => 0,
            },
            w,
            h,
            rows: snap.height + HEADROOM_ROWS,
        };

        draw_border(fb, &frame, GlyphStyle::new(Rgb::new(200, 200, 200), BLACK));

        let dot = GlyphStyle::new(Rgb::new(90, 90, 100), FIELD_BG).dim();
        let sky = GlyphStyle::new(HEADROOM_BG, HEADROOM_BG);
        for (y, row) in snap.composited().iter().enumerate() {
            for (x, cell) in row.iter().enumerate() {
                let (ch, style) = match cell {
                    Some(shape) => ('█', piece_style(*shape, y >= snap.height)),
                    None if y >= snap.height => (' ', sky),
                    None => ('·', dot),
                };
                self.fill_board_cell(fb, &frame, x, y, ch, style);
            }
        }

        self.draw_side_panel(fb, panel, viewport, &frame);

        if panel.paused {
            draw_overlay_text(fb, &frame, "PAUSED");
        } else if panel.game_over {
            draw_overlay_text(fb, &frame, "GAME OVER");
        }
    }

    /// Convenience helper that allocates a new framebuffer.
    pub fn render(&self, snap: &BoardSnapshot, panel: &SidePanel, viewport: Viewport) -> FrameBuffer {
        let mut fb = FrameBuffer::new(viewport.width, viewport.height);
        self.render_into(snap, panel, viewport, &mut fb);
        fb
    }

    fn fill_board_cell(
        &self,
        fb: &mut FrameBuffer,
        frame: &Frame,
        x: usize,
        y: usize,
        ch: char,
        style: GlyphStyle,
    ) {
        let screen_row = (frame.rows - 1 - y) as u16;
        let px = frame.x + 1 + x as u16 * self.cell_w;
        let py = frame.y + 1 + screen_row * self.cell_h;
        fb.fill_rect(px, py, self.cell_w, self.cell_h, ch, style);
    }

    fn draw_side_panel(&self, fb: &mut FrameBuffer, panel: &SidePanel, viewport: Viewport, frame: &Frame) {
        let panel_x = frame.x.saturating_add(frame.w).saturating_add(2);
        if panel_x >= viewport.width || viewport.width - panel_x < 12 {
            return;
        }

        let label = GlyphStyle::new(Rgb::new(220, 220, 220), BLACK).bold();
        let value = GlyphStyle::new(Rgb::new(200, 200, 200), BLACK);

        let mut y = frame.y;
        for (name, n) in [
            ("SCORE", panel.score),
            ("LEVEL", panel.level),
            ("LINES", panel.lines),
        ] {
            fb.put_str(panel_x, y, name, label);
            fb.put_u32(panel_x, y.saturating_add(1), n, value);
            y = y.saturating_add(3);
        }

        fb.put_str(panel_x, y, "NEXT", label);
        y = y.saturating_add(1);
        let Some(shape) = panel.next else {
            fb.put_str(panel_x, y, "-", value);
            return;
        };
        // Spawn orientation occupies local rows 1 and 2; draw row 2 first.
        for (line, local_y) in [2, 1].into_iter().enumerate() {
            for p in shape.points().iter().filter(|p| p.y == local_y) {
                let px = panel_x + p.x as u16 * self.cell_w;
                fb.fill_rect(
                    px,
                    y + line as u16,
                    self.cell_w,
                    1,
                    '█',
                    piece_style(shape, false),
                );
            }
        }
    }
}

fn draw_border(fb: &mut FrameBuffer, frame: &Frame, style: GlyphStyle) {
    let Frame { x, y, w, h, .. } = *frame;
    if w < 2 || h < 2 {
        return;
    }
    fb.put_char(x, y, '┌', style);
    fb.put_char(x + w - 1, y, '┐', style);
    fb.put_char(x, y + h - 1, '└', style);
    fb.put_char(x + w - 1, y + h - 1, '┘', style);
    for dx in 1..w - 1 {
        fb.put_char(x + dx, y, '─', style);
        fb.put_char(x + dx, y + h - 1, '─', style);
    }
    for dy in 1..h - 1 {
        fb.put_char(x, y + dy, '│', style);
        fb.put_char(x + w - 1, y + dy, '│', style);
    }
}

fn draw_overlay_text(fb: &mut FrameBuffer, frame: &Frame, text: &str) {
    let mid_y = frame.y.saturating_add(frame.h / 2);
    let text_w = text.chars().count() as u16;
    let x = frame.x.saturating_add(frame.w.saturating_sub(text_w) / 2);
    fb.put_str(x, mid_y, text, GlyphStyle::new(Rgb::new(255, 255, 255), BLACK).bold());
}

fn piece_style(shape: PieceShape, in_headroom: bool) -> GlyphStyle {
    let fg = match shape {
        PieceShape::I => Rgb::new(80, 220, 220),
        PieceShape::O => Rgb::new(240, 220, 80),
        PieceShape::T => Rgb::new(200, 120, 220),
        PieceShape::S => Rgb::new(100, 220, 120),
        PieceShape::Z => Rgb::new(220, 80, 80),
        PieceShape::J => Rgb::new(80, 120, 220),
        PieceShape::L => Rgb::new(255, 165, 0),
    };
    let bg = if in_headroom { HEADROOM_BG } else { FIELD_BG };
    GlyphStyle::new(fg, bg).bold()
}
