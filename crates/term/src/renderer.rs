//! Terminal output for framebuffers.
//!
//! [`TerminalRenderer`] owns the tty session and remembers the frame on
//! screen. The first frame, and any frame after a resize or
//! [`invalidate`](TerminalRenderer::invalidate), repaints everything; later
//! frames rewrite only the spans that changed. Both paths go through one pen
//! that re-sends just the style fields that differ from the previous glyph.

use std::io::{self, Write};
use std::ops::Range;

use anyhow::Result;
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    queue,
    style::{Attribute, Color, Colors, Print, ResetColor, SetAttribute, SetColors},
    terminal::{
        self, Clear, ClearType, DisableLineWrap, EnableLineWrap, EnterAlternateScreen,
        LeaveAlternateScreen,
    },
};

use crate::fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};

/// Unchanged glyphs shorter than this between two dirty spans are reprinted
/// instead of paying for a cursor jump.
const SPAN_MERGE_GAP: u16 = 4;

pub struct TerminalRenderer {
    stdout: io::Stdout,
    on_screen: Option<FrameBuffer>,
    bytes: Vec<u8>,
}

impl Default for TerminalRenderer {
    fn default() -> Self {
        Self::new()
    }
}

impl TerminalRenderer {
    pub fn new() -> Self {
        Self {
            stdout: io::stdout(),
            on_screen: None,
            bytes: Vec::with_capacity(8 * 1024),
        }
    }

    /// Raw mode, alternate screen, hidden cursor.
    pub fn enter(&mut self) -> Result<()> {
        terminal::enable_raw_mode()?;
        self.bytes.clear();
        queue!(self.bytes, EnterAlternateScreen, Hide, DisableLineWrap)?;
        self.flush()
    }

    /// Undo [`enter`](Self::enter).
    pub fn exit(&mut self) -> Result<()> {
        self.bytes.clear();
        queue!(
            self.bytes,
            ResetColor,
            SetAttribute(Attribute::Reset),
            EnableLineWrap,
            Show,
            LeaveAlternateScreen
        )?;
        self.flush()?;
        terminal::disable_raw_mode()?;
        Ok(())
    }

    /// Forget the frame on screen so the next draw repaints everything.
    pub fn invalidate(&mut self) {
        self.on_screen = None;
    }

    pub fn draw(&mut self, fb: &FrameBuffer) -> Result<()> {
        self.bytes.clear();
        let same_size = |s: &&mut FrameBuffer| s.width() == fb.width() && s.height() == fb.height();
        match self.on_screen.as_mut().filter(same_size) {
            Some(shown) => {
                encode_diff_into(shown, fb, &mut self.bytes)?;
                shown.clone_from(fb);
            }
            None => {
                encode_full_into(fb, &mut self.bytes)?;
                self.on_screen = Some(fb.clone());
            }
        }
        self.flush()
    }

    fn flush(&mut self) -> Result<()> {
        self.stdout.write_all(&self.bytes)?;
        self.stdout.flush()?;
        Ok(())
    }
}

/// Encode a clear-and-repaint of the whole frame into `out`.
pub fn encode_full_into(fb: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    queue!(out, Clear(ClearType::All))?;
    let mut pen = Pen::new(out);
    for y in 0..fb.height() {
        pen.jump(0, y)?;
        for x in 0..fb.width() {
            pen.print(fb.get(x, y).unwrap_or_default())?;
        }
    }
    pen.finish()
}

/// Encode the spans where `next` differs from `prev` into `out`.
///
/// Both frames must have the same size; rows past the smaller frame are
/// ignored.
pub fn encode_diff_into(prev: &FrameBuffer, next: &FrameBuffer, out: &mut Vec<u8>) -> Result<()> {
    let mut pen = Pen::new(out);
    for y in 0..next.height().min(prev.height()) {
        for span in dirty_spans(prev, next, y) {
            pen.jump(span.start, y)?;
            for x in span {
                pen.print(next.get(x, y).unwrap_or_default())?;
            }
        }
    }
    pen.finish()
}

/// Dirty column ranges of row `y`, with short clean gaps folded in.
fn dirty_spans(prev: &FrameBuffer, next: &FrameBuffer, y: u16) -> Vec<Range<u16>> {
    let mut spans: Vec<Range<u16>> = Vec::new();
    for x in 0..next.width() {
        if prev.get(x, y) == next.get(x, y) {
            continue;
        }
        match spans.last_mut() {
            Some(last) if x - last.end < SPAN_MERGE_GAP => last.end = x + 1,
            _ => spans.push(x..x + 1),
        }
    }
    spans
}

/// Style difference between the terminal's current pen and a glyph.
///
/// Resetting attributes also resets colours, so a reset always carries both.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct PenChange {
    reset: bool,
    fg: Option<Rgb>,
    bg: Option<Rgb>,
}

fn pen_change(from: Option<GlyphStyle>, to: GlyphStyle) -> Option<PenChange> {
    match from {
        Some(cur) if cur == to => None,
        Some(cur) if cur.bold == to.bold && cur.dim == to.dim => Some(PenChange {
            reset: false,
            fg: (cur.fg != to.fg).then_some(to.fg),
            bg: (cur.bg != to.bg).then_some(to.bg),
        }),
        _ => Some(PenChange {
            reset: true,
            fg: Some(to.fg),
            bg: Some(to.bg),
        }),
    }
}

/// Writes glyphs into a byte buffer, tracking the active style.
struct Pen<'a> {
    out: &'a mut Vec<u8>,
    style: Option<GlyphStyle>,
}

impl<'a> Pen<'a> {
    fn new(out: &'a mut Vec<u8>) -> Self {
        Self { out, style: None }
    }

    fn jump(&mut self, x: u16, y: u16) -> Result<()> {
        queue!(self.out, MoveTo(x, y))?;
        Ok(())
    }

    fn print(&mut self, glyph: Glyph) -> Result<()> {
        if let Some(change) = pen_change(self.style, glyph.style) {
            if change.reset {
                queue!(self.out, SetAttribute(Attribute::Reset))?;
                if glyph.style.bold {
                    queue!(self.out, SetAttribute(Attribute::Bold))?;
                }
                if glyph.style.dim {
                    queue!(self.out, SetAttribute(Attribute::Dim))?;
                }
            }
            queue!(
                self.out,
                SetColors(Colors {
                    foreground: change.fg.map(terminal_color),
                    background: change.bg.map(terminal_color),
                })
            )?;
            self.style = Some(glyph.style);
        }
        queue!(self.out, Print(glyph.ch))?;
        Ok(())
    }

    fn finish(self) -> Result<()> {
        queue!(self.out, ResetColor, SetAttribute(Attribute::Reset))?;
        Ok(())
    }
}

fn terminal_color(rgb: Rgb) -> Color {
    Color::Rgb {
        r: rgb.r,
        g: rgb.g,
        b: rgb.b,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(bytes: &[u8]) -> String {
        String::from_utf8_lossy(bytes).into_owned()
    }

    #[test]
    fn spans_fold_short_gaps_and_split_long_ones() {
        let style = GlyphStyle::default();
        let before = FrameBuffer::new(12, 2);
        let mut after = FrameBuffer::new(12, 2);
        after.put_str(1, 0, "ab", style);
        after.put_char(5, 0, 'c', style);
        after.put_char(11, 0, 'd', style);
        after.put_char(0, 1, 'e', style);

        assert_eq!(dirty_spans(&before, &after, 0), vec![1..6, 11..12]);
        assert_eq!(dirty_spans(&before, &after, 1), vec![0..1]);
        assert!(dirty_spans(&after, &after, 0).is_empty());
    }

    #[test]
    fn pen_sends_only_what_changed() {
        let base = GlyphStyle::new(Rgb::new(1, 2, 3), Rgb::new(0, 0, 0));
        let recoloured = GlyphStyle::new(Rgb::new(9, 9, 9), Rgb::new(0, 0, 0));

        assert_eq!(pen_change(Some(base), base), None);
        assert_eq!(
            pen_change(Some(base), recoloured),
            Some(PenChange {
                reset: false,
                fg: Some(Rgb::new(9, 9, 9)),
                bg: None,
            })
        );
        // Dropping bold needs a reset, which also wipes the colours.
        assert_eq!(
            pen_change(Some(base.bold()), base),
            Some(PenChange {
                reset: true,
                fg: Some(base.fg),
                bg: Some(base.bg),
            })
        );
        assert!(pen_change(None, base).is_some_and(|c| c.reset));
    }

    #[test]
    fn full_encode_starts_every_row_with_a_jump() {
        let mut fb = FrameBuffer::new(2, 2);
        fb.put_str(0, 0, "AB", GlyphStyle::default());
        fb.put_str(0, 1, "CD", GlyphStyle::default());

        let mut out = Vec::new();
        encode_full_into(&fb, &mut out).unwrap();
        let out = text(&out);
        assert!(out.starts_with("\x1b[2J\x1b[1;1H"));
        assert!(out.contains("AB"));
        // Same style on the second row, so no colour codes between jump and text.
        assert!(out.contains("\x1b[2;1HCD"));
    }

    #[test]
    fn unchanged_frame_encodes_only_the_final_reset() {
        let mut fb = FrameBuffer::new(4, 3);
        fb.put_str(0, 1, "xyz", GlyphStyle::default().bold());

        let mut out = Vec::new();
        encode_diff_into(&fb, &fb, &mut out).unwrap();

        let mut reset_only = Vec::new();
        queue!(reset_only, ResetColor, SetAttribute(Attribute::Reset)).unwrap();
        assert_eq!(out, reset_only);
    }

    #[test]
    fn diff_rewrites_the_changed_span_in_place() {
        let style = GlyphStyle::default();
        let prev = FrameBuffer::new(8, 2);
        let mut next = prev.clone();
        next.put_str(3, 1, "ok", style);

        let mut out = Vec::new();
        encode_diff_into(&prev, &next, &mut out).unwrap();
        let out = text(&out);
        assert!(out.contains("\x1b[2;4H"));
        assert!(out.contains("ok"));
        assert!(!out.contains("\x1b[1;"));
    }
}
