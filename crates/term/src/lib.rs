//! Terminal game renderer.
//!
//! A small rendering layer for terminal play. Instead of a widget toolkit it
//! renders into a plain framebuffer that is then flushed to the terminal, so
//! the board's view stays testable without a tty.

pub mod fb;
pub mod game_view;
pub mod renderer;

pub use falling_blocks_core as core;
pub use falling_blocks_types as types;

pub use fb::{FrameBuffer, Glyph, GlyphStyle, Rgb};
pub use game_view::{AnchorY, GameView, SidePanel, Viewport};
pub use renderer::{encode_diff_into, encode_full_into, TerminalRenderer};
