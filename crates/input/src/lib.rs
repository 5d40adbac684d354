//! Terminal input.
//!
//! Maps `crossterm` key events onto board [`Command`](crate::types::Command)s.
//! The board itself knows nothing about keys; the binary owns the loop and
//! feeds mapped commands in one at a time.

pub mod map;

pub use falling_blocks_types as types;

pub use map::{handle_key_event, is_pause_key, should_quit};
