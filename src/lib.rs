//! Falling blocks (workspace facade crate).
//!
//! Re-exports the board engine, terminal input and rendering crates under one
//! name, and adds the pieces that sit on top of a board: score keeping and a
//! playable session.

pub use falling_blocks_core as core;
pub use falling_blocks_input as input;
pub use falling_blocks_term as term;
pub use falling_blocks_types as types;

pub mod score;
pub mod session;

pub use score::{step_interval_ms, ScoreCard, ScoreKeeper};
pub use session::GameSession;
