//! Core game logic - pure, deterministic, and testable
//!
//! This crate holds the falling-block board state machine and everything it
//! needs. It has no dependencies on terminals or I/O, so the same board runs
//! interactively, headless from a script, or under property tests.
//!
//! # Module Structure
//!
//! - [`board`]: the board state machine, its commands and notifications
//! - [`grid`]: frozen cells, full-row detection and row removal
//! - [`piece`]: the movable piece value (shape, position, rotation)
//! - [`kicks`]: SRS wall-kick offset tables
//! - [`sequence`]: fixed or seeded random piece order
//! - [`events`]: event kinds, payloads and the subscriber bus
//! - [`snapshot`]: owned copies of board state for observers
//! - [`config`] / [`error`]: board geometry and construction errors
//!
//! # Coordinates
//!
//! `x` grows to the right and `y` grows upward; row 0 is the floor. Pieces
//! spawn above the top row and there is no ceiling, so a piece frozen while
//! still partly above the grid ends the game.
//!
//! # Example
//!
//! ```
//! use falling_blocks_core::{Board, BoardConfig, BoardState};
//! use falling_blocks_core::types::PieceShape;
//!
//! let mut board = Board::new(BoardConfig::default().with_seed(7)).unwrap();
//! board.set_piece_sequence(&[PieceShape::O]);
//! board.new_game();
//!
//! board.right();
//! board.hard_drop();
//!
//! assert_eq!(board.state(), BoardState::Playing);
//! assert_eq!(board.snapshot().filled_count(), 4);
//! ```

pub mod board;
pub mod config;
pub mod error;
pub mod events;
pub mod grid;
pub mod kicks;
pub mod piece;
pub mod sequence;
pub mod snapshot;

pub use falling_blocks_types as types;

pub use board::{Board, BoardState};
pub use config::BoardConfig;
pub use error::BoardError;
pub use events::{BoardEvent, BoardListener, EventBus, EventKind, SubscriptionId};
pub use grid::Grid;
pub use kicks::WallKickTable;
pub use piece::MovableTetrisPiece;
pub use sequence::PieceSequence;
pub use snapshot::BoardSnapshot;
