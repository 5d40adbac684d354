//! Construction errors.
//!
//! Gameplay itself never fails: illegal moves are silent no-ops and game over
//! is a state, not an error.

use thiserror::Error;

/// Smallest width that fits every piece's bounding box.
pub const MIN_WIDTH: usize = 4;

/// Largest accepted width or height.
pub const MAX_DIMENSION: usize = 4096;

#[derive(Debug, Error, PartialEq, Eq, Clone, Copy)]
pub enum BoardError {
    #[error(
        "invalid board dimensions {width}x{height} (width must be {min}..={max}, height 1..={max})",
        min = MIN_WIDTH,
        max = MAX_DIMENSION
    )]
    InvalidDimensions { width: usize, height: usize },
}
