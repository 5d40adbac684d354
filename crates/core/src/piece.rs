//! Movable piece - an immutable (shape, position, rotation) value
//!
//! Every transformation returns a new piece. Legality is not checked here;
//! the [`Board`](crate::Board) decides whether a transformed piece may be
//! committed.

use std::fmt;

use crate::types::{PieceShape, Point, Rotation, BLOCKS_PER_PIECE};

/// A piece that has not been frozen into the grid yet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct MovableTetrisPiece {
    shape: PieceShape,
    position: Point,
    rotation: Rotation,
}

impl MovableTetrisPiece {
    /// Create a piece in the spawn orientation.
    pub fn new(shape: PieceShape, position: Point) -> Self {
        Self::with_rotation(shape, position, Rotation::None)
    }

    pub fn with_rotation(shape: PieceShape, position: Point, rotation: Rotation) -> Self {
        Self {
            shape,
            position,
            rotation,
        }
    }

    pub fn shape(&self) -> PieceShape {
        self.shape
    }

    /// Board position of the bounding box's bottom-left corner.
    pub fn position(&self) -> Point {
        self.position
    }

    pub fn rotation(&self) -> Rotation {
        self.rotation
    }

    pub fn left(&self) -> Self {
        self.with_position(self.position.translate(-1, 0))
    }

    pub fn right(&self) -> Self {
        self.with_position(self.position.translate(1, 0))
    }

    pub fn down(&self) -> Self {
        self.with_position(self.position.translate(0, -1))
    }

    pub fn rotate_cw(&self) -> Self {
        Self::with_rotation(self.shape, self.position, self.rotation.clockwise())
    }

    pub fn rotate_ccw(&self) -> Self {
        Self::with_rotation(self.shape, self.position, self.rotation.counter_clockwise())
    }

    /// Same shape and rotation at a new position (used for wall-kick retries).
    pub fn with_position(&self, position: Point) -> Self {
        Self::with_rotation(self.shape, position, self.rotation)
    }

    /// Block offsets inside the bounding box for the current rotation.
    pub fn local_points(&self) -> [Point; BLOCKS_PER_PIECE] {
        self.shape.local_points(self.rotation)
    }

    /// Absolute board coordinates of the four blocks.
    pub fn board_points(&self) -> [Point; BLOCKS_PER_PIECE] {
        self.local_points().map(|p| p + self.position)
    }
}

impl fmt::Display for MovableTetrisPiece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.position)?;
        let local = self.local_points();
        for y in (0..BLOCKS_PER_PIECE as i32).rev() {
            for x in 0..BLOCKS_PER_PIECE as i32 {
                if local.contains(&Point::new(x, y)) {
                    f.write_str("[ ]")?;
                } else {
                    f.write_str("   ")?;
                }
            }
            writeln!(f)?;
        }
        Ok(())
    }
}
