use crate::piece::MovableTetrisPiece;
use crate::types::{Cell, Point, HEADROOM_ROWS};

/// Independent copy of a board's frozen cells and current piece.
///
/// Holding a snapshot never affects the board it came from.
#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct BoardSnapshot {
    pub width: usize,
    pub height: usize,
    /// Frozen rows, bottom row first.
    pub frozen: Vec<Vec<Cell>>,
    pub current: Option<MovableTetrisPiece>,
}

impl BoardSnapshot {
    /// Frozen cell at `(x, y)`, `None` if off the board.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        let x = usize::try_from(x).ok()?;
        let y = usize::try_from(y).ok()?;
        self.frozen.get(y).and_then(|row| row.get(x)).copied()
    }

    /// Frozen rows plus [`HEADROOM_ROWS`] empty rows on top, with the current
    /// piece painted in. Blocks above the headroom are dropped.
    pub fn composited(&self) -> Vec<Vec<Cell>> {
        let mut rows = self.frozen.clone();
        rows.extend((0..HEADROOM_ROWS).map(|_| vec![None; self.width]));
        if let Some(piece) = self.current {
            for Point { x, y } in piece.board_points() {
                let (Ok(x), Ok(y)) = (usize::try_from(x), usize::try_from(y)) else {
                    continue;
                };
                if let Some(cell) = rows.get_mut(y).and_then(|row| row.get_mut(x)) {
                    *cell = Some(piece.shape());
                }
            }
        }
        rows
    }

    /// Number of frozen cells.
    pub fn filled_count(&self) -> usize {
        self.frozen
            .iter()
            .map(|row| row.iter().filter(|c| c.is_some()).count())
            .sum()
    }
}
