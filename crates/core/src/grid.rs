//! Grid module - the frozen blocks of a board
//!
//! The grid is an ordered list of rows, row 0 at the bottom. Each row is a
//! fixed-length slice of cells that are either empty or carry the shape that
//! froze there. Clearing a row removes it and appends a fresh empty row on
//! top, so the row count never changes.

use arrayvec::ArrayVec;

use crate::types::{Cell, PieceShape, Point, BLOCKS_PER_PIECE};

/// Frozen cells of a board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Grid {
    width: usize,
    rows: Vec<Box<[Cell]>>,
}

impl Grid {
    /// Create an empty grid
    pub fn new(width: usize, height: usize) -> Self {
        Self {
            width,
            rows: (0..height).map(|_| Self::empty_row(width)).collect(),
        }
    }

    fn empty_row(width: usize) -> Box<[Cell]> {
        vec![None; width].into_boxed_slice()
    }

    pub fn width(&self) -> usize {
        self.width
    }

    pub fn height(&self) -> usize {
        self.rows.len()
    }

    /// Whether `p` lies on the visible board.
    pub fn contains(&self, p: Point) -> bool {
        self.index(p).is_some()
    }

    #[inline]
    fn index(&self, p: Point) -> Option<(usize, usize)> {
        let x = usize::try_from(p.x).ok()?;
        let y = usize::try_from(p.y).ok()?;
        (x < self.width && y < self.rows.len()).then_some((x, y))
    }

    /// Cell at `p`, or `None` if `p` is off the board.
    pub fn get(&self, p: Point) -> Option<Cell> {
        self.index(p).map(|(x, y)| self.rows[y][x])
    }

    /// Whether a frozen block sits at `p`. Off-board points are never occupied.
    pub fn is_occupied(&self, p: Point) -> bool {
        matches!(self.get(p), Some(Some(_)))
    }

    /// Write a frozen block. Returns false if `p` is off the board.
    pub fn set(&mut self, p: Point, shape: PieceShape) -> bool {
        match self.index(p) {
            Some((x, y)) => {
                self.rows[y][x] = Some(shape);
                true
            }
            None => false,
        }
    }

    /// Check if a row is completely filled
    pub fn is_row_full(&self, y: usize) -> bool {
        self.rows
            .get(y)
            .is_some_and(|row| row.iter().all(|cell| cell.is_some()))
    }

    /// Number of frozen cells in a row.
    pub fn row_fill(&self, y: usize) -> usize {
        self.rows
            .get(y)
            .map_or(0, |row| row.iter().filter(|cell| cell.is_some()).count())
    }

    /// Indices of full rows, bottom to top.
    ///
    /// A freeze touches at most four rows and full rows are removed after
    /// every freeze, so no more than four can exist at once.
    pub fn full_rows(&self) -> ArrayVec<usize, BLOCKS_PER_PIECE> {
        let mut full = ArrayVec::new();
        for y in 0..self.rows.len() {
            if self.is_row_full(y) && full.try_push(y).is_err() {
                break;
            }
        }
        full
    }

    /// Remove the given rows (any order) and append one empty row per removal.
    pub fn remove_rows(&mut self, rows: &[usize]) {
        let mut sorted: ArrayVec<usize, BLOCKS_PER_PIECE> =
            rows.iter().copied().take(BLOCKS_PER_PIECE).collect();
        sorted.sort_unstable();
        for &y in sorted.iter().rev() {
            if y < self.rows.len() {
                self.rows.remove(y);
                self.rows.push(Self::empty_row(self.width));
            }
        }
    }

    /// Empty every cell.
    pub fn clear(&mut self) {
        for row in &mut self.rows {
            row.fill(None);
        }
    }

    /// Independent copy of the rows, bottom row first.
    pub fn to_rows(&self) -> Vec<Vec<Cell>> {
        self.rows.iter().map(|row| row.to_vec()).collect()
    }

    /// Number of frozen cells on the whole grid.
    pub fn filled_count(&self) -> usize {
        (0..self.rows.len()).map(|y| self.row_fill(y)).sum()
    }
}
