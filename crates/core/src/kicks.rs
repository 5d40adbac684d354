//! Wall kicks - SRS offset tables
//!
//! Offsets are `(dx, dy)` with `y` up, tried in table order. The first entry
//! of every transition is `(0, 0)`, so an in-place rotation always wins when
//! it is legal.
//! Reference: https://tetris.wiki/SRS

use crate::types::{PieceShape, Point, Rotation};

/// Five candidate offsets for each of the eight adjacent transitions.
pub type KickTable = [[Point; 5]; 8];

const fn p(x: i32, y: i32) -> Point {
    Point::new(x, y)
}

const NO_KICK: [Point; 1] = [Point::ORIGIN];

/// JLSTZ kick table (shared by J, L, S, T, Z)
const JLSTZ_KICKS: KickTable = [
    // 0->R
    [p(0, 0), p(-1, 0), p(-1, 1), p(0, -2), p(-1, -2)],
    // 0->L
    [p(0, 0), p(1, 0), p(1, 1), p(0, -2), p(1, -2)],
    // R->0
    [p(0, 0), p(1, 0), p(1, -1), p(0, 2), p(1, 2)],
    // R->2
    [p(0, 0), p(1, 0), p(1, -1), p(0, 2), p(1, 2)],
    // 2->R
    [p(0, 0), p(-1, 0), p(-1, 1), p(0, -2), p(-1, -2)],
    // 2->L
    [p(0, 0), p(1, 0), p(1, 1), p(0, -2), p(1, -2)],
    // L->2
    [p(0, 0), p(-1, 0), p(-1, -1), p(0, 2), p(-1, 2)],
    // L->0
    [p(0, 0), p(-1, 0), p(-1, -1), p(0, 2), p(-1, 2)],
];

/// I piece kick table
const I_KICKS: KickTable = [
    // 0->R
    [p(0, 0), p(-2, 0), p(1, 0), p(-2, -1), p(1, 2)],
    // 0->L
    [p(0, 0), p(-1, 0), p(2, 0), p(-1, 2), p(2, -1)],
    // R->0
    [p(0, 0), p(2, 0), p(-1, 0), p(2, 1), p(-1, -2)],
    // R->2
    [p(0, 0), p(-1, 0), p(2, 0), p(-1, 2), p(2, -1)],
    // 2->R
    [p(0, 0), p(1, 0), p(-2, 0), p(1, -2), p(-2, 1)],
    // 2->L
    [p(0, 0), p(2, 0), p(-1, 0), p(2, 1), p(-1, -2)],
    // L->2
    [p(0, 0), p(-2, 0), p(1, 0), p(-2, -1), p(1, 2)],
    // L->0
    [p(0, 0), p(1, 0), p(-2, 0), p(1, -2), p(-2, 1)],
];

/// Table row for an adjacent transition, `None` for anything else.
fn transition_index(from: Rotation, to: Rotation) -> Option<usize> {
    use Rotation::{Half, Quarter, ThreeQuarter};
    match (from, to) {
        (Rotation::None, Quarter) => Some(0),
        (Rotation::None, ThreeQuarter) => Some(1),
        (Quarter, Rotation::None) => Some(2),
        (Quarter, Half) => Some(3),
        (Half, Quarter) => Some(4),
        (Half, ThreeQuarter) => Some(5),
        (ThreeQuarter, Half) => Some(6),
        (ThreeQuarter, Rotation::None) => Some(7),
        _ => None,
    }
}

/// Per-shape lookup of ordered kick offsets.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct WallKickTable;

impl WallKickTable {
    /// Ordered trial offsets for rotating `shape` from `from` to `to`.
    ///
    /// The O piece and non-adjacent transitions only get `(0, 0)`.
    pub fn offsets(shape: PieceShape, from: Rotation, to: Rotation) -> &'static [Point] {
        let table = match shape {
            PieceShape::O => return &NO_KICK,
            PieceShape::I => &I_KICKS,
            _ => &JLSTZ_KICKS,
        };
        match transition_index(from, to) {
            Some(idx) => &table[idx],
            None => &NO_KICK,
        }
    }
}
