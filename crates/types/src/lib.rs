//! Core types module - shared data structures and constants
//!
//! This module defines the fundamental value types used throughout the engine.
//! All types are plain data with no behavior beyond pure geometry, which makes
//! them usable from the board state machine, the terminal front end and tests.
//!
//! # Coordinates
//!
//! Board coordinates are integer `(x, y)` pairs. `x` grows to the right and
//! `y` grows upward, so row `0` is the bottom row of the board.
//!
//! # Board Dimensions
//!
//! - **Width**: 10 columns (indexed 0-9)
//! - **Height**: 20 rows (indexed 0-19, bottom to top)
//! - **Headroom**: 4 rows above the visible board where pieces spawn
//!
//! # Examples
//!
//! ```
//! use falling_blocks_types::{PieceShape, Point, Rotation, BOARD_HEIGHT, BOARD_WIDTH};
//!
//! let r = Rotation::None.clockwise();
//! assert_eq!(r, Rotation::Quarter);
//! assert_eq!(r.counter_clockwise(), Rotation::None);
//!
//! let p = Point::new(1, 2).translate(3, -1);
//! assert_eq!(p, Point::new(4, 1));
//!
//! assert_eq!(PieceShape::from_char('t'), Some(PieceShape::T));
//! assert_eq!(PieceShape::I.width(), 4);
//!
//! assert_eq!(BOARD_WIDTH, 10);
//! assert_eq!(BOARD_HEIGHT, 20);
//! ```

use std::fmt;
use std::ops::Add;

/// Board width in cells (10 columns)
pub const BOARD_WIDTH: usize = 10;

/// Board height in cells (20 rows)
pub const BOARD_HEIGHT: usize = 20;

/// Rows above the visible board included in composited board views.
pub const HEADROOM_ROWS: usize = 4;

/// Number of blocks in every piece.
pub const BLOCKS_PER_PIECE: usize = 4;

/// Step interval at the first level, in milliseconds.
pub const STEP_INTERVAL_MS: u32 = 800;

/// How much faster each level steps, in milliseconds.
pub const STEP_INTERVAL_DECREMENT_MS: u32 = 100;

/// Level after which the step interval stops shrinking.
pub const MAX_DIFFICULTY_LEVEL: u32 = 6;

/// Line clear scoring indexed by the number of rows cleared at once.
pub const LINE_SCORES: [u32; 5] = [0, 40, 100, 300, 1200];

/// Points awarded for every piece that reaches the board.
pub const SCORE_PER_PIECE: u32 = 4;

/// Cleared lines needed to advance one level.
pub const LINES_PER_LEVEL: i32 = 5;

/// Immutable integer board coordinate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const ORIGIN: Point = Point::new(0, 0);

    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    pub fn x(&self) -> i32 {
        self.x
    }

    pub fn y(&self) -> i32 {
        self.y
    }

    /// Return a new point shifted by `(dx, dy)`.
    pub const fn translate(self, dx: i32, dy: i32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Point;

    fn add(self, rhs: Point) -> Point {
        self.translate(rhs.x, rhs.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self::new(x, y)
    }
}

impl fmt::Display for Point {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

/// Rotation states, cyclic in clockwise order starting at the spawn orientation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Rotation {
    #[default]
    None,
    Quarter,
    Half,
    ThreeQuarter,
}

impl Rotation {
    pub const ALL: [Rotation; 4] = [
        Rotation::None,
        Rotation::Quarter,
        Rotation::Half,
        Rotation::ThreeQuarter,
    ];

    /// Rotate clockwise
    pub fn clockwise(self) -> Self {
        match self {
            Rotation::None => Rotation::Quarter,
            Rotation::Quarter => Rotation::Half,
            Rotation::Half => Rotation::ThreeQuarter,
            Rotation::ThreeQuarter => Rotation::None,
        }
    }

    /// Rotate counter-clockwise
    pub fn counter_clockwise(self) -> Self {
        match self {
            Rotation::None => Rotation::ThreeQuarter,
            Rotation::ThreeQuarter => Rotation::Half,
            Rotation::Half => Rotation::Quarter,
            Rotation::Quarter => Rotation::None,
        }
    }

    /// Number of clockwise quarter turns from the spawn orientation.
    pub fn index(self) -> usize {
        match self {
            Rotation::None => 0,
            Rotation::Quarter => 1,
            Rotation::Half => 2,
            Rotation::ThreeQuarter => 3,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Rotation::None => "none",
            Rotation::Quarter => "quarter",
            Rotation::Half => "half",
            Rotation::ThreeQuarter => "three_quarter",
        }
    }
}

/// The seven tetromino shapes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PieceShape {
    I,
    J,
    L,
    O,
    S,
    T,
    Z,
}

impl PieceShape {
    pub const ALL: [PieceShape; 7] = [
        PieceShape::I,
        PieceShape::J,
        PieceShape::L,
        PieceShape::O,
        PieceShape::S,
        PieceShape::T,
        PieceShape::Z,
    ];

    /// Side of the bounding box the shape rotates in.
    pub fn width(self) -> i32 {
        match self {
            PieceShape::I | PieceShape::O => 4,
            _ => 3,
        }
    }

    /// Local block offsets at [`Rotation::None`], `y` up.
    pub fn points(self) -> [Point; BLOCKS_PER_PIECE] {
        const fn p(x: i32, y: i32) -> Point {
            Point::new(x, y)
        }
        match self {
            PieceShape::I => [p(0, 2), p(1, 2), p(2, 2), p(3, 2)],
            PieceShape::J => [p(0, 2), p(0, 1), p(1, 1), p(2, 1)],
            PieceShape::L => [p(2, 2), p(0, 1), p(1, 1), p(2, 1)],
            PieceShape::O => [p(1, 1), p(2, 1), p(1, 2), p(2, 2)],
            PieceShape::S => [p(0, 1), p(1, 1), p(1, 2), p(2, 2)],
            PieceShape::T => [p(1, 2), p(0, 1), p(1, 1), p(2, 1)],
            PieceShape::Z => [p(0, 2), p(1, 2), p(1, 1), p(2, 1)],
        }
    }

    /// Local block offsets for a rotation.
    ///
    /// Each orientation is a fixed map of the spawn layout inside the
    /// `width x width` box. The O piece ignores rotation entirely.
    pub fn local_points(self, rotation: Rotation) -> [Point; BLOCKS_PER_PIECE] {
        let w = self.width();
        let mut points = self.points();
        if self == PieceShape::O {
            return points;
        }
        for p in &mut points {
            *p = match rotation {
                Rotation::None => *p,
                Rotation::Quarter => Point::new(p.y, w - 1 - p.x),
                Rotation::Half => Point::new(w - 1 - p.x, w - 1 - p.y),
                Rotation::ThreeQuarter => Point::new(w - 1 - p.y, p.x),
            };
        }
        points
    }

    /// Grid marker used for frozen cells of this shape.
    pub fn marker(self) -> char {
        match self {
            PieceShape::I => 'I',
            PieceShape::J => 'J',
            PieceShape::L => 'L',
            PieceShape::O => 'O',
            PieceShape::S => 'S',
            PieceShape::T => 'T',
            PieceShape::Z => 'Z',
        }
    }

    /// Parse a shape from its marker letter (case-insensitive)
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'I' => Some(PieceShape::I),
            'J' => Some(PieceShape::J),
            'L' => Some(PieceShape::L),
            'O' => Some(PieceShape::O),
            'S' => Some(PieceShape::S),
            'T' => Some(PieceShape::T),
            'Z' => Some(PieceShape::Z),
            _ => None,
        }
    }

    /// Parse a run of marker letters such as `"IJLOSTZ"`.
    ///
    /// Returns `None` if any character is not a shape letter.
    pub fn parse_sequence(s: &str) -> Option<Vec<Self>> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .map(Self::from_char)
            .collect()
    }
}

impl fmt::Display for PieceShape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.marker())
    }
}

/// Cell on the board (None = empty, Some = frozen block of that shape)
pub type Cell = Option<PieceShape>;

/// Commands an input driver can issue to a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    Left,
    Right,
    Down,
    RotateCw,
    RotateCcw,
    Drop,
    NewGame,
}

impl Command {
    /// Parse a replay-script letter.
    ///
    /// `L`/`R` move, `D` steps down, `C`/`W` rotate clockwise/counter-clockwise,
    /// `X` hard drops and `N` starts a new game.
    pub fn from_char(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'L' => Some(Command::Left),
            'R' => Some(Command::Right),
            'D' => Some(Command::Down),
            'C' => Some(Command::RotateCw),
            'W' => Some(Command::RotateCcw),
            'X' => Some(Command::Drop),
            'N' => Some(Command::NewGame),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Command::Left => "left",
            Command::Right => "right",
            Command::Down => "down",
            Command::RotateCw => "rotateCw",
            Command::RotateCcw => "rotateCcw",
            Command::Drop => "drop",
            Command::NewGame => "newGame",
        }
    }
}
