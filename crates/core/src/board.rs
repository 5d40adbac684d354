//! Board module - the authoritative game state machine
//!
//! A board owns the frozen grid, the single movable piece, the next-shape
//! preview and the piece sequence. External drivers call one operation at a
//! time; each committed change is announced through the board's
//! [`EventBus`].
//!
//! # Lifecycle
//!
//! `Ready` → [`Board::new_game`] → `Playing` → (a freeze writes outside the
//! grid) → `GameOver`. Game over is terminal until the next `new_game`.
//!
//! # Notifications
//!
//! - A committed [`Board::try_move`] fires current-piece then board updates,
//!   unless a hard drop is in progress.
//! - Every [`Board::down`] ends with board then current-piece updates.
//! - The line-clear scan fires current-piece/board updates once per full
//!   row it finds, then one row-filled with the count.
//! - Every non-restart draw fires next-piece-update while the game is live.

use std::fmt;

use tracing::{debug, trace};

use crate::config::BoardConfig;
use crate::error::BoardError;
use crate::events::{BoardEvent, BoardListener, EventBus, EventKind, SubscriptionId};
use crate::grid::Grid;
use crate::kicks::WallKickTable;
use crate::piece::MovableTetrisPiece;
use crate::sequence::PieceSequence;
use crate::snapshot::BoardSnapshot;
use crate::types::{Cell, Command, PieceShape, Point, BOARD_HEIGHT, BOARD_WIDTH};

/// Where a board is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum BoardState {
    /// Constructed, no game started yet.
    Ready,
    Playing,
    /// Terminal until the next new game.
    GameOver,
}

/// A falling-block board.
#[derive(Debug)]
pub struct Board {
    grid: Grid,
    current: Option<MovableTetrisPiece>,
    next: PieceShape,
    sequence: PieceSequence,
    state: BoardState,
    /// Suppresses per-move notifications while a hard drop runs.
    drop_in_progress: bool,
    events: EventBus,
}

impl Board {
    /// Create a board from a validated configuration.
    pub fn new(config: BoardConfig) -> Result<Self, BoardError> {
        config.validate()?;
        let sequence = match config.seed {
            Some(seed) => PieceSequence::new(seed),
            None => PieceSequence::from_entropy(),
        };
        debug!(
            width = config.width,
            height = config.height,
            seed = sequence.seed(),
            "board created"
        );
        Ok(Self::build(config.width, config.height, sequence))
    }

    /// A standard 10x20 board with the given seed.
    pub fn seeded(seed: u64) -> Self {
        Self::build(BOARD_WIDTH, BOARD_HEIGHT, PieceSequence::new(seed))
    }

    fn build(width: usize, height: usize, mut sequence: PieceSequence) -> Self {
        let next = sequence.draw();
        Self {
            grid: Grid::new(width, height),
            current: None,
            next,
            sequence,
            state: BoardState::Ready,
            drop_in_progress: false,
            events: EventBus::new(),
        }
    }

    // ---- queries ----

    pub fn width(&self) -> usize {
        self.grid.width()
    }

    pub fn height(&self) -> usize {
        self.grid.height()
    }

    pub fn state(&self) -> BoardState {
        self.state
    }

    pub fn is_game_over(&self) -> bool {
        self.state == BoardState::GameOver
    }

    pub fn current_piece(&self) -> Option<MovableTetrisPiece> {
        self.current
    }

    /// Shape shown in the next-piece preview.
    pub fn next_shape(&self) -> PieceShape {
        self.next
    }

    /// Seed of the random piece stream.
    pub fn seed(&self) -> u64 {
        self.sequence.seed()
    }

    /// Frozen cell at `(x, y)`, `None` if off the board.
    pub fn cell(&self, x: i32, y: i32) -> Option<Cell> {
        self.grid.get(Point::new(x, y))
    }

    /// Deep copy of the frozen rows, bottom row first.
    pub fn frozen_rows(&self) -> Vec<Vec<Cell>> {
        self.grid.to_rows()
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        BoardSnapshot {
            width: self.grid.width(),
            height: self.grid.height(),
            frozen: self.grid.to_rows(),
            current: self.current,
        }
    }

    /// Whether `piece` could be the current piece: every block inside the
    /// side walls, at or above the floor and not on a frozen cell. There is
    /// no ceiling.
    pub fn is_legal(&self, piece: &MovableTetrisPiece) -> bool {
        let width = self.grid.width() as i32;
        piece
            .board_points()
            .iter()
            .all(|p| p.x >= 0 && p.x < width && p.y >= 0 && !self.grid.is_occupied(*p))
    }

    /// Spawn point for a shape: centered on its own box width, just above the
    /// top row.
    pub fn spawn_position(&self, shape: PieceShape) -> Point {
        let x = (self.grid.width() as i32 - shape.width()) / 2;
        let mut y = self.grid.height() as i32 - 1;
        if shape == PieceShape::I {
            y -= 1;
        }
        Point::new(x, y)
    }

    // ---- subscriptions ----

    pub fn subscribe(
        &mut self,
        kind: EventKind,
        listener: impl BoardListener + 'static,
    ) -> SubscriptionId {
        self.events.subscribe(kind, listener)
    }

    pub fn subscribe_all(&mut self, listener: impl BoardListener + 'static) -> SubscriptionId {
        self.events.subscribe_all(listener)
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) -> bool {
        self.events.unsubscribe(id)
    }

    // ---- lifecycle ----

    /// Clear the grid, rewind the sequence and spawn the first piece.
    pub fn new_game(&mut self) {
        self.sequence.restart();
        self.grid.clear();
        self.state = BoardState::Playing;
        self.drop_in_progress = false;
        let piece = self.next_movable_piece(true);
        self.current = Some(piece);
        debug!(first = %piece.shape(), next = %self.next, "new game");
        self.events.emit(&BoardEvent::NewGame(piece));
    }

    /// Install a fixed, cyclically repeating piece order (empty = random).
    ///
    /// During play the current piece is respawned from the new order, and
    /// current-piece and board updates follow the next-piece update so views
    /// can redraw the replacement.
    pub fn set_piece_sequence(&mut self, pieces: &[PieceShape]) {
        self.sequence.set_pieces(pieces.to_vec());
        debug!(len = pieces.len(), "piece sequence installed");
        if self.state == BoardState::Playing {
            self.current = Some(self.next_movable_piece(true));
            self.notify_piece_then_board();
        }
    }

    // ---- commands ----

    /// Advance one tick.
    pub fn step(&mut self) {
        self.down();
    }

    /// Move the piece down one row, or freeze it if it cannot move.
    pub fn down(&mut self) {
        let Some(piece) = self.live_piece() else {
            return;
        };
        if !self.try_move(piece.down()) {
            self.freeze(piece);
            self.clear_full_rows();
            if self.state == BoardState::Playing {
                self.current = Some(self.next_movable_piece(false));
            }
        }
        self.notify_board_then_piece();
    }

    pub fn left(&mut self) -> bool {
        self.live_piece().is_some_and(|p| self.try_move(p.left()))
    }

    pub fn right(&mut self) -> bool {
        self.live_piece().is_some_and(|p| self.try_move(p.right()))
    }

    pub fn rotate_cw(&mut self) -> bool {
        self.live_piece()
            .is_some_and(|p| self.rotate_with_kicks(p, p.rotate_cw()))
    }

    pub fn rotate_ccw(&mut self) -> bool {
        self.live_piece()
            .is_some_and(|p| self.rotate_with_kicks(p, p.rotate_ccw()))
    }

    /// Drop the piece as far as it goes and freeze it.
    ///
    /// Observers see a single freeze, not one update per row fallen.
    pub fn hard_drop(&mut self) {
        if self.state != BoardState::Playing {
            return;
        }
        self.drop_in_progress = true;
        while let Some(piece) = self.current {
            if !self.is_legal(&piece.down()) {
                break;
            }
            self.down();
        }
        self.drop_in_progress = false;
        self.down();
    }

    /// Dispatch a driver command.
    pub fn apply(&mut self, command: Command) {
        match command {
            Command::Left => {
                self.left();
            }
            Command::Right => {
                self.right();
            }
            Command::Down => self.down(),
            Command::RotateCw => {
                self.rotate_cw();
            }
            Command::RotateCcw => {
                self.rotate_ccw();
            }
            Command::Drop => self.hard_drop(),
            Command::NewGame => self.new_game(),
        }
    }

    /// Place a frozen block for puzzle or test setup.
    ///
    /// Refuses off-board cells, occupied cells, cells under the current piece
    /// and the last empty cell of a row, so the grid never holds a full row
    /// between operations.
    pub fn fill_cell(&mut self, x: i32, y: i32, shape: PieceShape) -> bool {
        let p = Point::new(x, y);
        if self.grid.get(p) != Some(None) {
            return false;
        }
        if self
            .current
            .is_some_and(|piece| piece.board_points().contains(&p))
        {
            return false;
        }
        if self.grid.row_fill(y as usize) + 1 >= self.grid.width() {
            return false;
        }
        self.grid.set(p, shape)
    }

    // ---- internals ----

    /// The current piece, but only while playing.
    fn live_piece(&self) -> Option<MovableTetrisPiece> {
        match self.state {
            BoardState::Playing => self.current,
            _ => None,
        }
    }

    /// Commit `candidate` as the current piece if it is legal.
    pub(crate) fn try_move(&mut self, candidate: MovableTetrisPiece) -> bool {
        if !self.is_legal(&candidate) {
            return false;
        }
        self.current = Some(candidate);
        self.notify_piece_then_board();
        true
    }

    /// Try the rotated piece at each kick offset; first legal one wins.
    fn rotate_with_kicks(&mut self, from: MovableTetrisPiece, rotated: MovableTetrisPiece) -> bool {
        if rotated.shape() == PieceShape::O {
            return self.try_move(rotated);
        }
        WallKickTable::offsets(rotated.shape(), from.rotation(), rotated.rotation())
            .iter()
            .any(|&offset| self.try_move(rotated.with_position(rotated.position() + offset)))
    }

    /// Write the piece into the grid. A block outside the grid ends the game.
    fn freeze(&mut self, piece: MovableTetrisPiece) {
        self.current = None;
        for p in piece.board_points() {
            if !self.grid.set(p, piece.shape()) && self.state != BoardState::GameOver {
                self.state = BoardState::GameOver;
                debug!(shape = %piece.shape(), at = %p, "game over");
                self.events.emit(&BoardEvent::GameOver(true));
            }
        }
        trace!(shape = %piece.shape(), at = %piece.position(), "piece frozen");
    }

    fn clear_full_rows(&mut self) {
        let full = self.grid.full_rows();
        for _ in &full {
            self.notify_piece_then_board();
        }
        if full.is_empty() {
            return;
        }
        trace!(rows = full.len(), "rows filled");
        self.events.emit(&BoardEvent::RowFilled(full.len() as u8));
        self.grid.remove_rows(&full);
    }

    fn next_movable_piece(&mut self, restart: bool) -> MovableTetrisPiece {
        if restart {
            self.prepare_next(true);
        }
        let shape = self.next;
        self.prepare_next(false);
        let position = self.spawn_position(shape);
        trace!(%shape, at = %position, "spawn");
        MovableTetrisPiece::new(shape, position)
    }

    fn prepare_next(&mut self, restart: bool) {
        self.next = self.sequence.draw();
        if !restart && self.state != BoardState::GameOver {
            self.events.emit(&BoardEvent::NextPieceUpdate(self.next));
        }
    }

    fn notify_piece_then_board(&mut self) {
        if self.drop_in_progress {
            return;
        }
        self.emit_current_piece();
        self.emit_board();
    }

    fn notify_board_then_piece(&mut self) {
        if self.drop_in_progress {
            return;
        }
        self.emit_board();
        self.emit_current_piece();
    }

    fn emit_current_piece(&mut self) {
        if self.events.wants(EventKind::CurrentPieceUpdate) {
            self.events
                .emit(&BoardEvent::CurrentPieceUpdate(self.current));
        }
    }

    fn emit_board(&mut self) {
        if self.events.wants(EventKind::BoardUpdate) {
            let snapshot = self.snapshot();
            self.events.emit(&BoardEvent::BoardUpdate(snapshot));
        }
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::build(BOARD_WIDTH, BOARD_HEIGHT, PieceSequence::from_entropy())
    }
}

impl fmt::Display for Board {
    /// Frozen blocks and the current piece as `*`, top headroom row first.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let rows = self.snapshot().composited();
        let height = self.grid.height();
        let line = "-".repeat(self.grid.width());
        for (i, row) in rows.iter().enumerate().rev() {
            f.write_str("|")?;
            for cell in row {
                f.write_str(if cell.is_some() { "*" } else { " " })?;
            }
            f.write_str("|\n")?;
            if i == height {
                writeln!(f, " {line}")?;
            }
        }
        write!(f, "|{line}|")
    }
}
