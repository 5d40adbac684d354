//! A playable game: one board, its score keeper and the pause flag.

use std::cell::RefCell;
use std::rc::Rc;
use std::time::Duration;

use anyhow::{bail, Context, Result};

use crate::core::{Board, BoardConfig, BoardEvent, BoardListener, BoardSnapshot, BoardState};
use crate::score::{step_interval_ms, ScoreCard, ScoreKeeper};
use crate::term::SidePanel;
use crate::types::{Command, PieceShape};

pub struct GameSession {
    board: Board,
    score: Rc<RefCell<ScoreKeeper>>,
    paused: bool,
}

impl GameSession {
    pub fn new(config: BoardConfig) -> Result<Self> {
        let mut board = Board::new(config).context("building board")?;
        let score = Rc::new(RefCell::new(ScoreKeeper::new()));
        let keeper = Rc::clone(&score);
        board.subscribe_all(move |event: &BoardEvent| keeper.borrow_mut().on_event(event));
        Ok(Self {
            board,
            score,
            paused: false,
        })
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    pub fn set_piece_sequence(&mut self, pieces: &[PieceShape]) {
        self.board.set_piece_sequence(pieces);
    }

    pub fn start(&mut self) {
        self.paused = false;
        self.board.new_game();
    }

    /// Apply a driver command. Only a new game gets through while paused.
    pub fn apply(&mut self, command: Command) {
        if command == Command::NewGame {
            self.start();
        } else if !self.paused {
            self.board.apply(command);
        }
    }

    /// Gravity tick.
    pub fn tick(&mut self) {
        if !self.paused {
            self.board.step();
        }
    }

    /// Toggle pause while a game is running; returns the new pause state.
    pub fn toggle_pause(&mut self) -> bool {
        if self.board.state() == BoardState::Playing {
            self.paused = !self.paused;
        }
        self.paused
    }

    pub fn is_paused(&self) -> bool {
        self.paused
    }

    pub fn snapshot(&self) -> BoardSnapshot {
        self.board.snapshot()
    }

    pub fn score(&self) -> ScoreCard {
        self.score.borrow().card()
    }

    /// Current gravity interval for the score keeper's level.
    pub fn step_interval(&self) -> Duration {
        Duration::from_millis(u64::from(step_interval_ms(self.score().level)))
    }

    pub fn side_panel(&self) -> SidePanel {
        let card = self.score();
        let live = self.board.state() != BoardState::Ready;
        SidePanel {
            score: card.score,
            level: card.level,
            lines: card.lines,
            next: live.then(|| self.board.next_shape()),
            game_over: self.board.is_game_over(),
            paused: self.paused,
        }
    }

    /// Run a command script (`L R D C W X N`, whitespace ignored).
    ///
    /// Returns the number of commands applied.
    pub fn run_script(&mut self, script: &str) -> Result<usize> {
        let mut applied = 0;
        for (i, c) in script.chars().enumerate() {
            if c.is_whitespace() || c == ',' {
                continue;
            }
            let Some(command) = Command::from_char(c) else {
                bail!("unknown command {c:?} at offset {i} in script");
            };
            self.apply(command);
            applied += 1;
        }
        tracing::debug!(applied, state = ?self.board.state(), "script finished");
        Ok(applied)
    }
}
