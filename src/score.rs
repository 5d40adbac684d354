//! Score keeping driven purely by board notifications.
//!
//! The board has no notion of points or levels. A [`ScoreKeeper`] subscribes
//! to a board's events and derives score, cleared lines and level from them.

use serde::Serialize;

use crate::core::{BoardEvent, BoardListener};
use crate::types::{
    LINES_PER_LEVEL, LINE_SCORES, MAX_DIFFICULTY_LEVEL, SCORE_PER_PIECE, STEP_INTERVAL_DECREMENT_MS,
    STEP_INTERVAL_MS,
};

/// Point-in-time totals of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoreCard {
    pub score: u32,
    pub lines: u32,
    pub level: u32,
    /// Lines still to clear before the next level.
    pub lines_to_next_level: i32,
    /// Set once the game is over; the totals no longer change.
    pub finished: bool,
}

impl Default for ScoreCard {
    fn default() -> Self {
        Self {
            score: 0,
            lines: 0,
            level: 1,
            lines_to_next_level: LINES_PER_LEVEL,
            finished: false,
        }
    }
}

#[derive(Debug, Default, Clone)]
pub struct ScoreKeeper {
    card: ScoreCard,
}

impl ScoreKeeper {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn card(&self) -> ScoreCard {
        self.card
    }

    pub fn reset(&mut self) {
        self.card = ScoreCard::default();
    }

    fn rows_filled(&mut self, count: u8) {
        let card = &mut self.card;
        card.score += LINE_SCORES
            .get(usize::from(count))
            .copied()
            .unwrap_or_default();
        card.lines += u32::from(count);
        card.lines_to_next_level -= i32::from(count);
        if card.lines_to_next_level <= 0 {
            card.lines_to_next_level = LINES_PER_LEVEL - card.lines_to_next_level;
            card.level += 1;
            tracing::debug!(level = card.level, "level up");
        }
    }
}

impl BoardListener for ScoreKeeper {
    fn on_event(&mut self, event: &BoardEvent) {
        match event {
            BoardEvent::NewGame(_) => self.reset(),
            BoardEvent::NextPieceUpdate(_) => self.card.score += SCORE_PER_PIECE,
            BoardEvent::RowFilled(count) => self.rows_filled(*count),
            BoardEvent::GameOver(_) => self.card.finished = true,
            BoardEvent::BoardUpdate(_) | BoardEvent::CurrentPieceUpdate(_) => {}
        }
    }
}

/// Gravity interval for a level.
///
/// A game starts at 800ms. Each level reached after the first runs at
/// `800 - 100 * level`, with the level capped at 6.
pub fn step_interval_ms(level: u32) -> u32 {
    if level <= 1 {
        return STEP_INTERVAL_MS;
    }
    STEP_INTERVAL_MS - STEP_INTERVAL_DECREMENT_MS * level.min(MAX_DIFFICULTY_LEVEL)
}
