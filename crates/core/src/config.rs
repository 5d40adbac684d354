//! Board configuration.

use crate::error::{BoardError, MAX_DIMENSION, MIN_WIDTH};
use crate::types::{BOARD_HEIGHT, BOARD_WIDTH};

/// Geometry and random seed of a board.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct BoardConfig {
    pub width: usize,
    pub height: usize,
    /// Seed for random piece draws; `None` seeds from the thread RNG.
    pub seed: Option<u64>,
}

impl Default for BoardConfig {
    fn default() -> Self {
        Self {
            width: BOARD_WIDTH,
            height: BOARD_HEIGHT,
            seed: None,
        }
    }
}

impl BoardConfig {
    /// Create from environment variables.
    ///
    /// Reads `FALLING_BLOCKS_WIDTH`, `FALLING_BLOCKS_HEIGHT` and
    /// `FALLING_BLOCKS_SEED`. Missing or unparsable values keep their defaults.
    pub fn from_env() -> Self {
        use std::env;

        let defaults = Self::default();
        let parse = |key: &str| env::var(key).ok().and_then(|s| s.trim().parse().ok());

        Self {
            width: parse("FALLING_BLOCKS_WIDTH").unwrap_or(defaults.width),
            height: parse("FALLING_BLOCKS_HEIGHT").unwrap_or(defaults.height),
            seed: env::var("FALLING_BLOCKS_SEED")
                .ok()
                .and_then(|s| s.trim().parse().ok()),
        }
    }

    pub fn with_size(mut self, width: usize, height: usize) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }

    /// Check the dimensions before any board is built.
    pub fn validate(&self) -> Result<(), BoardError> {
        let width_ok = (MIN_WIDTH..=MAX_DIMENSION).contains(&self.width);
        let height_ok = (1..=MAX_DIMENSION).contains(&self.height);
        if width_ok && height_ok {
            Ok(())
        } else {
            Err(BoardError::InvalidDimensions {
                width: self.width,
                height: self.height,
            })
        }
    }
}
