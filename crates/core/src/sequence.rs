//! Piece sequence - where new shapes come from
//!
//! By default every draw is an independent, uniform pick among the seven
//! shapes (no 7-bag). A seeded ChaCha stream keeps random games reproducible.
//!
//! Tests and replays can install a fixed override sequence, which is then
//! cycled by index.

use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::types::PieceShape;

/// Source of upcoming piece shapes.
#[derive(Debug, Clone)]
pub struct PieceSequence {
    /// Fixed override; empty means random draws.
    pieces: Vec<PieceShape>,
    /// Index into `pieces`
    index: usize,
    rng: ChaCha8Rng,
    seed: u64,
}

impl PieceSequence {
    /// Create a random sequence with the given seed
    pub fn new(seed: u64) -> Self {
        Self {
            pieces: Vec::new(),
            index: 0,
            rng: ChaCha8Rng::seed_from_u64(seed),
            seed,
        }
    }

    /// Create a random sequence seeded from the thread RNG.
    pub fn from_entropy() -> Self {
        Self::new(rand::rng().random())
    }

    /// Install a fixed, cyclically repeating override and rewind to its start.
    ///
    /// An empty list switches back to random draws.
    pub fn set_pieces(&mut self, pieces: Vec<PieceShape>) {
        self.pieces = pieces;
        self.index = 0;
    }

    /// Rewind the override to its first entry.
    pub fn restart(&mut self) {
        self.index = 0;
    }

    pub fn is_random(&self) -> bool {
        self.pieces.is_empty()
    }

    pub fn pieces(&self) -> &[PieceShape] {
        &self.pieces
    }

    pub fn seed(&self) -> u64 {
        self.seed
    }

    /// Draw the next shape
    pub fn draw(&mut self) -> PieceShape {
        if self.pieces.is_empty() {
            let i = self.rng.random_range(0..PieceShape::ALL.len());
            return PieceShape::ALL[i];
        }
        self.index %= self.pieces.len();
        let shape = self.pieces[self.index];
        self.index += 1;
        shape
    }
}

impl Default for PieceSequence {
    fn default() -> Self {
        Self::from_entropy()
    }
}
