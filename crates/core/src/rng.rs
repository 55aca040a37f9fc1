//! RNG module - piece supply with one-piece lookahead
//!
//! Kinds are drawn uniformly and independently; there is no bag, so streaks and
//! droughts are possible. The supplier always knows the piece after the active one,
//! which is what the next-piece preview shows.
//!
//! Any [`rand::Rng`] can drive the supplier. [`PieceSupplier::seeded`] gives a
//! reproducible sequence for tests and headless runs.

use std::collections::VecDeque;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::types::PieceKind;

/// Random piece generator with a lookahead buffer
#[derive(Debug, Clone)]
pub struct PieceSupplier<R = StdRng> {
    /// Piece that the next `next_active` call returns
    next: PieceKind,
    /// Scripted pieces queued after `next` (empty in normal play)
    backlog: VecDeque<PieceKind>,
    rng: R,
}

impl PieceSupplier<StdRng> {
    /// Create a supplier with a reproducible sequence
    pub fn seeded(seed: u64) -> Self {
        Self::with_rng(StdRng::seed_from_u64(seed))
    }

    /// Create a supplier seeded from the operating system
    pub fn from_entropy() -> Self {
        Self::with_rng(StdRng::from_os_rng())
    }

    /// Create a supplier that hands out `kinds` in order, then continues with
    /// seeded random draws
    pub fn from_kinds(kinds: impl IntoIterator<Item = PieceKind>, seed: u64) -> Self {
        let mut rng = StdRng::seed_from_u64(seed);
        let mut backlog: VecDeque<PieceKind> = kinds.into_iter().collect();
        let next = match backlog.pop_front() {
            Some(kind) => kind,
            None => random_kind(&mut rng),
        };
        Self { next, backlog, rng }
    }
}

impl<R: Rng> PieceSupplier<R> {
    /// Create a supplier drawing from the given RNG
    pub fn with_rng(mut rng: R) -> Self {
        let next = random_kind(&mut rng);
        Self {
            next,
            backlog: VecDeque::new(),
            rng,
        }
    }

    /// Take the piece that becomes active and queue up its successor
    pub fn next_active(&mut self) -> PieceKind {
        let successor = match self.backlog.pop_front() {
            Some(kind) => kind,
            None => random_kind(&mut self.rng),
        };
        std::mem::replace(&mut self.next, successor)
    }

    /// The piece the next `next_active` call will return, without consuming it
    pub fn peek_next(&self) -> PieceKind {
        self.next
    }
}

/// Uniform draw over the seven kinds
fn random_kind<R: Rng + ?Sized>(rng: &mut R) -> PieceKind {
    PieceKind::ALL[rng.random_range(0..PieceKind::ALL.len())]
}
