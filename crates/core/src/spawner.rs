//! Spawner module - decides which piece comes next
//!
//! The simulation asks its [`Spawner`] for a kind every time a piece is needed,
//! then for the shape that kind spawns with. The shipped spawners use the
//! catalog template; a host can override [`Spawner::shape_for`] to supply its
//! own orientation or pattern.
//! Two seeded implementations are provided:
//!
//! - [`UniformSpawner`]: independent uniform choice among the seven templates
//! - [`BagSpawner`]: the "7-bag" randomizer; each bag is a shuffled permutation
//!   of all seven kinds, so droughts are bounded
//!
//! Both run on a small LCG so a seed reproduces the whole piece sequence.

use crate::shape::Shape;
use crate::types::PieceKind;

/// Source of upcoming pieces, supplied by the host
pub trait Spawner {
    fn next_piece(&mut self) -> PieceKind;

    /// Shape a freshly drawn `kind` spawns with
    fn shape_for(&mut self, kind: PieceKind) -> Shape {
        Shape::template(kind)
    }
}

impl<F> Spawner for F
where
    F: FnMut() -> PieceKind,
{
    fn next_piece(&mut self) -> PieceKind {
        self()
    }
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    pub fn new(seed: u32) -> Self {
        // A zero state would only ever yield the increment sequence from 0
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Value in [0, max); uses the high bits, which cycle far slower than the low ones
    pub fn next_range(&mut self, max: u32) -> u32 {
        ((self.next_u32() as u64 * max as u64) >> 32) as u32
    }

    /// Fisher-Yates shuffle
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

#[derive(Debug, Clone)]
pub struct UniformSpawner {
    rng: SimpleRng,
}

impl UniformSpawner {
    pub fn new(seed: u32) -> Self {
        Self {
            rng: SimpleRng::new(seed),
        }
    }
}

impl Spawner for UniformSpawner {
    fn next_piece(&mut self) -> PieceKind {
        PieceKind::ALL[self.rng.next_range(PieceKind::ALL.len() as u32) as usize]
    }
}

#[derive(Debug, Clone)]
pub struct BagSpawner {
    bag: [PieceKind; 7],
    bag_index: usize,
    rng: SimpleRng,
}

impl BagSpawner {
    pub fn new(seed: u32) -> Self {
        let mut spawner = Self {
            bag: PieceKind::ALL,
            bag_index: 0,
            rng: SimpleRng::new(seed),
        };
        spawner.refill_bag();
        spawner
    }

    fn refill_bag(&mut self) {
        self.bag = PieceKind::ALL;
        self.rng.shuffle(&mut self.bag);
        self.bag_index = 0;
    }

    /// Next piece without drawing it
    pub fn peek(&self) -> PieceKind {
        // bag_index < 7 always holds between draws
        self.bag[self.bag_index]
    }
}

impl Spawner for BagSpawner {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.bag[self.bag_index];
        self.bag_index += 1;
        if self.bag_index >= self.bag.len() {
            self.refill_bag();
        }
        kind
    }
}

/// Cycles through a fixed list; handy for scripted scenarios.
#[derive(Debug, Clone)]
pub struct SequenceSpawner {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl SequenceSpawner {
    /// # Panics
    ///
    /// Panics if `kinds` is empty.
    pub fn new(kinds: impl Into<Vec<PieceKind>>) -> Self {
        let kinds = kinds.into();
        assert!(!kinds.is_empty(), "sequence spawner needs at least one kind");
        Self { kinds, index: 0 }
    }
}

impl Spawner for SequenceSpawner {
    fn next_piece(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index += 1;
        kind
    }
}
