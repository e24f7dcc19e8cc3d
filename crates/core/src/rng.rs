//! RNG module - 7-bag random piece generation
//!
//! The bag holds one of each kind (I, J, L, O, S, T, Z). Pieces are popped
//! until the bag is empty, then it is refilled and reshuffled, so every run
//! of 7 draws starting at a bag boundary contains each kind exactly once.
//!
//! Randomness comes from a small seeded LCG so games are reproducible.

use arrayvec::ArrayVec;

use crate::types::PieceKind;

/// Anything that can feed piece kinds to a session.
pub trait PieceSource {
    /// Produce the next kind
    fn next_kind(&mut self) -> PieceKind;

    /// Called when a fresh game starts on the same source
    fn restart(&mut self) {}
}

/// Simple LCG (Linear Congruential Generator) RNG
/// Uses constants from Numerical Recipes
#[derive(Debug, Clone)]
pub struct SimpleRng {
    state: u32,
}

impl SimpleRng {
    /// Create a new RNG with the given seed
    pub fn new(seed: u32) -> Self {
        // Avoid 0 seed which would produce all zeros
        let state = if seed == 0 { 1 } else { seed };
        Self { state }
    }

    /// Generate next random u32
    pub fn next_u32(&mut self) -> u32 {
        self.state = self.state.wrapping_mul(1664525).wrapping_add(1013904223);
        self.state
    }

    /// Uniform value in `[0, max)` using the high bits of the LCG output.
    pub fn next_range(&mut self, max: u32) -> u32 {
        // Low bits of a power-of-two LCG cycle with short periods.
        (((self.next_u32() as u64) * (max as u64)) >> 32) as u32
    }

    /// Shuffle a slice using Fisher-Yates
    pub fn shuffle<T>(&mut self, slice: &mut [T]) {
        for i in (1..slice.len()).rev() {
            let j = self.next_range((i + 1) as u32) as usize;
            slice.swap(i, j);
        }
    }
}

/// 7-bag randomizer
#[derive(Debug, Clone)]
pub struct SevenBag {
    bag: ArrayVec<PieceKind, 7>,
    rng: SimpleRng,
}

impl SevenBag {
    /// Create a new bag with the given seed. The first bag is filled lazily.
    pub fn new(seed: u32) -> Self {
        Self {
            bag: ArrayVec::new(),
            rng: SimpleRng::new(seed),
        }
    }

    fn refill(&mut self) {
        self.bag.clear();
        self.bag.extend(PieceKind::ALL);
        self.rng.shuffle(&mut self.bag);
    }

    /// Pieces left before the next reshuffle
    pub fn remaining(&self) -> &[PieceKind] {
        &self.bag
    }
}

impl PieceSource for SevenBag {
    fn next_kind(&mut self) -> PieceKind {
        if self.bag.is_empty() {
            self.refill();
        }
        // Never empty after refill.
        self.bag.pop().unwrap_or(PieceKind::I)
    }

    /// Drop the partially consumed bag so the new game starts on a boundary.
    fn restart(&mut self) {
        self.bag.clear();
    }
}

impl Default for SevenBag {
    fn default() -> Self {
        Self::new(1)
    }
}

/// Replays a fixed list of kinds, cycling forever.
///
/// Used for scripted scenarios and replays. An empty list falls back to
/// [`PieceKind::ALL`].
#[derive(Debug, Clone)]
pub struct Sequence {
    kinds: Vec<PieceKind>,
    index: usize,
}

impl Sequence {
    pub fn new(kinds: &[PieceKind]) -> Self {
        let kinds = if kinds.is_empty() {
            PieceKind::ALL.to_vec()
        } else {
            kinds.to_vec()
        };
        Self { kinds, index: 0 }
    }
}

impl PieceSource for Sequence {
    fn next_kind(&mut self) -> PieceKind {
        let kind = self.kinds[self.index % self.kinds.len()];
        self.index = (self.index + 1) % self.kinds.len();
        kind
    }

    fn restart(&mut self) {
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sorted(mut kinds: Vec<PieceKind>) -> Vec<PieceKind> {
        kinds.sort_by_key(|k| k.tag());
        kinds
    }

    #[test]
    fn test_rng_deterministic() {
        let mut rng1 = SimpleRng::new(12345);
        let mut rng2 = SimpleRng::new(12345);

        for _ in 0..100 {
            assert_eq!(rng1.next_u32(), rng2.next_u32());
        }
    }

    #[test]
    fn test_rng_zero_seed_is_usable() {
        let mut rng = SimpleRng::new(0);
        assert_ne!(rng.next_u32(), 0);
    }

    #[test]
    fn test_next_range_stays_in_bounds() {
        let mut rng = SimpleRng::new(7);
        for max in 1..=7 {
            for _ in 0..200 {
                assert!(rng.next_range(max) < max);
            }
        }
    }

    #[test]
    fn test_every_bag_holds_each_kind_once() {
        for seed in [1, 2, 42, 12345, u32::MAX] {
            let mut bag = SevenBag::new(seed);
            for _ in 0..20 {
                let drawn: Vec<_> = (0..7).map(|_| bag.next_kind()).collect();
                assert_eq!(sorted(drawn), PieceKind::ALL.to_vec(), "seed {}", seed);
            }
        }
    }

    #[test]
    fn test_no_kind_appears_three_times_in_a_row() {
        let mut bag = SevenBag::new(99);
        let draws: Vec<_> = (0..700).map(|_| bag.next_kind()).collect();
        for w in draws.windows(3) {
            assert!(!(w[0] == w[1] && w[1] == w[2]), "triple repeat {:?}", w);
        }
        // Back-to-back repeats only happen across a bag boundary.
        for (i, w) in draws.windows(2).enumerate() {
            if w[0] == w[1] {
                assert_eq!((i + 1) % 7, 0, "repeat inside a bag at {}", i);
            }
        }
    }

    #[test]
    fn test_same_seed_same_sequence() {
        let mut a = SevenBag::new(2024);
        let mut b = SevenBag::new(2024);
        for _ in 0..50 {
            assert_eq!(a.next_kind(), b.next_kind());
        }
    }

    #[test]
    fn test_restart_discards_partial_bag() {
        let mut bag = SevenBag::new(5);
        bag.next_kind();
        bag.next_kind();
        assert_eq!(bag.remaining().len(), 5);
        bag.restart();
        assert!(bag.remaining().is_empty());

        let drawn: Vec<_> = (0..7).map(|_| bag.next_kind()).collect();
        assert_eq!(sorted(drawn), PieceKind::ALL.to_vec());
    }

    #[test]
    fn test_sequence_cycles_and_restarts() {
        let mut seq = Sequence::new(&[PieceKind::O, PieceKind::T]);
        assert_eq!(seq.next_kind(), PieceKind::O);
        assert_eq!(seq.next_kind(), PieceKind::T);
        assert_eq!(seq.next_kind(), PieceKind::O);
        seq.restart();
        assert_eq!(seq.next_kind(), PieceKind::O);
    }

    #[test]
    fn test_empty_sequence_falls_back_to_all_kinds() {
        let mut seq = Sequence::new(&[]);
        let drawn: Vec<_> = (0..7).map(|_| seq.next_kind()).collect();
        assert_eq!(drawn, PieceKind::ALL.to_vec());
    }
}
