use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Source of partition choices.
///
/// Production runs draw uniformly; tests plug in a deterministic sequence.
pub trait PartitionRng {
    /// Returns a partition index in `[0, n)`. `n` is always at least 1.
    fn next_partition(&mut self, n: usize) -> usize;
}

impl PartitionRng for StdRng {
    fn next_partition(&mut self, n: usize) -> usize {
        self.gen_range(0..n)
    }
}

/// Reproducible generator when a seed is given, OS-seeded otherwise.
pub fn seeded_rng(seed: Option<u64>) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(seed),
        None => StdRng::from_entropy(),
    }
}
