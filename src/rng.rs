use rand::rngs::StdRng;
use rand::SeedableRng;

// SplitMix64 constants, used to spread a run seed across batch indices.
const GOLDEN_GAMMA: u64 = 0x9e3779b97f4a7c15;
const MIX_MULT_1: u64 = 0xbf58476d1ce4e5b9;
const MIX_MULT_2: u64 = 0x94d049bb133111eb;

/// Derives the seed of batch `index` from the run seed.
///
/// Every batch gets its own stream, so a batch's rows depend only on the run
/// seed and its position in the table, not on which batches ran before it.
pub fn batch_seed(seed: u64, index: usize) -> u64 {
    let mut z = seed.wrapping_add(GOLDEN_GAMMA.wrapping_mul(index as u64 + 1));
    z = (z ^ (z >> 30)).wrapping_mul(MIX_MULT_1);
    z = (z ^ (z >> 27)).wrapping_mul(MIX_MULT_2);
    z ^ (z >> 31)
}

/// Random source for one batch.
///
/// `Some(seed)` gives a reproducible stream; `None` seeds from OS entropy.
pub fn batch_rng(seed: Option<u64>, index: usize) -> StdRng {
    match seed {
        Some(seed) => StdRng::seed_from_u64(batch_seed(seed, index)),
        None => StdRng::from_entropy(),
    }
}
