use rand::SeedableRng;
use rand_chacha::ChaCha12Rng;

/// The single random source threaded through every stochastic subsystem.
pub type SimRng = ChaCha12Rng;

/// Create a deterministic RNG from a seed.
pub fn create_rng(seed: u64) -> SimRng {
    ChaCha12Rng::seed_from_u64(seed)
}

/// Derive a 32-bit noise seed from the run seed so field noise is reproducible.
pub fn noise_seed(seed: u64) -> u32 {
    (seed ^ (seed >> 32)) as u32
}
