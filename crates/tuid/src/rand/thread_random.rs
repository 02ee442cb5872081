use crate::RandSource;
use rand::{Rng, rng};

/// A `RandSource` that uses the thread-local RNG (`rand::rng()`).
///
/// This RNG is fast, cryptographically secure (ChaCha-based), and
/// automatically reseeded periodically.
///
/// This type does not store the RNG; it reaches the calling thread's
/// generator on every call, so it is `Send + Sync` and may be shared freely.
#[derive(Default, Clone, Copy, Debug)]
pub struct ThreadRandom;

impl RandSource<i32> for ThreadRandom {
    fn rand(&self) -> i32 {
        rng().random()
    }
}

impl RandSource<i64> for ThreadRandom {
    fn rand(&self) -> i64 {
        rng().random()
    }
}

impl RandSource<u64> for ThreadRandom {
    fn rand(&self) -> u64 {
        rng().random()
    }
}

impl<const N: usize> RandSource<[u8; N]> for ThreadRandom {
    fn rand(&self) -> [u8; N] {
        let mut buf = [0_u8; N];
        rng().fill(&mut buf[..]);
        buf
    }
}
